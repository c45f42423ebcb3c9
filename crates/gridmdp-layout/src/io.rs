use std::{fs, path::Path};

use gridmdp_core::Grid;

use crate::{LayoutError, LayoutSpec};

/// Load a layout spec from YAML on disk.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<LayoutSpec, LayoutError> {
    let yaml = fs::read_to_string(path)?;
    let spec: LayoutSpec = serde_yaml::from_str(&yaml)?;
    Ok(spec)
}

/// Load and compile a grid from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<Grid, LayoutError> {
    let spec = load_yaml(path)?;
    spec.compile()
}

/// Serialize and write a layout spec to YAML.
pub fn save_yaml(path: impl AsRef<Path>, spec: &LayoutSpec) -> Result<(), LayoutError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}
