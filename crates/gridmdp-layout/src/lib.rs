mod builder;
mod error;
mod io;
mod presets;
mod random;
mod spec;

pub use builder::LayoutBuilder;
pub use error::LayoutError;
pub use io::{compile_yaml, load_yaml, save_yaml};
pub use presets::{assignment_maze, test_maze};
pub use random::RandomLayout;
pub use spec::{CellSpec, DEFAULT_REWARD, LayoutSpec};
