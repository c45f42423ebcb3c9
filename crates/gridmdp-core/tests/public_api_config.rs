use gridmdp_core::{ConfigError, SolverConfig};

#[test]
fn default_yaml_matches_default_struct() {
    let config = SolverConfig::from_default_yaml().expect("default yaml should parse");
    assert_eq!(config, SolverConfig::default());
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let config = SolverConfig::from_yaml_str("discount: 0.9\nevaluation_sweeps: 50\n")
        .expect("partial yaml should parse");

    assert_eq!(config.discount, 0.9);
    assert_eq!(config.evaluation_sweeps, Some(50));
    assert_eq!(config.error, SolverConfig::default().error);
}

#[test]
fn yaml_values_are_validated() {
    let err = SolverConfig::from_yaml_str("discount: 1.2\n").expect_err("discount > 1");
    assert!(matches!(err, ConfigError::Discount(_)));

    let err = SolverConfig::from_yaml_str("error: -1.0\n").expect_err("negative error");
    assert!(matches!(err, ConfigError::Tolerance(_)));

    let err = SolverConfig::from_yaml_str("max_iterations: 0\n").expect_err("zero budget");
    assert!(matches!(err, ConfigError::ZeroIterations));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = SolverConfig::from_yaml_str("discount: [").expect_err("bad yaml");
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SolverConfig::from_yaml_path("/nonexistent/solver.yaml").expect_err("no file");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn threshold_follows_the_stopping_bound() {
    let config = SolverConfig::new(0.5, 0.1);
    assert!((config.threshold() - 0.1).abs() < 1e-15);
}
