use std::path::PathBuf;

use gridmdp_core::{
    Grid, ModifiedPolicyIteration, PolicyIteration, Solution, Solver, SolverConfig,
    ValueIteration,
};
use gridmdp_layout::{assignment_maze, compile_yaml};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridmdp_core=info,solve_layout=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn print_solution(grid: &Grid, solution: &Solution) {
    println!("{} ({} iterations)", solution.algorithm, solution.iterations);
    for row in 0..grid.height() {
        let mut policy = String::new();
        let mut utilities = String::new();
        for col in 0..grid.width() {
            match solution.action(row, col) {
                Some(action) => {
                    policy.push_str(&format!("[ {action} ]"));
                    let utility = solution.utility(row, col).unwrap_or_default();
                    utilities.push_str(&format!("[{utility:>9.3}]"));
                }
                None => {
                    policy.push_str("[ # ]");
                    utilities.push_str(&format!("[{:>9}]", "#"));
                }
            }
        }
        println!("{policy}   {utilities}");
    }
    println!();
}

fn main() {
    init_logging();

    let mut args = std::env::args().skip(1);
    let grid = match args.next().map(PathBuf::from) {
        Some(path) => compile_yaml(&path).expect("failed to compile layout YAML"),
        None => assignment_maze().expect("bundled layout should compile"),
    };
    let config = match args.next().map(PathBuf::from) {
        Some(path) => SolverConfig::from_yaml_path(&path).expect("failed to load solver config"),
        None => SolverConfig::from_default_yaml().expect("bundled config should parse"),
    };

    let solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(ValueIteration::new(config.clone()).expect("invalid solver config")),
        Box::new(PolicyIteration::new(config.clone()).expect("invalid solver config")),
        Box::new(ModifiedPolicyIteration::new(config).expect("invalid solver config")),
    ];

    for solver in &solvers {
        let config = solver.config();
        tracing::info!(
            solver = solver.name(),
            discount = config.discount,
            error = config.error,
            max_iterations = config.max_iterations,
            evaluation_sweeps = ?config.evaluation_sweeps,
            "solving"
        );
        match solver.solve(&grid) {
            Ok(solution) => print_solution(&grid, &solution),
            Err(err) => eprintln!("{}: {err}", solver.name()),
        }
    }
}
