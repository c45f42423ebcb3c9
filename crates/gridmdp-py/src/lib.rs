#![allow(unsafe_op_in_unsafe_fn)]

use ::gridmdp_core::{
    ConfigError, Direction, Grid, ModifiedPolicyIteration, PolicyIteration, Solution, SolveError,
    Solver, SolverConfig, ValueIteration,
};
use ::gridmdp_layout::{LayoutError, LayoutSpec, RandomLayout, compile_yaml};
use pyo3::create_exception;
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

create_exception!(
    gridmdp,
    DidNotConverge,
    PyRuntimeError,
    "Raised when a solver exhausts max_iterations."
);

fn layout_err_to_py(err: LayoutError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn config_err_to_py(err: ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn solve_err_to_py(err: SolveError) -> PyErr {
    match err {
        SolveError::DidNotConverge { .. } => DidNotConverge::new_err(err.to_string()),
        SolveError::LinearSystem(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "left",
        Direction::Up => "up",
        Direction::Right => "right",
        Direction::Down => "down",
    }
}

/// Row-major utilities with `None` for walls.
fn utility_rows(grid: &Grid, utilities: &[f64]) -> Vec<Vec<Option<f64>>> {
    grid.states()
        .iter()
        .zip(utilities)
        .map(|(state, utility)| (!state.is_wall()).then_some(*utility))
        .collect::<Vec<_>>()
        .chunks(grid.width())
        .map(<[Option<f64>]>::to_vec)
        .collect()
}

#[pyclass(name = "Layout", module = "gridmdp.layout")]
#[derive(Clone)]
/// Layout()
/// --
///
/// Immutable grid of tiles and walls.
///
/// Build one with `compile_yaml_file`, `compile_yaml_str`, `random_layout`
/// or one of the bundled presets.
pub struct PyLayout {
    inner: Grid,
}

impl PyLayout {
    fn cell(&self, row: usize, col: usize) -> PyResult<&::gridmdp_core::State> {
        self.inner
            .get(row, col)
            .ok_or_else(|| PyIndexError::new_err(format!("cell ({row}, {col}) is out of bounds")))
    }
}

#[pymethods]
impl PyLayout {
    /// height($self, /)
    /// --
    ///
    /// Number of rows.
    #[pyo3(text_signature = "($self, /)")]
    fn height(&self) -> usize {
        self.inner.height()
    }

    /// width($self, /)
    /// --
    ///
    /// Number of columns.
    #[pyo3(text_signature = "($self, /)")]
    fn width(&self) -> usize {
        self.inner.width()
    }

    /// is_wall($self, row, col, /)
    /// --
    ///
    /// Raises:
    ///     IndexError: If the cell is out of bounds.
    #[pyo3(text_signature = "($self, row, col, /)")]
    fn is_wall(&self, row: usize, col: usize) -> PyResult<bool> {
        self.cell(row, col).map(|state| state.is_wall())
    }

    /// is_terminal($self, row, col, /)
    /// --
    ///
    /// Raises:
    ///     IndexError: If the cell is out of bounds.
    #[pyo3(text_signature = "($self, row, col, /)")]
    fn is_terminal(&self, row: usize, col: usize) -> PyResult<bool> {
        self.cell(row, col).map(|state| state.is_terminal())
    }

    /// reward($self, row, col, /)
    /// --
    ///
    /// Reward of a cell; walls report `0.0`.
    ///
    /// Raises:
    ///     IndexError: If the cell is out of bounds.
    #[pyo3(text_signature = "($self, row, col, /)")]
    fn reward(&self, row: usize, col: usize) -> PyResult<f64> {
        self.cell(row, col).map(|state| state.reward())
    }

    /// to_yaml($self, /)
    /// --
    ///
    /// Serialize the layout to YAML.
    #[pyo3(text_signature = "($self, /)")]
    fn to_yaml(&self) -> PyResult<String> {
        serde_yaml::to_string(&LayoutSpec::from_grid(&self.inner))
            .map_err(|err| layout_err_to_py(LayoutError::Yaml(err)))
    }
}

#[pyfunction]
#[pyo3(text_signature = "(path, /)")]
/// compile_yaml_file(path, /)
/// --
///
/// Load and compile a layout from a YAML file path.
///
/// Raises:
///     ValueError: If file loading, YAML parsing, or layout validation fails.
fn compile_yaml_file(path: &str) -> PyResult<PyLayout> {
    let grid = compile_yaml(path).map_err(layout_err_to_py)?;
    Ok(PyLayout { inner: grid })
}

#[pyfunction]
#[pyo3(text_signature = "(yaml, /)")]
/// compile_yaml_str(yaml, /)
/// --
///
/// Compile a layout directly from a YAML string.
///
/// Raises:
///     ValueError: If YAML parsing or layout validation fails.
fn compile_yaml_str(yaml: &str) -> PyResult<PyLayout> {
    let spec: LayoutSpec =
        serde_yaml::from_str(yaml).map_err(|err| layout_err_to_py(LayoutError::Yaml(err)))?;
    let grid = spec.compile().map_err(layout_err_to_py)?;
    Ok(PyLayout { inner: grid })
}

#[pyfunction]
#[pyo3(text_signature = "()")]
/// test_maze()
/// --
///
/// The bundled 3x4 world with absorbing +1/-1 cells.
fn test_maze() -> PyResult<PyLayout> {
    let grid = ::gridmdp_layout::test_maze().map_err(layout_err_to_py)?;
    Ok(PyLayout { inner: grid })
}

#[pyfunction]
#[pyo3(text_signature = "()")]
/// assignment_maze()
/// --
///
/// The bundled 6x6 maze.
fn assignment_maze() -> PyResult<PyLayout> {
    let grid = ::gridmdp_layout::assignment_maze().map_err(layout_err_to_py)?;
    Ok(PyLayout { inner: grid })
}

#[pyfunction]
#[pyo3(signature = (size, seed, wall_ratio=0.15, positive_ratio=0.15, negative_ratio=0.15))]
#[pyo3(
    text_signature = "(size, seed, wall_ratio=0.15, positive_ratio=0.15, negative_ratio=0.15, /)"
)]
/// random_layout(size, seed, wall_ratio=0.15, positive_ratio=0.15, negative_ratio=0.15, /)
/// --
///
/// Generate a deterministic `size` x `size` maze from `seed`.
///
/// Raises:
///     ValueError: If the ratios are outside [0, 1] or sum above 1.
fn random_layout(
    size: usize,
    seed: u64,
    wall_ratio: f64,
    positive_ratio: f64,
    negative_ratio: f64,
) -> PyResult<PyLayout> {
    let layout = RandomLayout {
        wall_ratio,
        positive_ratio,
        negative_ratio,
        ..RandomLayout::square(size, seed)
    };
    let grid = layout.generate().map_err(layout_err_to_py)?;
    Ok(PyLayout { inner: grid })
}

#[pyclass(name = "SolverConfig", module = "gridmdp.solvers")]
#[derive(Clone)]
/// SolverConfig(discount=0.99, error=0.0001, max_iterations=100000, evaluation_sweeps=None, /)
/// --
///
/// Parameters shared by every solver.
pub struct PySolverConfig {
    inner: SolverConfig,
}

#[pymethods]
impl PySolverConfig {
    #[new]
    #[pyo3(signature = (discount=0.99, error=1e-4, max_iterations=100_000, evaluation_sweeps=None))]
    #[pyo3(
        text_signature = "(discount=0.99, error=0.0001, max_iterations=100000, evaluation_sweeps=None, /)"
    )]
    fn new(
        discount: f64,
        error: f64,
        max_iterations: usize,
        evaluation_sweeps: Option<usize>,
    ) -> PyResult<Self> {
        let inner = SolverConfig {
            discount,
            error,
            max_iterations,
            evaluation_sweeps,
        };
        inner.validate().map_err(config_err_to_py)?;
        Ok(Self { inner })
    }

    /// from_yaml(yaml, /)
    /// --
    ///
    /// Parse a config from YAML text; omitted keys take their defaults.
    #[staticmethod]
    #[pyo3(text_signature = "(yaml, /)")]
    fn from_yaml(yaml: &str) -> PyResult<Self> {
        let inner = SolverConfig::from_yaml_str(yaml).map_err(config_err_to_py)?;
        Ok(Self { inner })
    }

    #[getter]
    fn discount(&self) -> f64 {
        self.inner.discount
    }

    #[getter]
    fn error(&self) -> f64 {
        self.inner.error
    }

    #[getter]
    fn max_iterations(&self) -> usize {
        self.inner.max_iterations
    }

    #[getter]
    fn evaluation_sweeps(&self) -> Option<usize> {
        self.inner.evaluation_sweeps
    }
}

#[pyclass(name = "Solution", module = "gridmdp.solvers")]
/// Solution()
/// --
///
/// Final utilities and policy of a solve.
pub struct PySolution {
    #[pyo3(get)]
    algorithm: String,
    #[pyo3(get)]
    iterations: usize,
    inner: Solution,
}

impl From<Solution> for PySolution {
    fn from(value: Solution) -> Self {
        Self {
            algorithm: value.algorithm.to_string(),
            iterations: value.iterations,
            inner: value,
        }
    }
}

#[pymethods]
impl PySolution {
    /// utilities($self, /)
    /// --
    ///
    /// Utilities as a list of rows; walls are `None`.
    #[pyo3(text_signature = "($self, /)")]
    fn utilities(&self) -> Vec<Vec<Option<f64>>> {
        self.inner
            .utility_rows()
            .into_iter()
            .zip(self.inner.policy_rows())
            .map(|(utilities, actions)| {
                utilities
                    .into_iter()
                    .zip(actions)
                    .map(|(utility, action)| action.map(|_| utility))
                    .collect()
            })
            .collect()
    }

    /// policy($self, /)
    /// --
    ///
    /// Actions as a list of rows of `"left"`, `"up"`, `"right"`, `"down"`;
    /// walls are `None`.
    #[pyo3(text_signature = "($self, /)")]
    fn policy(&self) -> Vec<Vec<Option<&'static str>>> {
        self.inner
            .policy_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|a| a.map(direction_name)).collect())
            .collect()
    }

    /// to_json($self, /)
    /// --
    ///
    /// Serialize the solution to JSON.
    #[pyo3(text_signature = "($self, /)")]
    fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json()
            .map_err(|err| PyValueError::new_err(err.to_string()))
    }
}

/// Drive `solver`, forwarding `(iteration, utilities)` to an optional Python callback.
///
/// The first callback failure is re-raised once the solve returns.
fn run_solver(
    solver: &dyn Solver,
    layout: &PyLayout,
    on_iteration: Option<&Bound<'_, PyAny>>,
) -> PyResult<PySolution> {
    let grid = &layout.inner;
    let mut callback_error: Option<PyErr> = None;

    let result = solver.solve_with_hook(grid, &mut |event| {
        let Some(callback) = on_iteration else {
            return;
        };
        if callback_error.is_some() {
            return;
        }
        let rows = utility_rows(grid, event.utilities);
        if let Err(err) = callback.call1((event.iteration, rows)) {
            callback_error = Some(err);
        }
    });

    if let Some(err) = callback_error {
        return Err(err);
    }
    result.map(PySolution::from).map_err(solve_err_to_py)
}

fn resolve_config(config: Option<PyRef<'_, PySolverConfig>>) -> SolverConfig {
    config.map(|c| c.inner.clone()).unwrap_or_default()
}

#[pyfunction]
#[pyo3(signature = (layout, config=None, on_iteration=None))]
#[pyo3(text_signature = "(layout, config=None, on_iteration=None, /)")]
/// value_iteration(layout, config=None, on_iteration=None, /)
/// --
///
/// Solve `layout` with value iteration.
///
/// `on_iteration`, if given, is called as `on_iteration(iteration, utilities)`
/// after every sweep.
///
/// Raises:
///     DidNotConverge: If `max_iterations` is exhausted.
fn value_iteration(
    layout: PyRef<'_, PyLayout>,
    config: Option<PyRef<'_, PySolverConfig>>,
    on_iteration: Option<&Bound<'_, PyAny>>,
) -> PyResult<PySolution> {
    let solver = ValueIteration::new(resolve_config(config)).map_err(config_err_to_py)?;
    run_solver(&solver, &layout, on_iteration)
}

#[pyfunction]
#[pyo3(signature = (layout, config=None, on_iteration=None))]
#[pyo3(text_signature = "(layout, config=None, on_iteration=None, /)")]
/// policy_iteration(layout, config=None, on_iteration=None, /)
/// --
///
/// Solve `layout` with exact policy iteration.
///
/// Raises:
///     DidNotConverge: If `max_iterations` is exhausted.
///     RuntimeError: If the evaluation system cannot be decomposed.
fn policy_iteration(
    layout: PyRef<'_, PyLayout>,
    config: Option<PyRef<'_, PySolverConfig>>,
    on_iteration: Option<&Bound<'_, PyAny>>,
) -> PyResult<PySolution> {
    let solver = PolicyIteration::new(resolve_config(config)).map_err(config_err_to_py)?;
    run_solver(&solver, &layout, on_iteration)
}

#[pyfunction]
#[pyo3(signature = (layout, config=None, on_iteration=None))]
#[pyo3(text_signature = "(layout, config=None, on_iteration=None, /)")]
/// modified_policy_iteration(layout, config=None, on_iteration=None, /)
/// --
///
/// Solve `layout` with approximate policy evaluation.
///
/// Raises:
///     DidNotConverge: If `max_iterations` is exhausted.
fn modified_policy_iteration(
    layout: PyRef<'_, PyLayout>,
    config: Option<PyRef<'_, PySolverConfig>>,
    on_iteration: Option<&Bound<'_, PyAny>>,
) -> PyResult<PySolution> {
    let solver = ModifiedPolicyIteration::new(resolve_config(config)).map_err(config_err_to_py)?;
    run_solver(&solver, &layout, on_iteration)
}

#[pymodule]
fn gridmdp(py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    let layout_mod = PyModule::new_bound(py, "layout")?;
    layout_mod.add_class::<PyLayout>()?;
    layout_mod.add_function(wrap_pyfunction!(compile_yaml_file, &layout_mod)?)?;
    layout_mod.add_function(wrap_pyfunction!(compile_yaml_str, &layout_mod)?)?;
    layout_mod.add_function(wrap_pyfunction!(test_maze, &layout_mod)?)?;
    layout_mod.add_function(wrap_pyfunction!(assignment_maze, &layout_mod)?)?;
    layout_mod.add_function(wrap_pyfunction!(random_layout, &layout_mod)?)?;

    let solvers_mod = PyModule::new_bound(py, "solvers")?;
    solvers_mod.add_class::<PySolverConfig>()?;
    solvers_mod.add_class::<PySolution>()?;
    solvers_mod.add_function(wrap_pyfunction!(value_iteration, &solvers_mod)?)?;
    solvers_mod.add_function(wrap_pyfunction!(policy_iteration, &solvers_mod)?)?;
    solvers_mod.add_function(wrap_pyfunction!(modified_policy_iteration, &solvers_mod)?)?;
    solvers_mod.add("DidNotConverge", py.get_type_bound::<DidNotConverge>())?;

    module.add_submodule(&layout_mod)?;
    module.add_submodule(&solvers_mod)?;

    let sys_modules = py.import_bound("sys")?.getattr("modules")?;
    sys_modules.set_item("gridmdp.layout", &layout_mod)?;
    sys_modules.set_item("gridmdp.solvers", &solvers_mod)?;

    Ok(())
}
