//! Python bindings for the presentation layer.
//!
//! The renderer owns a `World`, toggles it, calls `advance_frame()` from its
//! timer, forwards pointer clicks to `add_agent` / `add_obstacle`, and redraws
//! from `agents()` / `obstacles()`. Agent ids are stable between resets, so a
//! renderer can keep one shape per id.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::structs::{Agent, Obstacle};
use crate::world::World;

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        match err {
            SimError::NoValidPosition { .. } => PyRuntimeError::new_err(err.to_string()),
            SimError::InvalidConfig(_) | SimError::InvalidTimestep(_) => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

#[pyclass(name = "Agent")]
#[derive(Debug, Clone)]
pub struct PyAgent {
    #[pyo3(get)]
    pub id: usize,
    #[pyo3(get)]
    pub x: f64,
    #[pyo3(get)]
    pub y: f64,
    #[pyo3(get)]
    pub vx: f64,
    #[pyo3(get)]
    pub vy: f64,
    #[pyo3(get)]
    pub goal_x: f64,
    #[pyo3(get)]
    pub goal_y: f64,
    #[pyo3(get)]
    pub radius: f64,
}

impl From<&Agent> for PyAgent {
    fn from(agent: &Agent) -> Self {
        PyAgent {
            id: agent.id,
            x: agent.position.x,
            y: agent.position.y,
            vx: agent.velocity.x,
            vy: agent.velocity.y,
            goal_x: agent.goal.x,
            goal_y: agent.goal.y,
            radius: agent.radius,
        }
    }
}

#[pymethods]
impl PyAgent {
    fn __repr__(&self) -> String {
        format!(
            "Agent(id={}, x={:.2}, y={:.2}, vx={:.2}, vy={:.2})",
            self.id, self.x, self.y, self.vx, self.vy
        )
    }
}

#[pyclass(name = "Obstacle")]
#[derive(Debug, Clone)]
pub struct PyObstacle {
    #[pyo3(get)]
    pub x: f64,
    #[pyo3(get)]
    pub y: f64,
    #[pyo3(get)]
    pub radius: f64,
}

impl From<&Obstacle> for PyObstacle {
    fn from(obstacle: &Obstacle) -> Self {
        PyObstacle {
            x: obstacle.position.x,
            y: obstacle.position.y,
            radius: obstacle.radius,
        }
    }
}

#[pymethods]
impl PyObstacle {
    fn __repr__(&self) -> String {
        format!("Obstacle(x={:.2}, y={:.2}, r={:.2})", self.x, self.y, self.radius)
    }
}

#[pyclass(name = "World")]
pub struct PyWorld {
    inner: World,
}

#[pymethods]
impl PyWorld {
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<u64>) -> PyResult<Self> {
        let config = SimConfig {
            rng_seed: seed,
            ..SimConfig::default()
        };
        Ok(PyWorld {
            inner: World::new(config)?,
        })
    }

    fn reset(&mut self) -> PyResult<()> {
        self.inner.reset()?;
        Ok(())
    }

    fn set_running(&mut self, running: bool) {
        self.inner.set_running(running);
    }

    /// Returns the new status label.
    fn toggle(&mut self) -> String {
        self.inner.toggle().to_string()
    }

    #[getter]
    fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[getter]
    fn status(&self) -> String {
        self.inner.state().to_string()
    }

    #[getter]
    fn tick(&self) -> u64 {
        self.inner.tick()
    }

    #[getter]
    fn width(&self) -> f64 {
        self.inner.config().width
    }

    #[getter]
    fn height(&self) -> f64 {
        self.inner.config().height
    }

    #[getter]
    fn fixed_dt(&self) -> f64 {
        self.inner.config().fixed_dt
    }

    fn step(&mut self, dt: f64) -> PyResult<bool> {
        Ok(self.inner.step(dt)?)
    }

    fn advance_frame(&mut self) -> PyResult<bool> {
        Ok(self.inner.advance_frame()?)
    }

    fn add_agent(&mut self, x: f64, y: f64) -> PyResult<bool> {
        Ok(self.inner.add_agent(x, y)?)
    }

    fn add_obstacle(&mut self, x: f64, y: f64) -> bool {
        self.inner.add_obstacle(x, y)
    }

    fn agents(&self) -> Vec<PyAgent> {
        self.inner.agents().iter().map(PyAgent::from).collect()
    }

    fn obstacles(&self) -> Vec<PyObstacle> {
        self.inner.obstacles().iter().map(PyObstacle::from).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "World(agents={}, obstacles={}, tick={}, status={})",
            self.inner.agents().len(),
            self.inner.obstacles().len(),
            self.inner.tick(),
            self.inner.state()
        )
    }
}
