//! # Steering Core
//!
//! A potential-field multi-agent steering simulation with optional Python
//! bindings.
//!
//! ## Model
//!
//! Agents are discs moving toward individually assigned goals inside a
//! rectangular arena scattered with static circular obstacles. Each tick an
//! agent's velocity is the sum of a goal-seeking term and linearly decaying
//! repulsion from nearby agents and obstacles, clamped to a maximum speed.
//! Goals are resampled once reached, so the crowd keeps moving.
//!
//! This is a superposed-force heuristic, not a velocity-obstacle method:
//! agents are pushed apart but collisions are not ruled out.
//!
//! ## Modules
//!
//! - [`structs`]: `Point`, `Vector2D`, `Agent`, `Obstacle`
//! - [`placement`]: rejection sampling of free positions
//! - [`steering`]: per-agent force composition
//! - [`world`]: the two-phase tick, run state and runtime insertion
//!
//! ## Usage
//!
//! ```no_run
//! use steering_core::{SimConfig, World};
//!
//! let mut world = World::with_seed(SimConfig::default(), 7)?;
//! world.set_running(true);
//! for _ in 0..60 {
//!     world.advance_frame()?;
//! }
//! # Ok::<(), steering_core::SimError>(())
//! ```
//!
//! With the `python` feature the crate builds as the `steering_core`
//! extension module exposing `World`, `Agent` and `Obstacle`.

pub mod config;
pub mod error;
pub mod placement;
pub mod steering;
pub mod structs;
pub mod world;

#[cfg(feature = "python")]
mod python;

pub use config::SimConfig;
pub use error::SimError;
pub use placement::{Exclusion, Padding, PlacementSampler};
pub use steering::{Steering, SteeringEngine};
pub use structs::{Agent, Obstacle, Point, Vector2D};
pub use world::{RunState, World, WorldSnapshot};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn steering_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyWorld>()?;
    m.add_class::<python::PyAgent>()?;
    m.add_class::<python::PyObstacle>()?;
    m.add("FPS", config::FPS)?;
    Ok(())
}
