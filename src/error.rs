use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// A rejected interactive placement is not an error; `add_agent` and
/// `add_obstacle` report it as `false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The placement sampler exhausted its retry budget.
    #[error("no valid position found after {attempts} attempts")]
    NoValidPosition { attempts: usize },
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A step was requested with a negative or non-finite timestep.
    #[error("invalid timestep: {0}")]
    InvalidTimestep(f64),
}
