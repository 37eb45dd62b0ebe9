//! Simulation constants and the validated [`SimConfig`] built from them.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::structs::Obstacle;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 600.0;
pub const FPS: f64 = 60.0;

pub const INITIAL_AGENTS: usize = 18;
pub const AGENT_RADIUS: f64 = 8.0;
pub const AGENT_MAX_SPEED: f64 = 90.0;
pub const NEIGHBOR_DIST: f64 = 60.0;
pub const AVOID_STRENGTH: f64 = 1.4;
pub const GOAL_FORCE: f64 = 1.0;
pub const OBSTACLE_AVOID_DIST: f64 = 45.0;
/// Obstacle repulsion gain relative to neighbor repulsion.
pub const OBSTACLE_AVOID_GAIN: f64 = 1.5;
pub const GOAL_REACHED_DIST: f64 = 18.0;

pub const PLACEMENT_MARGIN: f64 = 40.0;
pub const GOAL_EXCLUSION_RADIUS: f64 = 120.0;
pub const SPAWN_PADDING: f64 = 10.0;
pub const INTERACTIVE_AGENT_PADDING: f64 = 4.0;
pub const INTERACTIVE_OBSTACLE_PADDING: f64 = 10.0;
pub const NEW_OBSTACLE_RADIUS: f64 = 35.0;
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Static configuration for a simulation world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Arena width in world units.
    pub width: f64,
    /// Arena height in world units.
    pub height: f64,
    /// Step used by `World::advance_frame`.
    pub fixed_dt: f64,
    /// Agents created by every reset.
    pub initial_agents: usize,
    /// Radius of every agent disc.
    pub agent_radius: f64,
    /// Upper bound on agent speed.
    pub max_speed: f64,
    /// Neighbors farther than this exert no repulsion.
    pub neighbor_dist: f64,
    /// Weight of the summed repulsion, in units of `max_speed`.
    pub avoid_strength: f64,
    /// Weight of the goal-seeking velocity.
    pub goal_force: f64,
    /// Extra reach of obstacle repulsion beyond the obstacle radius.
    pub obstacle_avoid_dist: f64,
    /// Obstacle repulsion gain relative to neighbor repulsion.
    pub obstacle_avoid_gain: f64,
    /// Goals closer than this are considered reached and resampled.
    pub goal_reached_dist: f64,
    /// Inset from the arena edge for sampled positions.
    pub placement_margin: f64,
    /// Minimum distance between a spawn point and its first goal.
    pub goal_exclusion_radius: f64,
    /// Added to the agent radius when sampling spawns and goals.
    pub spawn_padding: f64,
    /// Added to the agent radius when an agent is placed by hand.
    pub interactive_agent_padding: f64,
    /// Clearance required when an obstacle is placed by hand.
    pub interactive_obstacle_padding: f64,
    /// Radius of obstacles placed by hand.
    pub new_obstacle_radius: f64,
    /// Draws before the placement sampler reports failure.
    pub max_placement_attempts: usize,
    /// Obstacles restored by every reset.
    pub default_obstacles: Vec<Obstacle>,
    /// Optional RNG seed for reproducible worlds.
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fixed_dt: 1.0 / FPS,
            initial_agents: INITIAL_AGENTS,
            agent_radius: AGENT_RADIUS,
            max_speed: AGENT_MAX_SPEED,
            neighbor_dist: NEIGHBOR_DIST,
            avoid_strength: AVOID_STRENGTH,
            goal_force: GOAL_FORCE,
            obstacle_avoid_dist: OBSTACLE_AVOID_DIST,
            obstacle_avoid_gain: OBSTACLE_AVOID_GAIN,
            goal_reached_dist: GOAL_REACHED_DIST,
            placement_margin: PLACEMENT_MARGIN,
            goal_exclusion_radius: GOAL_EXCLUSION_RADIUS,
            spawn_padding: SPAWN_PADDING,
            interactive_agent_padding: INTERACTIVE_AGENT_PADDING,
            interactive_obstacle_padding: INTERACTIVE_OBSTACLE_PADDING,
            new_obstacle_radius: NEW_OBSTACLE_RADIUS,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            default_obstacles: default_obstacles(WIDTH, HEIGHT),
            rng_seed: None,
        }
    }
}

/// The three fixed obstacles of a freshly reset arena.
pub fn default_obstacles(width: f64, height: f64) -> Vec<Obstacle> {
    vec![
        Obstacle::new(width * 0.5, height * 0.5, 50.0),
        Obstacle::new(width * 0.25, height * 0.35, 35.0),
        Obstacle::new(width * 0.75, height * 0.65, 35.0),
    ]
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let scalars = [
            self.width,
            self.height,
            self.agent_radius,
            self.max_speed,
            self.neighbor_dist,
            self.avoid_strength,
            self.goal_force,
            self.obstacle_avoid_dist,
            self.obstacle_avoid_gain,
            self.goal_reached_dist,
            self.placement_margin,
            self.goal_exclusion_radius,
            self.spawn_padding,
            self.interactive_agent_padding,
            self.interactive_obstacle_padding,
            self.new_obstacle_radius,
        ];
        if scalars.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidConfig("config distances and gains must be finite"));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SimError::InvalidConfig("arena dimensions must be positive"));
        }
        if !(self.placement_margin >= 0.0)
            || self.placement_margin * 2.0 > self.width
            || self.placement_margin * 2.0 > self.height
        {
            return Err(SimError::InvalidConfig(
                "placement margin must be non-negative and fit inside the arena",
            ));
        }
        if !(self.agent_radius > 0.0) || self.agent_radius * 2.0 > self.width.min(self.height) {
            return Err(SimError::InvalidConfig("agent radius must be positive and fit inside the arena"));
        }
        if !(self.fixed_dt > 0.0) || !self.fixed_dt.is_finite() {
            return Err(SimError::InvalidConfig("fixed_dt must be positive and finite"));
        }
        if !(self.max_speed > 0.0) {
            return Err(SimError::InvalidConfig("max_speed must be positive"));
        }
        if !(self.neighbor_dist > 0.0) {
            return Err(SimError::InvalidConfig("neighbor_dist must be positive"));
        }
        if !(self.obstacle_avoid_dist >= 0.0) || !(self.goal_reached_dist >= 0.0) {
            return Err(SimError::InvalidConfig("avoidance and goal distances must be non-negative"));
        }
        if !(self.new_obstacle_radius > 0.0) {
            return Err(SimError::InvalidConfig("new_obstacle_radius must be positive"));
        }
        if self.max_placement_attempts == 0 {
            return Err(SimError::InvalidConfig("max_placement_attempts must be non-zero"));
        }
        if self.default_obstacles.iter().any(|o| !(o.radius > 0.0) || !o.position.is_finite()) {
            return Err(SimError::InvalidConfig("default obstacles need a finite centre and positive radius"));
        }
        Ok(())
    }
}
