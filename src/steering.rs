//! # Steering Engine
//!
//! Potential-field steering for a single agent. The velocity for one tick
//! is the superposition of:
//!
//! 1. a goal-seeking term: unit vector toward the goal scaled to `max_speed`;
//! 2. neighbor repulsion: for every other agent within `neighbor_dist`,
//!    a unit vector away from it weighted by a linear falloff
//!    `(neighbor_dist - dist) / neighbor_dist`;
//! 3. obstacle repulsion: for every obstacle whose grown radius
//!    `r + obstacle_avoid_dist` contains the agent, a unit vector away from
//!    it weighted by `(min_dist - dist) / min_dist * obstacle_avoid_gain`.
//!
//! The avoidance sum is scaled by `avoid_strength * max_speed`, added to the
//! goal term, and the result is clamped to `max_speed`. Sub-maximum results
//! are left as they are.
//!
//! This is a heuristic, not a velocity-obstacle method: nothing guarantees
//! that agents never overlap each other or an obstacle.
//!
//! Pairs closer than [`EPSILON`] have no defined direction and are skipped,
//! so coincident agents exert no force on each other for that tick.
//!
//! Every function here reads the agent list without mutating it, so all
//! agents can be steered against the same pre-tick snapshot.

use rand::Rng;
use tracing::debug;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::placement::PlacementSampler;
use crate::structs::{Agent, Obstacle, Point, Vector2D};

pub const EPSILON: f64 = 1e-5;

/// Outcome of steering one agent for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub velocity: Vector2D,
    /// Replacement goal when the old one was reached this tick.
    pub new_goal: Option<Point>,
}

pub struct SteeringEngine<'a> {
    config: &'a SimConfig,
}

impl<'a> SteeringEngine<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        SteeringEngine { config }
    }

    pub fn goal_reached(&self, agent: &Agent) -> bool {
        agent.distance_to_goal() < self.config.goal_reached_dist
    }

    /// Full per-tick steering for `agents[index]`: goal reassignment first,
    /// then the velocity toward the (possibly new) goal.
    pub fn steer<R: Rng + ?Sized>(
        &self,
        index: usize,
        agents: &[Agent],
        obstacles: &[Obstacle],
        rng: &mut R,
    ) -> Result<Steering, SimError> {
        let mut agent = agents[index];
        let mut new_goal = None;

        if self.goal_reached(&agent) {
            let goal = PlacementSampler::new(self.config).sample_free(obstacles, rng)?;
            debug!(agent = agent.id, x = goal.x, y = goal.y, "goal reached, reassigned");
            agent.goal = goal;
            new_goal = Some(goal);
        }

        Ok(Steering {
            velocity: self.compute_velocity(&agent, index, agents, obstacles),
            new_goal,
        })
    }

    /// Velocity for `agent`, which sits at `index` in `agents`. The agent is
    /// passed separately so a freshly assigned goal can be used before it is
    /// written back.
    pub fn compute_velocity(
        &self,
        agent: &Agent,
        index: usize,
        agents: &[Agent],
        obstacles: &[Obstacle],
    ) -> Vector2D {
        let desired = self.desired_velocity(agent);
        let avoid =
            self.neighbor_avoidance(agent, index, agents) + self.obstacle_avoidance(agent, obstacles);

        let combined = desired * self.config.goal_force
            + avoid * (self.config.avoid_strength * self.config.max_speed);

        combined.clamp_magnitude(self.config.max_speed)
    }

    /// Goal-seeking velocity at full speed; zero when standing on the goal.
    pub fn desired_velocity(&self, agent: &Agent) -> Vector2D {
        let to_goal = agent.goal - agent.position;
        let dist = to_goal.magnitude();
        if dist == 0.0 {
            return Vector2D::ZERO;
        }
        to_goal * (self.config.max_speed / dist)
    }

    /// Unscaled repulsion from every other agent within `neighbor_dist`.
    pub fn neighbor_avoidance(&self, agent: &Agent, index: usize, agents: &[Agent]) -> Vector2D {
        let range = self.config.neighbor_dist;
        let mut avoid = Vector2D::ZERO;

        for (j, other) in agents.iter().enumerate() {
            if j == index {
                continue;
            }
            let dist = agent.distance_to(other);
            if dist < EPSILON || dist > range {
                continue;
            }
            let strength = (range - dist) / range;
            avoid += (agent.position - other.position) * (strength / dist);
        }

        avoid
    }

    /// Unscaled repulsion from every obstacle whose influence disc contains
    /// the agent.
    pub fn obstacle_avoidance(&self, agent: &Agent, obstacles: &[Obstacle]) -> Vector2D {
        let mut avoid = Vector2D::ZERO;

        for obstacle in obstacles {
            let away = agent.position - obstacle.position;
            let dist = away.magnitude();
            if dist < EPSILON {
                continue;
            }
            let min_dist = obstacle.radius + self.config.obstacle_avoid_dist;
            if dist < min_dist {
                let strength = (min_dist - dist) / min_dist;
                avoid += away * (strength * self.config.obstacle_avoid_gain / dist);
            }
        }

        avoid
    }
}
