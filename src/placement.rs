//! # Placement Sampler
//!
//! Rejection sampling of free positions in the arena. A candidate is drawn
//! uniformly from the arena inset by `placement_margin` and rejected when it
//! falls inside an optional exclusion disc or inside any obstacle grown by
//! the caller's padding policy.
//!
//! The number of draws is capped by `max_placement_attempts`; exhausting the
//! cap yields [`SimError::NoValidPosition`] instead of looping forever when
//! obstacles leave no free space.

use rand::Rng;
use tracing::warn;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::structs::{Obstacle, Point};

/// Obstacle clearance policy, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Spawn points and goals: agent radius + spawn padding.
    GoalOrSpawn,
    /// Agents placed by hand: agent radius + interactive agent padding.
    InteractiveAgent,
    /// Obstacles placed by hand: interactive obstacle padding only.
    InteractiveObstacle,
}

impl Padding {
    pub fn amount(self, config: &SimConfig) -> f64 {
        match self {
            Padding::GoalOrSpawn => config.agent_radius + config.spawn_padding,
            Padding::InteractiveAgent => config.agent_radius + config.interactive_agent_padding,
            Padding::InteractiveObstacle => config.interactive_obstacle_padding,
        }
    }
}

/// A disc the sampled point must stay out of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exclusion {
    pub center: Point,
    pub radius: f64,
}

impl Exclusion {
    pub fn new(center: Point, radius: f64) -> Self {
        Exclusion { center, radius }
    }

    fn rejects(&self, point: &Point) -> bool {
        point.distance(&self.center) < self.radius
    }
}

/// True when `point` lies within `obstacle.radius + padding` of any obstacle.
pub fn is_inside_obstacle(point: &Point, obstacles: &[Obstacle], padding: f64) -> bool {
    obstacles.iter().any(|obstacle| obstacle.covers(point, padding))
}

pub struct PlacementSampler<'a> {
    config: &'a SimConfig,
}

impl<'a> PlacementSampler<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        PlacementSampler { config }
    }

    /// Draws a free position. Pure apart from consuming `rng`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        obstacles: &[Obstacle],
        rng: &mut R,
        exclusion: Option<Exclusion>,
        padding: Padding,
    ) -> Result<Point, SimError> {
        let margin = self.config.placement_margin;
        let (min_x, max_x) = (margin, self.config.width - margin);
        let (min_y, max_y) = (margin, self.config.height - margin);
        let padding = padding.amount(self.config);

        for _ in 0..self.config.max_placement_attempts {
            let candidate = Point::new(rng.gen_range(min_x..=max_x), rng.gen_range(min_y..=max_y));

            if exclusion.is_some_and(|e| e.rejects(&candidate)) {
                continue;
            }
            if is_inside_obstacle(&candidate, obstacles, padding) {
                continue;
            }
            return Ok(candidate);
        }

        let attempts = self.config.max_placement_attempts;
        warn!(attempts, obstacles = obstacles.len(), "placement sampler found no free position");
        Err(SimError::NoValidPosition { attempts })
    }

    /// Spawn or goal position with the default clearance.
    pub fn sample_free<R: Rng + ?Sized>(
        &self,
        obstacles: &[Obstacle],
        rng: &mut R,
    ) -> Result<Point, SimError> {
        self.sample(obstacles, rng, None, Padding::GoalOrSpawn)
    }

    /// Goal for an agent standing at `origin`, kept at least
    /// `goal_exclusion_radius` away from it.
    pub fn sample_goal_away_from<R: Rng + ?Sized>(
        &self,
        obstacles: &[Obstacle],
        rng: &mut R,
        origin: Point,
    ) -> Result<Point, SimError> {
        let exclusion = Exclusion::new(origin, self.config.goal_exclusion_radius);
        self.sample(obstacles, rng, Some(exclusion), Padding::GoalOrSpawn)
    }
}
