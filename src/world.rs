//! # World
//!
//! Owns every agent and obstacle, the run state and the random source, and
//! advances the simulation one fixed tick at a time.
//!
//! A tick has two phases. The compute phase steers every agent against the
//! same frozen pre-tick snapshot and buffers the results; the apply phase
//! writes velocities and goals back, integrates positions with explicit Euler
//! and clamps them to the arena. Because nothing is written until every agent
//! has been steered, the outcome does not depend on agent order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::placement::{is_inside_obstacle, Padding, PlacementSampler};
use crate::steering::{Steering, SteeringEngine};
use crate::structs::{Agent, Obstacle, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Paused => f.write_str("Paused"),
            RunState::Running => f.write_str("Running"),
        }
    }
}

/// Owned copy of the world state for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub state: RunState,
    pub agents: Vec<Agent>,
    pub obstacles: Vec<Obstacle>,
}

pub struct World {
    config: SimConfig,
    rng: ChaCha8Rng,
    agents: Vec<Agent>,
    obstacles: Vec<Obstacle>,
    state: RunState,
    tick: u64,
}

impl World {
    /// Builds a world and populates it as [`World::reset`] does. The RNG is
    /// seeded from `config.rng_seed` when present, from entropy otherwise.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        Self::new(config.with_seed(seed))
    }

    pub fn with_rng(config: SimConfig, rng: ChaCha8Rng) -> Result<Self, SimError> {
        config.validate()?;
        let mut world = World {
            config,
            rng,
            agents: Vec::new(),
            obstacles: Vec::new(),
            state: RunState::Paused,
            tick: 0,
        };
        world.reset()?;
        Ok(world)
    }

    /// Builds a paused world from explicit entities, for scripted scenarios.
    /// Agent ids are renumbered to their index.
    pub fn from_entities(
        config: SimConfig,
        mut agents: Vec<Agent>,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed.unwrap_or_default());
        for (id, agent) in agents.iter_mut().enumerate() {
            agent.id = id;
        }
        Ok(World {
            config,
            rng,
            agents,
            obstacles,
            state: RunState::Paused,
            tick: 0,
        })
    }

    /// Restores the default obstacles, respawns `initial_agents` resting
    /// agents with fresh goals, and pauses. On error the world is unchanged.
    pub fn reset(&mut self) -> Result<(), SimError> {
        let obstacles = self.config.default_obstacles.clone();
        let sampler = PlacementSampler::new(&self.config);

        let mut agents = Vec::with_capacity(self.config.initial_agents);
        for id in 0..self.config.initial_agents {
            let position = sampler.sample_free(&obstacles, &mut self.rng)?;
            let goal = sampler.sample_goal_away_from(&obstacles, &mut self.rng, position)?;
            agents.push(Agent::new(id, position, goal).with_radius(self.config.agent_radius));
        }

        self.agents = agents;
        self.obstacles = obstacles;
        self.state = RunState::Paused;
        self.tick = 0;
        info!(
            agents = self.agents.len(),
            obstacles = self.obstacles.len(),
            "world reset"
        );
        Ok(())
    }

    pub fn set_running(&mut self, running: bool) {
        let state = if running { RunState::Running } else { RunState::Paused };
        if state != self.state {
            info!(%state, tick = self.tick, "run state changed");
        }
        self.state = state;
    }

    /// Flips between paused and running and returns the new state.
    pub fn toggle(&mut self) -> RunState {
        self.set_running(self.state == RunState::Paused);
        self.state
    }

    /// Advances one tick of `dt` seconds. Returns `Ok(false)` without
    /// touching anything while paused.
    pub fn step(&mut self, dt: f64) -> Result<bool, SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }
        if self.state == RunState::Paused {
            return Ok(false);
        }

        let steerings = self.compute_steering()?;
        self.apply_steering(steerings, dt);
        self.tick += 1;
        Ok(true)
    }

    /// One tick at the configured fixed timestep.
    pub fn advance_frame(&mut self) -> Result<bool, SimError> {
        self.step(self.config.fixed_dt)
    }

    fn compute_steering(&mut self) -> Result<Vec<Steering>, SimError> {
        let engine = SteeringEngine::new(&self.config);
        (0..self.agents.len())
            .map(|index| engine.steer(index, &self.agents, &self.obstacles, &mut self.rng))
            .collect()
    }

    fn apply_steering(&mut self, steerings: Vec<Steering>, dt: f64) {
        let (width, height) = (self.config.width, self.config.height);

        for (agent, steering) in self.agents.iter_mut().zip(steerings) {
            if let Some(goal) = steering.new_goal {
                agent.goal = goal;
            }
            agent.velocity = steering.velocity;

            // Hard wall: position is clamped, velocity is left as steered.
            let r = agent.radius;
            agent.position = (agent.position + agent.velocity * dt)
                .clamped(Point::new(r, r), Point::new(width - r, height - r));
        }
    }

    /// Places a resting agent at `(x, y)` with a freshly sampled goal.
    ///
    /// Points within the arena but closer than `agent_radius` to a wall are
    /// pulled in to the same bounds `step` clamps to. Returns `Ok(false)` when
    /// the point is outside the arena, or when the placed position is within
    /// `agent_radius + interactive_agent_padding` of an obstacle.
    pub fn add_agent(&mut self, x: f64, y: f64) -> Result<bool, SimError> {
        let requested = Point::new(x, y);
        if !self.in_arena(&requested) {
            debug!(x, y, "agent placement rejected");
            return Ok(false);
        }

        let r = self.config.agent_radius;
        let position = requested.clamped(
            Point::new(r, r),
            Point::new(self.config.width - r, self.config.height - r),
        );
        let padding = Padding::InteractiveAgent.amount(&self.config);
        if is_inside_obstacle(&position, &self.obstacles, padding) {
            debug!(x, y, "agent placement rejected");
            return Ok(false);
        }

        let goal = PlacementSampler::new(&self.config).sample_goal_away_from(
            &self.obstacles,
            &mut self.rng,
            position,
        )?;
        let id = self.agents.len();
        self.agents
            .push(Agent::new(id, position, goal).with_radius(self.config.agent_radius));
        debug!(id, x = position.x, y = position.y, "agent added");
        Ok(true)
    }

    /// Appends an obstacle of `new_obstacle_radius` at `(x, y)`.
    ///
    /// Returns `false` when the point is outside the arena or within
    /// `interactive_obstacle_padding` of an existing obstacle. Agents already
    /// overlapping the new obstacle are left where they are.
    pub fn add_obstacle(&mut self, x: f64, y: f64) -> bool {
        let position = Point::new(x, y);
        let padding = Padding::InteractiveObstacle.amount(&self.config);
        if !self.in_arena(&position) || is_inside_obstacle(&position, &self.obstacles, padding) {
            debug!(x, y, "obstacle placement rejected");
            return false;
        }

        self.obstacles
            .push(Obstacle::new(x, y, self.config.new_obstacle_radius));
        debug!(x, y, count = self.obstacles.len(), "obstacle added");
        true
    }

    fn in_arena(&self, point: &Point) -> bool {
        point.is_finite()
            && (0.0..=self.config.width).contains(&point.x)
            && (0.0..=self.config.height).contains(&point.y)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: usize) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            state: self.state,
            agents: self.agents.clone(),
            obstacles: self.obstacles.clone(),
        }
    }
}
