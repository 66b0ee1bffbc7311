//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use tg_claims::ClaimTable;
use tg_core::{SimConfig, WorldPos};
use tg_motion::{MotionConfig, ObstacleSensor, TerrainObstacles};
use tg_path::{AStarConfig, GridPlanner, PathPlanner};
use tg_terrain::TerrainIndex;

use crate::{AgentArena, Sim, SimResult};

/// Fluent builder for [`Sim<P, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step length, total ticks, seed, …
/// - the terrain, shared with the planner and sensor through an `Arc`
/// - `P: PathPlanner`: e.g. [`GridPlanner`]
/// - `S: ObstacleSensor`: e.g. [`TerrainObstacles`]
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                  |
/// |---------------------|--------------------------|
/// | `.motion(m)`        | `MotionConfig::default()` |
/// | `.agents(v)`        | No agents                |
///
/// # Example
///
/// ```rust,ignore
/// let terrain = Arc::new(TerrainIndex::from_ascii(MAP)?);
/// let mut sim = SimBuilder::grid(SimConfig::default(), terrain, AStarConfig::default())
///     .agents(vec![WorldPos::new(0.5, 0.5)])
///     .build()?;
/// sim.request_move(AgentId(0), WorldPos::new(8.5, 0.5))?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathPlanner, S: ObstacleSensor> {
    config:  SimConfig,
    terrain: Arc<TerrainIndex>,
    planner: P,
    sensor:  S,
    motion:  MotionConfig,
    spawns:  Vec<WorldPos>,
}

impl SimBuilder<GridPlanner, TerrainObstacles> {
    /// A builder using A* over `terrain` and terrain walls as hard obstacles.
    pub fn grid(config: SimConfig, terrain: Arc<TerrainIndex>, astar: AStarConfig) -> Self {
        let planner = GridPlanner::new(Arc::clone(&terrain), astar);
        let sensor  = TerrainObstacles::new(Arc::clone(&terrain));
        Self::new(config, terrain, planner, sensor)
    }
}

impl<P: PathPlanner, S: ObstacleSensor> SimBuilder<P, S> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, terrain: Arc<TerrainIndex>, planner: P, sensor: S) -> Self {
        Self {
            config,
            terrain,
            planner,
            sensor,
            motion: MotionConfig::default(),
            spawns: Vec::new(),
        }
    }

    /// Motion tuning for every agent.
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Agents spawned at build time, receiving `AgentId(0)`, `AgentId(1)`, …
    /// in order.
    pub fn agents(mut self, spawns: Vec<WorldPos>) -> Self {
        self.spawns = spawns;
        self
    }

    /// Validate configuration, spawn the initial agents and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, S>> {
        self.config.validate()?;
        self.motion.validate()?;

        let mut sim = Sim {
            clock:   self.config.make_clock(),
            config:  self.config,
            motion:  self.motion,
            terrain: self.terrain,
            planner: self.planner,
            sensor:  self.sensor,
            claims:  ClaimTable::new(),
            agents:  AgentArena::new(),
        };
        for at in self.spawns {
            sim.spawn_agent(at)?;
        }

        tracing::info!(
            agents = sim.agents.live_count(),
            tiles = sim.terrain.len(),
            step_secs = sim.config.step_secs,
            "sim built"
        );
        Ok(sim)
    }
}
