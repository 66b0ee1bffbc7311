//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use tg_claims::ClaimTable;
use tg_core::{AgentId, SimClock, SimConfig, Tick, TileCoord, WorldPos, tile_to_world, world_to_tile};
use tg_motion::{
    AgentMotionController, CompletionOutcome, MotionConfig, MotionState, MovementState,
    ObstacleSensor, StepEvent,
};
use tg_path::{PathPlanner, PathTicket};
use tg_terrain::TerrainIndex;

use crate::{AgentArena, SimError, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<P, S>` owns the claim table and every agent's controller and drives
/// the fixed-step tick loop:
///
/// 1. **Deliver**: drain [`PathPlanner::poll_completed`] and hand each
///    completion to its agent.  Completions for despawned agents are dropped.
/// 2. **Move**: tick every live agent in ascending `AgentId` order.  Within a
///    tick, a lower id wins any contested reservation.
/// 3. **Observe**: report arrivals, failures, tick end and snapshots.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathPlanner, S: ObstacleSensor> {
    /// Global configuration (step length, total ticks, seed, …).
    pub config: SimConfig,

    /// Simulation clock.
    pub clock: SimClock,

    /// Motion tuning handed to every spawned agent.
    pub motion: MotionConfig,

    /// Static terrain used for goal snapping.
    pub terrain: Arc<TerrainIndex>,

    /// The path planner.  Requests issued during tick `t` are polled from
    /// tick `t` onward.
    pub planner: P,

    /// Hard-obstacle source shared by all agents.
    pub sensor: S,

    // Mutated only through agent controllers.
    pub(crate) claims: ClaimTable,
    pub(crate) agents: AgentArena,
}

impl<P: PathPlanner, S: ObstacleSensor> Sim<P, S> {
    // ── Agents ────────────────────────────────────────────────────────────

    /// Place a new agent at the centre of the tile containing `at`.
    ///
    /// Fails with [`SimError::TileOccupied`] if another agent holds a claim
    /// on that tile.
    pub fn spawn_agent(&mut self, at: WorldPos) -> SimResult<AgentId> {
        let id = self.agents.next_id();
        let controller = AgentMotionController::spawn(id, at, self.motion.clone(), &mut self.claims)?;
        Ok(self.agents.push(controller))
    }

    /// Remove `agent`, releasing every claim it holds and cancelling its
    /// outstanding path request.
    ///
    /// Returns `false` if the agent was already despawned.
    pub fn despawn_agent(&mut self, agent: AgentId) -> SimResult<bool> {
        if !self.agents.was_allocated(agent) {
            return Err(SimError::AgentNotFound(agent));
        }
        let Some(mut controller) = self.agents.take(agent) else {
            return Ok(false);
        };
        if let Some(ticket) = controller.teardown(&mut self.claims) {
            self.planner.cancel(ticket);
        }
        Ok(true)
    }

    /// Send `agent` toward `goal`.
    ///
    /// With a non-zero `config.goal_snap_radius`, a goal on an unwalkable or
    /// absent tile is moved to the nearest walkable tile centre.  If none is
    /// in range the goal is passed through and the planner reports the
    /// failure.
    pub fn request_move(&mut self, agent: AgentId, goal: WorldPos) -> SimResult<PathTicket> {
        let goal = self.snap_goal(goal)?;
        let now = self.clock.current_tick;
        let controller = self.agents.get_mut(agent).ok_or(SimError::AgentNotFound(agent))?;
        let ticket = controller.request_move(goal, now, &mut self.claims, &self.sensor, &mut self.planner)?;
        Ok(ticket)
    }

    fn snap_goal(&self, goal: WorldPos) -> SimResult<WorldPos> {
        let tile = world_to_tile(goal)?;
        let radius = self.config.goal_snap_radius;
        if radius == 0 || self.terrain.is_walkable(tile) {
            return Ok(goal);
        }
        match self.terrain.nearest_walkable(tile, radius) {
            Some(snapped) => {
                tracing::debug!(%tile, %snapped, "goal snapped to walkable tile");
                Ok(tile_to_world(snapped))
            }
            None => Ok(goal),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Read-only view of the claim table.
    #[inline]
    pub fn claims(&self) -> &ClaimTable {
        &self.claims
    }

    /// Every live agent.
    #[inline]
    pub fn agents(&self) -> &AgentArena {
        &self.agents
    }

    fn controller(&self, agent: AgentId) -> SimResult<&AgentMotionController> {
        self.agents.get(agent).ok_or(SimError::AgentNotFound(agent))
    }

    pub fn position(&self, agent: AgentId) -> SimResult<WorldPos> {
        Ok(self.controller(agent)?.position())
    }

    pub fn state(&self, agent: AgentId) -> SimResult<&MotionState> {
        Ok(self.controller(agent)?.state())
    }

    pub fn movement(&self, agent: AgentId) -> SimResult<MovementState> {
        Ok(self.controller(agent)?.movement())
    }

    pub fn current_tile(&self, agent: AgentId) -> SimResult<TileCoord> {
        Ok(self.controller(agent)?.current_tile())
    }

    /// `true` when no live agent has a route or an unanswered path request.
    pub fn is_settled(&self) -> bool {
        self.agents
            .iter()
            .all(|(_, c)| !c.movement().is_active() && c.pending_ticket().is_none())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        tracing::info!(
            from = %self.clock.current_tick,
            to = %self.config.end_tick(),
            agents = self.agents.live_count(),
            "sim run started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        tracing::info!(clock = %self.clock, "sim run finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Step until [`is_settled`](Self::is_settled) or `max_ticks` have run.
    /// Returns whether the sim settled.
    pub fn run_until_settled<O: SimObserver>(&mut self, max_ticks: u64, observer: &mut O) -> SimResult<bool> {
        for _ in 0..max_ticks {
            if self.is_settled() {
                return Ok(true);
            }
            self.step(observer)?;
        }
        Ok(self.is_settled())
    }

    /// Process the current tick, then advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.deliver_completions(now, observer);
        self.move_agents(now, observer);

        observer.on_tick_end(now, self.agents.moving_count());
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.agents, &self.claims);
        }

        self.clock.advance();
        Ok(())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn deliver_completions<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        for completion in self.planner.poll_completed(now) {
            let agent = completion.ticket.agent;
            let Some(controller) = self.agents.get_mut(agent) else {
                tracing::debug!(ticket = %completion.ticket, "completion for despawned agent dropped");
                continue;
            };
            if let CompletionOutcome::Failed(e) = controller.on_path_complete(completion, &mut self.claims) {
                observer.on_path_failed(now, agent, &e);
            }
        }
    }

    fn move_agents<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        let dt = self.clock.step_secs;
        for (agent, controller) in self.agents.iter_mut() {
            let event = controller.tick(dt, now, &mut self.claims, &self.sensor, &mut self.planner);
            if let StepEvent::Arrived { tile, .. } = event {
                observer.on_arrival(now, agent, tile);
            }
        }
    }
}
