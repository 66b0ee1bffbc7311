//! Simulation observer trait for progress reporting and data collection.

use tg_claims::ClaimTable;
use tg_core::{AgentId, Tick, TileCoord};
use tg_path::PathError;

use crate::AgentArena;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl SimObserver for Arrivals {
///     fn on_arrival(&mut self, _tick: Tick, _agent: AgentId, _tile: TileCoord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `moving` is the number of live agents with an active route after the
    /// tick.
    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {}

    /// An agent reached `tile` and now occupies it.  Fires once per tile
    /// stepped onto, not only at the final goal.
    fn on_arrival(&mut self, _tick: Tick, _agent: AgentId, _tile: TileCoord) {}

    /// A path request for `agent` failed; the agent is idle.
    fn on_path_failed(&mut self, _tick: Tick, _agent: AgentId, _error: &PathError) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) with read-only access to every agent and the claim table.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentArena, _claims: &ClaimTable) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forwards every hook to both observers, first `.0` then `.1`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, moving: usize) {
        self.0.on_tick_end(tick, moving);
        self.1.on_tick_end(tick, moving);
    }

    fn on_arrival(&mut self, tick: Tick, agent: AgentId, tile: TileCoord) {
        self.0.on_arrival(tick, agent, tile);
        self.1.on_arrival(tick, agent, tile);
    }

    fn on_path_failed(&mut self, tick: Tick, agent: AgentId, error: &PathError) {
        self.0.on_path_failed(tick, agent, error);
        self.1.on_path_failed(tick, agent, error);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentArena, claims: &ClaimTable) {
        self.0.on_snapshot(tick, agents, claims);
        self.1.on_snapshot(tick, agents, claims);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}
