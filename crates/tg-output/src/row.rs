//! Plain data row types written by output backends.

use tg_claims::{Claim, ClaimKind};
use tg_core::{AgentId, TileCoord};
use tg_motion::{AgentMotionController, MovementState};

/// One agent's position and claims at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub x:        f64,
    pub y:        f64,
    /// The occupied tile.
    pub tile:     TileCoord,
    pub state:    MovementState,
    /// The reserved tile while advancing.
    pub reserved: Option<TileCoord>,
}

impl AgentSnapshotRow {
    pub fn capture(tick: u64, agent: AgentId, controller: &AgentMotionController) -> Self {
        let pos = controller.position();
        Self {
            tick,
            agent_id: agent.0,
            x:        pos.x,
            y:        pos.y,
            tile:     controller.current_tile(),
            state:    controller.movement(),
            reserved: controller.reserved_tile(),
        }
    }
}

/// One claim-table entry at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRow {
    pub tick:     u64,
    pub tile:     TileCoord,
    pub kind:     ClaimKind,
    pub agent_id: u32,
}

impl ClaimRow {
    pub fn from_claim(tick: u64, claim: &Claim) -> Self {
        Self { tick, tile: claim.tile, kind: claim.kind, agent_id: claim.agent.0 }
    }
}

/// Per-tick counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub elapsed_secs:  f64,
    pub moving_agents: u64,
    /// Tile arrivals during the tick.
    pub arrivals:      u64,
    pub path_failures: u64,
}
