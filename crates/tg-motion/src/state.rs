//! Per-agent motion state.

use std::fmt;

use tg_core::TileCoord;

/// Phase of the per-agent state machine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    /// No active route.
    #[default]
    Idle,
    /// Has a route; needs a reservation on the next tile.
    Reserving,
    /// Holds a reservation and is walking toward that tile's centre.
    Advancing,
    /// The next tile was denied; retrying each tick until the re-plan delay.
    Blocked,
}

impl MovementState {
    /// `true` while the agent has a route it is working through.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, MovementState::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementState::Idle      => "idle",
            MovementState::Reserving => "reserving",
            MovementState::Advancing => "advancing",
            MovementState::Blocked   => "blocked",
        }
    }
}

impl fmt::Display for MovementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route and claim bookkeeping owned exclusively by one agent.
///
/// Other agents only ever see `current_tile` and `reserved_tile`, through
/// the claim table.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    /// Tile the agent stands on; it holds the Occupied claim here.
    pub current_tile: TileCoord,

    /// Tiles still to walk, excluding `current_tile`.
    pub pending_path: Vec<TileCoord>,

    /// Index into `pending_path` of the next tile to reserve.
    pub path_cursor: usize,

    /// Tile the agent holds a Reserved claim on while advancing.
    pub reserved_tile: Option<TileCoord>,

    pub movement: MovementState,
}

impl MotionState {
    /// Stationary state on `tile`.
    pub fn idle_at(tile: TileCoord) -> Self {
        Self { current_tile: tile, ..Self::default() }
    }

    /// The tile at the cursor, if any remain.
    #[inline]
    pub fn next_tile(&self) -> Option<TileCoord> {
        self.pending_path.get(self.path_cursor).copied()
    }

    /// Final tile of the current route.
    #[inline]
    pub fn final_tile(&self) -> Option<TileCoord> {
        self.pending_path.last().copied()
    }

    /// Forget the route and any reservation; stay on `current_tile`.
    pub fn reset_route(&mut self) {
        self.pending_path.clear();
        self.path_cursor   = 0;
        self.reserved_tile = None;
        self.movement      = MovementState::Idle;
    }
}
