//! Claim record types.

use std::fmt;

use tg_core::{AgentId, TileCoord};

/// Whether an agent stands on a tile or has committed to enter it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClaimKind {
    Occupied,
    Reserved,
}

impl ClaimKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClaimKind::Occupied => "occupied",
            ClaimKind::Reserved => "reserved",
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(tile, kind) → agent` entry of the table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Claim {
    pub tile:  TileCoord,
    pub kind:  ClaimKind,
    pub agent: AgentId,
}
