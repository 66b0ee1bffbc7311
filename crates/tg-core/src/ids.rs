//! Agent identity.
//!
//! Agent identity is a stable opaque handle rather than a reference to a live
//! object, so claims stay comparable after the owning controller is dropped
//! and the sim can keep agents in slot storage indexed by `id.index()`.

use std::fmt;

/// Slot index of a mobile agent.  Claims are keyed by this value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
