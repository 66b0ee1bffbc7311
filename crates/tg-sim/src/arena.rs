//! Agent slot arena.
//!
//! Slot `i` holds the controller for `AgentId(i)`.  Despawned agents leave an
//! empty slot behind, so ids are never reused within a sim.

use tg_core::AgentId;
use tg_motion::AgentMotionController;

#[derive(Clone, Debug, Default)]
pub struct AgentArena {
    slots: Vec<Option<AgentMotionController>>,
}

impl AgentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next inserted agent will receive.
    #[inline]
    pub fn next_id(&self) -> AgentId {
        AgentId(self.slots.len() as u32)
    }

    /// Store a controller in a fresh slot.
    pub(crate) fn push(&mut self, controller: AgentMotionController) -> AgentId {
        let id = self.next_id();
        self.slots.push(Some(controller));
        id
    }

    /// Empty the slot; returns the controller it held.
    pub(crate) fn take(&mut self, agent: AgentId) -> Option<AgentMotionController> {
        self.slots.get_mut(agent.index()).and_then(Option::take)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&AgentMotionController> {
        self.slots.get(agent.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentMotionController> {
        self.slots.get_mut(agent.index()).and_then(Option::as_mut)
    }

    /// `true` if `agent` was ever allocated, live or not.
    #[inline]
    pub fn was_allocated(&self, agent: AgentId) -> bool {
        agent.index() < self.slots.len()
    }

    /// Live agents in ascending `AgentId` order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &AgentMotionController)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (AgentId(i as u32), c)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (AgentId, &mut AgentMotionController)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|c| (AgentId(i as u32), c)))
    }

    /// Number of slots ever allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live agents.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Number of live agents with an active route.
    pub fn moving_count(&self) -> usize {
        self.iter().filter(|(_, c)| c.movement().is_active()).count()
    }
}
