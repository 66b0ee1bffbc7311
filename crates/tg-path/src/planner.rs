//! The `PathPlanner` capability and its request/completion records.

use tg_core::{AgentId, GraphSelector, Tick, WorldPos};

use crate::PathResult;

/// Identifies one path request: the requesting agent plus that agent's
/// request generation at the time of the call.
///
/// Generations increase monotonically per agent, so comparing a completion's
/// ticket with the agent's latest one detects superseded results.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTicket {
    pub agent:      AgentId,
    pub generation: u64,
}

impl std::fmt::Display for PathTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.agent, self.generation)
    }
}

/// A route query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathRequest {
    pub ticket:    PathTicket,
    pub from:      WorldPos,
    pub to:        WorldPos,
    pub graph:     GraphSelector,
    /// Tick on which the request was issued.
    pub issued_at: Tick,
}

/// The eventual answer to a [`PathRequest`]: ordered world-space waypoints,
/// or the reason there are none.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCompletion {
    pub ticket: PathTicket,
    pub result: PathResult<Vec<WorldPos>>,
}

/// Pluggable, asynchronous path planner.
///
/// Implementations may answer on the same tick or many ticks later, and need
/// not answer cancelled tickets at all.  Callers never block on a request.
pub trait PathPlanner {
    /// Submit a request.  The answer arrives through
    /// [`poll_completed`](Self::poll_completed).
    fn request_path(&mut self, request: PathRequest);

    /// Hint that `ticket` has been superseded.  Default: ignored; callers
    /// still filter stale completions themselves.
    fn cancel(&mut self, _ticket: PathTicket) {}

    /// Remove and return every completion deliverable at `now`.
    fn poll_completed(&mut self, now: Tick) -> Vec<PathCompletion>;
}

impl<P: PathPlanner + ?Sized> PathPlanner for Box<P> {
    fn request_path(&mut self, request: PathRequest) {
        (**self).request_path(request);
    }

    fn cancel(&mut self, ticket: PathTicket) {
        (**self).cancel(ticket);
    }

    fn poll_completed(&mut self, now: Tick) -> Vec<PathCompletion> {
        (**self).poll_completed(now)
    }
}
