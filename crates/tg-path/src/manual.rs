//! `ManualPlanner`: a planner the host drives by hand.
//!
//! Every request is recorded; nothing completes until the caller supplies a
//! result with [`ManualPlanner::complete`].  Scripted scenarios use it to
//! deliver results late, out of order, or never.

use tg_core::{Tick, WorldPos};

use crate::{PathCompletion, PathPlanner, PathRequest, PathResult, PathTicket};

#[derive(Default)]
pub struct ManualPlanner {
    /// Every request ever submitted, in order.
    pub requests:  Vec<PathRequest>,
    /// Every ticket the caller cancelled, in order.
    pub cancelled: Vec<PathTicket>,
    ready: Vec<PathCompletion>,
}

impl ManualPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for `ticket`; it is returned by the next poll.
    pub fn complete(&mut self, ticket: PathTicket, result: PathResult<Vec<WorldPos>>) {
        self.ready.push(PathCompletion { ticket, result });
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<&PathRequest> {
        self.requests.last()
    }
}

impl PathPlanner for ManualPlanner {
    fn request_path(&mut self, request: PathRequest) {
        self.requests.push(request);
    }

    fn cancel(&mut self, ticket: PathTicket) {
        self.cancelled.push(ticket);
    }

    fn poll_completed(&mut self, _now: Tick) -> Vec<PathCompletion> {
        std::mem::take(&mut self.ready)
    }
}
