//! `CompletionQueue`: path results held until their delivery tick.
//!
//! Planners that compute eagerly but must deliver asynchronously park each
//! completion here under its due tick.  Each sim step drains everything due
//! at or before the current tick.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert and drain where W is the number of
//! distinct due ticks, which stays tiny for fixed-latency planners.

use std::collections::BTreeMap;

use tg_core::Tick;

use crate::{PathCompletion, PathTicket};

/// Priority queue of completions keyed by delivery tick.
#[derive(Default)]
pub struct CompletionQueue {
    inner: BTreeMap<Tick, Vec<PathCompletion>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl CompletionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `completion` until `due`.
    pub fn push(&mut self, due: Tick, completion: PathCompletion) {
        self.inner.entry(due).or_default().push(completion);
        self.total += 1;
    }

    /// Remove and return every completion due at or before `now`, oldest
    /// first, in submission order within a tick.
    pub fn drain_due(&mut self, now: Tick) -> Vec<PathCompletion> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let out: Vec<PathCompletion> = due.into_values().flatten().collect();
        self.total -= out.len();
        out
    }

    /// Drop any pending completion for `ticket`.  Returns whether one was
    /// found.
    pub fn cancel(&mut self, ticket: PathTicket) -> bool {
        let mut found = false;
        self.inner.retain(|_, pending| {
            let before = pending.len();
            pending.retain(|c| c.ticket != ticket);
            found |= pending.len() != before;
            !pending.is_empty()
        });
        if found {
            self.total = self.inner.values().map(Vec::len).sum();
        }
        found
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
