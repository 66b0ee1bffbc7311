//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per fixed
//! simulation step.  `SimClock` maps ticks to elapsed simulated seconds:
//!
//!   elapsed_secs = tick * step_secs
//!
//! Every timer in the coordinator (movement, block/re-plan delay) is driven
//! by this step, never by wall-clock time, so runs are reproducible.

use std::fmt;

use crate::{TgError, TgResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step simulation clock.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick (the fixed `dt` handed to every agent).
    pub step_secs: f64,
    /// The current tick: advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(step_secs: f64) -> Self {
        Self {
            step_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.step_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the sim builder.  Per-agent motion tuning lives in `tg_motion::MotionConfig`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per fixed step.  Default: 1/50 s.
    pub step_secs: f64,

    /// Total ticks `Sim::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed for scenario generation.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// When a move goal lands on an unwalkable tile, search this many rings
    /// outward for the nearest walkable tile.  0 disables snapping.
    pub goal_snap_radius: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_secs:               0.02,
            total_ticks:             3_000,
            seed:                    42,
            snapshot_interval_ticks: 0,
            goal_snap_radius:        4,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_secs)
    }

    /// Reject non-positive or non-finite step lengths.
    pub fn validate(&self) -> TgResult<()> {
        if !self.step_secs.is_finite() || self.step_secs <= 0.0 {
            return Err(TgError::Config(format!(
                "step_secs must be a positive finite number, got {}",
                self.step_secs
            )));
        }
        Ok(())
    }
}
