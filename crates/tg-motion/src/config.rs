//! Per-agent motion tuning.

use crate::{MotionError, MotionResult};

/// Largest accepted `obstacle_probe_radius`, in tiles.  Grid sensors scan
/// every tile the probe square touches.
pub const MAX_PROBE_RADIUS: f64 = 8.0;

/// Motion parameters shared by every controller in a sim.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Walking speed.  Default: 1.666 (about one tile per 0.6 s).
    pub tiles_per_second: f64,

    /// Distance from a tile centre that counts as arrival.  Default: 0.12.
    pub arrive_eps: f64,

    /// Simulated seconds an agent waits on a denied reservation before it
    /// re-plans toward its final tile.  Default: 0.35.
    pub block_repath_delay_secs: f64,

    /// Radius of the hard-obstacle probe around goals and tile centres.
    /// Default: 0.4.  At most [`MAX_PROBE_RADIUS`].
    pub obstacle_probe_radius: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tiles_per_second:        1.666,
            arrive_eps:              0.12,
            block_repath_delay_secs: 0.35,
            obstacle_probe_radius:   0.4,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> MotionResult<()> {
        let checks = [
            ("tiles_per_second", self.tiles_per_second, false),
            ("arrive_eps", self.arrive_eps, true),
            ("block_repath_delay_secs", self.block_repath_delay_secs, true),
            ("obstacle_probe_radius", self.obstacle_probe_radius, true),
        ];
        for (name, value, zero_ok) in checks {
            let bad = !value.is_finite() || value < 0.0 || (!zero_ok && value == 0.0);
            if bad {
                return Err(MotionError::Config(format!("{name} out of range: {value}")));
            }
        }
        if self.obstacle_probe_radius > MAX_PROBE_RADIUS {
            return Err(MotionError::Config(format!(
                "obstacle_probe_radius {} exceeds {MAX_PROBE_RADIUS}",
                self.obstacle_probe_radius
            )));
        }
        Ok(())
    }
}
