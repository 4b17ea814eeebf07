//! Fixed-interval countdown timer
//!
//! Periodic behaviors (away-enemy spawn cadence, ground-walker direction
//! changes) share this accumulator. Firing subtracts the interval instead
//! of resetting to zero, so overshoot carries into the next period and the
//! cadence stays steady under a variable frame delta.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    /// Fire threshold in milliseconds. Mutable: walker AI re-randomizes it
    /// after each fire.
    pub interval: f64,
    elapsed: f64,
}

impl Timer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` milliseconds; true when the interval elapsed.
    pub fn update(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            return true;
        }
        false
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
