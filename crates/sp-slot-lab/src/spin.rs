//! Spin result

use serde::{Deserialize, Serialize};

/// Outcome of one simulated spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Wager for this spin
    pub stake: f64,
    /// Amount returned to the player (never negative)
    pub win: f64,
    /// Win-to-stake ratio
    pub multiplier: f64,
}

impl SpinResult {
    /// Build a result; the multiplier is derived from win and stake
    pub fn new(stake: f64, win: f64) -> Self {
        let win = win.max(0.0);
        let multiplier = if stake > 0.0 { win / stake } else { 0.0 };
        Self {
            stake,
            win,
            multiplier,
        }
    }

    /// A losing spin
    pub fn miss(stake: f64) -> Self {
        Self::new(stake, 0.0)
    }

    /// Check if this is a win
    pub fn is_hit(&self) -> bool {
        self.win > 0.0
    }
}
