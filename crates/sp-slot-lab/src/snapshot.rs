//! Read-only snapshot of one asset
//!
//! Flattens a config + stats pair into a stable, serializable shape for the
//! renderer and for the commentary service. The spin history is left out;
//! renderers that need it read `SlotStats` directly.

use serde::{Deserialize, Serialize};

use sp_core::{SimError, SimResult};

use crate::catalog::{SlotConfig, VolatilityClass};
use crate::stats::{SlotStats, Trend};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub asset_id: String,
    pub name: String,
    pub theoretical_rtp: f64,
    pub hit_freq: f64,
    pub volatility: VolatilityClass,
    pub total_spins: u64,
    pub total_stakes: f64,
    pub total_wins: f64,
    pub live_rtp: f64,
    /// Live minus theoretical, percentage points
    pub rtp_deviation: f64,
    /// Observed hit rate, percent
    pub hit_rate: f64,
    pub max_multiplier: f64,
    pub trend: Trend,
    pub recent_rtp: Vec<f64>,
}

impl SlotSnapshot {
    pub fn capture(config: &SlotConfig, stats: &SlotStats) -> Self {
        Self {
            asset_id: config.id.clone(),
            name: config.name.clone(),
            theoretical_rtp: config.rtp,
            hit_freq: config.hit_freq,
            volatility: config.volatility_class(),
            total_spins: stats.total_spins,
            total_stakes: stats.total_stakes,
            total_wins: stats.total_wins,
            live_rtp: stats.live_rtp,
            rtp_deviation: stats.rtp_deviation(config),
            hit_rate: stats.hit_rate(),
            max_multiplier: stats.max_multiplier,
            trend: stats.trend,
            recent_rtp: stats.recent_rtp_history.to_vec(),
        }
    }

    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string(self).map_err(|e| SimError::Serialization(e.to_string()))
    }

    /// One-line summary for logs
    pub fn summary_line(&self) -> String {
        let arrow = match self.trend {
            Trend::Up => "▲",
            Trend::Down => "▼",
        };
        format!(
            "{:<18} spins={:>8} rtp={:>7.2}% ({:+.2}) {} hit={:>5.1}% max={:.1}x",
            self.name,
            self.total_spins,
            self.live_rtp,
            self.rtp_deviation,
            arrow,
            self.hit_rate,
            self.max_multiplier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::SpinResult;

    #[test]
    fn test_capture() {
        let config = SlotConfig::new("scarab", "Golden Scarab", 96.0, 0.25, 1.0);
        let stats = SlotStats::seeded(&config)
            .apply_batch(&config, &[SpinResult::new(1.0, 0.0), SpinResult::new(1.0, 4.0)])
            .unwrap();
        let snap = SlotSnapshot::capture(&config, &stats);
        assert_eq!(snap.asset_id, "scarab");
        assert_eq!(snap.total_spins, 2);
        assert_eq!(snap.live_rtp, 200.0);
        assert_eq!(snap.rtp_deviation, 104.0);
        assert_eq!(snap.hit_rate, 50.0);
        assert_eq!(snap.recent_rtp, vec![200.0]);
        assert_eq!(snap.volatility, VolatilityClass::High);
        assert!(snap.summary_line().contains("Golden Scarab"));
    }

    #[test]
    fn test_json_shape() {
        let config = SlotConfig::new("scarab", "Golden Scarab", 96.0, 0.25, 1.0);
        let snap = SlotSnapshot::capture(&config, &SlotStats::seeded(&config));
        let value: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(value["asset_id"], "scarab");
        assert_eq!(value["trend"], "down");
        assert_eq!(value["volatility"], "high");
        assert_eq!(value["live_rtp"], 96.0);
    }

    #[test]
    fn test_json_never_silently_empty() {
        let config = SlotConfig::new("scarab", "Golden Scarab", 96.0, 0.25, 1.0);
        let mut snap = SlotSnapshot::capture(&config, &SlotStats::seeded(&config));
        // Non-finite floats serialize as null rather than failing
        snap.live_rtp = f64::NAN;
        let json = snap.to_json().unwrap();
        assert!(!json.is_empty());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["live_rtp"].is_null());
        assert_eq!(value["asset_id"], "scarab");
    }
}
