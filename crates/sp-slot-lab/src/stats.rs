//! Batch Aggregator — Per-asset running statistics
//!
//! Lifetime totals never evict; the spin history and the RTP chart series are
//! bounded windows over the most recent values only.

use serde::{Deserialize, Serialize};

use sp_core::{BoundedWindow, SimError, SimResult};

use crate::catalog::SlotConfig;
use crate::spin::SpinResult;

/// Spins kept for the live feed
pub const HISTORY_CAPACITY: usize = 100;

/// Live-RTP samples kept for the trend chart
pub const RTP_TREND_CAPACITY: usize = 30;

pub type SpinHistory = BoundedWindow<SpinResult, HISTORY_CAPACITY>;
pub type RtpHistory = BoundedWindow<f64, RTP_TREND_CAPACITY>;

/// Direction of the last live-RTP move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    #[default]
    Down,
}

impl Trend {
    /// Strictly greater is `Up`; ties resolve to `Down`
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous { Self::Up } else { Self::Down }
    }
}

/// Running statistics for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotStats {
    pub asset_id: String,
    pub total_spins: u64,
    pub total_hits: u64,
    pub total_stakes: f64,
    pub total_wins: f64,
    pub live_rtp: f64,
    pub max_multiplier: f64,
    pub history: SpinHistory,
    pub recent_rtp_history: RtpHistory,
    pub trend: Trend,
}

/// Sums over one batch, computed before folding into the totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSummary {
    pub spins: u64,
    pub hits: u64,
    pub stakes: f64,
    pub wins: f64,
    pub max_multiplier: f64,
}

impl BatchSummary {
    pub fn of(batch: &[SpinResult]) -> SimResult<Self> {
        if batch.is_empty() {
            return Err(SimError::EmptyBatch);
        }
        let mut summary = Self {
            spins: batch.len() as u64,
            hits: 0,
            stakes: 0.0,
            wins: 0.0,
            max_multiplier: 0.0,
        };
        for spin in batch {
            summary.stakes += spin.stake;
            summary.wins += spin.win;
            summary.max_multiplier = summary.max_multiplier.max(spin.multiplier);
            if spin.is_hit() {
                summary.hits += 1;
            }
        }
        Ok(summary)
    }

    /// Realised RTP of the batch alone
    pub fn rtp(&self) -> Option<f64> {
        (self.stakes > 0.0).then(|| self.wins / self.stakes * 100.0)
    }
}

impl SlotStats {
    /// Fresh record seeded from catalog defaults
    pub fn seeded(config: &SlotConfig) -> Self {
        Self {
            asset_id: config.id.clone(),
            total_spins: 0,
            total_hits: 0,
            total_stakes: 0.0,
            total_wins: 0.0,
            live_rtp: config.rtp,
            max_multiplier: 0.0,
            history: SpinHistory::new(),
            recent_rtp_history: RtpHistory::new(),
            trend: Trend::default(),
        }
    }

    /// Fold a batch into a new record, leaving `self` untouched
    pub fn apply_batch(&self, config: &SlotConfig, batch: &[SpinResult]) -> SimResult<Self> {
        let mut next = self.clone();
        next.absorb(config, batch)?;
        Ok(next)
    }

    /// In-place fold used by the tracker
    pub(crate) fn absorb(&mut self, config: &SlotConfig, batch: &[SpinResult]) -> SimResult<BatchSummary> {
        if self.asset_id != config.id {
            return Err(SimError::UnknownAsset(format!(
                "{} (record belongs to {})",
                config.id, self.asset_id
            )));
        }
        let summary = BatchSummary::of(batch)?;
        let previous_rtp = self.live_rtp;

        self.total_stakes += summary.stakes;
        self.total_wins += summary.wins;
        self.total_spins += summary.spins;
        self.total_hits += summary.hits;

        let new_rtp = if self.total_stakes > 0.0 {
            self.total_wins / self.total_stakes * 100.0
        } else {
            config.rtp
        };

        self.history.extend(batch.iter().copied());
        self.recent_rtp_history.push(new_rtp);
        self.max_multiplier = self.max_multiplier.max(summary.max_multiplier);
        self.trend = Trend::between(previous_rtp, new_rtp);
        self.live_rtp = new_rtp;

        Ok(summary)
    }

    /// Observed hit rate, percent
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.total_hits as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Live minus theoretical RTP, percentage points
    pub fn rtp_deviation(&self, config: &SlotConfig) -> f64 {
        self.live_rtp - config.rtp
    }

    /// Player net result over the lifetime (wins − stakes)
    pub fn net_result(&self) -> f64 {
        self.total_wins - self.total_stakes
    }
}

/// Pure aggregation step: current record + batch → updated record
pub fn apply_batch(
    current: &SlotStats,
    config: &SlotConfig,
    batch: &[SpinResult],
) -> SimResult<SlotStats> {
    current.apply_batch(config, batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cfg() -> SlotConfig {
        SlotConfig::new("scarab", "Scarab", 96.0, 0.25, 1.0)
    }

    fn spins(pairs: &[(f64, f64)]) -> Vec<SpinResult> {
        pairs.iter().map(|&(s, w)| SpinResult::new(s, w)).collect()
    }

    #[test]
    fn test_seeded_record() {
        let stats = SlotStats::seeded(&cfg());
        assert_eq!(stats.asset_id, "scarab");
        assert_eq!(stats.live_rtp, 96.0);
        assert_eq!(stats.trend, Trend::Down);
        assert!(stats.history.is_empty());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_apply_batch_folds_totals() {
        let config = cfg();
        let start = SlotStats::seeded(&config);
        let batch = spins(&[(1.0, 0.0), (1.0, 3.0), (1.0, 0.0), (1.0, 0.5)]);

        let next = apply_batch(&start, &config, &batch).unwrap();
        assert_eq!(next.total_spins, 4);
        assert_eq!(next.total_hits, 2);
        assert_relative_eq!(next.total_stakes, 4.0);
        assert_relative_eq!(next.total_wins, 3.5);
        assert_relative_eq!(next.live_rtp, 87.5);
        assert_relative_eq!(next.max_multiplier, 3.0);
        assert_eq!(next.history.len(), 4);
        assert_eq!(next.recent_rtp_history.to_vec(), vec![87.5]);
        assert_eq!(next.trend, Trend::Down);
        assert_relative_eq!(next.hit_rate(), 50.0);
        assert_relative_eq!(next.rtp_deviation(&config), -8.5);
        assert_relative_eq!(next.net_result(), -0.5);

        // Input record is untouched
        assert_eq!(start, SlotStats::seeded(&config));
    }

    #[test]
    fn test_trend_up_and_tie() {
        let config = cfg();
        let s1 = apply_batch(&SlotStats::seeded(&config), &config, &spins(&[(1.0, 0.5)])).unwrap();
        let s2 = apply_batch(&s1, &config, &spins(&[(1.0, 1.5)])).unwrap();
        assert_relative_eq!(s2.live_rtp, 100.0);
        assert_eq!(s2.trend, Trend::Up);

        // Same ratio again: live RTP unchanged, tie goes down
        let s3 = apply_batch(&s2, &config, &spins(&[(1.0, 1.0)])).unwrap();
        assert_eq!(s3.live_rtp, s2.live_rtp);
        assert_eq!(s3.trend, Trend::Down);
    }

    #[test]
    fn test_max_multiplier_never_decreases() {
        let config = cfg();
        let s1 = apply_batch(&SlotStats::seeded(&config), &config, &spins(&[(1.0, 40.0)])).unwrap();
        let s2 = apply_batch(&s1, &config, &spins(&[(1.0, 2.0)])).unwrap();
        assert_relative_eq!(s2.max_multiplier, 40.0);
    }

    #[test]
    fn test_rtp_window_bounded() {
        let config = cfg();
        let mut stats = SlotStats::seeded(&config);
        for i in 0..45 {
            stats = apply_batch(&stats, &config, &spins(&[(1.0, i as f64)])).unwrap();
        }
        assert_eq!(stats.recent_rtp_history.len(), RTP_TREND_CAPACITY);
        assert_eq!(stats.recent_rtp_history.last(), Some(&stats.live_rtp));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let config = cfg();
        let stats = SlotStats::seeded(&config);
        assert!(matches!(
            apply_batch(&stats, &config, &[]),
            Err(SimError::EmptyBatch)
        ));
    }

    #[test]
    fn test_mismatched_asset_rejected() {
        let config = cfg();
        let other = SlotConfig::new("other", "Other", 95.0, 0.3, 1.0);
        let stats = SlotStats::seeded(&config);
        assert!(matches!(
            apply_batch(&stats, &other, &spins(&[(1.0, 1.0)])),
            Err(SimError::UnknownAsset(_))
        ));
    }

    #[test]
    fn test_batch_summary() {
        let summary = BatchSummary::of(&spins(&[(2.0, 0.0), (2.0, 6.0)])).unwrap();
        assert_eq!(summary.spins, 2);
        assert_eq!(summary.hits, 1);
        assert_relative_eq!(summary.max_multiplier, 3.0);
        assert_relative_eq!(summary.rtp().unwrap(), 150.0);
    }

    #[test]
    fn test_stats_serde() {
        let config = cfg();
        let stats = apply_batch(&SlotStats::seeded(&config), &config, &spins(&[(1.0, 2.0)])).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["trend"], "up");
        assert_eq!(json["history"].as_array().unwrap().len(), 1);
        let back: SlotStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
