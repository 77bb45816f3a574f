//! Stats Tracker — Owner of every asset's running statistics
//!
//! Lifecycle: built from a catalog (every slot seeded with catalog defaults),
//! mutated only through `tick` / `tick_many`, dropped with the process.
//! Each asset owns its RNG stream, so results for a fixed master seed do not
//! depend on which other assets are active or on thread scheduling.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use sp_core::{SimError, SimResult};

use crate::catalog::{SlotCatalog, SlotConfig};
use crate::engine::{simulate_batch, validate_stake};
use crate::rng::{RngBank, SpinRng};
use crate::settings::DashboardSettings;
use crate::snapshot::SlotSnapshot;
use crate::stats::{BatchSummary, SlotStats};

/// One tracked asset
struct AssetEntry {
    config: SlotConfig,
    rng: SpinRng,
    stats: SlotStats,
}

impl AssetEntry {
    fn tick(&mut self, stake: f64, batch_size: usize) -> SimResult<BatchSummary> {
        let batch = simulate_batch(&self.config, batch_size, stake, &mut self.rng)?;
        self.stats.absorb(&self.config, &batch)
    }
}

/// Per-asset statistics map driven by an external scheduler
pub struct StatsTracker {
    /// Entries in catalog order
    entries: Vec<AssetEntry>,
    /// Asset id → position in `entries`
    index: HashMap<String, usize>,
    /// Stake applied to every spin of a tick
    stake: f64,
    /// Spins per asset per tick
    batch_size: usize,
    bank: RngBank,
    ticks: u64,
}

impl StatsTracker {
    /// Seed a record for every catalog slot
    pub fn new(catalog: &SlotCatalog, settings: &DashboardSettings) -> SimResult<Self> {
        settings.validate()?;
        let bank = RngBank::from_option(settings.seed);

        let entries: Vec<AssetEntry> = catalog
            .iter()
            .enumerate()
            .map(|(i, config)| AssetEntry {
                config: config.clone(),
                rng: bank.stream(i as u64),
                stats: SlotStats::seeded(config),
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.config.id.clone(), i))
            .collect();

        log::info!(
            "Stats tracker ready: {} assets, stake {}, batch {}, seed {}",
            entries.len(),
            settings.stake,
            settings.batch_size,
            bank.master_seed()
        );

        Ok(Self {
            entries,
            index,
            stake: settings.stake,
            batch_size: settings.batch_size,
            bank,
            ticks: 0,
        })
    }

    /// Reproducible tracker with default stake and batch size
    pub fn seeded(catalog: &SlotCatalog, seed: u64) -> SimResult<Self> {
        let settings = DashboardSettings {
            seed: Some(seed),
            ..DashboardSettings::default()
        };
        Self::new(catalog, &settings)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn set_stake(&mut self, stake: f64) -> SimResult<()> {
        validate_stake(stake).inspect_err(|e| log::warn!("Rejected stake change: {}", e))?;
        self.stake = stake;
        Ok(())
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> SimResult<()> {
        if batch_size == 0 {
            log::warn!("Rejected batch size 0");
            return Err(SimError::EmptyBatch);
        }
        self.batch_size = batch_size;
        Ok(())
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn master_seed(&self) -> u64 {
        self.bank.master_seed()
    }

    /// Number of completed `tick` / `tick_many` calls
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TICKS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Simulate and fold one batch for a single asset
    pub fn tick(&mut self, asset_id: &str) -> SimResult<&SlotStats> {
        let idx = self.index_of(asset_id)?;
        let (stake, batch_size) = (self.stake, self.batch_size);
        let entry = &mut self.entries[idx];
        let summary = entry.tick(stake, batch_size)?;
        self.ticks += 1;
        log::debug!(
            "tick {} {}: +{} spins, batch max {:.2}x, live rtp {:.2}%",
            self.ticks,
            asset_id,
            summary.spins,
            summary.max_multiplier,
            entry.stats.live_rtp
        );
        Ok(&entry.stats)
    }

    /// Tick several assets at once
    ///
    /// All ids are checked before any record changes. Distinct assets run on
    /// rayon workers; each record is touched by exactly one worker. Repeated
    /// ids are ticked once.
    pub fn tick_many<S: AsRef<str>>(&mut self, asset_ids: &[S]) -> SimResult<()> {
        let wanted: HashSet<usize> = asset_ids
            .iter()
            .map(|id| self.index_of(id.as_ref()))
            .collect::<SimResult<_>>()?;
        let (stake, batch_size) = (self.stake, self.batch_size);

        let summaries: Vec<BatchSummary> = self
            .entries
            .par_iter_mut()
            .enumerate()
            .filter(|(i, _)| wanted.contains(i))
            .map(|(_, entry)| entry.tick(stake, batch_size))
            .collect::<SimResult<_>>()?;

        self.ticks += 1;
        log::debug!(
            "tick {}: {} assets, {} spins",
            self.ticks,
            summaries.len(),
            summaries.iter().map(|s| s.spins).sum::<u64>()
        );
        Ok(())
    }

    /// Tick every catalog asset
    pub fn tick_all(&mut self) -> SimResult<()> {
        let ids: Vec<String> = self.entries.iter().map(|e| e.config.id.clone()).collect();
        self.tick_many(&ids)
    }

    /// Re-seed one record from catalog defaults; its RNG stream continues
    pub fn reset(&mut self, asset_id: &str) -> SimResult<()> {
        let idx = self.index_of(asset_id)?;
        let entry = &mut self.entries[idx];
        entry.stats = SlotStats::seeded(&entry.config);
        log::info!("Reset stats for {}", asset_id);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // READ-ONLY VIEWS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn stats(&self, asset_id: &str) -> SimResult<&SlotStats> {
        Ok(&self.entries[self.index_of(asset_id)?].stats)
    }

    pub fn config(&self, asset_id: &str) -> SimResult<&SlotConfig> {
        Ok(&self.entries[self.index_of(asset_id)?].config)
    }

    pub fn snapshot(&self, asset_id: &str) -> SimResult<SlotSnapshot> {
        let entry = &self.entries[self.index_of(asset_id)?];
        Ok(SlotSnapshot::capture(&entry.config, &entry.stats))
    }

    /// Snapshots of every asset in catalog order
    pub fn snapshots(&self) -> Vec<SlotSnapshot> {
        self.entries
            .iter()
            .map(|e| SlotSnapshot::capture(&e.config, &e.stats))
            .collect()
    }

    /// Resolve an active set; empty means every asset
    pub fn resolve_active(&self, requested: &[String]) -> SimResult<Vec<String>> {
        if requested.is_empty() {
            return Ok(self.asset_ids());
        }
        for id in requested {
            self.index_of(id)?;
        }
        Ok(requested.to_vec())
    }

    pub fn asset_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.config.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, asset_id: &str) -> SimResult<usize> {
        self.index
            .get(asset_id)
            .copied()
            .ok_or_else(|| SimError::UnknownAsset(asset_id.to_string()))
    }
}
