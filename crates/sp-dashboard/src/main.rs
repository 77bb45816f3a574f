//! SlotPulse Dashboard — headless tick driver
//!
//! Usage:
//!   sp-dashboard                                  - tick every built-in slot forever
//!   sp-dashboard --ticks 20 --seed 7              - reproducible 20-tick run
//!   sp-dashboard --catalog lobby.yaml --json      - custom catalog, JSON-lines output
//!   sp-dashboard --active dragon-vault,frost-reels --stake 2.5

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use sp_slot_lab::{
    DashboardSettings, HeuristicCommentary, SlotCatalog, StatsTracker, commentary_or_unavailable,
};

#[derive(Parser, Debug)]
#[command(name = "sp-dashboard", about = "Live slot RTP dashboard (headless)")]
struct Cli {
    /// Slot catalog (.json / .yaml); defaults to the built-in lobby
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Dashboard settings file (.json / .yaml)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stake per spin
    #[arg(long)]
    stake: Option<f64>,

    /// Spins per asset per tick
    #[arg(long)]
    batch_size: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop after N ticks (0 = run until killed)
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated asset ids to tick; empty = all
    #[arg(long, value_delimiter = ',')]
    active: Vec<String>,

    /// Print commentary every N ticks (0 = never)
    #[arg(long)]
    commentary_every: Option<u64>,

    /// Emit snapshots as JSON lines instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// File settings, then environment, then flags
    fn resolve_settings(&self) -> Result<DashboardSettings> {
        let mut settings = match &self.settings {
            Some(path) => DashboardSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => DashboardSettings::default(),
        }
        .with_env_overrides()
        .context("Invalid environment override")?;

        if let Some(stake) = self.stake {
            settings.stake = stake;
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size;
        }
        if let Some(interval) = self.interval_ms {
            settings.tick_interval_ms = interval;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if !self.active.is_empty() {
            settings.active = self.active.clone();
        }
        if let Some(every) = self.commentary_every {
            settings.commentary_every = every;
        }

        settings.validate().context("Invalid dashboard settings")?;
        Ok(settings)
    }

    fn resolve_catalog(&self) -> Result<SlotCatalog> {
        match &self.catalog {
            Some(path) => SlotCatalog::load(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display())),
            None => Ok(SlotCatalog::builtin()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = cli.resolve_catalog()?;
    let settings = cli.resolve_settings()?;
    let mut tracker = StatsTracker::new(&catalog, &settings)?;
    let active = tracker.resolve_active(&settings.active)?;
    let commentator = HeuristicCommentary::default();

    log::info!(
        "Starting SlotPulse: {} active of {} slots, seed {} (reproduce with --seed {})",
        active.len(),
        tracker.len(),
        tracker.master_seed(),
        tracker.master_seed()
    );

    let interval = Duration::from_millis(settings.tick_interval_ms);
    loop {
        tracker.tick_many(&active)?;
        let tick = tracker.tick_count();
        report(&tracker, &active, tick, cli.json)?;

        if settings.commentary_every > 0 && tick % settings.commentary_every == 0 {
            for id in &active {
                let snapshot = tracker.snapshot(id)?;
                let commentary = commentary_or_unavailable(&commentator, &snapshot);
                println!("[{}] {}: {}", commentary.forecast, snapshot.name, commentary.text);
            }
        }

        if cli.ticks != 0 && tick >= cli.ticks {
            break;
        }
        thread::sleep(interval);
    }

    log::info!("Stopped after {} ticks", tracker.tick_count());
    Ok(())
}

fn report(tracker: &StatsTracker, active: &[String], tick: u64, json: bool) -> Result<()> {
    if !json {
        println!("── tick {} ──", tick);
    }
    for id in active {
        let snapshot = tracker.snapshot(id)?;
        if json {
            println!("{}", snapshot.to_json()?);
        } else {
            println!("{}", snapshot.summary_line());
        }
    }
    Ok(())
}
