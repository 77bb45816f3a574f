//! # sp-slot-lab — Live slot statistics core for SlotPulse
//!
//! Simulates slot spins against a catalog of slot configurations and folds
//! them into per-asset running statistics for a live dashboard.
//!
//! ## Features
//!
//! - **Outcome Simulator**: Bernoulli hit draw plus a log-normal hit multiplier
//!   whose mean is tuned so the long-run RTP converges to the configured one
//! - **Batch Aggregator**: Lifetime totals, running max multiplier, RTP trend,
//!   bounded spin history (100) and RTP chart window (30)
//! - **Stats Tracker**: Explicit asset-id → stats map driven by `tick`
//! - **Injectable RNG**: Seeded ChaCha streams for reproducible runs
//! - **Commentary boundary**: Serializable snapshots for an external AI text service
//!
//! ## Architecture
//!
//! ```text
//! SlotCatalog ──> SlotConfig ──┐
//!                              v
//! DashboardSettings ──> StatsTracker::tick(asset_id)
//!                              │
//!                              ├── simulate_batch(config, count, stake, rng)
//!                              │         └── Vec<SpinResult>
//!                              └── apply_batch(stats, config, batch)
//!                                        └── SlotStats ──> SlotSnapshot
//! ```

pub mod catalog;
pub mod commentary;
pub mod engine;
pub mod rng;
pub mod settings;
pub mod snapshot;
pub mod spin;
pub mod stats;
pub mod tracker;

pub use catalog::*;
pub use commentary::*;
pub use engine::*;
pub use rng::*;
pub use settings::*;
pub use snapshot::*;
pub use spin::*;
pub use stats::*;
pub use tracker::*;

pub use sp_core::{BoundedWindow, SimError, SimResult};
