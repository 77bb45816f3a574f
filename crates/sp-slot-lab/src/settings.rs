//! Dashboard settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use sp_core::{SimError, SimResult};

use crate::engine::validate_stake;

/// Environment variable that overrides the master seed
pub const SEED_ENV_VAR: &str = "SLOTPULSE_SEED";

/// Tick cadence, stake and active set for a dashboard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Stake used for every spin of a tick
    #[serde(default = "default_stake")]
    pub stake: f64,

    /// Spins simulated per asset per tick
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Wall-clock interval between ticks (ms)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Master RNG seed; `None` draws one from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Asset ids to tick; empty means the whole catalog
    #[serde(default)]
    pub active: Vec<String>,

    /// Emit commentary every N ticks (0 = never)
    #[serde(default = "default_commentary_every")]
    pub commentary_every: u64,
}

fn default_stake() -> f64 {
    1.0
}

fn default_batch_size() -> usize {
    100
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_commentary_every() -> u64 {
    10
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            stake: default_stake(),
            batch_size: default_batch_size(),
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
            active: Vec::new(),
            commentary_every: default_commentary_every(),
        }
    }
}

impl DashboardSettings {
    pub fn validate(&self) -> SimResult<()> {
        validate_stake(self.stake)?;
        if self.batch_size == 0 {
            return Err(SimError::EmptyBatch);
        }
        if self.tick_interval_ms == 0 {
            return Err(SimError::invalid("tick_interval_ms must be > 0"));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SimError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_yaml_str(yaml: &str) -> SimResult<Self> {
        let settings: Self =
            serde_yml::from_str(yaml).map_err(|e| SimError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(SimError::Parse(format!(
                "unsupported settings extension: {:?}",
                other
            ))),
        }
    }

    /// Apply `SLOTPULSE_SEED` if it is set
    pub fn with_env_overrides(self) -> SimResult<Self> {
        match std::env::var(SEED_ENV_VAR) {
            Ok(raw) => self.with_seed_override(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_seed_override(mut self, raw: &str) -> SimResult<Self> {
        let seed = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| SimError::Parse(format!("{}={:?}: {}", SEED_ENV_VAR, raw, e)))?;
        self.seed = Some(seed);
        Ok(self)
    }
}
