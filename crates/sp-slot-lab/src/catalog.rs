//! Asset Catalog — Static slot configuration table

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sp_core::{SimError, SimResult};

/// Upper bound for the log-normal shape parameter
pub const MAX_VOLATILITY: f64 = 1.5;

/// Upper bound for the per-spin standard deviation of the multiplier
///
/// Bounds the standard error of a 200k-spin RTP estimate to 0.8 percentage
/// points.
pub const MAX_SPIN_STD_DEV: f64 = 3.5;

/// A single slot's payout shape
///
/// Immutable once loaded. `color` and `provider` are display metadata only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Theoretical return-to-player, percent in (0, 100)
    pub rtp: f64,
    /// Probability that a spin returns a nonzero win, in (0, 1]
    #[serde(alias = "hitFreq")]
    pub hit_freq: f64,
    /// Shape σ of the log-normal hit multiplier, in [0, 1.5]
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    /// Display color (hex)
    #[serde(default = "default_color")]
    pub color: String,
    /// Studio / provider label
    #[serde(default)]
    pub provider: Option<String>,
}

fn default_volatility() -> f64 {
    1.0
}

fn default_color() -> String {
    "#888888".to_string()
}

/// Coarse volatility bucket for display and commentary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityClass {
    Low,
    Medium,
    High,
    Extreme,
}

impl VolatilityClass {
    pub fn from_sigma(sigma: f64) -> Self {
        if sigma < 0.6 {
            Self::Low
        } else if sigma < 1.0 {
            Self::Medium
        } else if sigma < 1.2 {
            Self::High
        } else {
            Self::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

impl SlotConfig {
    /// Create a config with default display metadata
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rtp: f64,
        hit_freq: f64,
        volatility: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rtp,
            hit_freq,
            volatility,
            color: default_color(),
            provider: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Check the payout-shape parameters
    pub fn validate(&self) -> SimResult<()> {
        if self.id.trim().is_empty() {
            return Err(SimError::invalid("slot id must not be empty"));
        }
        if !(self.rtp.is_finite() && self.rtp > 0.0 && self.rtp < 100.0) {
            return Err(SimError::invalid(format!(
                "{}: rtp {} outside (0, 100)",
                self.id, self.rtp
            )));
        }
        if !(self.hit_freq.is_finite() && self.hit_freq > 0.0 && self.hit_freq <= 1.0) {
            return Err(SimError::invalid(format!(
                "{}: hit_freq {} outside (0, 1]",
                self.id, self.hit_freq
            )));
        }
        if !(self.volatility.is_finite() && (0.0..=MAX_VOLATILITY).contains(&self.volatility)) {
            return Err(SimError::invalid(format!(
                "{}: volatility {} outside [0, {}]",
                self.id, self.volatility, MAX_VOLATILITY
            )));
        }
        let std_dev = self.theoretical_std_dev();
        if std_dev > MAX_SPIN_STD_DEV {
            return Err(SimError::invalid(format!(
                "{}: per-spin std-dev {:.2} exceeds {} (raise hit_freq or lower volatility)",
                self.id, std_dev, MAX_SPIN_STD_DEV
            )));
        }
        Ok(())
    }

    /// Mean multiplier of a winning spin: rtp / 100 / hit_freq
    pub fn mean_hit_multiplier(&self) -> f64 {
        self.rtp / 100.0 / self.hit_freq
    }

    /// Expected multiplier of any spin (rtp as a fraction)
    pub fn expected_multiplier(&self) -> f64 {
        self.rtp / 100.0
    }

    /// Per-spin standard deviation of the multiplier
    ///
    /// For a log-normal hit size, E[M²] = h · m² · e^{σ²}.
    pub fn theoretical_std_dev(&self) -> f64 {
        let m = self.mean_hit_multiplier();
        let second_moment = self.hit_freq * m * m * (self.volatility * self.volatility).exp();
        let mean = self.expected_multiplier();
        (second_moment - mean * mean).max(0.0).sqrt()
    }

    pub fn volatility_class(&self) -> VolatilityClass {
        VolatilityClass::from_sigma(self.volatility)
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    slots: Vec<SlotConfig>,
}

/// Ordered, immutable list of slot configurations
#[derive(Debug, Clone, Serialize)]
pub struct SlotCatalog {
    slots: Vec<SlotConfig>,
}

impl SlotCatalog {
    /// Build a catalog, validating every entry and rejecting duplicate ids
    pub fn new(slots: Vec<SlotConfig>) -> SimResult<Self> {
        if slots.is_empty() {
            return Err(SimError::invalid("catalog must contain at least one slot"));
        }
        let mut seen = HashSet::new();
        for slot in &slots {
            slot.validate()?;
            if !seen.insert(slot.id.as_str()) {
                return Err(SimError::invalid(format!("duplicate slot id: {}", slot.id)));
            }
        }
        Ok(Self { slots })
    }

    /// Built-in lobby
    pub fn builtin() -> Self {
        Self {
            slots: vec![
                SlotConfig::new("neon-cascade", "Neon Cascade", 96.5, 0.32, 0.7)
                    .with_color("#00e5ff"),
                SlotConfig::new("golden-scarab", "Golden Scarab", 96.0, 0.25, 1.0)
                    .with_color("#f1c40f"),
                SlotConfig::new("wild-orchard", "Wild Orchard", 95.5, 0.38, 0.5)
                    .with_color("#2ecc71"),
                SlotConfig::new("dragon-vault", "Dragon Vault", 96.2, 0.35, 1.2)
                    .with_color("#e74c3c"),
                SlotConfig::new("frost-reels", "Frost Reels", 94.8, 0.28, 0.9)
                    .with_color("#3498db"),
                SlotConfig::new("midnight-jackpot", "Midnight Jackpot", 97.1, 0.22, 1.0)
                    .with_color("#9b59b6"),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let doc: CatalogDocument =
            serde_json::from_str(json).map_err(|e| SimError::Parse(e.to_string()))?;
        Self::new(doc.slots)
    }

    pub fn from_yaml_str(yaml: &str) -> SimResult<Self> {
        let doc: CatalogDocument =
            serde_yml::from_str(yaml).map_err(|e| SimError::Parse(e.to_string()))?;
        Self::new(doc.slots)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            other => {
                return Err(SimError::Parse(format!(
                    "unsupported catalog extension: {:?}",
                    other
                )));
            }
        };
        log::info!("Loaded {} slots from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Look up a slot; absent ids are a caller desync
    pub fn get(&self, id: &str) -> SimResult<&SlotConfig> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SimError::UnknownAsset(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotConfig> {
        self.slots.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
