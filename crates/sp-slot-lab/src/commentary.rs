//! Commentary boundary — AI forecast text for a slot snapshot
//!
//! The text service itself lives outside this crate. This module defines the
//! seam (`CommentaryService`), the request prompt, the tolerant reply parser,
//! and an offline heuristic implementation used when no service is wired in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snapshot::SlotSnapshot;
use crate::stats::Trend;

/// Text shown when the service fails
pub const UNAVAILABLE_TEXT: &str = "AI analysis unavailable";

/// Forecast label plus free text; opaque to the statistics core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    pub forecast: String,
    pub text: String,
}

impl Commentary {
    pub fn new(forecast: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            forecast: forecast.into(),
            text: text.into(),
        }
    }

    pub fn unavailable() -> Self {
        Self::new("unknown", UNAVAILABLE_TEXT)
    }

    pub fn is_unavailable(&self) -> bool {
        self.text == UNAVAILABLE_TEXT
    }
}

#[derive(Error, Debug)]
pub enum CommentaryError {
    #[error("Commentary service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed commentary reply: {0}")]
    Malformed(String),
}

/// Anything that can turn a snapshot into commentary
pub trait CommentaryService {
    fn analyze(&self, snapshot: &SlotSnapshot) -> Result<Commentary, CommentaryError>;
}

/// Ask the service, falling back to the "unavailable" commentary
pub fn commentary_or_unavailable<S: CommentaryService + ?Sized>(
    service: &S,
    snapshot: &SlotSnapshot,
) -> Commentary {
    match service.analyze(snapshot) {
        Ok(commentary) => commentary,
        Err(e) => {
            log::warn!("Commentary for {} failed: {}", snapshot.asset_id, e);
            Commentary::unavailable()
        }
    }
}

/// Request text for an external language model
///
/// Falls back to the one-line summary if the snapshot cannot be rendered as
/// JSON, so the request never goes out without statistics.
pub fn build_prompt(snapshot: &SlotSnapshot) -> String {
    let stats = serde_json::to_string_pretty(snapshot).unwrap_or_else(|e| {
        log::warn!("Snapshot for {} not serializable: {}", snapshot.asset_id, e);
        snapshot.summary_line()
    });
    format!(
        "You are a slot analytics commentator. Given the live statistics below for \"{}\", \
         reply with a JSON object {{\"forecast\": \"hot\" | \"cold\" | \"stable\", \"text\": \"<two sentences>\"}} \
         and nothing else.\n\n{}",
        snapshot.name, stats
    )
}

/// Pull the first JSON object out of a model reply
///
/// Models often wrap JSON in prose or code fences, so everything outside the
/// outermost braces is ignored.
pub fn parse_commentary(raw: &str) -> Result<Commentary, CommentaryError> {
    let start = raw
        .find('{')
        .ok_or_else(|| CommentaryError::Malformed("no JSON object in reply".into()))?;
    let end = raw
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| CommentaryError::Malformed("unterminated JSON object".into()))?;
    let commentary: Commentary = serde_json::from_str(&raw[start..=end])
        .map_err(|e| CommentaryError::Malformed(e.to_string()))?;
    if commentary.forecast.trim().is_empty() {
        return Err(CommentaryError::Malformed("empty forecast label".into()));
    }
    Ok(commentary)
}

/// Offline commentary from the RTP deviation band
#[derive(Debug, Clone)]
pub struct HeuristicCommentary {
    /// Deviation (percentage points) beyond which a slot counts as hot/cold
    pub band: f64,
    /// Spins required before any call is made
    pub min_spins: u64,
}

impl Default for HeuristicCommentary {
    fn default() -> Self {
        Self {
            band: 2.0,
            min_spins: 1_000,
        }
    }
}

impl CommentaryService for HeuristicCommentary {
    fn analyze(&self, snapshot: &SlotSnapshot) -> Result<Commentary, CommentaryError> {
        if snapshot.total_spins < self.min_spins {
            return Ok(Commentary::new(
                "stable",
                format!(
                    "{} has only {} spins so far; too early to call.",
                    snapshot.name, snapshot.total_spins
                ),
            ));
        }

        let deviation = snapshot.rtp_deviation;
        let direction = match snapshot.trend {
            Trend::Up => "climbing",
            Trend::Down => "easing",
        };
        let (forecast, mood) = if deviation > self.band {
            ("hot", "paying above its theoretical return")
        } else if deviation < -self.band {
            ("cold", "paying below its theoretical return")
        } else {
            ("stable", "tracking its theoretical return")
        };

        Ok(Commentary::new(
            forecast,
            format!(
                "{} is {} ({:.2}% live vs {:.2}% theoretical) and {} over the last tick. \
                 Biggest hit so far: {:.1}x.",
                snapshot.name,
                mood,
                snapshot.live_rtp,
                snapshot.theoretical_rtp,
                direction,
                snapshot.max_multiplier
            ),
        ))
    }
}
