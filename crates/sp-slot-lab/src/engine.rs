//! Outcome Simulator — Core spin sampling
//!
//! A spin hits with probability `hit_freq`. A hit pays `stake × M` where
//! `M = exp(μ + σZ)`, `Z ~ N(0, 1)` and `μ = ln(m) − σ²/2` with
//! `m = rtp / 100 / hit_freq`. That puts `E[M | hit] = m`, so the expected
//! return per unit staked is exactly `rtp / 100`. The tail is unbounded.

use std::f64::consts::TAU;

use rand::Rng;

use sp_core::{SimError, SimResult};

use crate::catalog::SlotConfig;
use crate::spin::SpinResult;

/// Reject stakes the simulator cannot price
pub fn validate_stake(stake: f64) -> SimResult<()> {
    if stake.is_finite() && stake > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("stake must be > 0, got {}", stake)))
    }
}

/// Simulate a single spin
pub fn simulate_spin<R: Rng + ?Sized>(
    config: &SlotConfig,
    stake: f64,
    rng: &mut R,
) -> SimResult<SpinResult> {
    config.validate()?;
    validate_stake(stake)?;
    Ok(spin_unchecked(config, stake, rng))
}

/// Simulate `count` independent spins, returned in draw order
pub fn simulate_batch<R: Rng + ?Sized>(
    config: &SlotConfig,
    count: usize,
    stake: f64,
    rng: &mut R,
) -> SimResult<Vec<SpinResult>> {
    if count == 0 {
        return Err(SimError::EmptyBatch);
    }
    config.validate()?;
    validate_stake(stake)?;
    Ok((0..count)
        .map(|_| spin_unchecked(config, stake, rng))
        .collect())
}

/// Draw one spin without re-validating; callers validate once up front
pub(crate) fn spin_unchecked<R: Rng + ?Sized>(
    config: &SlotConfig,
    stake: f64,
    rng: &mut R,
) -> SpinResult {
    debug_assert!(stake > 0.0, "stake must be positive");
    debug_assert!(config.hit_freq > 0.0 && config.hit_freq <= 1.0);
    debug_assert!(config.rtp > 0.0 && config.rtp < 100.0);

    let roll: f64 = rng.random();
    if roll >= config.hit_freq {
        return SpinResult::miss(stake);
    }

    let multiplier = sample_hit_multiplier(config.mean_hit_multiplier(), config.volatility, rng);
    SpinResult::new(stake, stake * multiplier)
}

/// Log-normal draw with the given mean and shape σ
pub fn sample_hit_multiplier<R: Rng + ?Sized>(mean: f64, sigma: f64, rng: &mut R) -> f64 {
    if sigma <= 0.0 {
        return mean;
    }
    let mu = mean.ln() - 0.5 * sigma * sigma;
    (mu + sigma * standard_normal(rng)).exp()
}

/// Box–Muller transform; one normal per call
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] keeps ln finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
