//! Summary statistics over posterior draws.
//!
//! - Sample mean and variance
//! - Type 2 quantiles of sorted draws (see [`compute_quantile_sorted`])
//! - Equal-tailed credible intervals

mod quantile;

pub use quantile::compute_quantile_sorted;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Arithmetic mean. Returns NaN for an empty slice and `+inf` if any draw is
/// `+inf`.
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased sample variance. Returns 0 for fewer than two samples and `+inf`
/// when the mean is not finite.
pub fn variance(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(samples);
    if !m.is_finite() {
        return f64::INFINITY;
    }
    samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64
}

/// Equal-tailed credible interval holding `mass` of the draws.
///
/// # Errors
///
/// `InvalidInput` for empty draws, `InvalidParameter` if `mass` is not in (0, 1).
pub fn credible_interval(samples: &[f64], mass: f64) -> Result<(f64, f64)> {
    if samples.is_empty() {
        return Err(Error::invalid_input("cannot summarize an empty sample set"));
    }
    if !(mass > 0.0 && mass < 1.0) {
        return Err(Error::invalid_parameter(
            "credible_mass",
            format!("must be in (0, 1), got {}", mass),
        ));
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let tail = (1.0 - mass) / 2.0;
    Ok((
        compute_quantile_sorted(&sorted, tail),
        compute_quantile_sorted(&sorted, 1.0 - tail),
    ))
}

/// Point summary of one posterior.
///
/// Heavy-tailed posteriors (e.g. a log-normal mean from a handful of
/// observations) can contain infinite draws; `mean`, `std_dev` and `upper`
/// are then `+inf` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Posterior mean.
    pub mean: f64,
    /// Posterior standard deviation.
    pub std_dev: f64,
    /// Lower bound of the credible interval.
    pub lower: f64,
    /// Upper bound of the credible interval.
    pub upper: f64,
    /// Probability mass of `[lower, upper]`.
    pub mass: f64,
}

impl Summary {
    /// Summarize draws with an equal-tailed interval of the given mass.
    pub fn from_samples(samples: &[f64], mass: f64) -> Result<Self> {
        let (lower, upper) = credible_interval(samples, mass)?;
        Ok(Self {
            mean: mean(samples),
            std_dev: variance(samples).sqrt(),
            lower,
            upper,
            mass,
        })
    }
}
