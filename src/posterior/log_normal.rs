//! Posterior of the mean of log-normally distributed data.
//!
//! If X ~ LogN(μ, σ²) then ln X ~ N(μ, σ²) and E[X] = exp(μ + σ²/2).
//! We sample (μ, σ²) jointly from the Gaussian posterior of ln X and map
//! each pair through that identity.

use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{GaussianPosterior, NormalInverseGammaPrior};

use super::gaussian::sample_gaussian;

/// Draw `samples` values of the log-normal mean `exp(μ + σ²/2)`.
///
/// `data` must be non-empty and strictly positive; zeros are the caller's to
/// filter (see [`split_conversions`](super::split_conversions)).
///
/// # Errors
///
/// `InvalidInput` for empty data or any non-positive / non-finite value,
/// `InvalidParameter` for a malformed prior or `samples == 0`.
pub fn sample_log_normal<R: Rng + ?Sized>(
    data: &[f64],
    prior: &NormalInverseGammaPrior,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(Error::invalid_input(
            "log-normal model needs at least one observation",
        ));
    }
    if let Some(idx) = data.iter().position(|x| !(x.is_finite() && *x > 0.0)) {
        return Err(Error::invalid_input(format!(
            "log-normal observation at index {} must be finite and > 0, got {}",
            idx, data[idx]
        )));
    }

    let log_data: Vec<f64> = data.iter().map(|x| x.ln()).collect();
    debug!(n = data.len(), "sampling log-normal mean via log-space posterior");

    let posterior = sample_gaussian(&log_data, prior, samples, rng)?;
    Ok(log_normal_means(&posterior))
}

/// Map joint (μ, σ²) draws to log-normal means `exp(μ + σ²/2)`.
pub fn log_normal_means(posterior: &GaussianPosterior) -> Vec<f64> {
    posterior
        .means
        .iter()
        .zip(&posterior.variances)
        .map(|(mu, sigma_sq)| (mu + sigma_sq / 2.0).exp())
        .collect()
}
