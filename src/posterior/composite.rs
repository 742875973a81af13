//! Rate × magnitude composite model (e.g. revenue per session).
//!
//! revenue/session = P(convert) · E[spend | convert]
//!
//! The conversion rate comes from the Beta-Binomial sampler and the spend
//! from the log-normal sampler. Their elementwise product is a valid draw of
//! the product metric only if the two posteriors are independent: a variant
//! that changes who converts usually also changes how much they spend, and
//! that dependence is not modeled here.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{BetaPrior, BinomialData, NormalInverseGammaPrior};

use super::binomial::sample_binomial;
use super::log_normal::sample_log_normal;

/// Raw per-session values split into conversion counts and positive magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSplit {
    /// Sessions and converting sessions.
    pub counts: BinomialData,
    /// The strictly positive values, in input order.
    pub magnitudes: Vec<f64>,
}

/// Split raw per-session values (zeros for non-converting sessions).
///
/// Every entry counts as a trial; entries `> 0` count as successes and are
/// kept as magnitudes.
///
/// # Errors
///
/// `InvalidInput` for negative or non-finite values.
pub fn split_conversions(raw: &[f64]) -> Result<ConversionSplit> {
    if let Some(idx) = raw.iter().position(|x| !(x.is_finite() && *x >= 0.0)) {
        return Err(Error::invalid_input(format!(
            "session value at index {} must be finite and >= 0, got {}",
            idx, raw[idx]
        )));
    }
    let magnitudes: Vec<f64> = raw.iter().copied().filter(|x| *x > 0.0).collect();
    Ok(ConversionSplit {
        counts: BinomialData::new(raw.len() as u64, magnitudes.len() as u64),
        magnitudes,
    })
}

/// Elementwise product of two equal-length sample sets.
pub fn compose(rates: &[f64], magnitudes: &[f64]) -> Result<Vec<f64>> {
    if rates.len() != magnitudes.len() {
        return Err(Error::invalid_input(format!(
            "sample sets differ in length: {} vs {}",
            rates.len(),
            magnitudes.len()
        )));
    }
    Ok(rates.iter().zip(magnitudes).map(|(r, m)| r * m).collect())
}

/// Posterior draws of the composite metric, with its two factors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositePosterior {
    /// Product draws `rates[i] * magnitudes[i]`.
    pub products: Vec<f64>,
    /// Conversion rate draws.
    pub rates: Vec<f64>,
    /// Log-normal mean draws of the magnitude.
    pub magnitudes: Vec<f64>,
}

/// Sample rate × magnitude.
///
/// `magnitudes` must already be restricted to the converting trials and be
/// strictly positive; its length is not checked against `data.successes`.
pub fn sample_rate_times_magnitude<R: Rng + ?Sized>(
    data: BinomialData,
    magnitudes: &[f64],
    beta_prior: &BetaPrior,
    magnitude_prior: &NormalInverseGammaPrior,
    samples: usize,
    rng: &mut R,
) -> Result<CompositePosterior> {
    let rates = sample_binomial(data, beta_prior, samples, rng)?;
    let magnitude_draws = sample_log_normal(magnitudes, magnitude_prior, samples, rng)?;
    let products = compose(&rates, &magnitude_draws)?;

    debug!(
        trials = data.trials,
        successes = data.successes,
        n_magnitudes = magnitudes.len(),
        "composed rate x magnitude posterior"
    );

    Ok(CompositePosterior {
        products,
        rates,
        magnitudes: magnitude_draws,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posterior::seeded_rng;
    use crate::statistics::mean;

    #[test]
    fn test_split_counts_zeros_as_trials() {
        let split = split_conversions(&[0.0, 12.5, 0.0, 0.0, 3.0]).unwrap();
        assert_eq!(split.counts, BinomialData::new(5, 2));
        assert_eq!(split.magnitudes, vec![12.5, 3.0]);
    }

    #[test]
    fn test_split_rejects_negative() {
        assert!(split_conversions(&[1.0, -0.5]).is_err());
        assert!(split_conversions(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_compose_length_mismatch() {
        assert!(compose(&[1.0, 2.0], &[1.0]).is_err());
        assert_eq!(compose(&[0.5, 2.0], &[4.0, 3.0]).unwrap(), vec![2.0, 6.0]);
    }

    #[test]
    fn test_product_mean_is_product_of_means() {
        let mut rng = seeded_rng(31, 0);
        let magnitudes: Vec<f64> = (1..=400).map(|i| 20.0 + (i % 40) as f64).collect();
        let post = sample_rate_times_magnitude(
            BinomialData::new(10_000, 400),
            &magnitudes,
            &BetaPrior::UNIFORM,
            &NormalInverseGammaPrior::log_normal(),
            20_000,
            &mut rng,
        )
        .unwrap();

        assert_eq!(post.products.len(), 20_000);
        let expected = mean(&post.rates) * mean(&post.magnitudes);
        let got = mean(&post.products);
        assert!((got - expected).abs() / expected < 0.01, "got {}, expected {}", got, expected);
    }

    #[test]
    fn test_composite_requires_positive_magnitudes() {
        let mut rng = seeded_rng(32, 0);
        let err = sample_rate_times_magnitude(
            BinomialData::new(10, 2),
            &[5.0, 0.0],
            &BetaPrior::UNIFORM,
            &NormalInverseGammaPrior::log_normal(),
            10,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
