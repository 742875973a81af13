//! Normal-Inverse-Gamma conjugate sampler for Gaussian data.
//!
//! ## Model
//!
//! x_i | μ, σ² ~ N(μ, σ²)
//!
//! ## Prior
//!
//! σ² ~ Inv-Gamma(v0/2, v0·s_sq0/2),  μ | σ² ~ N(m0, σ²/k0)
//!
//! ## Posterior
//!
//! σ² | x ~ Inv-Gamma(vN/2, vN·s_sqN/2),  μ | σ², x ~ N(mN, σ²/kN)
//!
//! The two are coupled: each mean draw is conditioned on the variance draw
//! at the same index. Drawing them as independent marginals would be wrong.

use rand::Rng;
use rand_distr::{Distribution, Gamma, StandardNormal};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{GaussianPosterior, NormalInverseGammaPrior};

use super::check_sample_count;

/// Draw `samples` joint (mean, variance) pairs from the posterior.
///
/// An empty `data` slice samples the prior itself.
///
/// # Errors
///
/// `InvalidParameter` for a malformed prior or `samples == 0`,
/// `InvalidInput` for non-finite observations.
pub fn sample_gaussian<R: Rng + ?Sized>(
    data: &[f64],
    prior: &NormalInverseGammaPrior,
    samples: usize,
    rng: &mut R,
) -> Result<GaussianPosterior> {
    check_sample_count(samples)?;
    let params = prior.update(data)?;

    debug!(
        n = data.len(),
        m_n = params.m_n,
        k_n = params.k_n,
        v_n = params.v_n,
        s_sq_n = params.s_sq_n,
        samples,
        "sampling Normal-Inverse-Gamma posterior"
    );

    // If G ~ Gamma(a, 1/b) then 1/G ~ Inv-Gamma(a, b)
    let precision = Gamma::new(params.variance_shape(), 1.0 / params.variance_scale())
        .map_err(|e| Error::invalid_parameter("gaussian_prior", e.to_string()))?;

    let mut means = Vec::with_capacity(samples);
    let mut variances = Vec::with_capacity(samples);

    for _ in 0..samples {
        let variance = 1.0 / precision.sample(&mut *rng);
        let z: f64 = StandardNormal.sample(&mut *rng);
        means.push(params.m_n + z * (variance / params.k_n).sqrt());
        variances.push(variance);
    }

    Ok(GaussianPosterior { means, variances })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posterior::seeded_rng;
    use crate::statistics::{mean, variance};
    use rand_distr::Normal;

    #[test]
    fn test_recovers_data_mean() {
        let mut rng = seeded_rng(11, 0);
        let normal = Normal::new(4.0, 1.0).unwrap();
        let data: Vec<f64> = (0..2_000).map(|_| normal.sample(&mut rng)).collect();

        let post = sample_gaussian(&data, &NormalInverseGammaPrior::gaussian(), 10_000, &mut rng)
            .unwrap();

        assert_eq!(post.len(), 10_000);
        assert!((mean(&post.means) - 4.0).abs() < 0.1, "mean {}", mean(&post.means));
        assert!(
            (mean(&post.variances) - 1.0).abs() < 0.1,
            "variance {}",
            mean(&post.variances)
        );
    }

    #[test]
    fn test_empty_data_samples_prior_variance() {
        // Inv-Gamma(v0/2, v0·s_sq0/2) has mean v0·s_sq0/(v0 − 2) for v0 > 2
        let prior = NormalInverseGammaPrior::new(1.0, 2.0, 2.0, 10.0).unwrap();
        let mut rng = seeded_rng(12, 0);
        let post = sample_gaussian(&[], &prior, 50_000, &mut rng).unwrap();

        let expected = 10.0 * 2.0 / 8.0;
        let got = mean(&post.variances);
        assert!((got - expected).abs() < 0.05, "got {}, expected {}", got, expected);
        assert!((mean(&post.means) - 1.0).abs() < 0.03);
    }

    #[test]
    fn test_mean_conditioned_on_variance() {
        // Conditional sampling: large variance draws produce wider mean spread.
        let prior = NormalInverseGammaPrior::new(0.0, 1.0, 1.0, 3.0).unwrap();
        let mut rng = seeded_rng(13, 0);
        let post = sample_gaussian(&[], &prior, 40_000, &mut rng).unwrap();

        let mut pairs: Vec<(f64, f64)> =
            post.variances.iter().copied().zip(post.means.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (low, high) = pairs.split_at(pairs.len() / 2);
        let low_means: Vec<f64> = low.iter().map(|p| p.1).collect();
        let high_means: Vec<f64> = high.iter().map(|p| p.1).collect();

        assert!(variance(&high_means) > 2.0 * variance(&low_means));
    }

    #[test]
    fn test_single_observation() {
        let mut rng = seeded_rng(14, 0);
        let post = sample_gaussian(&[3.0], &NormalInverseGammaPrior::gaussian(), 100, &mut rng)
            .unwrap();
        assert_eq!(post.means.len(), 100);
        assert!(post.variances.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn test_rejects_nan() {
        let mut rng = seeded_rng(15, 0);
        let prior = NormalInverseGammaPrior::gaussian();
        let err = sample_gaussian(&[1.0, f64::NAN], &prior, 10, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
