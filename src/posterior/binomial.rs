//! Beta-Binomial conjugate sampler.
//!
//! With `k` successes out of `n` trials and a Beta(α, β) prior, the success
//! rate posterior is exactly Beta(k + α, n − k + β).

use rand::Rng;
use rand_distr::{Beta, Distribution};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{BetaPrior, BinomialData};

use super::check_sample_count;

/// Draw `samples` success rates from the Beta posterior.
///
/// # Errors
///
/// `InvalidParameter` if `successes > trials`, the prior has a non-positive
/// shape, or `samples == 0`.
pub fn sample_binomial<R: Rng + ?Sized>(
    data: BinomialData,
    prior: &BetaPrior,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    check_sample_count(samples)?;
    let (alpha_post, beta_post) = prior.posterior(data)?;

    debug!(
        trials = data.trials,
        successes = data.successes,
        alpha_post,
        beta_post,
        samples,
        "sampling Beta posterior"
    );

    let dist = Beta::new(alpha_post, beta_post)
        .map_err(|e| Error::invalid_parameter("beta_prior", e.to_string()))?;

    Ok((0..samples).map(|_| dist.sample(&mut *rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posterior::seeded_rng;
    use crate::statistics::mean;

    #[test]
    fn test_mean_converges_to_laplace_estimate() {
        let mut rng = seeded_rng(1, 0);
        let draws = sample_binomial(
            BinomialData::new(200, 30),
            &BetaPrior::UNIFORM,
            20_000,
            &mut rng,
        )
        .unwrap();
        let expected = 31.0 / 202.0;
        // Posterior sd ≈ 0.025; MC error of the mean ≈ 0.025 / sqrt(20000)
        assert!(
            (mean(&draws) - expected).abs() < 0.002,
            "mean {} vs expected {}",
            mean(&draws),
            expected
        );
    }

    #[test]
    fn test_draws_in_unit_interval() {
        let mut rng = seeded_rng(2, 0);
        let draws =
            sample_binomial(BinomialData::new(10, 0), &BetaPrior::UNIFORM, 1_000, &mut rng)
                .unwrap();
        assert_eq!(draws.len(), 1_000);
        assert!(draws.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_zero_trials_samples_prior() {
        let mut rng = seeded_rng(3, 0);
        let draws =
            sample_binomial(BinomialData::new(0, 0), &BetaPrior::UNIFORM, 20_000, &mut rng)
                .unwrap();
        assert!((mean(&draws) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_successes_above_trials_rejected() {
        let mut rng = seeded_rng(4, 0);
        let err = sample_binomial(BinomialData::new(5, 6), &BetaPrior::UNIFORM, 10, &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_bad_prior_rejected() {
        let mut rng = seeded_rng(5, 0);
        let prior = BetaPrior { alpha: 0.0, beta: 1.0 };
        assert!(sample_binomial(BinomialData::new(5, 2), &prior, 10, &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let data = BinomialData::new(1000, 120);
        let a = sample_binomial(data, &BetaPrior::UNIFORM, 50, &mut seeded_rng(9, 0)).unwrap();
        let b = sample_binomial(data, &BetaPrior::UNIFORM, 50, &mut seeded_rng(9, 0)).unwrap();
        assert_eq!(a, b);
    }
}
