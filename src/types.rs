//! Prior hyperparameters, observation records and posterior sample types.

use serde::{Deserialize, Serialize};

use crate::constants::{GAUSSIAN_PRIOR_MEAN, LOG_NORMAL_PRIOR_MEAN};
use crate::error::{Error, Result};

/// Experiment arm identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// First arm (usually the challenger).
    A,
    /// Second arm (usually the control).
    B,
    /// Optional third arm.
    C,
}

impl Variant {
    /// RNG stream index used when deriving per-variant seeds.
    pub fn stream(self) -> u64 {
        match self {
            Variant::A => 0,
            Variant::B => 1,
            Variant::C => 2,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variant::A => "A",
            Variant::B => "B",
            Variant::C => "C",
        };
        f.write_str(name)
    }
}

/// Trials/successes counts for one Binomial arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinomialData {
    /// Number of trials `n`.
    pub trials: u64,
    /// Number of successes `k`, at most `trials`.
    pub successes: u64,
}

impl BinomialData {
    /// Create a counts record. Validation happens when it is sampled.
    pub fn new(trials: u64, successes: u64) -> Self {
        Self { trials, successes }
    }

    /// Check that `successes <= trials`.
    pub fn validate(&self) -> Result<()> {
        if self.successes > self.trials {
            return Err(Error::invalid_parameter(
                "successes",
                format!("k = {} exceeds n = {}", self.successes, self.trials),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Beta prior (Binomial model)
// =============================================================================

/// Beta(alpha, beta) prior on a success rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPrior {
    /// Prior pseudo-count of successes.
    pub alpha: f64,
    /// Prior pseudo-count of failures.
    pub beta: f64,
}

impl BetaPrior {
    /// Uniform prior on [0, 1].
    pub const UNIFORM: BetaPrior = BetaPrior {
        alpha: 1.0,
        beta: 1.0,
    };

    /// Create a validated prior.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        let prior = Self { alpha, beta };
        prior.validate()?;
        Ok(prior)
    }

    /// Both shape parameters must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        check_positive("alpha", self.alpha)?;
        check_positive("beta", self.beta)
    }

    /// Posterior shape parameters `(k + alpha, n - k + beta)`.
    pub fn posterior(&self, data: BinomialData) -> Result<(f64, f64)> {
        self.validate()?;
        data.validate()?;
        let failures = data.trials - data.successes;
        Ok((
            data.successes as f64 + self.alpha,
            failures as f64 + self.beta,
        ))
    }
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self::UNIFORM
    }
}

// =============================================================================
// Normal-Inverse-Gamma prior (Gaussian and log-normal models)
// =============================================================================

/// Normal-Inverse-Gamma prior on the (mean, variance) of a Gaussian.
///
/// ```text
/// σ² ~ Inv-χ²(v0, s_sq0)
/// μ | σ² ~ N(m0, σ² / k0)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalInverseGammaPrior {
    /// Prior mean.
    pub m0: f64,
    /// Confidence in `m0`, in equivalent observations.
    pub k0: f64,
    /// Prior variance scale.
    pub s_sq0: f64,
    /// Prior degrees of freedom of the variance.
    pub v0: f64,
}

impl NormalInverseGammaPrior {
    /// Create a validated prior.
    pub fn new(m0: f64, k0: f64, s_sq0: f64, v0: f64) -> Result<Self> {
        let prior = Self { m0, k0, s_sq0, v0 };
        prior.validate()?;
        Ok(prior)
    }

    /// Default prior for raw continuous metrics: `(0, 1, 1, 1)`.
    pub fn gaussian() -> Self {
        Self {
            m0: GAUSSIAN_PRIOR_MEAN,
            k0: 1.0,
            s_sq0: 1.0,
            v0: 1.0,
        }
    }

    /// Default prior for log-transformed spend: `(4, 1, 1, 1)`.
    pub fn log_normal() -> Self {
        Self {
            m0: LOG_NORMAL_PRIOR_MEAN,
            ..Self::gaussian()
        }
    }

    /// `m0` must be finite; `k0`, `s_sq0` and `v0` finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if !self.m0.is_finite() {
            return Err(Error::invalid_parameter(
                "m0",
                format!("must be finite, got {}", self.m0),
            ));
        }
        check_positive("k0", self.k0)?;
        check_positive("s_sq0", self.s_sq0)?;
        check_positive("v0", self.v0)
    }

    /// Conjugate update with Gaussian observations (Gelman et al., BDA §3.3).
    ///
    /// An empty slice returns the prior itself.
    pub fn update(&self, data: &[f64]) -> Result<PosteriorParams> {
        self.validate()?;
        if let Some(idx) = data.iter().position(|x| !x.is_finite()) {
            return Err(Error::invalid_input(format!(
                "observation at index {} is not finite ({})",
                idx, data[idx]
            )));
        }

        let n = data.len() as f64;
        let (data_mean, sum_sq_dev) = if data.is_empty() {
            (0.0, 0.0)
        } else {
            let mean = data.iter().sum::<f64>() / n;
            let ss = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
            (mean, ss)
        };

        let k_n = self.k0 + n;
        let m_n = (self.k0 * self.m0 + n * data_mean) / k_n;
        let v_n = self.v0 + n;
        let shift = self.m0 - data_mean;
        let v_n_s_sq_n = self.v0 * self.s_sq0 + sum_sq_dev + n * self.k0 * shift * shift / k_n;

        Ok(PosteriorParams {
            m_n,
            k_n,
            v_n,
            s_sq_n: v_n_s_sq_n / v_n,
        })
    }
}

impl Default for NormalInverseGammaPrior {
    fn default() -> Self {
        Self::gaussian()
    }
}

/// Normal-Inverse-Gamma posterior hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosteriorParams {
    /// Posterior mean `mN`.
    pub m_n: f64,
    /// Posterior confidence `kN = k0 + N`.
    pub k_n: f64,
    /// Posterior degrees of freedom `vN = v0 + N`.
    pub v_n: f64,
    /// Posterior variance scale `s_sqN`.
    pub s_sq_n: f64,
}

impl PosteriorParams {
    /// Shape of the Inverse-Gamma on σ²: `vN / 2`.
    pub fn variance_shape(&self) -> f64 {
        self.v_n / 2.0
    }

    /// Scale of the Inverse-Gamma on σ²: `vN · s_sqN / 2`.
    pub fn variance_scale(&self) -> f64 {
        self.v_n * self.s_sq_n / 2.0
    }
}

/// Joint (mean, variance) posterior draws, index-aligned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GaussianPosterior {
    /// Mean draws; `means[i]` was drawn conditionally on `variances[i]`.
    pub means: Vec<f64>,
    /// Variance draws.
    pub variances: Vec<f64>,
}

impl GaussianPosterior {
    /// Number of joint draws.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// True if no draws were taken.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            format!("must be finite and > 0, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beta_posterior_shapes() {
        let (a, b) = BetaPrior::UNIFORM
            .posterior(BinomialData::new(100, 8))
            .unwrap();
        assert_eq!(a, 9.0);
        assert_eq!(b, 93.0);
    }

    #[test]
    fn test_beta_posterior_rejects_k_above_n() {
        let err = BetaPrior::UNIFORM
            .posterior(BinomialData::new(3, 5))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "successes", .. }));
    }

    #[test]
    fn test_beta_prior_rejects_non_positive() {
        assert!(BetaPrior::new(0.0, 1.0).is_err());
        assert!(BetaPrior::new(1.0, -2.0).is_err());
        assert!(BetaPrior::new(f64::NAN, 1.0).is_err());
        assert!(BetaPrior::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_nig_defaults() {
        assert_eq!(NormalInverseGammaPrior::gaussian().m0, 0.0);
        assert_eq!(NormalInverseGammaPrior::log_normal().m0, 4.0);
        assert_eq!(NormalInverseGammaPrior::log_normal().k0, 1.0);
        assert_eq!(NormalInverseGammaPrior::default(), NormalInverseGammaPrior::gaussian());
    }

    #[test]
    fn test_update_empty_returns_prior() {
        let prior = NormalInverseGammaPrior::new(2.0, 3.0, 0.5, 4.0).unwrap();
        let post = prior.update(&[]).unwrap();
        assert_eq!(post.m_n, 2.0);
        assert_eq!(post.k_n, 3.0);
        assert_eq!(post.v_n, 4.0);
        assert!((post.s_sq_n - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_matches_hand_computation() {
        // data = [1, 3]: mean 2, SS 2
        // kN = 1 + 2 = 3, mN = (0 + 2*2) / 3 = 4/3
        // vN = 3, vN s_sqN = 1 + 2 + 2*1*(0-2)^2/3 = 17/3
        let prior = NormalInverseGammaPrior::gaussian();
        let post = prior.update(&[1.0, 3.0]).unwrap();
        assert!((post.k_n - 3.0).abs() < 1e-12);
        assert!((post.m_n - 4.0 / 3.0).abs() < 1e-12);
        assert!((post.v_n - 3.0).abs() < 1e-12);
        assert!((post.v_n * post.s_sq_n - 17.0 / 3.0).abs() < 1e-12);
        assert!((post.variance_scale() - 17.0 / 6.0).abs() < 1e-12);
        assert!((post.variance_shape() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_rejects_non_finite() {
        let err = NormalInverseGammaPrior::gaussian()
            .update(&[1.0, f64::INFINITY])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_variant_streams_distinct() {
        assert_ne!(Variant::A.stream(), Variant::B.stream());
        assert_ne!(Variant::B.stream(), Variant::C.stream());
        assert_eq!(Variant::C.to_string(), "C");
    }
}
