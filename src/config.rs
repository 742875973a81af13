//! Configuration for posterior comparisons.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CREDIBLE_MASS, DEFAULT_SAMPLES, DEFAULT_SEED, DEFAULT_TARGET_PROBABILITY,
    DEFAULT_UPLIFT_THRESHOLD,
};
use crate::error::{Error, Result};
use crate::evaluation::UpliftSearch;
use crate::types::{BetaPrior, NormalInverseGammaPrior};

/// Configuration options for the `compare_*` functions.
///
/// Builder methods assert their arguments, so a bad literal fails loudly at
/// the call site. Configurations deserialized from elsewhere should go
/// through [`Config::validate`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Monte Carlo
    // =========================================================================

    /// Posterior draws per variant. Default: 10,000.
    pub samples: usize,

    /// Base seed; each variant samples from its own stream derived from it.
    ///
    /// Default: None (uses a fixed crate-wide seed, so results are still
    /// reproducible).
    pub seed: Option<u64>,

    // =========================================================================
    // Decision statistics
    // =========================================================================

    /// Relative uplift reported as `P((A − B)/B > uplift_threshold)`.
    /// Default: 0.05.
    pub uplift_threshold: f64,

    /// Target probability for the uplift-at-confidence search. Default: 0.95.
    pub target_probability: f64,

    /// Search interval for the uplift-at-confidence root. Default: [-1, 1],
    /// expanded up to 8 times.
    pub search: UpliftSearch,

    /// Mass of the credible intervals in variant summaries. Default: 0.95.
    pub credible_mass: f64,

    // =========================================================================
    // Priors
    // =========================================================================

    /// Beta prior for conversion rates. Default: uniform (1, 1).
    pub beta_prior: BetaPrior,

    /// Prior for the Gaussian model. Default: (0, 1, 1, 1).
    pub gaussian_prior: NormalInverseGammaPrior,

    /// Prior for the log-normal model (log scale). Default: (4, 1, 1, 1).
    pub log_normal_prior: NormalInverseGammaPrior,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: None,
            uplift_threshold: DEFAULT_UPLIFT_THRESHOLD,
            target_probability: DEFAULT_TARGET_PROBABILITY,
            search: UpliftSearch::default(),
            credible_mass: DEFAULT_CREDIBLE_MASS,
            beta_prior: BetaPrior::UNIFORM,
            gaussian_prior: NormalInverseGammaPrior::gaussian(),
            log_normal_prior: NormalInverseGammaPrior::log_normal(),
        }
    }
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fewer draws for interactive use (1,000 per variant).
    pub fn quick() -> Self {
        Self {
            samples: 1_000,
            ..Default::default()
        }
    }

    /// More draws for final reports (100,000 per variant).
    pub fn thorough() -> Self {
        Self {
            samples: 100_000,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the number of posterior draws per variant.
    pub fn samples(mut self, samples: usize) -> Self {
        assert!(samples > 0, "samples must be > 0");
        self.samples = samples;
        self
    }

    /// Set a deterministic base seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the uplift threshold.
    pub fn uplift_threshold(mut self, threshold: f64) -> Self {
        assert!(threshold.is_finite(), "uplift_threshold must be finite");
        self.uplift_threshold = threshold;
        self
    }

    /// Set the target probability for the uplift search.
    pub fn target_probability(mut self, probability: f64) -> Self {
        assert!(
            probability > 0.0 && probability < 1.0,
            "target_probability must be in (0, 1)"
        );
        self.target_probability = probability;
        self
    }

    /// Set the initial uplift search interval.
    pub fn search_interval(mut self, lower: f64, upper: f64) -> Self {
        assert!(
            lower.is_finite() && upper.is_finite() && lower < upper,
            "search_interval must satisfy lower < upper"
        );
        self.search.lower = lower;
        self.search.upper = upper;
        self
    }

    /// Set how many times the uplift search interval may be widened.
    pub fn max_bracket_expansions(mut self, expansions: u32) -> Self {
        self.search.max_expansions = expansions;
        self
    }

    /// Set the credible interval mass.
    pub fn credible_mass(mut self, mass: f64) -> Self {
        assert!(mass > 0.0 && mass < 1.0, "credible_mass must be in (0, 1)");
        self.credible_mass = mass;
        self
    }

    /// Set the Beta prior for conversion rates.
    pub fn beta_prior(mut self, prior: BetaPrior) -> Self {
        assert!(prior.validate().is_ok(), "beta_prior shapes must be > 0");
        self.beta_prior = prior;
        self
    }

    /// Set the Gaussian-model prior.
    pub fn gaussian_prior(mut self, prior: NormalInverseGammaPrior) -> Self {
        assert!(
            prior.validate().is_ok(),
            "gaussian_prior needs finite m0 and k0, s_sq0, v0 > 0"
        );
        self.gaussian_prior = prior;
        self
    }

    /// Set the log-normal-model prior.
    pub fn log_normal_prior(mut self, prior: NormalInverseGammaPrior) -> Self {
        assert!(
            prior.validate().is_ok(),
            "log_normal_prior needs finite m0 and k0, s_sq0, v0 > 0"
        );
        self.log_normal_prior = prior;
        self
    }

    // =========================================================================
    // Resolution methods
    // =========================================================================

    /// The configured seed, or the crate default.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Check the whole configuration.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(Error::invalid_parameter("samples", "must be > 0"));
        }
        if !self.uplift_threshold.is_finite() {
            return Err(Error::invalid_parameter(
                "uplift_threshold",
                "must be finite",
            ));
        }
        if !(self.target_probability > 0.0 && self.target_probability < 1.0) {
            return Err(Error::invalid_parameter(
                "target_probability",
                format!("must be in (0, 1), got {}", self.target_probability),
            ));
        }
        if !(self.credible_mass > 0.0 && self.credible_mass < 1.0) {
            return Err(Error::invalid_parameter(
                "credible_mass",
                format!("must be in (0, 1), got {}", self.credible_mass),
            ));
        }
        self.search.validate()?;
        self.beta_prior.validate()?;
        self.gaussian_prior.validate()?;
        self.log_normal_prior.validate()
    }
}
