//! # bayes-ab
//!
//! Bayesian evaluation of A/B/C experiments by posterior sampling.
//!
//! Three conjugate models produce Monte Carlo draws of the quantity each
//! variant is judged on:
//! - **Binomial**: conversion rate, Beta prior
//! - **Gaussian**: mean of a continuous metric, Normal-Inverse-Gamma prior
//! - **Log-normal**: mean of a skewed positive metric such as spend
//!
//! plus a composite rate × magnitude model (revenue per session). The draws
//! are reduced to decision statistics:
//! - Probability that one variant beats another (or both others)
//! - Probability of a relative uplift above a threshold
//! - The uplift reached at a target confidence
//! - Expected loss of choosing a variant
//!
//! ## Quick Start
//!
//! ```
//! use bayes_ab::{compare_binomial, BinomialData, Config};
//!
//! let config = Config::new().seed(42);
//! let result = compare_binomial(
//!     BinomialData::new(100_000, 800),
//!     BinomialData::new(50_000, 300),
//!     &config,
//! )
//! .unwrap();
//!
//! assert!(result.probability_a_better > 0.95);
//! println!("{}", result);
//! ```
//!
//! ## Lower-level API
//!
//! The samplers take an explicit RNG and the evaluators take plain slices,
//! so they compose freely:
//!
//! ```
//! use bayes_ab::evaluation::{probability_greater, uplift_at_confidence};
//! use bayes_ab::posterior::{sample_log_normal, seeded_rng};
//! use bayes_ab::NormalInverseGammaPrior;
//!
//! let prior = NormalInverseGammaPrior::log_normal();
//! let a = sample_log_normal(&[52.0, 61.5, 48.0, 70.2], &prior, 5_000, &mut seeded_rng(7, 0))?;
//! let b = sample_log_normal(&[45.0, 50.5, 41.0, 66.0], &prior, 5_000, &mut seeded_rng(7, 1))?;
//!
//! let p = probability_greater(&a, &b)?;
//! let uplift = uplift_at_confidence(&a, &b, 0.5)?;
//! assert!((0.0..=1.0).contains(&p));
//! assert!(uplift.is_finite());
//! # Ok::<(), bayes_ab::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod types;

// Functional modules
pub mod comparison;
pub mod evaluation;
pub mod posterior;
pub mod statistics;

// Re-exports for public API
pub use comparison::{
    compare_binomial, compare_conversion_splits, compare_gaussian, compare_log_normal,
    compare_revenue_per_session, compare_revenue_per_session_three, compare_three, Comparison,
    Model, ThreeWayComparison, VariantPosterior,
};
pub use config::Config;
pub use constants::{
    DEFAULT_CREDIBLE_MASS, DEFAULT_SAMPLES, DEFAULT_SEED, DEFAULT_TARGET_PROBABILITY,
    DEFAULT_UPLIFT_THRESHOLD,
};
pub use error::{Error, Result};
pub use evaluation::UpliftSearch;
pub use statistics::Summary;
pub use types::{
    BetaPrior, BinomialData, GaussianPosterior, NormalInverseGammaPrior, PosteriorParams, Variant,
};
