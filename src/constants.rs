//! Default values shared by the samplers, evaluators and configuration.

/// Default deterministic seed for RNG operations.
///
/// Same seed + same observations = same posterior draws.
/// The value `0x61625F74657374` is "ab_test" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x61625F74657374;

/// Default number of Monte Carlo draws per posterior.
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Default relative uplift threshold for `P((A - B) / B > threshold)`.
pub const DEFAULT_UPLIFT_THRESHOLD: f64 = 0.05;

/// Default target probability for the uplift-at-confidence search.
pub const DEFAULT_TARGET_PROBABILITY: f64 = 0.95;

/// Default probability mass of reported credible intervals.
pub const DEFAULT_CREDIBLE_MASS: f64 = 0.95;

// =============================================================================
// Uplift root search
// =============================================================================

/// Default lower end of the uplift search interval.
pub const DEFAULT_SEARCH_LOWER: f64 = -1.0;

/// Default upper end of the uplift search interval.
pub const DEFAULT_SEARCH_UPPER: f64 = 1.0;

/// Default number of times the search interval may be widened before giving up.
pub const DEFAULT_MAX_BRACKET_EXPANSIONS: u32 = 8;

/// Bisection stops once the bracket is narrower than this.
pub const SEARCH_TOLERANCE: f64 = 1e-10;

/// Hard cap on bisection steps.
pub const MAX_BISECTION_STEPS: u32 = 200;

// =============================================================================
// Prior defaults
// =============================================================================

/// Prior mean of the Gaussian model.
pub const GAUSSIAN_PRIOR_MEAN: f64 = 0.0;

/// Prior mean (on the log scale) of the log-normal model.
///
/// `exp(4) ≈ 55`, a typical order of magnitude for spend.
pub const LOG_NORMAL_PRIOR_MEAN: f64 = 4.0;
