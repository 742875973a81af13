//! Relative uplift `(A − B) / B` and the uplift reached at a target confidence.
//!
//! `P(uplift > x)` is a non-increasing step function of `x`. The
//! uplift-at-confidence search finds where it crosses the target by
//! bisection. The draws are sorted once so every evaluation of the step
//! function is a binary search.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_MAX_BRACKET_EXPANSIONS, DEFAULT_SEARCH_LOWER, DEFAULT_SEARCH_UPPER,
    MAX_BISECTION_STEPS, SEARCH_TOLERANCE,
};
use crate::error::{Error, Result};

use super::check_aligned;

/// P((A − B)/B > threshold): fraction of draws whose relative uplift exceeds
/// `threshold`.
///
/// # Errors
///
/// `DivisionByZero` if any `b[i] == 0`; `InvalidInput` for misaligned sets.
pub fn probability_of_uplift(a: &[f64], b: &[f64], threshold: f64) -> Result<f64> {
    let ratios = uplift_ratios(a, b)?;
    let above = ratios.iter().filter(|r| **r > threshold).count();
    Ok(above as f64 / ratios.len() as f64)
}

/// Search interval for [`uplift_at_confidence_in`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpliftSearch {
    /// Initial lower end.
    pub lower: f64,
    /// Initial upper end.
    pub upper: f64,
    /// How many times each failing end may be pushed outward (doubling the
    /// interval width each time). Zero means the interval is used as given.
    pub max_expansions: u32,
}

impl Default for UpliftSearch {
    fn default() -> Self {
        Self {
            lower: DEFAULT_SEARCH_LOWER,
            upper: DEFAULT_SEARCH_UPPER,
            max_expansions: DEFAULT_MAX_BRACKET_EXPANSIONS,
        }
    }
}

impl UpliftSearch {
    /// Fixed interval, no expansion.
    pub fn fixed(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            max_expansions: 0,
        }
    }

    /// Check `lower < upper`, both finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper) {
            return Err(Error::invalid_parameter(
                "search_interval",
                format!(
                    "need finite lower < upper, got [{}, {}]",
                    self.lower, self.upper
                ),
            ));
        }
        Ok(())
    }
}

/// Uplift `x` with `P((A − B)/B > x) = target`, searching from `[-1, 1]`.
///
/// `uplift_at_confidence(a, b, 0.95)` answers "with 95% probability, A is at
/// least x better than B".
pub fn uplift_at_confidence(a: &[f64], b: &[f64], target: f64) -> Result<f64> {
    uplift_at_confidence_in(a, b, target, &UpliftSearch::default())
}

/// Uplift `x` with `P((A − B)/B > x) = target` within a configurable search.
///
/// # Errors
///
/// - `InvalidParameter` if `target` is not in (0, 1) or the interval is malformed
/// - `DivisionByZero` if any `b[i] == 0`
/// - `NoRootInInterval` if the target is not bracketed after all expansions
pub fn uplift_at_confidence_in(
    a: &[f64],
    b: &[f64],
    target: f64,
    search: &UpliftSearch,
) -> Result<f64> {
    if !(target > 0.0 && target < 1.0) {
        return Err(Error::invalid_parameter(
            "target_probability",
            format!("must be in (0, 1), got {}", target),
        ));
    }
    search.validate()?;

    let mut ratios = uplift_ratios(a, b)?;
    ratios.sort_by(|x, y| x.total_cmp(y));
    let f = |x: f64| exceedance(&ratios, x) - target;

    let (mut lower, mut upper) = (search.lower, search.upper);
    let (mut f_lower, mut f_upper) = (f(lower), f(upper));

    let mut expansions = 0;
    while (f_lower < 0.0 || f_upper > 0.0) && expansions < search.max_expansions {
        let width = upper - lower;
        if f_lower < 0.0 {
            lower -= width;
            f_lower = f(lower);
        }
        if f_upper > 0.0 {
            upper += width;
            f_upper = f(upper);
        }
        expansions += 1;
        warn!(
            lower,
            upper, expansions, target, "expanded uplift search interval"
        );
    }

    if f_lower < 0.0 || f_upper > 0.0 {
        return Err(Error::NoRootInInterval {
            lower,
            upper,
            target,
            f_lower,
            f_upper,
        });
    }
    if f_lower == 0.0 {
        return Ok(lower);
    }
    if f_upper == 0.0 {
        return Ok(upper);
    }

    // Invariant: f(lower) > 0 > f(upper)
    let mut steps = 0;
    while upper - lower > SEARCH_TOLERANCE && steps < MAX_BISECTION_STEPS {
        let mid = lower + (upper - lower) / 2.0;
        let f_mid = f(mid);
        if f_mid == 0.0 {
            lower = mid;
            upper = mid;
            break;
        }
        if f_mid > 0.0 {
            lower = mid;
        } else {
            upper = mid;
        }
        steps += 1;
    }

    let root = lower + (upper - lower) / 2.0;
    debug!(root, target, steps, "uplift search converged");
    Ok(root)
}

/// Relative uplift per draw, rejecting zero denominators.
fn uplift_ratios(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_aligned(&[a, b])?;
    if let Some(index) = b.iter().position(|y| *y == 0.0) {
        return Err(Error::DivisionByZero { index });
    }
    Ok(a.iter().zip(b).map(|(x, y)| relative_uplift(*x, *y)).collect())
}

/// `(x - y) / y`, taking the limit of `x / y - 1` when `y` is infinite.
fn relative_uplift(x: f64, y: f64) -> f64 {
    if x == y {
        0.0
    } else if y.is_infinite() {
        if x.is_infinite() {
            -2.0
        } else {
            -1.0
        }
    } else {
        (x - y) / y
    }
}

/// Fraction of sorted ratios strictly above `x`.
fn exceedance(sorted: &[f64], x: f64) -> f64 {
    let at_or_below = sorted.partition_point(|r| *r <= x);
    (sorted.len() - at_or_below) as f64 / sorted.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_of_uplift() {
        let b = [1.0, 1.0, 1.0, 1.0];
        let a = [1.0, 1.04, 1.06, 1.2];
        assert_eq!(probability_of_uplift(&a, &b, 0.05).unwrap(), 0.5);
        assert_eq!(probability_of_uplift(&a, &b, -0.5).unwrap(), 1.0);
        assert_eq!(probability_of_uplift(&a, &b, 0.5).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_denominator() {
        let err = probability_of_uplift(&[1.0, 2.0], &[1.0, 0.0], 0.0).unwrap_err();
        assert_eq!(err, Error::DivisionByZero { index: 1 });
    }

    #[test]
    fn test_relative_uplift_with_infinities() {
        let inf = f64::INFINITY;
        assert_eq!(relative_uplift(inf, inf), 0.0);
        assert_eq!(relative_uplift(3.0, inf), -1.0);
        assert_eq!(relative_uplift(inf, 2.0), inf);
        assert_eq!(relative_uplift(-inf, inf), -2.0);
        assert_eq!(relative_uplift(3.0, 2.0), 0.5);
    }

    #[test]
    fn test_uplift_search_with_infinite_draws() {
        let a = [1.1, 1.2, f64::INFINITY, 1.3];
        let b = [1.0, 1.0, 1.0, f64::INFINITY];
        assert_eq!(probability_of_uplift(&a, &b, 0.5).unwrap(), 0.25);
        let x = uplift_at_confidence(&a, &b, 0.5).unwrap();
        assert!(x.is_finite());
    }

    #[test]
    fn test_exceedance_matches_linear_count() {
        let sorted = [-0.5, 0.0, 0.0, 0.1, 0.3];
        assert_eq!(exceedance(&sorted, 0.0), 0.4);
        assert_eq!(exceedance(&sorted, -1.0), 1.0);
        assert_eq!(exceedance(&sorted, 0.3), 0.0);
    }

    #[test]
    fn test_median_uplift() {
        // Ratios are 0.00, 0.01, ..., 0.99; P(r > x) = 0.5 between 0.49 and 0.50.
        let b = vec![1.0; 100];
        let a: Vec<f64> = (0..100).map(|i| 1.0 + i as f64 / 100.0).collect();
        let x = uplift_at_confidence(&a, &b, 0.5).unwrap();
        assert!((0.49..=0.50).contains(&x), "x = {}", x);
        let p = probability_of_uplift(&a, &b, x).unwrap();
        assert!((p - 0.5).abs() < 0.011);
    }

    #[test]
    fn test_result_decreases_with_confidence() {
        let b = vec![1.0; 200];
        let a: Vec<f64> = (0..200).map(|i| 0.9 + i as f64 / 1000.0).collect();
        let loose = uplift_at_confidence(&a, &b, 0.5).unwrap();
        let strict = uplift_at_confidence(&a, &b, 0.95).unwrap();
        assert!(strict < loose);
    }

    #[test]
    fn test_fixed_interval_without_root() {
        // Every ratio is 3.0, so P(r > x) = 1 for all x in [-1, 1].
        let a = vec![4.0; 10];
        let b = vec![1.0; 10];
        let err = uplift_at_confidence_in(&a, &b, 0.95, &UpliftSearch::fixed(-1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, Error::NoRootInInterval { .. }));
    }

    #[test]
    fn test_expansion_finds_root_outside_default() {
        let a = vec![4.0; 10];
        let b = vec![1.0; 10];
        let x = uplift_at_confidence(&a, &b, 0.95).unwrap();
        assert!((x - 3.0).abs() < 1e-6, "x = {}", x);
    }

    #[test]
    fn test_rejects_bad_target_and_interval() {
        let a = [1.0, 2.0];
        let b = [1.0, 1.0];
        assert!(uplift_at_confidence(&a, &b, 1.0).is_err());
        assert!(uplift_at_confidence(&a, &b, 0.0).is_err());
        assert!(uplift_at_confidence_in(&a, &b, 0.5, &UpliftSearch::fixed(1.0, -1.0)).is_err());
    }
}
