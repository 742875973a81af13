//! Monte Carlo decision statistics over posterior draws.
//!
//! Every estimator takes plain equal-length `&[f64]` slices and does not care
//! which sampler produced them. Draws may be infinite (a heavy-tailed
//! posterior can overflow) but never NaN. Index `i` of each slice is one independent
//! joint draw; the variants are assumed independent, not paired measurements.
//!
//! 1. **Dominance** ([`probability`]): P(A > B), P(A beats B and C), P(best)
//! 2. **Uplift** ([`uplift`]): P((A − B)/B > x) and the x reaching a target confidence
//! 3. **Loss** ([`loss`]): expected shortfall of choosing one variant

pub mod loss;
pub mod probability;
pub mod uplift;

pub use loss::{expected_loss, winner};
pub use probability::{
    probability_best, probability_greater, probability_greater_than_both, probability_less,
};
pub use uplift::{
    probability_of_uplift, uplift_at_confidence, uplift_at_confidence_in, UpliftSearch,
};

use crate::error::{Error, Result};

/// Check that all sample sets are non-empty, equally long and free of NaN.
///
/// Returns the common length.
pub(crate) fn check_aligned(sets: &[&[f64]]) -> Result<usize> {
    let Some(first) = sets.first() else {
        return Err(Error::invalid_input("no sample sets given"));
    };
    let len = first.len();
    if len == 0 {
        return Err(Error::invalid_input("sample sets must not be empty"));
    }
    for (i, set) in sets.iter().enumerate() {
        if set.len() != len {
            return Err(Error::invalid_input(format!(
                "sample set {} has {} draws, expected {}",
                i,
                set.len(),
                len
            )));
        }
        if let Some(idx) = set.iter().position(|x| x.is_nan()) {
            return Err(Error::invalid_input(format!(
                "sample set {} has a NaN draw at index {}",
                i, idx
            )));
        }
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_aligned_ok() {
        let a: &[f64] = &[1.0, 2.0];
        let b: &[f64] = &[3.0, 4.0];
        assert_eq!(check_aligned(&[a, b]).unwrap(), 2);
    }

    #[test]
    fn test_check_aligned_rejects() {
        let empty: &[f64] = &[];
        let one: &[f64] = &[1.0];
        let two: &[f64] = &[1.0, 2.0];
        let nan: &[f64] = &[f64::NAN];
        assert!(check_aligned(&[]).is_err());
        assert!(check_aligned(&[empty, empty]).is_err());
        assert!(check_aligned(&[one, two]).is_err());
        assert!(check_aligned(&[one, nan]).is_err());
    }

    #[test]
    fn test_check_aligned_accepts_infinite_draws() {
        let a: &[f64] = &[1.0, f64::INFINITY];
        let b: &[f64] = &[f64::NEG_INFINITY, 2.0];
        assert_eq!(check_aligned(&[a, b]).unwrap(), 2);
    }
}
