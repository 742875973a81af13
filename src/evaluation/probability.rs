//! Dominance probabilities.

use crate::error::Result;

use super::check_aligned;

/// P(A > B): fraction of draws where `a[i] > b[i]`.
///
/// Ties count for neither side, so `P(A > B) + P(B > A)` is 1 only when ties
/// are impossible.
pub fn probability_greater(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = check_aligned(&[a, b])?;
    let wins = a.iter().zip(b).filter(|(x, y)| x > y).count();
    Ok(wins as f64 / n as f64)
}

/// P(A < B), i.e. `probability_greater(b, a)`.
pub fn probability_less(a: &[f64], b: &[f64]) -> Result<f64> {
    probability_greater(b, a)
}

/// P(A > B and A > C): fraction of draws where A beats both others.
///
/// Computing this once per variant does not give a partition: the three
/// values need not sum to 1 because of ties. Use [`probability_best`] for
/// mutually exclusive per-draw winners.
pub fn probability_greater_than_both(a: &[f64], b: &[f64], c: &[f64]) -> Result<f64> {
    let n = check_aligned(&[a, b, c])?;
    let wins = (0..n).filter(|&i| a[i] > b[i] && a[i] > c[i]).count();
    Ok(wins as f64 / n as f64)
}

/// Per-draw argmax: probability that each variant is the largest.
///
/// A tie for the maximum splits that draw evenly between the tied variants,
/// so the result always sums to 1.
pub fn probability_best(variants: &[&[f64]]) -> Result<Vec<f64>> {
    let n = check_aligned(variants)?;
    let mut credit = vec![0.0; variants.len()];

    for i in 0..n {
        let best = variants
            .iter()
            .map(|v| v[i])
            .fold(f64::NEG_INFINITY, f64::max);
        let tied = variants.iter().filter(|v| v[i] == best).count();
        let share = 1.0 / tied as f64;
        for (slot, v) in credit.iter_mut().zip(variants) {
            if v[i] == best {
                *slot += share;
            }
        }
    }

    Ok(credit.into_iter().map(|c| c / n as f64).collect())
}
