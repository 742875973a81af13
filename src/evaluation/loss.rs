//! Expected loss of a decision.
//!
//! Choosing A when B is actually better costs `max(B − A, 0)`. Averaging
//! over the joint posterior draws gives the expected cost of that choice,
//! which is the usual stopping rule: stop once the expected loss of the
//! leading variant falls below a threshold of caring.

use crate::error::Result;
use crate::types::Variant;

use super::check_aligned;
use super::probability::probability_greater;

/// E[max(B − A, 0)]: expected shortfall if A is chosen.
pub fn expected_loss(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = check_aligned(&[a, b])?;
    // Equal infinities cost nothing; `inf - inf` would be NaN.
    let total: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| if y > x { y - x } else { 0.0 })
        .sum();
    Ok(total / n as f64)
}

/// The variant more likely to be larger. `A` wins exact 50/50 splits.
pub fn winner(a: &[f64], b: &[f64]) -> Result<Variant> {
    let p_a = probability_greater(a, b)?;
    let p_b = probability_greater(b, a)?;
    Ok(if p_a >= p_b { Variant::A } else { Variant::B })
}
