//! Error type for posterior sampling and evaluation.

use thiserror::Error;

/// Errors raised by samplers, evaluators and comparisons.
///
/// Every variant describes a caller-input problem. Nothing here is transient:
/// the same inputs always produce the same error, and no partial results are
/// returned alongside it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed counts or hyperparameters (k > n, non-positive prior shape, ...).
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Observations or sample sets that the operation cannot consume.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A denominator sample of an uplift ratio was exactly zero.
    #[error("division by zero: denominator sample at index {index} is zero")]
    DivisionByZero {
        /// Index of the first zero denominator.
        index: usize,
    },

    /// The uplift search could not bracket the target probability.
    #[error(
        "no root in [{lower}, {upper}] for target probability {target} \
         (f(lower) = {f_lower}, f(upper) = {f_upper})"
    )]
    NoRootInInterval {
        /// Lower end of the last interval tried.
        lower: f64,
        /// Upper end of the last interval tried.
        upper: f64,
        /// Target probability that was searched for.
        target: f64,
        /// `P(uplift > lower) - target`.
        f_lower: f64,
        /// `P(uplift > upper) - target`.
        f_upper: f64,
    },
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
