//! Result types of variant comparisons.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::evaluation::{uplift_at_confidence_in, UpliftSearch};
use crate::statistics::Summary;
use crate::types::Variant;

/// Likelihood family a comparison was run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Model {
    /// Beta-Binomial conversion rate.
    Binomial,
    /// Normal-Inverse-Gamma mean of a continuous metric.
    Gaussian,
    /// Mean of a log-normal metric.
    LogNormal,
    /// Conversion rate × log-normal spend per converting session.
    RevenuePerSession,
}

/// Posterior draws and summary of one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantPosterior {
    /// Draws of the compared quantity.
    #[serde(skip_serializing)]
    pub samples: Vec<f64>,

    /// Summary of `samples`.
    pub summary: Summary,

    /// Variance draws (Gaussian model only).
    #[serde(skip_serializing)]
    pub variances: Option<Vec<f64>>,

    /// Conversion rate draws (revenue-per-session model only).
    #[serde(skip_serializing)]
    pub rates: Option<Vec<f64>>,

    /// Spend-per-conversion draws (revenue-per-session model only).
    #[serde(skip_serializing)]
    pub magnitudes: Option<Vec<f64>>,
}

impl VariantPosterior {
    pub(crate) fn new(samples: Vec<f64>, credible_mass: f64) -> Result<Self> {
        let summary = Summary::from_samples(&samples, credible_mass)?;
        Ok(Self {
            samples,
            summary,
            variances: None,
            rates: None,
            magnitudes: None,
        })
    }
}

/// Outcome of an A/B comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Model both variants were sampled under.
    pub model: Model,

    /// Posterior of variant A.
    pub a: VariantPosterior,

    /// Posterior of variant B.
    pub b: VariantPosterior,

    /// P(A > B).
    pub probability_a_better: f64,

    /// P(B > A).
    pub probability_b_better: f64,

    /// Threshold used for `probability_uplift`.
    pub uplift_threshold: f64,

    /// P((A − B)/B > uplift_threshold).
    pub probability_uplift: f64,

    /// Confidence used for `uplift_at_target`.
    pub target_probability: f64,

    /// Uplift x with P((A − B)/B > x) = target_probability, or `None` if the
    /// configured search could not bracket it.
    pub uplift_at_target: Option<f64>,

    /// E[max(B − A, 0)]: expected cost of shipping A.
    pub expected_loss_a: f64,

    /// E[max(A − B, 0)]: expected cost of shipping B.
    pub expected_loss_b: f64,
}

impl Comparison {
    /// Variant with the higher probability of being larger (A on an exact tie).
    pub fn leader(&self) -> Variant {
        if self.probability_a_better >= self.probability_b_better {
            Variant::A
        } else {
            Variant::B
        }
    }

    /// Uplift of A over B reached with probability `target`.
    pub fn uplift_at_confidence(&self, target: f64, search: &UpliftSearch) -> Result<f64> {
        uplift_at_confidence_in(&self.a.samples, &self.b.samples, target, search)
    }
}

/// Outcome of a three-way comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeWayComparison {
    /// Summaries of A, B and C, in that order.
    pub summaries: [Summary; 3],

    /// P(X beats both others) for X = A, B, C.
    ///
    /// Not a partition: the three values need not sum to 1.
    pub beats_both: [f64; 3],

    /// Per-draw argmax probabilities for A, B, C. Sums to 1.
    pub best: [f64; 3],
}

impl ThreeWayComparison {
    /// Variant with the highest argmax probability.
    pub fn leader(&self) -> Variant {
        let variants = [Variant::A, Variant::B, Variant::C];
        let mut leader = 0;
        for i in 1..3 {
            if self.best[i] > self.best[leader] {
                leader = i;
            }
        }
        variants[leader]
    }
}

// ============================================================================
// Display implementations
// ============================================================================

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Binomial => write!(f, "binomial"),
            Model::Gaussian => write!(f, "gaussian"),
            Model::LogNormal => write!(f, "log-normal"),
            Model::RevenuePerSession => write!(f, "revenue per session"),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean={:.6} [{:.6}, {:.6}] ({:.0}% CI)",
            self.mean,
            self.lower,
            self.upper,
            self.mass * 100.0
        )
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} comparison, {} draws", self.model, self.a.samples.len())?;
        writeln!(f, "  A: {}", self.a.summary)?;
        writeln!(f, "  B: {}", self.b.summary)?;
        writeln!(
            f,
            "  P(A>B)={:.1}%, P(B>A)={:.1}%",
            self.probability_a_better * 100.0,
            self.probability_b_better * 100.0
        )?;
        writeln!(
            f,
            "  P(uplift>{:.1}%)={:.1}%",
            self.uplift_threshold * 100.0,
            self.probability_uplift * 100.0
        )?;
        match self.uplift_at_target {
            Some(x) => writeln!(
                f,
                "  uplift at {:.0}% confidence: {:.2}%",
                self.target_probability * 100.0,
                x * 100.0
            )?,
            None => writeln!(
                f,
                "  uplift at {:.0}% confidence: not found in search interval",
                self.target_probability * 100.0
            )?,
        }
        write!(
            f,
            "  expected loss: A={:.6}, B={:.6}",
            self.expected_loss_a, self.expected_loss_b
        )
    }
}

impl fmt::Display for ThreeWayComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "three-way comparison")?;
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            writeln!(
                f,
                "  {}: {}, P(beats both)={:.1}%, P(best)={:.1}%",
                name,
                self.summaries[i],
                self.beats_both[i] * 100.0,
                self.best[i] * 100.0
            )?;
        }
        write!(f, "  leader: {}", self.leader())
    }
}
