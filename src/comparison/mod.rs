//! Two- and three-variant comparisons.
//!
//! Each `compare_*` function samples every variant's posterior from its own
//! RNG stream (derived from [`Config::seed`](crate::Config)) and reduces the
//! draws with the [`evaluation`](crate::evaluation) estimators. With the
//! `parallel` feature the variants are sampled concurrently; the draws are the
//! same either way.

mod result;

pub use result::{Comparison, Model, ThreeWayComparison, VariantPosterior};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::evaluation::{
    expected_loss, probability_best, probability_greater, probability_greater_than_both,
    probability_of_uplift, uplift_at_confidence_in,
};
use crate::posterior::{
    sample_binomial, sample_gaussian, sample_log_normal, sample_rate_times_magnitude, seeded_rng,
    split_conversions, ConversionSplit,
};
use crate::statistics::Summary;
use crate::types::{BinomialData, Variant};

/// Compare two conversion rates.
pub fn compare_binomial(a: BinomialData, b: BinomialData, config: &Config) -> Result<Comparison> {
    config.validate()?;
    let posteriors = sample_each(&[(Variant::A, a), (Variant::B, b)], config, |data, rng| {
        let draws = sample_binomial(*data, &config.beta_prior, config.samples, rng)?;
        VariantPosterior::new(draws, config.credible_mass)
    })?;
    build_comparison(Model::Binomial, posteriors, config)
}

/// Compare the means of two continuous metrics.
///
/// Variance draws are kept in [`VariantPosterior::variances`].
pub fn compare_gaussian(a: &[f64], b: &[f64], config: &Config) -> Result<Comparison> {
    config.validate()?;
    let posteriors = sample_each(&[(Variant::A, a), (Variant::B, b)], config, |data, rng| {
        let draws = sample_gaussian(data, &config.gaussian_prior, config.samples, rng)?;
        let mut posterior = VariantPosterior::new(draws.means, config.credible_mass)?;
        posterior.variances = Some(draws.variances);
        Ok(posterior)
    })?;
    build_comparison(Model::Gaussian, posteriors, config)
}

/// Compare the means of two strictly positive, log-normal metrics.
pub fn compare_log_normal(a: &[f64], b: &[f64], config: &Config) -> Result<Comparison> {
    config.validate()?;
    let posteriors = sample_each(&[(Variant::A, a), (Variant::B, b)], config, |data, rng| {
        let draws = sample_log_normal(data, &config.log_normal_prior, config.samples, rng)?;
        VariantPosterior::new(draws, config.credible_mass)
    })?;
    build_comparison(Model::LogNormal, posteriors, config)
}

/// Compare revenue per session from raw per-session spend (zeros included).
///
/// Each slice is split into sessions/conversions and positive spend, then
/// modeled as conversion rate × log-normal spend per conversion.
///
/// # Errors
///
/// A variant with no converting session has no spend to fit, so it fails with
/// `InvalidInput`. Early in an experiment this is common; fall back to
/// [`compare_binomial`] on the counts until both variants have converted.
/// Negative or NaN spend is also `InvalidInput`.
pub fn compare_revenue_per_session(a: &[f64], b: &[f64], config: &Config) -> Result<Comparison> {
    let a = split_conversions(a)?;
    let b = split_conversions(b)?;
    compare_conversion_splits(&a, &b, config)
}

/// Compare revenue per session from already-split counts and spend.
pub fn compare_conversion_splits(
    a: &ConversionSplit,
    b: &ConversionSplit,
    config: &Config,
) -> Result<Comparison> {
    config.validate()?;
    let posteriors = sample_each(&[(Variant::A, a), (Variant::B, b)], config, |split, rng| {
        revenue_posterior(split, config, rng)
    })?;
    build_comparison(Model::RevenuePerSession, posteriors, config)
}

/// Three-way comparison of already-sampled posteriors.
pub fn compare_three(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    credible_mass: f64,
) -> Result<ThreeWayComparison> {
    let beats_both = [
        probability_greater_than_both(a, b, c)?,
        probability_greater_than_both(b, a, c)?,
        probability_greater_than_both(c, a, b)?,
    ];
    let best = probability_best(&[a, b, c])?;

    debug!(?beats_both, ?best, "three-way comparison");

    Ok(ThreeWayComparison {
        summaries: [
            Summary::from_samples(a, credible_mass)?,
            Summary::from_samples(b, credible_mass)?,
            Summary::from_samples(c, credible_mass)?,
        ],
        beats_both,
        best: [best[0], best[1], best[2]],
    })
}

/// Three-way revenue-per-session comparison from raw per-session spend.
pub fn compare_revenue_per_session_three(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    config: &Config,
) -> Result<ThreeWayComparison> {
    config.validate()?;
    let splits = [
        (Variant::A, split_conversions(a)?),
        (Variant::B, split_conversions(b)?),
        (Variant::C, split_conversions(c)?),
    ];
    let posteriors = sample_each(&splits, config, |split, rng| {
        revenue_posterior(split, config, rng)
    })?;
    compare_three(
        &posteriors[0].samples,
        &posteriors[1].samples,
        &posteriors[2].samples,
        config.credible_mass,
    )
}

fn revenue_posterior(
    split: &ConversionSplit,
    config: &Config,
    rng: &mut Xoshiro256PlusPlus,
) -> Result<VariantPosterior> {
    let draws = sample_rate_times_magnitude(
        split.counts,
        &split.magnitudes,
        &config.beta_prior,
        &config.log_normal_prior,
        config.samples,
        rng,
    )?;
    let mut posterior = VariantPosterior::new(draws.products, config.credible_mass)?;
    posterior.rates = Some(draws.rates);
    posterior.magnitudes = Some(draws.magnitudes);
    Ok(posterior)
}

/// Run `sampler` once per variant, each on its own seeded stream.
fn sample_each<I, T, F>(inputs: &[(Variant, I)], config: &Config, sampler: F) -> Result<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I, &mut Xoshiro256PlusPlus) -> Result<T> + Sync,
{
    let seed = config.resolved_seed();
    let run = |(variant, input): &(Variant, I)| {
        let mut rng = seeded_rng(seed, variant.stream());
        sampler(input, &mut rng)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<T>> = inputs.par_iter().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<T>> = inputs.iter().map(run).collect();

    results.into_iter().collect()
}

fn build_comparison(
    model: Model,
    posteriors: Vec<VariantPosterior>,
    config: &Config,
) -> Result<Comparison> {
    let [a, b]: [VariantPosterior; 2] = posteriors.try_into().map_err(|v: Vec<_>| {
        Error::invalid_input(format!("expected 2 variant posteriors, got {}", v.len()))
    })?;

    let probability_a_better = probability_greater(&a.samples, &b.samples)?;
    let probability_b_better = probability_greater(&b.samples, &a.samples)?;
    let probability_uplift =
        probability_of_uplift(&a.samples, &b.samples, config.uplift_threshold)?;
    let expected_loss_a = expected_loss(&a.samples, &b.samples)?;
    let expected_loss_b = expected_loss(&b.samples, &a.samples)?;
    let uplift_at_target = match uplift_at_confidence_in(
        &a.samples,
        &b.samples,
        config.target_probability,
        &config.search,
    ) {
        Ok(x) => Some(x),
        Err(err @ Error::NoRootInInterval { .. }) => {
            warn!(%err, "uplift at target probability not reported");
            None
        }
        Err(err) => return Err(err),
    };

    debug!(
        %model,
        probability_a_better,
        probability_uplift,
        ?uplift_at_target,
        expected_loss_a,
        expected_loss_b,
        "comparison complete"
    );

    Ok(Comparison {
        model,
        a,
        b,
        probability_a_better,
        probability_b_better,
        uplift_threshold: config.uplift_threshold,
        probability_uplift,
        target_probability: config.target_probability,
        uplift_at_target,
        expected_loss_a,
        expected_loss_b,
    })
}
