//! Window-based segmentation metrics.
//!
//! Both metrics slide a fixed-size window over a hypothesis and a reference
//! segmentation of the same units and count the windows where the two
//! disagree:
//!
//! | Metric | A window disagrees when... |
//! |--------|---------------------------|
//! | **WindowDiff** | the two hold a different number of boundaries |
//! | **Pk** | one has its probe ends in the same segment, the other not |
//!
//! Lower is better; `one_minus` flips both into similarities.
//!
//! # References
//!
//! - Beeferman, Berger & Lafferty (1999). "Statistical models for text segmentation"
//! - Pevzner & Hearst (2002). "A critique and improvement of an evaluation metric for text segmentation"
//! - Lamprier et al. (2007). "On evaluation methodologies for text segmentation algorithms"

pub mod pk;
pub mod window_diff;

pub use pk::{pairwise_pk, pk};
pub use window_diff::{pairwise_window_diff, window_diff};

use crate::config::MetricConfig;
use crate::{boundaries, masses_to_positions, positions_to_masses, Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Conventional window size: half the mean reference segment length,
/// rounded half away from zero, and never below 2.
///
/// # Errors
///
/// `MalformedSegmentation` for an empty reference.
pub fn compute_window_size(reference_positions: &[usize]) -> Result<usize> {
    let masses = positions_to_masses(reference_positions);
    if masses.is_empty() {
        return Err(Error::malformed("cannot derive a window size from an empty reference"));
    }
    let mean = Decimal::from(reference_positions.len()) / Decimal::from(masses.len());
    let half = (mean / Decimal::TWO).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let window_size = half
        .to_usize()
        .ok_or_else(|| Error::configuration(format!("window size {} out of range", half)))?;
    Ok(window_size.max(2))
}

/// Hypothesis and reference in position form, checked for equal length.
fn prepare(
    hypothesis: &[usize],
    reference: &[usize],
    config: &MetricConfig,
) -> Result<(Vec<usize>, Vec<usize>)> {
    config.validate()?;
    let (hypothesis, reference) = if config.convert_from_masses {
        (masses_to_positions(hypothesis)?, masses_to_positions(reference)?)
    } else {
        (hypothesis.to_vec(), reference.to_vec())
    };
    if reference.is_empty() {
        return Err(Error::malformed("window metrics need a non-empty reference"));
    }
    if hypothesis.len() != reference.len() {
        return Err(Error::length_mismatch(format!(
            "reference covers {} units but hypothesis covers {}",
            reference.len(),
            hypothesis.len()
        )));
    }
    Ok((hypothesis, reference))
}

/// Window size from the configuration, or derived from the reference.
fn resolve_window_size(reference: &[usize], config: &MetricConfig) -> Result<usize> {
    match config.window_size {
        Some(window_size) => Ok(window_size),
        None => compute_window_size(reference),
    }
}

/// Running boundary counts: `counts[g]` boundaries lie before gap `g`.
///
/// Gap `g` sits between units `g` and `g + 1`, so the result holds one
/// entry per unit and its last entry is the total.
fn boundary_prefix(positions: &[usize]) -> Vec<usize> {
    let mut counts = Vec::with_capacity(positions.len());
    counts.push(0);
    let mut total = 0;
    for is_boundary in boundaries(positions) {
        total += usize::from(is_boundary);
        counts.push(total);
    }
    counts
}

/// `score`, or `1 - score` when `one_minus` is set.
fn finish(score: Decimal, config: &MetricConfig) -> Decimal {
    if config.one_minus {
        Decimal::ONE - score
    } else {
        score
    }
}
