//! Pk (Beeferman et al., 1999).
//!
//! Probes units `i` and `i + k` for every `i` in `0..units - k`. A probe
//! agrees within a segmentation when both ends lie in the same segment. Pk
//! is the fraction of probes where reference and hypothesis disagree.

use super::{boundary_prefix, finish, prepare, resolve_window_size};
use crate::config::MetricConfig;
use crate::pairwise::compute_pairwise;
use crate::stats::AggregateStatistics;
use crate::{Dataset, Error, Result};
use rust_decimal::Decimal;

/// Pk of a hypothesis against a reference segmentation.
///
/// Inputs are positions, or masses when `config.convert_from_masses` is set.
/// The edge-effect fix does not apply to Pk.
///
/// # Errors
///
/// `Configuration` if the window leaves no probes (`k >= units`).
pub fn pk(
    hypothesis_positions: &[usize],
    reference_positions: &[usize],
    config: &MetricConfig,
) -> Result<Decimal> {
    let (hypothesis, reference) = prepare(hypothesis_positions, reference_positions, config)?;
    let window_size = resolve_window_size(&reference, config)?;
    if window_size >= reference.len() {
        return Err(Error::configuration(format!(
            "window size {} leaves no probes over {} units",
            window_size,
            reference.len()
        )));
    }

    let ref_counts = boundary_prefix(&reference);
    let hyp_counts = boundary_prefix(&hypothesis);

    let probes = reference.len() - window_size;
    let disagreements = (0..probes)
        .filter(|&i| {
            let ref_same = ref_counts[i + window_size] == ref_counts[i];
            let hyp_same = hyp_counts[i + window_size] == hyp_counts[i];
            ref_same != hyp_same
        })
        .count();

    let score = Decimal::from(disagreements) / Decimal::from(probes);
    log::debug!(
        "pk: units={} k={} disagreements={}/{}",
        reference.len(),
        window_size,
        disagreements,
        probes
    );
    Ok(finish(score, config))
}

/// Pk over every coder pair of every item.
pub fn pairwise_pk(dataset: &Dataset, config: &MetricConfig) -> Result<AggregateStatistics> {
    let inner = config.clone().with_convert_from_masses(false);
    compute_pairwise(dataset, config, |hypothesis, reference| {
        pk(hypothesis, reference, &inner)
    })
}
