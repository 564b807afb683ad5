//! WindowDiff (Pevzner & Hearst, 2002).
//!
//! A window of `k` consecutive units (so `k - 1` boundary positions) slides
//! over both segmentations; every window where the two hold a different
//! number of boundaries counts as one mismatch. The score is
//! `mismatches / (n - k)` with `n = units + 1`.
//!
//! With the Lamprier et al. (2007) fix, `k - 1` phantom units that never
//! carry a boundary pad each end, so boundaries near the edges are seen by
//! as many windows as those in the middle, and `n` grows by `k - 1`.
//!
//! # Example
//!
//! ```rust
//! use segeval::window::window_diff;
//! use segeval::MetricConfig;
//! use rust_decimal::Decimal;
//!
//! let config = MetricConfig::new().with_window_size(2);
//! let score = window_diff(&[1, 1, 2, 2, 2, 2], &[1, 1, 1, 2, 2, 2], &config).unwrap();
//! assert_eq!(score, Decimal::new(4, 1)); // 0.4
//! ```

use super::{boundary_prefix, finish, prepare, resolve_window_size};
use crate::config::MetricConfig;
use crate::pairwise::compute_pairwise;
use crate::stats::AggregateStatistics;
use crate::{Dataset, Error, Result};
use rust_decimal::Decimal;

/// WindowDiff of a hypothesis against a reference segmentation.
///
/// Inputs are positions, or masses when `config.convert_from_masses` is set.
///
/// # Errors
///
/// - `SegmentationLengthMismatch` if the two cover different unit counts
/// - `Configuration` if the window does not fit the (padded) sequence
/// - `MalformedSegmentation` for empty input or zero masses
pub fn window_diff(
    hypothesis_positions: &[usize],
    reference_positions: &[usize],
    config: &MetricConfig,
) -> Result<Decimal> {
    let (hypothesis, reference) = prepare(hypothesis_positions, reference_positions, config)?;
    let window_size = resolve_window_size(&reference, config)?;

    let phantom = if config.lamprier_et_al_2007_fix {
        window_size - 1
    } else {
        0
    };
    let units = reference.len().saturating_add(phantom.saturating_mul(2));
    if window_size > units {
        return Err(Error::configuration(format!(
            "window size {} exceeds the {} units available",
            window_size, units
        )));
    }
    // units - k + 1 window starts over the padded units
    let windows = reference.len().checked_add(phantom).ok_or_else(|| {
        Error::configuration(format!("window size {} is out of range", window_size))
    })? - (window_size - phantom)
        + 1;

    let ref_counts = boundary_prefix(&reference);
    let hyp_counts = boundary_prefix(&hypothesis);
    let gaps = reference.len() - 1;
    // does the window over real gaps [lo, hi) hold different boundary counts?
    let differs = |lo: usize, hi: usize| {
        ref_counts[hi] - ref_counts[lo] != hyp_counts[hi] - hyp_counts[lo]
    };

    let mut mismatches = 0usize;
    if phantom == 0 {
        for start in 0..=(reference.len() - window_size) {
            if differs(start, start + window_size - 1) {
                mismatches += 1;
            }
        }
    } else {
        // Padding is never materialised. Windows starting in the leading
        // padding see real gaps [0, end); every such window with
        // end >= gaps covers the whole item.
        for end in 0..phantom.min(gaps) {
            if differs(0, end) {
                mismatches += 1;
            }
        }
        if phantom > gaps && differs(0, gaps) {
            mismatches += phantom - gaps;
        }
        for start in 0..reference.len() {
            if differs(start, start.saturating_add(phantom).min(gaps)) {
                mismatches += 1;
            }
        }
    }
    debug_assert!(mismatches <= windows);

    // n - k, with n = units + 1 + phantom
    let denominator = reference.len() + 1 - (window_size - phantom);
    let score = Decimal::from(mismatches) / Decimal::from(denominator);

    log::debug!(
        "window_diff: units={} k={} fix={} mismatches={}/{} score={}",
        reference.len(),
        window_size,
        config.lamprier_et_al_2007_fix,
        mismatches,
        windows,
        score
    );
    Ok(finish(score, config))
}

/// WindowDiff over every coder pair of every item.
///
/// Dataset segmentations are normalised to positions first, so
/// `convert_from_masses` does not apply here.
pub fn pairwise_window_diff(
    dataset: &Dataset,
    config: &MetricConfig,
) -> Result<AggregateStatistics> {
    let inner = config.clone().with_convert_from_masses(false);
    compute_pairwise(dataset, config, |hypothesis, reference| {
        window_diff(hypothesis, reference, &inner)
    })
}
