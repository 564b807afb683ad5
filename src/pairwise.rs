//! Pairwise aggregation of two-coder metrics.
//!
//! For every item, every pair of coders is scored with a two-coder metric
//! (hypothesis first, reference second). All scores land in one flat list,
//! summarised by [`AggregateStatistics`].
//!
//! | Mode | Pairs for `n` coders |
//! |------|----------------------|
//! | [`PairingMode::Ordered`] | `n * (n - 1)` |
//! | [`PairingMode::Unordered`] | `n * (n - 1) / 2` |

use crate::config::{MetricConfig, PairingMode};
use crate::stats::AggregateStatistics;
use crate::{Dataset, Error, Item, Result};
use rust_decimal::Decimal;

/// Enumerate coder pairs in a stable order.
#[must_use]
pub fn coder_pairs<'a>(coders: &[&'a str], mode: PairingMode) -> Vec<(&'a str, &'a str)> {
    let mut pairs = Vec::new();
    for (i, &a) in coders.iter().enumerate() {
        for (j, &b) in coders.iter().enumerate() {
            let keep = match mode {
                PairingMode::Ordered => i != j,
                PairingMode::Unordered => i < j,
            };
            if keep {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

fn score_item<F>(item: &Item, mode: PairingMode, metric: &F) -> Result<Vec<Decimal>>
where
    F: Fn(&[usize], &[usize]) -> Result<Decimal>,
{
    let coders: Vec<&str> = item.codings.keys().map(String::as_str).collect();
    coder_pairs(&coders, mode)
        .into_iter()
        .map(|(hyp, reference)| {
            let score = metric(&item.codings[hyp], &item.codings[reference])?;
            log::trace!("item '{}' {} vs {}: {}", item.id, hyp, reference, score);
            Ok(score)
        })
        .collect()
}

/// Score every coder pair on every item, in item then pair order.
pub fn pairwise_scores<F>(dataset: &Dataset, config: &MetricConfig, metric: F) -> Result<Vec<Decimal>>
where
    F: Fn(&[usize], &[usize]) -> Result<Decimal> + Sync,
{
    config.validate()?;
    dataset.validate_item_counts()?;
    let items = dataset.items()?;
    let mode = config.pairing_mode;

    log::debug!(
        "pairwise: {} coders, {} items, {:?} pairs",
        dataset.coder_count(),
        items.len(),
        mode
    );

    #[cfg(feature = "parallel")]
    let per_item: Vec<Vec<Decimal>> = {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| score_item(item, mode, &metric))
            .collect::<Result<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let per_item: Vec<Vec<Decimal>> = items
        .iter()
        .map(|item| score_item(item, mode, &metric))
        .collect::<Result<_>>()?;

    Ok(per_item.into_iter().flatten().collect())
}

/// Score every coder pair on every item and summarise the scores.
///
/// # Errors
///
/// `DegenerateStatistic` if no pair could be formed (fewer than two
/// coders, or no items), plus any shape error or error raised by `metric`.
pub fn compute_pairwise<F>(
    dataset: &Dataset,
    config: &MetricConfig,
    metric: F,
) -> Result<AggregateStatistics>
where
    F: Fn(&[usize], &[usize]) -> Result<Decimal> + Sync,
{
    let scores = pairwise_scores(dataset, config, metric)?;
    if scores.is_empty() {
        if dataset.coder_count() >= 2 {
            return Err(Error::degenerate("dataset contains no items to compare"));
        }
        return Err(Error::degenerate(format!(
            "pairwise aggregation needs at least two coders, dataset has {}",
            dataset.coder_count()
        )));
    }
    AggregateStatistics::from_values(&scores)
}
