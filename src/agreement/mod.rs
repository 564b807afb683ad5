//! Chance-corrected inter-coder agreement over segment boundaries.
//!
//! Every coefficient here is built on the same primitive,
//! [`actual_agreement_linear`], which walks every item once and records:
//!
//! - for every unordered coder pair, how many potential boundary positions
//!   the two coders agree on (both place a boundary, or neither does)
//! - for every coder, how many boundaries it placed out of how many it could
//!
//! | Coefficient | Chance model | Module |
//! |-------------|--------------|--------|
//! | **Fleiss' Pi** | One boundary rate shared by all coders | [`pi`] |
//! | **Fleiss' Kappa** | A boundary rate per coder | [`kappa`] |
//! | **Bias** | `A_e(pi) - A_e(kappa)` | [`artstein_poesio_bias_linear`] |
//!
//! # References
//!
//! - Fleiss (1971). "Measuring nominal scale agreement among many raters"
//! - Artstein & Poesio (2008). "Inter-coder agreement for computational linguistics"

pub mod kappa;
pub mod pi;

pub use kappa::fleiss_kappa_linear;
pub use pi::fleiss_pi_linear;

use crate::config::{MetricConfig, PairingMode};
use crate::framework::Tally;
use crate::pairwise::coder_pairs;
use crate::{boundaries, BoundaryPair, CoderId, Dataset, Error, Item, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Raw counts gathered across a whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActualAgreement {
    /// One tally per (item, unordered coder pair).
    pub pair_tallies: Vec<Tally>,
    /// Per coder, one boundary pair per item in item order.
    pub coder_boundaries: BTreeMap<CoderId, Vec<BoundaryPair>>,
}

impl ActualAgreement {
    /// Observed agreement `A_a`: summed agreements over summed positions.
    pub fn observed(&self) -> Result<Decimal> {
        self.pair_tallies.iter().copied().sum::<Tally>().ratio()
    }

    /// Each coder's boundary rate on each item, in item order.
    pub fn boundary_rates(&self) -> Result<BTreeMap<CoderId, Vec<Decimal>>> {
        self.coder_boundaries
            .iter()
            .map(|(coder, pairs)| {
                let rates = pairs
                    .iter()
                    .map(|pair| boundary_rate(coder, pair))
                    .collect::<Result<Vec<_>>>()?;
                Ok((coder.clone(), rates))
            })
            .collect()
    }
}

fn boundary_rate(coder: &str, pair: &BoundaryPair) -> Result<Decimal> {
    Decimal::from(pair.boundaries)
        .checked_div(Decimal::from(pair.positions))
        .ok_or_else(|| {
            Error::degenerate(format!(
                "coder '{}' segmented a single-unit item; boundary rate is undefined",
                coder
            ))
        })
}

/// Count the boundary positions on which two position sequences agree.
///
/// # Errors
///
/// `SegmentationLengthMismatch` if the sequences differ in length.
pub fn boundary_agreement(a: &[usize], b: &[usize]) -> Result<Tally> {
    if a.len() != b.len() {
        return Err(Error::length_mismatch(format!(
            "segmentations cover {} and {} units",
            a.len(),
            b.len()
        )));
    }
    let a = boundaries(a);
    let b = boundaries(b);
    let agree = a.iter().zip(&b).filter(|(x, y)| x == y).count();
    Ok(Tally::new(agree, a.len()))
}

/// Gather pairwise agreement tallies and per-coder boundary counts.
///
/// # Errors
///
/// `DegenerateStatistic` with fewer than two coders.
pub fn actual_agreement_linear(items: &[Item]) -> Result<ActualAgreement> {
    let mut agreement = ActualAgreement::default();

    for item in items {
        let coders: Vec<&str> = item.codings.keys().map(String::as_str).collect();
        if coders.len() < 2 {
            return Err(Error::degenerate(format!(
                "agreement needs at least two coders, item '{}' has {}",
                item.id,
                coders.len()
            )));
        }

        for (a, b) in coder_pairs(&coders, PairingMode::Unordered) {
            let tally = boundary_agreement(&item.codings[a], &item.codings[b])?;
            log::trace!(
                "item '{}' {}/{}: {}/{} positions agree",
                item.id,
                a,
                b,
                tally.numerator,
                tally.denominator
            );
            agreement.pair_tallies.push(tally);
        }

        for (coder, positions) in &item.codings {
            let placed = boundaries(positions).into_iter().filter(|&b| b).count();
            agreement
                .coder_boundaries
                .entry(coder.clone())
                .or_default()
                .push(BoundaryPair {
                    boundaries: placed,
                    positions: item.unit_count.saturating_sub(1),
                });
        }
    }

    if agreement.pair_tallies.is_empty() {
        return Err(Error::degenerate("dataset contains no items to compare"));
    }
    Ok(agreement)
}

/// Arithmetic mean of a non-empty slice.
pub(crate) fn mean(values: &[Decimal]) -> Result<Decimal> {
    if values.is_empty() {
        return Err(Error::degenerate("mean of no values"));
    }
    Ok(values.iter().sum::<Decimal>() / Decimal::from(values.len()))
}

/// Artstein & Poesio's bias: `A_e(pi) - A_e(kappa)`.
///
/// Zero when every coder places boundaries at the same rate; grows as
/// coders' individual rates diverge.
pub fn artstein_poesio_bias_linear(dataset: &Dataset, config: &MetricConfig) -> Result<Decimal> {
    let config = config.clone().with_return_parts(true);
    let pi = fleiss_pi_linear(dataset, &config)?;
    let kappa = fleiss_kappa_linear(dataset, &config)?;
    match (pi.parts(), kappa.parts()) {
        (Some(pi), Some(kappa)) => Ok(pi.expected - kappa.expected),
        _ => Err(Error::degenerate("agreement parts were not returned")),
    }
}
