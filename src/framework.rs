//! Statistic-application framework.
//!
//! [`apply_metric`] validates a dataset, transposes it into per-item
//! codings, runs a metric over them and either finishes the coefficient or
//! hands back the intermediate [`AgreementParts`] when `return_parts` is set.
//!
//! Per-item counts are combined with [`Tally`], which sums numerators and
//! denominators before dividing once.

use crate::config::MetricConfig;
use crate::{Dataset, Error, Item, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Observed and chance-expected agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementParts {
    /// Observed agreement, `A_a`
    pub actual: Decimal,
    /// Chance-expected agreement, `A_e`
    pub expected: Decimal,
}

impl AgreementParts {
    /// `(A_a - A_e) / (1 - A_e)`.
    ///
    /// # Errors
    ///
    /// `DegenerateStatistic` when `A_e == 1`.
    pub fn coefficient(&self) -> Result<Decimal> {
        (self.actual - self.expected)
            .checked_div(Decimal::ONE - self.expected)
            .ok_or_else(|| {
                Error::degenerate("chance-expected agreement is 1; coefficient is undefined")
            })
    }
}

/// A finished score, or the parts it would be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricResult {
    /// Final coefficient.
    Score(Decimal),
    /// Intermediate agreement values.
    Parts(AgreementParts),
}

impl MetricResult {
    /// The score, if this is a `Score`.
    #[must_use]
    pub fn score(&self) -> Option<Decimal> {
        match self {
            Self::Score(s) => Some(*s),
            Self::Parts(_) => None,
        }
    }

    /// The parts, if this is `Parts`.
    #[must_use]
    pub fn parts(&self) -> Option<AgreementParts> {
        match self {
            Self::Score(_) => None,
            Self::Parts(p) => Some(*p),
        }
    }

    /// The score, finishing the coefficient from parts if needed.
    pub fn into_score(self) -> Result<Decimal> {
        match self {
            Self::Score(s) => Ok(s),
            Self::Parts(p) => p.coefficient(),
        }
    }
}

/// Raw numerator and denominator counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Agreeing (or matching) positions
    pub numerator: usize,
    /// Compared positions
    pub denominator: usize,
}

impl Tally {
    /// Create a tally.
    #[must_use]
    pub fn new(numerator: usize, denominator: usize) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// `DegenerateStatistic` if nothing was compared.
    pub fn ratio(&self) -> Result<Decimal> {
        Decimal::from(self.numerator)
            .checked_div(Decimal::from(self.denominator))
            .ok_or_else(|| Error::degenerate("no positions were compared"))
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.numerator + rhs.numerator,
            self.denominator + rhs.denominator,
        )
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Validate `dataset`, run `metric` over its items, and finish the result.
///
/// Shape checks (item counts, item identity, per-item unit counts) run
/// before `metric` is called. With `config.return_parts` the metric's parts
/// are returned unconverted; otherwise the coefficient is computed.
pub fn apply_metric<F>(dataset: &Dataset, config: &MetricConfig, metric: F) -> Result<MetricResult>
where
    F: FnOnce(&[Item], &MetricConfig) -> Result<AgreementParts>,
{
    config.validate()?;
    dataset.validate_item_counts()?;
    let items = dataset.items()?;

    log::debug!(
        "applying metric: {} coders, {} items, return_parts={}",
        dataset.coder_count(),
        items.len(),
        config.return_parts
    );

    let parts = metric(&items, config)?;
    log::trace!("A_a={} A_e={}", parts.actual, parts.expected);

    if config.return_parts {
        Ok(MetricResult::Parts(parts))
    } else {
        parts.coefficient().map(MetricResult::Score)
    }
}
