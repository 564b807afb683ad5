//! Descriptive statistics over exact decimal scores.

use crate::{Error, Result};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

/// Mean, spread and standard error of a collection of scores.
///
/// Uses the sample variance (Bessel's correction). A single score has
/// zero variance.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use segeval::stats::AggregateStatistics;
///
/// let values = [Decimal::from(1), Decimal::from(2), Decimal::from(3)];
/// let stats = AggregateStatistics::from_values(&values).unwrap();
/// assert_eq!(stats.mean, Decimal::from(2));
/// assert_eq!(stats.variance, Decimal::from(1));
/// assert_eq!(stats.count, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    /// Arithmetic mean
    pub mean: Decimal,
    /// Sample standard deviation
    pub std_dev: Decimal,
    /// Sample variance
    pub variance: Decimal,
    /// Standard error of the mean
    pub std_err: Decimal,
    /// Number of scores
    pub count: usize,
}

impl AggregateStatistics {
    /// Summarise a non-empty slice of scores.
    pub fn from_values(values: &[Decimal]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::degenerate("no scores to aggregate"));
        }

        let n = Decimal::from(values.len());
        let mean = values.iter().sum::<Decimal>() / n;

        let variance = if values.len() > 1 {
            let squares: Decimal = values.iter().map(|v| (*v - mean) * (*v - mean)).sum();
            squares / (n - Decimal::ONE)
        } else {
            Decimal::ZERO
        };
        let std_dev = sqrt(variance)?;
        let std_err = std_dev / sqrt(n)?;

        Ok(Self {
            mean,
            std_dev,
            variance,
            std_err,
            count: values.len(),
        })
    }

    /// The statistics as a `(mean, std_dev, variance, std_err)` tuple.
    #[must_use]
    pub fn as_tuple(&self) -> (Decimal, Decimal, Decimal, Decimal) {
        (self.mean, self.std_dev, self.variance, self.std_err)
    }
}

impl std::fmt::Display for AggregateStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ± {} (n={})", self.mean, self.std_dev, self.count)
    }
}

fn sqrt(value: Decimal) -> Result<Decimal> {
    value
        .sqrt()
        .ok_or_else(|| Error::degenerate(format!("square root of negative value {}", value)))
}
