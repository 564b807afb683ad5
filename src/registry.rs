//! Metric registry.
//!
//! Maps [`MetricId`]s to metric functions. A registry is built once (usually
//! with [`MetricRegistry::with_defaults`]) and passed to whatever dispatches
//! on metric names; there is no global table.
//!
//! # Example
//!
//! ```rust
//! use segeval::registry::{Evaluation, MetricId, MetricRegistry};
//! use segeval::{Dataset, MetricConfig};
//!
//! let registry = MetricRegistry::with_defaults();
//! let dataset = Dataset::new()
//!     .with_masses("an1", "doc", vec![3, 3])
//!     .with_masses("an2", "doc", vec![2, 4]);
//!
//! let id = MetricId::try_parse("wd").unwrap();
//! let config = MetricConfig::new().with_window_size(2);
//! match registry.evaluate(id, &dataset, &config).unwrap() {
//!     Evaluation::Pairwise(stats) => assert_eq!(stats.count, 2),
//!     Evaluation::Coefficient(_) => unreachable!(),
//! }
//! ```

use crate::agreement::{artstein_poesio_bias_linear, fleiss_kappa_linear, fleiss_pi_linear};
use crate::config::MetricConfig;
use crate::framework::MetricResult;
use crate::stats::AggregateStatistics;
use crate::window::{pairwise_pk, pairwise_window_diff};
use crate::{Dataset, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Built-in metric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MetricId {
    /// Fleiss' Pi
    Pi,
    /// Fleiss' Kappa
    Kappa,
    /// Artstein & Poesio bias
    Bias,
    /// Mean pairwise WindowDiff
    WindowDiff,
    /// Mean pairwise Pk
    Pk,
}

impl MetricId {
    /// Every built-in metric.
    pub const ALL: [MetricId; 5] = [
        MetricId::Pi,
        MetricId::Kappa,
        MetricId::Bias,
        MetricId::WindowDiff,
        MetricId::Pk,
    ];

    /// Canonical name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::Pi => "pi",
            MetricId::Kappa => "kappa",
            MetricId::Bias => "bias",
            MetricId::WindowDiff => "window_diff",
            MetricId::Pk => "pk",
        }
    }

    /// Parse a metric name or short alias.
    ///
    /// Returns `None` if the string doesn't match any known metric.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pi" | "fleiss_pi" => Some(MetricId::Pi),
            "kappa" | "k" | "fleiss_kappa" => Some(MetricId::Kappa),
            "bias" | "b" => Some(MetricId::Bias),
            "window_diff" | "windowdiff" | "wd" => Some(MetricId::WindowDiff),
            "pk" => Some(MetricId::Pk),
            _ => None,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s).ok_or_else(|| Error::configuration(format!("unknown metric '{}'", s)))
    }
}

/// What a registered metric produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// A dataset-level coefficient (or its parts).
    Coefficient(MetricResult),
    /// Statistics over pairwise scores.
    Pairwise(AggregateStatistics),
}

/// A registered metric.
pub type MetricFn = fn(&Dataset, &MetricConfig) -> Result<Evaluation>;

/// Explicit metric-name → function table.
#[derive(Clone, Default)]
pub struct MetricRegistry {
    metrics: HashMap<MetricId, MetricFn>,
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.metrics.keys()).finish()
    }
}

impl MetricRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in metric.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MetricId::Pi, |d, c| {
            fleiss_pi_linear(d, c).map(Evaluation::Coefficient)
        });
        registry.register(MetricId::Kappa, |d, c| {
            fleiss_kappa_linear(d, c).map(Evaluation::Coefficient)
        });
        registry.register(MetricId::Bias, |d, c| {
            artstein_poesio_bias_linear(d, c)
                .map(|bias| Evaluation::Coefficient(MetricResult::Score(bias)))
        });
        registry.register(MetricId::WindowDiff, |d, c| {
            pairwise_window_diff(d, c).map(Evaluation::Pairwise)
        });
        registry.register(MetricId::Pk, |d, c| pairwise_pk(d, c).map(Evaluation::Pairwise));
        registry
    }

    /// Register (or replace) a metric.
    pub fn register(&mut self, id: MetricId, metric: MetricFn) -> Option<MetricFn> {
        self.metrics.insert(id, metric)
    }

    /// Is `id` registered?
    #[must_use]
    pub fn contains(&self, id: MetricId) -> bool {
        self.metrics.contains_key(&id)
    }

    /// Run a registered metric.
    pub fn evaluate(
        &self,
        id: MetricId,
        dataset: &Dataset,
        config: &MetricConfig,
    ) -> Result<Evaluation> {
        let metric = self
            .metrics
            .get(&id)
            .ok_or_else(|| Error::configuration(format!("metric '{}' is not registered", id)))?;
        log::debug!("evaluating {}", id);
        metric(dataset, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn agreeing() -> Dataset {
        Dataset::new()
            .with_masses("an1", "doc", vec![5, 5])
            .with_masses("an2", "doc", vec![5, 5])
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(MetricId::try_parse("WD"), Some(MetricId::WindowDiff));
        assert_eq!(MetricId::try_parse("fleiss_pi"), Some(MetricId::Pi));
        assert_eq!(MetricId::try_parse("nope"), None);
        assert!("nope".parse::<MetricId>().is_err());
        for id in MetricId::ALL {
            assert_eq!(id.as_str().parse::<MetricId>().unwrap(), id);
        }
    }

    #[test]
    fn test_defaults_registered() {
        let registry = MetricRegistry::with_defaults();
        for id in MetricId::ALL {
            assert!(registry.contains(id), "{} missing", id);
        }
    }

    #[test]
    fn test_dispatch() {
        let registry = MetricRegistry::with_defaults();
        let config = MetricConfig::new();
        assert_eq!(
            registry.evaluate(MetricId::Pi, &agreeing(), &config).unwrap(),
            Evaluation::Coefficient(MetricResult::Score(Decimal::ONE))
        );
        match registry.evaluate(MetricId::WindowDiff, &agreeing(), &config).unwrap() {
            Evaluation::Pairwise(stats) => assert_eq!(stats.mean, Decimal::ZERO),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unregistered() {
        let registry = MetricRegistry::new();
        assert!(matches!(
            registry.evaluate(MetricId::Pk, &agreeing(), &MetricConfig::new()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_register_override() {
        let mut registry = MetricRegistry::with_defaults();
        let previous = registry.register(MetricId::Bias, |_, _| {
            Ok(Evaluation::Coefficient(MetricResult::Score(Decimal::TEN)))
        });
        assert!(previous.is_some());
        assert_eq!(
            registry
                .evaluate(MetricId::Bias, &agreeing(), &MetricConfig::new())
                .unwrap(),
            Evaluation::Coefficient(MetricResult::Score(Decimal::TEN))
        );
    }
}
