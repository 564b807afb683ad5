//! Metric configuration.
//!
//! One explicit value lists every option the engines understand. Unknown
//! keys in a configuration document are rejected rather than ignored.
//!
//! # Example
//!
//! ```rust
//! use segeval::config::{MetricConfig, PairingMode};
//!
//! let config = MetricConfig::new()
//!     .with_window_size(3)
//!     .with_one_minus(true)
//!     .with_pairing_mode(PairingMode::Unordered);
//! assert!(config.validate().is_ok());
//!
//! let parsed = MetricConfig::from_json(r#"{"window_size": 3, "one_minus": true}"#).unwrap();
//! assert_eq!(parsed.window_size, Some(3));
//!
//! assert!(MetricConfig::from_json(r#"{"windowsize": 3}"#).is_err());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How coder pairs are enumerated per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Every ordered (hypothesis, reference) pair: `n * (n - 1)` pairs.
    #[default]
    Ordered,
    /// Every unordered pair: `n * (n - 1) / 2` pairs.
    Unordered,
}

/// Options recognised by the metric engines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricConfig {
    /// Window size for window metrics; derived from the reference when `None`.
    pub window_size: Option<usize>,
    /// Return `1 - score` so that 1 means identical segmentations.
    pub one_minus: bool,
    /// Pad sequences so edge boundaries are seen by full windows
    /// (Lamprier et al., 2007).
    pub lamprier_et_al_2007_fix: bool,
    /// Treat raw sequences handed to window metrics as masses.
    pub convert_from_masses: bool,
    /// Return the intermediate agreement parts instead of the coefficient.
    pub return_parts: bool,
    /// Pair enumeration for pairwise aggregation.
    pub pairing_mode: PairingMode,
}

impl MetricConfig {
    /// Create a configuration with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set an explicit window size.
    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Toggle `1 - score`.
    #[must_use]
    pub fn with_one_minus(mut self, enable: bool) -> Self {
        self.one_minus = enable;
        self
    }

    /// Toggle the edge-effect fix.
    #[must_use]
    pub fn with_lamprier_fix(mut self, enable: bool) -> Self {
        self.lamprier_et_al_2007_fix = enable;
        self
    }

    /// Toggle mass input for window metrics.
    #[must_use]
    pub fn with_convert_from_masses(mut self, enable: bool) -> Self {
        self.convert_from_masses = enable;
        self
    }

    /// Toggle returning agreement parts.
    #[must_use]
    pub fn with_return_parts(mut self, enable: bool) -> Self {
        self.return_parts = enable;
        self
    }

    /// Set the pair enumeration.
    #[must_use]
    pub fn with_pairing_mode(mut self, mode: PairingMode) -> Self {
        self.pairing_mode = mode;
        self
    }

    /// Reject option values no engine can use.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == Some(0) {
            return Err(Error::configuration("window_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = MetricConfig::default();
        assert_eq!(c.window_size, None);
        assert!(!c.one_minus);
        assert!(!c.lamprier_et_al_2007_fix);
        assert!(!c.convert_from_masses);
        assert!(!c.return_parts);
        assert_eq!(c.pairing_mode, PairingMode::Ordered);
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = MetricConfig::new().with_window_size(0).validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_from_json() {
        let c = MetricConfig::from_json(
            r#"{"lamprier_et_al_2007_fix": true, "pairing_mode": "unordered"}"#,
        )
        .unwrap();
        assert!(c.lamprier_et_al_2007_fix);
        assert_eq!(c.pairing_mode, PairingMode::Unordered);
        assert_eq!(c.window_size, None);
    }

    #[test]
    fn test_from_json_unknown_key() {
        let err = MetricConfig::from_json(r#"{"one_minus": true, "permuted": true}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_from_json_validates() {
        let err = MetricConfig::from_json(r#"{"window_size": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
