//! Fleiss' multi-coder Pi over segment boundaries.
//!
//! Chance agreement assumes a single boundary rate shared by every coder:
//! the flat mean of each coder's per-item rate. Two coders drawing from that
//! rate independently both place a boundary with probability `P_e_seg²`.
//!
//! # Example
//!
//! ```rust
//! use segeval::{fleiss_pi_linear, Dataset, MetricConfig};
//! use rust_decimal::Decimal;
//!
//! let dataset = Dataset::new()
//!     .with_masses("an1", "doc1", vec![5, 5])
//!     .with_masses("an2", "doc1", vec![5, 5]);
//!
//! let pi = fleiss_pi_linear(&dataset, &MetricConfig::new()).unwrap();
//! assert_eq!(pi.score(), Some(Decimal::ONE));
//! ```

use super::{actual_agreement_linear, mean};
use crate::config::MetricConfig;
use crate::framework::{apply_metric, AgreementParts, MetricResult};
use crate::{Dataset, Item, Result};
use rust_decimal::Decimal;

/// Fleiss' Pi, or its `(A_a, A_e)` parts when `config.return_parts` is set.
pub fn fleiss_pi_linear(dataset: &Dataset, config: &MetricConfig) -> Result<MetricResult> {
    apply_metric(dataset, config, pi_parts)
}

/// Observed and expected agreement for Pi.
pub fn pi_parts(items: &[Item], _config: &MetricConfig) -> Result<AgreementParts> {
    let agreement = actual_agreement_linear(items)?;
    let actual = agreement.observed()?;

    let rates: Vec<Decimal> = agreement
        .boundary_rates()?
        .into_values()
        .flatten()
        .collect();
    let p_e_seg = mean(&rates)?;
    let expected = p_e_seg * p_e_seg;

    log::debug!("pi: A_a={} P_e_seg={} A_e={}", actual, p_e_seg, expected);
    Ok(AgreementParts { actual, expected })
}
