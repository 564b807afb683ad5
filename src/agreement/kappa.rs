//! Fleiss' multi-coder Kappa over segment boundaries.
//!
//! Unlike Pi, chance agreement keeps each coder's own boundary rate: for
//! every unordered coder pair and every item, the chance that both place a
//! boundary is the product of their rates on that item. `A_e` is the mean of
//! those products.

use super::{actual_agreement_linear, mean};
use crate::config::{MetricConfig, PairingMode};
use crate::framework::{apply_metric, AgreementParts, MetricResult};
use crate::pairwise::coder_pairs;
use crate::{Dataset, Item, Result};
use rust_decimal::Decimal;

/// Fleiss' Kappa, or its `(A_a, A_e)` parts when `config.return_parts` is set.
pub fn fleiss_kappa_linear(dataset: &Dataset, config: &MetricConfig) -> Result<MetricResult> {
    apply_metric(dataset, config, kappa_parts)
}

/// Observed and expected agreement for Kappa.
pub fn kappa_parts(items: &[Item], _config: &MetricConfig) -> Result<AgreementParts> {
    let agreement = actual_agreement_linear(items)?;
    let actual = agreement.observed()?;

    let rates = agreement.boundary_rates()?;
    let coders: Vec<&str> = rates.keys().map(String::as_str).collect();
    let mut products = Vec::new();
    for (a, b) in coder_pairs(&coders, PairingMode::Unordered) {
        products.extend(rates[a].iter().zip(&rates[b]).map(|(p, q)| *p * *q));
    }
    let expected = mean(&products)?;

    log::debug!("kappa: A_a={} A_e={}", actual, expected);
    Ok(AgreementParts { actual, expected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_perfect_agreement() {
        let d = Dataset::new()
            .with_masses("an1", "doc1", vec![3, 7])
            .with_masses("an2", "doc1", vec![3, 7]);
        let kappa = fleiss_kappa_linear(&d, &MetricConfig::new()).unwrap();
        assert_eq!(kappa.score(), Some(Decimal::ONE));
    }

    #[test]
    fn test_per_coder_rates() {
        // an1 marks every position, an2 none: products are all zero.
        let d = Dataset::new()
            .with_masses("an1", "doc", vec![1, 1, 1, 1])
            .with_masses("an2", "doc", vec![4]);
        let parts = fleiss_kappa_linear(&d, &MetricConfig::new().with_return_parts(true))
            .unwrap()
            .parts()
            .unwrap();
        assert_eq!(parts.actual, Decimal::ZERO);
        assert_eq!(parts.expected, Decimal::ZERO);
        assert_eq!(parts.coefficient().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_matches_pi_when_rates_equal() {
        let d = Dataset::new()
            .with_masses("an1", "doc", vec![2, 3])
            .with_masses("an2", "doc", vec![3, 2]);
        let kappa = fleiss_kappa_linear(&d, &MetricConfig::new().with_return_parts(true))
            .unwrap()
            .parts()
            .unwrap();
        assert_eq!(kappa.actual, dec!(0.5));
        assert_eq!(kappa.expected, dec!(0.0625));
    }

    #[test]
    fn test_three_coders() {
        let d = Dataset::new()
            .with_masses("a", "doc", vec![2, 2, 2])
            .with_masses("b", "doc", vec![2, 2, 2])
            .with_masses("c", "doc", vec![6]);
        let parts = fleiss_kappa_linear(&d, &MetricConfig::new().with_return_parts(true))
            .unwrap()
            .parts()
            .unwrap();
        // a/b agree on all 5 positions, each disagrees with c on 2 of 5.
        assert_eq!(parts.actual, dec!(11) / dec!(15));
        // rates 0.4, 0.4, 0: products 0.16, 0, 0
        assert!((parts.expected - dec!(0.16) / dec!(3)).abs() < dec!(0.0000000001));
    }
}
