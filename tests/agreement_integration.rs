//! End-to-end agreement and pairwise aggregation over whole datasets.

use proptest::prelude::*;
use rust_decimal_macros::dec;
use segeval::prelude::*;
use segeval::{artstein_poesio_bias_linear, compute_pairwise, pairwise_window_diff};

use fuzz_strategies::position_pair_strategy;

fn three_coders() -> Dataset {
    Dataset::new()
        .with_masses("an1", "doc1", vec![3, 3])
        .with_masses("an2", "doc1", vec![2, 4])
        .with_masses("an3", "doc1", vec![3, 3])
        .with_masses("an1", "doc2", vec![1, 4, 1])
        .with_masses("an2", "doc2", vec![1, 5])
        .with_masses("an3", "doc2", vec![2, 3, 1])
}

#[test]
fn perfect_agreement_is_one() {
    let dataset = Dataset::new()
        .with_masses("an1", "doc1", vec![2, 3, 5])
        .with_masses("an2", "doc1", vec![2, 3, 5])
        .with_masses("an1", "doc2", vec![4, 4])
        .with_masses("an2", "doc2", vec![4, 4]);

    let pi = fleiss_pi_linear(&dataset, &MetricConfig::new()).unwrap();
    assert_eq!(pi.score(), Some(Decimal::ONE));
    let kappa = fleiss_kappa_linear(&dataset, &MetricConfig::new()).unwrap();
    assert_eq!(kappa.score(), Some(Decimal::ONE));
}

#[test]
fn unequal_item_counts_are_rejected() {
    let dataset = Dataset::new()
        .with_masses("an1", "a", vec![2, 2])
        .with_masses("an1", "b", vec![2, 2])
        .with_masses("an1", "c", vec![2, 2])
        .with_masses("an2", "a", vec![2, 2])
        .with_masses("an2", "b", vec![2, 2])
        .with_masses("an2", "c", vec![2, 2])
        .with_masses("an2", "d", vec![2, 2]);

    match fleiss_pi_linear(&dataset, &MetricConfig::new()) {
        Err(Error::DatasetShape(msg)) => assert_eq!(msg, "Unequal number of items contained."),
        other => panic!("expected a shape error, got {:?}", other),
    }
    assert!(matches!(
        pairwise_window_diff(&dataset, &MetricConfig::new()),
        Err(Error::DatasetShape(_))
    ));
}

#[test]
fn unequal_item_lengths_are_rejected() {
    let dataset = Dataset::new()
        .with_masses("an1", "doc", vec![3, 3])
        .with_masses("an2", "doc", vec![3, 4]);
    assert!(matches!(
        fleiss_pi_linear(&dataset, &MetricConfig::new()),
        Err(Error::SegmentationLengthMismatch(_))
    ));
}

#[test]
fn pairing_modes_count_pairs() {
    let dataset = Dataset::new()
        .with_masses("an1", "doc", vec![3, 3])
        .with_masses("an2", "doc", vec![2, 4])
        .with_masses("an3", "doc", vec![1, 5]);
    let config = MetricConfig::new().with_window_size(2);

    let ordered = pairwise_window_diff(&dataset, &config).unwrap();
    assert_eq!(ordered.count, 6);

    let unordered = config.with_pairing_mode(PairingMode::Unordered);
    let stats = pairwise_window_diff(&dataset, &unordered).unwrap();
    assert_eq!(stats.count, 3);
}

#[test]
fn pairwise_statistics() {
    // an1 agrees exactly with an3 on doc1 and differs everywhere else
    let config = MetricConfig::new()
        .with_window_size(2)
        .with_pairing_mode(PairingMode::Unordered);
    let stats = pairwise_window_diff(&three_coders(), &config).unwrap();
    assert_eq!(stats.count, 6);
    assert!(stats.mean > Decimal::ZERO && stats.mean < Decimal::ONE);
    assert!(stats.variance > Decimal::ZERO);
    assert!(stats.std_err < stats.std_dev);
}

#[test]
fn custom_pairwise_metric() {
    let config = MetricConfig::new().with_pairing_mode(PairingMode::Unordered);
    let stats = compute_pairwise(&three_coders(), &config, |h, r| {
        Ok(Decimal::from(h.len()) - Decimal::from(r.len()))
    })
    .unwrap();
    assert_eq!(stats.mean, Decimal::ZERO);
    assert_eq!(stats.variance, Decimal::ZERO);
}

#[test]
fn return_parts_round_trip() {
    let parts_config = MetricConfig::new().with_return_parts(true);
    let parts = fleiss_pi_linear(&three_coders(), &parts_config)
        .unwrap()
        .parts()
        .unwrap();
    let score = fleiss_pi_linear(&three_coders(), &MetricConfig::new())
        .unwrap()
        .score()
        .unwrap();
    assert_eq!(parts.coefficient().unwrap(), score);
}

#[test]
fn dataset_from_json() {
    let json = r#"{
        "an1": {"doc": {"masses": [5, 5]}},
        "an2": {"doc": {"positions": [1, 1, 1, 1, 1, 2, 2, 2, 2, 2]}}
    }"#;
    let dataset: Dataset = serde_json::from_str(json).unwrap();
    assert_eq!(dataset.coder_count(), 2);
    let pi = fleiss_pi_linear(&dataset, &MetricConfig::new()).unwrap();
    assert_eq!(pi.score(), Some(Decimal::ONE));
}

#[test]
fn registry_covers_every_metric() {
    let registry = MetricRegistry::with_defaults();
    let config = MetricConfig::from_json(r#"{"window_size": 2}"#).unwrap();
    for id in MetricId::ALL {
        registry
            .evaluate(id, &three_coders(), &config)
            .unwrap_or_else(|e| panic!("{} failed: {}", id, e));
    }
}

#[test]
fn bias_of_opposed_rates() {
    let dataset = Dataset::new()
        .with_masses("an1", "doc", vec![1, 1, 1, 1])
        .with_masses("an2", "doc", vec![4]);
    let bias = artstein_poesio_bias_linear(&dataset, &MetricConfig::new()).unwrap();
    assert_eq!(bias, dec!(0.25));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn pi_never_exceeds_one((a, b) in position_pair_strategy()) {
        prop_assume!(a.len() >= 2);
        let dataset = Dataset::new()
            .with_positions("a", "doc", a)
            .with_positions("b", "doc", b);
        if let Ok(MetricResult::Score(pi)) = fleiss_pi_linear(&dataset, &MetricConfig::new()) {
            prop_assert!(pi <= Decimal::ONE, "pi = {}", pi);
        }
        if let Ok(MetricResult::Score(kappa)) = fleiss_kappa_linear(&dataset, &MetricConfig::new()) {
            prop_assert!(kappa <= Decimal::ONE, "kappa = {}", kappa);
        }
    }

    #[test]
    fn agreement_parts_are_probabilities(
        items in prop::collection::vec(position_pair_strategy(), 1..5),
    ) {
        prop_assume!(items.iter().all(|(a, _)| a.len() >= 2));
        let mut dataset = Dataset::new();
        for (i, (a, b)) in items.into_iter().enumerate() {
            let id = format!("doc{}", i);
            dataset = dataset
                .with_positions("a", id.clone(), a)
                .with_positions("b", id, b);
        }
        let config = MetricConfig::new().with_return_parts(true);
        let pi = fleiss_pi_linear(&dataset, &config).unwrap().parts().unwrap();
        let kappa = fleiss_kappa_linear(&dataset, &config).unwrap().parts().unwrap();
        for parts in [pi, kappa] {
            prop_assert!(parts.actual >= Decimal::ZERO && parts.actual <= Decimal::ONE);
            prop_assert!(parts.expected >= Decimal::ZERO && parts.expected <= Decimal::ONE);
        }
        prop_assert_eq!(pi.actual, kappa.actual);
    }

    #[test]
    fn single_item_bias_is_non_negative((a, b) in position_pair_strategy()) {
        prop_assume!(a.len() >= 2);
        let dataset = Dataset::new()
            .with_positions("a", "doc", a)
            .with_positions("b", "doc", b);
        let bias = artstein_poesio_bias_linear(&dataset, &MetricConfig::new()).unwrap();
        prop_assert!(bias >= Decimal::ZERO, "bias = {}", bias);
    }

    #[test]
    fn self_agreement_is_perfect((a, _b) in position_pair_strategy()) {
        prop_assume!(a.len() >= 2);
        // at least one boundary and at least one gap without one
        prop_assume!(a.windows(2).any(|w| w[0] != w[1]));
        prop_assume!(a.windows(2).any(|w| w[0] == w[1]));
        let dataset = Dataset::new()
            .with_positions("a", "doc", a.clone())
            .with_positions("b", "doc", a);
        let pi = fleiss_pi_linear(&dataset, &MetricConfig::new()).unwrap();
        prop_assert_eq!(pi.score(), Some(Decimal::ONE));
    }
}
