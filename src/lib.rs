//! # segeval
//!
//! Agreement and divergence statistics for text segmentation.
//!
//! - **Agreement**: Fleiss' Pi and Kappa over segment boundaries, plus bias
//! - **Window metrics**: WindowDiff (with the Lamprier et al. edge fix) and Pk
//! - **Aggregation**: mean, standard deviation, variance and standard error
//!   over every coder pair in a dataset
//!
//! Core types (`Dataset`, `Segmentation`, `Error`) live in `segeval-core` and
//! are re-exported here. All scores are exact decimals (`rust_decimal`), so
//! results do not depend on evaluation order.
//!
//! ## Quick Start
//!
//! ```rust
//! use segeval::{fleiss_pi_linear, pairwise_window_diff, Dataset, MetricConfig};
//!
//! let dataset = Dataset::new()
//!     .with_masses("an1", "doc1", vec![3, 3])
//!     .with_masses("an2", "doc1", vec![2, 4]);
//!
//! let config = MetricConfig::new().with_window_size(2);
//! let stats = pairwise_window_diff(&dataset, &config).unwrap();
//! println!("WindowDiff: {}", stats);
//!
//! let pi = fleiss_pi_linear(&dataset, &MetricConfig::new()).unwrap();
//! println!("Pi: {:?}", pi.score());
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `MetricConfig`, `PairingMode` |
//! | [`framework`] | `apply_metric`, `MetricResult`, `AgreementParts`, `Tally` |
//! | [`agreement`] | Pi, Kappa, bias |
//! | [`window`] | WindowDiff, Pk, window size |
//! | [`pairwise`] | Coder pair enumeration and aggregation |
//! | [`stats`] | `AggregateStatistics` |
//! | [`registry`] | `MetricId`, `MetricRegistry` |

#![warn(missing_docs)]

pub mod agreement;
pub mod config;
pub mod framework;
pub mod pairwise;
pub mod registry;
pub mod stats;
pub mod window;

// Re-export segeval-core types
pub use segeval_core::{
    boundaries, check_unit_count, masses_to_positions, positions_to_masses, BoundaryPair,
    CoderId, Dataset, Error, Item, ItemId, Result, Segmentation,
};

pub use agreement::{artstein_poesio_bias_linear, fleiss_kappa_linear, fleiss_pi_linear};
pub use config::{MetricConfig, PairingMode};
pub use framework::{apply_metric, AgreementParts, MetricResult, Tally};
pub use pairwise::compute_pairwise;
pub use registry::{Evaluation, MetricId, MetricRegistry};
pub use stats::AggregateStatistics;
pub use window::{compute_window_size, pairwise_pk, pairwise_window_diff, pk, window_diff};

/// Exact decimal type used for every score.
pub use rust_decimal::Decimal;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use segeval::prelude::*;
    //!
    //! let config = MetricConfig::new().with_convert_from_masses(true);
    //! let score = window_diff(&[2, 4], &[3, 3], &config).unwrap();
    //! assert!(score > Decimal::ZERO);
    //! ```
    pub use crate::agreement::{fleiss_kappa_linear, fleiss_pi_linear};
    pub use crate::config::{MetricConfig, PairingMode};
    pub use crate::framework::{AgreementParts, MetricResult};
    pub use crate::registry::{Evaluation, MetricId, MetricRegistry};
    pub use crate::stats::AggregateStatistics;
    pub use crate::window::{pairwise_pk, pairwise_window_diff, pk, window_diff};
    pub use crate::{Dataset, Decimal, Error, Result, Segmentation};
}
