//! # segeval-core
//!
//! Core types for segeval: shared data structures used by every metric.
//!
//! This crate provides:
//! - **Segmentations**: mass and position forms, conversion, boundary counts
//! - **Datasets**: coder → item → segmentation, with shape validation
//! - **Errors**: the error taxonomy every engine reports through

#![warn(missing_docs)]

pub mod dataset;
pub mod error;
pub mod segmentation;

pub use dataset::{CoderId, Dataset, Item, ItemId};
pub use error::{Error, Result};
pub use segmentation::{
    boundaries, check_unit_count, masses_to_positions, positions_to_masses, BoundaryPair,
    Segmentation,
};
