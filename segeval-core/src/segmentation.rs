//! Segmentation representations and lossless conversion between them.
//!
//! A segmentation of `n` units can be written two ways:
//!
//! | Form | Example (`n = 6`) | Meaning |
//! |------|-------------------|---------|
//! | **Masses** | `[3, 3]` | Length of each contiguous segment |
//! | **Positions** | `[1, 1, 1, 2, 2, 2]` | Segment label of each unit |
//!
//! A boundary sits between units `i` and `i + 1` iff their labels differ, so
//! a segmentation of `n` units has `n - 1` potential boundary positions.
//!
//! # Example
//!
//! ```rust
//! use segeval_core::segmentation::{masses_to_positions, positions_to_masses};
//!
//! let positions = masses_to_positions(&[3, 3]).unwrap();
//! assert_eq!(positions, vec![1, 1, 1, 2, 2, 2]);
//! assert_eq!(positions_to_masses(&positions), vec![3, 3]);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Expand segment masses into per-unit segment labels.
///
/// Labels start at 1 and increase by one per segment.
///
/// # Errors
///
/// `MalformedSegmentation` if any mass is zero.
pub fn masses_to_positions(masses: &[usize]) -> Result<Vec<usize>> {
    let mut positions = Vec::with_capacity(masses.iter().sum());
    for (i, &mass) in masses.iter().enumerate() {
        if mass == 0 {
            return Err(Error::malformed(format!(
                "segment {} has mass 0; masses must be positive",
                i
            )));
        }
        positions.extend(std::iter::repeat(i + 1).take(mass));
    }
    Ok(positions)
}

/// Collapse maximal runs of equal consecutive labels into their lengths.
#[must_use]
pub fn positions_to_masses(positions: &[usize]) -> Vec<usize> {
    let mut masses = Vec::new();
    let mut iter = positions.iter();
    let Some(mut current) = iter.next() else {
        return masses;
    };
    let mut run = 1;
    for label in iter {
        if label == current {
            run += 1;
        } else {
            masses.push(run);
            current = label;
            run = 1;
        }
    }
    masses.push(run);
    masses
}

/// Boundary indicator for each of the `len - 1` potential boundary positions.
#[must_use]
pub fn boundaries(positions: &[usize]) -> Vec<bool> {
    positions.windows(2).map(|w| w[0] != w[1]).collect()
}

/// Check that a mass and a position form describe the same number of units.
///
/// Returns the shared unit count.
pub fn check_unit_count(masses: &[usize], positions: &[usize]) -> Result<usize> {
    let from_masses: usize = masses.iter().sum();
    if from_masses != positions.len() {
        return Err(Error::malformed(format!(
            "masses cover {} units but positions cover {}",
            from_masses,
            positions.len()
        )));
    }
    Ok(from_masses)
}

/// Boundaries a coder placed on an item, against the positions available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryPair {
    /// Number of boundaries placed.
    pub boundaries: usize,
    /// Potential boundary positions (`unit_count - 1`).
    pub positions: usize,
}

/// A single coder's segmentation of one item, in either form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segmentation {
    /// Run lengths of contiguous segments.
    Masses(Vec<usize>),
    /// Segment label per unit.
    Positions(Vec<usize>),
}

impl Segmentation {
    /// Segmentation from masses.
    #[must_use]
    pub fn masses(masses: impl Into<Vec<usize>>) -> Self {
        Self::Masses(masses.into())
    }

    /// Segmentation from positions.
    #[must_use]
    pub fn positions(positions: impl Into<Vec<usize>>) -> Self {
        Self::Positions(positions.into())
    }

    /// Number of units covered.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        match self {
            Self::Masses(m) => m.iter().sum(),
            Self::Positions(p) => p.len(),
        }
    }

    /// Reject empty segmentations and zero masses.
    pub fn validate(&self) -> Result<()> {
        if let Self::Masses(m) = self {
            if let Some(i) = m.iter().position(|&mass| mass == 0) {
                return Err(Error::malformed(format!(
                    "segment {} has mass 0; masses must be positive",
                    i
                )));
            }
        }
        if self.unit_count() == 0 {
            return Err(Error::malformed("segmentation covers no units"));
        }
        Ok(())
    }

    /// Position form, converting if needed.
    pub fn to_positions(&self) -> Result<Vec<usize>> {
        match self {
            Self::Masses(m) => masses_to_positions(m),
            Self::Positions(p) => Ok(p.clone()),
        }
    }

    /// Mass form, converting if needed.
    pub fn to_masses(&self) -> Result<Vec<usize>> {
        self.validate()?;
        match self {
            Self::Masses(m) => Ok(m.clone()),
            Self::Positions(p) => Ok(positions_to_masses(p)),
        }
    }

    /// Number of boundaries placed.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        match self {
            Self::Masses(m) => m.len().saturating_sub(1),
            Self::Positions(p) => p.windows(2).filter(|w| w[0] != w[1]).count(),
        }
    }

    /// Boundaries placed against potential boundary positions.
    pub fn boundary_pair(&self) -> Result<BoundaryPair> {
        self.validate()?;
        Ok(BoundaryPair {
            boundaries: self.boundary_count(),
            positions: self.unit_count() - 1,
        })
    }
}

impl From<Vec<usize>> for Segmentation {
    fn from(masses: Vec<usize>) -> Self {
        Self::Masses(masses)
    }
}
