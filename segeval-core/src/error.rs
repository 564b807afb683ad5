//! Error types for segeval-core.

use thiserror::Error;

/// Result type for segeval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for segeval operations.
///
/// Every failure aborts the whole computation; there is no partial result.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A mass is zero, a segmentation is empty, or two forms of the same
    /// segmentation disagree on unit count.
    #[error("Malformed segmentation: {0}")]
    MalformedSegmentation(String),

    /// Coders disagree on how many (or which) items they annotated.
    #[error("Dataset shape error: {0}")]
    DatasetShape(String),

    /// Two segmentations compared directly cover a different number of units.
    #[error("Segmentation length mismatch: {0}")]
    SegmentationLengthMismatch(String),

    /// Invalid option value, e.g. a window size of zero.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The statistic is undefined for this input (A_e == 1, too few coders).
    #[error("Degenerate statistic: {0}")]
    DegenerateStatistic(String),

    /// A configuration document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed segmentation error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSegmentation(msg.into())
    }

    /// Create a dataset shape error.
    #[must_use]
    pub fn dataset_shape(msg: impl Into<String>) -> Self {
        Self::DatasetShape(msg.into())
    }

    /// Create a length mismatch error.
    #[must_use]
    pub fn length_mismatch(msg: impl Into<String>) -> Self {
        Self::SegmentationLengthMismatch(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a degenerate statistic error.
    #[must_use]
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateStatistic(msg.into())
    }
}
