//! Error types used by the crate.

use geotrace_types::GeoJsonError;
use thiserror::Error;

/// Error of the turf algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TurfError {
    /// Error reading or building GeoJSON values.
    #[error(transparent)]
    GeoJson(#[from] GeoJsonError),
    /// A feature of the input cannot be processed by the algorithm.
    #[error("feature {index} cannot be processed: {reason}")]
    UnprocessableFeature {
        /// Index of the feature in the input collection.
        index: usize,
        /// What is wrong with the feature.
        reason: String,
    },
    /// Algorithm options are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Input value cannot be processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
