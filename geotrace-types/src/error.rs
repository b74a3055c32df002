//! Error type used by the crate.

use thiserror::Error;

/// Errors of building or decoding GeoJSON values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoJsonError {
    /// Input is not valid JSON, or a JSON value has an unexpected shape. `path` points at the offending value, e.g.
    /// `$.features[2].geometry.coordinates`.
    #[error("failed to parse GeoJSON at {path}: {message}")]
    Parse {
        /// JSON path of the value that could not be parsed.
        path: String,
        /// What was wrong with the value.
        message: String,
    },
    /// `type` field of a geometry has a value that is not one of the seven GeoJSON geometry types.
    #[error("unknown geometry type: {0:?}")]
    UnknownGeometryType(String),
    /// Bounding box must consist of exactly 4 or 6 numbers.
    #[error("bounding box must have 4 or 6 values, got {len}")]
    InvalidBoundingBox {
        /// Number of values that was given.
        len: usize,
    },
    /// Position must have at least longitude and latitude.
    #[error("position must have at least 2 values, got {len}")]
    InvalidPosition {
        /// Number of values that was given.
        len: usize,
    },
    /// Polygon ring is too short or not closed.
    #[error("invalid linear ring: {0}")]
    InvalidLinearRing(String),
}

impl GeoJsonError {
    pub(crate) fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for GeoJsonError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse {
            path: format!("line {} column {}", value.line(), value.column()),
            message: value.to_string(),
        }
    }
}
