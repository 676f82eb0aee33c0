//! Error types for part conversion.

use std::io;
use thiserror::Error;

/// Errors that abort a part conversion. No partial document is produced.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// No bounding box could be derived for the canvas.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// A contour or curve carries a type tag outside the recognized set.
    #[error("Unknown geometry type: '{0}'")]
    UnknownGeometryType(String),

    /// The geometry is recognized but cannot be expressed (rotated ellipse contours).
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// A spline was reached but no curve evaluator is configured.
    #[error("Missing capability: {0}")]
    MissingCapability(String),

    /// The curve evaluator rejected the spline data.
    #[error("Invalid spline: {0}")]
    InvalidSpline(String),

    /// JSON decoding error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error while reading or writing documents.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
