//! Nesting part geometry to SVG conversion
//!
//! This module decodes part descriptions produced by a nesting service and
//! converts their contours (and any reported invalid geometry) to SVG.

pub mod bounds;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod path;
pub mod spline;
pub mod style;
pub mod svg;
pub mod types;

// Re-export main public API
pub use error::{ConvertError, Result};
pub use parser::{
    parse_invalid_geometry, parse_job, parse_part, read_invalid_geometry, read_job,
};
pub use spline::{CurveEvaluator, DeBoorEvaluator};
pub use style::RenderOptions;
pub use svg::{Renderer, render_empty_canvas, render_part};
pub use types::*;
