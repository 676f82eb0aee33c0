//! # nesting-svg
//!
//! A Rust library for rendering nesting part geometry as SVG.
//!
//! ## Features
//!
//! - **Part to SVG**: Convert part contours (bulge polylines, elliptical arcs,
//!   circles, ellipses and NURBS splines) to an SVG document
//! - **Invalid geometry overlay**: Draw curves reported as invalid on top of the part
//!
//! ## Example
//!
//! ```rust,ignore
//! use nesting_svg::{parse_part, render_part};
//!
//! let json = std::fs::read_to_string("part.json").unwrap();
//! let part = parse_part(&json).unwrap();
//! let svg = render_part(&part, None, 1.0).unwrap();
//! std::fs::write("part.svg", svg).unwrap();
//! ```
//!
//! ## Example - Custom spline evaluation
//!
//! ```rust,ignore
//! use nesting_svg::{DeBoorEvaluator, RenderOptions, Renderer};
//!
//! let renderer = Renderer::new(RenderOptions::default().with_stroke_width(0.5))
//!     .with_evaluator(DeBoorEvaluator);
//! let svg = renderer.render_part(&part, Some(&invalid_curves))?;
//! ```

pub mod nesting;

// Re-export commonly used items
pub use nesting::{
    ConvertError, CurveEvaluator, DeBoorEvaluator, Part, PartJob, RenderOptions, Renderer,
    parse_invalid_geometry, parse_job, parse_part, read_invalid_geometry, read_job,
    render_empty_canvas, render_part,
};
