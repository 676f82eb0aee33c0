//! Contour and curve dispatch.
//!
//! Composite contours and curves are flattened into a single path; circles and
//! axis-aligned ellipses keep their dedicated SVG elements.

use super::error::{ConvertError, Result};
use super::geometry::axis_aligned_radii;
use super::path::{PathCommand, PathData, elliptical_arc_path, spline_path, vertex_path};
use super::style::RenderOptions;
use super::types::{Circle, Contour, Curve, Point, RectangularShape};
use tracing::debug;

/// Drawing element produced for one contour or curve
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// `<path>` with an optional stroke color override
    Path { data: PathData, stroke: Option<String> },
    Circle(Circle),
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Polyline(Vec<Point>),
}

impl Element {
    fn path(data: PathData) -> Self {
        Element::Path { data, stroke: None }
    }
}

/// Render a closed contour
pub fn render_contour(
    contour: &Contour,
    move_to_start: bool,
    options: &RenderOptions,
) -> Result<Element> {
    match contour {
        Contour::CompositeClosed(chunks) => {
            debug!("Rendering closed composite with {} chunks", chunks.len());
            let mut data = PathData::new();
            chunk_path(chunks, move_to_start, options, &mut data)?;
            data.push(PathCommand::ClosePath);
            Ok(Element::path(data))
        }
        Contour::Loop(vertices) => {
            let mut data = PathData::new();
            vertex_path(vertices, move_to_start, true, &mut data);
            Ok(Element::path(data))
        }
        Contour::Circle(circle) => Ok(Element::Circle(*circle)),
        Contour::Ellipse(ellipse) => {
            let (rx, ry) = axis_aligned_radii(ellipse)?;
            Ok(Element::Ellipse {
                cx: ellipse.centre.x,
                cy: ellipse.centre.y,
                rx,
                ry,
            })
        }
        Contour::Unknown(tag) => Err(ConvertError::UnknownGeometryType(tag.clone())),
    }
}

/// Append an open curve to `path`
pub fn render_curve(
    curve: &Curve,
    move_to_start: bool,
    options: &RenderOptions,
    path: &mut PathData,
) -> Result<()> {
    match curve {
        Curve::CompositeOpen(chunks) => chunk_path(chunks, move_to_start, options, path),
        Curve::Polyline(vertices) => {
            vertex_path(vertices, move_to_start, false, path);
            Ok(())
        }
        Curve::EllipticalArc(arc) => {
            elliptical_arc_path(arc, move_to_start, path);
            Ok(())
        }
        Curve::Nurbs(spline) => spline_path(
            spline,
            move_to_start,
            options.evaluator(),
            options.spline_samples,
            path,
        ),
        Curve::Unknown(tag) => Err(ConvertError::UnknownGeometryType(tag.clone())),
    }
}

/// Render an open curve as its own path
pub fn curve_to_path(
    curve: &Curve,
    move_to_start: bool,
    options: &RenderOptions,
) -> Result<PathData> {
    let mut data = PathData::new();
    render_curve(curve, move_to_start, options, &mut data)?;
    Ok(data)
}

/// Concatenate chunks; only the first chunk that draws anything may start with a move
fn chunk_path(
    chunks: &[Curve],
    mut move_to_start: bool,
    options: &RenderOptions,
    path: &mut PathData,
) -> Result<()> {
    let start = path.len();
    for chunk in chunks {
        render_curve(chunk, move_to_start, options, path)?;
        move_to_start &= path.len() == start;
    }
    Ok(())
}

/// Closed outline of a rectangular part anchored at the origin
pub fn rectangle_points(shape: &RectangularShape, winding_cw: bool) -> Vec<Point> {
    let l = shape.length;
    let w = shape.width;

    if winding_cw {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, w),
            Point::new(l, w),
            Point::new(l, 0.0),
            Point::new(0.0, 0.0),
        ]
    } else {
        vec![
            Point::new(0.0, 0.0),
            Point::new(l, 0.0),
            Point::new(l, w),
            Point::new(0.0, w),
            Point::new(0.0, 0.0),
        ]
    }
}
