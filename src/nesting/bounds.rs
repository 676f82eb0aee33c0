use super::error::{ConvertError, Result};
use super::geometry::{elliptical_arc_endpoints, fmt_num};
use super::types::{Curve, Part, PartBox, Point};
use std::fmt;
use tracing::{debug, warn};

/// Margin around an explicit part box, on the lower corner
const BOX_MARGIN: f64 = 1.0;
/// Margin around invalid geometry end points
const INVALID_GEOMETRY_MARGIN: f64 = 10.0;

/// Visible canvas of the document (`viewBox`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            fmt_num(self.x),
            fmt_num(self.y),
            fmt_num(self.width),
            fmt_num(self.height)
        )
    }
}

impl Canvas {
    /// Canvas around an explicit box, snapped outward to whole units with a margin
    pub fn from_box(b: &PartBox) -> Self {
        let x = b.x1.floor() - BOX_MARGIN;
        let y = b.y1.floor() - BOX_MARGIN;
        Self {
            x,
            y,
            width: b.x2.ceil() - x + 2.0 * BOX_MARGIN,
            height: b.y2.ceil() - y + 2.0 * BOX_MARGIN,
        }
    }

    /// Canvas spanning the first and last points of the given curves
    pub fn from_curves(curves: &[Curve]) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for curve in curves {
            match (curve_start(curve), curve_end(curve)) {
                (Some(start), Some(end)) => {
                    min_x = min_x.min(start.x);
                    min_y = min_y.min(start.y);
                    max_x = max_x.max(end.x);
                    max_y = max_y.max(end.y);
                }
                _ => warn!("Invalid geometry curve without end points ignored for bounds"),
            }
        }

        if !min_x.is_finite() || !min_y.is_finite() || !max_x.is_finite() || !max_y.is_finite() {
            return None;
        }

        let x = min_x - INVALID_GEOMETRY_MARGIN;
        let y = min_y - INVALID_GEOMETRY_MARGIN;
        Some(Self {
            x,
            y,
            width: max_x + INVALID_GEOMETRY_MARGIN - x,
            height: max_y + INVALID_GEOMETRY_MARGIN - y,
        })
    }
}

/// Canvas for a part: its box if present, else the invalid geometry end points
pub fn part_canvas(part: &Part, invalid_geometry: Option<&[Curve]>) -> Result<Canvas> {
    if let Some(b) = &part.bounding_box {
        let canvas = Canvas::from_box(b);
        debug!("Canvas {} from part box", canvas);
        return Ok(canvas);
    }

    if let Some(curves) = invalid_geometry
        && !curves.is_empty()
        && let Some(canvas) = Canvas::from_curves(curves)
    {
        debug!("Canvas {} from {} invalid curves", canvas, curves.len());
        return Ok(canvas);
    }

    Err(ConvertError::Geometry(
        "part has no Box and no invalid geometry to derive bounds from".to_string(),
    ))
}

/// First point of a curve
pub fn curve_start(curve: &Curve) -> Option<Point> {
    match curve {
        Curve::CompositeOpen(chunks) => chunks.iter().find_map(curve_start),
        Curve::Polyline(vertices) => vertices.first().map(|v| v.point()),
        Curve::EllipticalArc(arc) => Some(elliptical_arc_endpoints(&arc.ellipse, &arc.range).start),
        Curve::Nurbs(spline) => spline.control_points.first().copied(),
        Curve::Unknown(_) => None,
    }
}

/// Last point of a curve
pub fn curve_end(curve: &Curve) -> Option<Point> {
    match curve {
        Curve::CompositeOpen(chunks) => chunks.iter().rev().find_map(curve_end),
        Curve::Polyline(vertices) => vertices.last().map(|v| v.point()),
        Curve::EllipticalArc(arc) => Some(elliptical_arc_endpoints(&arc.ellipse, &arc.range).end),
        Curve::Nurbs(spline) => spline.control_points.last().copied(),
        Curve::Unknown(_) => None,
    }
}
