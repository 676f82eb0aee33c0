//! Scalar geometry helpers shared by the primitive renderers and the canvas computation.

use super::error::{ConvertError, Result};
use super::types::{ArcRange, EllipseDescriptor, Point};

/// Sweep used in place of a full turn, which SVG arcs cannot express
pub const MAX_SWEEP_DEG: f64 = 359.999;

/// Format a number as the shortest decimal that parses back to the same value, treating -0 as 0
pub fn fmt_num(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{}", n)
}

/// Arc parameters derived from a bulge between two vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeArc {
    /// Signed radius; negative for clockwise bulges
    pub radius: f64,
    /// Chord direction in degrees
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Derive the circular arc from `p1` to `p2` encoded by `bulge`.
///
/// Uses the sagitta relation `r = (c²/4 + s²) / (2s)` with `s = (c/2)·bulge`.
/// Returns `None` when the chord or the bulge is zero, where no arc exists.
pub fn bulge_arc(p1: Point, p2: Point, bulge: f64) -> Option<BulgeArc> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let c = p1.distance(&p2);
    let s = c / 2.0 * bulge;

    if s == 0.0 {
        return None;
    }

    Some(BulgeArc {
        radius: (c * c / 4.0 + s * s) / (2.0 * s),
        rotation: dy.atan2(dx).to_degrees(),
        large_arc: bulge.abs() > 1.0,
        sweep: bulge >= 0.0,
    })
}

/// Radii `(rx, ry)` of an axis-aligned ellipse.
///
/// The major axis must lie on X or Y; rotated ellipses are rejected. A major axis
/// pointing along the negative X or Y direction describes the same ellipse.
pub fn axis_aligned_radii(ellipse: &EllipseDescriptor) -> Result<(f64, f64)> {
    let axis = ellipse.major_axis;

    if axis.y == 0.0 {
        Ok((axis.x.abs(), (axis.x * ellipse.ratio).abs()))
    } else if axis.x == 0.0 {
        Ok(((axis.y * ellipse.ratio).abs(), axis.y.abs()))
    } else {
        Err(ConvertError::UnsupportedGeometry(format!(
            "ellipse with rotated major axis ({}, {})",
            fmt_num(axis.x),
            fmt_num(axis.y)
        )))
    }
}

/// Clamp a sweep so that a full turn stays a drawable arc
pub fn clamp_sweep(sweep: f64) -> f64 {
    if sweep >= 360.0 {
        MAX_SWEEP_DEG
    } else if sweep <= -360.0 {
        -MAX_SWEEP_DEG
    } else {
        sweep
    }
}

/// Endpoint parameterization of an elliptical arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEndpoints {
    pub start: Point,
    pub end: Point,
    pub rx: f64,
    pub ry: f64,
    /// Major axis direction in degrees
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Compute start/end points and SVG arc flags for an elliptical arc.
///
/// Angles are taken on the axis-aligned ellipse centred at the origin, then the
/// points are rotated by the major axis angle and moved to the centre.
pub fn elliptical_arc_endpoints(ellipse: &EllipseDescriptor, range: &ArcRange) -> ArcEndpoints {
    let sweep = clamp_sweep(range.sweep);
    let axis = ellipse.major_axis;
    let rx = axis.x.hypot(axis.y);
    let ry = rx * ellipse.ratio;

    let on_ellipse = |deg: f64| {
        let t = deg.to_radians();
        Point::new(rx * t.cos(), ry * t.sin())
    };

    let angle = axis.y.atan2(axis.x);
    let start = on_ellipse(range.start).rotate(angle) + ellipse.centre;
    let end = on_ellipse(range.start + sweep).rotate(angle) + ellipse.centre;

    ArcEndpoints {
        start,
        end,
        rx,
        ry,
        rotation: angle.to_degrees(),
        large_arc: sweep.abs() > 180.0,
        sweep: sweep >= 0.0,
    }
}
