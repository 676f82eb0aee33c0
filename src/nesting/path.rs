use super::error::{ConvertError, Result};
use super::geometry::{bulge_arc, elliptical_arc_endpoints, fmt_num};
use super::spline::CurveEvaluator;
use super::types::{EllipticalArc, Point, Spline, Vertex};
use std::fmt;
use tracing::warn;

/// One SVG path command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// `M x y`, starting a vertex walk
    MoveTo(Point),
    /// `M x,y`, starting an elliptical arc or a spline
    MoveToCurve(Point),
    /// `L x y`
    LineTo(Point),
    /// `A rx,ry rotation large,sweep x y`
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    /// `C x1,y1 x2,y2 x,y`
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    /// `Z`
    ClosePath,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pair = |p: &Point| format!("{},{}", fmt_num(p.x), fmt_num(p.y));
        let spaced = |p: &Point| format!("{} {}", fmt_num(p.x), fmt_num(p.y));
        let flag = |b: bool| if b { 1 } else { 0 };

        match self {
            PathCommand::MoveTo(p) => write!(f, "M {}", spaced(p)),
            PathCommand::MoveToCurve(p) => write!(f, "M {}", pair(p)),
            PathCommand::LineTo(p) => write!(f, "L {}", spaced(p)),
            PathCommand::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {},{} {} {},{} {}",
                fmt_num(*rx),
                fmt_num(*ry),
                fmt_num(*rotation),
                flag(*large_arc),
                flag(*sweep),
                spaced(to)
            ),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                write!(f, "C {} {} {}", pair(ctrl1), pair(ctrl2), pair(to))
            }
            PathCommand::ClosePath => write!(f, "Z"),
        }
    }
}

/// Ordered path commands, serialized to a `d` attribute only at the document boundary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the path ends with a close-path command
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::ClosePath))
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Arc command from `from` to `to` for the bulge stored on `from`.
///
/// Returns `None` when there is no arc to draw (missing or zero bulge, zero chord).
pub fn bulge_arc_command(from: &Vertex, to: &Vertex) -> Option<PathCommand> {
    let arc = bulge_arc(from.point(), to.point(), from.bulge?)?;
    Some(PathCommand::ArcTo {
        rx: arc.radius,
        ry: arc.radius,
        rotation: arc.rotation,
        large_arc: arc.large_arc,
        sweep: arc.sweep,
        to: to.point(),
    })
}

/// Edge between consecutive vertices: an arc when `from` bulges, a straight line otherwise
fn edge(from: &Vertex, to: &Vertex) -> PathCommand {
    bulge_arc_command(from, to).unwrap_or(PathCommand::LineTo(to.point()))
}

/// Walk a vertex list, emitting lines and bulge arcs.
///
/// Closed walks add the closing arc (when the last vertex bulges) and a close-path;
/// open walks end at the last vertex. Fewer than two vertices produce nothing.
pub fn vertex_path(
    vertices: &[Vertex],
    move_to_start: bool,
    close_path: bool,
    path: &mut PathData,
) {
    if vertices.len() < 2 {
        warn!(
            "Vertex list with {} vertices has no edges, skipping",
            vertices.len()
        );
        return;
    }

    let first = &vertices[0];
    let last = &vertices[vertices.len() - 1];

    if move_to_start {
        path.push(PathCommand::MoveTo(first.point()));
    }

    for pair in vertices.windows(2) {
        path.push(edge(&pair[0], &pair[1]));
    }

    if close_path {
        if let Some(arc) = bulge_arc_command(last, first) {
            path.push(arc);
        }
        path.push(PathCommand::ClosePath);
    }
}

/// Elliptical arc segment, optionally preceded by a move to its start
pub fn elliptical_arc_path(arc: &EllipticalArc, move_to_start: bool, path: &mut PathData) {
    let ends = elliptical_arc_endpoints(&arc.ellipse, &arc.range);

    if move_to_start {
        path.push(PathCommand::MoveToCurve(ends.start));
    }
    path.push(PathCommand::ArcTo {
        rx: ends.rx,
        ry: ends.ry,
        rotation: ends.rotation,
        large_arc: ends.large_arc,
        sweep: ends.sweep,
        to: ends.end,
    });
}

/// Spline segment.
///
/// Up to four control points are drawn as a single cubic through the control
/// polygon without evaluation; longer splines are sampled through `evaluator`
/// and drawn as line segments.
pub fn spline_path(
    spline: &Spline,
    move_to_start: bool,
    evaluator: Option<&dyn CurveEvaluator>,
    samples: usize,
    path: &mut PathData,
) -> Result<()> {
    let evaluator = evaluator.ok_or_else(|| {
        ConvertError::MissingCapability(
            "a curve evaluator is required to render Nurbs2 geometry".to_string(),
        )
    })?;

    let Some(degree) = spline.degree() else {
        warn!(
            "Spline with {} knots and {} control points has no valid degree, skipping",
            spline.knots.len(),
            spline.control_points.len()
        );
        return Ok(());
    };

    let cps = &spline.control_points;
    if cps.len() < 2 {
        warn!("Spline with fewer than 2 control points, skipping");
        return Ok(());
    }

    if move_to_start {
        path.push(PathCommand::MoveToCurve(cps[0]));
    }

    match cps.len() {
        2 => path.push(PathCommand::LineTo(cps[1])),
        3 => {
            // Exact cubic form of the quadratic control polygon
            let ctrl1 = cps[0] + (cps[1] - cps[0]) * (2.0 / 3.0);
            let ctrl2 = cps[2] + (cps[1] - cps[2]) * (2.0 / 3.0);
            path.push(PathCommand::CubicTo {
                ctrl1,
                ctrl2,
                to: cps[2],
            });
        }
        4 => path.push(PathCommand::CubicTo {
            ctrl1: cps[1],
            ctrl2: cps[2],
            to: cps[3],
        }),
        _ => {
            let weights = spline.resolved_weights();
            let points = evaluator.evaluate(cps, &spline.knots, &weights, degree, samples)?;
            for p in points.iter().skip(1) {
                path.push(PathCommand::LineTo(*p));
            }
        }
    }

    Ok(())
}
