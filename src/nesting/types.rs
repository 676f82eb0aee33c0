use serde::Deserialize;
use serde_json::Value;

/// 2D point in part coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Rotate about the origin by `angle` radians
    pub fn rotate(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        Point::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Polyline vertex with an optional bulge for the arc leaving it
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Vertex {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    /// Signed bulge of the arc to the next vertex (tan of a quarter of the included angle)
    #[serde(rename = "B", default)]
    pub bulge: Option<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, bulge: None }
    }

    pub fn with_bulge(x: f64, y: f64, bulge: f64) -> Self {
        Self {
            x,
            y,
            bulge: Some(bulge),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Explicit part bounds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Plain rectangular part, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RectangularShape {
    pub length: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Ellipse given by centre, major axis vector and minor/major ratio
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EllipseDescriptor {
    pub centre: Point,
    pub major_axis: Point,
    pub ratio: f64,
}

/// Angular range in degrees, measured on the unrotated ellipse
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArcRange {
    pub start: f64,
    pub sweep: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EllipticalArc {
    pub ellipse: EllipseDescriptor,
    pub range: ArcRange,
}

/// NURBS curve data
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Spline {
    pub control_points: Vec<Point>,
    pub knots: Vec<f64>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl Spline {
    /// Degree implied by the knot and control point counts, `None` when below 1
    pub fn degree(&self) -> Option<usize> {
        let degree = self.knots.len() as i64 - self.control_points.len() as i64 - 1;
        (degree >= 1).then_some(degree as usize)
    }

    /// Weights, defaulting to 1.0 per control point when absent or empty
    pub fn resolved_weights(&self) -> Vec<f64> {
        match &self.weights {
            Some(w) if !w.is_empty() => w.clone(),
            _ => vec![1.0; self.control_points.len()],
        }
    }
}

/// Closed boundary loop of a part
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Contour {
    /// `Curve2CompositeClosed`
    CompositeClosed(Vec<Curve>),
    /// `LoopBulge`, `Loop`, or an untagged vertex list
    Loop(Vec<Vertex>),
    /// `Circle2`
    Circle(Circle),
    /// `Ellipse2`
    Ellipse(EllipseDescriptor),
    /// Any other tag; rendering it fails
    Unknown(String),
}

/// Open curve, either a composite chunk or standalone invalid geometry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Curve {
    /// `Curve2CompositeOpen`
    CompositeOpen(Vec<Curve>),
    /// `PolylineBulge` or `Polyline`
    Polyline(Vec<Vertex>),
    /// `EllipticalArc2`
    EllipticalArc(EllipticalArc),
    /// `Nurbs2`
    Nurbs(Spline),
    /// Any other tag (or none); rendering it fails
    Unknown(String),
}

/// Part outline data as delivered by the nesting service
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Part {
    #[serde(rename = "Box", default)]
    pub bounding_box: Option<PartBox>,
    #[serde(default)]
    pub rectangular_shape: Option<RectangularShape>,
    #[serde(default)]
    pub contours: Vec<Contour>,
}

/// A part together with the invalid geometry reported for it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartJob {
    pub part: Part,
    #[serde(default)]
    pub invalid_geometry: Option<Vec<Curve>>,
}

/// Tagged node as it appears on the wire: `{"Type": .., "Data": ..}` or a bare `{"Vertices": ..}`
#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "Data", default)]
    data: Value,
    #[serde(rename = "Vertices", default)]
    vertices: Option<Vec<Vertex>>,
}

#[derive(Deserialize)]
struct VertexList {
    #[serde(rename = "Vertices")]
    vertices: Vec<Vertex>,
}

#[derive(Deserialize)]
struct ChunkList {
    #[serde(rename = "Chunks")]
    chunks: Vec<Curve>,
}

impl TryFrom<RawNode> for Contour {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let contour = match raw.kind.as_deref() {
            Some("Curve2CompositeClosed") => {
                Contour::CompositeClosed(serde_json::from_value::<ChunkList>(raw.data)?.chunks)
            }
            Some("LoopBulge" | "Loop") => {
                Contour::Loop(serde_json::from_value::<VertexList>(raw.data)?.vertices)
            }
            Some("Circle2") => Contour::Circle(serde_json::from_value(raw.data)?),
            Some("Ellipse2") => Contour::Ellipse(serde_json::from_value(raw.data)?),
            Some(other) => Contour::Unknown(other.to_string()),
            None => match raw.vertices {
                Some(vertices) => Contour::Loop(vertices),
                None => return Err(serde::de::Error::missing_field("Vertices")),
            },
        };
        Ok(contour)
    }
}

impl TryFrom<RawNode> for Curve {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let curve = match raw.kind.as_deref() {
            Some("Curve2CompositeOpen") => {
                Curve::CompositeOpen(serde_json::from_value::<ChunkList>(raw.data)?.chunks)
            }
            Some("PolylineBulge" | "Polyline") => {
                Curve::Polyline(serde_json::from_value::<VertexList>(raw.data)?.vertices)
            }
            Some("EllipticalArc2") => Curve::EllipticalArc(serde_json::from_value(raw.data)?),
            Some("Nurbs2") => Curve::Nurbs(serde_json::from_value(raw.data)?),
            Some(other) => Curve::Unknown(other.to_string()),
            None => Curve::Unknown(String::new()),
        };
        Ok(curve)
    }
}
