use super::bounds::part_canvas;
use super::contour::{Element, curve_to_path, rectangle_points, render_contour};
use super::error::Result;
use super::geometry::fmt_num;
use super::spline::CurveEvaluator;
use super::style::{RenderOptions, document_style};
use super::types::{Curve, Part};
use tracing::debug;

/// Serialize one drawing element
fn element_to_svg(element: &Element) -> String {
    match element {
        Element::Path { data, stroke } => match stroke {
            Some(color) => format!("<path d='{}' stroke='{}'/>", data, color),
            None => format!("<path d='{}'/>", data),
        },
        Element::Circle(circle) => format!(
            "<circle cx='{}' cy='{}' r='{}'/>",
            fmt_num(circle.x),
            fmt_num(circle.y),
            fmt_num(circle.r)
        ),
        Element::Ellipse { cx, cy, rx, ry } => format!(
            "<ellipse cx='{}' cy='{}' rx='{}' ry='{}'/>",
            fmt_num(*cx),
            fmt_num(*cy),
            fmt_num(*rx),
            fmt_num(*ry)
        ),
        Element::Polyline(points) => {
            let points: Vec<String> = points
                .iter()
                .map(|p| format!("{} {}", fmt_num(p.x), fmt_num(p.y)))
                .collect();
            format!("<polyline points='{}'/>", points.join(" "))
        }
    }
}

/// Converts parts to SVG documents
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn with_evaluator(mut self, evaluator: impl CurveEvaluator + 'static) -> Self {
        self.options = self.options.with_evaluator(evaluator);
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Convert a part, overlaying `invalid_geometry` in the overlay color.
    ///
    /// Any error aborts the conversion; no partial document is returned.
    pub fn render_part(&self, part: &Part, invalid_geometry: Option<&[Curve]>) -> Result<String> {
        let canvas = part_canvas(part, invalid_geometry)?;

        let mut elements: Vec<Element> = Vec::new();

        if let Some(shape) = &part.rectangular_shape {
            debug!("Rendering rectangular part {}x{}", shape.length, shape.width);
            elements.push(Element::Polyline(rectangle_points(shape, false)));
        } else {
            for contour in &part.contours {
                elements.push(render_contour(contour, true, &self.options)?);
            }
        }

        for curve in invalid_geometry.unwrap_or_default() {
            elements.push(Element::Path {
                data: curve_to_path(curve, true, &self.options)?,
                stroke: Some(self.options.overlay_color.clone()),
            });
        }

        let mut svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" "#,
                r#"transform="scale(1 -1)" style="{}">"#
            ),
            canvas,
            document_style(&self.options)
        );
        for element in &elements {
            svg.push_str(&element_to_svg(element));
        }
        svg.push_str("</svg>");

        Ok(svg)
    }
}

/// Convert a part with default styling and the built-in spline evaluator
pub fn render_part(
    part: &Part,
    invalid_geometry: Option<&[Curve]>,
    stroke_width: f64,
) -> Result<String> {
    let options = RenderOptions::default()
        .with_stroke_width(stroke_width)
        .with_builtin_evaluator();
    Renderer::new(options).render_part(part, invalid_geometry)
}

/// Empty document with a `width` x `height` pixel canvas
pub fn render_empty_canvas(width: u32, height: u32) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}"></svg>"#
        ),
        w = width,
        h = height
    )
}
