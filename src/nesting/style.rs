use super::geometry::fmt_num;
use super::spline::{CurveEvaluator, DeBoorEvaluator};
use std::sync::Arc;

/// Spline sample count used when no other is configured
pub const DEFAULT_SPLINE_SAMPLES: usize = 20;

/// Options for part conversion
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Stroke width applied to the whole document (default: 1.0)
    pub stroke_width: f64,
    /// Default stroke color (default: black)
    pub stroke_color: String,
    /// Stroke color of the invalid geometry overlay (default: red)
    pub overlay_color: String,
    /// Samples taken along splines with more than four control points (default: 20)
    pub spline_samples: usize,
    /// Spline evaluation backend; splines fail to render without one (default: none)
    pub evaluator: Option<Arc<dyn CurveEvaluator>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            stroke_color: "black".to_string(),
            overlay_color: "red".to_string(),
            spline_samples: DEFAULT_SPLINE_SAMPLES,
            evaluator: None,
        }
    }
}

impl RenderOptions {
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl CurveEvaluator + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    /// Install the built-in De Boor evaluator
    pub fn with_builtin_evaluator(self) -> Self {
        self.with_evaluator(DeBoorEvaluator)
    }

    pub fn evaluator(&self) -> Option<&dyn CurveEvaluator> {
        self.evaluator.as_deref()
    }
}

/// Style attribute of the document root
pub fn document_style(options: &RenderOptions) -> String {
    format!(
        "stroke:{};fill:none;stroke-width:{}",
        options.stroke_color,
        fmt_num(options.stroke_width)
    )
}
