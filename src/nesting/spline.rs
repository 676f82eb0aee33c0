//! NURBS evaluation.
//!
//! Spline rendering goes through the [`CurveEvaluator`] capability so callers
//! can swap the evaluation backend (or leave it out entirely when their parts
//! carry no splines). [`DeBoorEvaluator`] is the built-in implementation.

use super::error::{ConvertError, Result};
use super::types::Point;
use std::fmt::Debug;

/// Samples a (rational) B-spline into an ordered list of points
pub trait CurveEvaluator: Debug + Send + Sync {
    /// Evaluate `samples` points spread uniformly over the curve's parameter domain.
    ///
    /// `weights` holds one weight per control point.
    fn evaluate(
        &self,
        control_points: &[Point],
        knots: &[f64],
        weights: &[f64],
        degree: usize,
        samples: usize,
    ) -> Result<Vec<Point>>;
}

/// Rational B-spline evaluation with the Cox-de Boor basis recurrence
#[derive(Debug, Clone, Copy, Default)]
pub struct DeBoorEvaluator;

impl CurveEvaluator for DeBoorEvaluator {
    fn evaluate(
        &self,
        control_points: &[Point],
        knots: &[f64],
        weights: &[f64],
        degree: usize,
        samples: usize,
    ) -> Result<Vec<Point>> {
        let count = control_points.len();

        if degree == 0 || count <= degree {
            return Err(ConvertError::InvalidSpline(format!(
                "{} control points cannot carry a degree {} curve",
                count, degree
            )));
        }
        if knots.len() != count + degree + 1 {
            return Err(ConvertError::InvalidSpline(format!(
                "expected {} knots, found {}",
                count + degree + 1,
                knots.len()
            )));
        }
        if weights.len() != count {
            return Err(ConvertError::InvalidSpline(format!(
                "expected {} weights, found {}",
                count,
                weights.len()
            )));
        }
        if knots.windows(2).any(|k| k[1] < k[0]) {
            return Err(ConvertError::InvalidSpline(
                "knot vector is not non-decreasing".to_string(),
            ));
        }

        let t0 = knots[degree];
        let t1 = knots[count];
        if t1 <= t0 {
            return Err(ConvertError::InvalidSpline(
                "knot vector has an empty parameter domain".to_string(),
            ));
        }

        let samples = samples.max(2);
        let step = (t1 - t0) / (samples - 1) as f64;

        (0..samples)
            .map(|i| {
                let t = if i == samples - 1 { t1 } else { t0 + step * i as f64 };
                let p = rational_point(degree, knots, control_points, weights, t);
                if p.x.is_finite() && p.y.is_finite() {
                    Ok(p)
                } else {
                    Err(ConvertError::InvalidSpline(format!(
                        "curve is undefined at parameter {}",
                        t
                    )))
                }
            })
            .collect()
    }
}

/// Knot span index `i` with `knots[i] <= t < knots[i + 1]`, clamped to the domain.
///
/// `n` is the index of the last control point. At the end of the domain the
/// last non-empty span is used.
fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return (degree..=n)
            .rev()
            .find(|&i| knots[i] < knots[i + 1])
            .unwrap_or(n);
    }
    if t <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Non-vanishing basis functions `N[span-degree..=span]` at `t`
fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            // 0/0 counts as 0 on empty spans
            let denom = right[r + 1] + left[j - r];
            let temp = if denom == 0.0 { 0.0 } else { n[r] / denom };
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}

fn rational_point(
    degree: usize,
    knots: &[f64],
    control_points: &[Point],
    weights: &[f64],
    t: f64,
) -> Point {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = Point::default();
    let mut w = 0.0;

    for (i, b) in basis.iter().enumerate() {
        let idx = span - degree + i;
        let bw = b * weights[idx];
        point = point + control_points[idx] * bw;
        w += bw;
    }

    if w.abs() < 1e-15 { point } else { point * (1.0 / w) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_spline_samples() {
        let cps = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let knots = vec![0.0, 0.0, 1.0, 2.0, 2.0];
        let pts = DeBoorEvaluator
            .evaluate(&cps, &knots, &[1.0; 3], 1, 5)
            .unwrap();

        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[1].x, 0.5);
        assert_relative_eq!(pts[1].y, 0.0);
        assert_relative_eq!(pts[3].x, 1.0);
        assert_relative_eq!(pts[3].y, 0.5);
        assert_eq!(pts[4], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_clamped_cubic_hits_end_points() {
        let cps = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 2.0),
            Point::new(4.0, 0.0),
            Point::new(6.0, 1.0),
        ];
        let knots = vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0];
        let pts = DeBoorEvaluator
            .evaluate(&cps, &knots, &[1.0; 5], 3, 20)
            .unwrap();

        assert_eq!(pts.len(), 20);
        assert_relative_eq!(pts[0].x, 0.0);
        assert_relative_eq!(pts[0].y, 0.0);
        assert_relative_eq!(pts[19].x, 6.0);
        assert_relative_eq!(pts[19].y, 1.0);
    }

    #[test]
    fn test_rational_quarter_circle() {
        let cps = vec![
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let weights = [1.0, std::f64::consts::FRAC_1_SQRT_2, 1.0];
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let pts = DeBoorEvaluator
            .evaluate(&cps, &knots, &weights, 2, 20)
            .unwrap();

        for p in &pts {
            assert_relative_eq!(p.x.hypot(p.y), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_mismatched_weights() {
        let cps = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let err = DeBoorEvaluator
            .evaluate(&cps, &[0.0, 0.0, 1.0, 1.0], &[1.0], 1, 20)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidSpline(_)));
    }

    #[test]
    fn test_rejects_decreasing_knots() {
        let cps = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let err = DeBoorEvaluator
            .evaluate(&cps, &[0.0, 1.0, 0.5, 1.0], &[1.0, 1.0], 1, 20)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidSpline(_)));
    }

    #[test]
    fn test_find_span() {
        let knots = [0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        assert_eq!(find_span(2, &knots, 4, 0.0), 2);
        assert_eq!(find_span(2, &knots, 4, 1.5), 3);
        assert_eq!(find_span(2, &knots, 4, 3.0), 4);
    }

    #[test]
    fn test_find_span_skips_empty_end_span() {
        let knots = [0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0];
        assert_eq!(find_span(2, &knots, 4, 1.0), 3);
    }

    #[test]
    fn test_overclamped_end_stays_finite() {
        let cps = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(4.0, 0.0),
        ];
        let knots = vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0];
        let pts = DeBoorEvaluator
            .evaluate(&cps, &knots, &[1.0; 5], 2, 20)
            .unwrap();

        assert_eq!(pts.len(), 20);
        assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_relative_eq!(pts[19].x, 3.0);
        assert_relative_eq!(pts[19].y, 1.0);
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        let cps = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let err = DeBoorEvaluator
            .evaluate(&cps, &[0.0, 0.0, 1.0, 1.0], &[f64::NAN, 1.0], 1, 5)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidSpline(_)));
    }
}
