//! Easing curves for animation timing.
//!
//! An easing curve remaps normalized progress (0.0 to 1.0) to eased progress
//! in the same range, controlling the rate of change inside an animation's
//! active window. Every curve in the catalog satisfies f(0) = 0 and
//! f(1) = 1, which the evaluator relies on for exact terminal convergence.

use serde::{Deserialize, Serialize};

/// Easing curve applied within an animation's active window.
///
/// The catalog is deliberately small. Diagrams across the lesson library
/// share the single [`Easing::Reveal`] curve so that staggered elements read
/// as one gesture, with [`Easing::Linear`] reserved for stroke-draw
/// animations where constant pen speed looks right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// No easing; progress passes through unchanged.
    Linear,
    /// Decelerating curve, equivalent to `cubic-bezier(0.0, 0.0, 0.58, 1.0)`.
    EaseOut,
    /// Slow start and end, fast middle, `cubic-bezier(0.42, 0.0, 0.58, 1.0)`.
    EaseInOut,
    /// The house reveal curve, `cubic-bezier(0.22, 1.0, 0.36, 1.0)`.
    ///
    /// Strongly decelerating: elements arrive quickly and settle gently.
    /// This is the default for every diagram in the library.
    Reveal,
    /// Custom cubic bezier for per-diagram overrides.
    ///
    /// `x1` and `x2` must lie in [0, 1] so the curve is a function of
    /// progress; y values are unconstrained.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for Easing {
    fn default() -> Self {
        Self::Reveal
    }
}

impl Easing {
    /// Evaluate the curve at progress `t`.
    ///
    /// Input is clamped to [0, 1]. Returns eased progress, exactly 0.0 at
    /// t = 0 and exactly 1.0 at t = 1.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => bezier_progress(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => bezier_progress(0.42, 0.0, 0.58, 1.0, t),
            Self::Reveal => bezier_progress(0.22, 1.0, 0.36, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => bezier_progress(*x1, *y1, *x2, *y2, t),
        }
    }

    /// Create a custom cubic bezier curve.
    ///
    /// # Panics
    /// Panics if `x1` or `x2` fall outside [0, 1].
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "bezier x control points must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }
}

/// Evaluate a CSS-style cubic bezier timing curve at the given progress.
///
/// The curve runs from (0, 0) to (1, 1) with control points (x1, y1) and
/// (x2, y2). Progress is treated as the x coordinate; the result is the y
/// coordinate at the same curve parameter.
fn bezier_progress(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    let t = solve_curve_parameter(x1, x2, progress);
    sample_axis(y1, y2, t)
}

/// Find the curve parameter t whose x coordinate equals `target_x`, by
/// Newton-Raphson iteration seeded with the target itself.
fn solve_curve_parameter(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;
    for _ in 0..8 {
        let error = sample_axis(x1, x2, t) - target_x;
        if error.abs() < 1e-7 {
            break;
        }
        let slope = sample_axis_derivative(x1, x2, t);
        if slope.abs() < 1e-7 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }
    t
}

/// Cubic bezier along one axis with endpoints pinned at 0 and 1:
/// `B(t) = 3(1-t)²t·c1 + 3(1-t)t²·c2 + t³`.
#[inline]
fn sample_axis(c1: f64, c2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * c1 + 3.0 * mt * t * t * c2 + t * t * t
}

/// Derivative of [`sample_axis`] with respect to t.
#[inline]
fn sample_axis_derivative(c1: f64, c2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * c1 + 6.0 * mt * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}
