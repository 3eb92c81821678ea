//! Animatable values and their interpolation.
//!
//! A diagram element exposes a small set of visual properties the engine can
//! drive: opacity, uniform scale, a 2D offset, and the draw fraction of a
//! path-like stroke. Draw progress is interpolated as a fraction of total
//! path length, never as raw geometry, so a half-drawn arrow is literally
//! the first half of its path.

use serde::{Deserialize, Serialize};

/// Visual property of a diagram element that the engine can animate.
///
/// Elements are keyed by string id on the rendering surface; a property
/// names one animatable attribute of that element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Alpha in [0, 1].
    Opacity,
    /// Uniform scale factor, 1.0 is natural size.
    Scale,
    /// 2D offset from the element's resting position.
    Translate,
    /// Fraction of a path-like stroke that has been drawn, in [0, 1].
    StrokeDraw,
}

impl Property {
    /// The value kind this property expects.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Opacity | Self::Scale => ValueKind::Scalar,
            Self::Translate => ValueKind::Offset,
            Self::StrokeDraw => ValueKind::DrawFraction,
        }
    }
}

/// Kind tag for [`Value`] variants, used to sanity-check authored specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Offset,
    DrawFraction,
}

/// An interpolable property value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    /// Plain numeric value (opacity, scale).
    Scalar { value: f64 },
    /// 2D offset in surface units.
    Offset { x: f64, y: f64 },
    /// Stroke draw progress as a fraction of total path length.
    DrawFraction { fraction: f64 },
}

impl Value {
    /// Shorthand for a scalar value.
    pub fn scalar(value: f64) -> Self {
        Self::Scalar { value }
    }

    /// Shorthand for a 2D offset.
    pub fn offset(x: f64, y: f64) -> Self {
        Self::Offset { x, y }
    }

    /// Shorthand for a draw fraction.
    pub fn draw_fraction(fraction: f64) -> Self {
        Self::DrawFraction { fraction }
    }

    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar { .. } => ValueKind::Scalar,
            Self::Offset { .. } => ValueKind::Offset,
            Self::DrawFraction { .. } => ValueKind::DrawFraction,
        }
    }

    /// Extract a scalar, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    /// Extract an offset, if this is one.
    pub fn as_offset(&self) -> Option<(f64, f64)> {
        match self {
            Self::Offset { x, y } => Some((*x, *y)),
            _ => None,
        }
    }

    /// Extract a draw fraction, if this is one.
    pub fn as_draw_fraction(&self) -> Option<f64> {
        match self {
            Self::DrawFraction { fraction } => Some(*fraction),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar { value }
    }
}

/// Trait for types that can be interpolated between two values.
///
/// When t = 0.0, returns self; when t = 1.0, returns `to`. Values between
/// produce intermediates. Callers pass already-eased progress, so
/// implementations are strictly linear.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for Value {
    /// Interpolate between two values of the same kind.
    ///
    /// Mismatched kinds hold the starting value unchanged; the schedule
    /// resolver drops mismatched entries before they get here, so this is a
    /// last line of defense rather than an expected path.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Scalar { value: a }, Self::Scalar { value: b }) => Self::Scalar {
                value: lerp(*a, *b, t),
            },
            (Self::Offset { x: ax, y: ay }, Self::Offset { x: bx, y: by }) => Self::Offset {
                x: lerp(*ax, *bx, t),
                y: lerp(*ay, *by, t),
            },
            (Self::DrawFraction { fraction: a }, Self::DrawFraction { fraction: b }) => {
                Self::DrawFraction {
                    fraction: lerp(*a, *b, t),
                }
            }
            _ => *self,
        }
    }
}
