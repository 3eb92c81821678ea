//! Declarative animation spec trees.
//!
//! A spec tree separates *what* animates from *when* it runs. Each node owns
//! zero or more property animations plus an optional stagger increment for
//! its children; the tree is authored statically alongside a diagram's
//! geometry, either in code with the builders here or as JSON. Nothing in a
//! spec tree refers to absolute time: all delays are relative, and the
//! schedule resolver pins them to the trigger timestamp.
//!
//! # Example
//!
//! Three per-agent icons revealing in a 50 ms cascade:
//!
//! ```
//! use mural_choreo::spec::{PropertyAnimation, SpecNode};
//! use mural_choreo::value::{Property, Value};
//!
//! let tree = SpecNode::new().stagger_ms(50.0).children((0..3).map(|i| {
//!     SpecNode::new().animate(
//!         PropertyAnimation::new(
//!             format!("agent-{i}"),
//!             Property::Opacity,
//!             Value::scalar(0.0),
//!             Value::scalar(1.0),
//!         )
//!         .duration_ms(200.0),
//!     )
//! }));
//! assert_eq!(tree.children.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::easing::Easing;
use crate::value::{Property, Value};

/// Error raised when an authored spec cannot be accepted at all.
///
/// Merely questionable timing (negative durations, unknown element ids) is
/// handled leniently at schedule resolution; this error is reserved for
/// input that has no sensible reading.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The JSON document did not parse as a spec tree.
    #[error("invalid spec JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A delay, duration, or stagger value was NaN or infinite.
    #[error("non-finite timing value in animation for element `{element}`")]
    NonFiniteTiming { element: String },
}

/// One property transition owned by a spec node.
///
/// `delay_ms` is relative to the owning node's resolved start time, which
/// the resolver computes from the tree position. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnimation {
    /// Id of the render-surface element this animation targets.
    pub element: String,
    /// The property being driven.
    pub property: Property,
    /// Value held before the animation starts.
    pub from: Value,
    /// Value held forever once the animation ends.
    pub to: Value,
    /// Delay relative to the owning node's resolved start, in milliseconds.
    #[serde(default)]
    pub delay_ms: f64,
    /// Active window length in milliseconds. Zero snaps from `from` to `to`.
    #[serde(default)]
    pub duration_ms: f64,
    /// Curve applied within the active window.
    #[serde(default)]
    pub easing: Easing,
}

impl PropertyAnimation {
    /// Create an animation with zero delay, zero duration, and the default
    /// easing curve. Chain the builder methods to fill in timing.
    pub fn new(
        element: impl Into<String>,
        property: Property,
        from: Value,
        to: Value,
    ) -> Self {
        Self {
            element: element.into(),
            property,
            from,
            to,
            delay_ms: 0.0,
            duration_ms: 0.0,
            easing: Easing::default(),
        }
    }

    /// Set the active window length.
    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the delay relative to the owning node's resolved start.
    pub fn delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// A node in the animation spec tree.
///
/// Each child starts `index × stagger_ms` after this node's own resolved
/// start, producing the cascading reveal the library leans on. Because the
/// structure is a tree rather than a graph, resolved start times can never
/// form a cycle, and they are non-decreasing with depth as long as stagger
/// and delay values are non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecNode {
    /// Per-child stagger increment in milliseconds.
    #[serde(default)]
    pub stagger_ms: f64,
    /// Animations owned by this node.
    #[serde(default)]
    pub animations: Vec<PropertyAnimation>,
    /// Child nodes, staggered in list order.
    #[serde(default)]
    pub children: Vec<SpecNode>,
}

impl SpecNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-child stagger increment.
    pub fn stagger_ms(mut self, stagger_ms: f64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Add an animation owned by this node.
    pub fn animate(mut self, animation: PropertyAnimation) -> Self {
        self.animations.push(animation);
        self
    }

    /// Add a single child node.
    pub fn child(mut self, node: SpecNode) -> Self {
        self.children.push(node);
        self
    }

    /// Add children in order; each picks up the next stagger slot.
    pub fn children(mut self, nodes: impl IntoIterator<Item = SpecNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Parse a spec tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let node: Self = serde_json::from_str(json)?;
        node.validate()?;
        Ok(node)
    }

    /// Reject timing values that have no sensible reading.
    ///
    /// JSON cannot carry NaN or infinity, so parsed trees always pass; this
    /// mainly guards trees built in code from computed timing values.
    pub fn validate(&self) -> Result<(), SpecError> {
        self.check_finite()
    }

    /// Total number of property animations in the tree.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
            + self
                .children
                .iter()
                .map(SpecNode::animation_count)
                .sum::<usize>()
    }

    fn check_finite(&self) -> Result<(), SpecError> {
        if !self.stagger_ms.is_finite() {
            return Err(SpecError::NonFiniteTiming {
                element: self
                    .animations
                    .first()
                    .map(|a| a.element.clone())
                    .unwrap_or_default(),
            });
        }
        for animation in &self.animations {
            if !animation.delay_ms.is_finite() || !animation.duration_ms.is_finite() {
                return Err(SpecError::NonFiniteTiming {
                    element: animation.element.clone(),
                });
            }
        }
        for child in &self.children {
            child.check_finite()?;
        }
        Ok(())
    }
}

/// Delay offsets for `count` staggered siblings: `0, Δ, 2Δ, …, (count-1)Δ`.
///
/// Convenience for call sites that need the raw offsets rather than a tree,
/// such as repeated per-cell highlights built outside the spec builders.
pub fn stagger_offsets(count: usize, step_ms: f64) -> Vec<f64> {
    (0..count).map(|i| i as f64 * step_ms).collect()
}
