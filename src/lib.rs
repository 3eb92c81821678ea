//! Mural: animation choreography for illustrated lesson diagrams.
//!
//! This umbrella crate re-exports the choreography engine. See
//! `mural-choreo` for the full documentation.

pub use mural_choreo as choreo;

pub use mural_choreo::{
    Easing, EvaluationFrame, IntersectionConfig, Property, PropertyAnimation, Rect,
    RenderBinding, ResolvedSchedule, SceneChoreography, SpecError, SpecNode, Value,
    VisibilityTrigger, evaluate, stagger_offsets,
};
