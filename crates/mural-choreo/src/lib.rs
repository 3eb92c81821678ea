//! Choreography engine for illustrated lesson diagrams.
//!
//! Every diagram in the lesson library reveals itself the same way: the
//! reader scrolls it into view, and a tree of graphical elements fades,
//! slides, and draws in with staggered timing. This crate owns that
//! choreography:
//!
//! - **Spec trees**: a declarative description of which element properties
//!   animate, with per-node stagger rules for cascading reveals
//! - **Visibility trigger**: a fire-once latch that converts "the diagram
//!   entered the viewport" into a reference timestamp
//! - **Schedule resolution**: flattening a spec tree into absolute start and
//!   end times for every (element, property) pair
//! - **Clock-driven evaluation**: a pure function from (schedule, now) to
//!   the instantaneous value of every animated property
//!
//! # Architecture
//!
//! ```text
//! VisibilityTrigger ──(t0)──▶ ResolvedSchedule ──(now)──▶ EvaluationFrame
//!        ▲                          ▲                           │
//!   viewport probe              SpecNode tree              RenderBinding
//! ```
//!
//! Data flows one way. The trigger fires at most once per scene; the
//! schedule is resolved once per firing and immutable afterwards; frames are
//! recomputed from scratch every tick, so evaluation is a pure function of
//! the clock and nothing can drift.

pub mod easing;
pub mod evaluator;
pub mod schedule;
pub mod scene;
pub mod spec;
pub mod trigger;
pub mod value;

pub use easing::Easing;
pub use evaluator::{EvaluationFrame, evaluate};
pub use schedule::{ResolvedSchedule, ScheduleEntry};
pub use scene::{RenderBinding, SceneChoreography};
pub use spec::{PropertyAnimation, SpecError, SpecNode, stagger_offsets};
pub use trigger::{IntersectionConfig, Rect, VisibilityTrigger};
pub use value::{Interpolate, Property, Value, ValueKind};
