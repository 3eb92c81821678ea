//! Per-scene choreography lifecycle.
//!
//! [`SceneChoreography`] ties the pieces together for one diagram: it owns
//! the spec tree and the visibility trigger, resolves the schedule when the
//! trigger fires, and pushes evaluation frames into a [`RenderBinding`] on
//! every clock tick. One instance per mounted diagram; dropping it is the
//! whole teardown.
//!
//! The host drives two loops. Scroll and layout changes feed
//! [`SceneChoreography::observe_viewport`]; the per-frame clock feeds
//! [`SceneChoreography::tick`]. Ticking is only useful between the trigger
//! firing and the schedule finishing, and `tick`'s return value tells the
//! host when to stop scheduling further ticks.

use static_assertions::assert_impl_all;

use crate::evaluator::{EvaluationFrame, evaluate};
use crate::schedule::ResolvedSchedule;
use crate::spec::SpecNode;
use crate::trigger::{IntersectionConfig, Rect, VisibilityTrigger};

/// The rendering surface a scene pushes frames into.
///
/// The engine never talks to the surface directly; it only knows element ids
/// and property values. The binding answers which ids exist and applies the
/// computed values, keeping the engine free of any drawing dependency.
pub trait RenderBinding {
    /// Does the surface have an element with this id?
    fn has_element(&self, element: &str) -> bool;

    /// Apply one evaluation frame to the surface.
    fn apply(&mut self, frame: &EvaluationFrame);
}

/// Choreography state for one mounted diagram scene.
#[derive(Debug)]
pub struct SceneChoreography {
    spec: SpecNode,
    trigger: VisibilityTrigger,
    schedule: Option<ResolvedSchedule>,
    done: bool,
}

assert_impl_all!(SceneChoreography: Send);

impl SceneChoreography {
    /// Create a scene from its spec tree and trigger configuration.
    ///
    /// The trigger starts armed; nothing animates until a viewport
    /// observation finds the scene visible.
    pub fn new(spec: SpecNode, config: IntersectionConfig) -> Self {
        Self {
            spec,
            trigger: VisibilityTrigger::new(config),
            schedule: None,
            done: false,
        }
    }

    /// Feed one scroll or layout observation to the trigger.
    ///
    /// Returns the trigger timestamp if this observation fired the trigger.
    /// Safe to call at any rate; after firing it is a no-op.
    pub fn observe_viewport(&mut self, region: Rect, viewport: Rect, now_ms: f64) -> Option<f64> {
        self.trigger.observe(region, viewport, now_ms)
    }

    /// Whether the trigger has fired.
    pub fn has_fired(&self) -> bool {
        self.trigger.has_fired()
    }

    /// Whether the schedule has run to its end and the terminal frame has
    /// been applied.
    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// The resolved schedule, present once the first post-firing tick ran.
    pub fn schedule(&self) -> Option<&ResolvedSchedule> {
        self.schedule.as_ref()
    }

    /// Advance the scene to clock reading `now_ms`, applying a frame to
    /// `binding` if there is anything to animate.
    ///
    /// Returns `true` while the scene wants further ticks. Before the
    /// trigger fires and after the terminal frame has been applied it
    /// returns `false` without touching the binding, so a host can stop
    /// scheduling ticks the moment this goes false and rely on
    /// `observe_viewport` to restart the loop when the trigger fires.
    pub fn tick(&mut self, now_ms: f64, binding: &mut dyn RenderBinding) -> bool {
        if self.done {
            return false;
        }
        let Some(t0_ms) = self.trigger.fired_at() else {
            return false;
        };

        // Resolve lazily on the first tick after firing, once the binding is
        // available to filter out element ids the surface does not know.
        let spec = &self.spec;
        let schedule = self.schedule.get_or_insert_with(|| {
            let mut schedule = ResolvedSchedule::resolve(spec, t0_ms);
            schedule.retain_elements(|element| binding.has_element(element));
            schedule
        });

        let frame = evaluate(schedule, now_ms);
        if now_ms >= schedule.end_ms() {
            // This frame carries every terminal value; after applying it
            // there is nothing left to animate.
            self.done = true;
        }
        binding.apply(&frame);
        !self.done
    }
}
