//! Resolving spec trees into absolute schedules.
//!
//! Resolution pins a spec tree's relative timing to the trigger timestamp,
//! flattening the tree into a list of entries with absolute start and end
//! times. It runs exactly once per trigger firing; the result is immutable
//! from then on, so evaluating the same schedule at the same clock reading
//! always produces the same frame.
//!
//! Questionable timing in authored specs is repaired rather than rejected:
//! negative or otherwise unusable delays, durations, and staggers clamp to
//! zero with a warning. A wrong number in one diagram should degrade that
//! diagram, not take the lesson down.

use crate::easing::Easing;
use crate::spec::{PropertyAnimation, SpecNode};
use crate::value::{Property, Value};

/// One flattened animation with absolute timing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// Id of the target element on the rendering surface.
    pub element: String,
    /// The property being driven.
    pub property: Property,
    /// Absolute start of the active window, in milliseconds.
    pub start_ms: f64,
    /// Absolute end of the active window, in milliseconds.
    pub end_ms: f64,
    /// Value held before `start_ms`.
    pub from: Value,
    /// Value held at and after `end_ms`.
    pub to: Value,
    /// Curve applied within the window.
    pub easing: Easing,
}

impl ScheduleEntry {
    /// Window length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }
}

/// A spec tree flattened against a trigger timestamp.
///
/// Entries appear in depth-first tree order. The schedule is a value: two
/// resolutions of the same tree at the same timestamp compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchedule {
    entries: Vec<ScheduleEntry>,
    t0_ms: f64,
    end_ms: f64,
}

impl ResolvedSchedule {
    /// Flatten `root` into absolute entries anchored at `t0_ms`.
    ///
    /// Each child of a node starts `index × stagger_ms` after the node's own
    /// start, and each animation starts at its node's start plus its delay.
    pub fn resolve(root: &SpecNode, t0_ms: f64) -> Self {
        let mut entries = Vec::with_capacity(root.animation_count());
        resolve_node(root, t0_ms, &mut entries);

        let end_ms = entries.iter().map(|e| e.end_ms).fold(t0_ms, f64::max);
        tracing::debug!(
            entry_count = entries.len(),
            t0_ms,
            end_ms,
            "resolved animation schedule"
        );
        Self {
            entries,
            t0_ms,
            end_ms,
        }
    }

    /// The trigger timestamp the schedule is anchored to.
    pub fn t0_ms(&self) -> f64 {
        self.t0_ms
    }

    /// The flattened entries, in depth-first tree order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Absolute time at which every entry has reached its final value.
    ///
    /// Falls back to the trigger timestamp for an empty schedule.
    pub fn end_ms(&self) -> f64 {
        self.end_ms
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose element id the rendering surface does not know.
    ///
    /// Element ids are authored by hand next to the diagram geometry, so a
    /// typo or a removed element shows up here. Dropped entries are logged
    /// and everything else keeps its timing unchanged; the end time shrinks
    /// if the dropped entries were the last to finish.
    pub fn retain_elements(&mut self, mut known: impl FnMut(&str) -> bool) {
        self.entries.retain(|entry| {
            let keep = known(&entry.element);
            if !keep {
                tracing::warn!(
                    element = %entry.element,
                    property = ?entry.property,
                    "dropping animation for unknown element"
                );
            }
            keep
        });
        self.end_ms = self
            .entries
            .iter()
            .map(|e| e.end_ms)
            .fold(self.t0_ms, f64::max);
    }
}

fn resolve_node(node: &SpecNode, node_start_ms: f64, entries: &mut Vec<ScheduleEntry>) {
    for animation in &node.animations {
        if let Some(entry) = resolve_animation(animation, node_start_ms) {
            entries.push(entry);
        }
    }

    let stagger_ms = sanitize_ms(node.stagger_ms, "stagger_ms");
    for (index, child) in node.children.iter().enumerate() {
        let child_start_ms = node_start_ms + index as f64 * stagger_ms;
        resolve_node(child, child_start_ms, entries);
    }
}

fn resolve_animation(animation: &PropertyAnimation, node_start_ms: f64) -> Option<ScheduleEntry> {
    let expected = animation.property.value_kind();
    if animation.from.kind() != expected || animation.to.kind() != expected {
        tracing::warn!(
            element = %animation.element,
            property = ?animation.property,
            from = ?animation.from.kind(),
            to = ?animation.to.kind(),
            "dropping animation with mismatched value kinds"
        );
        return None;
    }

    let delay_ms = sanitize_ms(animation.delay_ms, "delay_ms");
    let duration_ms = sanitize_ms(animation.duration_ms, "duration_ms");
    let start_ms = node_start_ms + delay_ms;

    Some(ScheduleEntry {
        element: animation.element.clone(),
        property: animation.property,
        start_ms,
        end_ms: start_ms + duration_ms,
        from: animation.from,
        to: animation.to,
        easing: animation.easing,
    })
}

/// Clamp a timing value to a usable non-negative number.
fn sanitize_ms(value: f64, field: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(field, value, "clamping unusable timing value to zero");
        0.0
    }
}
