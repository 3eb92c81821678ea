//! Clock-driven schedule evaluation.
//!
//! Evaluation is a pure function from `(schedule, now)` to the instantaneous
//! value of every scheduled property. Frames are rebuilt from scratch each
//! tick; nothing is accumulated between calls, so dropped frames cannot
//! cause drift and a clock that jumps backwards simply produces the frame
//! for the earlier instant.
//!
//! Each entry is sampled in one of three zones:
//!
//! - before its window, the entry holds `from`
//! - inside its window, eased progress interpolates `from` toward `to`
//! - at and after its end, the entry is exactly `to`, not an interpolated
//!   approximation of it

use std::collections::HashMap;

use crate::schedule::{ResolvedSchedule, ScheduleEntry};
use crate::value::{Interpolate, Property, Value};

/// The instantaneous value of every scheduled property at one clock reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationFrame {
    values: HashMap<(String, Property), Value>,
}

impl EvaluationFrame {
    /// Look up the value for one element property.
    pub fn get(&self, element: &str, property: Property) -> Option<Value> {
        self.values.get(&(element.to_owned(), property)).copied()
    }

    /// Look up a scalar value, for opacity and scale call sites.
    pub fn scalar(&self, element: &str, property: Property) -> Option<f64> {
        self.get(element, property).and_then(|v| v.as_scalar())
    }

    /// Iterate over every `(element, property, value)` in the frame.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Property, Value)> {
        self.values
            .iter()
            .map(|((element, property), value)| (element.as_str(), *property, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluate every entry of `schedule` at clock reading `now_ms`.
///
/// When the same `(element, property)` pair is scheduled more than once, the
/// entry latest in tree order wins, matching the authoring intuition that
/// later lines override earlier ones.
pub fn evaluate(schedule: &ResolvedSchedule, now_ms: f64) -> EvaluationFrame {
    let mut values = HashMap::with_capacity(schedule.entries().len());
    for entry in schedule.entries() {
        values.insert(
            (entry.element.clone(), entry.property),
            sample_entry(entry, now_ms),
        );
    }
    EvaluationFrame { values }
}

fn sample_entry(entry: &ScheduleEntry, now_ms: f64) -> Value {
    if now_ms < entry.start_ms {
        return entry.from;
    }
    // Covers zero-duration windows, which snap straight to the target.
    if now_ms >= entry.end_ms {
        return entry.to;
    }
    let progress = (now_ms - entry.start_ms) / entry.duration_ms();
    let eased = entry.easing.evaluate(progress);
    entry.from.interpolate(&entry.to, eased)
}
