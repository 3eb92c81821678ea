//! Fire-once visibility trigger.
//!
//! A scene's animation starts the first time its region intersects the
//! viewport, and never restarts. The trigger is a two-state machine, armed
//! then fired, with no transition back: layout thrash can report the same
//! intersection many times and scrolling away and back reports it again, so
//! the one-shot guarantee is enforced here rather than assumed of callers.
//!
//! A trigger that never fires is valid steady state, not an error. A diagram
//! below the fold that the reader never scrolls to simply stays at its
//! initial values.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow (or shrink, for negative amounts) the rect by `amount` on every
    /// side.
    fn expand(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: (self.width + 2.0 * amount).max(0.0),
            height: (self.height + 2.0 * amount).max(0.0),
        }
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Area of overlap with `other`, zero if disjoint.
    fn overlap_area(&self, other: &Rect) -> f64 {
        let w = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let h = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }
}

/// Per-scene configuration for the intersection probe.
///
/// Margins differ between diagrams in the source material (some fire 100 px
/// early, some exactly at the viewport edge), so this is per-scene
/// configuration rather than a library constant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntersectionConfig {
    /// Pixels by which the viewport is expanded before the test. Positive
    /// values fire before the region scrolls into view; negative values
    /// require the region to be that far inside the viewport.
    #[serde(default)]
    pub margin_px: f64,
    /// Fraction of the region's area that must be visible, in [0, 1].
    /// Zero means any overlap counts.
    #[serde(default)]
    pub threshold: f64,
}

impl IntersectionConfig {
    /// Expand the viewport by `margin_px` before testing.
    pub fn with_margin_px(margin_px: f64) -> Self {
        Self {
            margin_px,
            threshold: 0.0,
        }
    }

    /// Require `threshold` of the region's area to be visible.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            margin_px: 0.0,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Does `region` count as visible within `viewport` under this config?
    fn is_visible(&self, region: Rect, viewport: Rect) -> bool {
        let probe = viewport.expand(self.margin_px);
        let overlap = region.overlap_area(&probe);
        if overlap <= 0.0 {
            return false;
        }
        if self.threshold <= 0.0 {
            return true;
        }
        overlap >= self.threshold * region.area()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TriggerState {
    Armed,
    Fired { at_ms: f64 },
}

/// One-shot visibility latch supplying the scene's reference timestamp.
///
/// Created at scene mount, dropped at unmount. Transitions armed to fired
/// at most once in between; the firing timestamp never changes afterwards.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    config: IntersectionConfig,
    state: TriggerState,
}

impl VisibilityTrigger {
    /// Create an armed trigger with the given probe configuration.
    pub fn new(config: IntersectionConfig) -> Self {
        Self {
            config,
            state: TriggerState::Armed,
        }
    }

    /// Whether the trigger has fired.
    pub fn has_fired(&self) -> bool {
        matches!(self.state, TriggerState::Fired { .. })
    }

    /// The firing timestamp, if fired.
    pub fn fired_at(&self) -> Option<f64> {
        match self.state {
            TriggerState::Fired { at_ms } => Some(at_ms),
            TriggerState::Armed => None,
        }
    }

    /// Feed one observation of the scene's region against the viewport.
    ///
    /// Returns `Some(t0)` exactly once, on the observation that first finds
    /// the region visible. Every later observation returns `None`
    /// regardless of visibility: the latch has no transition back to armed.
    pub fn observe(&mut self, region: Rect, viewport: Rect, now_ms: f64) -> Option<f64> {
        if self.has_fired() {
            return None;
        }
        if !self.config.is_visible(region, viewport) {
            return None;
        }
        self.state = TriggerState::Fired { at_ms: now_ms };
        tracing::debug!(t0_ms = now_ms, "visibility trigger fired");
        Some(now_ms)
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(IntersectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn region_at(y: f64) -> Rect {
        Rect::new(100.0, y, 200.0, 100.0)
    }

    #[test]
    fn fires_once_with_timestamp() {
        let mut trigger = VisibilityTrigger::default();
        assert!(!trigger.has_fired());

        let t0 = trigger.observe(region_at(300.0), VIEWPORT, 1000.0);
        assert_eq!(t0, Some(1000.0));
        assert!(trigger.has_fired());
        assert_eq!(trigger.fired_at(), Some(1000.0));
    }

    #[test]
    fn repeated_intersections_are_ignored() {
        let mut trigger = VisibilityTrigger::default();

        let mut firings = 0;
        for tick in 0..10 {
            if trigger
                .observe(region_at(300.0), VIEWPORT, 1000.0 + tick as f64)
                .is_some()
            {
                firings += 1;
            }
        }
        assert_eq!(firings, 1);
        // Timestamp is from the first observation, not the last.
        assert_eq!(trigger.fired_at(), Some(1000.0));
    }

    #[test]
    fn leave_and_reenter_does_not_rearm() {
        let mut trigger = VisibilityTrigger::default();

        assert!(trigger.observe(region_at(300.0), VIEWPORT, 100.0).is_some());
        // Scrolled far away, then back.
        assert!(trigger.observe(region_at(5000.0), VIEWPORT, 200.0).is_none());
        assert!(trigger.observe(region_at(300.0), VIEWPORT, 300.0).is_none());
        assert_eq!(trigger.fired_at(), Some(100.0));
    }

    #[test]
    fn below_the_fold_never_fires() {
        let mut trigger = VisibilityTrigger::default();
        for tick in 0..100 {
            assert!(
                trigger
                    .observe(region_at(2000.0), VIEWPORT, tick as f64)
                    .is_none()
            );
        }
        assert!(!trigger.has_fired());
    }

    #[test]
    fn positive_margin_fires_early() {
        let mut trigger = VisibilityTrigger::new(IntersectionConfig::with_margin_px(100.0));
        // Region sits 50 px below the viewport bottom edge.
        let region = region_at(650.0);

        assert!(trigger.observe(region, VIEWPORT, 0.0).is_some());
    }

    #[test]
    fn negative_margin_fires_late() {
        let mut trigger = VisibilityTrigger::new(IntersectionConfig::with_margin_px(-100.0));

        // Straddling the viewport edge is not enough with a -100 px margin.
        assert!(trigger.observe(region_at(550.0), VIEWPORT, 0.0).is_none());
        // Comfortably inside the shrunken probe area.
        assert!(trigger.observe(region_at(300.0), VIEWPORT, 1.0).is_some());
    }

    #[test]
    fn threshold_requires_enough_overlap() {
        let mut trigger = VisibilityTrigger::new(IntersectionConfig::with_threshold(0.5));
        // 100-px-tall region with only 20 px inside the viewport: 20% visible.
        assert!(trigger.observe(region_at(580.0), VIEWPORT, 0.0).is_none());
        // 80 px inside: 80% visible.
        assert!(trigger.observe(region_at(520.0), VIEWPORT, 1.0).is_some());
    }

    #[test]
    fn touching_edges_do_not_count_as_overlap() {
        let mut trigger = VisibilityTrigger::default();
        // Region exactly at the bottom edge, zero shared area.
        assert!(trigger.observe(region_at(600.0), VIEWPORT, 0.0).is_none());
    }
}
