use std::collections::HashSet;

use anyhow::Result;
use mural_choreo::{
    EvaluationFrame, IntersectionConfig, Property, Rect, RenderBinding, SceneChoreography,
    SpecNode, Value,
};

const VIEWPORT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1024.0,
    height: 768.0,
};

/// Minimal surface stub that remembers the last value applied per element
/// property, the way a real renderer keeps its draw state.
struct Surface {
    elements: HashSet<String>,
    state: Vec<(String, Property, Value)>,
}

impl Surface {
    fn new(ids: &[&str]) -> Self {
        Self {
            elements: ids.iter().map(|id| id.to_string()).collect(),
            state: Vec::new(),
        }
    }

    fn value(&self, element: &str, property: Property) -> Option<Value> {
        self.state
            .iter()
            .find(|(id, prop, _)| id == element && *prop == property)
            .map(|(_, _, value)| *value)
    }
}

impl RenderBinding for Surface {
    fn has_element(&self, element: &str) -> bool {
        self.elements.contains(element)
    }

    fn apply(&mut self, frame: &EvaluationFrame) {
        self.state = frame
            .iter()
            .map(|(element, property, value)| (element.to_owned(), property, value))
            .collect();
    }
}

/// A lesson diagram as it would be authored: JSON spec, scroll-driven
/// trigger, and a fixed-step clock loop standing in for the frame callback.
#[test]
fn scrolling_a_diagram_into_view_plays_its_reveal() -> Result<()> {
    let spec = SpecNode::from_json(
        r#"{
            "stagger_ms": 100.0,
            "children": [
                {
                    "animations": [{
                        "element": "title",
                        "property": "opacity",
                        "from": { "type": "scalar", "value": 0.0 },
                        "to": { "type": "scalar", "value": 1.0 },
                        "duration_ms": 300.0
                    }]
                },
                {
                    "animations": [
                        {
                            "element": "box",
                            "property": "translate",
                            "from": { "type": "offset", "x": 0.0, "y": 24.0 },
                            "to": { "type": "offset", "x": 0.0, "y": 0.0 },
                            "duration_ms": 300.0
                        },
                        {
                            "element": "box",
                            "property": "opacity",
                            "from": { "type": "scalar", "value": 0.0 },
                            "to": { "type": "scalar", "value": 1.0 },
                            "duration_ms": 300.0
                        }
                    ]
                },
                {
                    "animations": [{
                        "element": "arrow",
                        "property": "stroke_draw",
                        "from": { "type": "draw_fraction", "fraction": 0.0 },
                        "to": { "type": "draw_fraction", "fraction": 1.0 },
                        "duration_ms": 400.0,
                        "easing": { "type": "linear" }
                    }]
                }
            ]
        }"#,
    )?;

    let mut scene = SceneChoreography::new(spec, IntersectionConfig::with_margin_px(100.0));
    let mut surface = Surface::new(&["title", "box", "arrow"]);

    // The diagram starts 2000 px down the page; the reader scrolls toward it
    // at 40 px per 16 ms frame. No tick does anything until the trigger
    // fires.
    let mut now_ms = 0.0;
    let mut scroll_y = 0.0;
    let mut fired_at = None;
    while fired_at.is_none() {
        assert!(!scene.tick(now_ms, &mut surface));
        now_ms += 16.0;
        scroll_y += 40.0;
        let region = Rect::new(100.0, 2000.0 - scroll_y, 400.0, 300.0);
        fired_at = scene.observe_viewport(region, VIEWPORT, now_ms);
        assert!(now_ms < 10_000.0, "trigger never fired");
    }
    let t0_ms = fired_at.expect("loop exits on firing");
    assert!(surface.state.is_empty());

    // Drive the clock loop until the scene stops asking for ticks.
    let mut ticking = true;
    while ticking {
        ticking = scene.tick(now_ms, &mut surface);
        now_ms += 16.0;
    }
    assert!(scene.is_complete());
    assert!(now_ms - t0_ms < 1000.0, "reveal ran too long");

    // Every property rests at its authored terminal value, exactly.
    assert_eq!(
        surface.value("title", Property::Opacity),
        Some(Value::scalar(1.0))
    );
    assert_eq!(
        surface.value("box", Property::Opacity),
        Some(Value::scalar(1.0))
    );
    assert_eq!(
        surface.value("box", Property::Translate),
        Some(Value::offset(0.0, 0.0))
    );
    assert_eq!(
        surface.value("arrow", Property::StrokeDraw),
        Some(Value::draw_fraction(1.0))
    );

    // The schedule honored the 100 ms cascade relative to the trigger.
    let schedule = scene.schedule().expect("schedule resolved");
    let mut starts: Vec<f64> = schedule
        .entries()
        .iter()
        .map(|entry| entry.start_ms - t0_ms)
        .collect();
    starts.dedup();
    assert_eq!(starts, vec![0.0, 100.0, 200.0]);
    Ok(())
}

#[test]
fn unknown_elements_do_not_reach_the_surface() -> Result<()> {
    let spec = SpecNode::from_json(
        r#"{
            "animations": [
                {
                    "element": "real",
                    "property": "opacity",
                    "from": { "type": "scalar", "value": 0.0 },
                    "to": { "type": "scalar", "value": 1.0 },
                    "duration_ms": 100.0
                },
                {
                    "element": "renamed-last-week",
                    "property": "opacity",
                    "from": { "type": "scalar", "value": 0.0 },
                    "to": { "type": "scalar", "value": 1.0 },
                    "duration_ms": 100.0
                }
            ]
        }"#,
    )?;

    let mut scene = SceneChoreography::new(spec, IntersectionConfig::default());
    let mut surface = Surface::new(&["real"]);

    scene.observe_viewport(Rect::new(0.0, 0.0, 100.0, 100.0), VIEWPORT, 0.0);
    scene.tick(0.0, &mut surface);
    scene.tick(100.0, &mut surface);

    assert_eq!(
        surface.value("real", Property::Opacity),
        Some(Value::scalar(1.0))
    );
    assert!(surface.value("renamed-last-week", Property::Opacity).is_none());
    Ok(())
}
