// Responsive breakpoint behaviour of the engine

use std::cell::RefCell;
use std::rc::Rc;

use terminal_grid_wasm::{
    ContainerGeometry, EngineConfig, GestureKind, GestureOutcome, GridEngine, LayoutPreview,
    PointerPosition, RevertReason, WidgetSpec,
};

fn container(width: f64) -> ContainerGeometry {
    ContainerGeometry::new(0.0, 0.0, width, 900.0)
}

#[test]
fn test_engine_starts_on_fallback_breakpoint() {
    let engine = GridEngine::new(EngineConfig::default()).unwrap();
    assert_eq!(engine.active_breakpoint(), "narrow");
    assert_eq!(engine.active_layout().columns, 4);
}

#[test]
fn test_initial_width_selects_breakpoint() {
    let config = EngineConfig {
        initial_width_px: Some(900.0),
        ..EngineConfig::default()
    };
    let engine = GridEngine::new(config).unwrap();
    assert_eq!(engine.active_breakpoint(), "medium");
}

#[test]
fn test_width_changes_switch_and_notify() {
    let mut engine = GridEngine::new(EngineConfig::default()).unwrap();
    let switches: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&switches);
    engine.on_change(move |snapshot| sink.borrow_mut().push(snapshot.breakpoint.clone()));

    engine.set_container(container(1400.0));
    engine.set_container(container(1300.0)); // still wide
    engine.set_container(container(800.0));
    engine.set_container(container(f64::NAN)); // ignored
    engine.set_container(container(300.0));

    assert_eq!(*switches.borrow(), vec!["wide", "medium", "narrow"]);
    assert_eq!(engine.container().width_px, 300.0);
}

#[test]
fn test_each_breakpoint_is_seeded_and_edited_independently() {
    let mut engine = GridEngine::new(EngineConfig::default()).unwrap();
    engine.register(WidgetSpec::new("book", 3, 4)).unwrap();
    engine.register(WidgetSpec::new("quote", 3, 2)).unwrap();

    // Same algorithm, different column counts
    let wide = engine.layout("wide").unwrap();
    let narrow = engine.layout("narrow").unwrap();
    assert_eq!(wide.get("quote").map(|i| (i.x, i.y)), Some((3, 0)));
    assert_eq!(narrow.get("quote").map(|i| (i.x, i.y)), Some((0, 4)));

    // Drag quote in the wide layout only
    engine.set_container(ContainerGeometry::new(0.0, 0.0, 1330.0, 900.0));
    engine.grab(GestureKind::Drag, "quote", PointerPosition::new(350.0, 15.0));
    let outcome = engine.release(Some(PointerPosition::new(785.0, 255.0))).unwrap();
    assert!(outcome.is_committed());

    let wide = engine.layout("wide").unwrap();
    assert_eq!(wide.get("quote").map(|i| (i.x, i.y)), Some((7, 6)));
    assert_eq!(engine.layout("narrow").unwrap(), narrow);
}

#[test]
fn test_wide_widget_is_capped_on_narrow_breakpoint() {
    let mut engine = GridEngine::new(EngineConfig::default()).unwrap();
    engine.register(WidgetSpec::new("chart", 6, 3).with_size(8, 4)).unwrap();

    let chart = engine.layout("narrow").unwrap().get("chart").cloned().unwrap();
    assert_eq!((chart.w, chart.min_w), (4, 4));

    let chart = engine.layout("wide").unwrap().get("chart").cloned().unwrap();
    assert_eq!((chart.w, chart.min_w), (8, 6));
    engine.check_invariants().unwrap();
}

#[test]
fn test_breakpoint_switch_interrupts_gesture() {
    let mut engine = GridEngine::new(EngineConfig::default()).unwrap();
    engine.set_container(ContainerGeometry::new(0.0, 0.0, 1330.0, 900.0));
    engine.register(WidgetSpec::new("A", 3, 2)).unwrap();

    let previews: Rc<RefCell<Vec<LayoutPreview>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&previews);
    engine.on_preview(move |preview| sink.borrow_mut().push(preview.clone()));

    assert!(engine.grab(GestureKind::Drag, "A", PointerPosition::new(15.0, 15.0)));
    engine.pointer_move(PointerPosition::new(600.0, 300.0));

    let interrupted = engine.set_container(container(500.0));
    assert_eq!(
        interrupted,
        Some(GestureOutcome::Reverted {
            gesture: GestureKind::Drag,
            id: "A".to_string(),
            reason: RevertReason::Interrupted,
        })
    );
    assert!(!engine.is_gesture_active());

    // Last preview tells the host to drop its drag feedback
    let last = previews.borrow().last().cloned().unwrap();
    assert!(!last.valid);
    assert_eq!((last.item.x, last.item.y), (0, 0));

    // Same-breakpoint resizes interrupt nothing
    assert!(engine.set_container(container(520.0)).is_none());
    assert!(engine.release(None).is_none());

    let wide_a = engine.layout("wide").unwrap().get("A").cloned().unwrap();
    assert_eq!((wide_a.x, wide_a.y), (0, 0));
}

#[test]
fn test_cancel_reports_interruption() {
    let mut engine = GridEngine::new(EngineConfig::default()).unwrap();
    engine.register(WidgetSpec::new("A", 2, 2)).unwrap();

    engine.grab(GestureKind::Resize, "A", PointerPosition::new(10.0, 10.0));
    let outcome = engine.cancel_gesture().unwrap();
    assert_eq!(
        outcome,
        GestureOutcome::Reverted {
            gesture: GestureKind::Resize,
            id: "A".to_string(),
            reason: RevertReason::Interrupted,
        }
    );
}

#[test]
fn test_unknown_breakpoint_lookup() {
    let engine = GridEngine::new(EngineConfig::default()).unwrap();
    assert!(engine.layout("ultrawide").is_err());
}
