//! WASM build test
//!
//! Exercises the `GridLayoutEngine` JavaScript class in a browser.

#![cfg(target_arch = "wasm32")]

use terminal_grid_wasm::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn widget(id: &str, min_w: u32, min_h: u32) -> JsValue {
    serde_wasm_bindgen::to_value(&WidgetSpec::new(id, min_w, min_h)).unwrap()
}

fn wide_engine() -> GridLayoutEngine {
    let mut engine = GridLayoutEngine::new(JsValue::UNDEFINED).unwrap();
    engine.set_container(0.0, 0.0, 1330.0, 800.0).unwrap();
    engine
}

#[wasm_bindgen_test]
fn test_engine_creation() {
    let engine = GridLayoutEngine::new(JsValue::NULL).unwrap();
    assert_eq!(engine.active_breakpoint(), "narrow");
}

#[wasm_bindgen_test]
fn test_register_and_read_layout() {
    let mut engine = wide_engine();
    engine.register(widget("A", 3, 2)).unwrap();
    engine.register(widget("B", 3, 2)).unwrap();

    let layout: LayoutSnapshot = serde_wasm_bindgen::from_value(engine.get_active_layout().unwrap()).unwrap();
    assert_eq!(layout.breakpoint, "wide");
    assert_eq!(layout.get("B").map(|i| (i.x, i.y)), Some((3, 0)));
}

#[wasm_bindgen_test]
fn test_drag_through_js_api() {
    let mut engine = wide_engine();
    engine.register(widget("A", 3, 2)).unwrap();

    assert!(engine.grab_drag("A", 15.0, 15.0));
    let preview = engine.pointer_move(455.0, 135.0).unwrap();
    assert!(!preview.is_undefined());

    let outcome: GestureOutcome = serde_wasm_bindgen::from_value(engine.pointer_up(455.0, 135.0).unwrap()).unwrap();
    assert!(outcome.is_committed());
    assert!(engine.can_undo());
}

#[wasm_bindgen_test]
fn test_change_callback_is_invoked() {
    let mut engine = wide_engine();
    let callback = js_sys::Function::new_with_args("layout", "globalThis.__gridChanges = (globalThis.__gridChanges || 0) + 1;");
    let id = engine.on_change(callback);

    engine.register(widget("A", 2, 2)).unwrap();
    let count = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__gridChanges")).unwrap();
    assert_eq!(count.as_f64(), Some(1.0));
    assert!(engine.remove_listener(id));
}

#[wasm_bindgen_test]
fn test_yaml_config() {
    let engine = GridLayoutEngine::from_yaml(
        "breakpoints:\n  - name: only\n    minWidthPx: 0\n    grid: { columns: 6, rowHeightPx: 20, gutterPx: 4, paddingPx: 4 }\n",
    )
    .unwrap();
    assert_eq!(engine.active_breakpoint(), "only");
    assert!(GridLayoutEngine::from_json("{}").is_err());
}
