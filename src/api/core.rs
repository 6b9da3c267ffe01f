//! `GridLayoutEngine` JavaScript class
//!
//! Thin wrapper that owns a `GridEngine` and converts values at the
//! boundary. Pointer coordinates are viewport pixels (`clientX`/`clientY`),
//! matching `getBoundingClientRect()` used by `measureContainer`.

use wasm_bindgen::prelude::*;
use crate::engine::GridEngine;
use crate::interaction::{GestureKind, PointerEvent};
use crate::layout::grid_to_pixels;
use crate::models::{ContainerGeometry, EngineConfig, PointerPosition, WidgetSpec};
use super::helpers::{deserialize, is_absent, serialize, serialize_opt, to_js_error};

#[wasm_bindgen]
pub struct GridLayoutEngine {
    engine: GridEngine,
}

#[wasm_bindgen]
impl GridLayoutEngine {
    /// Create an engine from a config object, or the default breakpoint
    /// table when `config` is `undefined`/`null`
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GridLayoutEngine, JsValue> {
        let config: EngineConfig = if is_absent(&config) {
            EngineConfig::default()
        } else {
            deserialize(config, "Failed to deserialize engine config")?
        };
        Self::from_config(config)
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(text: &str) -> Result<GridLayoutEngine, JsValue> {
        let config = EngineConfig::from_json_str(text).map_err(|e| to_js_error(e, "fromJson"))?;
        Self::from_config(config)
    }

    #[wasm_bindgen(js_name = fromYaml)]
    pub fn from_yaml(text: &str) -> Result<GridLayoutEngine, JsValue> {
        let config = EngineConfig::from_yaml_str(text).map_err(|e| to_js_error(e, "fromYaml"))?;
        Self::from_config(config)
    }

    fn from_config(config: EngineConfig) -> Result<GridLayoutEngine, JsValue> {
        let engine = GridEngine::new(config).map_err(|e| to_js_error(e, "GridLayoutEngine"))?;
        Ok(GridLayoutEngine { engine })
    }

    // ------------------------------------------------------------------
    // Widget lifecycle
    // ------------------------------------------------------------------

    /// Register a widget: `{ id, minW, minH, maxW?, maxH?, w?, h?, fixed? }`
    pub fn register(&mut self, spec: JsValue) -> Result<(), JsValue> {
        let spec: WidgetSpec = deserialize(spec, "Failed to deserialize widget spec")?;
        self.engine.register(spec).map_err(|e| to_js_error(e, "register"))
    }

    /// Returns false if `id` was not registered
    pub fn unregister(&mut self, id: &str) -> bool {
        self.engine.unregister(id)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = getActiveLayout)]
    pub fn get_active_layout(&self) -> Result<JsValue, JsValue> {
        serialize(&self.engine.active_layout(), "Failed to serialize layout")
    }

    #[wasm_bindgen(js_name = getLayout)]
    pub fn get_layout(&self, breakpoint: &str) -> Result<JsValue, JsValue> {
        let snapshot = self
            .engine
            .layout(breakpoint)
            .map_err(|e| to_js_error(e, "getLayout"))?;
        serialize(&snapshot, "Failed to serialize layout")
    }

    #[wasm_bindgen(js_name = activeBreakpoint)]
    pub fn active_breakpoint(&self) -> String {
        self.engine.active_breakpoint().to_string()
    }

    pub fn breakpoints(&self) -> Result<JsValue, JsValue> {
        serialize(&self.engine.breakpoints(), "Failed to serialize breakpoints")
    }

    /// Pixel box of an item in the active breakpoint, relative to the
    /// container, or `undefined` for unknown ids
    #[wasm_bindgen(js_name = itemRect)]
    pub fn item_rect(&self, id: &str) -> Result<JsValue, JsValue> {
        let layout = self.engine.active_layout();
        let container = self.engine.container();
        let config = self
            .engine
            .layout_config(self.engine.active_breakpoint())
            .map_err(|e| to_js_error(e, "itemRect"))?;

        let rect = layout
            .get(id)
            .map(|item| grid_to_pixels(item, &config, container.width_px));
        serialize_opt(rect.as_ref(), "Failed to serialize item rect")
    }

    // ------------------------------------------------------------------
    // Host geometry
    // ------------------------------------------------------------------

    /// Returns the outcome of a gesture interrupted by a breakpoint switch,
    /// or `undefined`
    #[wasm_bindgen(js_name = setContainer)]
    pub fn set_container(&mut self, origin_x: f64, origin_y: f64, width_px: f64, height_px: f64) -> Result<JsValue, JsValue> {
        let interrupted = self
            .engine
            .set_container(ContainerGeometry::new(origin_x, origin_y, width_px, height_px));
        serialize_opt(interrupted.as_ref(), "Failed to serialize gesture outcome")
    }

    /// Read the container geometry from a DOM element
    #[wasm_bindgen(js_name = measureContainer)]
    pub fn measure_container(&mut self, element: &web_sys::Element) -> Result<JsValue, JsValue> {
        let rect = element.get_bounding_client_rect();
        self.set_container(rect.left(), rect.top(), rect.width(), rect.height())
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Pointer down on a drag handle. Returns false if the grab was dropped.
    #[wasm_bindgen(js_name = grabDrag)]
    pub fn grab_drag(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.engine.grab(GestureKind::Drag, id, PointerPosition::new(x, y))
    }

    /// Pointer down on a resize handle
    #[wasm_bindgen(js_name = grabResize)]
    pub fn grab_resize(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.engine.grab(GestureKind::Resize, id, PointerPosition::new(x, y))
    }

    /// Returns the preview, or `undefined` when no gesture is in flight
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let preview = self.engine.pointer_move(PointerPosition::new(x, y));
        serialize_opt(preview.as_ref(), "Failed to serialize preview")
    }

    /// Returns the gesture outcome, or `undefined` when nothing was in flight
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let outcome = self.engine.release(Some(PointerPosition::new(x, y)));
        serialize_opt(outcome.as_ref(), "Failed to serialize gesture outcome")
    }

    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.engine.cancel_gesture();
        serialize_opt(outcome.as_ref(), "Failed to serialize gesture outcome")
    }

    /// Route a tagged event object, e.g. `{ type: "move", position: { x, y } }`
    #[wasm_bindgen(js_name = handlePointer)]
    pub fn handle_pointer(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: PointerEvent = deserialize(event, "Failed to deserialize pointer event")?;
        let outcome = self.engine.handle_pointer(event);
        serialize_opt(outcome.as_ref(), "Failed to serialize gesture outcome")
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// `callback(layout)` after every committed change. Returns a listener id.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) -> u32 {
        self.engine.on_change(move |snapshot| {
            if let Ok(value) = serialize(snapshot, "Failed to serialize layout") {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::error!("onChange callback threw: {:?}", e);
                }
            }
        })
    }

    /// `callback(preview)` while a gesture is in flight
    #[wasm_bindgen(js_name = onPreview)]
    pub fn on_preview(&mut self, callback: js_sys::Function) -> u32 {
        self.engine.on_preview(move |preview| {
            if let Ok(value) = serialize(preview, "Failed to serialize preview") {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::error!("onPreview callback threw: {:?}", e);
                }
            }
        })
    }

    #[wasm_bindgen(js_name = removeListener)]
    pub fn remove_listener(&mut self, id: u32) -> bool {
        self.engine.remove_listener(id)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.engine.undo().map_err(|e| to_js_error(e, "undo"))
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.engine.redo().map_err(|e| to_js_error(e, "redo"))
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }
}
