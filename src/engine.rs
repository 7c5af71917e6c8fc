use wasm_bindgen::prelude::*;
use crate::canvas::Canvas;
use crate::commands::{error_reply, Confirmation, Intent};
use crate::error::RadialError;
use crate::manager::RadialManager;
use crate::settings::EngineSettings;

/// Host-facing handle: one canvas and the radials drawn on it.
#[wasm_bindgen]
pub struct RadialEngine {
    pub(crate) manager: RadialManager<Canvas>,
}

impl Default for RadialEngine {
    fn default() -> Self {
        RadialEngine::new()
    }
}

#[wasm_bindgen]
impl RadialEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RadialEngine {
        console_error_panic_hook::set_once();

        RadialEngine { manager: RadialManager::new(Canvas::new()) }
    }

    /// Replaces the engine settings from JSON; existing radials are left as they are.
    pub fn configure(&mut self, settings_json: &str) -> String {
        match EngineSettings::from_json(settings_json) {
            Ok(settings) => {
                self.manager.set_settings(settings);
                serde_json::json!({ "success": true }).to_string()
            }
            Err(e) => error_reply(e),
        }
    }

    /// Takes an intent object such as `{ type: "duplicate", index: 0 }` and resolves to its
    /// confirmation.
    pub fn dispatch(&mut self, intent: JsValue) -> Result<JsValue, JsValue> {
        let intent: Intent = serde_wasm_bindgen::from_value(intent)?;
        let confirmation = self.handle(intent).map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        Ok(serde_wasm_bindgen::to_value(&confirmation)?)
    }

    pub fn export_svg(&self) -> String {
        self.manager.scene().export_svg()
    }

    pub fn get_nodes_json(&self) -> String {
        self.manager.scene().get_nodes_json()
    }
}

impl RadialEngine {
    pub fn handle(&mut self, intent: Intent) -> Result<Confirmation, RadialError> {
        self.manager.handle(intent)
    }

    pub fn manager(&self) -> &RadialManager<Canvas> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut RadialManager<Canvas> {
        &mut self.manager
    }
}
