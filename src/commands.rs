use wasm_bindgen::prelude::*;
use serde::{Serialize, Deserialize};
use kurbo::Point;
use crate::config::RadialConfig;
use crate::engine::RadialEngine;
use crate::error::RadialError;
use crate::manager::{display_name, RadialManager};
use crate::scene::SceneGraph;

/// Request coming from the editing panel.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Add,
    Duplicate { index: usize },
    Update { index: usize, config: RadialConfig },
    Remove { index: usize },
}

/// Sent back to the panel once an intent went through.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Confirmation {
    Added { config: RadialConfig },
    /// `index` is where the copy landed.
    Duplicated { index: usize, config: RadialConfig },
    Updated { index: usize, config: RadialConfig, skipped_styles: usize },
    Removed { index: usize },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RadialSummary {
    pub name: String,
    pub config: RadialConfig,
}

impl<S: SceneGraph> RadialManager<S> {
    /// Applies one intent. Intents are handled one at a time, in the order they arrive.
    pub fn handle(&mut self, intent: Intent) -> Result<Confirmation, RadialError> {
        let result = match intent.clone() {
            Intent::Add => self.add().map(|config| Confirmation::Added { config }),
            Intent::Duplicate { index } => {
                self.duplicate(index).map(|config| Confirmation::Duplicated { index: index + 1, config })
            }
            Intent::Update { index, config } => self
                .update(index, config)
                .map(|report| Confirmation::Updated { index, config, skipped_styles: report.failures.len() }),
            Intent::Remove { index } => self.remove(index).map(|_| Confirmation::Removed { index }),
        };
        if let Err(e) = &result {
            log::error!("{:?} rejected: {}", intent, e);
        }
        result
    }

    pub fn summaries(&self) -> Vec<RadialSummary> {
        self.radials()
            .iter()
            .enumerate()
            .map(|(i, r)| RadialSummary { name: display_name(i), config: *r.config() })
            .collect()
    }
}

fn index_param(params: &serde_json::Value) -> Result<usize, String> {
    params["index"]
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| "missing or invalid \"index\"".to_string())
}

/// Maps a command envelope onto an intent. Both the short action names and the panel's event
/// names are understood.
fn parse_intent(action: &str, params: &serde_json::Value) -> Option<Result<Intent, String>> {
    let intent = match action {
        "add" | "RADIAL_REQUESTED" => Ok(Intent::Add),
        "duplicate" | "DUPLICATE_RADIAL_REQUESTED" => index_param(params).map(|index| Intent::Duplicate { index }),
        "update" | "RADIAL_UPDATED" => index_param(params).and_then(|index| {
            serde_json::from_value::<RadialConfig>(params["config"].clone())
                .map(|config| Intent::Update { index, config })
                .map_err(|e| format!("invalid config: {}", e))
        }),
        "remove" | "RADIAL_REMOVED" => index_param(params).map(|index| Intent::Remove { index }),
        _ => return None,
    };
    Some(intent)
}

pub(crate) fn error_reply(msg: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": msg.to_string() }).to_string()
}

#[wasm_bindgen]
impl RadialEngine {
    /// JSON command endpoint: `{"action": ..., "params": {...}}` in, JSON reply out.
    pub fn execute_command(&mut self, cmd_json: &str) -> String {
        #[derive(Deserialize)]
        struct Command {
            action: String,
            #[serde(default)]
            params: serde_json::Value,
        }

        let cmd: Command = match serde_json::from_str(cmd_json) {
            Ok(c) => c,
            Err(e) => return error_reply(format!("Invalid JSON: {}", e)),
        };

        if let Some(intent) = parse_intent(&cmd.action, &cmd.params) {
            let intent = match intent {
                Ok(intent) => intent,
                Err(e) => return error_reply(e),
            };
            return match self.manager.handle(intent) {
                Ok(confirmation) => serde_json::json!({ "success": true, "confirmation": confirmation }).to_string(),
                Err(e) => error_reply(e),
            };
        }

        match cmd.action.as_str() {
            "get_radials" => self.get_radials(),
            "set_viewport" => match (cmd.params["x"].as_f64(), cmd.params["y"].as_f64()) {
                (Some(x), Some(y)) => {
                    self.set_viewport(x, y);
                    serde_json::json!({ "success": true }).to_string()
                }
                _ => error_reply("missing or invalid \"x\"/\"y\""),
            },
            "configure" => self.configure(&cmd.params.to_string()),
            "export_svg" => serde_json::json!({ "svg": self.export_svg() }).to_string(),
            other => error_reply(format!("Unknown action: {}", other)),
        }
    }

    pub fn set_viewport(&mut self, x: f64, y: f64) {
        self.manager.scene_mut().set_viewport_center(Point::new(x, y));
    }

    pub fn get_radials(&self) -> String {
        serde_json::to_string(&self.manager.summaries()).unwrap_or_else(|_| "[]".to_string())
    }
}
