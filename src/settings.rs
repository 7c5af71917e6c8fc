use serde::{Serialize, Deserialize};
use crate::config::RadialConfig;
use crate::error::RadialError;

/// Host-supplied engine settings. Every field falls back to its default when omitted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Config used by `add`.
    pub default_radial: RadialConfig,
    pub reference_fill: String,
    pub focused_fill: String,
    pub variant_spacing: f64,
    pub variant_padding: f64,
    pub panel_spacing: f64,
    /// Horizontal distance between a radial and the components panel.
    pub panel_margin: f64,
    pub hover_transition_secs: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_radial: RadialConfig::default(),
            reference_fill: "#d9d9d9".to_string(),
            focused_fill: "#ffffff".to_string(),
            variant_spacing: 48.0,
            variant_padding: 48.0,
            panel_spacing: 48.0,
            panel_margin: 200.0,
            hover_transition_secs: 0.3,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, RadialError> {
        let settings: EngineSettings = serde_json::from_str(json).map_err(|e| RadialError::Settings(e.to_string()))?;
        settings.default_radial.validate().map_err(|e| RadialError::Settings(e.to_string()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = EngineSettings::from_json(r#"{"panel_margin": 120}"#).unwrap();
        assert_eq!(settings.panel_margin, 120.0);
        assert_eq!(settings.default_radial, RadialConfig::default());
        assert_eq!(settings.reference_fill, "#d9d9d9");
    }

    #[test]
    fn default_radial_is_validated() {
        let json = r#"{"default_radial": {"size":10,"numSegments":0,"sweep":360,"rotation":0,"innerOffset":0,"gap":0}}"#;
        assert!(matches!(EngineSettings::from_json(json), Err(RadialError::Settings(_))));
        assert!(matches!(EngineSettings::from_json("not json"), Err(RadialError::Settings(_))));
    }
}
