use serde::{Serialize, Deserialize};
use crate::error::RadialError;

/// Shape of one radial menu. Geometry is rebuilt from scratch whenever this changes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RadialConfig {
    pub size: f64,
    pub num_segments: u32,
    /// Degrees covered by all segments together. Not normalized.
    pub sweep: f64,
    /// Degrees, start of the first segment.
    pub rotation: f64,
    #[serde(alias = "offset")]
    pub inner_offset: f64,
    pub gap: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        RadialConfig {
            size: 640.0,
            num_segments: 6,
            sweep: 360.0,
            rotation: 0.0,
            inner_offset: 0.5,
            gap: 10.0,
        }
    }
}

impl RadialConfig {
    pub fn segment_sweep(&self) -> f64 {
        self.sweep / self.num_segments as f64
    }

    pub fn validate(&self) -> Result<(), RadialError> {
        let numbers = [
            ("size", self.size),
            ("sweep", self.sweep),
            ("rotation", self.rotation),
            ("innerOffset", self.inner_offset),
            ("gap", self.gap),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RadialError::InvalidConfig(format!("{name} must be a finite number")));
        }
        if self.num_segments == 0 {
            return Err(RadialError::InvalidConfig("numSegments must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.inner_offset) {
            return Err(RadialError::InvalidConfig(format!("innerOffset {} is outside [0, 1]", self.inner_offset)));
        }
        if self.gap < 0.0 {
            return Err(RadialError::InvalidConfig(format!("gap {} is negative", self.gap)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_camel_case() {
        let json = r#"{"size":800,"numSegments":8,"sweep":360,"rotation":0,"innerOffset":0.3,"gap":4}"#;
        let config: RadialConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, RadialConfig { size: 800.0, num_segments: 8, sweep: 360.0, rotation: 0.0, inner_offset: 0.3, gap: 4.0 });
        let value = serde_json::to_value(config).unwrap();
        assert_eq!(value["numSegments"], serde_json::json!(8));
        assert_eq!(value["innerOffset"], serde_json::json!(0.3));
        assert!(value.get("num_segments").is_none());
    }

    #[test]
    fn legacy_offset_key_is_accepted() {
        let json = r#"{"size":100,"numSegments":3,"sweep":180,"rotation":45,"offset":0.25,"gap":0}"#;
        let config: RadialConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.inner_offset, 0.25);
    }

    #[test]
    fn validation() {
        assert!(RadialConfig::default().validate().is_ok());
        let bad = [
            RadialConfig { num_segments: 0, ..Default::default() },
            RadialConfig { inner_offset: 1.5, ..Default::default() },
            RadialConfig { gap: -1.0, ..Default::default() },
            RadialConfig { sweep: f64::NAN, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(RadialError::InvalidConfig(_))), "{config:?}");
        }
        // degenerate sizes are the builder's concern
        assert!(RadialConfig { size: 0.0, ..Default::default() }.validate().is_ok());
        // sweep past a full turn is allowed
        assert!(RadialConfig { sweep: 720.0, ..Default::default() }.validate().is_ok());
    }
}
