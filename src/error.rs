use thiserror::Error;
use crate::scene::{NodeId, SceneError};
use crate::types::StyleAttribute;

/// Errors raised by the radial engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RadialError {
    #[error("invalid geometry: a chord of {chord} does not fit a circle of radius {radius}")]
    InvalidGeometry { radius: f64, chord: f64 },

    #[error("failed to build radial while {step}: {source}")]
    GeometryBuildFailed {
        step: &'static str,
        #[source]
        source: SceneError,
    },

    #[error("failed to copy {attribute} onto variant {variant}: {source}")]
    VisualAttributeCopyFailed {
        attribute: StyleAttribute,
        variant: usize,
        #[source]
        source: SceneError,
    },

    #[error("failed to remove {node} from the canvas: {source}")]
    NodeRemovalFailed {
        node: NodeId,
        #[source]
        source: SceneError,
    },

    #[error("invalid radial config: {0}")]
    InvalidConfig(String),

    #[error("no radial at index {index}, there are {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid engine settings: {0}")]
    Settings(String),
}

impl RadialError {
    /// Adapter for `map_err` on scene calls made during a build.
    pub(crate) fn build(step: &'static str) -> impl FnOnce(SceneError) -> RadialError {
        move |source| RadialError::GeometryBuildFailed { step, source }
    }
}
