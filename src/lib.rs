pub mod types;
pub mod error;
pub mod config;
pub mod settings;
pub mod geometry;
pub mod scene;
pub mod objects;
pub mod canvas;
pub mod svg;
pub mod builder;
pub mod migration;
pub mod manager;
pub mod commands;
pub mod engine;
pub mod logging;

pub use builder::{RadialBuilder, RadialEntity};
pub use canvas::Canvas;
pub use commands::{Confirmation, Intent};
pub use config::RadialConfig;
pub use engine::RadialEngine;
pub use error::RadialError;
pub use manager::RadialManager;
pub use migration::MigrationReport;
pub use scene::{NodeId, Parent, SceneError, SceneGraph};
pub use settings::EngineSettings;
