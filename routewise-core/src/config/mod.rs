//! Configuration for routewise.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod defaults;
pub mod engine_config;
pub mod logging_config;
pub mod policy;

pub use engine_config::EngineConfig;
pub use logging_config::LoggingConfig;
pub use policy::{DecaySchedule, FeedbackMode};
