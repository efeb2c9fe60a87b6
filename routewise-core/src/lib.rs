//! # routewise-core
//!
//! Foundation crate for the routewise decision engine.
//! Defines the belief, outcome, and memory types together with errors,
//! config, and constants. The engine crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::{DecaySchedule, EngineConfig, FeedbackMode};
pub use errors::{ErrorCode, RouterError, RouterResult};
pub use models::{BeliefState, ContextKey, MemoryRecord, Outcome, RouteArm};
