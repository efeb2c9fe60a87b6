//! # routewise-engine
//!
//! Contextual Thompson sampling: per-(context, route) Beta beliefs, one draw
//! per candidate, temperature-scaled softmax, and a weighted random pick.
//! Outcome feedback folds back into beliefs and a bounded memory window,
//! with optional decay toward the prior.

pub mod belief_store;
pub mod decay_policy;
pub mod decision;
pub mod engine;
pub mod feedback;
pub mod memory;
pub mod persistence;
pub mod sampler;
pub mod selector;
pub mod softmax;
pub mod tracing_setup;

pub use belief_store::BeliefStore;
pub use decision::{Decision, DecisionPhase, SelectionDiagnostics};
pub use engine::{RouteEngine, RouteStats};
pub use feedback::{FeedbackAck, FeedbackUpdater};
pub use memory::MemoryBuffer;
