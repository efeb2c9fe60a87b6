pub mod belief;
pub mod context;
pub mod memory_record;
pub mod outcome;
pub mod route;
pub mod snapshot;

pub use belief::BeliefState;
pub use context::ContextKey;
pub use memory_record::MemoryRecord;
pub use outcome::Outcome;
pub use route::RouteArm;
pub use snapshot::{BeliefEntry, EngineSnapshot};
