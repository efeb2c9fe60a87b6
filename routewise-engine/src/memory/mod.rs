//! Short-term memory: a bounded FIFO window over recent outcomes.

pub mod buffer;

pub use buffer::{AppendResult, MemoryBuffer};
