//! Error handling for routewise.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod router_error;
pub mod snapshot_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use router_error::{RouterError, RouterResult};
pub use snapshot_error::SnapshotError;
