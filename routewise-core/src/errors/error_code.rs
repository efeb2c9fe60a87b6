//! Stable, machine-readable error codes.

pub const INVALID_OUTCOME: &str = "INVALID_OUTCOME";
pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
pub const NO_CANDIDATES: &str = "NO_CANDIDATES";
pub const ROUTE_NOT_RECOGNIZED: &str = "ROUTE_NOT_RECOGNIZED";
pub const DECISION_CLOSED: &str = "DECISION_CLOSED";
pub const CONFIG_FILE_NOT_FOUND: &str = "CONFIG_FILE_NOT_FOUND";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const SNAPSHOT_IO_ERROR: &str = "SNAPSHOT_IO_ERROR";
pub const SNAPSHOT_FORMAT_ERROR: &str = "SNAPSHOT_FORMAT_ERROR";
pub const SNAPSHOT_INVALID: &str = "SNAPSHOT_INVALID";

/// Maps an error value to a stable code callers can match on without
/// parsing display strings.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
