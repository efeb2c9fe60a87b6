/// Version tag written into persisted snapshots.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Separator used when a context key is built from ordered parts.
pub const CONTEXT_PART_SEPARATOR: &str = "/";

/// Credible interval mass reported by route statistics.
pub const CREDIBLE_INTERVAL_LEVEL: f64 = 0.95;
