// Single source of truth for all default values.

// --- Selection ---
pub const DEFAULT_TEMPERATURE: f64 = 2.0;

// --- Beliefs ---
pub const DEFAULT_PRIOR_ALPHA: f64 = 1.0;
pub const DEFAULT_PRIOR_BETA: f64 = 1.0;

// --- Memory ---
pub const DEFAULT_MEMORY_CAPACITY: usize = 10;
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.5;

// --- Decay ---
pub const DEFAULT_DECAY_FACTOR: f64 = 1.0; // 1.0 leaves beliefs untouched
pub const DEFAULT_STALENESS_THRESHOLD_SECS: u64 = 0; // 0 = every eviction counts

// --- Files ---
pub const DEFAULT_CONFIG_FILENAME: &str = "routewise.toml";

// --- Logging ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
