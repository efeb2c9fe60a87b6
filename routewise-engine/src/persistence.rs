//! JSON persistence for engine snapshots.
//!
//! serde_json is built with `float_roundtrip`, so belief parameters read back
//! bit-for-bit.

use std::path::Path;

use routewise_core::constants::SNAPSHOT_FORMAT_VERSION;
use routewise_core::errors::SnapshotError;
use routewise_core::models::EngineSnapshot;

/// Serialize a snapshot to pretty JSON.
pub fn to_json(snapshot: &EngineSnapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a snapshot and check its format version.
pub fn from_json(json: &str) -> Result<EngineSnapshot, SnapshotError> {
    let snapshot: EngineSnapshot = serde_json::from_str(json)?;
    if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: snapshot.format_version,
            expected: SNAPSHOT_FORMAT_VERSION,
        });
    }
    Ok(snapshot)
}

/// Write a snapshot to `path`.
///
/// Writes a sibling temp file first and renames it over the target, so a
/// crash mid-write never leaves a truncated snapshot behind.
pub fn save_snapshot(path: &Path, snapshot: &EngineSnapshot) -> Result<(), SnapshotError> {
    let json = to_json(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|source| io_error(&tmp, source))?;
    std::fs::rename(&tmp, path).map_err(|source| io_error(path, source))?;
    Ok(())
}

/// Read a snapshot from `path`.
pub fn load_snapshot(path: &Path) -> Result<EngineSnapshot, SnapshotError> {
    let json = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    from_json(&json)
}

fn io_error(path: &Path, source: std::io::Error) -> SnapshotError {
    SnapshotError::Io {
        path: path.display().to_string(),
        source,
    }
}
