use super::error_code::{self, ErrorCode};

/// Errors raised while saving or restoring engine state.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot serialization failed: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unsupported snapshot format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid belief for {context}/{route}: alpha={alpha}, beta={beta}")]
    InvalidBelief {
        context: String,
        route: String,
        alpha: f64,
        beta: f64,
    },

    #[error("memory record sequence {sequence} leaves no room for further appends")]
    SequenceExhausted { sequence: u64 },
}

impl ErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::SNAPSHOT_IO_ERROR,
            Self::Format(_) | Self::UnsupportedVersion { .. } => error_code::SNAPSHOT_FORMAT_ERROR,
            Self::InvalidBelief { .. } | Self::SequenceExhausted { .. } => {
                error_code::SNAPSHOT_INVALID
            }
        }
    }
}
