//! Policy enums selected through configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// When belief decay fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecaySchedule {
    /// Beliefs are never pulled toward the prior.
    #[default]
    Never,
    /// Every `k`-th accepted update decays every stored belief.
    EveryKUpdates { k: u64 },
    /// A belief decays when one of its records falls out of the memory window.
    OnEviction,
    /// A record falling out of the memory window takes its evidence with it,
    /// so beliefs hold the prior plus the outcomes still in the window.
    SlidingWindow,
}

impl fmt::Display for DecaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::EveryKUpdates { k } => write!(f, "every_k_updates:{k}"),
            Self::OnEviction => write!(f, "on_eviction"),
            Self::SlidingWindow => write!(f, "sliding_window"),
        }
    }
}

impl FromStr for DecaySchedule {
    type Err = ConfigError;

    /// Parses `never`, `on_eviction`, `sliding_window`, or `every_k_updates:<k>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "never" => return Ok(Self::Never),
            "on_eviction" => return Ok(Self::OnEviction),
            "sliding_window" => return Ok(Self::SlidingWindow),
            _ => {}
        }
        if let Some(k) = s.strip_prefix("every_k_updates:") {
            let k = k.trim().parse::<u64>().map_err(|_| {
                ConfigError::invalid("decay_schedule", format!("bad update count in {s:?}"))
            })?;
            return Ok(Self::EveryKUpdates { k });
        }
        Err(ConfigError::invalid(
            "decay_schedule",
            format!("unknown schedule {s:?}"),
        ))
    }
}

/// Whether feedback for a never-offered route is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackMode {
    /// Reject feedback for pairs with no belief.
    Strict,
    /// Accept all feedback, creating beliefs at the prior as needed.
    #[default]
    Permissive,
}

impl fmt::Display for FeedbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

impl FromStr for FeedbackMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(ConfigError::invalid(
                "feedback_mode",
                format!("expected strict or permissive, got {other:?}"),
            )),
        }
    }
}
