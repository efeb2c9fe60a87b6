use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Identifier of a candidate route. Only meaningful relative to a context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteArm(String);

impl RouteArm {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Numbered arms `min..=max`, e.g. routes 1 through 10.
    pub fn range(min: u32, max: u32) -> Result<Vec<Self>, ConfigError> {
        if min >= max {
            return Err(ConfigError::invalid(
                "route_range",
                format!("route_min ({min}) must be less than route_max ({max})"),
            ));
        }
        Ok((min..=max).map(|n| Self(n.to_string())).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteArm {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RouteArm {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u32> for RouteArm {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}
