use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::CONTEXT_PART_SEPARATOR;

/// Situational key a decision is made under (zone, task type, time bucket, …).
///
/// Equality and hashing are exact. Keys built from parts join them with `/`,
/// so `from_parts(["ZoneA", "Morning"])` equals `new("ZoneA/Morning")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextKey(String);

impl ContextKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from ordered situational attributes.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(CONTEXT_PART_SEPARATOR);
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContextKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_join_with_separator() {
        let key = ContextKey::from_parts(["ZoneA", "Morning"]);
        assert_eq!(key, ContextKey::new("ZoneA/Morning"));
        assert_eq!(key.to_string(), "ZoneA/Morning");
    }

    #[test]
    fn equality_is_exact() {
        assert_ne!(ContextKey::new("zonea"), ContextKey::new("ZoneA"));
        assert_ne!(ContextKey::new("ZoneA "), ContextKey::new("ZoneA"));
    }
}
