//! Serializable engine state for persistence and observability.

use serde::{Deserialize, Serialize};

use super::{BeliefState, ContextKey, MemoryRecord, RouteArm};
use crate::constants::SNAPSHOT_FORMAT_VERSION;

/// One belief keyed by its (context, route) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefEntry {
    pub context: ContextKey,
    pub route: RouteArm,
    pub belief: BeliefState,
}

/// Full engine state: every belief plus the ordered memory window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub format_version: u32,
    /// Sorted by (context, route) so snapshots diff cleanly.
    pub beliefs: Vec<BeliefEntry>,
    /// Oldest record first.
    pub memory: Vec<MemoryRecord>,
}

impl EngineSnapshot {
    pub fn new(mut beliefs: Vec<BeliefEntry>, memory: Vec<MemoryRecord>) -> Self {
        beliefs.sort_by(|a, b| (&a.context, &a.route).cmp(&(&b.context, &b.route)));
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            beliefs,
            memory,
        }
    }

    /// Look up one belief by pair.
    pub fn belief(&self, context: &ContextKey, route: &RouteArm) -> Option<&BeliefState> {
        self.beliefs
            .iter()
            .find(|e| &e.context == context && &e.route == route)
            .map(|e| &e.belief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beliefs_are_sorted_on_construction() {
        let entry = |c: &str, r: &str| BeliefEntry {
            context: ContextKey::new(c),
            route: RouteArm::new(r),
            belief: BeliefState::prior(1.0, 1.0),
        };
        let snap = EngineSnapshot::new(
            vec![entry("B", "1"), entry("A", "2"), entry("A", "1")],
            vec![],
        );
        let keys: Vec<_> = snap
            .beliefs
            .iter()
            .map(|e| format!("{}:{}", e.context, e.route))
            .collect();
        assert_eq!(keys, vec!["A:1", "A:2", "B:1"]);
        assert_eq!(snap.format_version, SNAPSHOT_FORMAT_VERSION);
    }

    #[test]
    fn json_round_trip_is_exact() {
        let snap = EngineSnapshot::new(
            vec![BeliefEntry {
                context: ContextKey::new("ZoneA/Morning"),
                route: RouteArm::new("R1"),
                belief: BeliefState {
                    alpha: 0.1 + 0.2,
                    beta: 1.0 / 3.0,
                    updates: 4,
                },
            }],
            vec![],
        );
        let json = serde_json::to_string(&snap).unwrap();
        let back: EngineSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
