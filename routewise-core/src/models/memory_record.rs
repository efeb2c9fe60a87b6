use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContextKey, Outcome, RouteArm};

/// One observed outcome, as held by the short-term memory window.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub context: ContextKey,
    pub route: RouteArm,
    pub outcome: Outcome,
    /// Insertion sequence number, strictly increasing per buffer.
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
}

impl MemoryRecord {
    pub fn new(
        context: ContextKey,
        route: RouteArm,
        outcome: Outcome,
        sequence: u64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            context,
            route,
            outcome,
            sequence,
            recorded_at,
        }
    }

    /// Whether this record belongs to the given pair.
    pub fn matches(&self, context: &ContextKey, route: &RouteArm) -> bool {
        &self.context == context && &self.route == route
    }

    /// Seconds elapsed between `recorded_at` and `now`, floored at zero.
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.recorded_at).num_seconds().max(0) as u64
    }
}
