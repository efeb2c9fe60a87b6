//! Feedback updater: validate → check mode → apply → remember → decay.

use std::sync::Arc;

use chrono::Utc;

use routewise_core::errors::{RouterError, RouterResult};
use routewise_core::{
    BeliefState, ContextKey, EngineConfig, FeedbackMode, MemoryRecord, Outcome, RouteArm,
};

use crate::belief_store::BeliefStore;
use crate::decay_policy::{DecayAction, DecayPolicy};
use crate::memory::MemoryBuffer;
use crate::tracing_setup::events;

/// Acknowledgement of an applied outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackAck {
    /// Belief right after the outcome was folded in, before any decay.
    pub belief: BeliefState,
    /// The record appended to the memory window.
    pub record: MemoryRecord,
    /// Record pushed out of the window by this append.
    pub evicted: Option<MemoryRecord>,
    pub decay: DecayAction,
}

/// Folds observed outcomes into beliefs and the memory window.
pub struct FeedbackUpdater {
    store: Arc<BeliefStore>,
    memory: Arc<MemoryBuffer>,
    decay: DecayPolicy,
    mode: FeedbackMode,
}

impl FeedbackUpdater {
    pub fn new(
        store: Arc<BeliefStore>,
        memory: Arc<MemoryBuffer>,
        decay: DecayPolicy,
        mode: FeedbackMode,
    ) -> Self {
        Self {
            store,
            memory,
            decay,
            mode,
        }
    }

    pub fn from_config(
        store: Arc<BeliefStore>,
        memory: Arc<MemoryBuffer>,
        config: &EngineConfig,
    ) -> RouterResult<Self> {
        Ok(Self::new(
            store,
            memory,
            DecayPolicy::from_config(config)?,
            config.feedback_mode,
        ))
    }

    /// Apply one observed outcome.
    ///
    /// Every check runs before any state changes: an out-of-range outcome
    /// fails with `InvalidOutcome`, and in strict mode a pair that was never
    /// offered fails with `RouteNotRecognized`.
    pub fn record(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        outcome: f64,
    ) -> RouterResult<FeedbackAck> {
        let outcome = Outcome::new(outcome).inspect_err(|_| {
            events::feedback_rejected(context.as_str(), route.as_str(), "invalid_outcome");
        })?;

        if self.mode == FeedbackMode::Strict && !self.store.contains(context, route) {
            events::feedback_rejected(context.as_str(), route.as_str(), "route_not_recognized");
            return Err(RouterError::RouteNotRecognized {
                context: context.to_string(),
                route: route.to_string(),
            });
        }

        let belief = self.store.apply_outcome(context, route, outcome);
        let appended = self.memory.append(context.clone(), route.clone(), outcome);
        events::outcome_recorded(
            context.as_str(),
            route.as_str(),
            outcome.value(),
            belief.alpha,
            belief.beta,
        );
        if let Some(ref old) = appended.evicted {
            events::memory_evicted(old.context.as_str(), old.route.as_str(), old.sequence);
        }

        let decay = self
            .decay
            .after_update(&self.store, appended.evicted.as_ref(), Utc::now());
        match (&decay, &appended.evicted) {
            (DecayAction::Pair { context, route }, _) => {
                events::belief_decayed(context.as_str(), route.as_str(), self.decay.factor());
            }
            (DecayAction::All { count }, _) => {
                events::beliefs_decayed(*count, self.decay.factor())
            }
            (DecayAction::Forgotten { context, route }, Some(old)) => events::evidence_forgotten(
                context.as_str(),
                route.as_str(),
                old.outcome.value(),
                old.sequence,
            ),
            _ => {}
        }

        Ok(FeedbackAck {
            belief,
            record: appended.record,
            evicted: appended.evicted,
            decay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routewise_core::{DecaySchedule, ErrorCode};

    fn updater(mode: FeedbackMode, capacity: usize, schedule: DecaySchedule) -> FeedbackUpdater {
        FeedbackUpdater::new(
            Arc::new(BeliefStore::new(1.0, 1.0).unwrap()),
            Arc::new(MemoryBuffer::new(capacity, 0.5).unwrap()),
            DecayPolicy::new(schedule, 0.5, 0).unwrap(),
            mode,
        )
    }

    fn pair() -> (ContextKey, RouteArm) {
        (ContextKey::new("ZoneA/Morning"), RouteArm::new("R1"))
    }

    #[test]
    fn permissive_accepts_unknown_pair() {
        let up = updater(FeedbackMode::Permissive, 4, DecaySchedule::Never);
        let (c, r) = pair();
        let ack = up.record(&c, &r, 1.0).unwrap();
        assert_eq!(ack.belief.alpha, 2.0);
        assert_eq!(ack.record.sequence, 0);
        assert_eq!(up.memory.len(), 1);
    }

    #[test]
    fn strict_rejects_unknown_pair_without_mutation() {
        let up = updater(FeedbackMode::Strict, 4, DecaySchedule::Never);
        let (c, r) = pair();
        let err = up.record(&c, &r, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "ROUTE_NOT_RECOGNIZED");
        assert!(up.store.is_empty());
        assert!(up.memory.is_empty());

        up.store.get_or_create(&c, &r);
        assert!(up.record(&c, &r, 1.0).is_ok());
    }

    #[test]
    fn invalid_outcome_leaves_state_untouched() {
        let up = updater(FeedbackMode::Permissive, 4, DecaySchedule::Never);
        let (c, r) = pair();
        up.record(&c, &r, 1.0).unwrap();
        assert!(up.record(&c, &r, 1.5).is_err());
        assert_eq!(up.store.get(&c, &r).unwrap().alpha, 2.0);
        assert_eq!(up.memory.len(), 1);
    }

    #[test]
    fn eviction_triggers_pair_decay() {
        let up = updater(FeedbackMode::Permissive, 1, DecaySchedule::OnEviction);
        let (c, r) = pair();
        up.record(&c, &r, 1.0).unwrap();
        let ack = up.record(&c, &r, 1.0).unwrap();
        assert!(ack.evicted.is_some());
        assert_eq!(
            ack.decay,
            DecayAction::Pair {
                context: c.clone(),
                route: r.clone()
            }
        );
        // (3, 1) pulled halfway to (1, 1).
        assert_eq!(up.store.get(&c, &r).unwrap().alpha, 2.0);
        assert_eq!(ack.belief.alpha, 3.0);
    }

    #[test]
    fn sliding_window_forgets_what_leaves_the_window() {
        let up = updater(FeedbackMode::Permissive, 2, DecaySchedule::SlidingWindow);
        let (c, r) = pair();
        up.record(&c, &r, 1.0).unwrap();
        up.record(&c, &r, 0.0).unwrap();
        let ack = up.record(&c, &r, 1.0).unwrap();

        assert_eq!(ack.evicted.as_ref().map(|e| e.outcome.value()), Some(1.0));
        assert_eq!(
            ack.decay,
            DecayAction::Forgotten {
                context: c.clone(),
                route: r.clone()
            }
        );
        // Prior (1, 1) plus the two outcomes still held: 0.0 and 1.0.
        let b = up.store.get(&c, &r).unwrap();
        assert_eq!((b.alpha, b.beta, b.updates), (2.0, 2.0, 2));
    }

    #[test]
    fn sliding_window_belief_tracks_window_contents() {
        let up = updater(FeedbackMode::Permissive, 3, DecaySchedule::SlidingWindow);
        let c = ContextKey::new("ZoneB/Night");
        let routes = [RouteArm::new("R1"), RouteArm::new("R2")];
        let outcomes = [1.0, 0.25, 0.0, 0.5, 1.0, 0.75, 0.0, 1.0];
        for (i, o) in outcomes.iter().enumerate() {
            up.record(&c, &routes[i % 2], *o).unwrap();
        }

        let window = up.memory.snapshot();
        for route in &routes {
            let held: Vec<f64> = window
                .iter()
                .filter(|rec| rec.matches(&c, route))
                .map(|rec| rec.outcome.value())
                .collect();
            let b = up.store.get(&c, route).unwrap();
            assert_eq!(b.alpha, 1.0 + held.iter().sum::<f64>());
            assert_eq!(b.beta, 1.0 + held.iter().map(|o| 1.0 - o).sum::<f64>());
            assert_eq!(b.updates, held.len() as u64);
        }
    }
}
