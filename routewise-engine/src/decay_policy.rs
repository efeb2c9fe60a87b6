//! When and how beliefs are pulled back toward the prior.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use routewise_core::config::engine_config::validate_decay_factor;
use routewise_core::errors::RouterResult;
use routewise_core::{ContextKey, DecaySchedule, EngineConfig, MemoryRecord, RouteArm};

use crate::belief_store::BeliefStore;

/// What a decay pass did after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum DecayAction {
    None,
    /// A single pair was decayed (eviction-driven).
    Pair { context: ContextKey, route: RouteArm },
    /// Every stored belief was decayed (update-count driven).
    All { count: usize },
    /// The evicted record's outcome was taken back out of its pair.
    Forgotten { context: ContextKey, route: RouteArm },
}

/// Decay schedule evaluated by the feedback updater after each update.
/// The belief store never decays on its own.
pub struct DecayPolicy {
    schedule: DecaySchedule,
    /// Validated to lie in (0, 1] at construction.
    factor: f64,
    staleness_threshold_secs: u64,
    updates: AtomicU64,
}

impl DecayPolicy {
    pub fn new(
        schedule: DecaySchedule,
        factor: f64,
        staleness_threshold_secs: u64,
    ) -> RouterResult<Self> {
        validate_decay_factor(factor)?;
        Ok(Self {
            schedule,
            factor,
            staleness_threshold_secs,
            updates: AtomicU64::new(0),
        })
    }

    pub fn from_config(config: &EngineConfig) -> RouterResult<Self> {
        Self::new(
            config.decay_schedule,
            config.decay_factor,
            config.staleness_threshold_secs,
        )
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Run the schedule after one accepted update.
    ///
    /// `evicted` is the record the memory window dropped on this append.
    /// Cannot fail: the factor was checked when the policy was built.
    pub fn after_update(
        &self,
        store: &BeliefStore,
        evicted: Option<&MemoryRecord>,
        now: DateTime<Utc>,
    ) -> DecayAction {
        let n = self.updates.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        match self.schedule {
            DecaySchedule::Never => DecayAction::None,
            DecaySchedule::EveryKUpdates { k } => {
                if k > 0 && n % k == 0 {
                    let count = store.pull_all_toward_prior(self.factor);
                    DecayAction::All { count }
                } else {
                    DecayAction::None
                }
            }
            DecaySchedule::OnEviction => match evicted {
                Some(rec) if rec.age_secs(now) >= self.staleness_threshold_secs => {
                    store.pull_toward_prior(&rec.context, &rec.route, self.factor);
                    DecayAction::Pair {
                        context: rec.context.clone(),
                        route: rec.route.clone(),
                    }
                }
                _ => DecayAction::None,
            },
            DecaySchedule::SlidingWindow => match evicted {
                Some(rec) => {
                    store.forget(&rec.context, &rec.route, rec.outcome);
                    DecayAction::Forgotten {
                        context: rec.context.clone(),
                        route: rec.route.clone(),
                    }
                }
                None => DecayAction::None,
            },
        }
    }
}
