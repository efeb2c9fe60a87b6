//! BeliefStore — concurrent per-(context, route) Beta beliefs via DashMap.

use std::collections::HashSet;

use dashmap::DashMap;

use routewise_core::config::engine_config::validate_decay_factor;
use routewise_core::errors::{RouterError, RouterResult, SnapshotError};
use routewise_core::models::BeliefEntry;
use routewise_core::{BeliefState, ContextKey, EngineConfig, Outcome, RouteArm};

type PairKey = (ContextKey, RouteArm);

/// Thread-safe belief store.
///
/// Every mutation computes a new `BeliefState` and writes it back while the
/// shard write guard for that key is held, so concurrent updates to the same
/// pair are linearizable and a reader never sees alpha and beta out of step.
pub struct BeliefStore {
    beliefs: DashMap<PairKey, BeliefState>,
    prior: BeliefState,
}

impl BeliefStore {
    /// Create a store whose unseen pairs start at Beta(prior_alpha, prior_beta).
    pub fn new(prior_alpha: f64, prior_beta: f64) -> RouterResult<Self> {
        let prior = BeliefState::prior(prior_alpha, prior_beta);
        if !prior.is_valid() {
            return Err(RouterError::invalid_config(
                "prior",
                format!("prior ({prior_alpha}, {prior_beta}) must be finite and > 0"),
            ));
        }
        Ok(Self {
            beliefs: DashMap::new(),
            prior,
        })
    }

    pub fn from_config(config: &EngineConfig) -> RouterResult<Self> {
        Self::new(config.prior_alpha, config.prior_beta)
    }

    /// The belief every new pair starts from.
    pub fn prior(&self) -> BeliefState {
        self.prior
    }

    /// Return the pair's belief, creating it at the prior on first reference.
    pub fn get_or_create(&self, context: &ContextKey, route: &RouteArm) -> BeliefState {
        let key = (context.clone(), route.clone());
        if let Some(existing) = self.beliefs.get(&key) {
            return *existing;
        }
        *self.beliefs.entry(key).or_insert(self.prior)
    }

    /// Current belief, without creating one.
    pub fn get(&self, context: &ContextKey, route: &RouteArm) -> Option<BeliefState> {
        self.beliefs
            .get(&(context.clone(), route.clone()))
            .map(|r| *r)
    }

    /// Whether the pair has ever been referenced.
    pub fn contains(&self, context: &ContextKey, route: &RouteArm) -> bool {
        self.beliefs.contains_key(&(context.clone(), route.clone()))
    }

    /// Fold a raw outcome into the pair's belief.
    ///
    /// Rejects values outside [0, 1] with `InvalidOutcome` before touching
    /// any state.
    pub fn apply(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        outcome: f64,
    ) -> RouterResult<BeliefState> {
        let outcome = Outcome::new(outcome)?;
        Ok(self.apply_outcome(context, route, outcome))
    }

    /// Fold an already-validated outcome into the pair's belief.
    pub fn apply_outcome(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        outcome: Outcome,
    ) -> BeliefState {
        let mut entry = self
            .beliefs
            .entry((context.clone(), route.clone()))
            .or_insert(self.prior);
        let next = entry.applied(outcome);
        *entry = next;
        next
    }

    /// Pull one pair toward the prior. Unknown pairs are left alone.
    pub fn decay(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        factor: f64,
    ) -> RouterResult<Option<BeliefState>> {
        validate_decay_factor(factor)?;
        Ok(self.pull_toward_prior(context, route, factor))
    }

    /// Pull every stored belief toward the prior. Returns how many decayed.
    pub fn decay_all(&self, factor: f64) -> RouterResult<usize> {
        validate_decay_factor(factor)?;
        Ok(self.pull_all_toward_prior(factor))
    }

    /// `decay` with a factor the caller has already validated.
    pub(crate) fn pull_toward_prior(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        factor: f64,
    ) -> Option<BeliefState> {
        self.beliefs
            .get_mut(&(context.clone(), route.clone()))
            .map(|mut entry| {
                let next = entry.decayed(&self.prior, factor);
                *entry = next;
                next
            })
    }

    /// `decay_all` with a factor the caller has already validated.
    pub(crate) fn pull_all_toward_prior(&self, factor: f64) -> usize {
        let mut count = 0;
        for mut entry in self.beliefs.iter_mut() {
            let next = entry.decayed(&self.prior, factor);
            *entry = next;
            count += 1;
        }
        count
    }

    /// Take an outcome that left the memory window back out of the pair's
    /// belief, never going below the prior. Unknown pairs are left alone.
    pub fn forget(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        outcome: Outcome,
    ) -> Option<BeliefState> {
        self.beliefs
            .get_mut(&(context.clone(), route.clone()))
            .map(|mut entry| {
                let next = entry.forgotten(&self.prior, outcome);
                *entry = next;
                next
            })
    }

    /// Every route known under a context, sorted by route.
    pub fn routes_for(&self, context: &ContextKey) -> Vec<(RouteArm, BeliefState)> {
        let mut routes: Vec<_> = self
            .beliefs
            .iter()
            .filter(|r| &r.key().0 == context)
            .map(|r| (r.key().1.clone(), *r.value()))
            .collect();
        routes.sort_by(|a, b| a.0.cmp(&b.0));
        routes
    }

    /// Number of (context, route) pairs held.
    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    /// Copy every belief out. Each entry is read atomically; the set as a
    /// whole is not a point-in-time cut under concurrent writers.
    pub fn snapshot(&self) -> Vec<BeliefEntry> {
        self.beliefs
            .iter()
            .map(|r| BeliefEntry {
                context: r.key().0.clone(),
                route: r.key().1.clone(),
                belief: *r.value(),
            })
            .collect()
    }

    /// Replace all beliefs with `entries`.
    ///
    /// Every entry is validated first; on error the store is unchanged.
    /// Incoming pairs are written before stale ones are dropped, so a pair
    /// present in `entries` is visible throughout the restore. A writer
    /// racing the restore on such a pair may still have its update
    /// overwritten; callers wanting a clean cut must quiesce feedback first.
    pub fn restore(&self, entries: &[BeliefEntry]) -> Result<(), SnapshotError> {
        if let Some(bad) = entries.iter().find(|e| !e.belief.is_valid()) {
            return Err(SnapshotError::InvalidBelief {
                context: bad.context.to_string(),
                route: bad.route.to_string(),
                alpha: bad.belief.alpha,
                beta: bad.belief.beta,
            });
        }
        let keep: HashSet<PairKey> = entries
            .iter()
            .map(|e| (e.context.clone(), e.route.clone()))
            .collect();
        for e in entries {
            self.beliefs
                .insert((e.context.clone(), e.route.clone()), e.belief);
        }
        self.beliefs.retain(|key, _| keep.contains(key));
        Ok(())
    }
}
