use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use routewise_core::config::engine_config::validate_temperature;
use routewise_core::constants::{CREDIBLE_INTERVAL_LEVEL, SNAPSHOT_FORMAT_VERSION};
use routewise_core::errors::{RouterError, RouterResult, SnapshotError};
use routewise_core::models::EngineSnapshot;
use routewise_core::{BeliefState, ContextKey, EngineConfig, RouteArm};

use crate::belief_store::BeliefStore;
use crate::decision::{Decision, DecisionPhase};
use crate::feedback::{FeedbackAck, FeedbackUpdater};
use crate::memory::MemoryBuffer;
use crate::tracing_setup::events;
use crate::{persistence, sampler, selector, softmax};

/// Per-route view of what the engine believes under one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStats {
    pub route: RouteArm,
    pub alpha: f64,
    pub beta: f64,
    pub updates: u64,
    pub mean: f64,
    pub variance: f64,
    pub credible_interval: (f64, f64),
    /// Success share over the memory window, if the pair appears in it.
    pub windowed_success_rate: Option<f64>,
}

/// Contextual Thompson-sampling route engine.
///
/// Shareable across threads behind an `Arc`; every operation is
/// compute-only. Randomness is passed in per call.
pub struct RouteEngine {
    config: EngineConfig,
    store: Arc<BeliefStore>,
    memory: Arc<MemoryBuffer>,
    feedback: FeedbackUpdater,
}

impl RouteEngine {
    /// Build an engine from a validated config.
    pub fn new(config: EngineConfig) -> RouterResult<Self> {
        config.validate()?;
        let store = Arc::new(BeliefStore::from_config(&config)?);
        let memory = Arc::new(MemoryBuffer::from_config(&config)?);
        let feedback = FeedbackUpdater::from_config(Arc::clone(&store), Arc::clone(&memory), &config)?;
        Ok(Self {
            config,
            store,
            memory,
            feedback,
        })
    }

    /// Build an engine from `routewise.toml` under `root` plus env overrides.
    pub fn load_config(root: &Path) -> RouterResult<Self> {
        Self::new(EngineConfig::load(root)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn belief_store(&self) -> &BeliefStore {
        &self.store
    }

    pub fn memory(&self) -> &MemoryBuffer {
        &self.memory
    }

    /// Pick a route at the configured temperature.
    pub fn select_route<R: Rng + ?Sized>(
        &self,
        context: &ContextKey,
        candidates: &[RouteArm],
        rng: &mut R,
    ) -> RouterResult<Decision> {
        self.select_route_with_temperature(context, candidates, self.config.temperature, rng)
    }

    /// Pick a route using the calling thread's generator.
    pub fn select_route_thread_rng(
        &self,
        context: &ContextKey,
        candidates: &[RouteArm],
    ) -> RouterResult<Decision> {
        self.select_route(context, candidates, &mut rand::thread_rng())
    }

    /// Pick a route at an explicit temperature.
    ///
    /// Fails with `InvalidConfig` for a non-positive temperature and with
    /// `NoCandidates` for an empty candidate set, in both cases before any
    /// belief is created.
    pub fn select_route_with_temperature<R: Rng + ?Sized>(
        &self,
        context: &ContextKey,
        candidates: &[RouteArm],
        temperature: f64,
        rng: &mut R,
    ) -> RouterResult<Decision> {
        validate_temperature(temperature)?;
        if candidates.is_empty() {
            return Err(RouterError::NoCandidates {
                context: context.to_string(),
            });
        }

        let mut phase = DecisionPhase::AwaitingContext;
        let samples = sampler::sample_routes(&self.store, context, candidates, &mut *rng);
        advance(&mut phase, DecisionPhase::Sampled);

        let values: Vec<f64> = samples.iter().map(|(_, x)| *x).collect();
        let probabilities = softmax::softmax(&values, temperature)?;
        advance(&mut phase, DecisionPhase::Scaled);

        let (chosen, diagnostics) =
            selector::select_route(context, samples, &probabilities, temperature, &mut *rng)?;
        advance(&mut phase, DecisionPhase::Selected);
        advance(&mut phase, DecisionPhase::AwaitingFeedback);

        let decision = Decision::new(context.clone(), chosen, diagnostics);
        events::route_selected(
            &decision.id().to_string(),
            context.as_str(),
            decision.chosen().as_str(),
            decision
                .diagnostics()
                .probability_of(decision.chosen())
                .unwrap_or_default(),
            decision.diagnostics().scores.len(),
        );
        Ok(decision)
    }

    /// Report the outcome of an executed route.
    pub fn record_outcome(
        &self,
        context: &ContextKey,
        route: &RouteArm,
        outcome: f64,
    ) -> RouterResult<FeedbackAck> {
        self.feedback.record(context, route, outcome)
    }

    /// Close a decision with its observed outcome.
    ///
    /// A decision already updated or abandoned fails with `DecisionClosed`,
    /// so an outcome is never applied twice. A rejected outcome leaves the
    /// decision open.
    pub fn complete(&self, decision: &mut Decision, outcome: f64) -> RouterResult<FeedbackAck> {
        decision.ensure_open()?;
        let ack = self.record_outcome(decision.context(), decision.chosen(), outcome)?;
        decision.transition(DecisionPhase::Updated)?;
        Ok(ack)
    }

    /// Current belief for a pair, if it has been referenced.
    pub fn belief(&self, context: &ContextKey, route: &RouteArm) -> Option<BeliefState> {
        self.store.get(context, route)
    }

    /// Statistics for every route known under `context`, sorted by route.
    pub fn route_stats(&self, context: &ContextKey) -> Vec<RouteStats> {
        self.store
            .routes_for(context)
            .into_iter()
            .map(|(route, b)| RouteStats {
                windowed_success_rate: self.memory.windowed_success_rate(context, &route),
                route,
                alpha: b.alpha,
                beta: b.beta,
                updates: b.updates,
                mean: b.mean(),
                variance: b.variance(),
                credible_interval: b.credible_interval(CREDIBLE_INTERVAL_LEVEL),
            })
            .collect()
    }

    /// Drop every record from the memory window. Beliefs are kept.
    pub fn reset_memory(&self) {
        self.memory.clear();
    }

    /// Copy out all beliefs and the memory window.
    pub fn snapshot_state(&self) -> EngineSnapshot {
        EngineSnapshot::new(self.store.snapshot(), self.memory.snapshot())
    }

    /// Replace engine state with `snapshot`.
    ///
    /// The snapshot is fully validated before anything is replaced. Memory
    /// beyond this engine's capacity keeps only the newest records.
    /// Feedback arriving while a load runs may be overwritten by it.
    pub fn load_state(&self, snapshot: &EngineSnapshot) -> RouterResult<()> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.format_version,
                expected: SNAPSHOT_FORMAT_VERSION,
            }
            .into());
        }
        MemoryBuffer::next_sequence_after(&snapshot.memory)?;
        self.store.restore(&snapshot.beliefs)?;
        let dropped = self.memory.restore(&snapshot.memory)?;
        events::state_loaded(snapshot.beliefs.len(), snapshot.memory.len(), dropped);
        Ok(())
    }

    /// Write the current state to a JSON file.
    pub fn save_to(&self, path: &Path) -> RouterResult<()> {
        let snapshot = self.snapshot_state();
        persistence::save_snapshot(path, &snapshot)?;
        events::snapshot_saved(
            &path.display().to_string(),
            snapshot.beliefs.len(),
            snapshot.memory.len(),
        );
        Ok(())
    }

    /// Replace the current state with one read from a JSON file.
    pub fn load_from(&self, path: &Path) -> RouterResult<()> {
        let snapshot = persistence::load_snapshot(path)?;
        self.load_state(&snapshot)
    }
}

fn advance(phase: &mut DecisionPhase, next: DecisionPhase) {
    debug_assert!(
        phase.can_transition_to(next),
        "illegal decision transition {phase} -> {next}"
    );
    *phase = next;
}
