//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a route selection.
pub fn route_selected(
    decision_id: &str,
    context: &str,
    route: &str,
    probability: f64,
    candidates: usize,
) {
    tracing::debug!(
        event = "route_selected",
        decision_id = %decision_id,
        context = %context,
        route = %route,
        probability = probability,
        candidates = candidates,
        "route selected"
    );
}

/// Log an applied outcome.
pub fn outcome_recorded(context: &str, route: &str, outcome: f64, alpha: f64, beta: f64) {
    tracing::debug!(
        event = "outcome_recorded",
        context = %context,
        route = %route,
        outcome = outcome,
        alpha = alpha,
        beta = beta,
        "outcome recorded"
    );
}

/// Log a rejected feedback report.
pub fn feedback_rejected(context: &str, route: &str, reason: &str) {
    tracing::warn!(
        event = "feedback_rejected",
        context = %context,
        route = %route,
        reason = %reason,
        "feedback rejected"
    );
}

/// Log a record falling out of the memory window.
pub fn memory_evicted(context: &str, route: &str, sequence: u64) {
    tracing::trace!(
        event = "memory_evicted",
        context = %context,
        route = %route,
        sequence = sequence,
        "memory record evicted"
    );
}

/// Log a single-pair decay.
pub fn belief_decayed(context: &str, route: &str, factor: f64) {
    tracing::debug!(
        event = "belief_decayed",
        context = %context,
        route = %route,
        factor = factor,
        "belief decayed toward prior"
    );
}

/// Log an evicted outcome taken back out of its belief.
pub fn evidence_forgotten(context: &str, route: &str, outcome: f64, sequence: u64) {
    tracing::debug!(
        event = "evidence_forgotten",
        context = %context,
        route = %route,
        outcome = outcome,
        sequence = sequence,
        "evicted outcome forgotten"
    );
}

/// Log a store-wide decay sweep.
pub fn beliefs_decayed(count: usize, factor: f64) {
    tracing::info!(
        event = "beliefs_decayed",
        count = count,
        factor = factor,
        "beliefs decayed toward prior"
    );
}

/// Log an abandoned decision.
pub fn decision_abandoned(decision_id: &str, context: &str, route: &str) {
    tracing::debug!(
        event = "decision_abandoned",
        decision_id = %decision_id,
        context = %context,
        route = %route,
        "decision abandoned"
    );
}

/// Log a state restore.
pub fn state_loaded(beliefs: usize, records: usize, dropped: usize) {
    tracing::info!(
        event = "state_loaded",
        beliefs = beliefs,
        records = records,
        dropped = dropped,
        "engine state loaded"
    );
}

/// Log a snapshot written to disk.
pub fn snapshot_saved(path: &str, beliefs: usize, records: usize) {
    tracing::info!(
        event = "snapshot_saved",
        path = %path,
        beliefs = beliefs,
        records = records,
        "engine snapshot saved"
    );
}
