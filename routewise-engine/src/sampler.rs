//! Thompson sampler: one independent Beta draw per candidate route.

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Beta;

use routewise_core::{BeliefState, ContextKey, RouteArm};

use crate::belief_store::BeliefStore;

/// Drawn samples, in candidate order.
pub type RouteSamples = Vec<(RouteArm, f64)>;

/// Collapse duplicate candidates, keeping first-occurrence order.
pub fn dedup_candidates(candidates: &[RouteArm]) -> Vec<RouteArm> {
    let mut seen = std::collections::HashSet::with_capacity(candidates.len());
    candidates
        .iter()
        .filter(|r| seen.insert(*r))
        .cloned()
        .collect()
}

/// Draw one value in [0, 1] from Beta(alpha, beta).
///
/// Falls back to the posterior mean if statrs rejects the parameters, which
/// the store's invariants rule out.
pub fn sample_belief<R: Rng + ?Sized>(belief: &BeliefState, rng: &mut R) -> f64 {
    match Beta::new(belief.alpha, belief.beta) {
        Ok(dist) => {
            let x: f64 = dist.sample(&mut *rng);
            if x.is_finite() {
                x.clamp(0.0, 1.0)
            } else {
                belief.mean()
            }
        }
        Err(_) => belief.mean(),
    }
}

/// Sample every candidate under `context`.
///
/// Unseen pairs are created at the prior; existing beliefs are never
/// modified. Duplicate candidates are sampled once.
pub fn sample_routes<R: Rng + ?Sized>(
    store: &BeliefStore,
    context: &ContextKey,
    candidates: &[RouteArm],
    rng: &mut R,
) -> RouteSamples {
    dedup_candidates(candidates)
        .into_iter()
        .map(|route| {
            let belief = store.get_or_create(context, &route);
            let x = sample_belief(&belief, &mut *rng);
            (route, x)
        })
        .collect()
}
