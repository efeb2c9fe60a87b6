//! Weighted random route choice from a softmax distribution.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use routewise_core::errors::{RouterError, RouterResult};
use routewise_core::{ContextKey, RouteArm};

use crate::decision::{RouteScore, SelectionDiagnostics};
use crate::sampler::RouteSamples;

/// Draw an index with probability proportional to `weights`.
pub fn draw_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> RouterResult<usize> {
    let dist = WeightedIndex::new(weights)
        .map_err(|e| RouterError::invalid_config("probabilities", e.to_string()))?;
    Ok(dist.sample(&mut *rng))
}

/// Pick one route by a weighted draw over `probabilities` (not argmax).
///
/// `samples` and `probabilities` are parallel. An empty candidate set fails
/// with `NoCandidates`.
pub fn select_route<R: Rng + ?Sized>(
    context: &ContextKey,
    samples: RouteSamples,
    probabilities: &[f64],
    temperature: f64,
    rng: &mut R,
) -> RouterResult<(RouteArm, SelectionDiagnostics)> {
    if samples.is_empty() {
        return Err(RouterError::NoCandidates {
            context: context.to_string(),
        });
    }

    let index = draw_index(probabilities, rng)?;
    let scores: Vec<RouteScore> = samples
        .into_iter()
        .zip(probabilities.iter().copied())
        .map(|((route, sample), probability)| RouteScore {
            route,
            sample,
            probability,
        })
        .collect();
    let chosen = scores[index].route.clone();

    Ok((
        chosen,
        SelectionDiagnostics {
            temperature,
            scores,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use routewise_core::ErrorCode;

    #[test]
    fn empty_candidates_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_route(&ContextKey::new("A"), vec![], &[], 1.0, &mut rng).unwrap_err();
        assert_eq!(err.error_code(), "NO_CANDIDATES");
    }

    #[test]
    fn frequencies_follow_weights() {
        let mut rng = StdRng::seed_from_u64(9);
        let weights = [0.7, 0.2, 0.1];
        let mut counts = [0usize; 3];
        let n = 20_000;
        for _ in 0..n {
            counts[draw_index(&weights, &mut rng).unwrap()] += 1;
        }
        for (c, w) in counts.iter().zip(weights) {
            let freq = *c as f64 / n as f64;
            assert!((freq - w).abs() < 0.02, "freq {freq} vs weight {w}");
        }
    }

    #[test]
    fn diagnostics_carry_samples_and_probabilities() {
        let mut rng = StdRng::seed_from_u64(2);
        let samples = vec![(RouteArm::new("R1"), 0.9), (RouteArm::new("R2"), 0.1)];
        let (chosen, diag) =
            select_route(&ContextKey::new("A"), samples, &[0.6, 0.4], 1.0, &mut rng).unwrap();
        assert!(chosen == RouteArm::new("R1") || chosen == RouteArm::new("R2"));
        assert_eq!(diag.scores.len(), 2);
        assert_eq!(diag.sample_of(&RouteArm::new("R1")), Some(0.9));
        assert_eq!(diag.probability_of(&RouteArm::new("R2")), Some(0.4));
    }
}
