use proptest::prelude::*;
use routewise_core::{BeliefState, Outcome};

fn arb_belief() -> impl Strategy<Value = BeliefState> {
    (0.01f64..1_000.0, 0.01f64..1_000.0).prop_map(|(a, b)| BeliefState::prior(a, b))
}

// ── Apply adds exactly o and 1 - o ───────────────────────────────────────

proptest! {
    #[test]
    fn apply_increments_exactly(belief in arb_belief(), o in 0.0f64..=1.0) {
        let outcome = Outcome::new(o).unwrap();
        let next = belief.applied(outcome);
        prop_assert_eq!(next.alpha, belief.alpha + o);
        prop_assert_eq!(next.beta, belief.beta + (1.0 - o));
        prop_assert!(next.is_valid());
        prop_assert_eq!(next.updates, belief.updates + 1);
    }

    #[test]
    fn out_of_range_outcomes_rejected(o in prop_oneof![-1e6f64..-1e-9, 1.0f64 + 1e-9..1e6]) {
        prop_assert!(Outcome::new(o).is_err());
    }
}

// ── Decay stays between belief and prior ─────────────────────────────────

proptest! {
    #[test]
    fn decay_is_convex_and_positive(
        belief in arb_belief(),
        prior in arb_belief(),
        factor in 1e-6f64..=1.0,
    ) {
        let d = belief.decayed(&prior, factor);
        prop_assert!(d.is_valid());
        let lo_a = belief.alpha.min(prior.alpha) - 1e-9;
        let hi_a = belief.alpha.max(prior.alpha) + 1e-9;
        prop_assert!(d.alpha >= lo_a && d.alpha <= hi_a);
        let lo_b = belief.beta.min(prior.beta) - 1e-9;
        let hi_b = belief.beta.max(prior.beta) + 1e-9;
        prop_assert!(d.beta >= lo_b && d.beta <= hi_b);
    }

    #[test]
    fn mean_stays_in_unit_interval(belief in arb_belief()) {
        let m = belief.mean();
        prop_assert!((0.0..=1.0).contains(&m));
        let (low, high) = belief.credible_interval(0.95);
        prop_assert!(low <= high);
    }
}
