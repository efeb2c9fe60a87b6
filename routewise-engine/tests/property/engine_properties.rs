use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use routewise_core::{ContextKey, EngineConfig, Outcome, RouteArm};
use routewise_engine::memory::MemoryBuffer;
use routewise_engine::softmax::softmax;
use routewise_engine::RouteEngine;

// ── Softmax is always a strictly positive distribution ───────────────────

proptest! {
    #[test]
    fn softmax_sums_to_one(
        values in prop::collection::vec(0.0f64..=1.0, 1..50),
        temperature in prop_oneof![1e-6f64..1e-3, 1e-3f64..10.0, 10.0f64..1e6],
    ) {
        let p = softmax(&values, temperature).unwrap();
        prop_assert_eq!(p.len(), values.len());
        let sum: f64 = p.iter().sum();
        prop_assert!((sum - 1.0).abs() <= 1e-9, "sum = {}", sum);
        prop_assert!(p.iter().all(|&x| x > 0.0));
    }

    #[test]
    fn softmax_preserves_order(
        values in prop::collection::vec(0.0f64..=1.0, 2..20),
        temperature in 0.01f64..100.0,
    ) {
        let p = softmax(&values, temperature).unwrap();
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] > values[j] {
                    prop_assert!(p[i] >= p[j]);
                }
            }
        }
    }
}

// ── Memory window is bounded FIFO ────────────────────────────────────────

proptest! {
    #[test]
    fn memory_bounded_fifo(capacity in 1usize..20, appends in 0usize..100) {
        let buf = MemoryBuffer::new(capacity, 0.5).unwrap();
        let ctx = ContextKey::new("Z");
        for n in 0..appends {
            let res = buf.append(ctx.clone(), RouteArm::from(n as u32), Outcome::success());
            prop_assert!(buf.len() <= capacity);
            if n >= capacity {
                let evicted = res.evicted.expect("full window must evict");
                prop_assert_eq!(evicted.sequence, (n - capacity) as u64);
            }
        }
        let seqs: Vec<u64> = buf.snapshot().iter().map(|r| r.sequence).collect();
        let start = appends.saturating_sub(capacity) as u64;
        let expected: Vec<u64> = (start..appends as u64).collect();
        prop_assert_eq!(seqs, expected);
    }
}

// ── Feedback adds exactly o and 1 - o through the engine ─────────────────

proptest! {
    #[test]
    fn record_outcome_increments_exactly(outcomes in prop::collection::vec(0.0f64..=1.0, 1..30)) {
        let engine = RouteEngine::new(EngineConfig::default()).unwrap();
        let ctx = ContextKey::new("ZoneA");
        let route = RouteArm::new("R1");
        for o in outcomes {
            let before = engine.belief_store().get_or_create(&ctx, &route);
            let ack = engine.record_outcome(&ctx, &route, o).unwrap();
            prop_assert_eq!(ack.belief.alpha, before.alpha + o);
            prop_assert_eq!(ack.belief.beta, before.beta + (1.0 - o));
            prop_assert!(ack.belief.alpha > 0.0 && ack.belief.beta > 0.0);
        }
    }

    #[test]
    fn seeded_selection_is_reproducible(seed in any::<u64>()) {
        let a = RouteEngine::new(EngineConfig::default()).unwrap();
        let b = RouteEngine::new(EngineConfig::default()).unwrap();
        let ctx = ContextKey::new("ZoneA");
        let routes = RouteArm::range(1, 6).unwrap();
        let da = a.select_route(&ctx, &routes, &mut StdRng::seed_from_u64(seed)).unwrap();
        let db = b.select_route(&ctx, &routes, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(da.chosen(), db.chosen());
        prop_assert_eq!(da.diagnostics(), db.diagnostics());
    }
}
