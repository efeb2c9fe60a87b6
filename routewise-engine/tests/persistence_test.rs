use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use routewise_core::models::EngineSnapshot;
use routewise_core::{ContextKey, EngineConfig, ErrorCode, MemoryRecord, Outcome, RouteArm};
use routewise_engine::RouteEngine;

fn seeded_engine() -> RouteEngine {
    let engine = RouteEngine::new(EngineConfig {
        memory_capacity: 8,
        ..Default::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let candidates = RouteArm::range(1, 3).unwrap();
    for (i, zone) in ["ZoneA", "ZoneB"].iter().enumerate() {
        let ctx = ContextKey::from_parts([*zone, "Morning"]);
        for n in 0..10 {
            let mut d = engine.select_route(&ctx, &candidates, &mut rng).unwrap();
            let outcome = ((n + i) % 4) as f64 / 3.0;
            engine.complete(&mut d, outcome.min(1.0)).unwrap();
        }
    }
    engine
}

#[test]
fn load_state_reproduces_snapshot() {
    let source = seeded_engine();
    let snapshot = source.snapshot_state();

    let target = RouteEngine::new(EngineConfig {
        memory_capacity: 8,
        ..Default::default()
    })
    .unwrap();
    target.load_state(&snapshot).unwrap();
    assert_eq!(target.snapshot_state(), snapshot);

    let ctx = ContextKey::from_parts(["ZoneB", "Morning"]);
    let route = RouteArm::new("2");
    assert_eq!(
        target.belief(&ctx, &route).as_ref(),
        snapshot.belief(&ctx, &route)
    );
}

#[test]
fn file_round_trip_is_exact() {
    let source = seeded_engine();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("routewise-state.json");
    source.save_to(&path).unwrap();

    let target = RouteEngine::new(EngineConfig {
        memory_capacity: 8,
        ..Default::default()
    })
    .unwrap();
    target.load_from(&path).unwrap();
    assert_eq!(target.snapshot_state(), source.snapshot_state());
}

#[test]
fn loading_replaces_existing_state() {
    let source = seeded_engine();
    let target = RouteEngine::new(EngineConfig {
        memory_capacity: 8,
        ..Default::default()
    })
    .unwrap();
    let stray = ContextKey::new("Stray");
    target
        .record_outcome(&stray, &RouteArm::new("X"), 1.0)
        .unwrap();

    target.load_state(&source.snapshot_state()).unwrap();
    assert!(target.route_stats(&stray).is_empty());
}

#[test]
fn smaller_window_keeps_newest_records() {
    let source = seeded_engine();
    let snapshot = source.snapshot_state();
    let target = RouteEngine::new(EngineConfig {
        memory_capacity: 3,
        ..Default::default()
    })
    .unwrap();
    target.load_state(&snapshot).unwrap();
    let loaded = target.snapshot_state();
    assert_eq!(loaded.beliefs, snapshot.beliefs);
    assert_eq!(loaded.memory, snapshot.memory[snapshot.memory.len() - 3..].to_vec());
}

#[test]
fn invalid_belief_in_snapshot_rejected_without_change() {
    let source = seeded_engine();
    let mut snapshot = source.snapshot_state();
    snapshot.beliefs[0].belief.alpha = -1.0;

    let target = seeded_engine();
    let before = target.snapshot_state();
    let err = target.load_state(&snapshot).unwrap_err();
    assert_eq!(err.error_code(), "SNAPSHOT_INVALID");
    assert_eq!(target.snapshot_state(), before);
}

#[test]
fn exhausted_memory_sequence_rejected_without_change() {
    let source = seeded_engine();
    let mut snapshot = source.snapshot_state();
    snapshot.memory.push(MemoryRecord::new(
        ContextKey::new("ZoneA/Morning"),
        RouteArm::new("1"),
        Outcome::success(),
        u64::MAX,
        Utc::now(),
    ));

    let target = seeded_engine();
    let before = target.snapshot_state();
    let err = target.load_state(&snapshot).unwrap_err();
    assert_eq!(err.error_code(), "SNAPSHOT_INVALID");
    assert_eq!(target.snapshot_state(), before);

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("exhausted.json");
    std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();
    assert_eq!(
        target.load_from(&path).unwrap_err().error_code(),
        "SNAPSHOT_INVALID"
    );
    assert_eq!(target.snapshot_state(), before);
}

#[test]
fn memory_only_snapshot_with_max_sequence_is_an_error() {
    let engine = RouteEngine::new(EngineConfig::default()).unwrap();
    let snapshot = EngineSnapshot::new(
        vec![],
        vec![MemoryRecord::new(
            ContextKey::new("ZoneA"),
            RouteArm::new("R1"),
            Outcome::failure(),
            u64::MAX,
            Utc::now(),
        )],
    );
    assert!(engine.load_state(&snapshot).is_err());
    assert!(engine.memory().is_empty());
}
