use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use routewise_core::errors::{RouterResult, SnapshotError};
use routewise_core::{ContextKey, EngineConfig, MemoryRecord, Outcome, RouteArm, RouterError};

/// Record written by an append, plus whatever fell out of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendResult {
    pub record: MemoryRecord,
    pub evicted: Option<MemoryRecord>,
}

struct Window {
    records: VecDeque<MemoryRecord>,
    next_sequence: u64,
}

/// Fixed-capacity window over the most recent outcomes across all pairs.
///
/// Append-and-evict happens under a single lock, so the length never
/// exceeds capacity and eviction is strict FIFO. Records are never
/// modified once inserted.
pub struct MemoryBuffer {
    window: Mutex<Window>,
    capacity: usize,
    success_threshold: f64,
}

impl MemoryBuffer {
    pub fn new(capacity: usize, success_threshold: f64) -> RouterResult<Self> {
        if capacity == 0 {
            return Err(RouterError::invalid_config(
                "memory_capacity",
                "must be greater than 0",
            ));
        }
        if !(0.0..=1.0).contains(&success_threshold) {
            return Err(RouterError::invalid_config(
                "success_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        Ok(Self {
            window: Mutex::new(Window {
                records: VecDeque::with_capacity(capacity),
                next_sequence: 0,
            }),
            capacity,
            success_threshold,
        })
    }

    pub fn from_config(config: &EngineConfig) -> RouterResult<Self> {
        Self::new(config.memory_capacity, config.success_threshold)
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Window> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append an outcome stamped now, evicting the oldest record if full.
    pub fn append(&self, context: ContextKey, route: RouteArm, outcome: Outcome) -> AppendResult {
        self.append_at(context, route, outcome, Utc::now())
    }

    /// Append with an explicit timestamp.
    pub fn append_at(
        &self,
        context: ContextKey,
        route: RouteArm,
        outcome: Outcome,
        recorded_at: DateTime<Utc>,
    ) -> AppendResult {
        let mut window = self.lock();
        let record = MemoryRecord::new(context, route, outcome, window.next_sequence, recorded_at);
        // Saturates rather than wrapping; restore refuses a full counter.
        window.next_sequence = window.next_sequence.saturating_add(1);

        let evicted = if window.records.len() >= self.capacity {
            window.records.pop_front()
        } else {
            None
        };
        window.records.push_back(record.clone());

        AppendResult { record, evicted }
    }

    /// Ordered copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<MemoryRecord> {
        self.lock().records.iter().cloned().collect()
    }

    /// Share of the pair's records in the window with outcome at or above the
    /// success threshold. `None` when the window holds no record for the pair.
    pub fn windowed_success_rate(&self, context: &ContextKey, route: &RouteArm) -> Option<f64> {
        let window = self.lock();
        let (hits, total) = window
            .records
            .iter()
            .filter(|r| r.matches(context, route))
            .fold((0usize, 0usize), |(hits, total), r| {
                let hit = r.outcome.value() >= self.success_threshold;
                (hits + usize::from(hit), total + 1)
            });
        (total > 0).then(|| hits as f64 / total as f64)
    }

    /// Drop every record. Sequence numbers keep increasing.
    pub fn clear(&self) {
        self.lock().records.clear();
    }

    /// Sequence number the next append would get after restoring `records`.
    ///
    /// Fails when a record already holds the largest possible sequence.
    pub fn next_sequence_after(records: &[MemoryRecord]) -> Result<u64, SnapshotError> {
        records.iter().try_fold(0u64, |next, r| {
            r.sequence
                .checked_add(1)
                .map(|after| next.max(after))
                .ok_or(SnapshotError::SequenceExhausted {
                    sequence: r.sequence,
                })
        })
    }

    /// Replace the window with `records` (oldest first).
    ///
    /// If there are more records than capacity, only the newest are kept.
    /// Returns how many were dropped. On error the window is unchanged.
    pub fn restore(&self, records: &[MemoryRecord]) -> Result<usize, SnapshotError> {
        let next_sequence = Self::next_sequence_after(records)?;
        let dropped = records.len().saturating_sub(self.capacity);
        let mut window = self.lock();
        window.records = records[dropped..].iter().cloned().collect();
        window.next_sequence = window.next_sequence.max(next_sequence);
        Ok(dropped)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn success_threshold(&self) -> f64 {
        self.success_threshold
    }
}
