//! Decision cycle: AwaitingContext → Sampled → Scaled → Selected →
//! AwaitingFeedback → {Updated | Abandoned}.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use routewise_core::errors::{RouterError, RouterResult};
use routewise_core::{ContextKey, RouteArm};

/// Where a single route-selection instance is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPhase {
    AwaitingContext,
    Sampled,
    Scaled,
    Selected,
    AwaitingFeedback,
    Updated,
    Abandoned,
}

impl DecisionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Updated | Self::Abandoned)
    }

    /// Whether the cycle may move from `self` to `next`.
    pub fn can_transition_to(self, next: DecisionPhase) -> bool {
        use DecisionPhase::*;
        matches!(
            (self, next),
            (AwaitingContext, Sampled)
                | (Sampled, Scaled)
                | (Scaled, Selected)
                | (Selected, AwaitingFeedback)
                | (AwaitingFeedback, Updated)
                | (AwaitingFeedback, Abandoned)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingContext => "awaiting_context",
            Self::Sampled => "sampled",
            Self::Scaled => "scaled",
            Self::Selected => "selected",
            Self::AwaitingFeedback => "awaiting_feedback",
            Self::Updated => "updated",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for DecisionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample and selection probability for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteScore {
    pub route: RouteArm,
    pub sample: f64,
    pub probability: f64,
}

/// What the selector saw when it picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDiagnostics {
    pub temperature: f64,
    /// One entry per distinct candidate, in candidate order.
    pub scores: Vec<RouteScore>,
}

impl SelectionDiagnostics {
    pub fn probability_of(&self, route: &RouteArm) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| &s.route == route)
            .map(|s| s.probability)
    }

    pub fn sample_of(&self, route: &RouteArm) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| &s.route == route)
            .map(|s| s.sample)
    }

    /// Route with the largest raw sample (first one on ties).
    pub fn max_sample_route(&self) -> Option<&RouteArm> {
        self.scores
            .iter()
            .fold(None::<&RouteScore>, |best, s| match best {
                Some(b) if b.sample >= s.sample => Some(b),
                _ => Some(s),
            })
            .map(|s| &s.route)
    }
}

/// A selected route awaiting feedback.
///
/// Dropping or abandoning a decision leaves beliefs untouched. Not `Clone`: a
/// decision is the only handle that can complete it, so
/// its outcome is applied at most once. Clone the diagnostics instead.
///
/// ```compile_fail
/// fn needs_clone<T: Clone>() {}
/// needs_clone::<routewise_engine::Decision>();
/// ```
#[derive(Debug)]
pub struct Decision {
    id: Uuid,
    context: ContextKey,
    chosen: RouteArm,
    diagnostics: SelectionDiagnostics,
    phase: DecisionPhase,
    decided_at: DateTime<Utc>,
}

impl Decision {
    pub(crate) fn new(
        context: ContextKey,
        chosen: RouteArm,
        diagnostics: SelectionDiagnostics,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
            chosen,
            diagnostics,
            phase: DecisionPhase::AwaitingFeedback,
            decided_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &ContextKey {
        &self.context
    }

    pub fn chosen(&self) -> &RouteArm {
        &self.chosen
    }

    pub fn diagnostics(&self) -> &SelectionDiagnostics {
        &self.diagnostics
    }

    pub fn phase(&self) -> DecisionPhase {
        self.phase
    }

    pub fn decided_at(&self) -> DateTime<Utc> {
        self.decided_at
    }

    /// Give up on feedback. Returns false if the decision was already closed.
    pub fn abandon(&mut self) -> bool {
        if self.transition(DecisionPhase::Abandoned).is_err() {
            return false;
        }
        crate::tracing_setup::events::decision_abandoned(
            &self.id.to_string(),
            self.context.as_str(),
            self.chosen.as_str(),
        );
        true
    }

    /// Fail with `DecisionClosed` unless feedback is still expected.
    pub(crate) fn ensure_open(&self) -> RouterResult<()> {
        if self.phase == DecisionPhase::AwaitingFeedback {
            Ok(())
        } else {
            Err(self.closed_error())
        }
    }

    pub(crate) fn transition(&mut self, next: DecisionPhase) -> RouterResult<()> {
        if !self.phase.can_transition_to(next) {
            return Err(self.closed_error());
        }
        self.phase = next;
        Ok(())
    }

    fn closed_error(&self) -> RouterError {
        RouterError::DecisionClosed {
            decision_id: self.id.to_string(),
            phase: self.phase.to_string(),
        }
    }
}
