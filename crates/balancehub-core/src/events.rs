use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relaxation::{BreathingPhase, ExerciseKind, TimerState};

/// Every state change of a relaxation exercise produces an Event.
/// The presentation layer polls `tick()` and renders what comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ExerciseStarted {
        kind: ExerciseKind,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Box-breathing guidance moved to the next phase.
    BreathingPhaseChanged {
        phase: BreathingPhase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        kind: ExerciseKind,
        at: DateTime<Utc>,
    },
    /// Stopped before the countdown reached zero.
    ExerciseStopped {
        kind: ExerciseKind,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        kind: ExerciseKind,
        state: TimerState,
        remaining_secs: u32,
        breathing_phase: Option<BreathingPhase>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
