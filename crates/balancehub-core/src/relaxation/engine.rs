//! Relaxation countdown.
//!
//! A one-minute countdown with no internal thread. The caller invokes
//! `tick()` once per second while the exercise is running; stopping simply
//! means no further ticks are honoured.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed
//!            \-> Idle (stop)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Length of every exercise.
pub const EXERCISE_SECS: u32 = 60;

/// Box-breathing cycle length in seconds.
const BREATH_CYCLE_SECS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Guided 4-4-4 breathing.
    Stress,
    /// Ambient sound session.
    Sleep,
    Mindfulness,
    WorkLife,
}

impl std::str::FromStr for ExerciseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stress" | "breathing" => Ok(Self::Stress),
            "sleep" => Ok(Self::Sleep),
            "mindfulness" => Ok(Self::Mindfulness),
            "worklife" | "work-life" | "work_life" => Ok(Self::WorkLife),
            other => Err(format!("unknown exercise: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxationTimer {
    kind: ExerciseKind,
    state: TimerState,
    remaining_secs: u32,
}

impl RelaxationTimer {
    pub fn new(kind: ExerciseKind) -> Self {
        Self {
            kind,
            state: TimerState::Idle,
            remaining_secs: EXERCISE_SECS,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Current breathing phase; only the stress exercise has one, and only
    /// while running.
    pub fn breathing_phase(&self) -> Option<BreathingPhase> {
        if self.kind != ExerciseKind::Stress || self.state != TimerState::Running {
            return None;
        }
        if self.remaining_secs == EXERCISE_SECS {
            return Some(BreathingPhase::Inhale);
        }
        let second = self.remaining_secs % BREATH_CYCLE_SECS;
        Some(if second >= 8 {
            BreathingPhase::Inhale
        } else if second >= 4 {
            BreathingPhase::Hold
        } else {
            BreathingPhase::Exhale
        })
    }

    /// 0.0 .. 100.0 of the countdown elapsed.
    pub fn progress_pct(&self) -> f64 {
        f64::from(EXERCISE_SECS - self.remaining_secs) * 100.0 / f64::from(EXERCISE_SECS)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            kind: self.kind,
            state: self.state,
            remaining_secs: self.remaining_secs,
            breathing_phase: self.breathing_phase(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// (Re)start from the full duration. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        self.state = TimerState::Running;
        self.remaining_secs = EXERCISE_SECS;
        Some(Event::ExerciseStarted {
            kind: self.kind,
            duration_secs: EXERCISE_SECS,
            at: Utc::now(),
        })
    }

    /// Stop and reset. Only meaningful while running.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let remaining_secs = self.remaining_secs;
        self.state = TimerState::Idle;
        self.remaining_secs = EXERCISE_SECS;
        Some(Event::ExerciseStopped {
            kind: self.kind,
            remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance one second.
    ///
    /// Returns `ExerciseCompleted` on the tick that reaches zero and
    /// `BreathingPhaseChanged` when the stress exercise changes phase.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let before = self.breathing_phase();
        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == 0 {
            self.state = TimerState::Completed;
            return Some(Event::ExerciseCompleted {
                kind: self.kind,
                at: Utc::now(),
            });
        }

        match self.breathing_phase() {
            Some(phase) if Some(phase) != before => Some(Event::BreathingPhaseChanged {
                phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_to_completion_after_sixty_ticks() {
        let mut timer = RelaxationTimer::new(ExerciseKind::Mindfulness);
        assert!(timer.start().is_some());
        for _ in 0..59 {
            assert!(timer.tick().is_none());
        }
        assert!(matches!(timer.tick(), Some(Event::ExerciseCompleted { .. })));
        assert_eq!(timer.state(), TimerState::Completed);
        assert_eq!(timer.progress_pct(), 100.0);
        assert!(timer.tick().is_none());
    }

    #[test]
    fn stress_phases_follow_twelve_second_cycle() {
        let mut timer = RelaxationTimer::new(ExerciseKind::Stress);
        timer.start();
        assert_eq!(timer.breathing_phase(), Some(BreathingPhase::Inhale));

        let mut changes = Vec::new();
        for _ in 0..13 {
            if let Some(Event::BreathingPhaseChanged { phase, remaining_secs, .. }) = timer.tick() {
                changes.push((phase, remaining_secs));
            }
        }
        assert_eq!(
            changes,
            vec![
                (BreathingPhase::Hold, 55),
                (BreathingPhase::Exhale, 51),
                (BreathingPhase::Inhale, 47),
            ]
        );
    }

    #[test]
    fn stop_resets_and_halts_ticks() {
        let mut timer = RelaxationTimer::new(ExerciseKind::Stress);
        timer.start();
        timer.tick();
        let stopped = timer.stop();
        assert!(matches!(stopped, Some(Event::ExerciseStopped { remaining_secs: 59, .. })));
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), EXERCISE_SECS);
        assert!(timer.tick().is_none());
        assert!(timer.breathing_phase().is_none());
    }

    #[test]
    fn completed_exercise_can_restart() {
        let mut timer = RelaxationTimer::new(ExerciseKind::Sleep);
        timer.start();
        for _ in 0..EXERCISE_SECS {
            timer.tick();
        }
        assert_eq!(timer.state(), TimerState::Completed);
        assert!(timer.start().is_some());
        assert_eq!(timer.remaining_secs(), EXERCISE_SECS);
        assert!(timer.start().is_none());
    }

    #[test]
    fn mindfulness_progress_tracks_elapsed() {
        let mut timer = RelaxationTimer::new(ExerciseKind::Mindfulness);
        timer.start();
        for _ in 0..15 {
            timer.tick();
        }
        assert_eq!(timer.progress_pct(), 25.0);
    }
}
