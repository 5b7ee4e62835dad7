//! Guided relaxation exercises offered by the wellbeing chatbot.

mod engine;

pub use engine::{BreathingPhase, ExerciseKind, RelaxationTimer, TimerState, EXERCISE_SECS};
