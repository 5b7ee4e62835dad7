use std::time::Duration;

use balancehub_core::relaxation::{BreathingPhase, TimerState};
use balancehub_core::{Event, ExerciseKind, RelaxationTimer};
use clap::Args;

#[derive(Args)]
pub struct RelaxArgs {
    /// stress, sleep, mindfulness or worklife
    kind: ExerciseKind,
    /// Skip the one-second wait between ticks
    #[arg(long)]
    fast: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

fn describe(event: &Event) -> Option<String> {
    match event {
        Event::ExerciseStarted {
            kind, duration_secs, ..
        } => Some(format!("{} exercise started ({duration_secs}s)", label(*kind))),
        Event::BreathingPhaseChanged {
            phase,
            remaining_secs,
            ..
        } => {
            let phase = match phase {
                BreathingPhase::Inhale => "Inhale",
                BreathingPhase::Hold => "Hold",
                BreathingPhase::Exhale => "Exhale",
            };
            Some(format!("{phase:<7} {remaining_secs}s left"))
        }
        Event::ExerciseCompleted { .. } => Some("Well done. Exercise complete.".to_string()),
        Event::ExerciseStopped { remaining_secs, .. } => {
            Some(format!("stopped with {remaining_secs}s left"))
        }
        Event::StateSnapshot { .. } => None,
    }
}

fn label(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::Stress => "Stress relief",
        ExerciseKind::Sleep => "Sleep",
        ExerciseKind::Mindfulness => "Mindfulness",
        ExerciseKind::WorkLife => "Work-life",
    }
}

fn emit(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else if let Some(line) = describe(event) {
        println!("{line}");
    }
    Ok(())
}

pub fn run(args: RelaxArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut timer = RelaxationTimer::new(args.kind);
    if let Some(event) = timer.start() {
        emit(&event, args.json)?;
    }
    if args.kind == ExerciseKind::Stress && !args.json {
        println!("Inhale  {}s left", timer.remaining_secs());
    }

    while timer.state() == TimerState::Running {
        if !args.fast {
            std::thread::sleep(Duration::from_secs(1));
        }
        if let Some(event) = timer.tick() {
            emit(&event, args.json)?;
        }
    }

    if args.json {
        emit(&timer.snapshot(), true)?;
    }
    Ok(())
}
