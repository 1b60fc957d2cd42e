use clap::Subcommand;
use focusloop_core::storage::{Config, Database};
use focusloop_core::{Event, FocusEngine, LogSink};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown for the current phase
    Start,
    /// Pause the countdown, freezing remaining time
    Pause,
    /// Reset the current phase to its full duration
    Reset,
    /// Skip to the next phase (does not count as a completion)
    Skip,
    /// Print current timer state as JSON
    Status,
}

/// Restore the engine over the shared on-disk snapshot. Every CLI
/// invocation is one engine instance; the persisted snapshot is how
/// concurrent invocations converge.
fn load_engine() -> Result<FocusEngine, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let fallback = Config::load_or_default().engine_config();
    let mut engine = FocusEngine::restore(Box::new(db), fallback);
    engine.set_notification_sink(Box::new(LogSink));
    Ok(engine)
}

fn print_outcome(
    event: Option<Event>,
    engine: &FocusEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        // No-op (e.g. start while running): show the state instead.
        None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = load_engine()?;

    match action {
        TimerAction::Start => {
            let event = engine.start();
            print_outcome(event, &engine)?;
        }
        TimerAction::Pause => {
            let event = engine.pause();
            print_outcome(event, &engine)?;
        }
        TimerAction::Reset => {
            let event = engine.reset();
            print_outcome(event, &engine)?;
        }
        TimerAction::Skip => {
            let event = engine.skip();
            print_outcome(event, &engine)?;
        }
        TimerAction::Status => {
            // Commit any transition that came due while no process was
            // watching the timer.
            let completed = engine.tick();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if let Some(event) = completed {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    Ok(())
}
