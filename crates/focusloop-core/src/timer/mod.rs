mod clock;
mod engine;
mod phases;
mod settings;
mod state;

pub use clock::now_ms;
pub use engine::{DisplayState, FocusEngine};
pub use phases::{Completion, Phase};
pub use settings::{ConfigPatch, EngineConfig};
pub use state::EngineState;
