pub mod effect;
pub mod intent;
pub mod key_bindings;
pub mod reducer;
pub mod replay;
pub mod runner;
pub mod session;

pub use effect::Effect;
pub use intent::Intent;
pub use key_bindings::{KeyBinding, KeyBindings};
pub use reducer::Reducer;
pub use replay::{ReplayScript, ReplayStep, Snapshot, replay, replay_flow};
pub use runner::{RunOutcome, Runtime, session_frame};
pub use session::{Submission, WizardSession};
