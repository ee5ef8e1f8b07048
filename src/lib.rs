pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod flows;
pub mod logging;
pub mod panel;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod wizard;

pub use app::{AppState, Router, Screen};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use flows::FlowKind;
pub use wizard::{Advance, FlowDefinition, StepId, Wizard};
