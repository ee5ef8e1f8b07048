//! Application collaborators the wizards plug into: routing, process-wide
//! state and the simulated submission backend.

pub mod routes;
pub mod state;
pub mod submission;

pub use routes::{Router, Screen};
pub use state::AppState;
pub use submission::{Receipt, ReferenceNumber};
