//! Generic step-wizard controller: registry, state store, branch resolver and
//! the controller that sequences them.

pub mod branch;
pub mod controller;
pub mod definition;
pub mod registry;
pub mod step;
pub mod store;
pub mod validation;

pub use branch::{BranchTable, ExternalFlow, Guard, Outcome, Resolution};
pub use controller::{Advance, Wizard};
pub use definition::{FlowDefinition, FlowDefinitionBuilder};
pub use registry::StepRegistry;
pub use step::{StepDescriptor, StepId, StepStatus};
pub use store::StepStateStore;
pub use validation::{StepChecks, ValidationIssue, ValidationState, ValidationTarget};
