use crate::error::WizardError;
use crate::wizard::branch::BranchTable;
use crate::wizard::registry::StepRegistry;
use crate::wizard::step::StepId;
use crate::wizard::validation::StepChecks;
use std::collections::HashMap;

/// Immutable configuration of one wizard: its steps, branch edges and the
/// per-step checks its panels run.
#[derive(Debug)]
pub struct FlowDefinition<S: StepId> {
    name: &'static str,
    registry: StepRegistry<S>,
    branches: BranchTable<S>,
    checks: HashMap<S, StepChecks>,
    restart_point: Option<S>,
}

impl<S: StepId> FlowDefinition<S> {
    pub fn builder(name: &'static str) -> FlowDefinitionBuilder<S> {
        FlowDefinitionBuilder::new(name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn registry(&self) -> &StepRegistry<S> {
        &self.registry
    }

    pub fn branches(&self) -> &BranchTable<S> {
        &self.branches
    }

    pub fn checks(&self, step: S) -> Option<&StepChecks> {
        self.checks.get(&step)
    }

    /// Step re-entered by "start another", if the wizard offers one.
    pub fn restart_point(&self) -> Option<S> {
        self.restart_point
    }
}

pub struct FlowDefinitionBuilder<S: StepId> {
    name: &'static str,
    steps: Option<Vec<S>>,
    branches: BranchTable<S>,
    checks: HashMap<S, StepChecks>,
    restart_point: Option<S>,
}

impl<S: StepId> FlowDefinitionBuilder<S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: None,
            branches: BranchTable::new(),
            checks: HashMap::new(),
            restart_point: None,
        }
    }

    /// Restricts the registry to `steps`; defaults to every declared step.
    pub fn steps(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.steps = Some(steps.into_iter().collect());
        self
    }

    pub fn branches(mut self, branches: BranchTable<S>) -> Self {
        self.branches = branches;
        self
    }

    pub fn checks(mut self, step: S, checks: StepChecks) -> Self {
        self.checks.insert(step, checks);
        self
    }

    pub fn restart_point(mut self, step: S) -> Self {
        self.restart_point = Some(step);
        self
    }

    pub fn build(self) -> Result<FlowDefinition<S>, WizardError> {
        let registry = match self.steps {
            Some(steps) => StepRegistry::from_ids(self.name, steps)?,
            None => StepRegistry::standard(self.name)?,
        };
        self.branches.check(&registry)?;
        if let Some(step) = self.restart_point.filter(|step| !registry.contains(*step)) {
            return Err(WizardError::UnregisteredStep {
                label: "restart_point",
                step: step.key(),
            });
        }
        Ok(FlowDefinition {
            name: self.name,
            registry,
            branches: self.branches,
            checks: self.checks,
            restart_point: self.restart_point,
        })
    }
}
