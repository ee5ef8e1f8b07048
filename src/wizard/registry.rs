use crate::error::WizardError;
use crate::wizard::step::{StepDescriptor, StepId};

/// Ordered step descriptors for one wizard. Static configuration, no logic
/// beyond position lookups.
#[derive(Debug, Clone)]
pub struct StepRegistry<S: StepId> {
    steps: Vec<StepDescriptor<S>>,
}

impl<S: StepId> StepRegistry<S> {
    /// Registry over every declared step, in declaration order.
    pub fn standard(wizard: &'static str) -> Result<Self, WizardError> {
        Self::from_ids(wizard, S::ALL.iter().copied())
    }

    pub fn from_ids(
        wizard: &'static str,
        ids: impl IntoIterator<Item = S>,
    ) -> Result<Self, WizardError> {
        let mut steps: Vec<StepDescriptor<S>> = Vec::new();
        for id in ids {
            if steps.iter().any(|existing| existing.id == id) {
                return Err(WizardError::DuplicateStep {
                    wizard,
                    step: id.key(),
                });
            }
            steps.push(id.descriptor());
        }
        if steps.is_empty() {
            return Err(WizardError::EmptyRegistry(wizard));
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> S {
        self.steps[0].id
    }

    pub fn last(&self) -> S {
        self.steps[self.steps.len() - 1].id
    }

    pub fn at(&self, index: usize) -> Option<S> {
        self.steps.get(index).map(|descriptor| descriptor.id)
    }

    pub fn index_of(&self, id: S) -> Option<usize> {
        self.steps.iter().position(|descriptor| descriptor.id == id)
    }

    pub fn contains(&self, id: S) -> bool {
        self.index_of(id).is_some()
    }

    /// The literal next entry, ignoring any branch rules.
    pub fn next_after(&self, id: S) -> Option<S> {
        self.index_of(id).and_then(|index| self.at(index + 1))
    }

    pub fn descriptor(&self, id: S) -> Option<&StepDescriptor<S>> {
        self.steps.iter().find(|descriptor| descriptor.id == id)
    }

    /// String lookup restricted to registered steps.
    pub fn find(&self, key: &str) -> Option<S> {
        self.steps
            .iter()
            .map(|descriptor| descriptor.id)
            .find(|id| id.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor<S>> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::StepRegistry;
    use crate::error::WizardError;
    use crate::wizard::testing::Demo;

    #[test]
    fn standard_registry_follows_declaration_order() {
        let registry = StepRegistry::<Demo>::standard("demo").expect("registry");
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.first(), Demo::Start);
        assert_eq!(registry.last(), Demo::Finish);
        assert_eq!(registry.next_after(Demo::Start), Some(Demo::Middle));
        assert_eq!(registry.next_after(Demo::Finish), None);
    }

    #[test]
    fn subset_registry_skips_unlisted_steps() {
        let registry =
            StepRegistry::from_ids("demo", [Demo::Start, Demo::Finish]).expect("registry");
        assert_eq!(registry.next_after(Demo::Start), Some(Demo::Finish));
        assert!(!registry.contains(Demo::Middle));
        assert_eq!(registry.find("middle"), None);
        assert_eq!(registry.find("finish"), Some(Demo::Finish));
    }

    #[test]
    fn rejects_empty_and_duplicate_lists() {
        assert_eq!(
            StepRegistry::<Demo>::from_ids("demo", []).err(),
            Some(WizardError::EmptyRegistry("demo"))
        );
        assert_eq!(
            StepRegistry::from_ids("demo", [Demo::Start, Demo::Start]).err(),
            Some(WizardError::DuplicateStep {
                wizard: "demo",
                step: "start"
            })
        );
    }
}
