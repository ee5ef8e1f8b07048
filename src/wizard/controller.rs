use crate::core::{FieldId, FormData, Value};
use crate::wizard::branch::{ExternalFlow, Resolution};
use crate::wizard::definition::FlowDefinition;
use crate::wizard::step::{StepDescriptor, StepId, StepStatus};
use crate::wizard::store::StepStateStore;
use crate::wizard::validation::ValidationIssue;
use indexmap::IndexSet;

/// What a `go_next` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance<S> {
    Moved { from: S, to: S },
    Blocked { at: S, message: String },
    Redirected(ExternalFlow),
    AtEnd,
    Exited,
}

/// Sequencing policy layered over a [`StepStateStore`].
#[derive(Debug)]
pub struct Wizard<S: StepId> {
    definition: FlowDefinition<S>,
    store: StepStateStore<S>,
    blocked: Option<String>,
    exit: Option<ExternalFlow>,
}

impl<S: StepId> Wizard<S> {
    pub fn new(definition: FlowDefinition<S>) -> Self {
        let first = definition.registry().first();
        tracing::debug!(wizard = definition.name(), step = first.key(), "wizard mounted");
        Self {
            store: StepStateStore::new(first),
            definition,
            blocked: None,
            exit: None,
        }
    }

    pub fn definition(&self) -> &FlowDefinition<S> {
        &self.definition
    }

    pub fn name(&self) -> &'static str {
        self.definition.name()
    }

    pub fn current(&self) -> S {
        self.store.current()
    }

    pub fn current_index(&self) -> usize {
        self.definition
            .registry()
            .index_of(self.current())
            .unwrap_or_default()
    }

    pub fn descriptor(&self) -> StepDescriptor<S> {
        self.current().descriptor()
    }

    pub fn len(&self) -> usize {
        self.definition.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definition.registry().is_empty()
    }

    pub fn form_data(&self) -> &FormData {
        self.store.form_data()
    }

    pub fn completed(&self) -> &IndexSet<S> {
        self.store.completed()
    }

    pub fn history(&self) -> &[S] {
        self.store.history()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn blocked(&self) -> Option<&str> {
        self.blocked.as_deref()
    }

    pub fn exit(&self) -> Option<ExternalFlow> {
        self.exit
    }

    pub fn is_last(&self) -> bool {
        self.current() == self.definition.registry().last()
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        let Some(step) = self.definition.registry().at(index) else {
            return StepStatus::Pending;
        };
        if step == self.current() {
            if self.blocked.is_some() {
                StepStatus::Blocked
            } else {
                StepStatus::Active
            }
        } else if self.store.is_complete(step) {
            StepStatus::Done
        } else {
            StepStatus::Pending
        }
    }

    /// Whether `go_to_step(index)` would be honoured.
    pub fn can_go_to(&self, index: usize) -> bool {
        if self.exit.is_some() || index > self.current_index() {
            return false;
        }
        self.definition
            .registry()
            .at(index)
            .is_some_and(|step| self.store.is_complete(step))
    }

    pub fn merge(&mut self, partial: FormData) -> bool {
        let changed = self.store.merge_form_data(partial);
        if changed && self.blocked.take().is_some() {
            tracing::debug!(step = self.current().key(), "field change cleared blocked state");
        }
        changed
    }

    pub fn set_field(&mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> bool {
        self.merge(FormData::new().with(id, value))
    }

    pub fn validate_current(&self) -> Vec<ValidationIssue> {
        self.definition
            .checks(self.current())
            .map(|checks| checks.run(self.form_data()))
            .unwrap_or_default()
    }

    pub fn go_next(&mut self) -> Advance<S> {
        if self.exit.is_some() {
            return Advance::Exited;
        }
        let from = self.current();
        let resolution =
            self.definition
                .branches()
                .resolve(from, self.form_data(), self.definition.registry());

        match resolution {
            Resolution::Step(to) => {
                self.store.mark_complete(from);
                self.store.set_current_step(to);
                self.blocked = None;
                tracing::debug!(
                    wizard = self.name(),
                    from = from.key(),
                    to = to.key(),
                    "advanced"
                );
                Advance::Moved { from, to }
            }
            Resolution::Blocked(message) => {
                tracing::warn!(wizard = self.name(), step = from.key(), %message, "step blocked");
                self.blocked = Some(message.clone());
                self.store.touch();
                Advance::Blocked { at: from, message }
            }
            Resolution::Redirect(flow) => {
                tracing::info!(wizard = self.name(), step = from.key(), %flow, "redirecting out of wizard");
                self.blocked = None;
                self.exit = Some(flow);
                self.store.touch();
                Advance::Redirected(flow)
            }
            Resolution::End => Advance::AtEnd,
        }
    }

    /// Backward jump to a completed step; anything else is silently ignored.
    pub fn go_to_step(&mut self, index: usize) -> bool {
        if !self.can_go_to(index) {
            tracing::debug!(wizard = self.name(), index, "ignoring jump to unreachable step");
            return false;
        }
        let Some(step) = self.definition.registry().at(index) else {
            return false;
        };
        self.blocked = None;
        self.store.set_current_step(step);
        true
    }

    /// Re-enters the current or an earlier step keeping all form data. Also
    /// the way back in after an external redirect, which never skips ahead of
    /// the step that redirected.
    pub fn restart(&mut self, from_index: usize) -> bool {
        let Some(step) = self.definition.registry().at(from_index) else {
            return false;
        };
        if from_index > self.current_index() {
            return false;
        }
        tracing::info!(wizard = self.name(), step = step.key(), "restarting wizard");
        self.blocked = None;
        self.exit = None;
        self.store.set_current_step(step);
        true
    }

    pub fn restart_from_point(&mut self) -> bool {
        let Some(index) = self
            .definition
            .restart_point()
            .and_then(|step| self.definition.registry().index_of(step))
        else {
            return false;
        };
        self.restart(index)
    }
}
