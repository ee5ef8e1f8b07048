use crate::core::FormData;
use crate::wizard::step::StepId;
use indexmap::IndexSet;

/// Single source of truth for one wizard session's progress.
///
/// No sequencing policy lives here; the controller decides which writes are
/// allowed. Every mutation that changes something bumps `revision`, which is
/// what renderers watch to know a redraw is due.
#[derive(Debug, Clone)]
pub struct StepStateStore<S: StepId> {
    current: S,
    form_data: FormData,
    completed: IndexSet<S>,
    history: Vec<S>,
    revision: u64,
}

impl<S: StepId> StepStateStore<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            form_data: FormData::new(),
            completed: IndexSet::new(),
            history: vec![initial],
            revision: 0,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    /// Completed step ids in the order they were first completed.
    pub fn completed(&self) -> &IndexSet<S> {
        &self.completed
    }

    pub fn is_complete(&self, id: S) -> bool {
        self.completed.contains(&id)
    }

    /// Every step entered so far, including re-entries.
    pub fn history(&self) -> &[S] {
        &self.history
    }

    pub fn has_visited(&self, id: S) -> bool {
        self.history.contains(&id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_current_step(&mut self, id: S) {
        self.current = id;
        self.history.push(id);
        self.bump();
    }

    /// Returns `true` when at least one key changed.
    pub fn merge_form_data(&mut self, partial: FormData) -> bool {
        let changed = self.form_data.merge(partial);
        if changed.is_empty() {
            return false;
        }
        tracing::trace!(fields = ?changed, "form data merged");
        self.bump();
        true
    }

    /// Adds `id` to the completed set if it is or was the current step.
    /// Idempotent; returns whether the set grew.
    pub fn mark_complete(&mut self, id: S) -> bool {
        if !self.has_visited(id) {
            tracing::debug!(step = id.key(), "ignoring completion of a step never entered");
            return false;
        }
        let inserted = self.completed.insert(id);
        if inserted {
            self.bump();
        }
        inserted
    }

    /// Forces a revision bump for state held outside the store (blocked or
    /// exited flags) that still needs a redraw.
    pub(crate) fn touch(&mut self) {
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
