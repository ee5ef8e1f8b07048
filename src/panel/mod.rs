//! Step renderer: maps the current step of a wizard to the panel shown for it.

pub mod field;
pub mod renderer;

pub use field::{Choice, FieldKind, FieldSpec, YES_NO};
pub use renderer::{FieldView, PanelView, StepperItem, render, render_key};

use crate::wizard::StepId;

/// Form panel for one step.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub fields: Vec<FieldSpec>,
    pub note: Option<&'static str>,
}

impl Panel {
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Render case for every step of a wizard. Implemented with an exhaustive
/// `match` on the step enum.
pub trait StepPanel: StepId {
    fn panel(self) -> Panel;
}
