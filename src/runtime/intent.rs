use crate::core::{FieldId, Value};
use crate::terminal::KeyEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Exit,
    Submit,
    NextField,
    PrevField,
    InputKey(KeyEvent),
    Change { field: FieldId, value: Value },
    GoToStep(usize),
    Restart,
    Noop,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exit => "exit",
            Self::Submit => "submit",
            Self::NextField => "next_field",
            Self::PrevField => "prev_field",
            Self::InputKey(_) => "input_key",
            Self::Change { .. } => "change",
            Self::GoToStep(_) => "go_to_step",
            Self::Restart => "restart",
            Self::Noop => "noop",
        }
    }
}
