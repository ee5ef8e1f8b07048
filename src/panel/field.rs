use crate::core::{FormData, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

pub const YES_NO: &[Choice] = &[Choice::new("yes", "Yes"), Choice::new("no", "No")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Phone,
    Choice(&'static [Choice]),
    YesNo,
    Checkbox,
    /// Comma-separated file names; `accept` is shown as a hint only, the
    /// wizard's step checks enforce it.
    Files { accept: &'static str },
}

/// Labeled input the wizard core treats as an opaque `(value, on_change)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choices(&self) -> &'static [Choice] {
        match self.kind {
            FieldKind::Choice(choices) => choices,
            FieldKind::YesNo => YES_NO,
            _ => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        !self.choices().is_empty()
    }

    pub fn value<'a>(&self, data: &'a FormData) -> Option<&'a Value> {
        data.get(self.id)
    }

    /// Converts raw edited text into the value this input produces.
    pub fn input(&self, raw: &str) -> Value {
        match self.kind {
            FieldKind::Checkbox => Value::Bool(matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "yes" | "true" | "x" | "1"
            )),
            FieldKind::Files { .. } => Value::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
                    .collect(),
            ),
            _ => Value::Text(raw.to_string()),
        }
    }

    /// Next choice value after the current one, wrapping. `None` for
    /// non-choice inputs.
    pub fn cycle(&self, data: &FormData, delta: isize) -> Option<Value> {
        let choices = self.choices();
        if choices.is_empty() {
            return None;
        }
        let len = choices.len() as isize;
        let next = match choices
            .iter()
            .position(|choice| data.equals(self.id, choice.value))
        {
            Some(index) => (index as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        Some(Value::from(choices[next as usize].value))
    }

    /// Text shown for the current value; choice inputs show their label.
    pub fn display(&self, data: &FormData) -> String {
        let Some(value) = self.value(data) else {
            return String::new();
        };
        if let Some(choice) = self
            .choices()
            .iter()
            .find(|choice| data.equals(self.id, choice.value))
        {
            return choice.label.to_string();
        }
        match self.kind {
            FieldKind::Checkbox if value.is_yes() => "[x]".to_string(),
            FieldKind::Checkbox => "[ ]".to_string(),
            _ => value.to_text(),
        }
    }

    /// Text the terminal editor starts from when the field gains focus.
    pub fn edit_text(&self, data: &FormData) -> String {
        self.value(data).map(Value::to_text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Choice, FieldKind, FieldSpec};
    use crate::core::{FormData, Value};

    const KINDS: &[Choice] = &[
        Choice::new("document", "Document"),
        Choice::new("physical", "Physical item"),
        Choice::new("oversized", "Oversized document"),
    ];

    #[test]
    fn cycle_wraps_both_directions() {
        let field = FieldSpec::new("exhibit_type", "Type", FieldKind::Choice(KINDS));
        let empty = FormData::new();
        assert_eq!(field.cycle(&empty, 1), Some(Value::from("document")));
        assert_eq!(field.cycle(&empty, -1), Some(Value::from("oversized")));

        let last = FormData::new().with("exhibit_type", "oversized");
        assert_eq!(field.cycle(&last, 1), Some(Value::from("document")));
    }

    #[test]
    fn files_input_splits_names() {
        let field = FieldSpec::new("files", "Files", FieldKind::Files { accept: "*.pdf" });
        assert_eq!(
            field.input("a.pdf, , b.pdf"),
            Value::List(vec!["a.pdf".to_string(), "b.pdf".to_string()])
        );
    }

    #[test]
    fn display_prefers_choice_labels() {
        let field = FieldSpec::new("has_pii", "PII?", FieldKind::YesNo);
        let data = FormData::new().with("has_pii", "no");
        assert_eq!(field.display(&data), "No");

        let checkbox = FieldSpec::new("certify", "Certify", FieldKind::Checkbox);
        let data = FormData::new().with("certify", checkbox.input("x"));
        assert_eq!(checkbox.display(&data), "[x]");
        assert!(field.cycle(&FormData::new(), 1).is_some());
        assert!(checkbox.cycle(&FormData::new(), 1).is_none());
    }
}
