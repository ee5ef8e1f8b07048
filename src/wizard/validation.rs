use crate::core::validators::{ItemsValidator, ValidationError, Validator};
use crate::core::{FieldId, FormData, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationTarget {
    Field(FieldId),
    Step,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub target: ValidationTarget,
    pub message: String,
}

impl ValidationIssue {
    pub fn field(id: impl Into<FieldId>, message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Field(id.into()),
            message: message.into(),
        }
    }

    pub fn step(message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Step,
            message: message.into(),
        }
    }
}

pub type StepValidator = Box<dyn Fn(&FormData) -> Vec<ValidationIssue> + Send + Sync>;

enum FieldCheck {
    Text(Validator),
    Items(ItemsValidator),
}

impl FieldCheck {
    fn check(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        match self {
            Self::Text(validator) => validator(&value.map(Value::to_text).unwrap_or_default()),
            Self::Items(validator) => validator(&value.map(Value::items).unwrap_or_default()),
        }
    }
}

/// Local field invariants a step panel enforces before it lets the wizard
/// advance.
#[derive(Default)]
pub struct StepChecks {
    fields: Vec<(FieldId, Vec<FieldCheck>)>,
    validators: Vec<StepValidator>,
}

impl StepChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(self, id: impl Into<FieldId>, validator: Validator) -> Self {
        self.push(id.into(), FieldCheck::Text(validator))
    }

    /// Checks a multi-item answer entry by entry instead of as joined text.
    pub fn items(self, id: impl Into<FieldId>, validator: ItemsValidator) -> Self {
        self.push(id.into(), FieldCheck::Items(validator))
    }

    fn push(mut self, id: FieldId, check: FieldCheck) -> Self {
        match self.fields.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, checks)) => checks.push(check),
            None => self.fields.push((id, vec![check])),
        }
        self
    }

    pub fn require(self, id: impl Into<FieldId>, message: impl Into<String>) -> Self {
        self.field(id, crate::core::validators::required(message))
    }

    /// Cross-field rule, e.g. "either phone or address must be present".
    pub fn validate(
        mut self,
        f: impl Fn(&FormData) -> Vec<ValidationIssue> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.validators.is_empty()
    }

    /// Every failing field contributes its first error; step rules follow.
    pub fn run(&self, data: &FormData) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (id, checks) in &self.fields {
            let value = data.get(id.as_str());
            if let Err(message) = checks.iter().try_for_each(|check| check.check(value)) {
                issues.push(ValidationIssue::field(id.clone(), message));
            }
        }
        for validator in &self.validators {
            issues.extend(validator(data));
        }
        issues
    }
}

impl std::fmt::Debug for StepChecks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepChecks")
            .field("fields", &self.fields.iter().map(|(id, _)| id).collect::<Vec<_>>())
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Errors currently shown for the active step.
#[derive(Debug, Default, Clone)]
pub struct ValidationState {
    fields: HashMap<FieldId, String>,
    step_errors: Vec<String>,
}

impl ValidationState {
    pub fn apply(&mut self, issues: Vec<ValidationIssue>) {
        self.clear();
        for issue in issues {
            match issue.target {
                ValidationTarget::Field(id) => {
                    self.fields.entry(id).or_insert(issue.message);
                }
                ValidationTarget::Step => self.step_errors.push(issue.message),
            }
        }
    }

    pub fn clear_error(&mut self, id: &str) {
        self.fields.remove(id);
    }

    pub fn clear_step_errors(&mut self) {
        self.step_errors.clear();
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.step_errors.clear();
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn step_errors(&self) -> &[String] {
        &self.step_errors
    }

    pub fn is_clean(&self) -> bool {
        self.fields.is_empty() && self.step_errors.is_empty()
    }
}
