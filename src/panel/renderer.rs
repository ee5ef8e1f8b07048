use crate::panel::{FieldKind, StepPanel};
use crate::wizard::{StepRegistry, StepStatus, ValidationState, Wizard};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepperItem {
    pub key: &'static str,
    pub title: &'static str,
    pub status: StepStatus,
    pub reachable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub required: bool,
    pub value: String,
    pub choices: Vec<&'static str>,
    pub hint: Option<&'static str>,
    pub error: Option<String>,
}

/// Everything a front end needs to draw the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub wizard: &'static str,
    pub step: &'static str,
    pub index: usize,
    pub total: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub stepper: Vec<StepperItem>,
    pub fields: Vec<FieldView>,
    pub note: Option<&'static str>,
    pub blocked: Option<String>,
    pub step_errors: Vec<String>,
    pub is_last: bool,
    pub revision: u64,
}

/// Pure mapping from wizard state to the panel for its current step.
/// Returns `None` once the wizard has left for an external flow.
pub fn render<S: StepPanel>(wizard: &Wizard<S>, validation: &ValidationState) -> Option<PanelView> {
    if wizard.exit().is_some() {
        return None;
    }
    let step = wizard.current();
    let descriptor = step.descriptor();
    let panel = step.panel();
    let data = wizard.form_data();

    let stepper = wizard
        .definition()
        .registry()
        .iter()
        .enumerate()
        .map(|(index, item)| StepperItem {
            key: item.id.key(),
            title: item.title,
            status: wizard.status_at(index),
            reachable: wizard.can_go_to(index),
        })
        .collect();

    let fields = panel
        .fields
        .iter()
        .map(|field| FieldView {
            id: field.id,
            label: field.label,
            kind: kind_name(field.kind),
            required: field.required,
            value: field.display(data),
            choices: field.choices().iter().map(|choice| choice.label).collect(),
            hint: match field.kind {
                FieldKind::Files { accept } => Some(accept),
                _ => None,
            },
            error: validation.error(field.id).map(ToString::to_string),
        })
        .collect();

    Some(PanelView {
        wizard: wizard.name(),
        step: step.key(),
        index: wizard.current_index(),
        total: wizard.len(),
        title: descriptor.title,
        description: descriptor.description,
        stepper,
        fields,
        note: panel.note,
        blocked: wizard.blocked().map(ToString::to_string),
        step_errors: validation.step_errors().to_vec(),
        is_last: wizard.is_last(),
        revision: wizard.revision(),
    })
}

/// Panel lookup by string id. Unknown ids render nothing.
pub fn render_key<S: StepPanel>(
    registry: &StepRegistry<S>,
    key: &str,
) -> Option<crate::panel::Panel> {
    registry.find(key).map(StepPanel::panel)
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::TextArea => "textarea",
        FieldKind::Email => "email",
        FieldKind::Phone => "phone",
        FieldKind::Choice(_) => "choice",
        FieldKind::YesNo => "yes_no",
        FieldKind::Checkbox => "checkbox",
        FieldKind::Files { .. } => "files",
    }
}

#[cfg(test)]
mod tests {
    use super::{render, render_key};
    use crate::panel::{FieldKind, FieldSpec, Panel, StepPanel};
    use crate::wizard::testing::Demo;
    use crate::wizard::{
        BranchTable, ExternalFlow, FlowDefinition, Guard, StepStatus, ValidationIssue,
        ValidationState, Wizard,
    };

    impl StepPanel for Demo {
        fn panel(self) -> Panel {
            match self {
                Demo::Start => Panel::new([
                    FieldSpec::new("name", "Name", FieldKind::Text).required(),
                    FieldSpec::new("leave", "Leave?", FieldKind::YesNo),
                ]),
                Demo::Middle | Demo::Detour => Panel::default(),
                Demo::Finish => Panel::default().with_note("All done"),
            }
        }
    }

    fn wizard() -> Wizard<Demo> {
        let definition = FlowDefinition::builder("demo")
            .branches(BranchTable::new().redirect(
                "leave",
                Demo::Start,
                Guard::yes("leave"),
                ExternalFlow::FileMotion,
            ))
            .build()
            .expect("definition");
        Wizard::new(definition)
    }

    #[test]
    fn renders_fields_with_values_and_errors() {
        let mut wizard = wizard();
        wizard.set_field("leave", "no");
        let mut validation = ValidationState::default();
        validation.apply(vec![ValidationIssue::field("name", "Name is required")]);

        let view = render(&wizard, &validation).expect("view");
        assert_eq!(view.step, "start");
        assert_eq!(view.total, 4);
        assert_eq!(view.fields[0].error.as_deref(), Some("Name is required"));
        assert_eq!(view.fields[1].value, "No");
        assert_eq!(view.fields[1].choices, vec!["Yes", "No"]);
        assert_eq!(view.stepper[0].status, StepStatus::Active);
        assert!(!view.stepper[0].reachable);
    }

    #[test]
    fn stepper_marks_completed_steps_reachable() {
        let mut wizard = wizard();
        wizard.go_next();
        let view = render(&wizard, &ValidationState::default()).expect("view");
        assert_eq!(view.stepper[0].status, StepStatus::Done);
        assert!(view.stepper[0].reachable);
        assert!(!view.stepper[2].reachable);
    }

    #[test]
    fn nothing_renders_after_redirect() {
        let mut wizard = wizard();
        wizard.set_field("leave", "yes");
        wizard.go_next();
        assert!(render(&wizard, &ValidationState::default()).is_none());
    }

    #[test]
    fn unknown_keys_render_nothing() {
        let wizard = wizard();
        let registry = wizard.definition().registry();
        assert!(render_key(registry, "nope").is_none());
        assert_eq!(
            render_key(registry, "finish").and_then(|panel| panel.note),
            Some("All done")
        );
    }
}
