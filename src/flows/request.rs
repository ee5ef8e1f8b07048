//! General requests to the hearing office. Withdrawals need no attachments.

use crate::core::validators;
use crate::error::WizardError;
use crate::panel::{Choice, FieldKind, FieldSpec, Panel, StepPanel};
use crate::wizard::{
    BranchTable, FlowDefinition, Guard, StepChecks, StepDescriptor, StepId, ValidationIssue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStep {
    RequestType,
    Contact,
    Details,
    Attachments,
    Review,
}

impl StepId for RequestStep {
    const ALL: &'static [Self] = &[
        Self::RequestType,
        Self::Contact,
        Self::Details,
        Self::Attachments,
        Self::Review,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::RequestType => "request_type",
            Self::Contact => "contact",
            Self::Details => "details",
            Self::Attachments => "attachments",
            Self::Review => "review",
        }
    }

    fn descriptor(self) -> StepDescriptor<Self> {
        match self {
            Self::RequestType => StepDescriptor::new(self, "Request type", "What you are asking for"),
            Self::Contact => StepDescriptor::new(self, "Contact", "How the office can reach you"),
            Self::Details => StepDescriptor::new(self, "Details", "Reason for the request"),
            Self::Attachments => {
                StepDescriptor::new(self, "Attachments", "Supporting documents, if any")
            }
            Self::Review => StepDescriptor::new(self, "Review", "Check and send"),
        }
    }
}

pub const REQUEST_TYPES: &[Choice] = &[
    Choice::new("continuance", "Continuance"),
    Choice::new("interpreter", "Interpreter"),
    Choice::new("accommodation", "Accommodation"),
    Choice::new("withdrawal", "Withdrawal"),
];

impl StepPanel for RequestStep {
    fn panel(self) -> Panel {
        match self {
            Self::RequestType => Panel::new([FieldSpec::new(
                "request_type",
                "Request type",
                FieldKind::Choice(REQUEST_TYPES),
            )
            .required()]),
            Self::Contact => Panel::new([
                FieldSpec::new("name", "Full name", FieldKind::Text).required(),
                FieldSpec::new("email", "Email", FieldKind::Email),
                FieldSpec::new("phone", "Phone", FieldKind::Phone),
                FieldSpec::new("address", "Mailing address", FieldKind::TextArea),
            ])
            .with_note("Give a phone number or a mailing address."),
            Self::Details => Panel::new([
                FieldSpec::new("reason", "Reason", FieldKind::TextArea).required(),
            ]),
            Self::Attachments => Panel::new([FieldSpec::new(
                "attachments",
                "Attachments (comma separated)",
                FieldKind::Files { accept: "PDF" },
            )]),
            Self::Review => Panel::default().with_note("Press Enter to send the request."),
        }
    }
}

pub fn definition() -> Result<FlowDefinition<RequestStep>, WizardError> {
    let branches = BranchTable::new().goto(
        "withdrawal",
        RequestStep::Details,
        Guard::equals("request_type", "withdrawal"),
        RequestStep::Review,
    );

    FlowDefinition::builder("request")
        .branches(branches)
        .checks(
            RequestStep::RequestType,
            StepChecks::new().require("request_type", "Choose a request type"),
        )
        .checks(
            RequestStep::Contact,
            StepChecks::new()
                .require("name", "Name is required")
                .field("email", validators::optional(validators::email("Enter a valid email")))
                .field(
                    "phone",
                    validators::optional(validators::phone("Enter a valid phone number")),
                )
                .validate(|data| {
                    if data.is_blank("phone") && data.is_blank("address") {
                        vec![ValidationIssue::step(
                            "Enter a phone number or a mailing address",
                        )]
                    } else {
                        Vec::new()
                    }
                }),
        )
        .checks(
            RequestStep::Details,
            StepChecks::new()
                .require("reason", "Give a reason")
                .field(
                    "reason",
                    validators::max_length(2000, "Keep the reason under 2000 characters"),
                ),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::{RequestStep, definition};
    use crate::core::FormData;
    use crate::wizard::{ValidationIssue, Wizard};

    #[test]
    fn withdrawal_skips_attachments() {
        let mut wizard = Wizard::new(definition().expect("definition"));
        wizard.set_field("request_type", "withdrawal");
        wizard.go_next();
        wizard.go_next();
        assert_eq!(wizard.current(), RequestStep::Details);
        wizard.go_next();
        assert_eq!(wizard.current(), RequestStep::Review);
        assert!(!wizard.history().contains(&RequestStep::Attachments));
    }

    #[test]
    fn contact_needs_phone_or_address() {
        let definition = definition().expect("definition");
        let checks = definition.checks(RequestStep::Contact).expect("checks");

        let issues = checks.run(&FormData::new().with("name", "R. Diaz"));
        assert_eq!(
            issues,
            vec![ValidationIssue::step("Enter a phone number or a mailing address")]
        );

        let data = FormData::new()
            .with("name", "R. Diaz")
            .with("phone", "(555) 123-4567")
            .with("email", "");
        assert!(checks.run(&data).is_empty());

        let data = FormData::new()
            .with("name", "R. Diaz")
            .with("phone", "call me")
            .with("email", "rdiaz@");
        let fields: Vec<_> = checks
            .run(&data)
            .into_iter()
            .filter_map(|issue| match issue.target {
                crate::wizard::ValidationTarget::Field(id) => Some(id.into_inner()),
                crate::wizard::ValidationTarget::Step => None,
            })
            .collect();
        assert_eq!(fields, vec!["email".to_string(), "phone".to_string()]);
    }
}
