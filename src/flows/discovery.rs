//! Discovery filing. Written requests and depositions take separate paths
//! and meet again at the confidentiality questions.

use crate::core::validators;
use crate::error::WizardError;
use crate::panel::{Choice, FieldKind, FieldSpec, Panel, StepPanel};
use crate::wizard::{
    BranchTable, ExternalFlow, FlowDefinition, Guard, StepChecks, StepDescriptor, StepId,
    ValidationIssue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryStep {
    DiscoveryType,
    Requests,
    Deposition,
    Confidentiality,
    Review,
}

impl StepId for DiscoveryStep {
    const ALL: &'static [Self] = &[
        Self::DiscoveryType,
        Self::Requests,
        Self::Deposition,
        Self::Confidentiality,
        Self::Review,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::DiscoveryType => "discovery_type",
            Self::Requests => "requests",
            Self::Deposition => "deposition",
            Self::Confidentiality => "confidentiality",
            Self::Review => "review",
        }
    }

    fn descriptor(self) -> StepDescriptor<Self> {
        match self {
            Self::DiscoveryType => {
                StepDescriptor::new(self, "Discovery type", "What kind of discovery is this")
            }
            Self::Requests => StepDescriptor::new(
                self,
                "Written requests",
                "Interrogatories, document or admission requests",
            ),
            Self::Deposition => {
                StepDescriptor::new(self, "Deposition", "Who is deposed and when")
            }
            Self::Confidentiality => StepDescriptor::new(
                self,
                "Confidentiality",
                "Whether the material is covered by a protective order",
            ),
            Self::Review => StepDescriptor::new(self, "Review", "Check and file"),
        }
    }
}

pub const DISCOVERY_TYPES: &[Choice] = &[
    Choice::new("interrogatories", "Interrogatories"),
    Choice::new("production", "Request for production"),
    Choice::new("admissions", "Request for admissions"),
    Choice::new("deposition", "Deposition notice"),
];

impl StepPanel for DiscoveryStep {
    fn panel(self) -> Panel {
        match self {
            Self::DiscoveryType => Panel::new([FieldSpec::new(
                "discovery_type",
                "Discovery type",
                FieldKind::Choice(DISCOVERY_TYPES),
            )
            .required()]),
            Self::Requests => Panel::new([
                FieldSpec::new("served_on", "Served on (party)", FieldKind::Text).required(),
                FieldSpec::new("items", "Requested items", FieldKind::TextArea).required(),
            ]),
            Self::Deposition => Panel::new([
                FieldSpec::new("deponent", "Deponent", FieldKind::Text).required(),
                FieldSpec::new("date", "Date (YYYY-MM-DD)", FieldKind::Text).required(),
                FieldSpec::new("location", "Location", FieldKind::Text),
            ]),
            Self::Confidentiality => Panel::new([
                FieldSpec::new(
                    "has_confidential_info",
                    "Will confidential material be exchanged?",
                    FieldKind::YesNo,
                )
                .required(),
                FieldSpec::new(
                    "has_protective_order",
                    "Is a protective order in place?",
                    FieldKind::YesNo,
                ),
                FieldSpec::new(
                    "order_covers_material",
                    "Does the order cover this material?",
                    FieldKind::YesNo,
                ),
            ]),
            Self::Review => Panel::default().with_note("Press Enter to file the discovery."),
        }
    }
}

pub fn definition() -> Result<FlowDefinition<DiscoveryStep>, WizardError> {
    let confidential_without_order =
        Guard::yes("has_confidential_info").and(Guard::no("has_protective_order"));
    let order_does_not_cover = Guard::yes("has_confidential_info")
        .and(Guard::yes("has_protective_order"))
        .and(Guard::no("order_covers_material"));

    let branches = BranchTable::new()
        .goto(
            "deposition_path",
            DiscoveryStep::DiscoveryType,
            Guard::equals("discovery_type", "deposition"),
            DiscoveryStep::Deposition,
        )
        .goto(
            "written_path",
            DiscoveryStep::Requests,
            Guard::Always,
            DiscoveryStep::Confidentiality,
        )
        .redirect(
            "needs_protective_order",
            DiscoveryStep::Confidentiality,
            confidential_without_order,
            ExternalFlow::FileMotion,
        )
        .block(
            "order_scope",
            DiscoveryStep::Confidentiality,
            order_does_not_cover,
            "The protective order does not cover this material. Ask to amend it first.",
        );

    FlowDefinition::builder("discovery")
        .branches(branches)
        .checks(
            DiscoveryStep::DiscoveryType,
            StepChecks::new().require("discovery_type", "Choose a discovery type"),
        )
        .checks(
            DiscoveryStep::Requests,
            StepChecks::new()
                .require("served_on", "Name the party served")
                .require("items", "List the requested items"),
        )
        .checks(
            DiscoveryStep::Deposition,
            StepChecks::new()
                .require("deponent", "Deponent is required")
                .require("date", "Date is required")
                .field("date", validators::iso_date("Use the YYYY-MM-DD format")),
        )
        .checks(
            DiscoveryStep::Confidentiality,
            StepChecks::new()
                .require("has_confidential_info", "Answer this question")
                .validate(|data| {
                    let mut issues = Vec::new();
                    if !data.is_yes("has_confidential_info") {
                        return issues;
                    }
                    if data.is_blank("has_protective_order") {
                        issues.push(ValidationIssue::field(
                            "has_protective_order",
                            "Say whether a protective order is in place",
                        ));
                    } else if data.is_yes("has_protective_order")
                        && data.is_blank("order_covers_material")
                    {
                        issues.push(ValidationIssue::field(
                            "order_covers_material",
                            "Say whether the order covers this material",
                        ));
                    }
                    issues
                }),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::{DiscoveryStep, definition};
    use crate::core::FormData;
    use crate::wizard::{Advance, ExternalFlow, Wizard};

    fn discovery_wizard() -> Wizard<DiscoveryStep> {
        Wizard::new(definition().expect("definition"))
    }

    #[test]
    fn deposition_skips_written_requests() {
        let mut wizard = discovery_wizard();
        wizard.set_field("discovery_type", "deposition");
        wizard.go_next();
        assert_eq!(wizard.current(), DiscoveryStep::Deposition);
        wizard.go_next();
        assert_eq!(wizard.current(), DiscoveryStep::Confidentiality);
        assert!(!wizard.history().contains(&DiscoveryStep::Requests));
    }

    #[test]
    fn written_requests_skip_deposition() {
        let mut wizard = discovery_wizard();
        wizard.set_field("discovery_type", "interrogatories");
        wizard.go_next();
        assert_eq!(wizard.current(), DiscoveryStep::Requests);
        wizard.go_next();
        assert_eq!(wizard.current(), DiscoveryStep::Confidentiality);
        assert!(!wizard.history().contains(&DiscoveryStep::Deposition));
    }

    #[test]
    fn confidentiality_gates() {
        let mut wizard = discovery_wizard();
        wizard.go_next();
        wizard.go_next();
        assert_eq!(wizard.current(), DiscoveryStep::Confidentiality);

        wizard.merge(
            FormData::new()
                .with("has_confidential_info", "yes")
                .with("has_protective_order", "yes")
                .with("order_covers_material", "no"),
        );
        assert!(matches!(wizard.go_next(), Advance::Blocked { .. }));

        wizard.set_field("order_covers_material", "yes");
        assert!(matches!(
            wizard.go_next(),
            Advance::Moved {
                to: DiscoveryStep::Review,
                ..
            }
        ));

        let mut wizard = discovery_wizard();
        wizard.go_next();
        wizard.go_next();
        wizard.merge(
            FormData::new()
                .with("has_confidential_info", "yes")
                .with("has_protective_order", "no"),
        );
        assert_eq!(wizard.go_next(), Advance::Redirected(ExternalFlow::FileMotion));
    }

    #[test]
    fn deposition_date_format() {
        let definition = definition().expect("definition");
        let checks = definition.checks(DiscoveryStep::Deposition).expect("checks");
        let data = FormData::new().with("deponent", "J. Park").with("date", "11/02/2026");
        assert_eq!(checks.run(&data)[0].message, "Use the YYYY-MM-DD format");
        let data = FormData::new().with("deponent", "J. Park").with("date", "2026-11-02");
        assert!(checks.run(&data).is_empty());
    }
}
