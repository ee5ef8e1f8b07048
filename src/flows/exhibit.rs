//! Exhibit submission: screening questions, exhibit details, type, upload and
//! confirmation. Physical and oversized exhibits are delivered in person, so
//! they skip the upload step.

use crate::config::UploadConfig;
use crate::core::validators;
use crate::error::WizardError;
use crate::panel::{Choice, FieldKind, FieldSpec, Panel, StepPanel};
use crate::wizard::{
    BranchTable, ExternalFlow, FlowDefinition, Guard, StepChecks, StepDescriptor, StepId,
    ValidationIssue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExhibitStep {
    Screening,
    Details,
    ExhibitType,
    Upload,
    Confirmation,
}

impl StepId for ExhibitStep {
    const ALL: &'static [Self] = &[
        Self::Screening,
        Self::Details,
        Self::ExhibitType,
        Self::Upload,
        Self::Confirmation,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Screening => "screening",
            Self::Details => "details",
            Self::ExhibitType => "exhibit_type",
            Self::Upload => "upload",
            Self::Confirmation => "confirmation",
        }
    }

    fn descriptor(self) -> StepDescriptor<Self> {
        match self {
            Self::Screening => StepDescriptor::new(
                self,
                "Screening",
                "A few questions before the exhibit can be accepted",
            ),
            Self::Details => {
                StepDescriptor::new(self, "Exhibit details", "Describe the exhibit")
            }
            Self::ExhibitType => {
                StepDescriptor::new(self, "Exhibit type", "How the exhibit will be provided")
            }
            Self::Upload => StepDescriptor::new(self, "Upload", "Attach the exhibit files"),
            Self::Confirmation => {
                StepDescriptor::new(self, "Confirmation", "Review and submit the exhibit")
            }
        }
    }
}

pub const EXHIBIT_TYPES: &[Choice] = &[
    Choice::new("document", "Document"),
    Choice::new("photo", "Photograph"),
    Choice::new("audio_video", "Audio or video recording"),
    Choice::new("physical", "Physical item"),
    Choice::new("oversized", "Oversized document"),
];

const ACCEPT_HINT: &str = "PDF, JPG, PNG, MP3 or MP4";

impl StepPanel for ExhibitStep {
    fn panel(self) -> Panel {
        match self {
            Self::Screening => Panel::new([
                FieldSpec::new(
                    "has_inappropriate_content",
                    "Does the exhibit contain graphic or inappropriate content?",
                    FieldKind::YesNo,
                )
                .required(),
                FieldSpec::new(
                    "has_pii",
                    "Does it contain unredacted personal information?",
                    FieldKind::YesNo,
                )
                .required(),
                FieldSpec::new(
                    "has_confidential_info",
                    "Does it contain confidential information?",
                    FieldKind::YesNo,
                )
                .required(),
                FieldSpec::new(
                    "has_protective_order",
                    "Is a protective order in place?",
                    FieldKind::YesNo,
                ),
            ]),
            Self::Details => Panel::new([
                FieldSpec::new("title", "Exhibit title", FieldKind::Text).required(),
                FieldSpec::new("offered_by", "Offered by", FieldKind::Text).required(),
                FieldSpec::new("description", "Description", FieldKind::TextArea).required(),
            ]),
            Self::ExhibitType => Panel::new([FieldSpec::new(
                "exhibit_type",
                "Exhibit type",
                FieldKind::Choice(EXHIBIT_TYPES),
            )
            .required()]),
            Self::Upload => Panel::new([FieldSpec::new(
                "files",
                "Files (comma separated)",
                FieldKind::Files {
                    accept: ACCEPT_HINT,
                },
            )
            .required()]),
            Self::Confirmation => Panel::new([FieldSpec::new(
                "certify",
                "I certify this exhibit is true and complete",
                FieldKind::Checkbox,
            )
            .required()])
            .with_note("Press Enter to submit. Physical items are delivered to the hearing office."),
        }
    }
}

pub fn definition(uploads: &UploadConfig) -> Result<FlowDefinition<ExhibitStep>, WizardError> {
    let file_types = validators::file_types(&uploads.accept, "Unsupported file type")
        .map_err(|err| WizardError::FilePattern(err.to_string()))?;

    let branches = BranchTable::new()
        .block(
            "inappropriate_content",
            ExhibitStep::Screening,
            Guard::yes("has_inappropriate_content"),
            "Exhibits with inappropriate content cannot be filed online. Contact the clerk.",
        )
        .block(
            "personal_information",
            ExhibitStep::Screening,
            Guard::yes("has_pii"),
            "Please redact personal information before uploading.",
        )
        .redirect(
            "unprotected_confidential",
            ExhibitStep::Screening,
            Guard::yes("has_confidential_info").and(Guard::no("has_protective_order")),
            ExternalFlow::FileMotion,
        )
        .goto(
            "delivered_in_person",
            ExhibitStep::ExhibitType,
            Guard::one_of("exhibit_type", ["physical", "oversized"]),
            ExhibitStep::Confirmation,
        );

    FlowDefinition::builder("exhibit")
        .branches(branches)
        .checks(
            ExhibitStep::Screening,
            StepChecks::new()
                .require("has_inappropriate_content", "Answer this question")
                .require("has_pii", "Answer this question")
                .require("has_confidential_info", "Answer this question")
                .validate(|data| {
                    if data.is_yes("has_confidential_info") && data.is_blank("has_protective_order")
                    {
                        vec![ValidationIssue::field(
                            "has_protective_order",
                            "Say whether a protective order is in place",
                        )]
                    } else {
                        Vec::new()
                    }
                }),
        )
        .checks(
            ExhibitStep::Details,
            StepChecks::new()
                .require("title", "Title is required")
                .field(
                    "title",
                    validators::max_length(120, "Keep the title under 120 characters"),
                )
                .require("offered_by", "Offered by is required")
                .require("description", "Description is required")
                .field(
                    "description",
                    validators::min_length(10, "Description must be at least 10 characters"),
                ),
        )
        .checks(
            ExhibitStep::ExhibitType,
            StepChecks::new().require("exhibit_type", "Choose an exhibit type"),
        )
        .checks(
            ExhibitStep::Upload,
            StepChecks::new()
                .require("files", "Attach at least one file")
                .items("files", file_types)
                .items(
                    "files",
                    validators::max_items(
                        uploads.max_files,
                        format!("Attach at most {} files", uploads.max_files),
                    ),
                ),
        )
        .checks(
            ExhibitStep::Confirmation,
            StepChecks::new().validate(|data| {
                if data.get("certify").is_some_and(|value| value.is_yes()) {
                    Vec::new()
                } else {
                    vec![ValidationIssue::field("certify", "Confirm the certification")]
                }
            }),
        )
        .restart_point(ExhibitStep::ExhibitType)
        .build()
}

#[cfg(test)]
mod tests {
    use super::{ExhibitStep, definition};
    use crate::config::UploadConfig;
    use crate::core::{FormData, Value};
    use crate::error::WizardError;
    use crate::wizard::{Advance, ExternalFlow, Wizard};

    fn exhibit_wizard() -> Wizard<ExhibitStep> {
        Wizard::new(definition(&UploadConfig::default()).expect("definition"))
    }

    fn clean_screening() -> FormData {
        FormData::new()
            .with("has_inappropriate_content", "no")
            .with("has_pii", "no")
            .with("has_confidential_info", "no")
    }

    #[test]
    fn pii_blocks_with_redaction_message() {
        let mut wizard = exhibit_wizard();
        wizard.merge(clean_screening().with("has_pii", "yes"));
        match wizard.go_next() {
            Advance::Blocked { at, message } => {
                assert_eq!(at, ExhibitStep::Screening);
                assert!(message.contains("redact personal information"));
            }
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn inappropriate_content_wins_over_redirect() {
        let mut wizard = exhibit_wizard();
        wizard.merge(
            clean_screening()
                .with("has_inappropriate_content", "yes")
                .with("has_confidential_info", "yes")
                .with("has_protective_order", "no"),
        );
        assert!(matches!(wizard.go_next(), Advance::Blocked { .. }));
        assert!(wizard.exit().is_none());
    }

    #[test]
    fn confidential_with_order_continues() {
        let mut wizard = exhibit_wizard();
        wizard.merge(
            clean_screening()
                .with("has_confidential_info", "yes")
                .with("has_protective_order", "yes"),
        );
        assert!(matches!(
            wizard.go_next(),
            Advance::Moved {
                to: ExhibitStep::Details,
                ..
            }
        ));

        let mut wizard = exhibit_wizard();
        wizard.merge(
            clean_screening()
                .with("has_confidential_info", "yes")
                .with("has_protective_order", "no"),
        );
        assert_eq!(wizard.go_next(), Advance::Redirected(ExternalFlow::FileMotion));
    }

    #[test]
    fn upload_checks_enforce_accepted_types_and_count() {
        let config = UploadConfig {
            accept: vec!["*.pdf".to_string()],
            max_files: 2,
        };
        let definition = definition(&config).expect("definition");
        let checks = definition.checks(ExhibitStep::Upload).expect("upload checks");

        assert!(checks.run(&FormData::new().with("files", "a.PDF")).is_empty());
        let issues = checks.run(&FormData::new().with("files", "a.pdf, b.exe"));
        assert_eq!(issues[0].message, "Unsupported file type: b.exe");
        let issues = checks.run(&FormData::new().with("files", "a.pdf, b.pdf, c.pdf"));
        assert_eq!(issues[0].message, "Attach at most 2 files");
    }

    #[test]
    fn uploaded_names_with_commas_are_checked_whole() {
        let definition = definition(&UploadConfig::default()).expect("definition");
        let checks = definition.checks(ExhibitStep::Upload).expect("upload checks");
        let files = Value::List(vec!["Minutes, March 2026.pdf".to_string()]);
        assert!(checks.run(&FormData::new().with("files", files)).is_empty());

        let files = Value::List(vec!["Minutes, March 2026.exe".to_string()]);
        let issues = checks.run(&FormData::new().with("files", files));
        assert_eq!(issues[0].message, "Unsupported file type: Minutes, March 2026.exe");
    }

    #[test]
    fn description_needs_ten_characters() {
        let definition = definition(&UploadConfig::default()).expect("definition");
        let checks = definition.checks(ExhibitStep::Details).expect("details checks");
        let data = FormData::new()
            .with("title", "Lease")
            .with("offered_by", "Respondent")
            .with("description", "  short   ");
        assert_eq!(checks.run(&data).len(), 1);
    }

    #[test]
    fn bad_glob_is_a_definition_error() {
        let config = UploadConfig {
            accept: vec!["[".to_string()],
            max_files: 1,
        };
        assert!(matches!(
            definition(&config),
            Err(WizardError::FilePattern(_))
        ));
    }
}
