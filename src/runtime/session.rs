use crate::app::submission::ReferenceNumber;
use crate::core::{FieldId, FormData, Value};
use crate::flows::FlowKind;
use crate::panel::{FieldKind, FieldSpec, PanelView, StepPanel, render};
use crate::terminal::{KeyCode, KeyEvent};
use crate::wizard::{Advance, ValidationState, Wizard};

/// Result of pressing Enter on a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<S> {
    /// Step checks failed; the issues are in the session's validation state.
    Invalid(usize),
    Advanced(Advance<S>),
    /// The last step was accepted; the caller files the submission.
    Complete,
    Ignored,
}

/// One mounted wizard plus the view state around it: field errors, which
/// field has focus and its edit buffer.
#[derive(Debug)]
pub struct WizardSession<S: StepPanel> {
    kind: FlowKind,
    wizard: Wizard<S>,
    validation: ValidationState,
    focus: usize,
    draft: String,
    finished: Option<ReferenceNumber>,
}

impl<S: StepPanel> WizardSession<S> {
    pub fn new(kind: FlowKind, wizard: Wizard<S>) -> Self {
        let mut session = Self {
            kind,
            wizard,
            validation: ValidationState::default(),
            focus: 0,
            draft: String::new(),
            finished: None,
        };
        session.reset_focus();
        session
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn wizard(&self) -> &Wizard<S> {
        &self.wizard
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn finished(&self) -> Option<&ReferenceNumber> {
        self.finished.as_ref()
    }

    pub fn view(&self) -> Option<PanelView> {
        render(&self.wizard, &self.validation)
    }

    pub fn focused_field(&self) -> Option<FieldSpec> {
        self.wizard.current().panel().fields.get(self.focus).copied()
    }

    pub fn focus_next(&mut self) -> bool {
        self.move_focus(1)
    }

    pub fn focus_prev(&mut self) -> bool {
        self.move_focus(-1)
    }

    fn move_focus(&mut self, delta: isize) -> bool {
        let count = self.wizard.current().panel().fields.len();
        if count < 2 {
            return false;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(count as isize) as usize;
        self.load_draft();
        true
    }

    /// One-field merge; clears that field's error once its value changes.
    pub fn change(&mut self, field: impl Into<FieldId>, value: impl Into<Value>) -> bool {
        let field = field.into();
        let changed = self.wizard.merge(FormData::new().with(field.clone(), value));
        if changed {
            self.validation.clear_error(field.as_str());
            if self
                .focused_field()
                .is_some_and(|focused| focused.id == field.as_str())
            {
                self.load_draft();
            }
        }
        changed
    }

    /// Edits the focused field. Text inputs merge on every keystroke.
    pub fn input_key(&mut self, key: KeyEvent) -> bool {
        let Some(field) = self.focused_field() else {
            return false;
        };
        if field.is_choice() {
            return self.cycle_choice(field, key);
        }
        if field.kind == FieldKind::Checkbox {
            if key.typed_char() != Some(' ') {
                return false;
            }
            let checked = field
                .value(self.wizard.form_data())
                .is_some_and(Value::is_yes);
            return self.change(field.id, Value::Bool(!checked));
        }

        match (key.code, key.typed_char()) {
            (_, Some(ch)) => self.draft.push(ch),
            (KeyCode::Backspace, None) => {
                if self.draft.pop().is_none() {
                    return false;
                }
            }
            _ => return false,
        }
        let value = field.input(&self.draft);
        let draft = std::mem::take(&mut self.draft);
        let changed = self.change(field.id, value);
        self.draft = draft;
        changed
    }

    fn cycle_choice(&mut self, field: FieldSpec, key: KeyEvent) -> bool {
        let delta = match (key.code, key.typed_char()) {
            (KeyCode::Left | KeyCode::Up, _) => -1,
            (KeyCode::Right | KeyCode::Down, _) | (_, Some(' ')) => 1,
            (_, Some('y' | 'Y')) if field.kind == FieldKind::YesNo => {
                return self.change(field.id, "yes");
            }
            (_, Some('n' | 'N')) if field.kind == FieldKind::YesNo => {
                return self.change(field.id, "no");
            }
            _ => return false,
        };
        match field.cycle(self.wizard.form_data(), delta) {
            Some(value) => self.change(field.id, value),
            None => false,
        }
    }

    /// Validate, then advance. Blocked and redirected outcomes come back as
    /// `Advanced` so the caller can surface them.
    pub fn submit(&mut self) -> Submission<S> {
        if self.finished.is_some() || self.wizard.exit().is_some() {
            return Submission::Ignored;
        }
        let issues = self.wizard.validate_current();
        if !issues.is_empty() {
            let count = issues.len();
            tracing::debug!(
                wizard = self.wizard.name(),
                step = self.wizard.current().key(),
                issues = count,
                "step checks failed"
            );
            self.validation.apply(issues);
            return Submission::Invalid(count);
        }
        self.validation.clear();

        match self.wizard.go_next() {
            Advance::AtEnd => Submission::Complete,
            Advance::Exited => Submission::Ignored,
            advance => {
                if matches!(advance, Advance::Moved { .. }) {
                    self.reset_focus();
                }
                Submission::Advanced(advance)
            }
        }
    }

    pub fn go_to_step(&mut self, index: usize) -> bool {
        if self.finished.is_some() || !self.wizard.go_to_step(index) {
            return false;
        }
        self.validation.clear();
        self.reset_focus();
        true
    }

    /// Starts another pass: from the flow's restart point when the wizard has
    /// reached it, otherwise from the first step. Form data is kept.
    pub fn restart(&mut self) -> bool {
        let restarted = self.wizard.restart_from_point() || self.wizard.restart(0);
        if restarted {
            self.finished = None;
            self.validation.clear();
            self.reset_focus();
        }
        restarted
    }

    pub fn finish(&mut self, reference: ReferenceNumber) {
        tracing::info!(wizard = self.wizard.name(), %reference, "wizard finished");
        self.finished = Some(reference);
    }

    fn reset_focus(&mut self) {
        self.focus = 0;
        self.load_draft();
    }

    fn load_draft(&mut self) {
        self.draft = self
            .focused_field()
            .map(|field| field.edit_text(self.wizard.form_data()))
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::{Submission, WizardSession};
    use crate::config::UploadConfig;
    use crate::core::Value;
    use crate::flows::{ExhibitStep, FlowKind, exhibit};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::wizard::{Advance, ExternalFlow, Wizard};

    fn session() -> WizardSession<ExhibitStep> {
        let definition = exhibit::definition(&UploadConfig::default()).expect("definition");
        WizardSession::new(FlowKind::Exhibit, Wizard::new(definition))
    }

    fn type_text(session: &mut WizardSession<ExhibitStep>, text: &str) {
        for ch in text.chars() {
            session.input_key(KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    fn pass_screening(session: &mut WizardSession<ExhibitStep>) {
        session.change("has_inappropriate_content", "no");
        session.change("has_pii", "no");
        session.change("has_confidential_info", "no");
        assert!(matches!(session.submit(), Submission::Advanced(Advance::Moved { .. })));
    }

    #[test]
    fn invalid_step_records_issues_and_stays() {
        let mut session = session();
        assert_eq!(session.submit(), Submission::Invalid(3));
        assert_eq!(session.wizard().current(), ExhibitStep::Screening);
        assert_eq!(
            session.validation().error("has_pii"),
            Some("Answer this question")
        );

        session.change("has_pii", "no");
        assert!(session.validation().error("has_pii").is_none());
    }

    #[test]
    fn typing_merges_every_keystroke() {
        let mut session = session();
        pass_screening(&mut session);
        assert_eq!(session.wizard().current(), ExhibitStep::Details);

        let before = session.wizard().revision();
        type_text(&mut session, "Lease");
        assert_eq!(session.wizard().form_data().text("title"), Some("Lease"));
        assert_eq!(session.wizard().revision(), before + 5);

        session.input_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(session.wizard().form_data().text("title"), Some("Leas"));
    }

    #[test]
    fn choice_fields_cycle_and_answer_shortcuts() {
        let mut session = session();
        assert!(session.input_key(KeyEvent::plain(KeyCode::Char('y'))));
        assert!(session.wizard().form_data().is_yes("has_inappropriate_content"));
        session.input_key(KeyEvent::plain(KeyCode::Right));
        assert!(session.wizard().form_data().is_no("has_inappropriate_content"));
        assert!(!session.input_key(KeyEvent::plain(KeyCode::Char('q'))));
    }

    #[test]
    fn focus_wraps_and_reloads_the_draft() {
        let mut session = session();
        pass_screening(&mut session);
        session.change("description", "Signed lease");
        session.focus_prev();
        assert_eq!(session.focus(), 2);
        type_text(&mut session, " copy");
        assert_eq!(
            session.wizard().form_data().text("description"),
            Some("Signed lease copy")
        );
        session.focus_next();
        assert_eq!(session.focus(), 0);
    }

    #[test]
    fn files_keep_separators_while_typing() {
        let mut session = session();
        pass_screening(&mut session);
        session.change("title", "Lease");
        session.change("offered_by", "Respondent");
        session.change("description", "Signed lease agreement");
        session.submit();
        session.change("exhibit_type", "document");
        session.submit();
        assert_eq!(session.wizard().current(), ExhibitStep::Upload);

        type_text(&mut session, "a.pdf, b.png");
        assert_eq!(
            session.wizard().form_data().get("files"),
            Some(&Value::List(vec!["a.pdf".to_string(), "b.png".to_string()]))
        );
    }

    #[test]
    fn last_step_completes_and_restart_reopens() {
        let mut session = session();
        pass_screening(&mut session);
        session.change("title", "Lease");
        session.change("offered_by", "Respondent");
        session.change("description", "Signed lease agreement");
        session.submit();
        session.change("exhibit_type", "oversized");
        session.submit();
        assert_eq!(session.wizard().current(), ExhibitStep::Confirmation);

        assert_eq!(session.submit(), Submission::Invalid(1));
        session.input_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(session.submit(), Submission::Complete);

        session.finish(crate::app::submission::ReferenceNumber::from_parts("EXH", 2026, "1"));
        assert_eq!(session.submit(), Submission::Ignored);
        assert!(session.restart());
        assert!(session.finished().is_none());
        assert_eq!(session.wizard().current(), ExhibitStep::ExhibitType);
        assert_eq!(session.wizard().form_data().text("title"), Some("Lease"));
    }

    #[test]
    fn restart_after_redirect_returns_to_screening() {
        let mut session = session();
        session.change("has_inappropriate_content", "no");
        session.change("has_pii", "no");
        session.change("has_confidential_info", "yes");
        session.change("has_protective_order", "no");
        assert_eq!(
            session.submit(),
            Submission::Advanced(Advance::Redirected(ExternalFlow::FileMotion))
        );

        assert!(session.restart());
        assert_eq!(session.wizard().current(), ExhibitStep::Screening);
        assert_eq!(session.wizard().exit(), None);

        session.change("exhibit_type", "oversized");
        session.change("certify", "yes");
        assert_eq!(
            session.submit(),
            Submission::Advanced(Advance::Redirected(ExternalFlow::FileMotion))
        );
        assert_eq!(session.wizard().current(), ExhibitStep::Screening);
        assert!(session.wizard().form_data().text("title").is_none());
    }
}
