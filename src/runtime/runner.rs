use crate::app::state::AppState;
use crate::config::SubmissionConfig;
use crate::panel::StepPanel;
use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::runtime::session::WizardSession;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::{Frame, Theme, notice_frame, panel_frame};
use crate::wizard::ExternalFlow;
use std::io;
use std::time::Duration;

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Exited,
    Redirected(ExternalFlow),
}

pub struct Runtime<'a, S: StepPanel> {
    session: WizardSession<S>,
    app: &'a mut AppState,
    submission: &'a SubmissionConfig,
    terminal: Terminal,
    key_bindings: KeyBindings,
    theme: Theme,
}

impl<'a, S: StepPanel> Runtime<'a, S> {
    pub fn new(
        session: WizardSession<S>,
        app: &'a mut AppState,
        submission: &'a SubmissionConfig,
        terminal: Terminal,
    ) -> Self {
        Self {
            session,
            app,
            submission,
            terminal,
            key_bindings: KeyBindings::new(),
            theme: Theme::default_theme(),
        }
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn run(&mut self) -> io::Result<RunOutcome> {
        self.terminal.enter()?;
        let run_result = self.event_loop();
        let exit_result = self.terminal.exit();
        let outcome = run_result?;
        exit_result?;
        Ok(outcome)
    }

    fn event_loop(&mut self) -> io::Result<RunOutcome> {
        self.render()?;
        loop {
            let intent = match self.terminal.poll_event(Duration::from_millis(250))? {
                TerminalEvent::Key(key) => self.key_bindings.resolve(key),
                TerminalEvent::Resize(size) => {
                    self.terminal.set_size(size);
                    self.render()?;
                    continue;
                }
                TerminalEvent::Tick => continue,
            };
            tracing::trace!(intent = intent.name(), "dispatching intent");
            if let Some(outcome) = self.process(intent)? {
                return Ok(outcome);
            }
        }
    }

    fn process(&mut self, intent: Intent) -> io::Result<Option<RunOutcome>> {
        let effects = Reducer::reduce(&mut self.session, self.app, self.submission, intent);
        let mut render_requested = false;
        for effect in effects {
            match effect {
                Effect::RequestRender => render_requested = true,
                Effect::Submitted(receipt) => {
                    tracing::debug!(reference = %receipt.reference, "submission shown");
                }
                Effect::Redirect(flow) => return Ok(Some(RunOutcome::Redirected(flow))),
                Effect::Exit => return Ok(Some(RunOutcome::Exited)),
            }
        }
        if render_requested {
            self.render()?;
        }
        Ok(None)
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = session_frame(&self.session, &self.theme);
        self.terminal.render(&frame)
    }
}

/// What the screen shows for a session in its current state.
pub fn session_frame<S: StepPanel>(session: &WizardSession<S>, theme: &Theme) -> Frame {
    if let Some(reference) = session.finished() {
        let body = [
            format!("Your {} was submitted.", session.kind()),
            format!("Reference number: {reference}"),
        ];
        return notice_frame("Submitted", &body, theme);
    }
    match session.view() {
        Some(view) => panel_frame(&view, session.focus(), theme),
        None => {
            let body = [format!(
                "Continuing in {}",
                session.wizard().exit().map(ExternalFlow::key).unwrap_or("another flow")
            )];
            notice_frame("Leaving this wizard", &body, theme)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::session_frame;
    use crate::app::submission::ReferenceNumber;
    use crate::flows::{FlowKind, request};
    use crate::runtime::session::WizardSession;
    use crate::ui::Theme;
    use crate::ui::span::plain_text;
    use crate::wizard::Wizard;

    #[test]
    fn finished_sessions_show_the_reference() {
        let mut session = WizardSession::new(
            FlowKind::Request,
            Wizard::new(request::definition().expect("definition")),
        );
        let frame = session_frame(&session, &Theme::default());
        assert_eq!(plain_text(&frame.lines[0]), "REQUEST  step 1 of 5");

        session.finish(ReferenceNumber::from_parts("REQ", 2026, "ABCDEF01"));
        let frame = session_frame(&session, &Theme::default());
        assert_eq!(plain_text(&frame.lines[3]), "Reference number: REQ-2026-ABCDEF01");
    }
}
