use crate::app::state::AppState;
use crate::app::submission::{Receipt, ReferenceNumber};
use crate::config::SubmissionConfig;
use crate::panel::StepPanel;
use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::runtime::session::{Submission, WizardSession};
use crate::wizard::Advance;

pub struct Reducer;

impl Reducer {
    pub fn reduce<S: StepPanel>(
        session: &mut WizardSession<S>,
        app: &mut AppState,
        config: &SubmissionConfig,
        intent: Intent,
    ) -> Vec<Effect> {
        match intent {
            Intent::Exit => vec![Effect::Exit],
            Intent::Submit => match session.submit() {
                Submission::Invalid(_) => vec![Effect::RequestRender],
                Submission::Advanced(Advance::Redirected(flow)) => {
                    vec![Effect::Redirect(flow), Effect::RequestRender]
                }
                Submission::Advanced(_) => vec![Effect::RequestRender],
                Submission::Complete => {
                    let kind = session.kind();
                    let receipt = Receipt::new(
                        ReferenceNumber::generate(kind.prefix(config)),
                        kind.key(),
                        session.wizard().form_data().clone(),
                    );
                    tracing::info!(
                        flow = kind.key(),
                        reference = %receipt.reference,
                        "submission accepted"
                    );
                    session.finish(receipt.reference.clone());
                    app.record_submission(receipt.clone());
                    vec![Effect::Submitted(receipt), Effect::RequestRender]
                }
                Submission::Ignored => vec![],
            },
            Intent::NextField => render_if(session.focus_next()),
            Intent::PrevField => render_if(session.focus_prev()),
            // The edit buffer may change without a new merged value, so always redraw.
            Intent::InputKey(key) => {
                session.input_key(key);
                vec![Effect::RequestRender]
            }
            Intent::Change { field, value } => render_if(session.change(field, value)),
            Intent::GoToStep(index) => render_if(session.go_to_step(index)),
            Intent::Restart => render_if(session.restart()),
            Intent::Noop => vec![],
        }
    }
}

fn render_if(changed: bool) -> Vec<Effect> {
    if changed {
        vec![Effect::RequestRender]
    } else {
        vec![]
    }
}
