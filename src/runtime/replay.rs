//! Headless driver: feeds a YAML script of per-step answers through the same
//! reducer the terminal uses and captures a JSON snapshot after every render.

use crate::app::state::AppState;
use crate::app::submission::ReferenceNumber;
use crate::config::{AppConfig, SubmissionConfig};
use crate::core::FormData;
use crate::error::ReplayError;
use crate::flows::{FlowKind, discovery, exhibit, request};
use crate::panel::{PanelView, StepPanel};
use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::runtime::reducer::Reducer;
use crate::runtime::runner::session_frame;
use crate::runtime::session::WizardSession;
use crate::ui::Theme;
use crate::ui::frame_json::frame_to_json;
use crate::wizard::{FlowDefinition, StepId, Wizard};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

/// One script entry. Applied in order: check `expect`, jump with `go_to`,
/// `restart`, merge `answers`, then press Enter unless `submit: false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayStep {
    pub expect: Option<String>,
    pub go_to: Option<String>,
    pub restart: bool,
    pub answers: FormData,
    pub submit: bool,
}

impl Default for ReplayStep {
    fn default() -> Self {
        Self {
            expect: None,
            go_to: None,
            restart: false,
            answers: FormData::new(),
            submit: true,
        }
    }
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let raw = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub seq: usize,
    pub intent: &'static str,
    pub step: &'static str,
    pub effects: Vec<Effect>,
    pub reference: Option<ReferenceNumber>,
    pub panel: Option<PanelView>,
    pub frame: serde_json::Value,
}

pub fn replay<S: StepPanel>(
    session: &mut WizardSession<S>,
    app: &mut AppState,
    config: &SubmissionConfig,
    script: &ReplayScript,
) -> Result<Vec<Snapshot>, ReplayError> {
    let theme = Theme::default_theme();
    let mut snapshots = vec![snapshot(session, 0, "mount", Vec::new(), &theme)];

    for step in &script.steps {
        if let Some(expected) = &step.expect {
            let actual = session.wizard().current().key();
            if actual != expected {
                return Err(ReplayError::Expectation {
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        for intent in intents_for(session, step)? {
            let name = intent.name();
            let effects = Reducer::reduce(session, app, config, intent);
            if effects.is_empty() {
                continue;
            }
            let done = effects
                .iter()
                .any(|effect| matches!(effect, Effect::Exit | Effect::Redirect(_)));
            let seq = snapshots.len();
            snapshots.push(snapshot(session, seq, name, effects, &theme));
            if done {
                tracing::info!(snapshots = snapshots.len(), "replay ended by the wizard");
                return Ok(snapshots);
            }
        }
    }

    tracing::info!(snapshots = snapshots.len(), "replay finished");
    Ok(snapshots)
}

/// Replays `script` against a fresh wizard of `kind` and encodes each
/// snapshot as one JSON line.
pub fn replay_flow(
    kind: FlowKind,
    config: &AppConfig,
    app: &mut AppState,
    script: &ReplayScript,
) -> crate::Result<Vec<String>> {
    let submission = &config.submission;
    let snapshots = match kind {
        FlowKind::Exhibit => {
            let definition = exhibit::definition(&config.uploads)?;
            replay_definition(kind, definition, app, submission, script)?
        }
        FlowKind::Discovery => {
            replay_definition(kind, discovery::definition()?, app, submission, script)?
        }
        FlowKind::Request => {
            replay_definition(kind, request::definition()?, app, submission, script)?
        }
    };
    let lines = snapshots
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ReplayError::from)?;
    Ok(lines)
}

fn replay_definition<S: StepPanel>(
    kind: FlowKind,
    definition: FlowDefinition<S>,
    app: &mut AppState,
    config: &SubmissionConfig,
    script: &ReplayScript,
) -> Result<Vec<Snapshot>, ReplayError> {
    let mut session = WizardSession::new(kind, Wizard::new(definition));
    replay(&mut session, app, config, script)
}

fn intents_for<S: StepPanel>(
    session: &WizardSession<S>,
    step: &ReplayStep,
) -> Result<Vec<Intent>, ReplayError> {
    let mut intents = Vec::new();
    if let Some(key) = &step.go_to {
        let index = S::from_key(key)
            .and_then(|target| session.wizard().definition().registry().index_of(target))
            .ok_or_else(|| ReplayError::UnknownStep(key.clone()))?;
        intents.push(Intent::GoToStep(index));
    }
    if step.restart {
        intents.push(Intent::Restart);
    }
    intents.extend(step.answers.iter().map(|(field, value)| Intent::Change {
        field: field.into(),
        value: value.clone(),
    }));
    if step.submit {
        intents.push(Intent::Submit);
    }
    Ok(intents)
}

fn snapshot<S: StepPanel>(
    session: &WizardSession<S>,
    seq: usize,
    intent: &'static str,
    effects: Vec<Effect>,
    theme: &Theme,
) -> Snapshot {
    Snapshot {
        seq,
        intent,
        step: session.wizard().current().key(),
        effects,
        reference: session.finished().cloned(),
        panel: session.view(),
        frame: frame_to_json(&session_frame(session, theme)),
    }
}
