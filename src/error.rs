use std::path::PathBuf;

/// Problems found while assembling a wizard definition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("wizard `{0}` has no steps")]
    EmptyRegistry(&'static str),

    #[error("step `{step}` is registered twice in wizard `{wizard}`")]
    DuplicateStep { wizard: &'static str, step: &'static str },

    #[error("branch `{label}` references step `{step}` which is not registered")]
    UnregisteredStep { label: &'static str, step: &'static str },

    #[error("invalid accepted file pattern: {0}")]
    FilePattern(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read replay script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse replay script: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("replay script names unknown step `{0}`")]
    UnknownStep(String),

    #[error("replay expected step `{expected}` but the wizard is on `{actual}`")]
    Expectation { expected: String, actual: &'static str },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Any library failure, for callers that do not care which stage failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
