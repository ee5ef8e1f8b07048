use std::fmt;
use std::hash::Hash;

/// Closed set of step identifiers for one wizard.
///
/// Each wizard declares an `enum` and implements this trait with exhaustive
/// matches, so adding a step without a title or render case fails to compile.
pub trait StepId: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every step in default (linear) order.
    const ALL: &'static [Self];

    /// Stable string key, used by routes, replay scripts and JSON snapshots.
    fn key(self) -> &'static str;

    fn descriptor(self) -> StepDescriptor<Self>;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|step| step.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor<S> {
    pub id: S,
    pub title: &'static str,
    pub description: &'static str,
}

impl<S> StepDescriptor<S> {
    pub const fn new(id: S, title: &'static str, description: &'static str) -> Self {
        Self {
            id,
            title,
            description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Active,
    Done,
    Blocked,
}
