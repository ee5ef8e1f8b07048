use crate::core::FormData;
use crate::error::WizardError;
use crate::wizard::registry::StepRegistry;
use crate::wizard::step::StepId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative predicate over accumulated form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Always,
    Equals { field: String, value: String },
    OneOf { field: String, values: Vec<String> },
    Yes(String),
    No(String),
    All(Vec<Guard>),
    Any(Vec<Guard>),
    Not(Box<Guard>),
}

impl Guard {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn one_of<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::OneOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn yes(field: impl Into<String>) -> Self {
        Self::Yes(field.into())
    }

    pub fn no(field: impl Into<String>) -> Self {
        Self::No(field.into())
    }

    pub fn and(self, other: Guard) -> Self {
        match self {
            Self::All(mut guards) => {
                guards.push(other);
                Self::All(guards)
            }
            guard => Self::All(vec![guard, other]),
        }
    }

    pub fn evaluate(&self, data: &FormData) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { field, value } => data.equals(field, value),
            Self::OneOf { field, values } => values.iter().any(|value| data.equals(field, value)),
            Self::Yes(field) => data.is_yes(field),
            Self::No(field) => data.is_no(field),
            Self::All(guards) => guards.iter().all(|guard| guard.evaluate(data)),
            Self::Any(guards) => guards.iter().any(|guard| guard.evaluate(data)),
            Self::Not(guard) => !guard.evaluate(data),
        }
    }
}

/// Flows outside any wizard's own step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalFlow {
    FileMotion,
}

impl ExternalFlow {
    pub fn key(self) -> &'static str {
        match self {
            Self::FileMotion => "file_motion",
        }
    }
}

impl fmt::Display for ExternalFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<S> {
    Goto(S),
    Block(String),
    Redirect(ExternalFlow),
}

impl<S> Outcome<S> {
    /// Blocking edges are tried before redirects, redirects before jumps.
    fn precedence(&self) -> u8 {
        match self {
            Self::Block(_) => 0,
            Self::Redirect(_) => 1,
            Self::Goto(_) => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Edge<S> {
    pub from: S,
    pub guard: Guard,
    pub outcome: Outcome<S>,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<S> {
    Step(S),
    Blocked(String),
    Redirect(ExternalFlow),
    End,
}

/// Transition table of `(from, guard) -> outcome` edges layered over the
/// registry's linear order.
#[derive(Debug, Clone)]
pub struct BranchTable<S> {
    edges: Vec<Edge<S>>,
}

impl<S> Default for BranchTable<S> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<S: StepId> BranchTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(mut self, label: &'static str, from: S, guard: Guard, outcome: Outcome<S>) -> Self {
        self.edges.push(Edge {
            from,
            guard,
            outcome,
            label,
        });
        self
    }

    pub fn goto(self, label: &'static str, from: S, guard: Guard, to: S) -> Self {
        self.edge(label, from, guard, Outcome::Goto(to))
    }

    pub fn block(
        self,
        label: &'static str,
        from: S,
        guard: Guard,
        message: impl Into<String>,
    ) -> Self {
        self.edge(label, from, guard, Outcome::Block(message.into()))
    }

    pub fn redirect(self, label: &'static str, from: S, guard: Guard, flow: ExternalFlow) -> Self {
        self.edge(label, from, guard, Outcome::Redirect(flow))
    }

    pub fn edges(&self) -> &[Edge<S>] {
        &self.edges
    }

    /// Edges leaving `from`, in evaluation order.
    pub fn edges_from(&self, from: S) -> Vec<&Edge<S>> {
        let mut edges: Vec<&Edge<S>> = self.edges.iter().filter(|edge| edge.from == from).collect();
        edges.sort_by_key(|edge| edge.outcome.precedence());
        edges
    }

    /// Picks where `go_next` from `from` leads. Falls back to the registry's
    /// literal next step when no edge matches.
    pub fn resolve(&self, from: S, data: &FormData, registry: &StepRegistry<S>) -> Resolution<S> {
        for edge in self.edges_from(from) {
            if !edge.guard.evaluate(data) {
                continue;
            }
            tracing::debug!(step = from.key(), edge = edge.label, "branch edge matched");
            return match &edge.outcome {
                Outcome::Goto(to) => Resolution::Step(*to),
                Outcome::Block(message) => Resolution::Blocked(message.clone()),
                Outcome::Redirect(flow) => Resolution::Redirect(*flow),
            };
        }
        match registry.next_after(from) {
            Some(next) => Resolution::Step(next),
            None => Resolution::End,
        }
    }

    /// Rejects edges that mention steps outside `registry`.
    pub fn check(&self, registry: &StepRegistry<S>) -> Result<(), WizardError> {
        for edge in &self.edges {
            let mut referenced = vec![edge.from];
            if let Outcome::Goto(to) = edge.outcome {
                referenced.push(to);
            }
            if let Some(missing) = referenced.into_iter().find(|step| !registry.contains(*step)) {
                return Err(WizardError::UnregisteredStep {
                    label: edge.label,
                    step: missing.key(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BranchTable, ExternalFlow, Guard, Resolution};
    use crate::core::FormData;
    use crate::error::WizardError;
    use crate::wizard::registry::StepRegistry;
    use crate::wizard::testing::Demo;

    fn registry() -> StepRegistry<Demo> {
        StepRegistry::standard("demo").expect("registry")
    }

    #[test]
    fn falls_back_to_linear_order() {
        let table = BranchTable::<Demo>::new();
        let data = FormData::new();
        assert_eq!(
            table.resolve(Demo::Start, &data, &registry()),
            Resolution::Step(Demo::Middle)
        );
        assert_eq!(table.resolve(Demo::Finish, &data, &registry()), Resolution::End);
    }

    #[test]
    fn block_wins_over_earlier_declared_goto() {
        let table = BranchTable::new()
            .goto("skip", Demo::Start, Guard::Always, Demo::Finish)
            .redirect("motion", Demo::Start, Guard::yes("secret"), ExternalFlow::FileMotion)
            .block("stop", Demo::Start, Guard::yes("bad"), "not allowed");

        let both = FormData::new().with("bad", "yes").with("secret", "yes");
        assert_eq!(
            table.resolve(Demo::Start, &both, &registry()),
            Resolution::Blocked("not allowed".to_string())
        );

        let secret = FormData::new().with("secret", "yes");
        assert_eq!(
            table.resolve(Demo::Start, &secret, &registry()),
            Resolution::Redirect(ExternalFlow::FileMotion)
        );

        assert_eq!(
            table.resolve(Demo::Start, &FormData::new(), &registry()),
            Resolution::Step(Demo::Finish)
        );
    }

    #[test]
    fn same_class_edges_keep_declaration_order() {
        let table = BranchTable::new()
            .block("first", Demo::Middle, Guard::yes("a"), "first")
            .block("second", Demo::Middle, Guard::yes("b"), "second");
        let data = FormData::new().with("a", "yes").with("b", "yes");
        assert_eq!(
            table.resolve(Demo::Middle, &data, &registry()),
            Resolution::Blocked("first".to_string())
        );
    }

    #[test]
    fn guards_combine() {
        let guard = Guard::yes("confidential").and(Guard::no("order"));
        assert!(guard.evaluate(&FormData::new().with("confidential", "yes").with("order", "no")));
        assert!(!guard.evaluate(&FormData::new().with("confidential", "yes")));
        assert!(Guard::one_of("kind", ["physical", "oversized"])
            .evaluate(&FormData::new().with("kind", "Oversized")));
        assert!(Guard::Not(Box::new(Guard::yes("x"))).evaluate(&FormData::new()));
    }

    #[test]
    fn check_rejects_unregistered_targets() {
        let registry = StepRegistry::from_ids("demo", [Demo::Start, Demo::Middle]).expect("registry");
        let table = BranchTable::new().goto("jump", Demo::Start, Guard::Always, Demo::Finish);
        assert_eq!(
            table.check(&registry),
            Err(WizardError::UnregisteredStep {
                label: "jump",
                step: "finish"
            })
        );
    }
}
