use serde::{Deserialize, Serialize};

/// A single field value as collected by a form input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::List(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The separate entries of a multi-item answer. Lists are taken as
    /// stored; text is split on commas the way the files input splits it.
    pub fn items(&self) -> Vec<String> {
        match self {
            Self::List(v) => v.clone(),
            Self::Text(v) => v
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(ToString::to_string)
                .collect(),
            Self::None => Vec::new(),
            other => vec![other.to_text()],
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// `true` for `Bool(true)` or a text answer of "yes".
    pub fn is_yes(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            Self::Text(v) => v.trim().eq_ignore_ascii_case("yes"),
            _ => false,
        }
    }

    /// `true` for `Bool(false)` or a text answer of "no". `None` is neither.
    pub fn is_no(&self) -> bool {
        match self {
            Self::Bool(v) => !*v,
            Self::Text(v) => v.trim().eq_ignore_ascii_case("no"),
            _ => false,
        }
    }

    /// Flattens the value into the text a field validator sees.
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Bool(true) => "yes".to_string(),
            Self::Bool(false) => "no".to_string(),
            Self::Number(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::List(v) => v.join(", "),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
