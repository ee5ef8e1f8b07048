use crate::core::{FieldId, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field values accumulated across every step visited in one wizard session.
///
/// Writes are shallow and last-write-wins per key. Keys are never removed
/// once written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: IndexMap<FieldId, Value>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style single write, handy for constructing partial updates.
    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.set(id, value);
        self
    }

    /// Writes one field and reports whether the stored value changed.
    pub fn set(&mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> bool {
        let id = id.into();
        let value = value.into();
        let changed = self
            .values
            .get(id.as_str())
            .is_none_or(|current| current != &value);
        self.values.insert(id, value);
        changed
    }

    /// Shallow-merges `partial` into this map and returns the keys whose
    /// value actually changed, in merge order.
    pub fn merge(&mut self, partial: FormData) -> Vec<FieldId> {
        let mut changed = Vec::new();
        for (id, value) in partial.values {
            if self.set(id.clone(), value) {
                changed.push(id);
            }
        }
        changed
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Value::as_text)
    }

    pub fn is_yes(&self, id: &str) -> bool {
        self.get(id).is_some_and(Value::is_yes)
    }

    pub fn is_no(&self, id: &str) -> bool {
        self.get(id).is_some_and(Value::is_no)
    }

    /// `true` when the field is absent or holds an empty value.
    pub fn is_blank(&self, id: &str) -> bool {
        self.get(id).is_none_or(Value::is_empty)
    }

    /// Case-insensitive comparison of the field's text form.
    pub fn equals(&self, id: &str, expected: &str) -> bool {
        self.get(id)
            .is_some_and(|value| value.to_text().trim().eq_ignore_ascii_case(expected))
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(FieldId::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<FieldId>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut data = Self::new();
        for (id, value) in iter {
            data.set(id, value);
        }
        data
    }
}
