//! Column-name to value map used for inserts, updates and query rows.

use rusqlite::types::Value;
use std::collections::btree_map::{self, BTreeMap};

/// Ordered column -> value map.
///
/// Keys are column names. Ordering is by key so generated SQL is
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentValues {
    entries: BTreeMap<String, Value>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one column value.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(column.into(), value.into());
    }

    /// Builder-style variant of [`ContentValues::put`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(column, value);
        self
    }

    pub fn put_null(&mut self, column: impl Into<String>) {
        self.entries.insert(column.into(), Value::Null);
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.entries.remove(column)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries.get(column)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Reads a column as text.
    ///
    /// Numbers are rendered in decimal form. Returns `None` when the column is
    /// absent, null or a blob.
    pub fn get_as_string(&self, column: &str) -> Option<String> {
        match self.entries.get(column)? {
            Value::Text(text) => Some(text.clone()),
            Value::Integer(value) => Some(value.to_string()),
            Value::Real(value) => Some(value.to_string()),
            Value::Null | Value::Blob(_) => None,
        }
    }

    /// Reads a column as an integer.
    ///
    /// Accepts integers, integral reals and text that parses as an integer.
    /// Returns `None` when the column is absent or cannot be converted.
    pub fn get_as_integer(&self, column: &str) -> Option<i64> {
        match self.entries.get(column)? {
            Value::Integer(value) => Some(*value),
            Value::Real(value) => real_to_integer(*value),
            Value::Text(text) => text.parse::<i64>().ok(),
            Value::Null | Value::Blob(_) => None,
        }
    }
}

impl<'a> IntoIterator for &'a ContentValues {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContentValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (column, value) in iter {
            values.put(column, value);
        }
        values
    }
}

fn real_to_integer(value: f64) -> Option<i64> {
    if value.fract() != 0.0 || !value.is_finite() {
        return None;
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::ContentValues;
    use rusqlite::types::Value;

    #[test]
    fn get_as_integer_accepts_numeric_text_and_integral_reals() {
        let values = ContentValues::new()
            .with("a", 7_i64)
            .with("b", "12".to_string())
            .with("c", 3.0_f64)
            .with("d", 3.5_f64)
            .with("e", "abc".to_string());

        assert_eq!(values.get_as_integer("a"), Some(7));
        assert_eq!(values.get_as_integer("b"), Some(12));
        assert_eq!(values.get_as_integer("c"), Some(3));
        assert_eq!(values.get_as_integer("d"), None);
        assert_eq!(values.get_as_integer("e"), None);
        assert_eq!(values.get_as_integer("missing"), None);
    }

    #[test]
    fn get_as_string_renders_numbers_and_skips_null() {
        let mut values = ContentValues::new().with("n", 42_i64);
        values.put_null("empty");

        assert_eq!(values.get_as_string("n").as_deref(), Some("42"));
        assert_eq!(values.get_as_string("empty"), None);
        assert!(values.contains_key("empty"));
        assert_eq!(values.get("empty"), Some(&Value::Null));
    }
}
