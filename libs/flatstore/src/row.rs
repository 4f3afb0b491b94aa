use std::collections::BTreeMap;

use crate::value::Value;

/// One decoded row: upstream field name → resolved value.
///
/// Borrowed from the store; only lives between decoding and mapping.
/// A field absent from the row is "missing" to the mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'s> {
    path: String,
    values: BTreeMap<&'static str, &'s Value>,
}

impl<'s> Row<'s> {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), values: BTreeMap::new() }
    }

    /// Document path the row was decoded from, used in mapping errors.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn insert(&mut self, field: &'static str, value: &'s Value) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&'s Value> {
        self.values.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &'s Value)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}
