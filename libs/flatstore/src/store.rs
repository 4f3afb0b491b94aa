use std::collections::BTreeMap;

use crate::error::DecodeError;
use crate::schema::WRAPPER_KEY;
use crate::value::Value;

/// Flat, index-addressed value array of one document.
///
/// Built once per response and never mutated. `origin` is the document path
/// the array was taken from (`nodes[2].data`) and prefixes every error path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatStore {
    values: Vec<Value>,
    origin: String,
}

impl FlatStore {
    pub fn new(values: Vec<Value>, origin: impl Into<String>) -> Self {
        Self { values, origin: origin.into() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Document path of a slot: `nodes[2].data[17]`.
    pub fn slot_path(&self, index: usize) -> String {
        format!("{}[{index}]", self.origin)
    }

    // ════════════════════════════════════════════════════════════
    //  Single references
    // ════════════════════════════════════════════════════════════

    /// Value at `index`. Never clamps.
    pub fn resolve(&self, index: usize) -> Result<&Value, DecodeError> {
        self.values.get(index).ok_or_else(|| DecodeError::IndexOutOfRange {
            path: self.origin.clone(),
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.values.len(),
        })
    }

    /// Interpret `reference` as an index into the store.
    ///
    /// `at` names the location holding the reference and is only evaluated
    /// on failure.
    pub fn index_of(&self, reference: &Value, at: impl FnOnce() -> String) -> Result<usize, DecodeError> {
        let Some(index) = reference.as_i64() else {
            return Err(DecodeError::TypeMismatch {
                path: at(),
                expected: "index",
                found: reference.kind(),
            });
        };
        match usize::try_from(index) {
            Ok(i) if i < self.values.len() => Ok(i),
            _ => Err(DecodeError::IndexOutOfRange {
                path: at(),
                index,
                len: self.values.len(),
            }),
        }
    }

    /// Follow one reference: index plus the value it points at.
    pub fn deref(&self, reference: &Value, at: impl FnOnce() -> String) -> Result<(usize, &Value), DecodeError> {
        let index = self.index_of(reference, at)?;
        Ok((index, &self.values[index]))
    }

    /// Cross one `{"value": index}` wrapper dict sitting at `slot`.
    pub fn unwrap_wrapper(&self, slot: usize, value: &Value) -> Result<(usize, &Value), DecodeError> {
        let path = self.slot_path(slot);
        let Value::Dict(dict) = value else {
            return Err(DecodeError::TypeMismatch {
                path,
                expected: "wrapper dict {\"value\": index}",
                found: value.kind(),
            });
        };
        let Some(inner) = dict.get(WRAPPER_KEY) else {
            return Err(DecodeError::MissingField { path, field: WRAPPER_KEY.to_string() });
        };
        self.deref(inner, || format!("{path}.{WRAPPER_KEY}"))
    }

    /// Descriptor dict at `index`.
    pub fn dict_at(&self, index: usize) -> Result<&BTreeMap<String, Value>, DecodeError> {
        let value = self.resolve(index)?;
        value.as_dict().ok_or_else(|| DecodeError::TypeMismatch {
            path: self.slot_path(index),
            expected: "dict",
            found: value.kind(),
        })
    }

    // ════════════════════════════════════════════════════════════
    //  Columns
    // ════════════════════════════════════════════════════════════

    /// Slots referenced by the column at `index`. Every element must be an
    /// in-bounds index; the first that is not names its position.
    pub fn column_slots(&self, index: usize) -> Result<Vec<usize>, DecodeError> {
        let value = self.resolve(index)?;
        let Value::List(items) = value else {
            return Err(DecodeError::TypeMismatch {
                path: self.slot_path(index),
                expected: "column (list of indices)",
                found: value.kind(),
            });
        };
        items
            .iter()
            .enumerate()
            .map(|(pos, item)| self.index_of(item, || format!("{}[{pos}]", self.slot_path(index))))
            .collect()
    }

    /// Values referenced by the column at `index`, in column order.
    pub fn resolve_column(&self, index: usize) -> Result<Vec<&Value>, DecodeError> {
        Ok(self
            .column_slots(index)?
            .into_iter()
            .map(|slot| &self.values[slot])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn store(values: serde_json::Value) -> FlatStore {
        let Value::List(values) = Value::from(values) else {
            panic!("fixture must be a list");
        };
        FlatStore::new(values, "nodes[2].data")
    }

    #[test]
    fn resolve_is_bounds_checked() {
        let s = store(json!(["a", "b"]));
        assert_eq!(s.resolve(1).unwrap().as_str(), Some("b"));
        let err = s.resolve(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn negative_and_fractional_references_are_rejected() {
        let s = store(json!(["a"]));
        let err = s.index_of(&Value::from(json!(-1)), || "x".into()).unwrap_err();
        assert_eq!(err, DecodeError::IndexOutOfRange { path: "x".into(), index: -1, len: 1 });
        let err = s.index_of(&Value::from(json!(0.5)), || "x".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        let err = s.index_of(&Value::from(json!("0")), || "x".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn column_resolves_in_order() {
        let s = store(json!([[2, 3, 2], 0, "q1", "q2"]));
        let values: Vec<_> = s.resolve_column(0).unwrap().into_iter().map(|v| v.as_str()).collect();
        assert_eq!(values, [Some("q1"), Some("q2"), Some("q1")]);
    }

    #[test]
    fn column_element_that_is_not_an_index_names_its_position() {
        let s = store(json!([[2, "oops"], 0, "q1"]));
        let err = s.resolve_column(0).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                path: "nodes[2].data[0][1]".into(),
                expected: "index",
                found: crate::ValueKind::String,
            }
        );
    }

    #[test]
    fn column_must_be_a_list() {
        let s = store(json!([7]));
        assert_eq!(s.resolve_column(0).unwrap_err().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn two_hops_cross_the_wrapper() {
        let s = store(json!([{"value": 2}, 0, "Semiconductors"]));
        let (slot, value) = s.unwrap_wrapper(0, &s.values()[0]).unwrap();
        assert_eq!(slot, 2);
        assert_eq!(value.as_str(), Some("Semiconductors"));
    }

    #[test]
    fn broken_wrapper_is_reported() {
        let s = store(json!([{"label": 1}, "x"]));
        let err = s.unwrap_wrapper(0, &s.values()[0]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField { path: "nodes[2].data[0]".into(), field: "value".into() }
        );
    }

    #[test]
    fn store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlatStore>();
    }
}
