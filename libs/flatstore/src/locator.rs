use std::collections::BTreeMap;

use crate::error::DecodeError;
use crate::store::FlatStore;
use crate::value::Value;

/// Slot of the root descriptor.
pub const ROOT_SLOT: usize = 0;

/// Root descriptor of a store: the dict at slot 0 whose fields point at the
/// endpoint-specific descriptors (`financialData`, `sectors`, `profile`, ...).
#[derive(Debug, Clone, Copy)]
pub struct Root<'s> {
    store: &'s FlatStore,
    fields: &'s BTreeMap<String, Value>,
}

impl<'s> Root<'s> {
    pub fn locate(store: &'s FlatStore) -> Result<Self, DecodeError> {
        let path = store.slot_path(ROOT_SLOT);
        let Some(value) = store.values().get(ROOT_SLOT) else {
            return Err(DecodeError::structural(path, "missing root descriptor"));
        };
        let Some(fields) = value.as_dict() else {
            return Err(DecodeError::structural(
                path,
                format!("root descriptor is {}, expected dict", value.kind()),
            ));
        };
        Ok(Self { store, fields })
    }

    pub fn fields(&self) -> &'s BTreeMap<String, Value> {
        self.fields
    }

    pub fn path(&self) -> String {
        self.store.slot_path(ROOT_SLOT)
    }

    /// Follow the anchor field `name` to the slot it points at.
    pub fn anchor(&self, name: &str) -> Result<(usize, &'s Value), DecodeError> {
        follow_key(self.store, ROOT_SLOT, self.fields, name)
    }

    /// Follow the anchor, then descend through `keys`, each a dict field
    /// holding the index of the next dict.
    ///
    /// - `anchor = "financialData"` → `data[data[0].financialData]`
    /// - `anchor = "estimates", keys = ["table", "quarterly"]`
    ///   → `data[data[data[data[0].estimates].table].quarterly]`
    pub fn follow(&self, anchor: &str, keys: &[String]) -> Result<(usize, &'s Value), DecodeError> {
        let (mut slot, mut value) = self.anchor(anchor)?;
        for key in keys {
            let Some(dict) = value.as_dict() else {
                return Err(DecodeError::structural(
                    self.store.slot_path(slot),
                    format!("expected dict to descend into '{key}', found {}", value.kind()),
                ));
            };
            (slot, value) = follow_key(self.store, slot, dict, key)?;
        }
        Ok((slot, value))
    }
}

fn follow_key<'s>(
    store: &'s FlatStore,
    slot: usize,
    dict: &'s BTreeMap<String, Value>,
    key: &str,
) -> Result<(usize, &'s Value), DecodeError> {
    let path = format!("{}.{key}", store.slot_path(slot));
    let Some(reference) = dict.get(key) else {
        return Err(DecodeError::structural(path, "anchor field missing"));
    };
    match reference {
        Value::Number(_) if reference.as_i64().is_some() => {}
        Value::Number(_) => return Err(DecodeError::structural(path, "not an integral index")),
        _ => return Err(DecodeError::structural(path, "not a number")),
    }
    store.deref(reference, || path)
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
    fn anchor_points_at_descriptor() {
        let s = store(json!([{"financialData": 1}, {"datekey": 2}, []]));
        let root = Root::locate(&s).unwrap();
        let (slot, value) = root.anchor("financialData").unwrap();
        assert_eq!(slot, 1);
        assert!(value.as_dict().is_some());
    }

    #[test]
    fn missing_anchor_names_the_field() {
        let s = store(json!([{"industries": 1}, []]));
        let err = Root::locate(&s).unwrap().anchor("sectors").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.path(), Some("nodes[2].data[0].sectors"));
    }

    #[test]
    fn fractional_anchor_is_structural() {
        let s = store(json!([{"financialData": 1.5}, {}, {}]));
        let err = Root::locate(&s).unwrap().anchor("financialData").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.to_string(), "nodes[2].data[0].financialData: not an integral index");
    }

    #[test]
    fn non_numeric_anchor() {
        let s = store(json!([{"financialData": "1"}]));
        let err = Root::locate(&s).unwrap().anchor("financialData").unwrap_err();
        assert_eq!(err.to_string(), "nodes[2].data[0].financialData: not a number");
    }

    #[test]
    fn anchor_out_of_range() {
        let s = store(json!([{"profile": 40}]));
        let err = Root::locate(&s).unwrap().anchor("profile").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn root_must_be_a_dict() {
        let s = store(json!([[1, 2]]));
        assert_eq!(Root::locate(&s).unwrap_err().kind(), ErrorKind::Structural);
        let empty = FlatStore::new(Vec::new(), "nodes[1].data");
        assert_eq!(Root::locate(&empty).unwrap_err().path(), Some("nodes[1].data[0]"));
    }

    #[test]
    fn descends_through_nested_dicts() {
        let s = store(json!([
            {"estimates": 1},
            {"table": 2},
            {"quarterly": 3, "annual": 4},
            {"eps": 5},
            {"eps": 5},
            []
        ]));
        let root = Root::locate(&s).unwrap();
        let keys = vec!["table".to_string(), "quarterly".to_string()];
        assert_eq!(root.follow("estimates", &keys).unwrap().0, 3);

        let bad = vec!["table".to_string(), "monthly".to_string()];
        let err = root.follow("estimates", &bad).unwrap_err();
        assert_eq!(err.path(), Some("nodes[2].data[2].monthly"));
    }
}
