use std::collections::BTreeMap;

use crate::decode::Decoder;
use crate::error::DecodeError;
use crate::row::Row;
use crate::schema::{FieldSpec, RecordSchema, Scope};
use crate::value::Value;

impl<'s> Decoder<'s> {
    /// Decode the descriptor at `slot` (field → value index) into one row.
    ///
    /// Required fields must be present; optional ones that are absent, null
    /// or a sentinel (at any hop) are left out of the row.
    pub fn scalar_row(&self, slot: usize, schema: &RecordSchema) -> Result<Row<'s>, DecodeError> {
        let store = self.store();
        let descriptor = store.dict_at(slot)?;
        let path = store.slot_path(slot);

        let mut row = Row::new(path.clone());
        for spec in schema.fields {
            if let Some(value) = self.scalar_field(descriptor, &path, spec)? {
                row.insert(spec.source, value);
            }
        }
        Ok(row)
    }

    fn scalar_field(
        &self,
        descriptor: &'s BTreeMap<String, Value>,
        path: &str,
        spec: &FieldSpec,
    ) -> Result<Option<&'s Value>, DecodeError> {
        let root_path;
        let (descriptor, path) = match spec.scope {
            Scope::Descriptor => (descriptor, path),
            Scope::Root => {
                root_path = self.root().path();
                (self.root().fields(), root_path.as_str())
            }
        };

        let Some(reference) = descriptor.get(spec.source) else {
            self.check_missing(spec, path)?;
            return Ok(None);
        };
        let slot = self
            .store()
            .index_of(reference, || format!("{path}.{}", spec.source))?;

        let value = self.follow_field(slot, spec)?;
        if value.is_none() {
            self.check_missing(spec, path)?;
        }
        Ok(value)
    }

    /// A missing field is only an error when it is required.
    pub(crate) fn check_missing(&self, spec: &FieldSpec, path: &str) -> Result<(), DecodeError> {
        if spec.is_required() {
            return Err(DecodeError::MissingField {
                path: path.to_string(),
                field: spec.source.to_string(),
            });
        }
        tracing::trace!(field = spec.source, %path, "optional field missing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointConfig;
    use crate::error::ErrorKind;
    use crate::schema::{optional, required, Kind};
    use crate::store::FlatStore;
    use serde_json::json;

    static PROFILE: RecordSchema = RecordSchema {
        name: "Profile",
        fields: &[
            required("name").bind("name", Kind::String),
            optional("industry").hops(2).bind("industry", Kind::String),
            optional("founded").bind("founded", Kind::Int),
            optional("description").from_root().bind("description", Kind::String),
        ],
    };

    fn store(values: serde_json::Value) -> FlatStore {
        let Value::List(values) = Value::from(values) else {
            panic!("fixture must be a list");
        };
        FlatStore::new(values, "nodes[2].data")
    }

    #[test]
    fn resolves_direct_two_hop_and_root_fields() {
        let s = store(json!([
            {"profile": 1, "description": 6},
            {"name": 2, "industry": 3, "founded": 5},
            "NVIDIA",
            {"value": 4},
            "Semiconductors",
            1993,
            "Designs GPUs."
        ]));
        let cfg = EndpointConfig::scalar(2, "profile");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let row = decoder.scalar_row(1, &PROFILE).unwrap();
        assert_eq!(row.get("name").unwrap().as_str(), Some("NVIDIA"));
        assert_eq!(row.get("industry").unwrap().as_str(), Some("Semiconductors"));
        assert_eq!(row.get("founded").unwrap().as_i64(), Some(1993));
        assert_eq!(row.get("description").unwrap().as_str(), Some("Designs GPUs."));
    }

    #[test]
    fn absent_optional_fields_are_left_out() {
        let s = store(json!([{"profile": 1}, {"name": 2}, "NVIDIA"]));
        let cfg = EndpointConfig::scalar(2, "profile");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let row = decoder.scalar_row(1, &PROFILE).unwrap();
        assert_eq!(row.len(), 1);
        assert!(!row.contains("industry"));
    }

    #[test]
    fn sentinel_and_null_count_as_missing() {
        let s = store(json!([{"profile": 1}, {"name": 2, "industry": 3, "founded": 4}, "NVIDIA", {"value": 5}, null, "[PRO]"]));
        let cfg = EndpointConfig::scalar(2, "profile");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let row = decoder.scalar_row(1, &PROFILE).unwrap();
        assert!(!row.contains("industry"));
        assert!(!row.contains("founded"));
    }

    #[test]
    fn placeholder_before_the_wrapper_counts_as_missing() {
        let s = store(json!([{"profile": 1}, {"name": 2, "industry": 3}, "NVIDIA", null]));
        let cfg = EndpointConfig::scalar(2, "profile");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let row = decoder.scalar_row(1, &PROFILE).unwrap();
        assert_eq!(row.len(), 1);
        assert!(!row.contains("industry"));

        static WRAPPED_NAME: RecordSchema = RecordSchema {
            name: "Profile",
            fields: &[required("name").hops(2).bind("name", Kind::String)],
        };
        let s = store(json!([{"profile": 1}, {"name": 2}, "[PRO]"]));
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let err = decoder.scalar_row(1, &WRAPPED_NAME).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField { path: "nodes[2].data[1]".into(), field: "name".into() }
        );
    }

    #[test]
    fn within_steps_into_a_dict() {
        static HOLDINGS: RecordSchema = RecordSchema {
            name: "Etf",
            fields: &[optional("holdingsTable").within("holdings").bind("top", Kind::Records)],
        };
        let s = store(json!([{"data": 1}, {"holdingsTable": 2}, {"count": 3, "holdings": 4}, 2, []]));
        let cfg = EndpointConfig::scalar(2, "data");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let row = decoder.scalar_row(1, &HOLDINGS).unwrap();
        assert_eq!(row.get("holdingsTable"), Some(&Value::List(vec![])));

        let s = store(json!([{"data": 1}, {"holdingsTable": 2}, {"count": 3}, 0]));
        let decoder = Decoder::new(&s, &cfg).unwrap();
        assert!(decoder.scalar_row(1, &HOLDINGS).unwrap().is_empty());

        let s = store(json!([{"data": 1}, {"holdingsTable": 2}, [3]]));
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let err = decoder.scalar_row(1, &HOLDINGS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path(), Some("nodes[2].data[2]"));
    }

    #[test]
    fn missing_required_field_aborts() {
        let s = store(json!([{"profile": 1}, {"founded": 2}, 1993]));
        let cfg = EndpointConfig::scalar(2, "profile");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let err = decoder.scalar_row(1, &PROFILE).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField { path: "nodes[2].data[1]".into(), field: "name".into() }
        );
    }

    #[test]
    fn field_index_out_of_range() {
        let s = store(json!([{"profile": 1}, {"name": 9}]));
        let cfg = EndpointConfig::scalar(2, "profile");
        let decoder = Decoder::new(&s, &cfg).unwrap();
        let err = decoder.scalar_row(1, &PROFILE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(err.path(), Some("nodes[2].data[1].name"));
    }
}
