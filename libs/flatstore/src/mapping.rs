use std::slice;

use serde::{Deserialize, Serialize};

use crate::decode::Decoder;
use crate::error::DecodeError;
use crate::row::Row;
use crate::schema::{FieldSpec, Kind, RecordSchema};
use crate::value::Value;

// ════════════════════════════════════════════════════════════════
//  Record
// ════════════════════════════════════════════════════════════════

/// A typed record decoded from one row.
///
/// Normally generated by [`flat_record!`](crate::flat_record), which keeps the
/// schema and the struct in one declaration.
pub trait Record: Sized {
    fn schema() -> &'static RecordSchema;

    fn from_row(row: &Row<'_>, decoder: &Decoder<'_>) -> Result<Self, DecodeError>;
}

/// What a field mapper sees besides the value itself.
pub struct FieldCx<'a> {
    pub spec: &'static FieldSpec,
    pub row: &'a Row<'a>,
    pub decoder: &'a Decoder<'a>,
}

impl FieldCx<'_> {
    /// `TypeCoercion` for this field.
    pub fn mismatch(&self, found: impl Into<String>) -> DecodeError {
        DecodeError::TypeCoercion {
            path: format!("{}.{}", self.row.path(), self.spec.source),
            field: self.spec.target.to_string(),
            expected: self.spec.kind,
            found: found.into(),
        }
    }
}

/// Map the next field of a record's schema. The generated `from_row` calls
/// this once per struct field, in declaration order.
pub fn map_next<T: FieldValue>(
    specs: &mut slice::Iter<'static, FieldSpec>,
    row: &Row<'_>,
    decoder: &Decoder<'_>,
) -> Result<T, DecodeError> {
    let Some(spec) = specs.next() else {
        return Err(DecodeError::Config("record has more fields than its schema".into()));
    };
    let cx = FieldCx { spec, row, decoder };
    T::map(row.get(spec.source), &cx)
}

// ════════════════════════════════════════════════════════════════
//  FieldValue
// ════════════════════════════════════════════════════════════════

/// A Rust type a field can be mapped into.
///
/// `None` means the field was missing from the row; every implementation
/// answers it with its zero value.
pub trait FieldValue: Sized {
    const KIND: Kind;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError>;
}

impl FieldValue for String {
    const KIND: Kind = Kind::String;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError> {
        match value {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(cx.mismatch(other.kind().to_string())),
        }
    }
}

impl FieldValue for i64 {
    const KIND: Kind = Kind::Int;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError> {
        match value {
            None => Ok(0),
            Some(Value::Number(n)) => integral(n).ok_or_else(|| cx.mismatch(format!("non-integral number {n}"))),
            Some(other) => Err(cx.mismatch(other.kind().to_string())),
        }
    }
}

impl FieldValue for f64 {
    const KIND: Kind = Kind::Float;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError> {
        match value {
            None => Ok(0.0),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| cx.mismatch(format!("number {n}"))),
            Some(other) => Err(cx.mismatch(other.kind().to_string())),
        }
    }
}

impl FieldValue for bool {
    const KIND: Kind = Kind::Bool;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError> {
        match value {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(cx.mismatch(other.kind().to_string())),
        }
    }
}

fn integral(n: &serde_json::Number) -> Option<i64> {
    Value::Number(n.clone()).as_i64()
}

/// A list of indices, each pointing at a nested record's descriptor.
impl<R: Record> FieldValue for Vec<R> {
    const KIND: Kind = Kind::Records;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError> {
        let items = match value {
            None => return Ok(Vec::new()),
            Some(Value::List(items)) => items,
            Some(other) => return Err(cx.mismatch(other.kind().to_string())),
        };
        let store = cx.decoder.store();
        items
            .iter()
            .enumerate()
            .map(|(pos, item)| {
                let slot = store.index_of(item, || format!("{}.{}[{pos}]", cx.row.path(), cx.spec.source))?;
                let row = cx.decoder.scalar_row(slot, R::schema())?;
                R::from_row(&row, cx.decoder)
            })
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════
//  LabeledPairs
// ════════════════════════════════════════════════════════════════

/// Ordered `[label, value]` pairs, e.g. an ETF info table.
///
/// Upstream each pair is a list of two indices. Numeric values are kept in
/// their textual form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabeledPairs(pub Vec<(String, String)>);

impl LabeledPairs {
    /// Value of the first pair labelled `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

impl FieldValue for LabeledPairs {
    const KIND: Kind = Kind::Pairs;

    fn map(value: Option<&Value>, cx: &FieldCx<'_>) -> Result<Self, DecodeError> {
        let items = match value {
            None => return Ok(Self::default()),
            Some(Value::List(items)) => items,
            Some(other) => return Err(cx.mismatch(other.kind().to_string())),
        };
        let store = cx.decoder.store();
        let mut pairs = Vec::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            let (slot, pair) = store.deref(item, || format!("{}.{}[{pos}]", cx.row.path(), cx.spec.source))?;
            let [label, value] = match pair.as_list() {
                Some([label, value, ..]) => [label, value],
                _ => return Err(cx.mismatch(format!("{} at {}", pair.kind(), store.slot_path(slot)))),
            };
            let pair_path = store.slot_path(slot);
            let (_, label) = store.deref(label, || format!("{pair_path}[0]"))?;
            let (_, value) = store.deref(value, || format!("{pair_path}[1]"))?;
            pairs.push((pair_text(label, cx)?, pair_text(value, cx)?));
        }
        Ok(Self(pairs))
    }
}

fn pair_text(value: &Value, cx: &FieldCx<'_>) -> Result<String, DecodeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(cx.mismatch(other.kind().to_string())),
    }
}
