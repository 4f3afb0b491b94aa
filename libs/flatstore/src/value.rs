use std::collections::BTreeMap;
use std::fmt;

/// Canonical value of one flat-store slot.
///
/// Every slot of a `__data.json` store holds exactly one of these. Dicts and
/// lists found inside the store normally carry indices into the store rather
/// than the values themselves; the resolver follows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Kept as `serde_json::Number` so integers and floats survive untouched.
    Number(serde_json::Number),
    String(String),
    Dict(BTreeMap<String, Value>),
    List(Vec<Value>),
}

/// Discriminant of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Dict,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => f.write_str("null"),
            ValueKind::Bool => f.write_str("bool"),
            ValueKind::Number => f.write_str("number"),
            ValueKind::String => f.write_str("string"),
            ValueKind::Dict => f.write_str("dict"),
            ValueKind::List => f.write_str("list"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Dict(_) => ValueKind::Dict,
            Value::List(_) => ValueKind::List,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Integer view of a number. Floats qualify only when they have no
    /// fractional part and fit into `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        let Value::Number(n) = self else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
        let f = n.as_f64()?;
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Dict(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
