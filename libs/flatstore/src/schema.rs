use serde::Serialize;

/// Key of the one-entry wrapper dict crossed by every extra hop:
/// `{"value": index}`.
pub const WRAPPER_KEY: &str = "value";

// ════════════════════════════════════════════════════════════════
//  Kind
// ════════════════════════════════════════════════════════════════

/// Target kind of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Int,
    Float,
    Bool,
    /// List of nested records, each decoded from its own descriptor.
    Records,
    /// List of `[label, value]` string pairs.
    Pairs,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::String => write!(f, "string"),
            Kind::Int => write!(f, "int"),
            Kind::Float => write!(f, "float"),
            Kind::Bool => write!(f, "bool"),
            Kind::Records => write!(f, "records"),
            Kind::Pairs => write!(f, "pairs"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  FieldSpec
// ════════════════════════════════════════════════════════════════

/// Whether a descriptor must carry the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Absent from the descriptor → `MissingField`, decode aborts.
    Required,
    /// Absent → the mapper supplies the kind's zero value.
    Optional,
}

/// Which descriptor a field is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The endpoint descriptor reached through the anchor.
    Descriptor,
    /// The root descriptor at slot 0.
    Root,
}

/// One entry of a mapper table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Upstream field name in the descriptor.
    pub source: &'static str,
    /// Field name on the typed record.
    pub target: &'static str,
    pub kind: Kind,
    pub presence: Presence,
    /// Number of index indirections to reach the value (1 = direct).
    pub hops: u8,
    pub scope: Scope,
    /// Key of a dict to step into after the last hop: the value sits at
    /// `data[resolved[within]]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within: Option<&'static str>,
}

/// Optional field named `source` upstream.
pub const fn optional(source: &'static str) -> FieldSpec {
    FieldSpec {
        source,
        target: source,
        kind: Kind::String,
        presence: Presence::Optional,
        hops: 1,
        scope: Scope::Descriptor,
        within: None,
    }
}

/// Required field named `source` upstream.
pub const fn required(source: &'static str) -> FieldSpec {
    FieldSpec { presence: Presence::Required, ..optional(source) }
}

impl FieldSpec {
    /// Set the hop count. Zero is treated as one.
    pub const fn hops(self, hops: u8) -> Self {
        let hops = if hops == 0 { 1 } else { hops };
        Self { hops, ..self }
    }

    /// Look the field up in the root descriptor instead of the anchor's.
    pub const fn from_root(self) -> Self {
        Self { scope: Scope::Root, ..self }
    }

    /// Step into `key` of the dict the field resolves to, e.g. the
    /// `holdings` list inside `{"count": .., "holdings": ..}`.
    pub const fn within(self, key: &'static str) -> Self {
        Self { within: Some(key), ..self }
    }

    /// Attach the record-side name and kind. Used by [`flat_record!`](crate::flat_record).
    pub const fn bind(self, target: &'static str, kind: Kind) -> Self {
        Self { target, kind, ..self }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

// ════════════════════════════════════════════════════════════════
//  RecordSchema
// ════════════════════════════════════════════════════════════════

/// Static mapper table of one record type.
///
/// Field order matches the record's declaration order.
#[derive(Debug, Serialize)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, target: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.target == target)
    }

    pub fn by_source(&self, source: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.source == source)
    }

    pub fn required(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.is_required())
    }
}
