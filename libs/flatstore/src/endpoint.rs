use serde::{Deserialize, Serialize};

/// Placeholder the upstream puts in place of premium-gated values.
pub const PREMIUM_SENTINEL: &str = "[PRO]";

// ═══════════════════════════════════════════════════════════════
//  Mode
// ═══════════════════════════════════════════════════════════════

/// How the anchor descriptor is turned into rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    /// Descriptor maps field → value index; one record.
    Scalar,
    /// Descriptor maps field → column index; `key_field`'s column length is
    /// the row count.
    Tabular { key_field: String },
    /// Anchor points at a list of indices, each a per-row scalar descriptor.
    Listing,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Scalar => write!(f, "scalar"),
            Mode::Tabular { key_field } => write!(f, "tabular(key={key_field})"),
            Mode::Listing => write!(f, "listing"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  EndpointConfig
// ═══════════════════════════════════════════════════════════════

/// Everything that varies between endpoints. The record schema is the
/// remaining parameter and comes from the record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Position in `nodes` of the node carrying the data (1 or 2 upstream).
    pub node_index: usize,
    /// Root descriptor field pointing at the endpoint descriptor.
    pub anchor: String,
    /// Further dict keys to follow after the anchor.
    #[serde(default)]
    pub descend: Vec<String>,
    #[serde(flatten)]
    pub mode: Mode,
    /// String values treated as missing.
    #[serde(default = "default_sentinels")]
    pub sentinels: Vec<String>,
}

fn default_sentinels() -> Vec<String> {
    vec![PREMIUM_SENTINEL.to_string()]
}

impl EndpointConfig {
    pub fn scalar(node_index: usize, anchor: impl Into<String>) -> Self {
        Self::new(node_index, anchor, Mode::Scalar)
    }

    pub fn tabular(node_index: usize, anchor: impl Into<String>, key_field: impl Into<String>) -> Self {
        Self::new(node_index, anchor, Mode::Tabular { key_field: key_field.into() })
    }

    pub fn listing(node_index: usize, anchor: impl Into<String>) -> Self {
        Self::new(node_index, anchor, Mode::Listing)
    }

    fn new(node_index: usize, anchor: impl Into<String>, mode: Mode) -> Self {
        Self {
            node_index,
            anchor: anchor.into(),
            descend: Vec::new(),
            mode,
            sentinels: default_sentinels(),
        }
    }

    pub fn descend(mut self, keys: &[&str]) -> Self {
        self.descend = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// `financialData` or `estimates.table.quarterly`.
    pub fn anchor_path(&self) -> String {
        std::iter::once(self.anchor.as_str())
            .chain(self.descend.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}
