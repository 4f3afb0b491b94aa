use crate::endpoint::{EndpointConfig, Mode};
use crate::error::DecodeError;
use crate::loader;
use crate::locator::Root;
use crate::mapping::Record;
use crate::schema::FieldSpec;
use crate::store::FlatStore;
use crate::value::Value;

/// Decodes records of one endpoint out of one store.
///
/// Holds only borrows, so a decoder is cheap to build per call and a store
/// can be shared by any number of decoders across threads.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'s> {
    store: &'s FlatStore,
    root: Root<'s>,
    config: &'s EndpointConfig,
}

impl<'s> Decoder<'s> {
    pub fn new(store: &'s FlatStore, config: &'s EndpointConfig) -> Result<Self, DecodeError> {
        Ok(Self { store, root: Root::locate(store)?, config })
    }

    pub fn store(&self) -> &'s FlatStore {
        self.store
    }

    pub fn root(&self) -> &Root<'s> {
        &self.root
    }

    pub fn config(&self) -> &'s EndpointConfig {
        self.config
    }

    /// Null and the configured sentinels stand for "no value".
    pub fn is_placeholder(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.config.sentinels.iter().any(|sentinel| sentinel == s),
            _ => false,
        }
    }

    /// Walk a field from the first slot it points at: cross the remaining
    /// wrappers, then step into `within` if set.
    ///
    /// `None` when any step lands on a placeholder or the `within` key is
    /// absent; the caller decides whether that is an error.
    pub(crate) fn follow_field(&self, slot: usize, spec: &FieldSpec) -> Result<Option<&'s Value>, DecodeError> {
        let store = self.store;
        let (mut slot, mut value) = (slot, store.resolve(slot)?);
        for _ in 1..spec.hops {
            if self.is_placeholder(value) {
                return Ok(None);
            }
            (slot, value) = store.unwrap_wrapper(slot, value)?;
        }

        if let Some(key) = spec.within {
            if self.is_placeholder(value) {
                return Ok(None);
            }
            let path = store.slot_path(slot);
            let Some(dict) = value.as_dict() else {
                return Err(DecodeError::TypeMismatch {
                    path,
                    expected: "dict",
                    found: value.kind(),
                });
            };
            let Some(reference) = dict.get(key) else {
                return Ok(None);
            };
            value = store.deref(reference, || format!("{path}.{key}"))?.1;
        }

        Ok((!self.is_placeholder(value)).then_some(value))
    }

    fn anchor_slot(&self) -> Result<usize, DecodeError> {
        Ok(self.root.follow(&self.config.anchor, &self.config.descend)?.0)
    }

    /// Decode the single record of a scalar endpoint.
    pub fn one<R: Record>(&self) -> Result<R, DecodeError> {
        if self.config.mode != Mode::Scalar {
            return Err(DecodeError::Config(format!(
                "{} endpoint '{}' yields a sequence, not one record",
                self.config.mode,
                self.config.anchor_path()
            )));
        }
        let slot = self.anchor_slot()?;
        let row = self.scalar_row(slot, R::schema())?;
        let record = R::from_row(&row, self)?;
        tracing::debug!(
            record = R::schema().name,
            anchor = %self.config.anchor_path(),
            fields = row.len(),
            "decoded record"
        );
        Ok(record)
    }

    /// Decode every record of a tabular or listing endpoint, in source order.
    /// Fails as a whole: one bad row fails the call.
    pub fn many<R: Record>(&self) -> Result<Vec<R>, DecodeError> {
        let schema = R::schema();
        let slot = self.anchor_slot()?;
        let rows = match &self.config.mode {
            Mode::Tabular { key_field } => self.tabular_rows(slot, schema, key_field)?,
            Mode::Listing => self.listing_rows(slot, schema)?,
            Mode::Scalar => {
                return Err(DecodeError::Config(format!(
                    "scalar endpoint '{}' yields one record, not a sequence",
                    self.config.anchor_path()
                )));
            }
        };
        let records = rows
            .iter()
            .map(|row| R::from_row(row, self))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            record = schema.name,
            anchor = %self.config.anchor_path(),
            mode = %self.config.mode,
            rows = records.len(),
            "decoded records"
        );
        Ok(records)
    }
}

// ════════════════════════════════════════════════════════════════
//  One-shot entry points
// ════════════════════════════════════════════════════════════════

/// Parse `bytes` and decode the one record of a scalar endpoint.
pub fn decode_one<R: Record>(bytes: &[u8], config: &EndpointConfig) -> Result<R, DecodeError> {
    let store = loader::load(bytes, config.node_index)?;
    Decoder::new(&store, config)?.one()
}

/// Parse `bytes` and decode all records of a tabular or listing endpoint.
pub fn decode_many<R: Record>(bytes: &[u8], config: &EndpointConfig) -> Result<Vec<R>, DecodeError> {
    let store = loader::load(bytes, config.node_index)?;
    Decoder::new(&store, config)?.many()
}
