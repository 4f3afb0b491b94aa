use crate::decode::Decoder;
use crate::error::DecodeError;
use crate::row::Row;
use crate::schema::{RecordSchema, Scope};

impl<'s> Decoder<'s> {
    /// Transpose the column descriptor at `slot` into rows.
    ///
    /// The key field's column length is the row count. Shorter columns leave
    /// the field out of the trailing rows; longer ones are cut. Row order is
    /// column order. A required field missing from a row fails the table.
    pub fn tabular_rows(
        &self,
        slot: usize,
        schema: &RecordSchema,
        key_field: &str,
    ) -> Result<Vec<Row<'s>>, DecodeError> {
        let store = self.store();
        let descriptor = store.dict_at(slot)?;
        let path = store.slot_path(slot);

        let Some(key_ref) = descriptor.get(key_field) else {
            return Err(DecodeError::MissingField { path, field: key_field.to_string() });
        };
        let key_slot = store.index_of(key_ref, || format!("{path}.{key_field}"))?;
        let row_count = store.column_slots(key_slot)?.len();

        let mut rows: Vec<Row<'s>> = (0..row_count)
            .map(|i| Row::new(format!("{path}.rows[{i}]")))
            .collect();

        let root_path = self.root().path();
        for spec in schema.fields {
            let (fields, at) = match spec.scope {
                Scope::Descriptor => (descriptor, path.as_str()),
                Scope::Root => (self.root().fields(), root_path.as_str()),
            };
            let Some(reference) = fields.get(spec.source) else {
                self.check_missing(spec, at)?;
                continue;
            };

            let column = store.index_of(reference, || format!("{at}.{}", spec.source))?;
            let cells = store.column_slots(column)?;
            if cells.len() < row_count {
                tracing::trace!(field = spec.source, len = cells.len(), rows = row_count, "short column");
            } else if cells.len() > row_count {
                tracing::debug!(
                    field = spec.source,
                    len = cells.len(),
                    rows = row_count,
                    "column longer than key column, extra cells ignored"
                );
            }

            for (i, row) in rows.iter_mut().enumerate() {
                let value = match cells.get(i) {
                    Some(&cell) => self.follow_field(cell, spec)?,
                    None => None,
                };
                match value {
                    Some(value) => row.insert(spec.source, value),
                    None => self.check_missing(spec, row.path())?,
                }
            }
        }
        Ok(rows)
    }

    /// Decode a list of per-row descriptors at `slot`, one scalar row each.
    pub fn listing_rows(&self, slot: usize, schema: &RecordSchema) -> Result<Vec<Row<'s>>, DecodeError> {
        self.store()
            .column_slots(slot)?
            .into_iter()
            .map(|entry| self.scalar_row(entry, schema))
            .collect()
    }
}
