//! Decoder for index-addressed flat value stores.
//!
//! A server-rendered `__data.json` payload carries each page node's data as
//! one flat array: slot 0 is a root descriptor, descriptors map field names
//! to slot indices, columns are lists of slot indices. This crate turns such
//! a store into typed records:
//!
//! ```text
//! bytes ─► Document ─► FlatStore ─► Root ─► anchor descriptor
//!                                              │
//!                         scalar / tabular / listing decoder ─► Row ─► Record
//! ```
//!
//! Everything varying between endpoints is data ([`EndpointConfig`] plus the
//! record's [`RecordSchema`]); there is one engine.

pub mod decode;
pub mod endpoint;
pub mod error;
pub mod loader;
pub mod locator;
mod macros;
pub mod mapping;
pub mod row;
mod scalar;
pub mod schema;
pub mod store;
mod tabular;
pub mod value;

pub use decode::{decode_many, decode_one, Decoder};
pub use endpoint::{EndpointConfig, Mode, PREMIUM_SENTINEL};
pub use error::{DecodeError, ErrorKind};
pub use loader::{load, Document};
pub use locator::Root;
pub use mapping::{FieldCx, FieldValue, LabeledPairs, Record};
pub use row::Row;
pub use schema::{optional, required, FieldSpec, Kind, Presence, RecordSchema, Scope};
pub use store::FlatStore;
pub use value::{Value, ValueKind};
