//! flatdb types - schema, record and storage trait definitions
//!
//! Every storage backend implements `SchemaStore` and `RecordStore`
//! from this crate, and every front end talks to those traits only.

mod error;
mod models;
mod storage;
mod table;

pub use error::{Error, Result, ValidationReason};
pub use models::{validate_db_name, FieldDef, FieldSet, Record, Validator, LEGACY_NUMERIC_FIELD};
pub use storage::{RecordStore, SchemaStore};
pub use table::render_table;
