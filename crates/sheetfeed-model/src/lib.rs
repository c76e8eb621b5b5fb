//! `sheetfeed-model` defines the typed value model produced by the sheetfeed
//! parsing engine.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the parsing engine (tokenizer, literal parser, record builder)
//! - host integrations that consume parsed records
//! - IPC boundaries via `serde` (JSON-safe schema)

mod record;
mod value;

pub use record::Record;
pub use value::{FunctionRef, StructValue, Value};
