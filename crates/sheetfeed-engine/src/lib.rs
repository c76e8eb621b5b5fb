//! `sheetfeed-engine` turns published-spreadsheet CSV text into typed
//! records.
//!
//! The pipeline is synchronous and allocation-bounded: a quote-aware row
//! splitter feeds a field tokenizer, each raw field runs through a
//! recursive-descent literal parser (strings, numbers, arrays, structs and
//! unevaluated call expressions), and the record builder zips parsed values
//! against the header row. Parsing has no side effects and no shared
//! mutable state, so hosts may parse rows in parallel if they choose.
//!
//! Malformed input degrades rather than aborts: faulted fields fall back to
//! their raw text, malformed rows are salvaged, and every recoverable fault
//! is surfaced on [`ParsedSheet::diagnostics`] next to the partial result.
//! Only an empty document or an empty header row is fatal.
//!
//! Call expressions parse to [`sheetfeed_model::FunctionRef`] values and are
//! only ever executed through [`invoke`], against a host-owned
//! [`FunctionRegistry`]. Fetching the CSV payload in the first place is the
//! host transport's concern, not this crate's.

mod diag;
mod document;
mod functions;
mod parser;
mod tokenizer;

pub use diag::{Diagnostic, DiagnosticKind};
pub use document::{parse_document, ParsedSheet, SheetParseError};
pub use functions::{invoke, FunctionRegistry, Handler, HandlerRegistry, InvokeError};
pub use parser::{parse_value, parse_value_with};
pub use tokenizer::{split_fields, split_rows, Rows};

/// Default bound on literal nesting depth.
///
/// Generous for real sheet data while keeping pathological input from
/// overflowing the stack during recursive parsing.
pub const DEFAULT_MAX_LITERAL_DEPTH: usize = 64;

/// Knobs for the literal parser.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Maximum literal nesting depth before a field degrades to text.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_LITERAL_DEPTH,
        }
    }
}
