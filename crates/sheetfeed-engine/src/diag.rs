use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a recoverable parse fault.
///
/// None of these abort the surrounding row or document; the affected span
/// degrades (string fallback, dropped pair, salvaged row) and the fault is
/// reported alongside the successful partial result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Unterminated quote ran to end-of-document; the remainder was salvaged
    /// as one best-effort final row.
    RowMalformed,
    /// A field did not fully match any literal shape (unbalanced nesting,
    /// exceeded recursion depth) and fell back to its raw text as a string.
    FieldFault,
    /// A struct pair had no `:` separator and was dropped.
    StructPairDropped,
    /// A data row was wider than the header; the extra field was parsed but
    /// is unreachable by name and was dropped.
    ExtraField,
}

/// One recoverable fault, located as precisely as the parse stage allows.
///
/// `row` is the zero-based data-row index within the document (the header is
/// row 0). `column` is the zero-based field index, absent for row-level
/// faults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            kind,
            message: message.into(),
        }
    }

    pub fn at(mut self, row: usize, column: Option<usize>) -> Self {
        self.row = Some(row);
        self.column = column;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.row, self.column) {
            (Some(row), Some(column)) => {
                write!(f, "row {row}, column {column}: {}", self.message)
            }
            (Some(row), None) => write!(f, "row {row}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}
