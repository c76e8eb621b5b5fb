//! Document-level parsing: header handling and record building.

use sheetfeed_model::Record;
use thiserror::Error;

use crate::diag::{Diagnostic, DiagnosticKind};
use crate::parser::parse_value_with;
use crate::tokenizer::{split_fields, split_rows};
use crate::ParseOptions;

/// Result of parsing one document: records in row order plus every
/// recoverable fault encountered along the way.
///
/// Diagnostics never imply missing records; faulted fields degrade to
/// strings and malformed rows are salvaged, so the record list is always the
/// best-effort full parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSheet {
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The only fatal parse conditions. Everything else degrades per-field or
/// per-row and is reported through [`ParsedSheet::diagnostics`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetParseError {
    #[error("document was empty")]
    EmptyInput,
    #[error("header row has no column names")]
    EmptyHeader,
}

/// Parses a full CSV document into records.
///
/// Row 0 is the header; its raw field strings become the column names (they
/// are not value-parsed). Each following row is zipped positionally against
/// the header, with every field run through the literal parser:
///
/// - a row shorter than the header omits its missing trailing columns
/// - a row longer than the header has its extra fields parsed, then dropped
///   with a diagnostic (only name-addressable columns are retained)
/// - a row whose fields are all empty produces no record
pub fn parse_document(
    text: &str,
    options: &ParseOptions,
) -> Result<ParsedSheet, SheetParseError> {
    let mut rows = split_rows(text);
    let header_row = rows.next().ok_or(SheetParseError::EmptyInput)?;
    let header = split_fields(header_row);
    if header.iter().all(|name| name.is_empty()) {
        return Err(SheetParseError::EmptyHeader);
    }

    let mut sheet = ParsedSheet::default();
    let mut row_index = 0usize;

    for row_text in rows.by_ref() {
        row_index += 1;
        let fields = split_fields(row_text);
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        let mut record = Record::new();
        for (column, field) in fields.iter().enumerate() {
            let before = sheet.diagnostics.len();
            let value = parse_value_with(field, options, &mut sheet.diagnostics);
            for diagnostic in &mut sheet.diagnostics[before..] {
                diagnostic.row = Some(row_index);
                diagnostic.column = Some(column);
            }

            if column < header.len() {
                record.push(header[column].clone(), value);
            } else {
                log::warn!(
                    "row {row_index}: field {column} has no header column; dropped"
                );
                sheet.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::ExtraField,
                        format!("field `{field}` has no header column; dropped"),
                    )
                    .at(row_index, Some(column)),
                );
            }
        }
        sheet.records.push(record);
    }

    if rows.found_unterminated_quote() {
        log::warn!("row {row_index}: quote never closed; row salvaged to end of document");
        sheet.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::RowMalformed,
                "quote never closed; row salvaged to end of document",
            )
            .at(row_index, None),
        );
    }

    Ok(sheet)
}
