//! CSV row and field tokenizing.
//!
//! Quoting follows RFC-4180 conventions: `"` opens/closes a quoted span and
//! a doubled `""` inside a quoted span denotes one literal `"`. Row
//! boundaries and field separators are only recognized outside quoted spans,
//! so a field may contain embedded commas and newlines.

/// Splits a full document into row texts.
///
/// The returned iterator is lazy and restartable (call [`split_rows`] again
/// to rescan). Rows are borrowed slices of the input; no unescaping happens
/// at this level.
pub fn split_rows(text: &str) -> Rows<'_> {
    Rows {
        rest: text,
        done: false,
        unterminated_quote: false,
    }
}

/// Lazy iterator over the rows of a document. See [`split_rows`].
#[derive(Clone, Debug)]
pub struct Rows<'a> {
    rest: &'a str,
    done: bool,
    unterminated_quote: bool,
}

impl<'a> Rows<'a> {
    /// True once the iterator has salvaged a final row whose quoted span ran
    /// to end-of-document without a closing `"`.
    pub fn found_unterminated_quote(&self) -> bool {
        self.unterminated_quote
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done || self.rest.is_empty() {
            self.done = true;
            return None;
        }

        let bytes = self.rest.as_bytes();
        let mut in_quotes = false;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'"' => in_quotes = !in_quotes,
                b'\n' if !in_quotes => {
                    // Exclude a preceding `\r` from the row text.
                    let end = if i > 0 && bytes[i - 1] == b'\r' {
                        i - 1
                    } else {
                        i
                    };
                    let row = &self.rest[..end];
                    self.rest = &self.rest[i + 1..];
                    return Some(row);
                }
                _ => {}
            }
        }

        // No further boundary: the remainder is the final row. If a quoted
        // span is still open it is salvaged best-effort rather than raised;
        // corruption stays isolated to this one row.
        if in_quotes {
            self.unterminated_quote = true;
        }
        let row = self.rest;
        self.rest = "";
        self.done = true;
        Some(row)
    }
}

/// Splits one row into raw field strings on commas outside quotes.
///
/// Fully quoted fields are unwrapped and `""` unescaped to `"`. Whitespace
/// outside quotes is trimmed; whitespace inside quotes is preserved
/// verbatim. An empty field (`,,`) yields an empty string; an empty row
/// yields a single empty field.
pub fn split_fields(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let bytes = row.as_bytes();
    let mut start = 0usize;
    let mut in_quotes = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                fields.push(normalize_field(&row[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(normalize_field(&row[start..]));
    fields
}

fn normalize_field(raw: &str) -> String {
    let trimmed = raw.trim();
    match unwrap_quoted(trimmed) {
        Some(inner) => inner,
        None => trimmed.to_string(),
    }
}

/// If `text` is one quoted span covering the whole string, returns the inner
/// text with doubled quotes unescaped. Returns `None` for anything else,
/// including text where the opening quote closes before the end
/// (`"a" b` stays verbatim).
pub(crate) fn unwrap_quoted(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return None;
    }

    let inner = &bytes[1..bytes.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut i = 0usize;
    while i < inner.len() {
        if inner[i] == b'"' {
            if i + 1 < inner.len() && inner[i + 1] == b'"' {
                out.push('"');
                i += 2;
                continue;
            }
            // A lone quote inside the span means the wrapping quote closed
            // early; the text is not one quoted span.
            return None;
        }
        let ch = text[1 + i..].chars().next()?;
        out.push(ch);
        i += ch.len_utf8();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_split_on_unquoted_newlines() {
        let rows: Vec<_> = split_rows("a,b\nc,d\ne").collect();
        assert_eq!(rows, vec!["a,b", "c,d", "e"]);
    }

    #[test]
    fn rows_keep_quoted_newlines_together() {
        let rows: Vec<_> = split_rows("a,\"line1\nline2\",b\nnext").collect();
        assert_eq!(rows, vec!["a,\"line1\nline2\",b", "next"]);
    }

    #[test]
    fn rows_strip_carriage_returns_at_boundaries() {
        let rows: Vec<_> = split_rows("a,b\r\nc,d\r\n").collect();
        assert_eq!(rows, vec!["a,b", "c,d"]);
    }

    #[test]
    fn rows_drop_empty_trailing_row() {
        let rows: Vec<_> = split_rows("a,b\n").collect();
        assert_eq!(rows, vec!["a,b"]);
    }

    #[test]
    fn rows_salvage_unterminated_quote() {
        let mut rows = split_rows("ok\n\"never closed,rest");
        assert_eq!(rows.next(), Some("ok"));
        assert!(!rows.found_unterminated_quote());
        assert_eq!(rows.next(), Some("\"never closed,rest"));
        assert!(rows.found_unterminated_quote());
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn rows_are_restartable() {
        let doc = "a\nb\nc";
        let first: Vec<_> = split_rows(doc).collect();
        let second: Vec<_> = split_rows(doc).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fields_split_on_unquoted_commas() {
        assert_eq!(split_fields("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn fields_unwrap_quotes_and_unescape_doubles() {
        assert_eq!(split_fields("\"a,b\",\"he said \"\"hi\"\"\""), vec![
            "a,b".to_string(),
            "he said \"hi\"".to_string(),
        ]);
    }

    #[test]
    fn fields_trim_outside_quotes_only() {
        assert_eq!(split_fields("  x  , \" padded \" "), vec![
            "x".to_string(),
            " padded ".to_string(),
        ]);
    }

    #[test]
    fn empty_fields_and_empty_rows() {
        assert_eq!(split_fields("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn partially_quoted_field_stays_verbatim() {
        assert_eq!(split_fields("\"a\" b"), vec!["\"a\" b"]);
    }
}
