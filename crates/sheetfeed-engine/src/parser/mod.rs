//! Typed-literal parser for one raw field string.
//!
//! Each field is classified into exactly one [`Value`] by a fixed ordering
//! of structural checks: empty, quote-wrapped string, numeric literal,
//! `[...]` array, `{...}` struct, `ident(...)` call reference, and finally
//! verbatim string. The ordering matters: quoting is the author's escape
//! hatch that forces a string even when the content looks numeric or
//! bracketed, so it is checked before the content-shaped rules.
//!
//! Composite literals are split on top-level commas only; the splitter
//! tracks quote spans and all three bracket kinds simultaneously so that
//! `["a,b", {x: 1, y: [2,3]}]` yields exactly two top-level elements.
//! Nothing is ever executed here: a call expression parses to a
//! [`FunctionRef`] and stays inert until the host invokes it explicitly.

use sheetfeed_model::{FunctionRef, StructValue, Value};

use crate::diag::{Diagnostic, DiagnosticKind};
use crate::tokenizer::unwrap_quoted;
use crate::ParseOptions;

/// Parses one raw field into a [`Value`] with default options, discarding
/// diagnostics. Convenience wrapper over [`parse_value_with`].
pub fn parse_value(text: &str) -> Value {
    let mut diagnostics = Vec::new();
    parse_value_with(text, &ParseOptions::default(), &mut diagnostics)
}

/// Parses one raw field into exactly one [`Value`].
///
/// This never fails: a field that does not fully match any literal shape
/// (unbalanced nesting, exceeded recursion depth) degrades to a
/// [`Value::Text`] of its raw trimmed text and records a
/// [`DiagnosticKind::FieldFault`]. Struct pairs without a `:` are dropped
/// with a [`DiagnosticKind::StructPairDropped`].
pub fn parse_value_with(
    text: &str,
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Value {
    classify(text, 0, options, diagnostics)
}

fn classify(
    text: &str,
    depth: usize,
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Value {
    let trimmed = text.trim();

    if depth >= options.max_depth {
        field_fault(
            diagnostics,
            format!(
                "literal nesting exceeds the depth limit of {}; kept as text",
                options.max_depth
            ),
        );
        return Value::Text(trimmed.to_string());
    }

    // 1. Empty field.
    if trimmed.is_empty() {
        return Value::Text(String::new());
    }

    // 2. Explicitly quoted string.
    if let Some(inner) = unwrap_quoted(trimmed) {
        return Value::Text(inner);
    }

    // 3. Numeric literal.
    if is_numeric_literal(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            return Value::Number(n);
        }
    }

    // 4. Array literal.
    if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
        let inner = &trimmed[1..trimmed.len() - 1];
        match split_top_level(inner) {
            Ok(elements) => {
                // `[]` has one empty top-level span, not one empty element.
                let items = if inner.trim().is_empty() {
                    Vec::new()
                } else {
                    elements
                        .iter()
                        .map(|e| classify(e, depth + 1, options, diagnostics))
                        .collect()
                };
                return Value::Array(items);
            }
            Err(()) => {
                field_fault(
                    diagnostics,
                    format!("unbalanced array literal `{trimmed}`; kept as text"),
                );
                return Value::Text(trimmed.to_string());
            }
        }
    }

    // 5. Struct literal.
    if trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.len() >= 2 {
        let inner = &trimmed[1..trimmed.len() - 1];
        match split_top_level(inner) {
            Ok(pairs) => {
                let mut fields = StructValue::new();
                for pair in pairs {
                    if pair.trim().is_empty() {
                        continue;
                    }
                    match split_struct_pair(pair) {
                        Some((key, value_text)) => {
                            let value = classify(value_text, depth + 1, options, diagnostics);
                            fields.insert(key.to_string(), value);
                        }
                        None => {
                            log::warn!("struct pair `{}` has no `:`; dropped", pair.trim());
                            diagnostics.push(Diagnostic::new(
                                DiagnosticKind::StructPairDropped,
                                format!("struct pair `{}` has no `:`; dropped", pair.trim()),
                            ));
                        }
                    }
                }
                return Value::Struct(fields);
            }
            Err(()) => {
                field_fault(
                    diagnostics,
                    format!("unbalanced struct literal `{trimmed}`; kept as text"),
                );
                return Value::Text(trimmed.to_string());
            }
        }
    }

    // 6. Call expression: `identifier(args...)` with the opening paren's
    // match landing on the final character. Prose that merely contains
    // parentheses fails the balance check and falls through to a string.
    if let Some(fref) = parse_call_expr(trimmed, depth, options, diagnostics) {
        return Value::Function(fref);
    }

    // 7. Ordinary text.
    Value::Text(trimmed.to_string())
}

fn field_fault(diagnostics: &mut Vec<Diagnostic>, message: String) {
    log::warn!("{message}");
    diagnostics.push(Diagnostic::new(DiagnosticKind::FieldFault, message));
}

/// Strict numeric shape: optional leading `-`, digits, optionally one `.`
/// followed by more digits, nothing else. Anything looser (exponents,
/// grouping separators, trailing text) is not a number here; authors quote
/// such content or it stays a string.
fn is_numeric_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return false;
    }
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac_part {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_continue(c)
}

fn parse_call_expr(
    trimmed: &str,
    depth: usize,
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<FunctionRef> {
    if !trimmed.ends_with(')') {
        return None;
    }

    let open = trimmed.find('(')?;
    let name = &trimmed[..open];
    let mut chars = name.chars();
    let first = chars.next()?;
    if !is_ident_start(first) || !chars.all(is_ident_continue) {
        return None;
    }

    let inner = &trimmed[open + 1..trimmed.len() - 1];
    // If the argument span is itself unbalanced the opening paren does not
    // match the final `)` and this is not a call expression.
    let args = split_top_level(inner).ok()?;

    let params = if inner.trim().is_empty() {
        Vec::new()
    } else {
        args.iter()
            .map(|a| classify(a, depth + 1, options, diagnostics))
            .collect()
    };

    Some(FunctionRef::new(name, params, trimmed))
}

/// Splits `inner` on commas at depth 0, tracking quote spans and `[]`, `{}`
/// and `()` nesting simultaneously. `Err` means the span is unbalanced
/// (depth goes negative or does not return to zero, or a quote never
/// closes).
fn split_top_level(inner: &str) -> Result<Vec<&str>, ()> {
    let mut parts = Vec::new();
    let bytes = inner.as_bytes();
    let mut start = 0usize;
    let mut in_quotes = false;
    let mut square = 0i32;
    let mut curly = 0i32;
    let mut round = 0i32;

    for (i, &b) in bytes.iter().enumerate() {
        if in_quotes {
            if b == b'"' {
                in_quotes = false;
            }
            continue;
        }
        match b {
            b'"' => in_quotes = true,
            b'[' => square += 1,
            b']' => square -= 1,
            b'{' => curly += 1,
            b'}' => curly -= 1,
            b'(' => round += 1,
            b')' => round -= 1,
            b',' if square == 0 && curly == 0 && round == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        if square < 0 || curly < 0 || round < 0 {
            return Err(());
        }
    }

    if in_quotes || square != 0 || curly != 0 || round != 0 {
        return Err(());
    }
    parts.push(&inner[start..]);
    Ok(parts)
}

/// Splits one struct pair at its first top-level `:` into (trimmed key,
/// raw value text). The key is a raw identifier and is not value-parsed.
fn split_struct_pair(pair: &str) -> Option<(&str, &str)> {
    let bytes = pair.as_bytes();
    let mut in_quotes = false;
    let mut square = 0i32;
    let mut curly = 0i32;
    let mut round = 0i32;

    for (i, &b) in bytes.iter().enumerate() {
        if in_quotes {
            if b == b'"' {
                in_quotes = false;
            }
            continue;
        }
        match b {
            b'"' => in_quotes = true,
            b'[' => square += 1,
            b']' => square -= 1,
            b'{' => curly += 1,
            b'}' => curly -= 1,
            b'(' => round += 1,
            b')' => round -= 1,
            b':' if square == 0 && curly == 0 && round == 0 => {
                return Some((pair[..i].trim(), &pair[i + 1..]));
            }
            _ => {}
        }
    }
    None
}
