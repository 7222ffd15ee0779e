//! INSERT clause extraction.

use crate::ast::{Field, InsertSource, InsertStatement, TableRef};
use crate::keywords::{self as kw, normalize_keywords};
use crate::scan;

use super::error::{ParseError, Result};
use super::select;

/// Parses `insert into <table> (<columns>)` followed by either a VALUES
/// row list or a projecting select. Row arity must equal the column count
/// for every row, and so must an INSERT … SELECT projection.
pub(super) fn parse(text: &str) -> Result<InsertStatement> {
    let text = normalize_keywords(text.trim());
    let mut rest = text.as_str();
    if let Some(stripped) = rest.strip_prefix(kw::INSERT) {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix(kw::INTO) {
        rest = stripped.trim_start();
    }

    let open = rest
        .find(kw::LEFT_BRACKET)
        .ok_or_else(|| ParseError::malformed("insert", rest))?;
    let name = rest[..open].trim();
    if name.is_empty() {
        return Err(ParseError::malformed("insert", rest));
    }
    let table = TableRef::named(name);
    let rest = &rest[open..];

    let (o, c) = scan::between(rest).ok_or_else(|| ParseError::unbalanced(rest))?;
    let fields: Vec<Field> = rest[o..c]
        .split(kw::COMMA)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(Field::named)
        .collect();
    if fields.is_empty() {
        return Err(ParseError::malformed("insert", rest));
    }
    let rest = rest[c + 1..].trim_start();

    let source = if scan::starts_with_keyword(rest, kw::SELECT) {
        let query = select::parse(rest)?;
        if query.fields.len() != fields.len() {
            return Err(ParseError::FieldValueArityMismatch {
                columns: fields.len(),
                values: query.fields.len(),
            });
        }
        InsertSource::Query(Box::new(query))
    } else {
        InsertSource::Rows(parse_rows(rest, fields.len())?)
    };

    Ok(InsertStatement {
        table,
        fields,
        source,
    })
}

/// Splits a VALUES list into rows on depth-zero commas and each row's
/// bracket content the same way, checking arity per row.
fn parse_rows(text: &str, columns: usize) -> Result<Vec<Vec<String>>> {
    let mut rest = text;
    if scan::starts_with_keyword(rest, kw::VALUES) {
        rest = rest[kw::VALUES.len()..].trim_start();
    } else if scan::starts_with_keyword(rest, kw::VALUE) {
        rest = rest[kw::VALUE.len()..].trim_start();
    }

    let (rows_raw, last) = scan::split_at_depth(rest, kw::COMMA);
    let mut rows = Vec::new();
    for raw in rows_raw.into_iter().chain(std::iter::once(last)) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (items, tail) = scan::split_at_depth(scan::trim_brackets(raw), kw::COMMA);
        let values: Vec<String> = items
            .into_iter()
            .chain(std::iter::once(tail))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();
        if values.len() != columns {
            return Err(ParseError::FieldValueArityMismatch {
                columns,
                values: values.len(),
            });
        }
        rows.push(values);
    }
    if rows.is_empty() {
        return Err(ParseError::malformed("values", text));
    }
    Ok(rows)
}
