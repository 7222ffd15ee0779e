//! CREATE clause extraction, reduced scope.
//!
//! Only the table name, an optional alias, and the column-definition
//! metadata are resolved; the statement text itself is kept so rendering
//! can pass it through unchanged.

use crate::ast::{CreateStatement, Field};
use crate::keywords::{self as kw, normalize_keywords};
use crate::scan;

use super::error::{ParseError, Result};
use super::table;

/// Definition heads that are table constraints, not columns.
const CONSTRAINT_HEADS: &[&str] = &["primary", "unique", "constraint", "foreign", "key", "index"];

/// Parses `create table <name> (<column definitions>)`.
pub(super) fn parse(text: &str) -> Result<CreateStatement> {
    let text = normalize_keywords(text.trim());
    let mut rest = text.as_str();
    if let Some(stripped) = rest.strip_prefix(kw::CREATE) {
        rest = stripped.trim_start();
    }
    if scan::starts_with_keyword(rest, kw::TABLE) {
        rest = rest[kw::TABLE.len()..].trim_start();
    }

    let open = rest.find(kw::LEFT_BRACKET);
    let header = open.map_or(rest, |i| &rest[..i]);
    let table = table::parse_target(header, "create")?;

    let mut fields = Vec::new();
    if let Some(i) = open {
        let bracketed = &rest[i..];
        let (o, c) = scan::between(bracketed).ok_or_else(|| ParseError::unbalanced(bracketed))?;
        let (defs, last) = scan::split_at_depth(&bracketed[o..c], kw::COMMA);
        fields.extend(
            defs.into_iter()
                .chain(std::iter::once(last))
                .filter_map(parse_column),
        );
    }

    Ok(CreateStatement {
        table,
        fields,
        raw: text.clone(),
    })
}

/// Parses one column definition into its type metadata. Constraint
/// definitions yield `None`.
fn parse_column(def: &str) -> Option<Field> {
    let def = def.trim();
    let (name, rest) = def.split_once(' ').unwrap_or((def, ""));
    if name.is_empty() || CONSTRAINT_HEADS.iter().any(|h| name.eq_ignore_ascii_case(h)) {
        return None;
    }

    let rest = rest.trim_start();
    let (type_text, tail) = match scan::index_at_depth(rest, kw::BLANK) {
        Some(i) => (&rest[..i], rest[i..].trim_start()),
        None => (rest, ""),
    };
    let (column_type, precision, scale) = parse_type(type_text);

    let nullable = scan::keyword_first(tail, kw::NOT_NULL).is_none();
    let default = word_after(tail, kw::DEFAULT);
    let comment = word_after(tail, kw::COMMENT);

    Some(Field {
        name: name.to_string(),
        column_type,
        precision,
        scale,
        nullable,
        default,
        comment,
        ..Field::default()
    })
}

/// Splits `numeric(10, 2)` into its name, precision and scale.
fn parse_type(text: &str) -> (Option<String>, Option<u16>, Option<u16>) {
    if text.is_empty() {
        return (None, None, None);
    }
    let Some((open, close)) = scan::between(text) else {
        return (Some(text.to_string()), None, None);
    };
    let name = text[..open - 1].to_string();
    let mut parts = text[open..close].split(kw::COMMA);
    let precision = parts.next().and_then(|p| p.trim().parse().ok());
    let scale = parts.next().and_then(|s| s.trim().parse().ok());
    (Some(name), precision, scale)
}

/// The single word following a keyword, e.g. the value after `default`.
fn word_after(text: &str, keyword: &str) -> Option<String> {
    let i = scan::keyword_first(text, keyword)?;
    text[i + keyword.len()..]
        .split_whitespace()
        .next()
        .map(String::from)
}
