//! Table and join resolution.
//!
//! Given the remainder after a FROM keyword, the next token decides the
//! shape: an opening bracket means a derived table whose content is parsed
//! as a nested select, anything else is a base table name. The trailing
//! alias is whatever follows, unless it collides with a join or clause
//! keyword, in which case there is no alias.

use crate::ast::{JoinClause, JoinKind, TableRef};
use crate::keywords as kw;
use crate::scan;

use super::error::{ParseError, Result};
use super::select;

/// Keywords that terminate the table-alias region.
const ALIAS_BOUNDARY: &[&str] = &[
    kw::LEFT,
    kw::RIGHT,
    kw::INNER,
    kw::OUTER,
    kw::JOIN,
    kw::WHERE,
    kw::GROUP_BY,
    kw::ORDER_BY,
    kw::LIMIT,
];

/// Keywords that terminate the final join segment.
const JOIN_BOUNDARY: &[&str] = &[kw::WHERE, kw::GROUP_BY, kw::ORDER_BY, kw::LIMIT];

/// Join kind keywords, scanned backward from a segment's tail.
const JOIN_KINDS: &[&str] = &[kw::LEFT, kw::RIGHT, kw::INNER, kw::OUTER];

/// Extracts the table reference at the head of `text`, tolerating and
/// consuming a leading `from`. Returns the unconsumed remainder.
///
/// # Errors
///
/// `UnbalancedBrackets` when a derived table never closes, or the nested
/// select's own errors.
pub(super) fn extract(text: &str) -> Result<(TableRef, &str)> {
    let rest = scan::keyword_at_depth(text, kw::FROM)
        .map_or(text, |i| &text[i + kw::FROM.len()..]);
    let rest = rest.trim_start();

    let (mut table, after) = if rest.starts_with(kw::LEFT_BRACKET) {
        let (open, close) = scan::between(rest).ok_or_else(|| ParseError::unbalanced(rest))?;
        let query = select::parse(&rest[open..close])?;
        let table = TableRef::Derived {
            query: Box::new(query),
            alias: None,
        };
        (table, &rest[close + 1..])
    } else {
        let (name, after) = rest.split_once(' ').unwrap_or((rest, ""));
        if name.is_empty() {
            return Err(ParseError::malformed("from", text));
        }
        (TableRef::named(name), after)
    };

    let (alias_text, remainder) = match scan::first_of_keywords_at_depth(after, ALIAS_BOUNDARY) {
        Some((i, _)) => (&after[..i], &after[i..]),
        None => (after, ""),
    };
    if let Some(alias) = extract_alias(alias_text) {
        match &mut table {
            TableRef::Named { alias: slot, .. } | TableRef::Derived { alias: slot, .. } => {
                *slot = Some(alias);
            }
        }
    }
    Ok((table, remainder))
}

/// Parses a bare `name [as] [alias]` target, as used by UPDATE, DELETE and
/// CREATE where no FROM bracket forms are possible.
pub(super) fn parse_target(text: &str, clause: &'static str) -> Result<TableRef> {
    let text = text.trim();
    let (name, rest) = text.split_once(' ').unwrap_or((text, ""));
    if name.is_empty() {
        return Err(ParseError::malformed(clause, text));
    }
    Ok(TableRef::Named {
        name: name.to_string(),
        alias: extract_alias(rest),
    })
}

/// Extracts an alias from trailing text, stripping a leading `as`.
fn extract_alias(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let alias = scan::keyword_first(text, kw::AS).map_or_else(
        || text.split_once(' ').map_or(text, |(_, rest)| rest),
        |i| text[i + kw::AS.len()..].trim_start(),
    );
    let alias = alias.trim();
    (!alias.is_empty()).then(|| alias.to_string())
}

/// Splits the remainder after the main table into its join clauses,
/// applied left to right. Returns the text after the last join.
///
/// Each segment between depth-zero `join` keywords carries the *next*
/// join's kind keyword at its tail; the segment's own ON condition is the
/// text after its last depth-zero `on`.
pub(super) fn extract_joins(text: &str) -> Result<(Vec<JoinClause>, &str)> {
    let (segments, trailing) = scan::split_keyword_at_depth(text, kw::JOIN);
    if segments.is_empty() {
        return Ok((Vec::new(), text));
    }

    let (last_join, remainder) = match scan::first_of_keywords_at_depth(trailing, JOIN_BOUNDARY) {
        Some((i, _)) => (&trailing[..i], &trailing[i..]),
        None => (trailing, ""),
    };

    let mut kind = leading_kind(segments[0]);
    let mut joins = Vec::new();
    for piece in segments[1..].iter().copied().chain(std::iter::once(last_join)) {
        let (seg, next_kind) = split_tail_kind(piece);
        let (table_part, on) = match scan::keyword_indices_at_depth(seg, kw::ON).last() {
            Some(&i) => (&seg[..i], seg[i + kw::ON.len()..].trim()),
            None => (seg, ""),
        };
        let (table, _) = extract(table_part)?;
        joins.push(JoinClause {
            kind,
            table,
            on: on.to_string(),
        });
        kind = next_kind;
    }
    Ok((joins, remainder))
}

/// The join kind named in the text before the first `join` keyword.
fn leading_kind(text: &str) -> JoinKind {
    scan::first_of_keywords(text.trim(), JOIN_KINDS)
        .map_or(JoinKind::Unspecified, |(_, hit)| JoinKind::from_keyword(hit))
}

/// Peels join-kind keywords off the segment tail; they belong to the
/// following join. `left`/`right`/`inner` win over a trailing `outer`.
fn split_tail_kind(piece: &str) -> (&str, JoinKind) {
    let mut seg = piece.trim_end();
    let mut kind = JoinKind::Unspecified;
    while let Some((i, hit)) = scan::last_of_keywords(seg, JOIN_KINDS) {
        if i + hit.len() != seg.len() {
            break;
        }
        kind = JoinKind::from_keyword(hit);
        seg = seg[..i].trim_end();
    }
    (seg, kind)
}
