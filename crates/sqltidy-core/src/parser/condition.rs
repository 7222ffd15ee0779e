//! Recursive condition-tree parsing for WHERE and HAVING clauses.
//!
//! The clause text is repeatedly split at the leftmost depth-zero `and`
//! or `or`; the connective attaches to the condition that *follows* it.
//! A segment wrapped in one matching bracket pair becomes a group and
//! recurses; anything else is a leaf, probed for its comparison operator
//! in the fixed candidate order of [`Operator::CANDIDATES`].

use tracing::trace;

use crate::ast::{Condition, Operand, Operator, Relation};
use crate::keywords as kw;
use crate::scan;

use super::error::Result;
use super::select;

/// Splits the text after a `where` keyword (if present) from the trailing
/// clauses and parses it into a condition list.
pub(super) fn extract_where(text: &str) -> Result<(Vec<Condition>, &str)> {
    let Some(i) = scan::keyword_at_depth(text, kw::WHERE) else {
        return Ok((Vec::new(), text));
    };
    let after = &text[i + kw::WHERE.len()..];
    let (where_text, rest) =
        match scan::first_of_keywords_at_depth(after, &[kw::GROUP_BY, kw::ORDER_BY, kw::LIMIT]) {
            Some((j, _)) => (&after[..j], &after[j..]),
            None => (after, ""),
        };
    trace!(conditions = where_text.trim(), "extracting where clause");
    Ok((parse_conditions(where_text)?, rest))
}

/// Parses a bare condition buffer into an ordered condition list.
///
/// Brackets wrapping the entire buffer are stripped first, so
/// `where (a = 1 and b = 2)` parses the same as the unbracketed form.
pub(super) fn parse_conditions(text: &str) -> Result<Vec<Condition>> {
    let mut rest = scan::trim_brackets(text);
    let mut out = Vec::new();
    let mut relation = None;
    loop {
        let and_i = scan::keyword_at_depth(rest, kw::AND);
        let or_i = scan::keyword_at_depth(rest, kw::OR);
        let next = match (and_i, or_i) {
            (Some(a), Some(o)) if o < a => Some((o, Relation::Or)),
            (Some(a), _) => Some((a, Relation::And)),
            (None, Some(o)) => Some((o, Relation::Or)),
            (None, None) => None,
        };
        match next {
            Some((i, rel)) => {
                push_condition(&mut out, &rest[..i], relation)?;
                relation = Some(rel);
                rest = &rest[i + rel.as_str().len()..];
            }
            None => {
                push_condition(&mut out, rest, relation)?;
                return Ok(out);
            }
        }
    }
}

/// Parses one segment into a group or leaf and appends it.
fn push_condition(out: &mut Vec<Condition>, segment: &str, relation: Option<Relation>) -> Result<()> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Ok(());
    }

    if scan::wrapped_in_brackets(segment) {
        let children = parse_conditions(&segment[1..segment.len() - 1])?;
        out.push(Condition::Group { relation, children });
        return Ok(());
    }

    for op in Operator::CANDIDATES {
        let hit = if op.is_word() {
            scan::keyword_at_depth(segment, op.as_str())
        } else {
            scan::index_at_depth(segment, op.as_str())
        };
        if let Some(i) = hit {
            let field = segment[..i].trim_end();
            let value = segment[i + op.as_str().len()..].trim_start();
            out.push(Condition::Leaf {
                relation,
                field: field.to_string(),
                op: Some(op),
                operand: parse_operand(op, value)?,
            });
            return Ok(());
        }
    }

    // No recognizable operator: a boolean-valued column stands alone.
    out.push(Condition::Leaf {
        relation,
        field: segment.to_string(),
        op: None,
        operand: Operand::None,
    });
    Ok(())
}

/// Builds the right-hand side of a leaf. For `in`/`not in` the surrounding
/// parens are trimmed and the content is either a scalar subquery or a
/// literal value list split on depth-zero commas.
fn parse_operand(op: Operator, value: &str) -> Result<Operand> {
    if !op.takes_list() {
        return Ok(Operand::Value(value.trim().to_string()));
    }
    let inner = scan::trim_brackets(value);
    if scan::starts_with_keyword(inner, kw::SELECT) {
        let query = select::parse(inner)?;
        return Ok(Operand::Query(Box::new(query)));
    }
    let (items, last) = scan::split_at_depth(inner, kw::COMMA);
    let values = items
        .into_iter()
        .chain(std::iter::once(last))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    Ok(Operand::List(values))
}
