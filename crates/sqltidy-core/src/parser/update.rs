//! UPDATE clause extraction.

use crate::ast::{Field, UpdateStatement};
use crate::keywords::{self as kw, normalize_keywords};
use crate::scan;

use super::condition;
use super::error::{ParseError, Result};
use super::table;

/// Parses `update <table> set <assignments> [where …]`. Assignments are
/// split on depth-zero commas and each is cut at its first depth-zero
/// `=`; the literal shield guarantees no `=` hides inside a string.
pub(super) fn parse(text: &str) -> Result<UpdateStatement> {
    let text = normalize_keywords(text.trim());
    let mut rest = text.as_str();
    if let Some(stripped) = rest.strip_prefix(kw::UPDATE) {
        rest = stripped.trim_start();
    }

    let set_i = scan::keyword_at_depth(rest, kw::SET)
        .ok_or_else(|| ParseError::malformed("set", rest))?;
    let table = table::parse_target(&rest[..set_i], "update")?;
    let rest = &rest[set_i + kw::SET.len()..];

    let (assign_text, where_text) = match scan::keyword_at_depth(rest, kw::WHERE) {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };

    let (items, last) = scan::split_at_depth(assign_text, kw::COMMA);
    let mut assignments = Vec::new();
    for raw in items.into_iter().chain(std::iter::once(last)) {
        let seg = raw.trim();
        if seg.is_empty() {
            continue;
        }
        let eq = scan::index_at_depth(seg, kw::EQ)
            .ok_or_else(|| ParseError::malformed("set", seg))?;
        let name = seg[..eq].trim_end();
        let value = seg[eq + kw::EQ.len()..].trim_start();
        if name.is_empty() {
            return Err(ParseError::malformed("set", seg));
        }
        assignments.push(Field::assignment(name, value));
    }
    if assignments.is_empty() {
        return Err(ParseError::malformed("set", assign_text));
    }

    let (where_clause, _) = condition::extract_where(where_text)?;
    Ok(UpdateStatement {
        table,
        assignments,
        where_clause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Condition, Operand, Operator, TableRef};

    #[test]
    fn test_update_assignments_and_where() {
        let u = parse("update t set x = value@1@, y = 2 where id = 1").unwrap();
        assert_eq!(u.table, TableRef::named("t"));
        assert_eq!(u.assignments.len(), 2);
        assert_eq!(u.assignments[0].name, "x");
        assert_eq!(u.assignments[0].value.as_deref(), Some("value@1@"));
        assert_eq!(u.assignments[1].name, "y");
        assert_eq!(u.where_clause.len(), 1);
    }

    #[test]
    fn test_update_with_table_alias() {
        let u = parse("update users u set name = 1").unwrap();
        assert_eq!(u.table.alias(), Some("u"));
        assert!(u.where_clause.is_empty());
    }

    #[test]
    fn test_update_value_keeps_inner_equals() {
        let u = parse("update t set x = a = b").unwrap();
        assert_eq!(u.assignments[0].name, "x");
        assert_eq!(u.assignments[0].value.as_deref(), Some("a = b"));
    }

    #[test]
    fn test_update_function_value_commas() {
        let u = parse("update t set x = f(1, 2), y = 3").unwrap();
        assert_eq!(u.assignments.len(), 2);
        assert_eq!(u.assignments[0].value.as_deref(), Some("f(1, 2)"));
    }

    #[test]
    fn test_update_where_in_list() {
        let u = parse("update t set x = 1 where id in (1,2,3,4,5)").unwrap();
        let Condition::Leaf { op, operand, .. } = &u.where_clause[0] else {
            panic!("expected leaf");
        };
        assert_eq!(*op, Some(Operator::In));
        let Operand::List(values) = operand else {
            panic!("expected list");
        };
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn test_update_without_set_is_malformed() {
        assert!(matches!(
            parse("update t where id = 1"),
            Err(ParseError::MalformedClause { clause: "set", .. })
        ));
    }
}
