//! SELECT clause extraction.
//!
//! Clauses are peeled off a shrinking remainder in a fixed order chosen
//! for ambiguity resolution: LIMIT and ORDER BY are located by
//! last-occurrence search and must go first, before clauses whose
//! first-occurrence search could collide with matches inside a
//! not-yet-removed nested subquery.

use tracing::trace;

use crate::ast::{Field, SelectStatement};
use crate::keywords::{self as kw, normalize_keywords};
use crate::scan;

use super::condition;
use super::error::{ParseError, Result};
use super::table;

/// Parses a (possibly nested) select statement. The input needs no
/// keyword-case preparation; the buffer is normalized here so derived
/// tables and `in (select …)` subqueries can recurse directly on their
/// bracket content.
pub(super) fn parse(text: &str) -> Result<SelectStatement> {
    let text = normalize_keywords(text.trim());
    let mut rest = text.as_str();
    if !rest.starts_with(kw::SELECT) {
        return Err(ParseError::malformed("select", rest));
    }

    // LIMIT: last occurrence, and only when right of the last close
    // bracket, so a subquery's limit is left in place.
    let mut limit = None;
    if let Some(i) = scan::keyword_last(rest, kw::LIMIT) {
        let top_level = scan::index_of(rest, kw::RIGHT_BRACKET, -1).is_none_or(|j| i > j);
        if top_level {
            limit = Some(rest[i + kw::LIMIT.len()..].trim().to_string());
            rest = rest[..i].trim_end();
        }
    }

    // ORDER BY: same last-occurrence rule.
    let mut order_by = Vec::new();
    if let Some(i) = scan::keyword_last(rest, kw::ORDER_BY) {
        let top_level = scan::index_of(rest, kw::RIGHT_BRACKET, -1).is_none_or(|j| i > j);
        if top_level {
            order_by = split_values(&rest[i + kw::ORDER_BY.len()..]);
            rest = rest[..i].trim_end();
        }
    }

    // Field list: everything between `select` and the depth-zero `from`.
    let from_i = scan::keyword_at_depth(rest, kw::FROM)
        .ok_or_else(|| ParseError::malformed("from", rest))?;
    let mut fields_text = rest[kw::SELECT.len()..from_i].trim();
    let mut distinct = false;
    if let Some(stripped) = fields_text.strip_prefix(kw::DISTINCT) {
        if stripped.is_empty() || stripped.starts_with(' ') {
            distinct = true;
            fields_text = stripped.trim_start();
        }
    }
    let fields = parse_fields(fields_text);
    if fields.is_empty() {
        return Err(ParseError::malformed("select", rest));
    }
    rest = &rest[from_i..];

    let (table, rest) = table::extract(rest)?;
    let (joins, rest) = table::extract_joins(rest)?;
    let (where_clause, rest) = condition::extract_where(rest)?;

    // GROUP BY, then HAVING, off what remains.
    let mut group_by = Vec::new();
    let mut rest = rest;
    if let Some(i) = scan::keyword_at_depth(rest, kw::GROUP_BY) {
        let after = &rest[i + kw::GROUP_BY.len()..];
        let (values, tail) =
            match scan::first_of_keywords_at_depth(after, &[kw::HAVING, kw::ORDER_BY, kw::LIMIT]) {
                Some((j, _)) => (&after[..j], &after[j..]),
                None => (after, ""),
            };
        group_by = split_values(values);
        rest = tail;
    }

    let mut having = Vec::new();
    if let Some(i) = scan::keyword_at_depth(rest, kw::HAVING) {
        let after = &rest[i + kw::HAVING.len()..];
        let having_text =
            match scan::first_of_keywords_at_depth(after, &[kw::ORDER_BY, kw::LIMIT]) {
                Some((j, _)) => &after[..j],
                None => after,
            };
        having = condition::parse_conditions(having_text)?;
    }

    trace!(
        fields = fields.len(),
        joins = joins.len(),
        conditions = where_clause.len(),
        "select parsed"
    );
    Ok(SelectStatement {
        distinct,
        fields,
        table,
        joins,
        where_clause,
        group_by,
        having,
        order_by,
        limit,
    })
}

/// Splits a projection list on depth-zero commas and resolves each
/// field's alias: an `as` keyword wins; a field ending in a close bracket
/// is a bare function call; otherwise the text after the last blank is
/// the alias.
fn parse_fields(text: &str) -> Vec<Field> {
    let (items, last) = scan::split_at_depth(text, kw::COMMA);
    items
        .into_iter()
        .chain(std::iter::once(last))
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| {
            if let Some(i) = scan::keyword_at_depth(f, kw::AS) {
                Field::aliased(f[..i].trim_end(), &f[i..])
            } else if f.ends_with(kw::RIGHT_BRACKET) {
                Field::named(f)
            } else if let Some(i) = f.rfind(' ') {
                Field::aliased(&f[..i], &f[i + 1..])
            } else {
                Field::named(f)
            }
        })
        .collect()
}

/// Splits a group by / order by value list on depth-zero commas.
fn split_values(text: &str) -> Vec<String> {
    let (items, last) = scan::split_at_depth(text, kw::COMMA);
    items
        .into_iter()
        .chain(std::iter::once(last))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{JoinKind, Operand, TableRef};

    #[test]
    fn test_simple_select() {
        let s = parse("select a, b from t where a = 1 and b = 2").unwrap();
        assert_eq!(s.fields.len(), 2);
        assert!(s.joins.is_empty());
        assert_eq!(s.where_clause.len(), 2);
        assert_eq!(s.table, TableRef::named("t"));
    }

    #[test]
    fn test_field_aliases() {
        let s = parse("select a as x, sum(b) total, count(*) from t").unwrap();
        assert_eq!(s.fields[0].name, "a");
        assert_eq!(s.fields[0].alias.as_deref(), Some("as x"));
        assert_eq!(s.fields[1].name, "sum(b)");
        assert_eq!(s.fields[1].alias.as_deref(), Some("total"));
        assert_eq!(s.fields[2].name, "count(*)");
        assert_eq!(s.fields[2].alias, None);
    }

    #[test]
    fn test_as_inside_function_is_not_an_alias_split() {
        let s = parse("select cast(a as int) x from t").unwrap();
        assert_eq!(s.fields[0].name, "cast(a as int)");
        assert_eq!(s.fields[0].alias.as_deref(), Some("x"));
    }

    #[test]
    fn test_distinct_flag() {
        let s = parse("select distinct a from t").unwrap();
        assert!(s.distinct);
        assert_eq!(s.fields[0].name, "a");
    }

    #[test]
    fn test_function_commas_do_not_split_fields() {
        let s = parse("select coalesce(a, b), c from t").unwrap();
        assert_eq!(s.fields.len(), 2);
        assert_eq!(s.fields[0].name, "coalesce(a, b)");
    }

    #[test]
    fn test_group_by_having_order_by_limit() {
        let s = parse(
            "select a, count(*) c from t where x = 1 group by a having count(*) > 2 order by a desc limit 10",
        )
        .unwrap();
        assert_eq!(s.group_by, vec![String::from("a")]);
        assert_eq!(s.having.len(), 1);
        assert_eq!(s.order_by, vec![String::from("a desc")]);
        assert_eq!(s.limit.as_deref(), Some("10"));
    }

    #[test]
    fn test_subquery_order_by_stays_inside() {
        let s = parse("select * from (select a from t order by a) s").unwrap();
        assert!(s.order_by.is_empty());
        let TableRef::Derived { query, .. } = &s.table else {
            panic!("expected derived table");
        };
        assert_eq!(query.order_by, vec![String::from("a")]);
    }

    #[test]
    fn test_subquery_limit_stays_inside() {
        let s = parse("select * from (select a from t limit 5) s").unwrap();
        assert!(s.limit.is_none());
        let TableRef::Derived { query, .. } = &s.table else {
            panic!("expected derived table");
        };
        assert_eq!(query.limit.as_deref(), Some("5"));
    }

    #[test]
    fn test_join_resolution() {
        let s = parse("select u.id from users u left join orders o on u.id = o.uid where o.total > 5")
            .unwrap();
        assert_eq!(s.joins.len(), 1);
        assert_eq!(s.joins[0].kind, JoinKind::Left);
        assert_eq!(s.joins[0].on, "u.id = o.uid");
        assert_eq!(s.where_clause.len(), 1);
    }

    #[test]
    fn test_where_in_subquery_limit_is_not_the_outer_limit() {
        let s = parse("select a from t where id in (select b from u limit 3)").unwrap();
        assert!(s.limit.is_none());
        let Operand::Query(q) = (match &s.where_clause[0] {
            crate::ast::Condition::Leaf { operand, .. } => operand,
            crate::ast::Condition::Group { .. } => panic!("expected leaf"),
        }) else {
            panic!("expected subquery operand");
        };
        assert_eq!(q.limit.as_deref(), Some("3"));
    }

    #[test]
    fn test_missing_from_is_malformed() {
        assert!(matches!(
            parse("select 1"),
            Err(ParseError::MalformedClause { clause: "from", .. })
        ));
    }

    #[test]
    fn test_uppercase_input_is_normalized() {
        let s = parse("SELECT A FROM T WHERE B = 1").unwrap();
        assert_eq!(s.table, TableRef::named("T"));
        assert_eq!(s.fields[0].name, "A");
    }
}
