//! End-to-end parse + render tests.
//!
//! Covers the five statement kinds, the layout heuristics, literal
//! round-trip safety, and formatting idempotence.

use sqltidy_core::ast::{
    Condition, InsertSource, JoinKind, Operand, Operator, Relation, SelectStatement, Statement,
    TableRef,
};
use sqltidy_core::{beautify, parse, ParseError};

// ===================================================================
// Helper functions
// ===================================================================

fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql).unwrap().into_statement() {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

fn pretty(sql: &str) -> String {
    beautify(sql).unwrap_or_else(|e| panic!("Failed to beautify: {sql}\nError: {e}"))
}

/// Verifies that formatting is a fixed point: beautifying the beautified
/// output must reproduce it byte for byte.
fn round_trip(sql: &str) {
    let first = pretty(sql);
    let second = pretty(&first);
    assert_eq!(
        first, second,
        "Formatting is not a fixed point.\n  Input:  {sql}\n  First:  {first}\n  Second: {second}"
    );
}

// ===================================================================
// 1. SELECT
// ===================================================================

#[test]
fn select_two_fields_two_conditions() {
    let s = parse_select("SELECT a, b FROM t WHERE a = 1 AND b = 2");
    assert_eq!(s.fields.len(), 2);
    assert!(s.joins.is_empty());
    assert_eq!(s.where_clause.len(), 2);
    let Condition::Leaf {
        relation, field, ..
    } = &s.where_clause[1]
    else {
        panic!("Expected leaf condition");
    };
    assert_eq!(*relation, Some(Relation::And));
    assert_eq!(field, "b");

    assert_eq!(
        pretty("SELECT a, b FROM t WHERE a = 1 AND b = 2"),
        "select a, b\n  from t\n where a = 1\n   and b = 2"
    );
    round_trip("SELECT a, b FROM t WHERE a = 1 AND b = 2");
}

#[test]
fn select_six_fields_wrap_one_per_line() {
    let out = pretty("select a, b, c, d, e, f from t");
    assert_eq!(
        out,
        "select a,\n       b,\n       c,\n       d,\n       e,\n       f\n  from t"
    );
    round_trip("select a, b, c, d, e, f from t");
}

#[test]
fn select_aliases_align_in_a_column() {
    let out = pretty("select user_name as n, id i from t");
    assert_eq!(out, "select user_name as n,\n       id        i\n  from t");
    round_trip("select user_name as n, id i from t");
}

#[test]
fn select_distinct_keeps_inline_fields() {
    let out = pretty("SELECT DISTINCT a, b FROM t");
    assert_eq!(out, "select distinct a, b\n  from t");
    round_trip("SELECT DISTINCT a, b FROM t");
}

#[test]
fn select_group_order_limit_layout() {
    let out = pretty("select a, count(*) c from t group by a having count(*) > 1 order by a limit 5");
    assert_eq!(
        out,
        "select a,\n       count(*) c\n  from t\n group by a\nhaving count(*) > 1\n order by a\n limit 5"
    );
    round_trip("select a, count(*) c from t group by a having count(*) > 1 order by a limit 5");
}

#[test]
fn select_join_alignment() {
    let out = pretty(
        "select u.id from users u left join orders o on u.id = o.uid join flags f on f.uid = u.id",
    );
    assert_eq!(
        out,
        "select u.id\n  from users as u\n  left join orders as o\n    on u.id = o.uid\n  join flags as f\n    on f.uid = u.id"
    );
    round_trip(
        "select u.id from users u left join orders o on u.id = o.uid join flags f on f.uid = u.id",
    );
}

// ===================================================================
// 2. Derived tables
// ===================================================================

#[test]
fn derived_table_populates_nested_select() {
    let s = parse_select("SELECT * FROM (SELECT id FROM t2) AS sub");
    let TableRef::Derived { query, alias } = &s.table else {
        panic!("Expected derived table, got {:?}", s.table);
    };
    assert_eq!(alias.as_deref(), Some("sub"));
    assert_eq!(query.fields[0].name, "id");
    assert_eq!(query.table, TableRef::named("t2"));
}

#[test]
fn derived_table_indents_deeper_than_outer() {
    let out = pretty("SELECT * FROM (SELECT id FROM t2) AS sub");
    assert_eq!(
        out,
        "select *\n  from (select id\n    from t2) as sub"
    );
    round_trip("SELECT * FROM (SELECT id FROM t2) AS sub");
}

// ===================================================================
// 3. INSERT
// ===================================================================

#[test]
fn insert_rows_layout() {
    let parsed = parse("INSERT INTO t (a,b) VALUES (1,2),(3,4)").unwrap();
    let Statement::Insert(i) = parsed.statement() else {
        panic!("Expected INSERT");
    };
    assert_eq!(i.fields.len(), 2);
    let InsertSource::Rows(rows) = &i.source else {
        panic!("Expected value rows");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.len() == 2));

    assert_eq!(
        parsed.render(),
        "insert into t\n     (a, b)\nvalues\n     (1, 2),\n     (3, 4)"
    );
    round_trip("INSERT INTO t (a,b) VALUES (1,2),(3,4)");
}

#[test]
fn insert_select_renders_the_projection() {
    let out = pretty("insert into t (a,b) select x, y from s");
    assert_eq!(out, "insert into t\n     (a, b)\nselect x, y\n  from s");
    round_trip("insert into t (a,b) select x, y from s");
}

#[test]
fn insert_wide_column_list_wraps() {
    let out = pretty(
        "insert into t (c1,c2,c3,c4,c5,c6,c7,c8,c9,c10,c11) values (1,2,3,4,5,6,7,8,9,10,11)",
    );
    assert!(out.contains("     (c1,\n      c2,"));
    round_trip("insert into t (c1,c2,c3,c4,c5,c6,c7,c8,c9,c10,c11) values (1,2,3,4,5,6,7,8,9,10,11)");
}

#[test]
fn insert_row_arity_mismatch_is_fatal() {
    let err = parse("INSERT INTO t (a,b) VALUES (1,2),(3)").unwrap_err();
    assert_eq!(
        err,
        ParseError::FieldValueArityMismatch {
            columns: 2,
            values: 1
        }
    );
}

#[test]
fn insert_select_arity_mismatch_is_fatal() {
    let err = parse("INSERT INTO t (a,b) SELECT x FROM s").unwrap_err();
    assert!(matches!(err, ParseError::FieldValueArityMismatch { .. }));
}

// ===================================================================
// 4. UPDATE
// ===================================================================

#[test]
fn update_assignments_align_equals() {
    let out = pretty("UPDATE t SET x = 'a', y = 2 WHERE id IN (1,2,3,4,5)");
    assert_eq!(
        out,
        "update t\n   set x = 'a',\n       y = 2\n where id in (1,\n              2,\n              3,\n              4,\n              5)"
    );
    round_trip("UPDATE t SET x = 'a', y = 2 WHERE id IN (1,2,3,4,5)");
}

#[test]
fn update_longer_names_pad_shorter_ones() {
    let out = pretty("update t set counter = 1, x = 2");
    assert_eq!(out, "update t\n   set counter = 1,\n       x       = 2");
    round_trip("update t set counter = 1, x = 2");
}

#[test]
fn update_in_list_of_three_stays_inline() {
    let out = pretty("update t set x = 1 where id in (1,2,3)");
    assert_eq!(out, "update t\n   set x = 1\n where id in (1, 2, 3)");
    round_trip("update t set x = 1 where id in (1,2,3)");
}

// ===================================================================
// 5. DELETE
// ===================================================================

#[test]
fn delete_layout() {
    let out = pretty("DELETE FROM logs WHERE level = 0 AND age > 30");
    assert_eq!(
        out,
        "delete\n  from logs\n where level = 0\n   and age > 30"
    );
    round_trip("DELETE FROM logs WHERE level = 0 AND age > 30");
}

// ===================================================================
// 6. CREATE
// ===================================================================

#[test]
fn create_renders_as_a_pass_through() {
    let input = "CREATE TABLE users (id BIGINT NOT NULL, name VARCHAR(100))";
    let out = pretty(input);
    // Keyword case folds word-wise; `NULL,` carries its comma and stays as
    // written, like any other non-keyword word.
    assert_eq!(out, "create table users (id BIGINT not NULL, name VARCHAR(100))");
    round_trip(input);
}

#[test]
fn create_column_metadata() {
    let parsed = parse("create table m (price numeric(10, 2) not null)").unwrap();
    let Statement::Create(c) = parsed.statement() else {
        panic!("Expected CREATE");
    };
    assert_eq!(c.fields[0].name, "price");
    assert_eq!(c.fields[0].precision, Some(10));
    assert_eq!(c.fields[0].scale, Some(2));
    assert!(!c.fields[0].nullable);
}

// ===================================================================
// 7. Literal safety
// ===================================================================

#[test]
fn literal_with_keywords_survives_verbatim() {
    let out = pretty("select a from t where note = 'select * from x'");
    assert!(out.contains("'select * from x'"));
    assert_eq!(
        out,
        "select a\n  from t\n where note = 'select * from x'"
    );
    round_trip("select a from t where note = 'select * from x'");
}

#[test]
fn literal_with_unbalanced_bracket_survives() {
    let out = pretty("select a from t where note = ') oops ('");
    assert!(out.contains("') oops ('"));
    round_trip("select a from t where note = ') oops ('");
}

#[test]
fn literal_spacing_is_byte_exact() {
    let out = pretty("select a from t where note = 'two  spaces   here'");
    assert!(out.contains("'two  spaces   here'"));
}

#[test]
fn literal_keyword_case_is_untouched() {
    let out = pretty("select a from t where note = 'FROM WHERE AND'");
    assert!(out.contains("'FROM WHERE AND'"));
}

// ===================================================================
// 8. Error cases
// ===================================================================

#[test]
fn unterminated_bracket_is_unbalanced() {
    let err = parse("SELECT a FROM (SELECT b FROM t").unwrap_err();
    assert!(matches!(err, ParseError::UnbalancedBrackets(_)));
}

#[test]
fn unknown_leading_keyword_is_unsupported() {
    let err = parse("TRUNCATE TABLE t").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnsupportedStatement(String::from("truncate"))
    );
}

#[test]
fn select_without_from_is_malformed() {
    let err = parse("select 1 + 1").unwrap_err();
    assert!(matches!(err, ParseError::MalformedClause { .. }));
}

// ===================================================================
// 9. Condition trees
// ===================================================================

#[test]
fn grouped_conditions_render_inline() {
    let out = pretty("select a from t where a = 1 and (b = 2 or c = 3)");
    assert_eq!(
        out,
        "select a\n  from t\n where a = 1\n   and (b = 2 or c = 3)"
    );
    round_trip("select a from t where a = 1 and (b = 2 or c = 3)");
}

#[test]
fn in_subquery_parses_and_renders() {
    let sql = "select a from t where id in (select uid from grants where ok = 1)";
    let s = parse_select(sql);
    let Condition::Leaf {
        op: Some(Operator::In),
        operand: Operand::Query(query),
        ..
    } = &s.where_clause[0]
    else {
        panic!("Expected in-subquery leaf");
    };
    assert_eq!(query.table, TableRef::named("grants"));
    round_trip(sql);
}

#[test]
fn is_not_null_condition() {
    let out = pretty("select a from t where b is not null");
    assert_eq!(out, "select a\n  from t\n where b is not null");
    round_trip("select a from t where b is not null");
}

#[test]
fn or_relation_alignment() {
    let out = pretty("select a from t where a = 1 or b = 2");
    assert_eq!(out, "select a\n  from t\n where a = 1\n    or b = 2");
    round_trip("select a from t where a = 1 or b = 2");
}

// ===================================================================
// 10. Statement-level round trips
// ===================================================================

#[test]
fn assorted_round_trips() {
    round_trip("select * from t");
    round_trip("select a from t where x != 3 and y >= 4 and z like 'p%'");
    round_trip("select a from (select a from inner_t where b = 1) s where a < 10");
    round_trip("update counters set n = n + 1 where key = 'hits'");
    round_trip("delete from t");
    round_trip("insert into t (a) values (1)");
}

#[test]
fn join_kinds_survive_round_trips() {
    let s = parse_select("select a from x right join y on x.a = y.a");
    assert_eq!(s.joins[0].kind, JoinKind::Right);
    round_trip("select a from x right join y on x.a = y.a");
    round_trip("select a from x join y on x.a = y.a");
}
