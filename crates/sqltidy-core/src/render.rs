//! The layout engine.
//!
//! A deterministic function from a statement tree to indented, aligned
//! SQL text. Clause keywords are right-aligned within the indent width,
//! field lists wrap by the count/width heuristics below, and nested
//! selects recurse with a bumped indent. Literal placeholders are left in
//! place here; the owning [`crate::parser::Parsed`] restores them as the
//! very last step.

use crate::ast::{
    Condition, DeleteStatement, InsertSource, InsertStatement, JoinKind, Operand,
    SelectStatement, Statement, TableRef, UpdateStatement,
};
use crate::keywords as kw;

/// Base indentation unit in columns.
const BASE_INDENT: usize = 6;
/// Indent bump for a derived-table subquery.
const DERIVED_INDENT: usize = 2;
/// Constant added to the field-name length for `in (select …)` subqueries.
const IN_QUERY_INDENT: usize = 6;
/// Select fields wrap one-per-line from this field count (or any alias).
const SELECT_FIELD_WRAP: usize = 6;
/// Insert column list wraps beyond this cumulative name length …
const INSERT_NAME_WRAP: usize = 120;
/// … or beyond this column count.
const INSERT_FIELD_WRAP: usize = 10;
/// `in (…)` lists wrap when holding more values than this.
const IN_LIST_WRAP: usize = 3;
/// group by / order by values wrap beyond this cumulative length.
const VALUE_WRAP: usize = 100;

/// Renders a statement tree as formatted SQL with `base_indent` extra
/// columns of indentation. Pure: same tree, same text.
#[must_use]
pub fn render(stmt: &Statement, base_indent: usize) -> String {
    match stmt {
        Statement::Select(s) => render_select(s, base_indent),
        Statement::Insert(i) => render_insert(i, base_indent),
        Statement::Update(u) => render_update(u, base_indent),
        Statement::Delete(d) => render_delete(d, base_indent),
        Statement::Create(c) => c.raw.clone(),
    }
}

fn spaces(n: usize) -> String {
    kw::BLANK.repeat(n)
}

/// Right-aligns a clause keyword within the indent width. Multi-word
/// keywords align on their first word; a word wider than the indent is
/// emitted as-is.
fn align(word: &str, indent: usize) -> String {
    if word.len() <= indent {
        return spaces(indent - word.len()) + word;
    }
    let first = word.split(' ').next().unwrap_or(word);
    if first.len() <= indent {
        spaces(indent - first.len()) + word
    } else {
        word.to_string()
    }
}

fn render_select(s: &SelectStatement, extra: usize) -> String {
    let indent = BASE_INDENT + extra;
    let mut out = String::from(kw::SELECT);
    out.push(' ');
    let mut lead = 1;
    if s.distinct {
        out.push_str(kw::DISTINCT);
        out.push(' ');
        lead += kw::DISTINCT.len() + 1;
    }

    let max_name = s.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    let wrap = s.fields.iter().any(|f| f.alias.is_some()) || s.fields.len() >= SELECT_FIELD_WRAP;
    for (i, field) in s.fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
            if wrap {
                out.push('\n');
                out.push_str(&spaces(indent + lead));
            } else {
                out.push(' ');
            }
        }
        out.push_str(&field.name);
        if let Some(alias) = &field.alias {
            out.push_str(&spaces(max_name - field.name.len() + 1));
            out.push_str(alias);
        }
    }

    out.push('\n');
    out.push_str(&align(kw::FROM, indent));
    out.push(' ');
    out.push_str(&render_table(&s.table, extra, true));
    for join in &s.joins {
        out.push('\n');
        if join.kind == JoinKind::Unspecified {
            out.push_str(&align(kw::JOIN, indent));
        } else {
            out.push_str(&align(join.kind.as_str(), indent));
            out.push(' ');
            out.push_str(kw::JOIN);
        }
        out.push(' ');
        out.push_str(&render_table(&join.table, extra, true));
        if !join.on.is_empty() {
            out.push('\n');
            out.push_str(&align(kw::ON, indent));
            out.push(' ');
            out.push_str(&join.on);
        }
    }

    render_condition_block(&mut out, kw::WHERE, &s.where_clause, indent, extra);
    render_value_block(&mut out, kw::GROUP_BY, &s.group_by, indent);
    render_condition_block(&mut out, kw::HAVING, &s.having, indent, extra);
    render_value_block(&mut out, kw::ORDER_BY, &s.order_by, indent);
    if let Some(limit) = &s.limit {
        out.push('\n');
        out.push_str(&align(kw::LIMIT, indent));
        out.push(' ');
        out.push_str(limit);
    }
    out
}

fn render_table(table: &TableRef, extra: usize, with_as: bool) -> String {
    let (body, alias) = match table {
        TableRef::Named { name, alias } => (name.clone(), alias),
        TableRef::Derived { query, alias } => {
            let mut body = String::from(kw::LEFT_BRACKET);
            body.push_str(&render_select(query, extra + DERIVED_INDENT));
            body.push_str(kw::RIGHT_BRACKET);
            (body, alias)
        }
    };
    match alias {
        Some(alias) if with_as => format!("{body} {} {alias}", kw::AS),
        Some(alias) => format!("{body} {alias}"),
        None => body,
    }
}

/// Writes a WHERE/HAVING block: the first condition inline after the
/// clause keyword, every further condition on its own line behind its
/// right-aligned relation keyword.
fn render_condition_block(
    out: &mut String,
    clause: &str,
    conditions: &[Condition],
    indent: usize,
    extra: usize,
) {
    if conditions.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(&align(clause, indent));
    out.push(' ');
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            let relation = condition.relation().map_or(kw::AND, |r| r.as_str());
            out.push_str(&align(relation, indent));
            out.push(' ');
        }
        out.push_str(&condition_text(condition, indent + 1, extra));
    }
}

/// Renders one condition starting at column `col`. Groups render inline
/// with their children; `in (…)` lists wrap one-per-line past the wrap
/// threshold, aligned one column after the opening bracket.
fn condition_text(condition: &Condition, col: usize, extra: usize) -> String {
    match condition {
        Condition::Group { children, .. } => {
            let mut out = String::from(kw::LEFT_BRACKET);
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                    out.push_str(child.relation().map_or(kw::AND, |r| r.as_str()));
                    out.push(' ');
                }
                let child_col = col + out.len();
                out.push_str(&condition_text(child, child_col, extra));
            }
            out.push_str(kw::RIGHT_BRACKET);
            out
        }
        Condition::Leaf { field, op: None, .. } => field.clone(),
        Condition::Leaf {
            field,
            op: Some(op),
            operand,
            ..
        } => {
            let mut out = format!("{field} {}", op.as_str());
            match operand {
                Operand::None => {}
                Operand::Value(value) => {
                    out.push(' ');
                    out.push_str(value);
                }
                Operand::List(values) => {
                    out.push(' ');
                    out.push_str(kw::LEFT_BRACKET);
                    let continuation = col + field.len() + op.as_str().len() + 3;
                    let wrap = values.len() > IN_LIST_WRAP;
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                            if wrap {
                                out.push('\n');
                                out.push_str(&spaces(continuation));
                            } else {
                                out.push(' ');
                            }
                        }
                        out.push_str(value);
                    }
                    out.push_str(kw::RIGHT_BRACKET);
                }
                Operand::Query(query) => {
                    out.push(' ');
                    out.push_str(kw::LEFT_BRACKET);
                    out.push_str(&render_select(query, extra + field.len() + IN_QUERY_INDENT));
                    out.push_str(kw::RIGHT_BRACKET);
                }
            }
            out
        }
    }
}

/// Writes a GROUP BY / ORDER BY block, wrapping one value per line when
/// the cumulative value length exceeds the wrap threshold.
fn render_value_block(out: &mut String, clause: &str, values: &[String], indent: usize) {
    if values.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(&align(clause, indent));
    out.push(' ');
    let total: usize = values.iter().map(String::len).sum();
    let wrap = total > VALUE_WRAP;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
            if wrap {
                out.push('\n');
                out.push_str(&spaces(indent + 4));
            } else {
                out.push(' ');
            }
        }
        out.push_str(value);
    }
}

fn render_insert(insert: &InsertStatement, extra: usize) -> String {
    let indent = BASE_INDENT + extra;
    let mut out = String::from(kw::INSERT);
    out.push(' ');
    out.push_str(kw::INTO);
    out.push(' ');
    out.push_str(&render_table(&insert.table, extra, false));
    out.push('\n');

    let total: usize = insert.fields.iter().map(|f| f.name.len()).sum();
    let wrap = total > INSERT_NAME_WRAP || insert.fields.len() > INSERT_FIELD_WRAP;
    out.push_str(&align(kw::LEFT_BRACKET, indent));
    for (i, field) in insert.fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
            if wrap {
                out.push('\n');
                out.push_str(&spaces(indent));
            } else {
                out.push(' ');
            }
        }
        out.push_str(&field.name);
    }
    out.push_str(kw::RIGHT_BRACKET);
    out.push('\n');

    match &insert.source {
        InsertSource::Query(query) => out.push_str(&render_select(query, extra)),
        InsertSource::Rows(rows) => {
            out.push_str(kw::VALUES);
            out.push('\n');
            let wrap_values = insert.fields.len() >= INSERT_FIELD_WRAP;
            for (r, row) in rows.iter().enumerate() {
                if r > 0 {
                    out.push(',');
                    out.push('\n');
                }
                out.push_str(&align(kw::LEFT_BRACKET, indent));
                for (i, value) in row.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                        if wrap_values {
                            out.push('\n');
                            out.push_str(&spaces(indent));
                        } else {
                            out.push(' ');
                        }
                    }
                    out.push_str(value);
                }
                if wrap_values {
                    out.push('\n');
                    out.push_str(&align(kw::RIGHT_BRACKET, indent));
                } else {
                    out.push_str(kw::RIGHT_BRACKET);
                }
            }
        }
    }
    out
}

fn render_update(update: &UpdateStatement, extra: usize) -> String {
    let indent = BASE_INDENT + extra;
    let mut out = String::from(kw::UPDATE);
    out.push(' ');
    out.push_str(&render_table(&update.table, extra, false));
    out.push('\n');

    let max_name = update
        .assignments
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(0);
    for (i, assignment) in update.assignments.iter().enumerate() {
        if i == 0 {
            out.push_str(&align(kw::SET, indent));
        } else {
            out.push(',');
            out.push('\n');
            out.push_str(&spaces(indent));
        }
        out.push(' ');
        out.push_str(&assignment.name);
        out.push_str(&spaces(max_name - assignment.name.len() + 1));
        out.push_str(kw::EQ);
        out.push(' ');
        out.push_str(assignment.value.as_deref().unwrap_or_default());
    }

    render_condition_block(&mut out, kw::WHERE, &update.where_clause, indent, extra);
    out
}

fn render_delete(delete: &DeleteStatement, extra: usize) -> String {
    let indent = BASE_INDENT + extra;
    let mut out = String::from(kw::DELETE);
    out.push('\n');
    out.push_str(&align(kw::FROM, indent));
    out.push(' ');
    out.push_str(&render_table(&delete.table, extra, false));
    render_condition_block(&mut out, kw::WHERE, &delete.where_clause, indent, extra);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, Relation};

    #[test]
    fn test_align_right_aligns_within_indent() {
        assert_eq!(align("from", 6), "  from");
        assert_eq!(align("where", 6), " where");
        assert_eq!(align("and", 6), "   and");
        assert_eq!(align("on", 6), "    on");
        assert_eq!(align("group by", 6), " group by");
        assert_eq!(align("(", 6), "     (");
    }

    #[test]
    fn test_simple_select_layout() {
        let stmt = Statement::Select(SelectStatement {
            distinct: false,
            fields: vec![Field::named("a"), Field::named("b")],
            table: TableRef::named("t"),
            joins: vec![],
            where_clause: vec![
                Condition::Leaf {
                    relation: None,
                    field: String::from("a"),
                    op: Some(crate::ast::Operator::Eq),
                    operand: Operand::Value(String::from("1")),
                },
                Condition::Leaf {
                    relation: Some(Relation::And),
                    field: String::from("b"),
                    op: Some(crate::ast::Operator::Eq),
                    operand: Operand::Value(String::from("2")),
                },
            ],
            group_by: vec![],
            having: vec![],
            order_by: vec![],
            limit: None,
        });
        assert_eq!(
            render(&stmt, 0),
            "select a, b\n  from t\n where a = 1\n   and b = 2"
        );
    }

    #[test]
    fn test_select_alias_column_alignment() {
        let stmt = Statement::Select(SelectStatement {
            distinct: false,
            fields: vec![
                Field::aliased("user_name", "as n"),
                Field::aliased("id", "i"),
            ],
            table: TableRef::named("t"),
            joins: vec![],
            where_clause: vec![],
            group_by: vec![],
            having: vec![],
            order_by: vec![],
            limit: None,
        });
        assert_eq!(
            render(&stmt, 0),
            "select user_name as n,\n       id        i\n  from t"
        );
    }

    #[test]
    fn test_in_list_wraps_past_three_values() {
        let condition = Condition::Leaf {
            relation: None,
            field: String::from("id"),
            op: Some(crate::ast::Operator::In),
            operand: Operand::List(
                ["1", "2", "3", "4", "5"].iter().map(|s| String::from(*s)).collect(),
            ),
        };
        let text = condition_text(&condition, 7, 0);
        assert_eq!(
            text,
            "id in (1,\n              2,\n              3,\n              4,\n              5)"
        );
    }

    #[test]
    fn test_in_list_of_three_stays_inline() {
        let condition = Condition::Leaf {
            relation: None,
            field: String::from("id"),
            op: Some(crate::ast::Operator::In),
            operand: Operand::List(vec![
                String::from("1"),
                String::from("2"),
                String::from("3"),
            ]),
        };
        assert_eq!(condition_text(&condition, 7, 0), "id in (1, 2, 3)");
    }

    #[test]
    fn test_unspecified_join_shifts_left() {
        let mut out = String::new();
        out.push_str(&align("left", 6));
        out.push(' ');
        out.push_str("join");
        assert_eq!(out, "  left join");
        assert_eq!(align("join", 6), "  join");
    }
}
