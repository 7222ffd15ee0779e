//! DELETE clause extraction.

use crate::ast::DeleteStatement;
use crate::keywords::{self as kw, normalize_keywords};
use crate::scan;

use super::condition;
use super::error::Result;
use super::table;

/// Parses `delete from <table> [where …]`.
pub(super) fn parse(text: &str) -> Result<DeleteStatement> {
    let text = normalize_keywords(text.trim());
    let mut rest = text.as_str();
    if let Some(stripped) = rest.strip_prefix(kw::DELETE) {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix(kw::FROM) {
        rest = stripped.trim_start();
    }

    let (table_text, where_text) = match scan::keyword_at_depth(rest, kw::WHERE) {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };
    let table = table::parse_target(table_text, "delete")?;
    let (where_clause, _) = condition::extract_where(where_text)?;
    Ok(DeleteStatement {
        table,
        where_clause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TableRef;

    #[test]
    fn test_delete_with_where() {
        let d = parse("delete from t where id = 1").unwrap();
        assert_eq!(d.table, TableRef::named("t"));
        assert_eq!(d.where_clause.len(), 1);
    }

    #[test]
    fn test_delete_whole_table() {
        let d = parse("delete from logs").unwrap();
        assert_eq!(d.table, TableRef::named("logs"));
        assert!(d.where_clause.is_empty());
    }

    #[test]
    fn test_delete_with_alias() {
        let d = parse("delete from logs l where l.level = 0").unwrap();
        assert_eq!(d.table.alias(), Some("l"));
    }

    #[test]
    fn test_delete_missing_table() {
        assert!(parse("delete from  where id = 1").is_err());
    }
}
