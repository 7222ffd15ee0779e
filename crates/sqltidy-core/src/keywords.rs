//! Keyword and symbol constants, keyword-case normalization, and the
//! column-type lookup table.
//!
//! The canonical keyword case throughout the crate is lowercase: every
//! parser scans lowercase keywords and the layout engine emits them.

/// Single blank, the only whitespace left after normalization.
pub const BLANK: &str = " ";
pub const LEFT_BRACKET: &str = "(";
pub const RIGHT_BRACKET: &str = ")";
pub const COMMA: &str = ",";
pub const SEMICOLON: &str = ";";
pub const EQ: &str = "=";

pub const SELECT: &str = "select";
pub const UPDATE: &str = "update";
pub const DELETE: &str = "delete";
pub const INSERT: &str = "insert";
pub const CREATE: &str = "create";
pub const INTO: &str = "into";
pub const VALUE: &str = "value";
pub const VALUES: &str = "values";
pub const TABLE: &str = "table";
pub const FROM: &str = "from";
pub const WHERE: &str = "where";
pub const SET: &str = "set";
pub const LEFT: &str = "left";
pub const RIGHT: &str = "right";
pub const INNER: &str = "inner";
pub const OUTER: &str = "outer";
pub const JOIN: &str = "join";
pub const GROUP_BY: &str = "group by";
pub const ORDER_BY: &str = "order by";
pub const HAVING: &str = "having";
pub const LIMIT: &str = "limit";
pub const AS: &str = "as";
pub const AND: &str = "and";
pub const ON: &str = "on";
pub const OR: &str = "or";
pub const IN: &str = "in";
pub const NOT_IN: &str = "not in";
pub const IS: &str = "is";
pub const IS_NOT: &str = "is not";
pub const LIKE: &str = "like";
pub const DISTINCT: &str = "distinct";
pub const NOT_NULL: &str = "not null";
pub const DEFAULT: &str = "default";
pub const COMMENT: &str = "comment";

/// Every single-word keyword the normalizer rewrites to lowercase.
pub const NORMALIZED: &[&str] = &[
    "select", "update", "create", "delete", "insert", "into", "from", "where", "set", "join",
    "group", "order", "having", "limit", "offset", "asc", "desc", "case", "when", "then", "end",
    "inner", "outer", "left", "right", "distinct", "partition", "over", "as", "and", "on", "or",
    "in", "not", "like", "by", "values", "value", "table", "is", "null", "default", "comment",
];

/// Lowercases every whitespace-delimited word that is a recognized
/// keyword, leaving identifiers and shielded literals untouched.
///
/// Whole-word comparison reproduces the scanner's boundary rule: `ORDER`
/// inside `REORDER` or `AS` inside `ALIAS` never matches because a word is
/// a maximal run of non-whitespace.
#[must_use]
pub fn normalize_keywords(sql: &str) -> String {
    sql.split(' ')
        .map(|word| {
            if NORMALIZED.iter().any(|kw| word.eq_ignore_ascii_case(kw)) {
                word.to_ascii_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(BLANK)
}

/// Maps a SQL column type name to the Rust type used when generating
/// bindings for it. Unknown types fall back to `String`.
#[must_use]
pub fn rust_type_for(column_type: &str) -> &'static str {
    match column_type.to_ascii_lowercase().as_str() {
        "int" | "int2" | "int4" | "tinyint" | "smallint" | "mediumint" | "integer" => "i32",
        "int8" | "bigint" => "i64",
        "float" | "float4" | "float8" | "double" | "numeric" | "decimal" | "real" => "f64",
        "bool" | "boolean" => "bool",
        "timestamp" | "timestamptz" | "datetime" | "time" | "date" => "chrono::NaiveDateTime",
        _ => "String",
    }
}
