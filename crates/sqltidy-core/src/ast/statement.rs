//! SQL statement tree types.

use super::condition::Condition;

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// OUTER JOIN.
    Outer,
    /// Bare JOIN with no kind keyword.
    #[default]
    Unspecified,
}

impl JoinKind {
    /// Returns the SQL keyword, empty for an unspecified join.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Outer => "outer",
            Self::Unspecified => "",
        }
    }

    /// Maps a join kind keyword to its variant.
    #[must_use]
    pub fn from_keyword(kw: &str) -> Self {
        match kw {
            "inner" => Self::Inner,
            "left" => Self::Left,
            "right" => Self::Right,
            "outer" => Self::Outer,
            _ => Self::Unspecified,
        }
    }
}

/// A JOIN clause, applied left to right against the evolving table list.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The kind of join.
    pub kind: JoinKind,
    /// The joined table.
    pub table: TableRef,
    /// The raw ON condition text.
    pub on: String,
}

/// A table reference in FROM, JOIN, UPDATE, INSERT or DELETE position.
///
/// Exactly one of a table name or a derived-table subquery; the enum
/// makes the "never both" invariant unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A plain table name.
    Named {
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// A derived table: a subquery in table position.
    Derived {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias.
        alias: Option<String>,
    },
}

impl TableRef {
    /// Creates a plain table reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            alias: None,
        }
    }

    /// The alias, whichever variant carries it.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Named { alias, .. } | Self::Derived { alias, .. } => alias.as_deref(),
        }
    }
}

/// A field: a projected expression, an assignment target, or a column
/// definition, depending on the owning statement.
///
/// In SELECT, `name` holds the expression text (possibly a nested function
/// call or subquery kept opaque) and `alias` the trailing alias text. In
/// UPDATE, `name` and `value` form an assignment pair. The type metadata is
/// populated only when parsing CREATE column definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    /// Expression, column, or assignment-target text.
    pub name: String,
    /// Alias text, including a leading `as ` when the source used one.
    pub alias: Option<String>,
    /// Assignment value (UPDATE only).
    pub value: Option<String>,
    /// Column type name (CREATE only).
    pub column_type: Option<String>,
    /// Type precision (CREATE only).
    pub precision: Option<u16>,
    /// Type scale (CREATE only).
    pub scale: Option<u16>,
    /// Whether the column admits NULL (CREATE only).
    pub nullable: bool,
    /// Column default expression (CREATE only).
    pub default: Option<String>,
    /// Column comment (CREATE only).
    pub comment: Option<String>,
}

impl Field {
    /// Creates a bare named field.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            ..Self::default()
        }
    }

    /// Creates an aliased field.
    #[must_use]
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::named(name)
        }
    }

    /// Creates an UPDATE assignment pair.
    #[must_use]
    pub fn assignment(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::named(name)
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// Whether DISTINCT was present.
    pub distinct: bool,
    /// Projected fields.
    pub fields: Vec<Field>,
    /// The FROM table.
    pub table: TableRef,
    /// Joined tables, in application order.
    pub joins: Vec<JoinClause>,
    /// WHERE conditions.
    pub where_clause: Vec<Condition>,
    /// GROUP BY value texts.
    pub group_by: Vec<String>,
    /// HAVING conditions.
    pub having: Vec<Condition>,
    /// ORDER BY value texts.
    pub order_by: Vec<String>,
    /// LIMIT text.
    pub limit: Option<String>,
}

/// Source of the inserted data: literal rows or a projecting subquery.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (…), (…), …; every row's arity equals the column count.
    Rows(Vec<Vec<String>>),
    /// INSERT … SELECT; the projection arity equals the column count.
    Query(Box<SelectStatement>),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table.
    pub table: TableRef,
    /// Column list.
    pub fields: Vec<Field>,
    /// Inserted values.
    pub source: InsertSource,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Target table.
    pub table: TableRef,
    /// SET assignments; each field carries `name` and `value`.
    pub assignments: Vec<Field>,
    /// WHERE conditions.
    pub where_clause: Vec<Condition>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Target table.
    pub table: TableRef,
    /// WHERE conditions.
    pub where_clause: Vec<Condition>,
}

/// A CREATE statement, reduced scope: table name, alias, and column
/// definitions. Rendering is a pass-through of the normalized text.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStatement {
    /// Created table.
    pub table: TableRef,
    /// Column definitions with type metadata.
    pub fields: Vec<Field>,
    /// The normalized statement text, emitted unchanged by the renderer.
    pub raw: String,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// CREATE statement.
    Create(CreateStatement),
}
