//! Parse error types.

/// Errors that can occur while parsing a statement.
///
/// Every structural failure is fatal for the current parse call: no
/// partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The leading keyword is none of SELECT/INSERT/UPDATE/DELETE/CREATE.
    #[error("unsupported statement: '{0}'")]
    UnsupportedStatement(String),

    /// A bracket scan could not find a balancing close bracket.
    #[error("unbalanced brackets in '{0}'")]
    UnbalancedBrackets(String),

    /// INSERT column count does not match a value row or the projected
    /// field count of an INSERT … SELECT source.
    #[error("column count {columns} does not match value count {values}")]
    FieldValueArityMismatch {
        /// Declared column count.
        columns: usize,
        /// Values found in the offending row or projection.
        values: usize,
    },

    /// A required structural element of a clause could not be resolved.
    #[error("malformed {clause} clause: '{fragment}'")]
    MalformedClause {
        /// The clause that failed.
        clause: &'static str,
        /// The implicated input fragment.
        fragment: String,
    },
}

impl ParseError {
    /// Shorthand for a [`ParseError::MalformedClause`].
    #[must_use]
    pub fn malformed(clause: &'static str, fragment: impl Into<String>) -> Self {
        Self::MalformedClause {
            clause,
            fragment: fragment.into(),
        }
    }

    /// Shorthand for a [`ParseError::UnbalancedBrackets`].
    #[must_use]
    pub fn unbalanced(fragment: impl Into<String>) -> Self {
        Self::UnbalancedBrackets(fragment.into())
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
