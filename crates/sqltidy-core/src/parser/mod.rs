//! Statement dispatch and the parse entry point.
//!
//! The pipeline is: shield literals → collapse whitespace → dispatch on
//! the leading keyword → statement parser (which normalizes keyword case
//! and peels clauses off a shrinking remainder) → typed tree.
//!
//! Literals are shielded before whitespace collapsing so that spacing
//! inside quoted strings survives byte-exact.

mod condition;
mod create;
mod delete;
mod error;
mod insert;
mod select;
mod table;
mod update;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::ast::Statement;
use crate::keywords;
use crate::render;
use crate::shield::{self, LiteralMap};

pub use error::{ParseError, Result};

/// Collapses every whitespace run to a single blank.
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// A parsed statement together with its literal substitution table.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    statement: Statement,
    literals: LiteralMap,
}

impl Parsed {
    /// The parsed statement tree.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Consumes the parse result, returning the statement tree.
    #[must_use]
    pub fn into_statement(self) -> Statement {
        self.statement
    }

    /// Renders the statement with the default indentation.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_indented(0)
    }

    /// Renders the statement with `extra` columns of additional indent,
    /// restoring shielded literals as the final step.
    #[must_use]
    pub fn render_indented(&self, extra: usize) -> String {
        self.literals.restore(&render::render(&self.statement, extra))
    }
}

/// Parses a single SQL statement into a typed tree.
///
/// # Errors
///
/// Returns [`ParseError::UnsupportedStatement`] when the leading keyword
/// is not one of the five supported kinds, and the structural errors of
/// [`ParseError`] when a clause cannot be resolved.
pub fn parse(sql: &str) -> Result<Parsed> {
    let (shielded, literals) = shield::shield(sql);
    let mut text = WHITESPACE.replace_all(&shielded, keywords::BLANK).trim().to_string();
    if let Some(stripped) = text.strip_suffix(keywords::SEMICOLON) {
        text = stripped.trim_end().to_string();
    }

    let head = text.split(' ').next().unwrap_or_default().to_ascii_lowercase();
    debug!(statement = %head, "parsing statement");

    let statement = match head.as_str() {
        keywords::SELECT => Statement::Select(select::parse(&text)?),
        keywords::INSERT => Statement::Insert(insert::parse(&text)?),
        keywords::UPDATE => Statement::Update(update::parse(&text)?),
        keywords::DELETE => Statement::Delete(delete::parse(&text)?),
        keywords::CREATE => Statement::Create(create::parse(&text)?),
        _ => return Err(ParseError::UnsupportedStatement(head)),
    };

    Ok(Parsed {
        statement,
        literals,
    })
}
