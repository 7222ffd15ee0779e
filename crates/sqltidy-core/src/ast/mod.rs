//! Typed statement trees.
//!
//! Every node is owned exclusively by its parent: the tree is a strict
//! ownership forest with no back-references, so it can be walked, cloned
//! and rendered without any shared state.

mod condition;
mod statement;

pub use condition::{Condition, Operand, Operator, Relation};
pub use statement::{
    CreateStatement, DeleteStatement, Field, InsertSource, InsertStatement, JoinClause, JoinKind,
    SelectStatement, Statement, TableRef, UpdateStatement,
};
