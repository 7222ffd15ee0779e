//! Condition tree types.

use super::statement::SelectStatement;

/// Logical connective tying a condition to its left sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// AND.
    And,
    /// OR.
    Or,
}

impl Relation {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Comparison operator of a leaf condition.
///
/// The declaration order matters nowhere, but [`Operator::CANDIDATES`]
/// does: compound operators must be probed before the single-character
/// operators they contain, and `not in`/`is not` before `in`/`is`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `like`
    Like,
    /// `not in`
    NotIn,
    /// `in`
    In,
    /// `is not`
    IsNot,
    /// `is`
    Is,
}

impl Operator {
    /// Probe order for leaf scanning. Longer operators come before the
    /// operators that are their prefixes or substrings, so `a >= 1` is
    /// never misread as `a > = 1` or `=`.
    pub const CANDIDATES: [Self; 11] = [
        Self::Ne,
        Self::Ge,
        Self::Le,
        Self::Eq,
        Self::Lt,
        Self::Gt,
        Self::Like,
        Self::NotIn,
        Self::In,
        Self::IsNot,
        Self::Is,
    ];

    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Like => "like",
            Self::NotIn => "not in",
            Self::In => "in",
            Self::IsNot => "is not",
            Self::Is => "is",
        }
    }

    /// Word operators need boundary-aware scanning; symbol operators can
    /// sit directly against their operands.
    #[must_use]
    pub const fn is_word(&self) -> bool {
        matches!(
            self,
            Self::Like | Self::NotIn | Self::In | Self::IsNot | Self::Is
        )
    }

    /// True for `in` / `not in`, whose right-hand side is a bracketed
    /// value list or subquery.
    #[must_use]
    pub const fn takes_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

/// Right-hand side of a leaf condition. The operator determines the
/// variant, so a leaf can never carry both a value and a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bare boolean field, no operator at all.
    None,
    /// A single value text.
    Value(String),
    /// An `in (…)` literal list.
    List(Vec<String>),
    /// An `in (select …)` scalar subquery.
    Query(Box<SelectStatement>),
}

/// A node of the condition tree: either a parenthesized group of child
/// conditions or a single comparison leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A parenthesized group.
    Group {
        /// Connective to the left sibling, `None` on the first condition.
        relation: Option<Relation>,
        /// Child conditions in source order.
        children: Vec<Condition>,
    },
    /// A single comparison.
    Leaf {
        /// Connective to the left sibling, `None` on the first condition.
        relation: Option<Relation>,
        /// Left-hand side text.
        field: String,
        /// The comparison operator, `None` for a bare boolean field.
        op: Option<Operator>,
        /// Right-hand side.
        operand: Operand,
    },
}

impl Condition {
    /// The connective to the left sibling.
    #[must_use]
    pub const fn relation(&self) -> Option<Relation> {
        match self {
            Self::Group { relation, .. } | Self::Leaf { relation, .. } => *relation,
        }
    }
}
