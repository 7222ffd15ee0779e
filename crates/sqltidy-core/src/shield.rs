//! Literal shielding.
//!
//! Quoted string literals are replaced by inert placeholder tokens before
//! any keyword scanning or bracket counting takes place, so a literal like
//! `'select * from x'` or `') -- ('` can never produce a false clause
//! boundary. The original text is held in an ordered substitution table and
//! written back verbatim in one pass at final render time.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a single-quoted SQL string literal, empty literals included.
static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']*'").expect("valid literal pattern"));

/// Matches a shield placeholder for the restore pass.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"value@(\d+)@").expect("valid placeholder pattern"));

/// Prefix and suffix of generated placeholder tokens: `value@<n>@`.
///
/// The token contains no whitespace, quotes, brackets or operator
/// characters, so it is invisible to every scanner primitive.
pub const PLACEHOLDER_PREFIX: &str = "value@";
pub const PLACEHOLDER_SUFFIX: &str = "@";

/// Write-once substitution table mapping placeholder numbers to the
/// original literal text. Created during shielding, owned by the top-level
/// parse result, consumed once when the rendered output is restored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralMap {
    literals: Vec<String>,
}

impl LiteralMap {
    /// Number of shielded literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True when the statement contained no string literals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Replaces every placeholder in `rendered` with its original literal
    /// in one linear pass. Unknown placeholder numbers are left untouched.
    #[must_use]
    pub fn restore(&self, rendered: &str) -> String {
        if self.literals.is_empty() {
            return rendered.to_string();
        }
        PLACEHOLDER
            .replace_all(rendered, |caps: &regex::Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.literals.get(i))
                    .map_or_else(|| caps[0].to_string(), Clone::clone)
            })
            .into_owned()
    }
}

/// Replaces every quoted literal in `sql` with a numbered placeholder and
/// records the original text. Placeholders are numbered from 1 in scan
/// order.
#[must_use]
pub fn shield(sql: &str) -> (String, LiteralMap) {
    let mut literals = Vec::new();
    let mut out = String::with_capacity(sql.len());
    let mut tail = 0;
    for hit in LITERAL.find_iter(sql) {
        out.push_str(&sql[tail..hit.start()]);
        out.push_str(PLACEHOLDER_PREFIX);
        out.push_str(&(literals.len() + 1).to_string());
        out.push_str(PLACEHOLDER_SUFFIX);
        literals.push(hit.as_str().to_string());
        tail = hit.end();
    }
    out.push_str(&sql[tail..]);
    (out, LiteralMap { literals })
}
