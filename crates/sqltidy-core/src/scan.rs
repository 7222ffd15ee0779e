//! Raw-text scanning primitives.
//!
//! Everything in this module operates on plain byte offsets: substring
//! search with an occurrence selector, whitespace-boundary-aware keyword
//! search, and bracket-depth-aware search/split. None of these functions
//! fail; a miss is `None` (or an empty split), and it is up to the caller
//! to decide whether a miss is an error or simply "clause absent".
//!
//! All searched patterns are ASCII (keywords, separators, operators), so
//! byte-wise scanning is UTF-8 safe: an ASCII byte never occurs inside a
//! multi-byte sequence.

/// Returns the byte offset of the `occurrence`-th match of `pat` in `text`.
///
/// A positive `occurrence` counts from the start (1 = first), a negative
/// one from the end (-1 = last). Zero never matches.
#[must_use]
pub fn index_of(text: &str, pat: &str, occurrence: isize) -> Option<usize> {
    if pat.is_empty() || occurrence == 0 {
        return None;
    }
    let hits: Vec<usize> = text.match_indices(pat).map(|(i, _)| i).collect();
    if occurrence > 0 {
        hits.get(occurrence.unsigned_abs() - 1).copied()
    } else {
        hits.len()
            .checked_sub(occurrence.unsigned_abs())
            .map(|i| hits[i])
    }
}

/// True when the match of `pat` at `at` sits on whitespace boundaries.
///
/// Buffer start and end count as boundaries, so a keyword opening or
/// closing the buffer is accepted.
fn on_boundary(text: &str, pat: &str, at: usize) -> bool {
    let bytes = text.as_bytes();
    let left = at == 0 || bytes[at - 1].is_ascii_whitespace();
    let end = at + pat.len();
    let right = end == bytes.len() || bytes[end].is_ascii_whitespace();
    left && right
}

/// First whitespace-boundary-aware occurrence of `kw`.
///
/// Prevents matching `order` inside `reorder` or `and` inside `band`.
/// Multi-word keywords (`group by`, `not in`) are matched as one unit.
#[must_use]
pub fn keyword_first(text: &str, kw: &str) -> Option<usize> {
    text.match_indices(kw)
        .map(|(i, _)| i)
        .find(|&i| on_boundary(text, kw, i))
}

/// Last whitespace-boundary-aware occurrence of `kw`.
#[must_use]
pub fn keyword_last(text: &str, kw: &str) -> Option<usize> {
    text.match_indices(kw)
        .map(|(i, _)| i)
        .filter(|&i| on_boundary(text, kw, i))
        .last()
}

/// Earliest boundary-aware hit among `kws`, with the keyword that hit.
#[must_use]
pub fn first_of_keywords<'k>(text: &str, kws: &[&'k str]) -> Option<(usize, &'k str)> {
    kws.iter()
        .filter_map(|kw| keyword_first(text, kw).map(|i| (i, *kw)))
        .min_by_key(|(i, _)| *i)
}

/// Latest boundary-aware hit among `kws`, with the keyword that hit.
#[must_use]
pub fn last_of_keywords<'k>(text: &str, kws: &[&'k str]) -> Option<(usize, &'k str)> {
    kws.iter()
        .filter_map(|kw| keyword_last(text, kw).map(|i| (i, *kw)))
        .max_by_key(|(i, _)| *i)
}

/// Walks `text` left to right with a parenthesis-depth counter and
/// returns the first depth-zero match of `pat` that `accept` confirms.
fn depth_scan(text: &str, pat: &str, mut accept: impl FnMut(usize) -> bool) -> Option<usize> {
    let bytes = text.as_bytes();
    if pat.is_empty() || bytes.len() < pat.len() {
        return None;
    }
    let mut depth = 0usize;
    for i in 0..=bytes.len() - pat.len() {
        if depth == 0 && text[i..].starts_with(pat) {
            if accept(i) {
                return Some(i);
            }
        }
        if bytes[i] == b'(' {
            depth += 1;
        } else if bytes[i] == b')' {
            depth = depth.saturating_sub(1);
        }
    }
    None
}

/// First occurrence of `pat` at parenthesis depth zero.
#[must_use]
pub fn index_at_depth(text: &str, pat: &str) -> Option<usize> {
    depth_scan(text, pat, |_| true)
}

/// First boundary-aware occurrence of `kw` at parenthesis depth zero.
#[must_use]
pub fn keyword_at_depth(text: &str, kw: &str) -> Option<usize> {
    depth_scan(text, kw, |i| on_boundary(text, kw, i))
}

/// All boundary-aware occurrences of `kw` at parenthesis depth zero.
#[must_use]
pub fn keyword_indices_at_depth(text: &str, kw: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut hits = Vec::new();
    if kw.is_empty() || bytes.len() < kw.len() {
        return hits;
    }
    let mut depth = 0usize;
    for i in 0..=bytes.len() - kw.len() {
        if depth == 0 && text[i..].starts_with(kw) && on_boundary(text, kw, i) {
            hits.push(i);
        }
        if bytes[i] == b'(' {
            depth += 1;
        } else if bytes[i] == b')' {
            depth = depth.saturating_sub(1);
        }
    }
    hits
}

/// Earliest boundary-aware, depth-zero hit among `kws`.
#[must_use]
pub fn first_of_keywords_at_depth<'k>(text: &str, kws: &[&'k str]) -> Option<(usize, &'k str)> {
    kws.iter()
        .filter_map(|kw| keyword_at_depth(text, kw).map(|i| (i, *kw)))
        .min_by_key(|(i, _)| *i)
}

/// Splits `text` on every depth-zero occurrence of `sep`.
///
/// Returns the segments before each separator and the trailing segment
/// separately, so callers always append the tail explicitly.
#[must_use]
pub fn split_at_depth<'t>(text: &'t str, sep: &str) -> (Vec<&'t str>, &'t str) {
    split_with(text, sep, |_| true)
}

/// Like [`split_at_depth`] but only splits on boundary-aware keyword
/// occurrences, so `and` never splits inside `band`.
#[must_use]
pub fn split_keyword_at_depth<'t>(text: &'t str, kw: &str) -> (Vec<&'t str>, &'t str) {
    split_with(text, kw, |i| on_boundary(text, kw, i))
}

fn split_with<'t>(text: &'t str, sep: &str, mut accept: impl FnMut(usize) -> bool) -> (Vec<&'t str>, &'t str) {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    if sep.is_empty() || bytes.len() < sep.len() {
        return (segments, text);
    }
    let mut depth = 0usize;
    let mut offset = 0usize;
    let mut i = 0usize;
    while i + sep.len() <= bytes.len() {
        if depth == 0 && text[i..].starts_with(sep) && accept(i) {
            segments.push(&text[offset..i]);
            offset = i + sep.len();
            i = offset;
            continue;
        }
        if bytes[i] == b'(' {
            depth += 1;
        } else if bytes[i] == b')' {
            depth = depth.saturating_sub(1);
        }
        i += 1;
    }
    (segments, &text[offset..])
}

/// Offsets just after the first `(` and at its balancing `)`.
///
/// The convention is exclusive on both sides: `text[open..close]` is the
/// bracket content without the brackets. Nested pairs are skipped by a
/// running open/close counter. `None` when no bracket opens or the pair
/// never balances.
#[must_use]
pub fn between(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let open = bytes.iter().position(|&b| b == b'(')?;
    let mut depth = 1usize;
    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        if b == b'(' {
            depth += 1;
        } else if b == b')' {
            depth -= 1;
            if depth == 0 {
                return Some((open + 1, i));
            }
        }
    }
    None
}

/// True when one matching outer bracket pair encloses the whole trimmed
/// text, e.g. `(a = 1 or b = 2)` but not `(a = 1) or (b = 2)`.
#[must_use]
pub fn wrapped_in_brackets(text: &str) -> bool {
    let text = text.trim();
    text.starts_with('(')
        && between(text).is_some_and(|(open, close)| open == 1 && close == text.len() - 1)
}

/// Strips wrapping bracket pairs repeatedly: `((x))` becomes `x`.
#[must_use]
pub fn trim_brackets(text: &str) -> &str {
    let mut text = text.trim();
    while wrapped_in_brackets(text) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// Splits `text` once around the `occurrence`-th match of `pat`.
#[must_use]
pub fn cut<'t>(text: &'t str, pat: &str, occurrence: isize) -> Option<(&'t str, &'t str)> {
    index_of(text, pat, occurrence).map(|i| (&text[..i], &text[i + pat.len()..]))
}

/// True when `text` begins with `kw` case-insensitively, followed by a
/// blank, an opening bracket, or the end of the buffer.
///
/// Case-insensitive because a keyword glued to a bracket (`(SELECT …`) is
/// one "word" to the normalizer and keeps its original case until the
/// bracket content is parsed on its own.
#[must_use]
pub fn starts_with_keyword(text: &str, kw: &str) -> bool {
    text.len() >= kw.len()
        && text[..kw.len()].eq_ignore_ascii_case(kw)
        && text[kw.len()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_ascii_whitespace() || c == '(')
}
