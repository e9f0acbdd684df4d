//! Type text equivalence.
//!
//! Plain string equality, plus two tolerance rules:
//! - line assertions accept `ReadOnlyArrayOf<T>` (or `ReadonlyArray<T>`) for
//!   `readonly T[]`, nested to any depth
//! - caret assertions compare with whitespace runs collapsed

use crate::assertion::AssertionKind;

const READONLY_QUALIFIER: &[u8] = b"readonly ";
const READONLY_ARRAY_OPENERS: [&[u8]; 2] = [b"ReadOnlyArrayOf<", b"ReadonlyArray<"];

/// Does `actual` satisfy `expected` under the rules for `kind`?
pub fn types_match(kind: AssertionKind, actual: &str, expected: &str) -> bool {
    match kind {
        AssertionKind::Manual | AssertionKind::Snapshot => {
            actual == expected || matches_readonly_array(actual, expected)
        }
        AssertionKind::Caret => normalize_whitespace(actual) == normalize_whitespace(expected),
    }
}

/// Collapse every run of spaces and newlines to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c == ' ' || c == '\n' {
            in_run = true;
            continue;
        }
        if in_run && !out.is_empty() {
            out.push(' ');
        }
        in_run = false;
        out.push(c);
    }
    out.trim().to_string()
}

/// Does `actual` spell the same type as `expected` once every
/// `ReadOnlyArrayOf<X>` in `expected` is read as `readonly X[]`?
///
/// Only applies when `actual` contains the word `readonly` and `expected`
/// names the generic read-only array. Both strings must be consumed entirely
/// with every opened generic closed.
pub fn matches_readonly_array(actual: &str, expected: &str) -> bool {
    if !contains_word(actual, "readonly")
        || !(contains_word(expected, "ReadOnlyArrayOf") || contains_word(expected, "ReadonlyArray"))
    {
        return false;
    }

    let actual = actual.as_bytes();
    let expected = expected.as_bytes();
    let mut a = 0usize;
    let mut e = 0usize;
    let mut depth = 0u32;

    while a < actual.len() && e < expected.len() {
        if actual[a] == expected[e] {
            a += 1;
            e += 1;
            continue;
        }

        if depth > 0 && expected[e] == b'>' && actual[a..].starts_with(b"[]") {
            depth -= 1;
            a += 2;
            e += 1;
            continue;
        }

        let opener = READONLY_ARRAY_OPENERS
            .iter()
            .find(|opener| expected[e..].starts_with(opener) && at_word_start(expected, e));
        match opener {
            Some(opener)
                if actual[a..].starts_with(READONLY_QUALIFIER) && at_word_start(actual, a) =>
            {
                depth += 1;
                a += READONLY_QUALIFIER.len();
                e += opener.len();
            }
            _ => return false,
        }
    }

    depth == 0 && a == actual.len() && e == expected.len()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A `\b` boundary sits just before `pos`, assuming `text[pos]` is a word byte.
fn at_word_start(text: &[u8], pos: usize) -> bool {
    pos == 0 || !is_word_byte(text[pos - 1])
}

fn contains_word(text: &str, word: &str) -> bool {
    let bytes = text.as_bytes();
    text.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        at_word_start(bytes, start) && !matches!(bytes.get(end), Some(&b) if is_word_byte(b))
    })
}
