//! Comment directive scanner.
//!
//! Text based, not syntax aware: every `//` counts, including ones inside
//! string literals, so directives are still found on lines the host parser
//! could not make sense of. Only the first `//` of a physical line opens a
//! comment; the rest of the line is its body, which keeps directives inside
//! commented-out code (`// foo(); // $ExpectType T`) from matching.

use memchr::memmem;
use tyexpect_diagnostic::span_utils::LineOffsetTable;

/// One `//` comment found in the source.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DirectiveOccurrence<'src> {
    /// Comment text after `//`, up to the end of the line (no terminator).
    pub body: &'src str,
    /// Byte offset of the `//`.
    pub comment_start: u32,
    /// 0-based line the comment applies to: the next line when only
    /// whitespace precedes the `//`, otherwise its own line.
    pub line: u32,
    /// 0-based line the comment is written on.
    pub physical_line: u32,
}

/// Cheap pre-check: does the source contain anything a directive could be
/// built from?
pub fn has_directive_marker(source: &str) -> bool {
    let bytes = source.as_bytes();
    memmem::find(bytes, b"$Expect").is_some() || memmem::find(bytes, b"^?").is_some()
}

/// Find every comment, top to bottom.
pub fn scan_directives<'src>(
    source: &'src str,
    table: &LineOffsetTable,
) -> Vec<DirectiveOccurrence<'src>> {
    let bytes = source.as_bytes();
    let finder = memmem::Finder::new(b"//");
    let mut occurrences = Vec::new();
    let mut pos = 0usize;

    while let Some(found) = finder.find(&bytes[pos..]) {
        let comment_start = to_u32(pos + found);
        let physical_line = table.line_index(comment_start);
        let line_start = table.line_start(physical_line).unwrap_or(0);
        let line_end = table
            .line_end(source, physical_line)
            .unwrap_or(to_u32(source.len()));

        let body = source
            .get(comment_start as usize + 2..line_end as usize)
            .unwrap_or("");
        let leading = source
            .get(line_start as usize..comment_start as usize)
            .unwrap_or("");
        let line = if leading.trim().is_empty() {
            physical_line + 1
        } else {
            physical_line
        };

        occurrences.push(DirectiveOccurrence {
            body,
            comment_start,
            line,
            physical_line,
        });

        // Resume on the next physical line.
        match table.line_start(physical_line + 1) {
            Some(next) => pos = next as usize,
            None => break,
        }
    }

    occurrences
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
