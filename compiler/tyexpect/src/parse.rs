//! Assertion builder.
//!
//! Turns scanned comments into [`Assertions`]. Recognized comment bodies:
//!
//! ```text
//!  $ExpectType <type>
//!  $ExpectTypeSnapshot <name>
//!  $ExpectError
//!    ^? <type>
//! ```
//!
//! A single leading space before `$Expect…` is optional. Caret comments may
//! be indented with any number of spaces, and their expected type may
//! continue on following lines that repeat the caret line's prefix with three
//! spaces in place of `^? `.

use tyexpect_diagnostic::span_utils::LineOffsetTable;
use tyexpect_ir::Span;

use crate::assertion::{
    Assertions, CaretAssertion, SyntaxError, SyntaxErrorKind, TypeAssertion,
};
use crate::scanner::{scan_directives, DirectiveOccurrence};

/// Width of `^? ` and of the continuation indent that replaces it.
const CARET_MARKER_WIDTH: u32 = 3;

/// A `$Expect…` directive and its payload.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Directive<'a> {
    Type(Option<&'a str>),
    TypeSnapshot(Option<&'a str>),
    Error,
}

/// Scan `source` and build every assertion in it.
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse_assertions(source: &str, table: &LineOffsetTable) -> Assertions {
    let mut assertions = Assertions::default();

    for occurrence in scan_directives(source, table) {
        if let Some(directive) = match_directive(occurrence.body) {
            add_directive(&mut assertions, directive, occurrence.line);
        } else if let Some((spaces, rest)) = match_caret(occurrence.body) {
            add_caret(&mut assertions, source, table, &occurrence, spaces, rest);
        }
    }

    tracing::trace!(
        type_assertions = assertions.type_assertions.len(),
        error_lines = assertions.error_lines.len(),
        carets = assertions.caret_assertions.len(),
        duplicates = assertions.duplicate_lines.len(),
        syntax_errors = assertions.syntax_errors.len(),
        "parsed assertions"
    );
    assertions
}

fn add_directive(assertions: &mut Assertions, directive: Directive<'_>, line: u32) {
    match directive {
        Directive::Type(Some(expected)) => assertions.insert_type_assertion(
            line,
            TypeAssertion::Manual {
                expected: expected.to_string(),
            },
        ),
        Directive::Type(None) => assertions.syntax_errors.push(SyntaxError {
            kind: SyntaxErrorKind::MissingExpectedType,
            line,
        }),
        Directive::TypeSnapshot(Some(name)) => assertions.insert_type_assertion(
            line,
            TypeAssertion::Snapshot {
                name: name.to_string(),
                expected: None,
            },
        ),
        Directive::TypeSnapshot(None) => assertions.syntax_errors.push(SyntaxError {
            kind: SyntaxErrorKind::MissingSnapshotName,
            line,
        }),
        Directive::Error => assertions.insert_error_line(line),
    }
}

/// Match `^ ?\$Expect(TypeSnapshot|Type|Error)( (.*))?$`.
///
/// Blank payloads count as missing; payloads are trimmed.
fn match_directive(body: &str) -> Option<Directive<'_>> {
    let rest = body.strip_prefix(' ').unwrap_or(body);
    let rest = rest.strip_prefix("$Expect")?;

    for keyword in ["TypeSnapshot", "Type", "Error"] {
        let Some(tail) = rest.strip_prefix(keyword) else {
            continue;
        };
        let payload = if tail.is_empty() {
            None
        } else if let Some(payload) = tail.strip_prefix(' ') {
            Some(payload.trim()).filter(|p| !p.is_empty())
        } else {
            // `$ExpectTypeFoo` is not `$ExpectType`; try the next keyword.
            continue;
        };
        return Some(match keyword {
            "TypeSnapshot" => Directive::TypeSnapshot(payload),
            "Type" => Directive::Type(payload),
            _ => Directive::Error,
        });
    }
    None
}

/// Match `^( *)\^\?(.*)$`, returning the indent width and the text after `^?`.
fn match_caret(body: &str) -> Option<(usize, &str)> {
    let spaces = body.len() - body.trim_start_matches(' ').len();
    let rest = body[spaces..].strip_prefix("^?")?;
    Some((spaces, rest))
}

fn add_caret(
    assertions: &mut Assertions,
    source: &str,
    table: &LineOffsetTable,
    occurrence: &DirectiveOccurrence<'_>,
    spaces: usize,
    rest: &str,
) {
    if !rest.is_empty() && !rest.starts_with(' ') {
        assertions.syntax_errors.push(SyntaxError {
            kind: SyntaxErrorKind::InvalidCaretSyntax,
            line: occurrence.line,
        });
        return;
    }

    let line = occurrence.physical_line;
    if line == 0 {
        // Nothing above the first line to point at.
        assertions
            .caret_assertions
            .push(CaretAssertion::unattachable(line));
        return;
    }

    let line_start = table.line_start(line).unwrap_or(0);
    let line_end = table.line_end(source, line).unwrap_or(line_start);
    let caret_offset = occurrence.comment_start + 2 + u32::try_from(spaces).unwrap_or(0);
    // Columns count characters so multi-byte text above still lines up.
    let caret_column = source
        .get(line_start as usize..caret_offset as usize)
        .map_or(0, |prefix| prefix.chars().count());

    let position = table.line_start(line - 1).and_then(|prev_start| {
        let (at, _) = table
            .line_text(source, line - 1)
            .char_indices()
            .nth(caret_column)?;
        Some(prev_start + u32::try_from(at).ok()?)
    });

    let (mut expected, mut expected_range, needs_inserted_space) = if rest.is_empty() {
        (String::new(), Span::point(caret_offset + 2), true)
    } else {
        (
            rest[1..].to_string(),
            Span::new(caret_offset + CARET_MARKER_WIDTH, line_end),
            false,
        )
    };

    let mut continuation_prefix = source
        .get(line_start as usize..caret_offset as usize)
        .unwrap_or("")
        .to_string();
    continuation_prefix.push_str("   ");

    let mut next = line + 1;
    while let Some(next_end) = table.line_end(source, next) {
        let Some(suffix) = table
            .line_text(source, next)
            .strip_prefix(continuation_prefix.as_str())
        else {
            break;
        };
        expected.push('\n');
        expected.push_str(suffix);
        expected_range = expected_range.extend_to(next_end);
        next += 1;
    }

    assertions.caret_assertions.push(CaretAssertion {
        position,
        line,
        expected,
        expected_range,
        continuation_prefix,
        needs_inserted_space,
    });
}
