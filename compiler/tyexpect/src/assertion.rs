//! Assertion records built from directive comments.
//!
//! Line-keyed assertions (`$ExpectType`, `$ExpectTypeSnapshot`,
//! `$ExpectError`) use 0-based line indices. Caret assertions are keyed by
//! absolute byte offset instead, because they point at a column.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tyexpect_ir::Span;

/// A line-keyed type expectation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeAssertion {
    /// `$ExpectType <expected>`
    Manual { expected: String },
    /// `$ExpectTypeSnapshot <name>`. `expected` is filled from the snapshot
    /// store during reconciliation; `None` means "not recorded yet".
    Snapshot {
        name: String,
        expected: Option<String>,
    },
}

impl TypeAssertion {
    /// The expected type text, if known.
    pub fn expected(&self) -> Option<&str> {
        match self {
            TypeAssertion::Manual { expected } => Some(expected),
            TypeAssertion::Snapshot { expected, .. } => expected.as_deref(),
        }
    }

    pub fn kind(&self) -> AssertionKind {
        match self {
            TypeAssertion::Manual { .. } => AssertionKind::Manual,
            TypeAssertion::Snapshot { .. } => AssertionKind::Snapshot,
        }
    }
}

/// Which comparison rules apply to an assertion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssertionKind {
    Manual,
    Snapshot,
    Caret,
}

/// `^?` assertion: the quick-info at a column of the previous line.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CaretAssertion {
    /// Offset the caret points at. `None` when there is no code it could
    /// point at (caret on the first line, or past the end of the previous
    /// line).
    pub position: Option<u32>,
    /// 0-based line the caret comment is written on.
    pub line: u32,
    /// Expected text; continuation lines are joined with `\n`.
    pub expected: String,
    /// Source range holding the expected text, continuation lines included.
    pub expected_range: Span,
    /// Caret line up to the caret, followed by three spaces. Continuation
    /// lines start with exactly this text.
    pub continuation_prefix: String,
    /// Nothing follows `^?`, so a fix has to insert the separating space.
    pub needs_inserted_space: bool,
}

impl CaretAssertion {
    /// A caret that can never be attached to code.
    pub fn unattachable(line: u32) -> Self {
        CaretAssertion {
            position: None,
            line,
            expected: String::new(),
            expected_range: Span::DUMMY,
            continuation_prefix: String::new(),
            needs_inserted_space: false,
        }
    }
}

/// Kind of malformed directive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SyntaxErrorKind {
    MissingExpectedType,
    MissingSnapshotName,
    InvalidCaretSyntax,
}

impl SyntaxErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            SyntaxErrorKind::MissingExpectedType => "$ExpectType requires a type argument",
            SyntaxErrorKind::MissingSnapshotName => "$ExpectTypeSnapshot requires a snapshot name",
            SyntaxErrorKind::InvalidCaretSyntax => {
                "expected a single space between `^?` and the expected type"
            }
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A malformed directive on a 0-based line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: u32,
}

/// Everything the builder extracted from one file.
#[derive(Clone, Debug, Default)]
pub struct Assertions {
    /// At most one `$ExpectType`/`$ExpectTypeSnapshot` per line.
    pub type_assertions: FxHashMap<u32, TypeAssertion>,
    /// Lines carrying `$ExpectError`.
    pub error_lines: FxHashSet<u32>,
    /// Caret assertions in source order.
    pub caret_assertions: Vec<CaretAssertion>,
    /// Lines claimed by more than one directive, each recorded once, in
    /// source order.
    pub duplicate_lines: Vec<u32>,
    pub syntax_errors: Vec<SyntaxError>,
}

impl Assertions {
    /// No assertion, duplicate or syntax error was found.
    pub fn is_empty(&self) -> bool {
        self.type_assertions.is_empty()
            && self.error_lines.is_empty()
            && self.caret_assertions.is_empty()
            && self.duplicate_lines.is_empty()
            && self.syntax_errors.is_empty()
    }

    /// Insert a line-keyed assertion. A second claim on the same line removes
    /// the first and marks the line as duplicate.
    pub fn insert_type_assertion(&mut self, line: u32, assertion: TypeAssertion) {
        if self.type_assertions.remove(&line).is_some() {
            self.mark_duplicate(line);
        } else {
            self.type_assertions.insert(line, assertion);
        }
    }

    /// Record `$ExpectError`, with the same collision rule.
    pub fn insert_error_line(&mut self, line: u32) {
        if self.error_lines.remove(&line) {
            self.mark_duplicate(line);
        } else {
            self.error_lines.insert(line);
        }
    }

    fn mark_duplicate(&mut self, line: u32) {
        if !self.duplicate_lines.contains(&line) {
            self.duplicate_lines.push(line);
        }
    }
}
