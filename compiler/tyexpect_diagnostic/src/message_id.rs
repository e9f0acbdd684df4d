//! Report categories.
//!
//! Each category has a stable kebab-case id that hosts use for filtering and
//! documentation lookups, and a default severity.

use std::fmt;

use crate::Severity;

/// Category of a report produced for a checked file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum MessageId {
    /// `$ExpectType` expected text differs from the computed type, or a caret
    /// expectation differs from the quick-info text.
    TypesDoNotMatch,
    /// `$ExpectTypeSnapshot` names a snapshot that is not stored yet.
    TypeSnapshotNotFound,
    /// The stored snapshot differs from the computed type.
    TypeSnapshotDoNotMatch,
    /// No code could be associated with a directive.
    OrphanAssertion,
    /// Two or more directives claim the same line.
    DuplicateAssertion,
    /// `$ExpectError` line without a compiler diagnostic.
    ExpectedErrorNotFound,
    /// Malformed directive payload or caret spacing.
    SyntaxError,
    /// The type checker does not know the checked file.
    FileNotIncluded,
}

impl MessageId {
    /// All categories, in declaration order.
    pub const ALL: [MessageId; 8] = [
        MessageId::TypesDoNotMatch,
        MessageId::TypeSnapshotNotFound,
        MessageId::TypeSnapshotDoNotMatch,
        MessageId::OrphanAssertion,
        MessageId::DuplicateAssertion,
        MessageId::ExpectedErrorNotFound,
        MessageId::SyntaxError,
        MessageId::FileNotIncluded,
    ];

    /// Stable id string.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::TypesDoNotMatch => "types-do-not-match",
            MessageId::TypeSnapshotNotFound => "type-snapshot-not-found",
            MessageId::TypeSnapshotDoNotMatch => "type-snapshot-do-not-match",
            MessageId::OrphanAssertion => "orphan-assertion",
            MessageId::DuplicateAssertion => "duplicate-assertion",
            MessageId::ExpectedErrorNotFound => "expected-error-not-found",
            MessageId::SyntaxError => "syntax-error",
            MessageId::FileNotIncluded => "file-not-included",
        }
    }

    /// Orphans only point at a location; everything else is an error.
    pub fn default_severity(self) -> Severity {
        match self {
            MessageId::OrphanAssertion => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
