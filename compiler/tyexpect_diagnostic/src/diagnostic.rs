//! Report entries.
//!
//! Defines [`Diagnostic`], [`Severity`], [`Location`] and [`ReportData`], plus
//! one constructor per [`MessageId`] so message wording stays in one place.

use std::fmt;

use crate::MessageId;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// 1-based line and column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }

    /// Column 1 of a 0-based line index.
    pub const fn start_of_line(line_index: u32) -> Self {
        Location {
            line: line_index + 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Values interpolated into a report message, kept for hosts that render
/// their own text.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ReportData {
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub snapshot_name: Option<String>,
    pub file_name: Option<String>,
    pub detail: Option<String>,
}

/// A single report for a checked file.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Report category.
    pub id: MessageId,
    /// Severity level.
    pub severity: Severity,
    /// Rendered message.
    pub message: String,
    /// Where the report points.
    pub location: Location,
    /// Interpolated values.
    pub data: ReportData,
}

impl Diagnostic {
    /// Create a diagnostic with the category's default severity.
    pub fn new(id: MessageId, location: Location) -> Self {
        Diagnostic {
            id,
            severity: id.default_severity(),
            message: String::new(),
            location,
            data: ReportData::default(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the interpolated values.
    pub fn with_data(mut self, data: ReportData) -> Self {
        self.data = data;
        self
    }

    /// Check if this is an error (vs warning).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]: {}",
            self.location, self.severity, self.id, self.message
        )
    }
}

/// Create a "types do not match" diagnostic.
pub fn types_do_not_match(location: Location, expected: &str, actual: &str) -> Diagnostic {
    Diagnostic::new(MessageId::TypesDoNotMatch, location)
        .with_message(format!("Expected type to be: {expected}, got: {actual}"))
        .with_data(ReportData {
            expected: Some(expected.to_string()),
            actual: Some(actual.to_string()),
            ..ReportData::default()
        })
}

/// Create a "snapshot not found" diagnostic.
pub fn type_snapshot_not_found(location: Location, snapshot_name: &str, actual: &str) -> Diagnostic {
    Diagnostic::new(MessageId::TypeSnapshotNotFound, location)
        .with_message(format!(
            "Type snapshot `{snapshot_name}` not found; apply fixes to record it"
        ))
        .with_data(ReportData {
            actual: Some(actual.to_string()),
            snapshot_name: Some(snapshot_name.to_string()),
            ..ReportData::default()
        })
}

/// Configuration for a snapshot mismatch diagnostic.
#[derive(Clone, Debug)]
pub struct SnapshotMismatchConfig<'a> {
    pub location: Location,
    pub snapshot_name: &'a str,
    pub expected: &'a str,
    pub actual: &'a str,
}

impl SnapshotMismatchConfig<'_> {
    /// Convert this configuration into a diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::new(MessageId::TypeSnapshotDoNotMatch, self.location)
            .with_message(format!(
                "Expected type from snapshot `{}` to be: {}, got: {}",
                self.snapshot_name, self.expected, self.actual
            ))
            .with_data(ReportData {
                expected: Some(self.expected.to_string()),
                actual: Some(self.actual.to_string()),
                snapshot_name: Some(self.snapshot_name.to_string()),
                ..ReportData::default()
            })
    }
}

/// Create an "orphan assertion" diagnostic.
pub fn orphan_assertion(location: Location) -> Diagnostic {
    Diagnostic::new(MessageId::OrphanAssertion, location)
        .with_message("Can not match a node to this assertion")
}

/// Create a "duplicate assertion" diagnostic.
pub fn duplicate_assertion(location: Location) -> Diagnostic {
    Diagnostic::new(MessageId::DuplicateAssertion, location)
        .with_message("This line has two or more assertions")
}

/// Create an "expected error not found" diagnostic.
pub fn expected_error_not_found(location: Location) -> Diagnostic {
    Diagnostic::new(MessageId::ExpectedErrorNotFound, location)
        .with_message("Expected an error on this line, but found none")
}

/// Create a directive syntax error diagnostic.
pub fn syntax_error(location: Location, detail: &str) -> Diagnostic {
    Diagnostic::new(MessageId::SyntaxError, location)
        .with_message(format!("Syntax error: {detail}"))
        .with_data(ReportData {
            detail: Some(detail.to_string()),
            ..ReportData::default()
        })
}

/// Create a "file not included" diagnostic. Always points at line 1.
pub fn file_not_included(file_name: &str) -> Diagnostic {
    Diagnostic::new(MessageId::FileNotIncluded, Location::new(1, 1))
        .with_message(format!(
            "Expected to find file `{file_name}` among the type checker's files"
        ))
        .with_data(ReportData {
            file_name: Some(file_name.to_string()),
            ..ReportData::default()
        })
}
