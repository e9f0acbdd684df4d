//! Report assembly and fix application.
//!
//! A [`ReconciliationResult`] is turned into one [`Report`] per finding,
//! ordered by location. Reports for caret and snapshot mismatches carry an
//! [`ExpectFix`]; [`FileReport::apply_fixes`] runs them all.

use tyexpect_diagnostic::span_utils::LineOffsetTable;
use tyexpect_diagnostic::{
    duplicate_assertion, expected_error_not_found, file_not_included, orphan_assertion,
    syntax_error, type_snapshot_not_found, types_do_not_match, ChangeTracker, Diagnostic,
    EditConflict, Location, SnapshotMismatchConfig, TextEdit,
};

use crate::assertion::TypeAssertion;
use crate::reconcile::{Expectation, ReconciliationResult, UnmetExpectation};
use crate::snapshot::{SnapshotError, SnapshotStore, SnapshotUpdate};

/// A fix attached to a report.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExpectFix {
    /// Rewrite text in the checked file.
    ReplaceText(TextEdit),
    /// Rewrite a stored snapshot; the file itself is left alone.
    UpdateSnapshot(SnapshotUpdate),
}

impl ExpectFix {
    /// The in-source part of the fix. Pure: reading it never touches the
    /// snapshot store.
    pub fn edit(&self) -> TextEdit {
        match self {
            ExpectFix::ReplaceText(edit) => edit.clone(),
            ExpectFix::UpdateSnapshot(update) => update.edit(),
        }
    }
}

/// One finding.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Report {
    pub diagnostic: Diagnostic,
    pub fix: Option<ExpectFix>,
}

impl Report {
    fn new(diagnostic: Diagnostic) -> Self {
        Report {
            diagnostic,
            fix: None,
        }
    }
}

/// Failure while applying fixes.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Conflict(#[from] EditConflict),
}

/// All reports for one file.
#[derive(Clone, Debug, Default)]
pub struct FileReport {
    pub file_name: String,
    pub reports: Vec<Report>,
}

impl FileReport {
    /// The single report for a file the type checker does not know.
    pub fn not_included(file_name: &str) -> Self {
        FileReport {
            file_name: file_name.to_string(),
            reports: vec![Report::new(file_not_included(file_name))],
        }
    }

    /// Build the reports for `result`. `source` is the checked text, used to
    /// locate caret reports by column.
    pub fn from_result(file_name: &str, source: &str, result: ReconciliationResult) -> Self {
        let table = LineOffsetTable::build(source);
        let ReconciliationResult {
            unmet,
            orphan_lines,
            duplicate_lines,
            missing_error_lines,
            syntax_errors,
        } = result;

        let mut reports = Vec::with_capacity(
            unmet.len()
                + orphan_lines.len()
                + duplicate_lines.len()
                + missing_error_lines.len()
                + syntax_errors.len(),
        );

        reports.extend(syntax_errors.iter().map(|error| {
            Report::new(syntax_error(
                Location::start_of_line(error.line),
                error.kind.message(),
            ))
        }));
        reports.extend(
            duplicate_lines
                .iter()
                .map(|&line| Report::new(duplicate_assertion(Location::start_of_line(line)))),
        );
        reports.extend(
            unmet
                .into_iter()
                .map(|unmet| unmet_report(&table, source, unmet)),
        );
        reports.extend(
            missing_error_lines
                .iter()
                .map(|&line| Report::new(expected_error_not_found(Location::start_of_line(line)))),
        );
        reports.extend(
            orphan_lines
                .iter()
                .map(|&line| Report::new(orphan_assertion(Location::start_of_line(line)))),
        );

        reports.sort_by_key(|report| report.diagnostic.location);

        FileReport {
            file_name: file_name.to_string(),
            reports,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// The diagnostics, without fixes.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reports.iter().map(|report| &report.diagnostic)
    }

    /// Are any of the reports errors (as opposed to warnings)?
    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(Diagnostic::is_error)
    }

    /// Apply every fix: write each pending snapshot update once, then apply
    /// all text edits to `source` and return the new text.
    ///
    /// Snapshot updates already applied are skipped, so calling this again
    /// does not write twice.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.file_name))]
    pub fn apply_fixes(
        &mut self,
        source: &str,
        store: &mut dyn SnapshotStore,
    ) -> Result<String, FixError> {
        let mut tracker = ChangeTracker::new();
        let mut written = 0usize;
        for fix in self.reports.iter_mut().filter_map(|report| report.fix.as_mut()) {
            if let ExpectFix::UpdateSnapshot(update) = fix {
                if update.apply(store)? {
                    written += 1;
                }
            }
            tracker.push(fix.edit());
        }
        let fixed = tracker.apply(source)?;
        tracing::debug!(
            edits = tracker.edits().len(),
            snapshots = written,
            "applied fixes"
        );
        Ok(fixed)
    }
}

fn unmet_report(table: &LineOffsetTable, source: &str, unmet: UnmetExpectation) -> Report {
    let UnmetExpectation {
        expectation,
        actual,
        fix,
        ..
    } = unmet;

    let diagnostic = match &expectation {
        Expectation::Line { line, assertion } => {
            let location = Location::start_of_line(*line);
            match assertion {
                TypeAssertion::Manual { expected } => types_do_not_match(location, expected, &actual),
                TypeAssertion::Snapshot {
                    name,
                    expected: None,
                } => type_snapshot_not_found(location, name, &actual),
                TypeAssertion::Snapshot {
                    name,
                    expected: Some(expected),
                } => SnapshotMismatchConfig {
                    location,
                    snapshot_name: name,
                    expected,
                    actual: &actual,
                }
                .into_diagnostic(),
            }
        }
        Expectation::Caret(caret) => {
            let (line, column) = table.offset_to_line_col(source, caret.expected_range.start);
            types_do_not_match(Location::new(line, column), &caret.expected, &actual)
        }
    };

    Report { diagnostic, fix }
}
