//! Reconciliation: checks every assertion of one file.
//!
//! The pass runs in fixed order:
//!
//! 1. fill snapshot expectations from the store
//! 2. bind line assertions to nodes and compare their types
//! 3. check `$ExpectError` lines against the compiler's diagnostics
//! 4. locate and compare caret assertions
//!
//! Everything is collected into a [`ReconciliationResult`]; no finding stops
//! the pass. The pending-assertion map is owned here and lent to the locator,
//! so orphans are whatever it did not consume.

use rustc_hash::{FxHashMap, FxHashSet};
use tyexpect_diagnostic::span_utils::LineOffsetTable;
use tyexpect_diagnostic::TextEdit;
use tyexpect_ir::{NodeId, Span, SyntaxTree};

use crate::assertion::{AssertionKind, Assertions, CaretAssertion, SyntaxError, TypeAssertion};
use crate::locate::{bind_type_assertions, locate_caret, orphan_lines};
use crate::matcher::types_match;
use crate::options::ExpectOptions;
use crate::parse::parse_assertions;
use crate::report::ExpectFix;
use crate::resolve::{resolve_node_type, resolve_quick_info, LanguageService, TypeChecker};
use crate::snapshot::{SnapshotStore, SnapshotUpdate};

/// Inputs for checking one file.
#[derive(Copy, Clone)]
pub struct ExpectContext<'a> {
    pub file_name: &'a str,
    pub source: &'a str,
    pub tree: &'a dyn SyntaxTree,
    pub checker: &'a dyn TypeChecker,
    pub language_service: &'a dyn LanguageService,
    /// Spans of the compiler diagnostics reported for this file.
    pub diagnostics: &'a [Span],
}

/// The assertion an unmet expectation came from.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Expectation {
    /// `$ExpectType` or `$ExpectTypeSnapshot` on a 0-based line.
    Line { line: u32, assertion: TypeAssertion },
    /// `^?` caret.
    Caret(CaretAssertion),
}

/// Why an expectation is unmet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnmetReason {
    TypeMismatch,
    SnapshotNotFound,
    SnapshotMismatch,
}

/// An assertion whose expected type differs from the actual one.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnmetExpectation {
    pub expectation: Expectation,
    /// Node whose type was checked.
    pub node: NodeId,
    pub actual: String,
    pub fix: Option<ExpectFix>,
}

impl UnmetExpectation {
    pub fn reason(&self) -> UnmetReason {
        match &self.expectation {
            Expectation::Line {
                assertion: TypeAssertion::Snapshot { expected: None, .. },
                ..
            } => UnmetReason::SnapshotNotFound,
            Expectation::Line {
                assertion: TypeAssertion::Snapshot { .. },
                ..
            } => UnmetReason::SnapshotMismatch,
            Expectation::Line { .. } | Expectation::Caret(_) => UnmetReason::TypeMismatch,
        }
    }

    /// Expected text, `None` for a snapshot that was never recorded.
    pub fn expected(&self) -> Option<&str> {
        match &self.expectation {
            Expectation::Line { assertion, .. } => assertion.expected(),
            Expectation::Caret(caret) => Some(&caret.expected),
        }
    }
}

/// Everything one pass found.
#[derive(Clone, Debug, Default)]
pub struct ReconciliationResult {
    pub unmet: Vec<UnmetExpectation>,
    /// 0-based lines of assertions bound to nothing, sorted and unique.
    pub orphan_lines: Vec<u32>,
    /// 0-based lines claimed twice, in source order.
    pub duplicate_lines: Vec<u32>,
    /// 0-based `$ExpectError` lines without a compiler diagnostic, sorted.
    pub missing_error_lines: Vec<u32>,
    pub syntax_errors: Vec<SyntaxError>,
}

impl ReconciliationResult {
    /// Nothing to report.
    pub fn is_empty(&self) -> bool {
        self.unmet.is_empty()
            && self.orphan_lines.is_empty()
            && self.duplicate_lines.is_empty()
            && self.missing_error_lines.is_empty()
            && self.syntax_errors.is_empty()
    }
}

/// Checks the assertions of a file under a set of options.
#[derive(Copy, Clone, Debug, Default)]
pub struct Reconciler {
    options: ExpectOptions,
}

impl Reconciler {
    pub fn new(options: ExpectOptions) -> Self {
        Reconciler { options }
    }

    pub fn options(&self) -> &ExpectOptions {
        &self.options
    }

    /// Scan `ctx.source` and check every assertion in it.
    ///
    /// The store is only read; snapshot writes happen when a returned
    /// [`SnapshotUpdate`] is applied.
    #[tracing::instrument(level = "debug", skip_all, fields(file = ctx.file_name))]
    pub fn reconcile(
        &self,
        ctx: &ExpectContext<'_>,
        store: &dyn SnapshotStore,
    ) -> ReconciliationResult {
        let table = LineOffsetTable::build(ctx.source);
        let assertions = parse_assertions(ctx.source, &table);
        self.reconcile_assertions(ctx, &table, assertions, store)
    }

    /// Check already-parsed assertions.
    pub fn reconcile_assertions(
        &self,
        ctx: &ExpectContext<'_>,
        table: &LineOffsetTable,
        assertions: Assertions,
        store: &dyn SnapshotStore,
    ) -> ReconciliationResult {
        let Assertions {
            type_assertions,
            error_lines,
            caret_assertions,
            duplicate_lines,
            syntax_errors,
        } = assertions;

        let mut result = ReconciliationResult {
            duplicate_lines,
            syntax_errors,
            ..ReconciliationResult::default()
        };

        let mut pending = self.pending_type_assertions(ctx.file_name, type_assertions, store);
        self.check_type_assertions(ctx, table, &mut pending, &mut result);
        let mut orphans = orphan_lines(&pending);

        if self.options.expect_error {
            result.missing_error_lines = missing_error_lines(table, &error_lines, ctx.diagnostics);
        }

        if self.options.expect_type {
            for caret in caret_assertions {
                if let Some(line) = check_caret(ctx, caret, &mut result) {
                    orphans.push(line);
                }
            }
        }

        orphans.sort_unstable();
        orphans.dedup();
        result.orphan_lines = orphans;

        tracing::debug!(
            unmet = result.unmet.len(),
            orphans = result.orphan_lines.len(),
            duplicates = result.duplicate_lines.len(),
            missing_errors = result.missing_error_lines.len(),
            syntax_errors = result.syntax_errors.len(),
            "reconciled"
        );
        result
    }

    /// Enabled line assertions, with snapshot expectations read from `store`.
    fn pending_type_assertions(
        &self,
        file_name: &str,
        type_assertions: FxHashMap<u32, TypeAssertion>,
        store: &dyn SnapshotStore,
    ) -> FxHashMap<u32, TypeAssertion> {
        type_assertions
            .into_iter()
            .filter_map(|(line, assertion)| match assertion {
                TypeAssertion::Manual { .. } if self.options.expect_type => Some((line, assertion)),
                TypeAssertion::Snapshot { name, .. } if self.options.expect_type_snapshot => {
                    let expected = store.read(file_name, &name);
                    Some((line, TypeAssertion::Snapshot { name, expected }))
                }
                _ => None,
            })
            .collect()
    }

    fn check_type_assertions(
        &self,
        ctx: &ExpectContext<'_>,
        table: &LineOffsetTable,
        pending: &mut FxHashMap<u32, TypeAssertion>,
        result: &mut ReconciliationResult,
    ) {
        for bound in bind_type_assertions(ctx.tree, table, pending) {
            let actual = resolve_node_type(ctx.checker, bound.node);
            let satisfied = bound
                .assertion
                .expected()
                .is_some_and(|expected| types_match(bound.assertion.kind(), &actual, expected));
            if satisfied {
                continue;
            }

            let fix = match &bound.assertion {
                TypeAssertion::Snapshot { name, .. } if !self.options.disable_snapshot_fix => Some(
                    ExpectFix::UpdateSnapshot(SnapshotUpdate::new(ctx.file_name, name, &actual)),
                ),
                _ => None,
            };
            tracing::trace!(line = bound.line, %actual, "unmet type assertion");
            result.unmet.push(UnmetExpectation {
                expectation: Expectation::Line {
                    line: bound.line,
                    assertion: bound.assertion,
                },
                node: bound.node,
                actual,
                fix,
            });
        }
    }
}

/// Check one caret. Returns its line when it is an orphan.
fn check_caret(
    ctx: &ExpectContext<'_>,
    caret: CaretAssertion,
    result: &mut ReconciliationResult,
) -> Option<u32> {
    let Some(position) = caret.position else {
        return Some(caret.line);
    };
    let Some(node) = locate_caret(ctx.tree, position) else {
        return Some(caret.line);
    };
    let offset = ctx.tree.span(node).start;
    let Some(actual) = resolve_quick_info(ctx.language_service, ctx.file_name, offset) else {
        return Some(caret.line);
    };

    if !types_match(AssertionKind::Caret, &actual, &caret.expected) {
        tracing::trace!(line = caret.line, %actual, "unmet caret assertion");
        let fix = ExpectFix::ReplaceText(caret_fix(&caret, &actual));
        result.unmet.push(UnmetExpectation {
            expectation: Expectation::Caret(caret),
            node,
            actual,
            fix: Some(fix),
        });
    }
    None
}

/// Edit that rewrites a caret's expected text to `actual`.
///
/// Every line after the first is prefixed with the caret's continuation
/// prefix, so multi-line types stay attached to the caret.
pub fn caret_fix(caret: &CaretAssertion, actual: &str) -> TextEdit {
    let separator = format!("\n{}", caret.continuation_prefix);
    let mut text = String::new();
    if caret.needs_inserted_space {
        text.push(' ');
    }
    text.push_str(&actual.replace('\n', &separator));
    TextEdit::replace(caret.expected_range, text)
}

fn missing_error_lines(
    table: &LineOffsetTable,
    error_lines: &FxHashSet<u32>,
    diagnostics: &[Span],
) -> Vec<u32> {
    let reported: FxHashSet<u32> = diagnostics
        .iter()
        .map(|span| table.line_index(span.start))
        .collect();
    let mut missing: Vec<u32> = error_lines.difference(&reported).copied().collect();
    missing.sort_unstable();
    missing
}
