//! tyexpect - checks type expectations written in source comments.
//!
//! ```text
//! const a = [1, 2] as const; // $ExpectType readonly [1, 2]
//! // $ExpectTypeSnapshot PairType
//! const pair = makePair();
//! // $ExpectError
//! const n: number = "text";
//! const x = 1;
//! //    ^? const x: 1
//! ```
//!
//! The host supplies the parsed tree, a type checker, a language service and
//! a snapshot store; [`check_file`] returns one report per failed or
//! malformed expectation. Checking is per file and single-threaded.
//!
//! # Pipeline
//!
//! - [`scanner`]: find `//` comments and the line each applies to
//! - [`parse`]: build assertions from comment bodies
//! - [`locate`]: bind line assertions to nodes, carets to positions
//! - [`resolve`]: host type services
//! - [`matcher`]: compare expected and actual type text
//! - [`reconcile`]: run the checks and collect findings
//! - [`report`]: turn findings into diagnostics and fixes

mod assertion;
pub mod locate;
pub mod matcher;
mod options;
pub mod parse;
pub mod reconcile;
pub mod report;
pub mod resolve;
pub mod scanner;
mod snapshot;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use assertion::{
    AssertionKind, Assertions, CaretAssertion, SyntaxError, SyntaxErrorKind, TypeAssertion,
};
pub use options::ExpectOptions;
pub use reconcile::{
    ExpectContext, Expectation, ReconciliationResult, Reconciler, UnmetExpectation, UnmetReason,
};
pub use report::{ExpectFix, FileReport, FixError, Report};
pub use resolve::{DisplayPart, LanguageService, QuickInfo, TypeChecker};
pub use snapshot::{InMemorySnapshotStore, SnapshotError, SnapshotStore, SnapshotUpdate};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only runs once per process.
/// Hosts with their own subscriber should not call this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Check every type expectation in one file.
///
/// A file the type checker does not know gets a single report and nothing
/// else. Snapshots are only read here; apply the returned fixes with
/// [`FileReport::apply_fixes`] to update them.
#[tracing::instrument(level = "debug", skip_all, fields(file = ctx.file_name))]
pub fn check_file(
    ctx: &ExpectContext<'_>,
    options: &ExpectOptions,
    store: &dyn SnapshotStore,
) -> FileReport {
    if !ctx.checker.contains_file(ctx.file_name) {
        tracing::debug!("file is not part of the program");
        return FileReport::not_included(ctx.file_name);
    }

    if !scanner::has_directive_marker(ctx.source) {
        return FileReport {
            file_name: ctx.file_name.to_string(),
            reports: Vec::new(),
        };
    }

    let result = Reconciler::new(*options).reconcile(ctx, store);
    let report = FileReport::from_result(ctx.file_name, ctx.source, result);
    tracing::debug!(reports = report.reports.len(), "checked file");
    report
}
