//! Report entries for type-expectation checks.
//!
//! - [`Diagnostic`]: category, severity, message, 1-based location and the
//!   values interpolated into the message
//! - [`MessageId`]: stable report categories
//! - [`span_utils::LineOffsetTable`]: offset to line conversions
//! - [`edit`]: text edits and their application for auto-update mode

mod diagnostic;
pub mod edit;
mod message_id;
pub mod span_utils;

pub use diagnostic::{
    duplicate_assertion, expected_error_not_found, file_not_included, orphan_assertion,
    syntax_error, type_snapshot_not_found, types_do_not_match, Diagnostic, Location, ReportData,
    Severity, SnapshotMismatchConfig,
};
pub use edit::{ChangeTracker, EditConflict, TextEdit};
pub use message_id::MessageId;
