//! Host type services.
//!
//! The checker never computes types itself. It asks the host's type checker
//! for the display text of a node's type, and the host's language service for
//! the quick-info shown at an offset.

use tyexpect_ir::NodeId;

/// Type-checking queries for one program.
pub trait TypeChecker {
    /// Is `file_name` one of the program's source files?
    fn contains_file(&self, file_name: &str) -> bool;

    /// Display text of `node`'s type, without truncation. `None` when the
    /// checker has no type for the node.
    fn type_text(&self, node: NodeId) -> Option<String>;
}

/// Interactive queries, as an editor would issue them.
pub trait LanguageService {
    /// Hover information at `offset` in `file_name`.
    fn quick_info(&self, file_name: &str, offset: u32) -> Option<QuickInfo>;
}

/// One segment of quick-info text.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct DisplayPart {
    pub text: String,
    /// Classification label (`keyword`, `punctuation`, ...). Not used for
    /// matching.
    pub kind: String,
}

impl DisplayPart {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        DisplayPart {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

/// Hover information for a position.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct QuickInfo {
    pub display_parts: Vec<DisplayPart>,
}

impl QuickInfo {
    /// The display parts joined into one string.
    pub fn display_text(&self) -> String {
        self.display_parts.iter().map(|part| part.text.as_str()).collect()
    }
}

/// Type text of a line-bound node. A missing type reads as `""`.
pub fn resolve_node_type(checker: &dyn TypeChecker, node: NodeId) -> String {
    checker.type_text(node).unwrap_or_default()
}

/// Quick-info text at `offset`, or `None` when the service has none.
pub fn resolve_quick_info(
    service: &dyn LanguageService,
    file_name: &str,
    offset: u32,
) -> Option<String> {
    service
        .quick_info(file_name, offset)
        .map(|info| info.display_text())
}
