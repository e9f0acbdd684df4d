//! Test helpers for checker unit tests.
//!
//! Provides a line-oriented tree builder and mock host services, so the
//! reconciliation can be exercised without a real parser or type checker.

#![allow(clippy::unwrap_used)]

use rustc_hash::FxHashMap;
use tyexpect_diagnostic::span_utils::LineOffsetTable;
use tyexpect_ir::{NodeId, Span, SyntaxArena, SyntaxTree};

use crate::resolve::{DisplayPart, LanguageService, QuickInfo, TypeChecker};
use crate::snapshot::{InMemorySnapshotStore, SnapshotError, SnapshotStore};

/// Build a tree with one `Stmt` node per code line and one `Word` child per
/// identifier or literal in it.
///
/// Comments are cut off, and blank, comment-only and `}` lines get no node.
pub fn statement_tree(source: &str) -> SyntaxArena {
    let table = LineOffsetTable::build(source);
    let mut arena = SyntaxArena::new(Span::new(0, u32::try_from(source.len()).unwrap()));
    let root = arena.root();

    for line in 0..u32::try_from(table.line_count()).unwrap() {
        let text = table.line_text(source, line);
        let code = text.find("//").map_or(text, |at| &text[..at]);
        let trimmed = code.trim();
        if trimmed.is_empty() || trimmed.chars().all(|c| c == '}') {
            continue;
        }

        let lead = code.len() - code.trim_start().len();
        let start = table.line_start(line).unwrap() + u32::try_from(lead).unwrap();
        let stmt = arena.push_child(
            root,
            "Stmt",
            Span::new(start, start + u32::try_from(trimmed.len()).unwrap()),
        );

        let mut word_start = None;
        for (i, c) in trimmed.char_indices().chain([(trimmed.len(), ' ')]) {
            let is_word = c.is_alphanumeric() || c == '_' || c == '\'';
            match (word_start, is_word) {
                (None, true) => word_start = Some(i),
                (Some(ws), false) => {
                    let ws = start + u32::try_from(ws).unwrap();
                    let we = start + u32::try_from(i).unwrap();
                    arena.push_child(stmt, "Word", Span::new(ws, we));
                    word_start = None;
                }
                _ => {}
            }
        }
    }
    arena
}

/// The first top-level node starting on the 0-based `line`.
pub fn stmt_on_line(source: &str, tree: &SyntaxArena, line: u32) -> NodeId {
    let table = LineOffsetTable::build(source);
    tree.children(tree.root())
        .iter()
        .copied()
        .find(|&node| table.line_index(tree.span(node).start) == line)
        .unwrap()
}

/// The word node starting exactly at `offset`.
pub fn word_at(tree: &SyntaxArena, offset: u32) -> NodeId {
    tree.children(tree.root())
        .iter()
        .flat_map(|&stmt| tree.children(stmt).iter().copied())
        .find(|&node| tree.span(node).start == offset)
        .unwrap()
}

/// Type checker answering from a fixed table.
#[derive(Default)]
pub struct MockChecker {
    pub files: Vec<String>,
    pub types: FxHashMap<NodeId, String>,
}

impl MockChecker {
    pub fn with_file(file_name: &str) -> Self {
        MockChecker {
            files: vec![file_name.to_string()],
            types: FxHashMap::default(),
        }
    }

    pub fn set_type(&mut self, node: NodeId, text: &str) -> &mut Self {
        self.types.insert(node, text.to_string());
        self
    }
}

impl TypeChecker for MockChecker {
    fn contains_file(&self, file_name: &str) -> bool {
        self.files.iter().any(|f| f == file_name)
    }

    fn type_text(&self, node: NodeId) -> Option<String> {
        self.types.get(&node).cloned()
    }
}

/// Language service answering from a table keyed by offset.
#[derive(Default)]
pub struct MockLanguageService {
    pub infos: FxHashMap<u32, QuickInfo>,
}

impl MockLanguageService {
    /// Register quick-info at `offset`, split into two display parts.
    pub fn set_info(&mut self, offset: u32, text: &str) -> &mut Self {
        let split = text.find(' ').map_or(text.len(), |at| at + 1);
        self.infos.insert(
            offset,
            QuickInfo {
                display_parts: vec![
                    DisplayPart::new(&text[..split], "keyword"),
                    DisplayPart::new(&text[split..], "text"),
                ],
            },
        );
        self
    }
}

impl LanguageService for MockLanguageService {
    fn quick_info(&self, _file_name: &str, offset: u32) -> Option<QuickInfo> {
        self.infos.get(&offset).cloned()
    }
}

/// Snapshot store that counts writes and can be told to refuse them.
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemorySnapshotStore,
    pub writes: usize,
    pub fail: bool,
}

impl SnapshotStore for CountingStore {
    fn read(&self, file_name: &str, name: &str) -> Option<String> {
        self.inner.read(file_name, name)
    }

    fn write(&mut self, file_name: &str, name: &str, text: &str) -> Result<(), SnapshotError> {
        if self.fail {
            return Err(SnapshotError::Rejected {
                file_name: file_name.to_string(),
                name: name.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.writes += 1;
        self.inner.write(file_name, name, text)
    }
}
