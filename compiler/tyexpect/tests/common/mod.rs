//! A small in-memory host for integration tests.
//!
//! Builds a tree from source text, one statement per code line:
//!
//! - blank, comment-only and `}` lines get no node
//! - `let`/`const` lines are declarations whose initializer is the text
//!   between `=` and `;`
//! - other lines are expression statements
//! - every identifier or literal is a leaf
//!
//! Types are attached by line, quick-info by offset.

#![allow(dead_code, clippy::unwrap_used)]

use rustc_hash::FxHashMap;
use tyexpect::{
    check_file, DisplayPart, ExpectContext, ExpectOptions, FileReport, LanguageService, QuickInfo,
    ReconciliationResult, Reconciler, SnapshotStore, TypeChecker,
};
use tyexpect_diagnostic::span_utils::LineOffsetTable;
use tyexpect_ir::{NodeId, NodeShape, Span, SyntaxArena, SyntaxTree};

pub const FILE: &str = "fixture.ts";

pub struct Host {
    pub source: String,
    pub tree: SyntaxArena,
    table: LineOffsetTable,
    types: FxHashMap<NodeId, String>,
    quick_info: FxHashMap<u32, String>,
    pub errors: Vec<Span>,
}

impl Host {
    pub fn new(source: &str) -> Self {
        let table = LineOffsetTable::build(source);
        let tree = build_tree(source, &table);
        Host {
            source: source.to_string(),
            tree,
            table,
            types: FxHashMap::default(),
            quick_info: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    /// Set the type reported for assertions on the 0-based `line`.
    pub fn set_type(&mut self, line: u32, text: &str) -> &mut Self {
        let stmt = self.statement_on(line);
        let node = match self.tree.shape(stmt) {
            NodeShape::SingleInitializedDeclaration { initializer } => initializer,
            NodeShape::ExpressionStatement { expression } => expression,
            NodeShape::Other => stmt,
        };
        self.types.insert(node, text.to_string());
        self
    }

    /// Quick-info for the leaf starting at the first occurrence of `needle`.
    pub fn set_quick_info(&mut self, needle: &str, text: &str) -> &mut Self {
        let offset = u32::try_from(self.source.find(needle).unwrap()).unwrap();
        self.quick_info.insert(offset, text.to_string());
        self
    }

    /// Report a compiler error on the 0-based `line`.
    pub fn add_error(&mut self, line: u32) -> &mut Self {
        let start = self.table.line_start(line).unwrap();
        self.errors.push(Span::new(start, start + 1));
        self
    }

    pub fn statement_on(&self, line: u32) -> NodeId {
        self.tree
            .children(self.tree.root())
            .iter()
            .copied()
            .find(|&node| self.table.line_index(self.tree.span(node).start) == line)
            .unwrap()
    }

    pub fn ctx(&self) -> ExpectContext<'_> {
        ExpectContext {
            file_name: FILE,
            source: &self.source,
            tree: &self.tree,
            checker: self,
            language_service: self,
            diagnostics: &self.errors,
        }
    }

    pub fn check(&self, store: &dyn SnapshotStore) -> FileReport {
        check_file(&self.ctx(), &ExpectOptions::default(), store)
    }

    pub fn reconcile(&self, store: &dyn SnapshotStore) -> ReconciliationResult {
        Reconciler::new(ExpectOptions::default()).reconcile(&self.ctx(), store)
    }
}

impl TypeChecker for Host {
    fn contains_file(&self, file_name: &str) -> bool {
        file_name == FILE
    }

    fn type_text(&self, node: NodeId) -> Option<String> {
        self.types.get(&node).cloned()
    }
}

impl LanguageService for Host {
    fn quick_info(&self, _file_name: &str, offset: u32) -> Option<QuickInfo> {
        self.quick_info.get(&offset).map(|text| QuickInfo {
            display_parts: text
                .split_inclusive(' ')
                .map(|part| DisplayPart::new(part, "text"))
                .collect(),
        })
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap()
}

fn build_tree(source: &str, table: &LineOffsetTable) -> SyntaxArena {
    let mut tree = SyntaxArena::new(Span::new(0, to_u32(source.len())));
    let root = tree.root();

    for line in 0..to_u32(table.line_count()) {
        let text = table.line_text(source, line);
        let code = text.find("//").map_or(text, |at| &text[..at]);
        let trimmed = code.trim();
        if trimmed.is_empty() || trimmed.chars().all(|c| c == '}') {
            continue;
        }

        let line_start = table.line_start(line).unwrap();
        let start = line_start + to_u32(code.len() - code.trim_start().len());
        let stmt = tree.push_child(
            root,
            "Statement",
            Span::new(start, start + to_u32(trimmed.len())),
        );

        let is_declaration = trimmed.starts_with("let ") || trimmed.starts_with("const ");
        match trimmed.find(" = ").filter(|_| is_declaration) {
            Some(eq) => {
                push_leaves(&mut tree, stmt, &trimmed[..eq], start);
                let init_text = trimmed[eq + 3..].trim_end_matches(';');
                let init_start = start + to_u32(eq + 3);
                let init = tree.push_child(
                    stmt,
                    "Initializer",
                    Span::new(init_start, init_start + to_u32(init_text.len())),
                );
                push_leaves(&mut tree, init, init_text, init_start);
                tree.set_shape(
                    stmt,
                    NodeShape::SingleInitializedDeclaration { initializer: init },
                );
            }
            None => {
                let expr_text = trimmed.trim_end_matches(';');
                let expr = tree.push_child(
                    stmt,
                    "Expression",
                    Span::new(start, start + to_u32(expr_text.len())),
                );
                push_leaves(&mut tree, expr, expr_text, start);
                tree.set_shape(stmt, NodeShape::ExpressionStatement { expression: expr });
            }
        }
    }
    tree
}

fn push_leaves(tree: &mut SyntaxArena, parent: NodeId, text: &str, base: u32) {
    let mut word_start = None;
    for (i, c) in text.char_indices().chain([(text.len(), ' ')]) {
        let is_word = c.is_alphanumeric() || c == '_' || c == '"' || c == '\'';
        match (word_start, is_word) {
            (None, true) => word_start = Some(i),
            (Some(ws), false) => {
                tree.push_child(parent, "Leaf", Span::new(base + to_u32(ws), base + to_u32(i)));
                word_start = None;
            }
            _ => {}
        }
    }
}
