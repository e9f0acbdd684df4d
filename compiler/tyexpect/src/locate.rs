//! Binding assertions to the syntax tree.
//!
//! Line assertions bind to the first node, in pre-order, whose first token
//! starts on the assertion's line. Caret assertions bind to the deepest node
//! containing the caret's offset.

use rustc_hash::FxHashMap;
use tyexpect_diagnostic::span_utils::LineOffsetTable;
use tyexpect_ir::{walk_node, NodeId, NodeShape, SyntaxTree, Visitor};

use crate::assertion::TypeAssertion;

/// A line assertion and the node it reports on.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundAssertion {
    /// 0-based line the assertion is attributed to.
    pub line: u32,
    /// Node whose type is checked, after retargeting.
    pub node: NodeId,
    pub assertion: TypeAssertion,
}

struct Binder<'a> {
    table: &'a LineOffsetTable,
    pending: &'a mut FxHashMap<u32, TypeAssertion>,
    bound: Vec<BoundAssertion>,
}

impl<T: SyntaxTree + ?Sized> Visitor<T> for Binder<'_> {
    fn visit_node(&mut self, tree: &T, node: NodeId) {
        if self.pending.is_empty() {
            return;
        }
        let line = self.table.line_index(tree.span(node).start);
        if let Some(assertion) = self.pending.remove(&line) {
            let target = retarget(tree, node);
            tracing::trace!(line, ?node, ?target, "bound type assertion");
            self.bound.push(BoundAssertion {
                line,
                node: target,
                assertion,
            });
        }
        walk_node(self, tree, node);
    }
}

/// The node whose type a line assertion on `node` should check.
fn retarget<T: SyntaxTree + ?Sized>(tree: &T, node: NodeId) -> NodeId {
    match tree.shape(node) {
        NodeShape::SingleInitializedDeclaration { initializer } => initializer,
        NodeShape::ExpressionStatement { expression } => expression,
        NodeShape::Other => node,
    }
}

/// Bind every pending line assertion that some node starts on.
///
/// Bound entries are removed from `pending`; what remains afterwards has no
/// node and is reported through [`orphan_lines`]. The root itself is never
/// bound.
pub fn bind_type_assertions<T: SyntaxTree + ?Sized>(
    tree: &T,
    table: &LineOffsetTable,
    pending: &mut FxHashMap<u32, TypeAssertion>,
) -> Vec<BoundAssertion> {
    let mut binder = Binder {
        table,
        pending,
        bound: Vec::new(),
    };
    binder.visit_children(tree, tree.root());
    binder.bound
}

/// Lines left in `pending` after binding, in ascending order.
pub fn orphan_lines(pending: &FxHashMap<u32, TypeAssertion>) -> Vec<u32> {
    let mut lines: Vec<u32> = pending.keys().copied().collect();
    lines.sort_unstable();
    lines
}

/// The deepest node whose span contains `position`.
///
/// Spans are half-open. The root is not a candidate: a position no top-level
/// node contains has no node.
pub fn locate_caret<T: SyntaxTree + ?Sized>(tree: &T, position: u32) -> Option<NodeId> {
    let containing = |node: NodeId| {
        tree.children(node)
            .iter()
            .copied()
            .find(|&child| tree.span(child).contains(position))
    };

    let mut current = containing(tree.root())?;
    while let Some(child) = containing(current) {
        current = child;
    }
    Some(current)
}
