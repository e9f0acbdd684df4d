//! Syntax tree visitor.
//!
//! A single `Visitor` trait with a default `visit_node` that walks children.
//! Override `visit_node` to act on each node, then call [`walk_node`] to keep
//! descending. The visitor may mutate its own state; the tree stays immutable.
//!
//! # Example
//!
//! ```
//! use tyexpect_ir::{walk_node, NodeId, Span, SyntaxArena, SyntaxTree, Visitor};
//!
//! struct Count(usize);
//!
//! impl<T: SyntaxTree + ?Sized> Visitor<T> for Count {
//!     fn visit_node(&mut self, tree: &T, node: NodeId) {
//!         self.0 += 1;
//!         walk_node(self, tree, node);
//!     }
//! }
//!
//! let mut arena = SyntaxArena::new(Span::new(0, 10));
//! let root = arena.root();
//! arena.push_child(root, "Stmt", Span::new(0, 4));
//! arena.push_child(root, "Stmt", Span::new(5, 10));
//!
//! let mut count = Count(0);
//! count.visit_children(&arena, root);
//! assert_eq!(count.0, 2);
//! ```

use crate::{NodeId, SyntaxTree};

/// Pre-order tree visitor.
pub trait Visitor<T: SyntaxTree + ?Sized> {
    /// Visit one node. The default walks its children.
    fn visit_node(&mut self, tree: &T, node: NodeId) {
        walk_node(self, tree, node);
    }

    /// Visit every child of `node` without visiting `node` itself.
    fn visit_children(&mut self, tree: &T, node: NodeId) {
        walk_node(self, tree, node);
    }
}

/// Visit each child of `node` in source order.
pub fn walk_node<T, V>(visitor: &mut V, tree: &T, node: NodeId)
where
    T: SyntaxTree + ?Sized,
    V: Visitor<T> + ?Sized,
{
    for &child in tree.children(node) {
        visitor.visit_node(tree, child);
    }
}
