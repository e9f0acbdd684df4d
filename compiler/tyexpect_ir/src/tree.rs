//! Syntax tree interface.
//!
//! The checker never parses source itself. Hosts expose their tree through
//! [`SyntaxTree`]: node extents, children in source order, and the two node
//! shapes that change which node a line assertion reports on.
//!
//! [`SyntaxArena`] is a flat, index-based implementation for hosts that
//! convert their own AST, and for tests.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::Span;

/// Index into a syntax tree.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Hash for NodeId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Node shapes that redirect a line assertion to an inner node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum NodeShape {
    /// A statement that declares exactly one variable, with an initializer
    /// (`let x = init`). Assertions report the initializer's type.
    SingleInitializedDeclaration { initializer: NodeId },
    /// A statement wrapping a single expression. Assertions report the
    /// expression's type.
    ExpressionStatement { expression: NodeId },
    #[default]
    Other,
}

/// Read access to a parsed file.
pub trait SyntaxTree {
    /// The file node. It is never bound to an assertion itself.
    fn root(&self) -> NodeId;

    /// Extent of `node`. `start` is the offset of its first token, leading
    /// trivia excluded; `end` is exclusive.
    fn span(&self, node: NodeId) -> Span;

    /// Children in source order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Shape of `node`.
    fn shape(&self, node: NodeId) -> NodeShape;
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: &'static str,
    span: Span,
    shape: NodeShape,
    children: Vec<NodeId>,
}

/// Arena-backed [`SyntaxTree`].
///
/// Nodes are pushed in any order and linked with [`SyntaxArena::add_child`];
/// children must be linked in source order.
#[derive(Clone, Debug)]
pub struct SyntaxArena {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxArena {
    /// Create an arena whose root node covers `span`.
    pub fn new(span: Span) -> Self {
        SyntaxArena {
            nodes: vec![NodeData {
                kind: "File",
                span,
                shape: NodeShape::Other,
                children: Vec::new(),
            }],
            root: NodeId::new(0),
        }
    }

    /// Allocate a detached node. `kind` is a free-form label for debugging.
    pub fn alloc(&mut self, kind: &'static str, span: Span) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1));
        self.nodes.push(NodeData {
            kind,
            span,
            shape: NodeShape::Other,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a node and append it to `parent`'s children.
    pub fn push_child(&mut self, parent: NodeId, kind: &'static str, span: Span) -> NodeId {
        let id = self.alloc(kind, span);
        self.add_child(parent, id);
        id
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(data) = self.nodes.get_mut(parent.index()) {
            data.children.push(child);
        }
    }

    /// Set the shape of `node`.
    pub fn set_shape(&mut self, node: NodeId, shape: NodeShape) {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.shape = shape;
        }
    }

    /// The debugging label `node` was allocated with.
    pub fn kind(&self, node: NodeId) -> &'static str {
        self.nodes.get(node.index()).map_or("<invalid>", |data| data.kind)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl SyntaxTree for SyntaxArena {
    fn root(&self) -> NodeId {
        self.root
    }

    fn span(&self, node: NodeId) -> Span {
        self.nodes
            .get(node.index())
            .map_or(Span::DUMMY, |data| data.span)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.index())
            .map_or(&[][..], |data| data.children.as_slice())
    }

    fn shape(&self, node: NodeId) -> NodeShape {
        self.nodes
            .get(node.index())
            .map_or(NodeShape::Other, |data| data.shape)
    }
}

#[cfg(test)]
mod tests;
