//! tyexpect IR - source locations and the syntax tree seam.
//!
//! This crate contains the data structures shared by the directive scanner
//! and the tree locator:
//! - [`Span`] for byte ranges in a checked file
//! - [`NodeId`] and [`SyntaxTree`] for the host's parsed tree
//! - [`SyntaxArena`], a flat tree implementation
//! - [`Visitor`] for pre-order traversal

mod span;
mod tree;
pub mod visitor;

pub use span::Span;
pub use tree::{NodeId, NodeShape, SyntaxArena, SyntaxTree};
pub use visitor::{walk_node, Visitor};
