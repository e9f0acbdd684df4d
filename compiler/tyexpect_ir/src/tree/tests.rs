use super::*;

#[test]
fn test_arena_root_and_children() {
    let mut arena = SyntaxArena::new(Span::new(0, 20));
    let root = arena.root();
    let a = arena.push_child(root, "Stmt", Span::new(0, 9));
    let b = arena.push_child(root, "Stmt", Span::new(10, 20));

    assert_eq!(arena.children(root), &[a, b]);
    assert_eq!(arena.span(b), Span::new(10, 20));
    assert_eq!(arena.kind(a), "Stmt");
    assert_eq!(arena.node_count(), 3);
}

#[test]
fn test_arena_shape_defaults_to_other() {
    let mut arena = SyntaxArena::new(Span::new(0, 12));
    let root = arena.root();
    let stmt = arena.push_child(root, "VarStmt", Span::new(0, 12));
    assert_eq!(arena.shape(stmt), NodeShape::Other);

    let init = arena.push_child(stmt, "Literal", Span::new(8, 11));
    arena.set_shape(stmt, NodeShape::SingleInitializedDeclaration { initializer: init });
    assert_eq!(
        arena.shape(stmt),
        NodeShape::SingleInitializedDeclaration { initializer: init }
    );
}

#[test]
fn test_invalid_node_lookups_are_empty() {
    let arena = SyntaxArena::new(Span::new(0, 1));
    assert!(arena.children(NodeId::INVALID).is_empty());
    assert_eq!(arena.span(NodeId::INVALID), Span::DUMMY);
    assert_eq!(arena.kind(NodeId::INVALID), "<invalid>");
    assert_eq!(format!("{:?}", NodeId::INVALID), "NodeId::INVALID");
}
