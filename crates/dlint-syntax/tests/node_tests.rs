//! Tests for arena construction, typed access, children and parent links.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;

/// Builds `if (ok) { done(); } else { fail(); }` inside a program.
fn build_if_program() -> (NodeArena, NodeIndex, NodeIndex, NodeIndex) {
    let mut arena = NodeArena::new();

    let test = arena.add_identifier(4, 6, "ok");

    let done = arena.add_identifier(10, 14, "done");
    let done_call = arena.add_call_expr(
        SyntaxKind::CallExpression,
        10,
        16,
        CallExprData {
            expression: done,
            arguments: NodeList::default(),
            optional: false,
        },
    );
    let done_stmt = arena.add_expr_statement(SyntaxKind::ExpressionStatement, 10, 17, done_call);
    let then_block = arena.add_block(SyntaxKind::BlockStatement, 8, 19, NodeList::new(vec![done_stmt]));

    let fail = arena.add_identifier(27, 31, "fail");
    let fail_call = arena.add_call_expr(
        SyntaxKind::CallExpression,
        27,
        33,
        CallExprData {
            expression: fail,
            arguments: NodeList::default(),
            optional: false,
        },
    );
    let fail_stmt = arena.add_expr_statement(SyntaxKind::ExpressionStatement, 27, 34, fail_call);
    let else_block = arena.add_block(SyntaxKind::BlockStatement, 25, 36, NodeList::new(vec![fail_stmt]));

    let if_stmt = arena.add_if_statement(
        0,
        36,
        IfStatementData {
            expression: test,
            then_statement: then_block,
            else_statement: else_block,
        },
    );
    let root = arena.add_block(SyntaxKind::Program, 0, 36, NodeList::new(vec![if_stmt]));
    (arena, root, if_stmt, fail)
}

#[test]
fn test_node_index_none() {
    assert!(NodeIndex::NONE.is_none());
    assert!(NodeIndex(0).is_some());
    assert_eq!(NodeIndex::default(), NodeIndex::NONE);
}

#[test]
fn test_get_children_if_statement_order() {
    let (arena, _root, if_stmt, _) = build_if_program();
    let children = arena.get_children(if_stmt);
    let kinds: Vec<_> = children.iter().map(|&c| arena.kind(c).unwrap()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::BlockStatement,
            SyntaxKind::BlockStatement
        ]
    );
}

#[test]
fn test_get_children_omits_missing_optionals() {
    let mut arena = NodeArena::new();
    let test = arena.add_identifier(4, 5, "x");
    let then_block = arena.add_block(SyntaxKind::BlockStatement, 7, 9, NodeList::default());
    let if_stmt = arena.add_if_statement(
        0,
        9,
        IfStatementData {
            expression: test,
            then_statement: then_block,
            else_statement: NodeIndex::NONE,
        },
    );
    assert_eq!(arena.get_children(if_stmt), vec![test, then_block]);
    assert!(arena.get_children(test).is_empty());
    assert!(arena.get_children(NodeIndex::NONE).is_empty());
}

#[test]
fn test_parent_links_set_by_builders() {
    let (arena, root, if_stmt, fail) = build_if_program();
    assert_eq!(arena.parent(root), NodeIndex::NONE);
    assert_eq!(arena.parent(if_stmt), root);

    let call = arena.parent(fail);
    assert_eq!(arena.kind(call), Some(SyntaxKind::CallExpression));

    let ancestors: Vec<_> = arena.ancestors(fail).collect();
    assert_eq!(ancestors.len(), 5);
    assert_eq!(ancestors.last(), Some(&root));
}

#[test]
fn test_find_ancestor() {
    let (arena, root, if_stmt, fail) = build_if_program();
    assert_eq!(arena.find_ancestor(fail, &[SyntaxKind::IfStatement]), Some(if_stmt));
    assert_eq!(arena.find_ancestor(fail, &[SyntaxKind::Program]), Some(root));
    assert_eq!(arena.find_ancestor(fail, &[SyntaxKind::FunctionExpression]), None);
}

#[test]
fn test_typed_getters_check_kind() {
    let (arena, root, if_stmt, fail) = build_if_program();
    let if_node = arena.get(if_stmt).unwrap();
    assert!(arena.get_if_statement(if_node).is_some());
    assert!(arena.get_call_expr(if_node).is_none());
    assert!(arena.get_block(arena.get(root).unwrap()).is_some());

    assert_eq!(arena.get_identifier_text(fail), Some("fail"));
    assert!(arena.is_identifier_named(fail, "fail"));
    assert!(!arena.is_identifier_named(if_stmt, "fail"));
}

#[test]
fn test_token_nodes_have_no_data() {
    let mut arena = NodeArena::new();
    let this = arena.add_token(SyntaxKind::ThisExpression, 0, 4);
    let node = arena.get(this).unwrap();
    assert!(!node.has_data());
    assert!(arena.get_children(this).is_empty());
    assert_eq!(arena.type_name(this), Some("ThisExpression"));
}

#[test]
fn test_unknown_node_keeps_type_name_and_children() {
    let mut arena = NodeArena::new();
    let id = arena.add_identifier(6, 9, "Foo");
    let class = arena.add_unknown(0, 12, "ClassDeclaration", NodeList::new(vec![id]));
    assert_eq!(arena.kind(class), Some(SyntaxKind::Unknown));
    assert_eq!(arena.type_name(class), Some("ClassDeclaration"));
    assert_eq!(arena.get_children(class), vec![id]);
    assert_eq!(arena.parent(id), class);
}

#[test]
fn test_shorthand_property_yields_single_child() {
    let mut arena = NodeArena::new();
    let key = arena.add_identifier(1, 2, "a");
    let prop = arena.add_property_assignment(
        1,
        2,
        PropertyAssignmentData {
            name: key,
            initializer: key,
            computed: false,
            shorthand: true,
        },
    );
    assert_eq!(arena.get_children(prop), vec![key]);
}

#[test]
fn test_syntax_kind_names_round_trip() {
    for &kind in SyntaxKind::ALL {
        assert_eq!(SyntaxKind::from_name(kind.as_str()), Some(kind));
    }
    assert_eq!(SyntaxKind::from_name("ClassDeclaration"), None);
    assert!(SyntaxKind::ArrowFunctionExpression.is_function_like());
    assert!(SyntaxKind::DoWhileStatement.is_loop());
    assert!(!SyntaxKind::IfStatement.is_loop());
}
