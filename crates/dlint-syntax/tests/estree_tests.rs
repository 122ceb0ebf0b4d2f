//! Tests for ESTree JSON lowering.

use crate::estree::LoadError;
use crate::program::Program;
use crate::syntax_kind::SyntaxKind;
use dlint_common::Position;
use serde_json::json;

fn load(value: serde_json::Value) -> Program {
    Program::from_value("test.js", &value, None).expect("fixture should load")
}

#[test]
fn test_load_new_promise_with_range() {
    // new Promise((resolve) => { resolve(); })
    let program = load(json!({
        "type": "Program",
        "range": [0, 41],
        "body": [{
            "type": "ExpressionStatement",
            "range": [0, 41],
            "expression": {
                "type": "NewExpression",
                "range": [0, 41],
                "callee": { "type": "Identifier", "name": "Promise", "range": [4, 11] },
                "arguments": [{
                    "type": "ArrowFunctionExpression",
                    "range": [12, 40],
                    "params": [{ "type": "Identifier", "name": "resolve", "range": [13, 20] }],
                    "body": {
                        "type": "BlockStatement",
                        "range": [25, 40],
                        "body": [{
                            "type": "ExpressionStatement",
                            "range": [27, 37],
                            "expression": {
                                "type": "CallExpression",
                                "range": [27, 36],
                                "callee": { "type": "Identifier", "name": "resolve", "range": [27, 34] },
                                "arguments": []
                            }
                        }]
                    }
                }]
            }
        }]
    }));

    let arena = &program.arena;
    assert_eq!(arena.kind(program.root), Some(SyntaxKind::Program));

    let stmt = arena.get_children(program.root)[0];
    let new_expr = arena.get_children(stmt)[0];
    let data = arena.call_expr_at(new_expr).unwrap();
    assert!(arena.is_identifier_named(data.expression, "Promise"));

    let callback = data.arguments.first().unwrap();
    assert_eq!(arena.pos_end(callback), Some((12, 40)));
    let func = arena.function_at(callback).unwrap();
    assert_eq!(func.parameters.len(), 1);
    assert_eq!(arena.kind(func.body), Some(SyntaxKind::BlockStatement));
    assert_eq!(arena.parent(func.body), callback);
    assert_eq!(arena.parent(callback), new_expr);
}

#[test]
fn test_load_start_end_positions_and_loc() {
    let program = load(json!({
        "type": "Identifier",
        "name": "x",
        "start": 3,
        "end": 4,
        "loc": { "start": { "line": 2, "column": 3 }, "end": { "line": 2, "column": 4 } }
    }));
    assert_eq!(program.arena.pos_end(program.root), Some((3, 4)));
    // 1-indexed ESTree lines become 0-indexed
    assert_eq!(program.position_of(program.root), Some(Position::new(1, 3)));
}

#[test]
fn test_position_prefers_source_text() {
    let value = json!({ "type": "Identifier", "name": "y", "range": [4, 5],
        "loc": { "start": { "line": 9, "column": 9 } } });
    let program = Program::from_value("t.js", &value, Some("x;\n y".to_string())).unwrap();
    assert_eq!(program.position_of(program.root), Some(Position::new(1, 1)));
}

#[test]
fn test_unknown_node_children_sorted_by_position() {
    // class A { m() { go(); } } with a superclass listed after the body
    let program = load(json!({
        "type": "ClassDeclaration",
        "range": [0, 40],
        "body": {
            "type": "ClassBody",
            "range": [20, 40],
            "body": [{
                "type": "MethodDefinition",
                "range": [22, 38],
                "key": { "type": "Identifier", "name": "m", "range": [22, 23] },
                "value": {
                    "type": "FunctionExpression",
                    "range": [23, 38],
                    "params": [],
                    "body": { "type": "BlockStatement", "range": [26, 38], "body": [] }
                }
            }]
        },
        "id": { "type": "Identifier", "name": "A", "range": [6, 7] },
        "superClass": { "type": "Identifier", "name": "B", "range": [16, 17] }
    }));

    let arena = &program.arena;
    assert_eq!(arena.type_name(program.root), Some("ClassDeclaration"));
    let children = arena.get_children(program.root);
    assert_eq!(children.len(), 3);
    assert!(arena.is_identifier_named(children[0], "A"));
    assert!(arena.is_identifier_named(children[1], "B"));
    assert_eq!(arena.type_name(children[2]), Some("ClassBody"));

    let method = arena.get_children(children[2])[0];
    let method_children = arena.get_children(method);
    assert_eq!(arena.kind(method_children[1]), Some(SyntaxKind::FunctionExpression));
}

#[test]
fn test_template_literal_interleaves_quasis() {
    let program = load(json!({
        "type": "TemplateLiteral",
        "range": [0, 10],
        "quasis": [
            { "type": "TemplateElement", "range": [1, 3], "value": { "raw": "a ", "cooked": "a " }, "tail": false },
            { "type": "TemplateElement", "range": [7, 9], "value": { "raw": " b", "cooked": " b" }, "tail": true }
        ],
        "expressions": [{ "type": "Identifier", "name": "x", "range": [5, 6] }]
    }));
    let arena = &program.arena;
    let kinds: Vec<_> = arena
        .get_children(program.root)
        .into_iter()
        .map(|c| arena.kind(c).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::TemplateElement, SyntaxKind::Identifier, SyntaxKind::TemplateElement]
    );
}

#[test]
fn test_literal_text() {
    let program = load(json!({
        "type": "ArrayExpression",
        "elements": [
            { "type": "Literal", "value": "str", "raw": "'str'" },
            { "type": "Literal", "value": 42, "raw": "42" },
            null,
            { "type": "Literal", "value": null, "raw": "null" },
            { "type": "Literal", "value": {}, "raw": "/ab+/", "regex": { "pattern": "ab+", "flags": "" } }
        ]
    }));
    let arena = &program.arena;
    let texts: Vec<_> = arena
        .get_children(program.root)
        .into_iter()
        .map(|c| arena.get_literal_text(c).unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["str", "42", "null", "/ab+/"]);
}

#[test]
fn test_if_without_alternate() {
    let program = load(json!({
        "type": "IfStatement",
        "test": { "type": "Identifier", "name": "a" },
        "consequent": { "type": "BlockStatement", "body": [] },
        "alternate": null
    }));
    let data = program.arena.if_statement_at(program.root).unwrap();
    assert!(data.else_statement.is_none());
}

#[test]
fn test_missing_required_field() {
    let err = Program::from_value(
        "t.js",
        &json!({ "type": "IfStatement", "consequent": { "type": "EmptyStatement" } }),
        None,
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        LoadError::MissingField { ref node_type, field: "test" } if node_type == "IfStatement"
    ));
    assert_eq!(err.to_string(), "IfStatement node is missing required field `test`");
}

#[test]
fn test_root_without_type_is_rejected() {
    let err = Program::from_json_str("t.js", r#"{ "body": [] }"#, None).err().unwrap();
    assert!(matches!(err, LoadError::NotANode { .. }));
}

#[test]
fn test_invalid_json_is_rejected() {
    let err = Program::from_json_str("t.js", "{ not json", None).err().unwrap();
    assert!(matches!(err, LoadError::Json(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_deeply_nested_json_loads() {
    // Deeper than serde_json's default recursion limit of 128
    let depth = 300;
    let mut json = String::new();
    for _ in 0..depth {
        json.push_str(r#"{"type":"UnaryExpression","operator":"!","prefix":true,"argument":"#);
    }
    json.push_str(r#"{"type":"Identifier","name":"x"}"#);
    for _ in 0..depth {
        json.push('}');
    }
    let program = Program::from_json_str("deep.js", &json, None).unwrap();
    assert_eq!(program.arena.len(), depth + 1);
}

#[test]
fn test_shorthand_property_shares_key() {
    let program = load(json!({
        "type": "ObjectExpression",
        "properties": [{
            "type": "Property",
            "shorthand": true,
            "computed": false,
            "key": { "type": "Identifier", "name": "resolve", "range": [2, 9] },
            "value": { "type": "Identifier", "name": "resolve", "range": [2, 9] }
        }]
    }));
    let arena = &program.arena;
    let prop = arena.get_children(program.root)[0];
    assert_eq!(arena.get_children(prop).len(), 1);
}
