//! Tree builders shared by the rule tests.
//!
//! Parsing is out of scope for dlint, so tests assemble arenas directly.
//! Spans cover the node's children, which keeps diagnostics in source order.

use dlint_syntax::node::*;
use dlint_syntax::{NodeArena, NodeIndex, NodeList, Program, SyntaxKind};

pub struct AstBuilder {
    pub arena: NodeArena,
    cursor: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder {
            arena: NodeArena::new(),
            cursor: 0,
        }
    }

    fn fresh_span(&mut self, width: u32) -> (u32, u32) {
        let pos = self.cursor;
        self.cursor += width + 1;
        (pos, pos + width)
    }

    /// A span around `children`, or a fresh one for leaves.
    fn cover(&mut self, children: &[NodeIndex]) -> (u32, u32) {
        let spans: Vec<_> = children
            .iter()
            .filter_map(|&c| self.arena.pos_end(c))
            .collect();
        match (spans.iter().map(|s| s.0).min(), spans.iter().map(|s| s.1).max()) {
            (Some(pos), Some(end)) => (pos, end + 1),
            _ => self.fresh_span(2),
        }
    }

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        let (pos, end) = self.fresh_span(name.len() as u32);
        self.arena.add_identifier(pos, end, name)
    }

    pub fn string(&mut self, value: &str) -> NodeIndex {
        let (pos, end) = self.fresh_span(value.len() as u32 + 2);
        self.arena.add_literal(
            SyntaxKind::Literal,
            pos,
            end,
            LiteralData {
                text: value.to_string(),
                raw_text: Some(format!("'{value}'")),
            },
        )
    }

    pub fn call_expr(&mut self, kind: SyntaxKind, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        let mut children = vec![callee];
        children.extend(&arguments);
        let (pos, end) = self.cover(&children);
        self.arena.add_call_expr(
            kind,
            pos,
            end,
            CallExprData {
                expression: callee,
                arguments: NodeList::new(arguments),
                optional: false,
            },
        )
    }

    /// `name(args...)`
    pub fn call(&mut self, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        let callee = self.ident(name);
        self.call_expr(SyntaxKind::CallExpression, callee, arguments)
    }

    /// `name(args...);`
    pub fn call_stmt(&mut self, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        let call = self.call(name, arguments);
        self.stmt(call)
    }

    /// `object.property`
    pub fn member(&mut self, object: &str, property: &str) -> NodeIndex {
        let object = self.ident(object);
        let property = self.ident(property);
        let (pos, end) = self.cover(&[object, property]);
        self.arena.add_access_expr(
            pos,
            end,
            AccessExprData {
                expression: object,
                name_or_argument: property,
                computed: false,
                question_dot_token: false,
            },
        )
    }

    pub fn stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.cover(&[expression]);
        self.arena
            .add_expr_statement(SyntaxKind::ExpressionStatement, pos, end, expression)
    }

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.cover(&statements);
        self.arena
            .add_block(SyntaxKind::BlockStatement, pos, end, NodeList::new(statements))
    }

    /// `if (test) then else alternate`
    pub fn if_stmt(&mut self, test: &str, then: NodeIndex, alternate: Option<NodeIndex>) -> NodeIndex {
        let test = self.ident(test);
        let else_statement = alternate.unwrap_or(NodeIndex::NONE);
        let (pos, end) = self.cover(&[test, then, else_statement]);
        self.arena.add_if_statement(
            pos,
            end,
            IfStatementData {
                expression: test,
                then_statement: then,
                else_statement,
            },
        )
    }

    fn function_node(&mut self, kind: SyntaxKind, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        let mut children = parameters.clone();
        children.push(body);
        let (pos, end) = self.cover(&children);
        self.arena.add_function(
            kind,
            pos,
            end,
            FunctionData {
                name: NodeIndex::NONE,
                parameters: NodeList::new(parameters),
                body,
                is_async: false,
                asterisk_token: false,
            },
        )
    }

    fn params(&mut self, names: &[&str]) -> Vec<NodeIndex> {
        names.iter().map(|name| self.ident(name)).collect()
    }

    /// `function (params) body`
    pub fn function(&mut self, params: &[&str], body: NodeIndex) -> NodeIndex {
        let params = self.params(params);
        self.function_node(SyntaxKind::FunctionExpression, params, body)
    }

    /// `(params) => body`
    pub fn arrow(&mut self, params: &[&str], body: NodeIndex) -> NodeIndex {
        let params = self.params(params);
        self.function_node(SyntaxKind::ArrowFunctionExpression, params, body)
    }

    /// An arrow with arbitrary parameter nodes.
    pub fn arrow_with(&mut self, params: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.function_node(SyntaxKind::ArrowFunctionExpression, params, body)
    }

    /// `function name(params) body`
    pub fn function_declaration(&mut self, name: &str, params: &[&str], body: NodeIndex) -> NodeIndex {
        let name = self.ident(name);
        let params = self.params(params);
        let mut children = vec![name];
        children.extend(&params);
        children.push(body);
        let (pos, end) = self.cover(&children);
        self.arena.add_function(
            SyntaxKind::FunctionDeclaration,
            pos,
            end,
            FunctionData {
                name,
                parameters: NodeList::new(params),
                body,
                is_async: false,
                asterisk_token: false,
            },
        )
    }

    /// `{ a, b }` as a destructuring pattern
    pub fn object_pattern(&mut self, names: &[&str]) -> NodeIndex {
        let mut properties = Vec::new();
        for name in names {
            let key = self.ident(name);
            let (pos, end) = self.cover(&[key]);
            properties.push(self.arena.add_property_assignment(
                pos,
                end,
                PropertyAssignmentData {
                    name: key,
                    initializer: key,
                    computed: false,
                    shorthand: true,
                },
            ));
        }
        let (pos, end) = self.cover(&properties);
        self.arena
            .add_literal_expr(SyntaxKind::ObjectPattern, pos, end, NodeList::new(properties))
    }

    /// `for (;;) body`
    pub fn for_stmt(&mut self, body: NodeIndex) -> NodeIndex {
        let (pos, end) = self.cover(&[body]);
        self.arena.add_loop(
            SyntaxKind::ForStatement,
            pos,
            end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition: NodeIndex::NONE,
                incrementor: NodeIndex::NONE,
                statement: body,
            },
        )
    }

    /// `for (name in object) body`
    pub fn for_in(&mut self, name: &str, object: &str, body: NodeIndex) -> NodeIndex {
        let left = self.ident(name);
        let right = self.ident(object);
        let (pos, end) = self.cover(&[left, right, body]);
        self.arena.add_for_in_of(
            SyntaxKind::ForInStatement,
            pos,
            end,
            ForInOfData {
                await_modifier: false,
                initializer: left,
                expression: right,
                statement: body,
            },
        )
    }

    /// `while (test) body`
    pub fn while_stmt(&mut self, test: &str, body: NodeIndex) -> NodeIndex {
        let test = self.ident(test);
        let (pos, end) = self.cover(&[test, body]);
        self.arena.add_loop(
            SyntaxKind::WhileStatement,
            pos,
            end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition: test,
                incrementor: NodeIndex::NONE,
                statement: body,
            },
        )
    }

    /// `test ? when_true : when_false`
    pub fn conditional(&mut self, test: &str, when_true: NodeIndex, when_false: NodeIndex) -> NodeIndex {
        let condition = self.ident(test);
        let (pos, end) = self.cover(&[condition, when_true, when_false]);
        self.arena.add_conditional_expr(
            pos,
            end,
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    /// `new Promise(executor);`
    pub fn new_promise_stmt(&mut self, executor: NodeIndex) -> NodeIndex {
        let callee = self.ident("Promise");
        let new_expr = self.call_expr(SyntaxKind::NewExpression, callee, vec![executor]);
        self.stmt(new_expr)
    }

    pub fn finish(mut self, statements: Vec<NodeIndex>) -> Program {
        let (pos, end) = self.cover(&statements);
        let root = self
            .arena
            .add_block(SyntaxKind::Program, pos, end, NodeList::new(statements));
        Program::new("test.js", self.arena, root, None)
    }
}
