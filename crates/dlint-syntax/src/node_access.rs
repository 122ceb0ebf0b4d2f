//! NodeArena access methods.
//!
//! Typed getters return `None` when the node has a different kind or carries
//! no data, so callers can match shapes with `let ... else` and fall through
//! on anything unexpected.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;

macro_rules! pool_getter {
    ($(#[$doc:meta])* $name:ident, $pool:ident, $data:ty, [$($kind:ident),+]) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && matches!(node.kind, $(SyntaxKind::$kind)|+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Get mutable extended info for a node
    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Kind of the node at `index`
    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind)
    }

    /// Check whether the node at `index` has the given kind
    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.kind(index) == Some(kind)
    }

    /// The ESTree `type` string, including the original name of unknown nodes
    pub fn type_name(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        match self.get_unknown(node) {
            Some(data) => Some(&data.type_name),
            None => Some(node.kind.as_str()),
        }
    }

    pool_getter!(
        /// Get identifier data for a node.
        get_identifier, identifiers, IdentifierData, [Identifier]
    );
    pool_getter!(
        /// Get literal data (literals and template elements).
        get_literal, literals, LiteralData, [Literal, TemplateElement]
    );
    pool_getter!(
        /// Get binary-shaped data (binary, logical, assignment, default value).
        get_binary_expr, binary_exprs, BinaryExprData,
        [BinaryExpression, LogicalExpression, AssignmentExpression, AssignmentPattern]
    );
    pool_getter!(
        /// Get single-operand data (unary, update, await, yield, spread, rest).
        get_unary_expr, unary_exprs, UnaryExprData,
        [UnaryExpression, UpdateExpression, AwaitExpression, YieldExpression, SpreadElement, RestElement]
    );
    pool_getter!(
        /// Get call expression data.
        /// Returns None if node is not a call/new expression.
        get_call_expr, call_exprs, CallExprData, [CallExpression, NewExpression]
    );
    pool_getter!(
        /// Get member access data.
        get_access_expr, access_exprs, AccessExprData, [MemberExpression]
    );
    pool_getter!(
        /// Get conditional expression data (ternary: a ? b : c).
        get_conditional_expr, conditional_exprs, ConditionalExprData, [ConditionalExpression]
    );
    pool_getter!(
        /// Get function data (declarations, expressions, arrows).
        get_function, functions, FunctionData,
        [FunctionDeclaration, FunctionExpression, ArrowFunctionExpression]
    );
    pool_getter!(
        /// Get block data (program or block statement).
        get_block, blocks, BlockData, [Program, BlockStatement]
    );
    pool_getter!(
        get_expression_statement, expr_statements, ExprStatementData,
        [ExpressionStatement, ChainExpression]
    );
    pool_getter!(get_return_statement, return_data, ReturnData, [ReturnStatement, ThrowStatement]);
    pool_getter!(get_if_statement, if_statements, IfStatementData, [IfStatement]);
    pool_getter!(
        get_loop, loops, LoopData, [ForStatement, WhileStatement, DoWhileStatement]
    );
    pool_getter!(get_for_in_of, for_in_of, ForInOfData, [ForInStatement, ForOfStatement]);
    pool_getter!(get_variable, variables, VariableData, [VariableDeclaration]);
    pool_getter!(
        get_variable_declaration, variable_declarations, VariableDeclarationData,
        [VariableDeclarator]
    );
    pool_getter!(
        get_literal_expr, literal_exprs, LiteralExprData,
        [ArrayExpression, ObjectExpression, SequenceExpression, TemplateLiteral, ArrayPattern, ObjectPattern]
    );
    pool_getter!(get_property_assignment, property_assignments, PropertyAssignmentData, [Property]);
    pool_getter!(get_try, try_data, TryData, [TryStatement]);
    pool_getter!(get_catch_clause, catch_clauses, CatchClauseData, [CatchClause]);
    pool_getter!(get_switch, switch_data, SwitchData, [SwitchStatement]);
    pool_getter!(get_case_clause, case_clauses, CaseClauseData, [SwitchCase]);
    pool_getter!(get_labeled_statement, labeled_data, LabeledData, [LabeledStatement]);
    pool_getter!(get_jump, jump_data, JumpData, [BreakStatement, ContinueStatement]);
    pool_getter!(get_tagged_template, tagged_templates, TaggedTemplateData, [TaggedTemplateExpression]);
    pool_getter!(get_unknown, unknown_nodes, UnknownNodeData, [Unknown]);

    // =========================================================================
    // Convenience lookups
    // =========================================================================

    /// Function data for the node at `index`
    #[inline]
    pub fn function_at(&self, index: NodeIndex) -> Option<&FunctionData> {
        self.get_function(self.get(index)?)
    }

    /// Call/new expression data for the node at `index`
    #[inline]
    pub fn call_expr_at(&self, index: NodeIndex) -> Option<&CallExprData> {
        self.get_call_expr(self.get(index)?)
    }

    /// If statement data for the node at `index`
    #[inline]
    pub fn if_statement_at(&self, index: NodeIndex) -> Option<&IfStatementData> {
        self.get_if_statement(self.get(index)?)
    }

    /// Text of an identifier node
    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|data| data.escaped_text.as_str())
    }

    /// Check whether `index` is an identifier with exactly the given name
    pub fn is_identifier_named(&self, index: NodeIndex, name: &str) -> bool {
        self.get_identifier_text(index) == Some(name)
    }

    /// Cooked text of a literal node
    pub fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_literal(node).map(|data| data.text.as_str())
    }

    /// Source span of the node at `index`
    #[inline]
    pub fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get(index).map(|n| (n.pos, n.end))
    }

    // =========================================================================
    // Upward lookups
    // =========================================================================

    /// Parent of the node at `index` (NONE for the root)
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map(|info| info.parent)
            .unwrap_or(NodeIndex::NONE)
    }

    /// Iterate the ancestors of `index`, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            current: self.parent(index),
            remaining: self.nodes.len(),
        }
    }

    /// Find the nearest ancestor whose kind is one of `kinds`.
    pub fn find_ancestor(&self, index: NodeIndex, kinds: &[SyntaxKind]) -> Option<NodeIndex> {
        self.ancestors(index)
            .find(|&ancestor| self.kind(ancestor).is_some_and(|k| kinds.contains(&k)))
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Get the children of a node in source order (for traversal).
    ///
    /// Missing optional children are omitted. Parent links are never
    /// returned, so walking children always terminates.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };

        // Helper to add optional NodeIndex (ignoring NONE)
        let add_opt = |children: &mut Vec<NodeIndex>, idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        // Helper to add NodeList (expanding to individual nodes)
        let add_list = |children: &mut Vec<NodeIndex>, list: &NodeList| {
            children.extend(list.nodes.iter().copied().filter(|idx| idx.is_some()));
        };

        let mut children = Vec::new();

        match node.kind {
            SyntaxKind::Program | SyntaxKind::BlockStatement => {
                if let Some(data) = self.get_block(node) {
                    add_list(&mut children, &data.statements);
                }
            }
            SyntaxKind::ExpressionStatement | SyntaxKind::ChainExpression => {
                if let Some(data) = self.get_expression_statement(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            SyntaxKind::ReturnStatement | SyntaxKind::ThrowStatement => {
                if let Some(data) = self.get_return_statement(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            SyntaxKind::IfStatement => {
                if let Some(data) = self.get_if_statement(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.then_statement);
                    add_opt(&mut children, data.else_statement);
                }
            }
            SyntaxKind::ForStatement | SyntaxKind::WhileStatement => {
                if let Some(data) = self.get_loop(node) {
                    add_opt(&mut children, data.initializer);
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.incrementor);
                    add_opt(&mut children, data.statement);
                }
            }
            SyntaxKind::DoWhileStatement => {
                // `do body while (cond)`: the body comes first in source
                if let Some(data) = self.get_loop(node) {
                    add_opt(&mut children, data.statement);
                    add_opt(&mut children, data.condition);
                }
            }
            SyntaxKind::ForInStatement | SyntaxKind::ForOfStatement => {
                if let Some(data) = self.get_for_in_of(node) {
                    add_opt(&mut children, data.initializer);
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.statement);
                }
            }
            SyntaxKind::SwitchStatement => {
                if let Some(data) = self.get_switch(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.clauses);
                }
            }
            SyntaxKind::SwitchCase => {
                if let Some(data) = self.get_case_clause(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.statements);
                }
            }
            SyntaxKind::TryStatement => {
                if let Some(data) = self.get_try(node) {
                    add_opt(&mut children, data.try_block);
                    add_opt(&mut children, data.catch_clause);
                    add_opt(&mut children, data.finally_block);
                }
            }
            SyntaxKind::CatchClause => {
                if let Some(data) = self.get_catch_clause(node) {
                    add_opt(&mut children, data.variable_declaration);
                    add_opt(&mut children, data.block);
                }
            }
            SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement => {
                if let Some(data) = self.get_jump(node) {
                    add_opt(&mut children, data.label);
                }
            }
            SyntaxKind::LabeledStatement => {
                if let Some(data) = self.get_labeled_statement(node) {
                    add_opt(&mut children, data.label);
                    add_opt(&mut children, data.statement);
                }
            }
            SyntaxKind::VariableDeclaration => {
                if let Some(data) = self.get_variable(node) {
                    add_list(&mut children, &data.declarations);
                }
            }
            SyntaxKind::VariableDeclarator => {
                if let Some(data) = self.get_variable_declaration(node) {
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.initializer);
                }
            }
            SyntaxKind::FunctionDeclaration
            | SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunctionExpression => {
                if let Some(data) = self.get_function(node) {
                    add_opt(&mut children, data.name);
                    add_list(&mut children, &data.parameters);
                    add_opt(&mut children, data.body);
                }
            }
            SyntaxKind::ArrayExpression
            | SyntaxKind::ObjectExpression
            | SyntaxKind::SequenceExpression
            | SyntaxKind::TemplateLiteral
            | SyntaxKind::ArrayPattern
            | SyntaxKind::ObjectPattern => {
                if let Some(data) = self.get_literal_expr(node) {
                    add_list(&mut children, &data.elements);
                }
            }
            SyntaxKind::Property => {
                if let Some(data) = self.get_property_assignment(node) {
                    add_opt(&mut children, data.name);
                    if data.initializer != data.name {
                        add_opt(&mut children, data.initializer);
                    }
                }
            }
            SyntaxKind::UnaryExpression
            | SyntaxKind::UpdateExpression
            | SyntaxKind::AwaitExpression
            | SyntaxKind::YieldExpression
            | SyntaxKind::SpreadElement
            | SyntaxKind::RestElement => {
                if let Some(data) = self.get_unary_expr(node) {
                    add_opt(&mut children, data.operand);
                }
            }
            SyntaxKind::BinaryExpression
            | SyntaxKind::LogicalExpression
            | SyntaxKind::AssignmentExpression
            | SyntaxKind::AssignmentPattern => {
                if let Some(data) = self.get_binary_expr(node) {
                    add_opt(&mut children, data.left);
                    add_opt(&mut children, data.right);
                }
            }
            SyntaxKind::ConditionalExpression => {
                if let Some(data) = self.get_conditional_expr(node) {
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.when_true);
                    add_opt(&mut children, data.when_false);
                }
            }
            SyntaxKind::CallExpression | SyntaxKind::NewExpression => {
                if let Some(data) = self.get_call_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.arguments);
                }
            }
            SyntaxKind::MemberExpression => {
                if let Some(data) = self.get_access_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.name_or_argument);
                }
            }
            SyntaxKind::TaggedTemplateExpression => {
                if let Some(data) = self.get_tagged_template(node) {
                    add_opt(&mut children, data.tag);
                    add_opt(&mut children, data.template);
                }
            }
            SyntaxKind::Unknown => {
                if let Some(data) = self.get_unknown(node) {
                    add_list(&mut children, &data.children);
                }
            }

            // Leaves
            SyntaxKind::Identifier
            | SyntaxKind::Literal
            | SyntaxKind::TemplateElement
            | SyntaxKind::ThisExpression
            | SyntaxKind::Super
            | SyntaxKind::EmptyStatement
            | SyntaxKind::DebuggerStatement => {}
        }

        children
    }
}

/// Iterator over a node's ancestors, nearest first.
///
/// Bounded by the arena size so that a corrupted parent chain cannot loop.
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: NodeIndex,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.current.is_none() || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.current;
        self.current = self.arena.parent(current);
        Some(current)
    }
}
