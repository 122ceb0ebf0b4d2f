//! NodeArena creation methods (add_* methods).
//!
//! Every `add_*` method pushes the typed data, pushes the node header, and
//! points the parent link of each child at the new node. Because the tree is
//! built bottom-up, children always exist before their parent.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use dlint_common::Position;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    /// Uses heuristic ratios based on typical JavaScript AST composition.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();

        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 4); // ~25% identifiers
        arena.literals = Vec::with_capacity(safe_capacity / 8); // ~12% literals
        arena.call_exprs = Vec::with_capacity(safe_capacity / 8); // ~12% calls
        arena.access_exprs = Vec::with_capacity(safe_capacity / 8); // ~12% member access
        arena.blocks = Vec::with_capacity(safe_capacity / 16);
        arena.functions = Vec::with_capacity(safe_capacity / 16);

        arena
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    /// Set the parent for a single child node.
    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some() {
            if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
                info.parent = parent;
            }
        }
    }

    /// Set the parent for a list of children.
    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    /// Record the parser-provided start location of a node.
    pub fn set_loc(&mut self, index: NodeIndex, loc: Position) {
        if let Some(info) = self.get_extended_mut(index) {
            info.loc = Some(loc);
        }
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a node that carries no additional data
    /// (`EmptyStatement`, `ThisExpression`, `Super`, `DebuggerStatement`).
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, name: impl Into<String>) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            escaped_text: name.into(),
        });
        self.push_node(Node::with_data(SyntaxKind::Identifier, pos, end, data_index))
    }

    pub fn add_literal(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_binary_expr(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: BinaryExprData,
    ) -> NodeIndex {
        let (left, right) = (data.left, data.right);
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(left, index);
        self.set_parent(right, index);
        index
    }

    pub fn add_unary_expr(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: UnaryExprData,
    ) -> NodeIndex {
        let operand = data.operand;
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(operand, index);
        index
    }

    /// Add a `CallExpression` or `NewExpression`
    pub fn add_call_expr(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let callee = data.expression;
        let arguments = data.arguments.clone();
        let data_index = self.call_exprs.len() as u32;
        self.call_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(callee, index);
        self.set_parent_list(&arguments, index);
        index
    }

    pub fn add_access_expr(&mut self, pos: u32, end: u32, data: AccessExprData) -> NodeIndex {
        let (object, property) = (data.expression, data.name_or_argument);
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::MemberExpression,
            pos,
            end,
            data_index,
        ));
        self.set_parent(object, index);
        self.set_parent(property, index);
        index
    }

    pub fn add_conditional_expr(&mut self, pos: u32, end: u32, data: ConditionalExprData) -> NodeIndex {
        let children = [data.condition, data.when_true, data.when_false];
        let data_index = self.conditional_exprs.len() as u32;
        self.conditional_exprs.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::ConditionalExpression,
            pos,
            end,
            data_index,
        ));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    /// Add a function declaration, function expression or arrow function
    pub fn add_function(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        let (name, body) = (data.name, data.body);
        let parameters = data.parameters.clone();
        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(name, index);
        self.set_parent_list(&parameters, index);
        self.set_parent(body, index);
        index
    }

    /// Add a `Program` or `BlockStatement`
    pub fn add_block(&mut self, kind: SyntaxKind, pos: u32, end: u32, statements: NodeList) -> NodeIndex {
        let data_index = self.blocks.len() as u32;
        self.blocks.push(BlockData {
            statements: statements.clone(),
        });
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent_list(&statements, index);
        index
    }

    /// Add an `ExpressionStatement` or `ChainExpression`
    pub fn add_expr_statement(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        expression: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.expr_statements.len() as u32;
        self.expr_statements.push(ExprStatementData { expression });
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(expression, index);
        index
    }

    /// Add a `ReturnStatement` or `ThrowStatement`
    pub fn add_return(&mut self, kind: SyntaxKind, pos: u32, end: u32, expression: NodeIndex) -> NodeIndex {
        let data_index = self.return_data.len() as u32;
        self.return_data.push(ReturnData { expression });
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(expression, index);
        index
    }

    pub fn add_if_statement(&mut self, pos: u32, end: u32, data: IfStatementData) -> NodeIndex {
        let children = [data.expression, data.then_statement, data.else_statement];
        let data_index = self.if_statements.len() as u32;
        self.if_statements.push(data);
        let index = self.push_node(Node::with_data(SyntaxKind::IfStatement, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    /// Add a `ForStatement`, `WhileStatement` or `DoWhileStatement`
    pub fn add_loop(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: LoopData) -> NodeIndex {
        let children = [data.initializer, data.condition, data.incrementor, data.statement];
        let data_index = self.loops.len() as u32;
        self.loops.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    /// Add a `ForInStatement` or `ForOfStatement`
    pub fn add_for_in_of(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: ForInOfData) -> NodeIndex {
        let children = [data.initializer, data.expression, data.statement];
        let data_index = self.for_in_of.len() as u32;
        self.for_in_of.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_variable(&mut self, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let declarations = data.declarations.clone();
        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::VariableDeclaration,
            pos,
            end,
            data_index,
        ));
        self.set_parent_list(&declarations, index);
        index
    }

    pub fn add_variable_declaration(
        &mut self,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::VariableDeclarator,
            pos,
            end,
            data_index,
        ));
        self.set_parent(name, index);
        self.set_parent(initializer, index);
        index
    }

    /// Add an array/object literal, sequence, template literal or
    /// array/object pattern
    pub fn add_literal_expr(&mut self, kind: SyntaxKind, pos: u32, end: u32, elements: NodeList) -> NodeIndex {
        let data_index = self.literal_exprs.len() as u32;
        self.literal_exprs.push(LiteralExprData {
            elements: elements.clone(),
        });
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent_list(&elements, index);
        index
    }

    pub fn add_property_assignment(
        &mut self,
        pos: u32,
        end: u32,
        data: PropertyAssignmentData,
    ) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.property_assignments.len() as u32;
        self.property_assignments.push(data);
        let index = self.push_node(Node::with_data(SyntaxKind::Property, pos, end, data_index));
        self.set_parent(name, index);
        // Shorthand properties share one node for key and value
        if initializer != name {
            self.set_parent(initializer, index);
        }
        index
    }

    pub fn add_try(&mut self, pos: u32, end: u32, data: TryData) -> NodeIndex {
        let children = [data.try_block, data.catch_clause, data.finally_block];
        let data_index = self.try_data.len() as u32;
        self.try_data.push(data);
        let index = self.push_node(Node::with_data(SyntaxKind::TryStatement, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_catch_clause(&mut self, pos: u32, end: u32, data: CatchClauseData) -> NodeIndex {
        let (param, block) = (data.variable_declaration, data.block);
        let data_index = self.catch_clauses.len() as u32;
        self.catch_clauses.push(data);
        let index = self.push_node(Node::with_data(SyntaxKind::CatchClause, pos, end, data_index));
        self.set_parent(param, index);
        self.set_parent(block, index);
        index
    }

    pub fn add_switch(&mut self, pos: u32, end: u32, data: SwitchData) -> NodeIndex {
        let discriminant = data.expression;
        let clauses = data.clauses.clone();
        let data_index = self.switch_data.len() as u32;
        self.switch_data.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::SwitchStatement,
            pos,
            end,
            data_index,
        ));
        self.set_parent(discriminant, index);
        self.set_parent_list(&clauses, index);
        index
    }

    pub fn add_case_clause(&mut self, pos: u32, end: u32, data: CaseClauseData) -> NodeIndex {
        let test = data.expression;
        let statements = data.statements.clone();
        let data_index = self.case_clauses.len() as u32;
        self.case_clauses.push(data);
        let index = self.push_node(Node::with_data(SyntaxKind::SwitchCase, pos, end, data_index));
        self.set_parent(test, index);
        self.set_parent_list(&statements, index);
        index
    }

    pub fn add_labeled(&mut self, pos: u32, end: u32, data: LabeledData) -> NodeIndex {
        let (label, statement) = (data.label, data.statement);
        let data_index = self.labeled_data.len() as u32;
        self.labeled_data.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::LabeledStatement,
            pos,
            end,
            data_index,
        ));
        self.set_parent(label, index);
        self.set_parent(statement, index);
        index
    }

    /// Add a `BreakStatement` or `ContinueStatement`
    pub fn add_jump(&mut self, kind: SyntaxKind, pos: u32, end: u32, label: NodeIndex) -> NodeIndex {
        let data_index = self.jump_data.len() as u32;
        self.jump_data.push(JumpData { label });
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(label, index);
        index
    }

    pub fn add_tagged_template(&mut self, pos: u32, end: u32, data: TaggedTemplateData) -> NodeIndex {
        let (tag, template) = (data.tag, data.template);
        let data_index = self.tagged_templates.len() as u32;
        self.tagged_templates.push(data);
        let index = self.push_node(Node::with_data(
            SyntaxKind::TaggedTemplateExpression,
            pos,
            end,
            data_index,
        ));
        self.set_parent(tag, index);
        self.set_parent(template, index);
        index
    }

    /// Add a node of a type the arena has no typed pool for.
    pub fn add_unknown(
        &mut self,
        pos: u32,
        end: u32,
        type_name: impl Into<String>,
        children: NodeList,
    ) -> NodeIndex {
        let data_index = self.unknown_nodes.len() as u32;
        self.unknown_nodes.push(UnknownNodeData {
            type_name: type_name.into(),
            children: children.clone(),
        });
        let index = self.push_node(Node::with_data(SyntaxKind::Unknown, pos, end, data_index));
        self.set_parent_list(&children, index);
        index
    }
}
