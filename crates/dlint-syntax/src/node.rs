//! Arena-backed syntax tree.
//!
//! # Architecture
//!
//! Instead of a tree of boxed enums, we use:
//! 1. `Node` - a small header containing kind, position, and a data index
//! 2. Typed storage pools - separate `Vec<T>` for each node category
//!
//! The `data_index` field points into the appropriate pool based on `kind`.
//! Children are referenced by `NodeIndex`, and every node records its parent
//! in `ExtendedNodeInfo`. Parent links are plain indices: they never own
//! anything and traversal never follows them.

use crate::syntax_kind::SyntaxKind;
use dlint_common::Position;
use serde::{Deserialize, Serialize};

// =============================================================================
// Indices
// =============================================================================

/// Index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// The absent node (missing optional child, root's parent).
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        NodeIndex::NONE
    }
}

/// An ordered list of child nodes (statements, arguments, parameters).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new(nodes: Vec<NodeIndex>) -> NodeList {
        NodeList { nodes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<NodeIndex> {
        self.nodes.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }
}

impl From<Vec<NodeIndex>> for NodeList {
    fn from(nodes: Vec<NodeIndex>) -> Self {
        NodeList { nodes }
    }
}

// =============================================================================
// Node Header
// =============================================================================

/// A node header for arena storage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Node {
    pub kind: SyntaxKind,
    /// Start offset in source
    pub pos: u32,
    /// End offset in source
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    /// Create a new node with no associated data
    #[inline]
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Node {
        Node {
            kind,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    /// Create a new node with data index
    #[inline]
    pub fn with_data(kind: SyntaxKind, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            pos,
            end,
            data_index,
        }
    }

    /// Check if this node has associated data
    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for `Identifier`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for `Literal` and `TemplateElement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralData {
    /// Cooked value rendered as text (`"a"` -> `a`, `1` -> `1`)
    pub text: String,
    pub raw_text: Option<String>,
}

/// Data for `BinaryExpression`, `LogicalExpression`, `AssignmentExpression`
/// and `AssignmentPattern`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: String,
    pub right: NodeIndex,
}

/// Data for `UnaryExpression`, `UpdateExpression`, `AwaitExpression`,
/// `YieldExpression`, `SpreadElement` and `RestElement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnaryExprData {
    /// Empty for await/yield/spread/rest
    pub operator: String,
    pub operand: NodeIndex,
    pub prefix: bool,
}

/// Data for `CallExpression` and `NewExpression`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallExprData {
    /// The callee
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub optional: bool,
}

/// Data for `MemberExpression`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub computed: bool,
    pub question_dot_token: bool,
}

/// Data for `ConditionalExpression`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Data for function declarations/expressions/arrows
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// A `BlockStatement`, or any expression for concise arrow bodies
    pub body: NodeIndex,
    pub is_async: bool,
    /// Generator function
    pub asterisk_token: bool,
}

/// Data for `Program` and `BlockStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Data for `ExpressionStatement` and `ChainExpression`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// Data for `ReturnStatement` and `ThrowStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

/// Data for `IfStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    /// `NodeIndex::NONE` when there is no `else`
    pub else_statement: NodeIndex,
}

/// Data for `ForStatement`, `WhileStatement` and `DoWhileStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

/// Data for `ForInStatement` and `ForOfStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForInOfData {
    pub await_modifier: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// Data for `VariableDeclaration`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableData {
    /// `var`, `let` or `const`
    pub declaration_kind: String,
    pub declarations: NodeList,
}

/// Data for `VariableDeclarator`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for `ArrayExpression`, `ObjectExpression`, `SequenceExpression`,
/// `TemplateLiteral`, `ArrayPattern` and `ObjectPattern`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// Data for `Property`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub computed: bool,
    pub shorthand: bool,
}

/// Data for `TryStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

/// Data for `CatchClause`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClauseData {
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

/// Data for `SwitchStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

/// Data for `SwitchCase` (`expression` is NONE for `default:`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}

/// Data for `LabeledStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

/// Data for `BreakStatement` and `ContinueStatement`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

/// Data for `TaggedTemplateExpression`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

/// Data for node types without a dedicated kind (classes, JSX, TS-only nodes)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnknownNodeData {
    /// The ESTree `type` string as it appeared in the input
    pub type_name: String,
    /// Every node-valued field, in source order
    pub children: NodeList,
}

// =============================================================================
// Extended Info
// =============================================================================

/// Per-node info that does not fit in the header.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
    /// Start line/column as reported by the producing parser, 0-indexed
    pub loc: Option<Position>,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
            loc: None,
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Arena-based storage for syntax nodes.
///
/// Nodes are created bottom-up (children before parents) and never mutated
/// after the tree is complete.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,

    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub functions: Vec<FunctionData>,
    pub blocks: Vec<BlockData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub return_data: Vec<ReturnData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub for_in_of: Vec<ForInOfData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub labeled_data: Vec<LabeledData>,
    pub jump_data: Vec<JumpData>,
    pub tagged_templates: Vec<TaggedTemplateData>,
    pub unknown_nodes: Vec<UnknownNodeData>,

    // Extended node info (parent, parser-provided location)
    pub extended_info: Vec<ExtendedNodeInfo>,
}
