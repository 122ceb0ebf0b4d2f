//! Node kinds of the ESTree syntax tree.
//!
//! Every variant maps one-to-one onto an ESTree `type` string. Node types the
//! arena has no typed storage for are loaded as [`SyntaxKind::Unknown`] and
//! keep their original type name in the unknown-node pool.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! syntax_kinds {
    ($($kind:ident),+ $(,)?) => {
        /// Discriminant of a syntax node.
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum SyntaxKind {
            $($kind,)+
            /// An ESTree node type without a dedicated kind.
            Unknown,
        }

        impl SyntaxKind {
            /// Every named kind, in declaration order (excludes `Unknown`).
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind,)+];

            /// The ESTree `type` string for this kind.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SyntaxKind::$kind => stringify!($kind),)+
                    SyntaxKind::Unknown => "Unknown",
                }
            }

            /// Look up a kind by its ESTree `type` string.
            pub fn from_name(name: &str) -> Option<SyntaxKind> {
                match name {
                    $(stringify!($kind) => Some(SyntaxKind::$kind),)+
                    _ => None,
                }
            }
        }
    };
}

syntax_kinds! {
    // Program and statements
    Program,
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    ReturnStatement,
    ThrowStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    BreakStatement,
    ContinueStatement,
    LabeledStatement,
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,

    // Expressions
    Identifier,
    Literal,
    ThisExpression,
    Super,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    ChainExpression,
    SequenceExpression,
    SpreadElement,
    AwaitExpression,
    YieldExpression,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,

    // Patterns
    AssignmentPattern,
    ArrayPattern,
    ObjectPattern,
    RestElement,
}

impl SyntaxKind {
    /// Function-like kinds that introduce a new parameter scope.
    #[inline]
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunctionExpression
        )
    }

    /// Loop statements.
    #[inline]
    pub fn is_loop(self) -> bool {
        matches!(
            self,
            SyntaxKind::WhileStatement
                | SyntaxKind::DoWhileStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForInStatement
                | SyntaxKind::ForOfStatement
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
