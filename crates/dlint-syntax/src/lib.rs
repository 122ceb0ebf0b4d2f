//! Syntax tree and traversal for dlint.
//!
//! This crate provides:
//! - `NodeArena` - arena storage for ESTree syntax nodes with parent links
//! - ESTree JSON loading (`Program::from_json_str`)
//! - The traversal engine (`traverse`, `HandlerRegistry`)

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

// Arena node headers, typed data pools and their builders/accessors
pub mod node;
mod node_access;
mod node_arena;
pub use node::{Node, NodeArena, NodeIndex, NodeList};
pub use node_access::Ancestors;

// ESTree JSON lowering
pub mod estree;
pub use estree::{EstreeLoader, LoadError};

pub mod program;
pub use program::Program;

// Enter/exit dispatch with skip/abort control
pub mod traverse;
pub use traverse::{
    Handler, HandlerRegistry, Phase, Selector, SelectorError, TraversalContext, TraversalOutcome,
    TraversalSignal, traverse,
};

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod node_tests;
#[cfg(test)]
#[path = "../tests/estree_tests.rs"]
mod estree_tests;
#[cfg(test)]
#[path = "../tests/traverse_tests.rs"]
mod traverse_tests;
