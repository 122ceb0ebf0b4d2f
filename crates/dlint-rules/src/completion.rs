//! Completion analysis.
//!
//! Decides whether every path through a block invokes one of a set of
//! completion identifiers (typically a promise executor's `resolve` and
//! `reject`). A path counts as completed when it:
//!
//! - calls a completion identifier directly (`resolve()`),
//! - passes one as a bare argument (`setTimeout(resolve)`), assuming the
//!   callee will eventually invoke it,
//! - or contains a nested function whose body completes with the identifiers
//!   its own parameters do not shadow.
//!
//! `if` statements split the path. Each branch is analyzed on its own and a
//! missing `else` is an empty block, which never completes. Loops are not
//! splits: their bodies are treated as running at least once.

use dlint_syntax::{
    HandlerRegistry, NodeArena, NodeIndex, NodeList, SyntaxKind, TraversalContext, traverse,
};
use smallvec::SmallVec;
use tracing::trace;

/// Ordered set of names whose invocation completes the block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionIdentifierSet {
    names: SmallVec<[String; 2]>,
}

impl CompletionIdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, keeping the first occurrence's position.
    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The names still visible inside a function with `parameters`.
    ///
    /// Only plain identifier parameters shadow; destructuring and rest
    /// parameters are ignored.
    pub fn without_shadowed(&self, arena: &NodeArena, parameters: &NodeList) -> Self {
        let names = self
            .names
            .iter()
            .filter(|name| {
                !parameters
                    .iter()
                    .any(|param| arena.is_identifier_named(param, name))
            })
            .cloned()
            .collect();
        CompletionIdentifierSet { names }
    }

    /// Whether `index` is a bare identifier naming a member of the set.
    pub fn is_referenced_by(&self, arena: &NodeArena, index: NodeIndex) -> bool {
        arena
            .get_identifier_text(index)
            .is_some_and(|name| self.contains(name))
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionIdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CompletionIdentifierSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Outcome of analyzing one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionResult {
    /// A completion was found on the direct path.
    pub completed: bool,
    /// The block contains at least one `if`.
    pub has_branches: bool,
    /// Every branch of every `if` completed on its own.
    pub all_branches_completed: bool,
}

impl Default for CompletionResult {
    fn default() -> Self {
        CompletionResult::new()
    }
}

impl CompletionResult {
    pub const fn new() -> Self {
        CompletionResult {
            completed: false,
            has_branches: false,
            all_branches_completed: true,
        }
    }

    /// Direct completion wins; otherwise branches must exist and all complete.
    pub fn is_complete(&self) -> bool {
        if self.completed {
            true
        } else if !self.has_branches {
            false
        } else {
            self.all_branches_completed
        }
    }
}

/// Runs completion analysis over blocks of one arena.
#[derive(Clone, Copy)]
pub struct CompletionAnalyzer<'a> {
    arena: &'a NodeArena,
}

impl<'a> CompletionAnalyzer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        CompletionAnalyzer { arena }
    }

    /// Whether every path through `block` invokes one of `identifiers`.
    pub fn block_completes(&self, block: NodeIndex, identifiers: &CompletionIdentifierSet) -> bool {
        self.analyze(block, identifiers).is_complete()
    }

    /// Analyze `block`, returning the raw flags.
    ///
    /// `block` may be any statement or expression, including the expression
    /// body of an arrow function. A missing block analyzes as empty.
    pub fn analyze(&self, block: NodeIndex, identifiers: &CompletionIdentifierSet) -> CompletionResult {
        let mut scan = BlockScan {
            analyzer: *self,
            identifiers,
            result: CompletionResult::new(),
        };
        if block.is_none() || identifiers.is_empty() {
            trace!(block = block.0, "empty block or identifier set");
            return scan.result;
        }

        let mut registry: HandlerRegistry<'_, BlockScan<'_, 'a>> = HandlerRegistry::new();
        registry
            .on(SyntaxKind::IfStatement, on_if_statement)
            .on(SyntaxKind::CallExpression, on_call_expression)
            .on_kinds(
                &[
                    SyntaxKind::FunctionExpression,
                    SyntaxKind::ArrowFunctionExpression,
                ],
                on_nested_function,
            );
        traverse(self.arena, block, &mut registry, &mut scan);

        trace!(
            block = block.0,
            identifiers = ?identifiers.names,
            result = ?scan.result,
            complete = scan.result.is_complete(),
            "analyzed block"
        );
        scan.result
    }
}

/// Traversal state for one block.
struct BlockScan<'s, 'a> {
    analyzer: CompletionAnalyzer<'a>,
    identifiers: &'s CompletionIdentifierSet,
    result: CompletionResult,
}

fn on_if_statement(scan: &mut BlockScan<'_, '_>, ctx: &mut TraversalContext<'_>) {
    ctx.request_skip();
    scan.result.has_branches = true;

    let Some(data) = ctx.arena().if_statement_at(ctx.node()) else {
        scan.result.all_branches_completed = false;
        return;
    };

    let analyzer = scan.analyzer;
    if !analyzer.block_completes(data.then_statement, scan.identifiers)
        || !analyzer.block_completes(data.else_statement, scan.identifiers)
    {
        scan.result.all_branches_completed = false;
    }

    // Later siblings cannot change a block whose branches all complete
    if scan.result.all_branches_completed {
        ctx.request_abort();
    }
}

fn on_call_expression(scan: &mut BlockScan<'_, '_>, ctx: &mut TraversalContext<'_>) {
    let arena = ctx.arena();
    let Some(call) = arena.call_expr_at(ctx.node()) else {
        return;
    };

    let ids = scan.identifiers;
    if ids.is_referenced_by(arena, call.expression)
        || call.arguments.iter().any(|arg| ids.is_referenced_by(arena, arg))
    {
        trace!(call = ctx.node().0, "completion call");
        scan.result.completed = true;
        ctx.request_abort();
    }
}

fn on_nested_function(scan: &mut BlockScan<'_, '_>, ctx: &mut TraversalContext<'_>) {
    ctx.request_skip();

    let arena = ctx.arena();
    let Some(func) = arena.function_at(ctx.node()) else {
        return;
    };

    let visible = scan.identifiers.without_shadowed(arena, &func.parameters);
    if visible.is_empty() {
        return;
    }
    if scan.analyzer.block_completes(func.body, &visible) {
        scan.result.completed = true;
    }
}
