//! `promise-must-complete`: a `new Promise` executor must call `resolve` or
//! `reject` on every code path.

use dlint_syntax::{HandlerRegistry, NodeArena, NodeIndex, SyntaxKind, TraversalContext};

use crate::completion::{CompletionAnalyzer, CompletionIdentifierSet};
use crate::context::RuleContext;
use crate::rule::{Rule, RuleCategory, RuleMeta};

pub const MESSAGE: &str =
    "A Promise was found that appears to not have resolve or reject invoked on all code paths";

static META: RuleMeta = RuleMeta {
    name: "promise-must-complete",
    description: "When a Promise is created with `new Promise`, the function provided must call `reject()` or `resolve()` in all branches.",
    category: RuleCategory::PossibleErrors,
    recommended: true,
};

pub struct PromiseMustComplete;

impl Rule for PromiseMustComplete {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create<'r, 'c>(&'r self, registry: &mut HandlerRegistry<'r, RuleContext<'c>>) {
        registry.on(SyntaxKind::NewExpression, check_new_expression);
    }
}

fn check_new_expression(cx: &mut RuleContext<'_>, ctx: &mut TraversalContext<'_>) {
    let arena = ctx.arena();
    let Some(executor) = promise_executor(arena, ctx.node()) else {
        return;
    };
    let Some(func) = arena.function_at(executor) else {
        return;
    };

    let identifiers = completion_identifiers(arena, executor);
    if !CompletionAnalyzer::new(arena).block_completes(func.body, &identifiers) {
        cx.report(executor, MESSAGE);
    }
}

/// The executor callback of `new Promise(fn)`, if `node` has that shape.
pub fn promise_executor(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    if !arena.is_kind(node, SyntaxKind::NewExpression) {
        return None;
    }
    let call = arena.call_expr_at(node)?;
    if !arena.is_identifier_named(call.expression, "Promise") {
        return None;
    }
    let first = call.arguments.first()?;
    match arena.kind(first)? {
        SyntaxKind::FunctionExpression | SyntaxKind::ArrowFunctionExpression => Some(first),
        _ => None,
    }
}

/// The executor's first two parameters, where they are plain identifiers.
pub fn completion_identifiers(arena: &NodeArena, executor: NodeIndex) -> CompletionIdentifierSet {
    let Some(func) = arena.function_at(executor) else {
        return CompletionIdentifierSet::new();
    };
    func.parameters
        .iter()
        .take(2)
        .filter_map(|param| arena.get_identifier_text(param))
        .collect()
}
