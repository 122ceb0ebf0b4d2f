//! Valid/invalid fixtures for `promise-must-complete`.

use crate::linter::Linter;
use crate::rule::{Rule, RuleSeverity};
use crate::rules::PromiseMustComplete;
use crate::rules::promise_must_complete::{MESSAGE, completion_identifiers, promise_executor};
use crate::support::AstBuilder;
use dlint_common::Diagnostic;
use dlint_syntax::{NodeIndex, SyntaxKind};

static RULE: PromiseMustComplete = PromiseMustComplete;

/// Wrap the executor built by `build` in `new Promise(...)` and lint it.
fn lint_executor(build: impl FnOnce(&mut AstBuilder) -> NodeIndex) -> Vec<Diagnostic> {
    let mut b = AstBuilder::new();
    let executor = build(&mut b);
    let stmt = b.new_promise_stmt(executor);
    let program = b.finish(vec![stmt]);
    Linter::new([(&RULE as &'static dyn Rule, RuleSeverity::Error)]).lint(&program)
}

fn assert_valid(build: impl FnOnce(&mut AstBuilder) -> NodeIndex) {
    let diagnostics = lint_executor(build);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
}

fn assert_invalid(build: impl FnOnce(&mut AstBuilder) -> NodeIndex) {
    let diagnostics = lint_executor(build);
    assert_eq!(diagnostics.len(), 1, "expected one diagnostic");
    assert_eq!(diagnostics[0].message, MESSAGE);
    assert_eq!(diagnostics[0].rule, "promise-must-complete");
}

/// `{ name(args...); }` for a sequence of plain calls.
fn calls_block(b: &mut AstBuilder, names: &[&str]) -> NodeIndex {
    let stmts = names.iter().map(|name| b.call_stmt(name, vec![])).collect();
    b.block(stmts)
}

/// `if (test) { then... } else { alt... }`
fn if_calls(b: &mut AstBuilder, test: &str, then: &[&str], alt: Option<&[&str]>) -> NodeIndex {
    let then = calls_block(b, then);
    let alt = alt.map(|names| calls_block(b, names));
    b.if_stmt(test, then, alt)
}

/// `someCall(<function or arrow>(params) { name(); })`
fn some_call_with_callback(b: &mut AstBuilder, arrow: bool, params: &[&str], name: &str) -> NodeIndex {
    let body = calls_block(b, &[name]);
    let callback = if arrow {
        b.arrow(params, body)
    } else {
        b.function(params, body)
    };
    b.call_stmt("someCall", vec![callback])
}

// =============================================================================
// Valid
// =============================================================================

#[test]
fn test_valid_nested_if_else_in_else() {
    assert_valid(|b| {
        let inner = if_calls(b, "somethingElse", &["resolve"], Some(&["reject"]));
        let alt = b.block(vec![inner]);
        let then = calls_block(b, &["resolve"]);
        let outer = b.if_stmt("something", then, Some(alt));
        let body = b.block(vec![outer]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_valid_direct_resolve_and_reject() {
    for (arrow, name) in [(true, "resolve"), (false, "resolve"), (true, "reject"), (false, "reject")] {
        assert_valid(|b| {
            let body = calls_block(b, &[name]);
            if arrow {
                b.arrow(&["resolve", "reject"], body)
            } else {
                b.function(&["resolve", "reject"], body)
            }
        });
    }
}

#[test]
fn test_valid_renamed_parameters() {
    assert_valid(|b| {
        let body = calls_block(b, &["someOtherName"]);
        b.arrow(&["someOtherName", "reject"], body)
    });
    assert_valid(|b| {
        let body = calls_block(b, &["someOtherName"]);
        b.arrow(&["resolve", "someOtherName"], body)
    });
}

#[test]
fn test_valid_both_branches_resolve() {
    assert_valid(|b| {
        let if_stmt = if_calls(b, "something", &["resolve"], Some(&["resolve"]));
        let body = b.block(vec![if_stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_valid_nested_ifs_in_both_branches() {
    assert_valid(|b| {
        let inner_then = if_calls(b, "somethingElse", &["resolve"], Some(&["reject"]));
        let then = b.block(vec![inner_then]);
        let inner_alt = if_calls(b, "somethingElse", &["resolve"], Some(&["reject"]));
        let alt = b.block(vec![inner_alt]);
        let outer = b.if_stmt("something", then, Some(alt));
        let body = b.block(vec![outer]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_valid_direct_call_after_failing_inner_branch() {
    assert_valid(|b| {
        let inner_then = if_calls(b, "somethingElse", &["resolve"], Some(&["reject"]));
        let then = b.block(vec![inner_then]);
        // the trailing reject() covers the inner branch that only calls somethingElse()
        let inner_alt = if_calls(b, "somethingElse", &["somethingElse"], Some(&["reject"]));
        let trailing = b.call_stmt("reject", vec![]);
        let alt = b.block(vec![inner_alt, trailing]);
        let outer = b.if_stmt("something", then, Some(alt));
        let body = b.block(vec![outer]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_valid_completion_inside_callback() {
    assert_valid(|b| {
        let stmt = some_call_with_callback(b, false, &[], "resolve");
        let body = b.block(vec![stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
    assert_valid(|b| {
        let stmt = some_call_with_callback(b, true, &[], "resolve");
        let body = b.block(vec![stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
    assert_valid(|b| {
        let stmt = some_call_with_callback(b, true, &["someParm"], "resolve");
        let body = b.block(vec![stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_valid_loops() {
    assert_valid(|b| {
        let loop_body = calls_block(b, &["resolve"]);
        let for_stmt = b.for_stmt(loop_body);
        let body = b.block(vec![for_stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
    assert_valid(|b| {
        let loop_body = calls_block(b, &["resolve"]);
        let for_in = b.for_in("x", "something", loop_body);
        let body = b.block(vec![for_in]);
        b.arrow(&["resolve", "reject"], body)
    });
    assert_valid(|b| {
        let loop_body = calls_block(b, &["resolve"]);
        let while_stmt = b.while_stmt("something", loop_body);
        let body = b.block(vec![while_stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_valid_reference_escapes() {
    for name in ["resolve", "reject"] {
        assert_valid(|b| {
            let arg = b.ident(name);
            let stmt = b.call_stmt("doSomething", vec![arg]);
            let body = b.block(vec![stmt]);
            b.arrow(&["resolve", "reject"], body)
        });
    }
}

#[test]
fn test_valid_unshadowed_identifier_in_callback() {
    let cases: [(bool, &[&str], &str); 4] = [
        (false, &["arg1", "reject"], "resolve"),
        (false, &["resolve", "arg2"], "reject"),
        (true, &["arg1", "reject"], "resolve"),
        (true, &["resolve", "arg2"], "reject"),
    ];
    for (arrow, params, name) in cases {
        assert_valid(|b| {
            let stmt = some_call_with_callback(b, arrow, params, name);
            let body = b.block(vec![stmt]);
            b.arrow(&["resolve", "reject"], body)
        });
    }
}

#[test]
fn test_valid_function_declaration_with_same_parameter_name() {
    // function helper(resolve) { resolve() }
    assert_valid(|b| {
        let inner = calls_block(b, &["resolve"]);
        let decl = b.function_declaration("helper", &["resolve"], inner);
        let body = b.block(vec![decl]);
        b.arrow(&["resolve", "reject"], body)
    });
}

// =============================================================================
// Invalid
// =============================================================================

#[test]
fn test_invalid_empty_executors() {
    assert_invalid(|b| {
        let body = b.block(vec![]);
        b.arrow(&[], body)
    });
    assert_invalid(|b| {
        let body = b.block(vec![]);
        b.function(&[], body)
    });
    assert_invalid(|b| {
        let body = b.block(vec![]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_invalid_branch_without_completion() {
    assert_invalid(|b| {
        let if_stmt = if_calls(b, "something", &["someOtherFunction"], None);
        let body = b.block(vec![if_stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_invalid_if_without_else() {
    // A missing else leaves one path that never settles the promise
    assert_invalid(|b| {
        let if_stmt = if_calls(b, "something", &["resolve"], None);
        let body = b.block(vec![if_stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_invalid_else_without_completion() {
    assert_invalid(|b| {
        let if_stmt = if_calls(b, "something", &["resolve"], Some(&["someOtherFunction"]));
        let body = b.block(vec![if_stmt]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_invalid_nested_branch_without_completion() {
    assert_invalid(|b| {
        let inner_then = if_calls(b, "somethingElse", &["resolve"], Some(&["reject"]));
        let then = b.block(vec![inner_then]);
        let inner_alt = if_calls(b, "somethingElse", &["somethingElse"], Some(&["reject"]));
        let alt = b.block(vec![inner_alt]);
        let outer = b.if_stmt("something", then, Some(alt));
        let body = b.block(vec![outer]);
        b.arrow(&["resolve", "reject"], body)
    });
}

#[test]
fn test_invalid_shadowed_in_callback() {
    let cases: [(bool, &[&str], &str); 4] = [
        (false, &["resolve"], "resolve"),
        (false, &["reject"], "reject"),
        (true, &["arg1", "resolve"], "resolve"),
        (true, &["reject"], "reject"),
    ];
    for (arrow, params, name) in cases {
        assert_invalid(|b| {
            let stmt = some_call_with_callback(b, arrow, params, name);
            let body = b.block(vec![stmt]);
            b.arrow(&["resolve", "reject"], body)
        });
    }
}

// =============================================================================
// Pattern matching
// =============================================================================

#[test]
fn test_ignores_non_promise_constructions() {
    let mut b = AstBuilder::new();
    let body = b.block(vec![]);
    let executor = b.arrow(&["resolve", "reject"], body);
    let callee = b.ident("Deferred");
    let other = b.call_expr(SyntaxKind::NewExpression, callee, vec![executor]);
    assert_eq!(promise_executor(&b.arena, other), None);

    // Promise(fn) without `new`
    let body = b.block(vec![]);
    let executor = b.arrow(&[], body);
    let call = b.call("Promise", vec![executor]);
    assert_eq!(promise_executor(&b.arena, call), None);

    // new Promise(executorReference)
    let reference = b.ident("executor");
    let callee = b.ident("Promise");
    let by_reference = b.call_expr(SyntaxKind::NewExpression, callee, vec![reference]);
    assert_eq!(promise_executor(&b.arena, by_reference), None);

    // new Promise()
    let callee = b.ident("Promise");
    let no_args = b.call_expr(SyntaxKind::NewExpression, callee, vec![]);
    assert_eq!(promise_executor(&b.arena, no_args), None);
}

#[test]
fn test_completion_identifiers_take_first_two_plain_parameters() {
    let mut b = AstBuilder::new();
    let pattern = b.object_pattern(&["x"]);
    let second = b.ident("fail");
    let third = b.ident("extra");
    let body = b.block(vec![]);
    let executor = b.arrow_with(vec![pattern, second, third], body);

    let ids = completion_identifiers(&b.arena, executor);
    assert_eq!(ids.iter().collect::<Vec<_>>(), vec!["fail"]);
}

#[test]
fn test_rule_metadata() {
    let meta = RULE.meta();
    assert_eq!(meta.name, "promise-must-complete");
    assert_eq!(meta.category.as_str(), "Possible Errors");
    assert!(meta.recommended);
}
