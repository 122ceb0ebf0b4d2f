//! Traversal engine.
//!
//! Walks a syntax tree depth-first in source order and dispatches to handlers
//! registered per [`SyntaxKind`], once on enter and once on exit. Handlers
//! steer the walk through the [`TraversalContext`] they receive:
//!
//! - `request_skip()` on enter: the node's children are not visited, but its
//!   exit handlers still run.
//! - `request_abort()`: nothing else runs in this traversal, not even pending
//!   exit handlers of ancestors.
//!
//! Handler state is threaded explicitly as `&mut S`, so several handlers can
//! share one accumulator without interior mutability. A handler may start a
//! nested `traverse` of its own; the nested walk has its own context and its
//! abort never leaks into the outer walk.

use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::node::{NodeArena, NodeIndex};
use crate::syntax_kind::SyntaxKind;

/// What a handler asked the engine to do next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraversalSignal {
    #[default]
    Continue,
    /// Do not descend into the current node's children.
    Skip,
    /// Stop the whole traversal.
    Abort,
}

/// How a traversal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOutcome {
    Completed,
    Aborted,
}

impl TraversalOutcome {
    #[inline]
    pub fn is_aborted(self) -> bool {
        self == TraversalOutcome::Aborted
    }
}

/// Per-node view handed to handlers.
pub struct TraversalContext<'a> {
    arena: &'a NodeArena,
    node: NodeIndex,
    kind: SyntaxKind,
    depth: u32,
    signal: TraversalSignal,
}

impl<'a> TraversalContext<'a> {
    #[inline]
    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    /// The node currently being entered or exited.
    #[inline]
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Distance from the traversal root (the root is 0).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Skip the current node's children. Has no effect in exit handlers.
    pub fn request_skip(&mut self) {
        if self.signal != TraversalSignal::Abort {
            self.signal = TraversalSignal::Skip;
        }
    }

    pub fn request_abort(&mut self) {
        self.signal = TraversalSignal::Abort;
    }

    #[inline]
    pub fn signal(&self) -> TraversalSignal {
        self.signal
    }
}

/// A boxed enter/exit callback.
pub type Handler<'h, S> = Box<dyn FnMut(&mut S, &mut TraversalContext<'_>) + 'h>;

/// Enter or exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Enter,
    Exit,
}

/// A parsed handler key such as `"IfStatement"` or `"IfStatement:exit"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    pub kind: SyntaxKind,
    pub phase: Phase,
}

/// Error for a selector that names no known node kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    UnknownKind(String),
    UnknownPhase(String),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::UnknownKind(name) => write!(f, "unknown node kind `{name}` in selector"),
            SelectorError::UnknownPhase(phase) => {
                write!(f, "unknown selector phase `:{phase}` (only `:exit` is supported)")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, phase) = match s.split_once(':') {
            None => (s, Phase::Enter),
            Some((name, "exit")) => (name, Phase::Exit),
            Some((_, other)) => return Err(SelectorError::UnknownPhase(other.to_string())),
        };
        let kind = SyntaxKind::from_name(name)
            .ok_or_else(|| SelectorError::UnknownKind(name.to_string()))?;
        Ok(Selector { kind, phase })
    }
}

/// Handlers keyed by node kind, in registration order.
///
/// Built fresh for each traversal.
pub struct HandlerRegistry<'h, S> {
    enter: FxHashMap<SyntaxKind, Vec<Handler<'h, S>>>,
    exit: FxHashMap<SyntaxKind, Vec<Handler<'h, S>>>,
}

impl<S> Default for HandlerRegistry<'_, S> {
    fn default() -> Self {
        HandlerRegistry {
            enter: FxHashMap::default(),
            exit: FxHashMap::default(),
        }
    }
}

impl<'h, S> HandlerRegistry<'h, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enter handler for `kind`.
    pub fn on<F>(&mut self, kind: SyntaxKind, handler: F) -> &mut Self
    where
        F: FnMut(&mut S, &mut TraversalContext<'_>) + 'h,
    {
        self.enter.entry(kind).or_default().push(Box::new(handler));
        self
    }

    /// Register an exit handler for `kind`.
    pub fn on_exit<F>(&mut self, kind: SyntaxKind, handler: F) -> &mut Self
    where
        F: FnMut(&mut S, &mut TraversalContext<'_>) + 'h,
    {
        self.exit.entry(kind).or_default().push(Box::new(handler));
        self
    }

    /// Register the same enter handler for several kinds.
    pub fn on_kinds<F>(&mut self, kinds: &[SyntaxKind], handler: F) -> &mut Self
    where
        F: FnMut(&mut S, &mut TraversalContext<'_>) + Clone + 'h,
    {
        for &kind in kinds {
            self.on(kind, handler.clone());
        }
        self
    }

    /// Register a handler by selector string (`"Kind"` or `"Kind:exit"`).
    pub fn on_selector<F>(&mut self, selector: &str, handler: F) -> Result<&mut Self, SelectorError>
    where
        F: FnMut(&mut S, &mut TraversalContext<'_>) + 'h,
    {
        let selector: Selector = selector.parse()?;
        Ok(match selector.phase {
            Phase::Enter => self.on(selector.kind, handler),
            Phase::Exit => self.on_exit(selector.kind, handler),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }

    /// Number of registered handlers across all kinds and phases.
    pub fn len(&self) -> usize {
        self.enter.values().chain(self.exit.values()).map(Vec::len).sum()
    }
}

/// Walk the tree under `root`, dispatching to `registry`.
pub fn traverse<S>(
    arena: &NodeArena,
    root: NodeIndex,
    registry: &mut HandlerRegistry<'_, S>,
    state: &mut S,
) -> TraversalOutcome {
    let mut walker = Walker {
        arena,
        registry,
        state,
    };
    match walker.visit(root, 0) {
        ControlFlow::Continue(()) => TraversalOutcome::Completed,
        ControlFlow::Break(()) => {
            trace!(root = root.0, "traversal aborted");
            TraversalOutcome::Aborted
        }
    }
}

struct Walker<'w, 'h, 'a, S> {
    arena: &'a NodeArena,
    registry: &'w mut HandlerRegistry<'h, S>,
    state: &'w mut S,
}

impl<S> Walker<'_, '_, '_, S> {
    /// `Break` means a handler aborted.
    fn visit(&mut self, index: NodeIndex, depth: u32) -> ControlFlow<()> {
        let Some(node) = self.arena.get(index) else {
            return ControlFlow::Continue(());
        };
        let kind = node.kind;

        let signal = self.dispatch(Phase::Enter, index, kind, depth);
        match signal {
            TraversalSignal::Abort => return ControlFlow::Break(()),
            TraversalSignal::Skip => {}
            TraversalSignal::Continue => {
                for child in self.arena.get_children(index) {
                    self.visit(child, depth + 1)?;
                }
            }
        }

        if self.dispatch(Phase::Exit, index, kind, depth) == TraversalSignal::Abort {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    /// Run every handler for `(kind, phase)` and return the resulting signal.
    fn dispatch(&mut self, phase: Phase, node: NodeIndex, kind: SyntaxKind, depth: u32) -> TraversalSignal {
        let table = match phase {
            Phase::Enter => &mut self.registry.enter,
            Phase::Exit => &mut self.registry.exit,
        };
        let Some(handlers) = table.get_mut(&kind) else {
            return TraversalSignal::Continue;
        };

        let mut ctx = TraversalContext {
            arena: self.arena,
            node,
            kind,
            depth,
            signal: TraversalSignal::Continue,
        };
        for handler in handlers.iter_mut() {
            handler(&mut *self.state, &mut ctx);
            if ctx.signal == TraversalSignal::Abort {
                break;
            }
        }
        ctx.signal
    }
}
