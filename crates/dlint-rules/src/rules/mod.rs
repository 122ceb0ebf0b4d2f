//! Built-in rules.

pub mod promise_must_complete;

pub use promise_must_complete::PromiseMustComplete;
