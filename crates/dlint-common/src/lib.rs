//! Common types and utilities for the dlint rule plugin.
//!
//! This crate provides foundational types used across all dlint crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticSeverity`) and message templating
//! - Position/line-map types for turning UTF-16 offsets into line/column pairs

// Diagnostic records produced by rules
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, format_message};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
