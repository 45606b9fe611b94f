//! Core analysis library for shinsa, a fast Python code reviewer.
//!
//! Parses Python source with `rustpython-parser`, runs a fixed set of
//! anti-pattern rules over the AST and reports findings in a stable
//! JSON-friendly shape. The CLI and the language server are thin front
//! ends over [`analysis::AnalysisEngine`].

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod parser;
pub mod rules;
pub mod visitor;

pub use analysis::AnalysisEngine;
pub use diagnostic::{AnalysisResult, Diagnostic, DiagnosticKind, Severity, SourceLocation};
pub use parser::ParsedModule;
