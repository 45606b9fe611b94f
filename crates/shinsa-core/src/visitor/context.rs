//! Shared context handed to visitor hooks.

use rustpython_parser::text_size::TextRange;

use crate::diagnostic::SourceLocation;
use crate::parser::ParsedModule;

/// Read-only context available to every hook during a walk.
pub struct WalkContext<'a> {
    module: &'a ParsedModule,
}

impl<'a> WalkContext<'a> {
    pub fn new(module: &'a ParsedModule) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &ParsedModule {
        self.module
    }

    /// Location of a node range's starting offset.
    pub fn locate(&self, range: TextRange) -> SourceLocation {
        self.module.locate(range)
    }

    /// The source text a node range covers.
    pub fn source_text(&self, range: TextRange) -> Option<&'a str> {
        self.module
            .source()
            .get(range.start().to_usize()..range.end().to_usize())
    }
}
