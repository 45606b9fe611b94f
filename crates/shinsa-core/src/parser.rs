//! Python source parsing
//!
//! Wraps the RustPython parser: turns source text into a [`ParsedModule`]
//! holding the AST suite when parsing succeeded, a structured [`ParseError`]
//! when it did not, and a [`LineIndex`] for mapping byte offsets to
//! line/column positions.

use rustpython_parser::text_size::TextRange;
use rustpython_parser::{Parse, ast};

use crate::diagnostic::SourceLocation;

/// A parse failure with its position already resolved to line/column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    /// 1-based line of the offending token.
    pub line: usize,
    /// 0-based byte column within that line.
    pub column: usize,
    /// Absolute byte offset into the source.
    pub offset: usize,
    /// The parser's own description of what went wrong.
    pub message: String,
}

/// Metadata about a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub filename: String,
    pub line_count: usize,
    pub has_errors: bool,
}

/// Maps byte offsets to 1-based lines and 0-based byte columns.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn from_source(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Resolve a byte offset to a location. Offsets past the end of the
    /// source clamp to the final line.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        SourceLocation::new(line, offset - self.line_starts[line - 1])
    }

    fn line_start(&self, line_number: usize) -> Option<usize> {
        self.line_starts.get(line_number.checked_sub(1)?).copied()
    }
}

/// A Python module parsed from a single source string.
///
/// Exactly one of [`suite`](Self::suite) and [`error`](Self::error) is
/// populated: the parser either produced a full AST or stopped at the first
/// syntax error.
pub struct ParsedModule {
    source: String,
    metadata: FileMetadata,
    suite: Option<ast::Suite>,
    error: Option<ParseError>,
    line_index: LineIndex,
}

impl std::fmt::Debug for ParsedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedModule")
            .field("metadata", &self.metadata)
            .field("has_suite", &self.suite.is_some())
            .field("error", &self.error)
            .finish()
    }
}

impl ParsedModule {
    pub fn from_source(filename: &str, source: &str) -> Self {
        let line_index = LineIndex::from_source(source);
        let (suite, error) = match ast::Suite::parse(source, filename) {
            Ok(suite) => (Some(suite), None),
            Err(err) => {
                let offset = err.offset.to_usize();
                let location = line_index.location(offset);
                let parse_error = ParseError {
                    line: location.line,
                    column: location.column,
                    offset,
                    message: err.error.to_string(),
                };
                (None, Some(parse_error))
            }
        };

        let line_count = if source.is_empty() {
            0
        } else {
            source.lines().count()
        };
        let metadata = FileMetadata {
            filename: filename.to_string(),
            line_count,
            has_errors: error.is_some(),
        };

        Self {
            source: source.to_string(),
            metadata,
            suite,
            error,
            line_index,
        }
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// The module's top-level statements, or `None` if parsing failed.
    pub fn suite(&self) -> Option<&[ast::Stmt]> {
        self.suite.as_deref()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Location of an AST node's starting offset.
    pub fn locate(&self, range: TextRange) -> SourceLocation {
        self.line_index.location(range.start().to_usize())
    }

    /// Content of the given 1-based line, without its line terminator.
    pub fn get_line(&self, line_number: usize) -> Option<&str> {
        if line_number == 0 || line_number > self.metadata.line_count {
            return None;
        }
        let start = self.line_index.line_start(line_number)?;
        let end = self
            .line_index
            .line_start(line_number + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}
