//! Intermediate representation for one annotated tagged-template occurrence.
//!
//! [`LiteralOccurrence`] is the handoff point between the swc front end and
//! the classifier: literal segments interleaved with the source text of the
//! embedded expressions, plus the byte range to splice over. The classifier
//! itself never touches the AST, so it could be fed from any parser that
//! produces this shape.

use std::ops::Range;

use crate::issues::SourceLocation;

/// Original source text of one embedded `${...}` expression.
///
/// Kept verbatim (unevaluated): the replacement re-emits it so the
/// caller's runtime binds it when the expression is actually reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionSource {
    pub text: String,
}

impl ExpressionSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One tagged template literal occurrence, as found in a source file.
///
/// Invariant: `segments.len() == expressions.len() + 1`. Segments and
/// expressions interleave, starting and ending with a (possibly empty)
/// segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOccurrence {
    /// Raw literal segments, annotations included.
    pub segments: Vec<String>,
    /// Source text of each embedded expression, in order.
    pub expressions: Vec<ExpressionSource>,
    /// Byte range of the whole tagged template in the file.
    pub byte_range: Range<usize>,
    /// Line and column of the opening tag (1-indexed), for diagnostics.
    pub line: usize,
    pub col: usize,
    /// The source line text, carried for report output.
    pub source_line: Option<String>,
}

impl LiteralOccurrence {
    pub fn new(
        segments: Vec<String>,
        expressions: Vec<ExpressionSource>,
        byte_range: Range<usize>,
        line: usize,
    ) -> Self {
        debug_assert_eq!(segments.len(), expressions.len() + 1);
        Self {
            segments,
            expressions,
            byte_range,
            line,
            col: 1,
            source_line: None,
        }
    }

    /// Diagnostic location of this occurrence within `file_path`.
    pub fn location(&self, file_path: &str) -> SourceLocation {
        let location = SourceLocation::new(file_path, self.line, self.col);
        match &self.source_line {
            Some(line) => location.with_source_line(line.clone()),
            None => location,
        }
    }
}

/// What the classifier extracted from one occurrence.
///
/// Produced once per occurrence and consumed once to emit exactly one
/// replacement; not retained after the pass completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteUnit {
    /// Stable message id from the `:@@id:` annotation; empty when absent.
    pub message_id: String,
    /// Full raw template with expression positions replaced by their
    /// placeholder names.
    pub raw_template: String,
    /// `(placeholder name, source expression)` pairs in source order.
    pub placeholders: Vec<(String, String)>,
    /// True when the template carries a plural/select/selectordinal trigger.
    pub is_icu: bool,
}

/// A single splice: replace `byte_range` of the original file with `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub byte_range: Range<usize>,
    pub code: String,
}
