//! Issue types produced by the translate pass.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it. Per-message rendering failures never become issues (the
//! engine degrades to fallback text), so the taxonomy here only covers
//! what the build pipeline must be told about: catalog misses during
//! static substitution, literals with no stable id, and source files
//! that could not be parsed at all.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingTranslation,
    AnonymousMessage,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::AnonymousMessage => write!(f, "anonymous-message"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

/// Where an issue was found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    /// Line number (1-indexed); 0 when the issue is file-level.
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
    /// The source line text, for caret display in reports.
    pub source_line: Option<String>,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    /// File-level location with no specific line.
    pub fn file(file_path: impl Into<String>) -> Self {
        Self::new(file_path, 0, 1)
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Static substitution found no catalog entry for a message id.
///
/// Severity is the configured missing-translation policy, decided by the
/// caller; the `ignore` policy simply never records this issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub location: SourceLocation,
    pub message_id: String,
    pub locale: String,
    pub severity: Severity,
}

impl MissingTranslationIssue {
    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

/// A tagged literal without a `:@@id:` annotation.
///
/// The pass proceeds with an empty id, but a static lookup for it can only
/// ever miss, so the author probably forgot the annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousMessageIssue {
    pub location: SourceLocation,
    /// The raw default text, for identification in the report.
    pub preview: String,
}

impl AnonymousMessageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::AnonymousMessage
    }
}

/// A source file could not be parsed; it is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParseIssue {
    pub location: SourceLocation,
    pub error: String,
}

impl SourceParseIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found during the translate pass.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingTranslation(MissingTranslationIssue),
    AnonymousMessage(AnonymousMessageIssue),
    ParseError(SourceParseIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to the CLI.
///
/// Implemented by all issue types to give the report functions one
/// interface. Uses `enum_dispatch` for zero-cost dispatch on the `Issue`
/// enum.
#[enum_dispatch]
pub trait Report {
    /// Source location of the issue.
    fn location(&self) -> &SourceLocation;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> &SourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        format!(
            "no '{}' translation for message id \"{}\"",
            self.locale, self.message_id
        )
    }

    fn report_severity(&self) -> Severity {
        self.severity
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "add \"{}\" to the '{}' translation file, or lower the missingTranslation policy",
            self.message_id, self.locale
        ))
    }
}

impl Report for AnonymousMessageIssue {
    fn location(&self) -> &SourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        format!("tagged template has no :@@id: annotation: \"{}\"", self.preview)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("prefix the literal with :@@yourMessageId: to make it translatable".to_string())
    }
}

impl Report for SourceParseIssue {
    fn location(&self) -> &SourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_and_rule_dispatch() {
        let issue = Issue::from(AnonymousMessageIssue {
            location: SourceLocation::new("src/app.ts", 3, 1),
            preview: "Hello".to_string(),
        });
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.rule(), Rule::AnonymousMessage);
        assert_eq!(issue.location().line, 3);
    }

    #[test]
    fn missing_translation_severity_follows_policy() {
        let issue = Issue::from(MissingTranslationIssue {
            location: SourceLocation::new("src/app.ts", 10, 5),
            message_id: "greeting".to_string(),
            locale: "fr".to_string(),
            severity: Severity::Error,
        });
        assert_eq!(issue.severity(), Severity::Error);
        assert!(issue.message().contains("greeting"));
    }

    #[test]
    fn rule_display_names() {
        assert_eq!(Rule::MissingTranslation.to_string(), "missing-translation");
        assert_eq!(Rule::AnonymousMessage.to_string(), "anonymous-message");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
    }
}
