//! The compile-time pass over annotated tagged-template literals.
//!
//! For each source file: parse, collect `$localize`-tagged templates,
//! classify every occurrence as statically translatable or ICU-dynamic,
//! and splice the replacement code back into the text. The pass is
//! single-threaded per file and holds no cross-file state beyond the
//! read-only catalog snapshot, so files can be processed in parallel.
//!
//! - `occurrence`: AST-independent intermediate representation
//! - `classify`: the pure classifier and replacement generator
//! - `source`: swc parsing and template collection
//! - `splice`: byte-range splicing
//! - `scanner`: source-tree scanning for the CLI driver

pub mod classify;
pub mod occurrence;
pub mod scanner;
pub mod source;
pub mod splice;

use std::sync::Arc;

use swc_common::SourceMap;

pub use classify::{RewriteContext, classify, replacement_code};
pub use occurrence::{ExpressionSource, LiteralOccurrence, Replacement, RewriteUnit};
pub use scanner::{ScanResult, scan_files};
pub use source::{ParsedSource, collect_occurrences, parse_source};
pub use splice::apply_replacements;

use crate::issues::{Issue, SourceLocation, SourceParseIssue};

/// Result of transforming one file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    /// Rewritten source, or `None` when the file had nothing to rewrite
    /// (or could not be parsed; see `issues`).
    pub code: Option<String>,
    pub issues: Vec<Issue>,
}

/// Run the whole pass over one file's source text.
///
/// A file whose text does not even contain the localize identifier is
/// passed through without parsing. A file that fails to parse is reported
/// and passed through unmodified: the pass never destroys output.
pub fn transform_source(source: &str, file_path: &str, ctx: &RewriteContext<'_>) -> FileOutcome {
    if !source.contains(ctx.localize_name) {
        return FileOutcome::default();
    }

    let source_map: Arc<SourceMap> = Default::default();
    let parsed = match parse_source(source.to_string(), file_path, source_map) {
        Ok(parsed) => parsed,
        Err(error) => {
            return FileOutcome {
                code: None,
                issues: vec![Issue::from(SourceParseIssue {
                    location: SourceLocation::file(file_path),
                    error: error.to_string(),
                })],
            };
        }
    };

    let occurrences = collect_occurrences(&parsed, source, ctx.localize_name);
    if occurrences.is_empty() {
        return FileOutcome::default();
    }

    let mut issues = Vec::new();
    let mut replacements = Vec::with_capacity(occurrences.len());
    for occurrence in &occurrences {
        let unit = classify(occurrence);
        let code = replacement_code(&unit, occurrence, file_path, ctx, &mut issues);
        replacements.push(Replacement {
            byte_range: occurrence.byte_range.clone(),
            code,
        });
    }

    FileOutcome {
        code: Some(apply_replacements(source, &replacements)),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::MissingTranslationPolicy;
    use crate::core::{TranslationCatalog, TranslationEntry};

    fn ctx(catalog: &TranslationCatalog) -> RewriteContext<'_> {
        RewriteContext {
            catalog,
            build_locale: "en",
            localize_name: "$localize",
            missing_translation: MissingTranslationPolicy::Warning,
        }
    }

    #[test]
    fn file_without_localize_is_untouched() {
        let catalog = TranslationCatalog::new();
        let outcome = transform_source("const x = 1;", "src/x.ts", &ctx(&catalog));
        assert!(outcome.code.is_none());
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn static_literal_is_inlined() {
        let catalog = TranslationCatalog::new();
        let mut entry = TranslationEntry::new("en");
        entry.insert("title", "Welcome back");
        catalog.load(entry);

        let source = r#"const title = $localize`:@@title:Welcome`;"#;
        let outcome = transform_source(source, "src/app.ts", &ctx(&catalog));

        assert_eq!(
            outcome.code.as_deref(),
            Some(r#"const title = "Welcome back";"#)
        );
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn icu_literal_becomes_deferred_call() {
        let catalog = TranslationCatalog::new();
        let source =
            r#"const msg = $localize`:@@cart:{${n}:n:, plural, =0 {empty} other {# items}}`;"#;
        let outcome = transform_source(source, "src/cart.ts", &ctx(&catalog));

        assert_eq!(
            outcome.code.as_deref(),
            Some(
                r#"const msg = $localize._icu("cart", "{n, plural, =0 {empty} other {# items}}", "en", {"n": n});"#
            )
        );
    }

    #[test]
    fn mixed_file_rewrites_every_occurrence() {
        let catalog = TranslationCatalog::new();
        let mut entry = TranslationEntry::new("en");
        entry.insert("a", "Alpha");
        catalog.load(entry);

        let source = "const a = $localize`:@@a:A`;\nconst b = $localize`:@@b:{${n}:n:, plural, other {#}}`;";
        let outcome = transform_source(source, "src/m.ts", &ctx(&catalog));
        let code = outcome.code.unwrap();

        assert!(code.contains(r#"const a = "Alpha";"#));
        assert!(code.contains(r#"$localize._icu("b""#));
    }

    #[test]
    fn parse_failure_reports_and_leaves_file_alone() {
        let catalog = TranslationCatalog::new();
        // Mentions $localize so the pre-filter does not skip it.
        let source = "const $localize = ;;; oops((";
        let outcome = transform_source(source, "src/broken.ts", &ctx(&catalog));

        assert!(outcome.code.is_none());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].rule(), crate::issues::Rule::ParseError);
    }
}
