//! Literal classification and replacement generation.
//!
//! Two steps per occurrence, both pure:
//!
//! 1. [`classify`] strips the `:@@id:` and `:placeholder:` annotations,
//!    reassembles the raw template with expression positions replaced by
//!    placeholder names, and pre-filters for ICU content.
//! 2. [`replacement_code`] turns the unit into JavaScript: a deferred
//!    `$localize._icu(...)` call for ICU templates, or the statically
//!    substituted text (translated where the catalog has the id) with the
//!    original expressions re-spliced positionally.
//!
//! The ICU pre-filter looks for `plural`, `select`, or `selectordinal`
//! preceded by `:` or `,`. It is deliberately coarser than the real
//! pattern parser that runs at evaluation time.

use std::sync::LazyLock;

use regex::Regex;

use super::occurrence::{LiteralOccurrence, RewriteUnit};
use crate::config::MissingTranslationPolicy;
use crate::core::TranslationCatalog;
use crate::issues::{AnonymousMessageIssue, Issue, MissingTranslationIssue, Severity};

static ICU_TRIGGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[:,]\s*(?:plural|select|selectordinal)").unwrap());

static MESSAGE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:@@([^:]+):").unwrap());

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([^:,}]+):").unwrap());

/// Everything the rewriter needs besides the occurrence itself.
///
/// The catalog reference is a read-only snapshot loaded before the pass
/// begins; the pass holds no other cross-file state.
pub struct RewriteContext<'a> {
    pub catalog: &'a TranslationCatalog,
    pub build_locale: &'a str,
    pub localize_name: &'a str,
    pub missing_translation: MissingTranslationPolicy,
}

/// Extract a [`RewriteUnit`] from one occurrence.
pub fn classify(occurrence: &LiteralOccurrence) -> RewriteUnit {
    let is_icu = occurrence
        .segments
        .iter()
        .any(|segment| ICU_TRIGGER_REGEX.is_match(segment));

    let mut message_id = String::new();
    let mut raw_template = String::new();
    let mut placeholders = Vec::new();

    for (index, segment) in occurrence.segments.iter().enumerate() {
        let mut text = segment.as_str();
        if index == 0 {
            if let Some(captures) = MESSAGE_ID_REGEX.captures(text) {
                message_id = captures[1].to_string();
                text = &text[captures[0].len()..];
            }
        } else if let Some(captures) = PLACEHOLDER_REGEX.captures(text) {
            text = &text[captures[0].len()..];
        }
        raw_template.push_str(text);

        if index < occurrence.expressions.len() {
            // The placeholder name for this expression is annotated on the
            // *following* segment, or synthesized from the position.
            let next = &occurrence.segments[index + 1];
            let name = PLACEHOLDER_REGEX
                .captures(next)
                .map(|captures| captures[1].trim().to_string())
                .unwrap_or_else(|| format!("expr_{}", index));
            raw_template.push_str(&name);
            placeholders.push((name, occurrence.expressions[index].text.clone()));
        }
    }

    RewriteUnit {
        message_id,
        raw_template,
        placeholders,
        is_icu,
    }
}

/// Generate the JavaScript replacing one occurrence.
///
/// Diagnostics for catalog misses and anonymous literals are appended to
/// `issues`; neither stops the rewrite.
pub fn replacement_code(
    unit: &RewriteUnit,
    occurrence: &LiteralOccurrence,
    file_path: &str,
    ctx: &RewriteContext<'_>,
    issues: &mut Vec<Issue>,
) -> String {
    if unit.message_id.is_empty() {
        issues.push(Issue::from(AnonymousMessageIssue {
            location: occurrence.location(file_path),
            preview: preview(&unit.raw_template),
        }));
    }

    if unit.is_icu {
        return deferred_call(unit, ctx);
    }
    static_substitution(unit, occurrence, file_path, ctx, issues)
}

/// `$localize._icu("<id>", "<template>", "<locale>", {"name": expr, ...})`
///
/// Expressions are emitted in source order inside the values object, so
/// their evaluation order at runtime is exactly the order they were
/// written in the literal.
fn deferred_call(unit: &RewriteUnit, ctx: &RewriteContext<'_>) -> String {
    let values = unit
        .placeholders
        .iter()
        .map(|(name, expr)| format!("{}: {}", js_string(name), expr))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}._icu({}, {}, {}, {{{}}})",
        ctx.localize_name,
        js_string(&unit.message_id),
        js_string(&unit.raw_template),
        js_string(ctx.build_locale),
        values
    )
}

/// Inline the translated (or default) text, re-splicing expressions at
/// their placeholder positions. No renderer involvement on this path.
fn static_substitution(
    unit: &RewriteUnit,
    occurrence: &LiteralOccurrence,
    file_path: &str,
    ctx: &RewriteContext<'_>,
    issues: &mut Vec<Issue>,
) -> String {
    let translated = ctx.catalog.get(ctx.build_locale, &unit.message_id);

    if translated.is_none()
        && !unit.message_id.is_empty()
        && ctx.missing_translation != MissingTranslationPolicy::Ignore
    {
        let severity = match ctx.missing_translation {
            MissingTranslationPolicy::Error => Severity::Error,
            _ => Severity::Warning,
        };
        issues.push(Issue::from(MissingTranslationIssue {
            location: occurrence.location(file_path),
            message_id: unit.message_id.clone(),
            locale: ctx.build_locale.to_string(),
            severity,
        }));
    }

    let text = translated.unwrap_or_else(|| unit.raw_template.clone());

    if unit.placeholders.is_empty() {
        return js_string(&text);
    }
    splice_template_literal(&text, &unit.placeholders)
}

/// Build a template literal from `text`, replacing each whole-word
/// placeholder occurrence with `${<original expression>}`.
fn splice_template_literal(text: &str, placeholders: &[(String, String)]) -> String {
    let alternation = placeholders
        .iter()
        .map(|(name, _)| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let matcher = match Regex::new(&format!(r"\b(?:{})\b", alternation)) {
        Ok(matcher) => matcher,
        Err(_) => return js_string(text),
    };

    let mut out = String::from("`");
    let mut last = 0;
    for found in matcher.find_iter(text) {
        out.push_str(&escape_template_text(&text[last..found.start()]));
        let name = found.as_str();
        let expr = placeholders
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, expr)| expr.as_str())
            .unwrap_or(name);
        out.push_str("${");
        out.push_str(expr);
        out.push('}');
        last = found.end();
    }
    out.push_str(&escape_template_text(&text[last..]));
    out.push('`');
    out
}

/// First line of a template, shortened for report output.
fn preview(template: &str) -> String {
    const MAX: usize = 40;
    let first_line = template.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() > MAX {
        let cut: String = first_line.chars().take(MAX).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

/// A double-quoted JavaScript string literal (JSON escaping is valid JS).
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

/// Escape literal text for inclusion in a template literal.
fn escape_template_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(ch),
        }
    }
    out
}
