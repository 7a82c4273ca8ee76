//! ICU message rendering.
//!
//! Takes a parsed [`MessagePattern`], a map of runtime values, and a locale,
//! and produces the final text. Rendering never fails: missing values
//! default to `0`, missing cases degrade to the `other` branch and then to
//! the empty string, and unknown placeholder names are left untouched.
//!
//! [`evaluate`] is the entry point generated deferred calls resolve to at
//! runtime: catalog lookup, fallback to the embedded default template,
//! parse, render.

use regex::Regex;
use serde_json::Value;

use super::catalog::TranslationCatalog;
use super::pattern::{self, MessagePattern, PatternKind};
use super::plurals;

/// Runtime values bound to placeholder names for one render call.
///
/// `serde_json::Map` so generated call sites can hand over their values
/// object as-is; insertion order is preserved but not relied upon.
pub type ValueMap = serde_json::Map<String, Value>;

/// Render a parsed ICU expression with the given value bindings.
pub fn render(node: &MessagePattern, bindings: &ValueMap, locale: &str) -> String {
    let driving = bindings.get(&node.variable);

    if node.kind == PatternKind::Select {
        let key = driving.map(value_to_string).unwrap_or_default();
        let text = node
            .named_case(&key)
            .or_else(|| node.other_case())
            .unwrap_or("");
        return substitute(text, None, bindings);
    }

    // Plural / ordinal: absent or non-numeric driving values count as 0.
    let value = driving.and_then(numeric_value).unwrap_or(0.0);
    let ordinal = node.kind == PatternKind::Ordinal;

    // Exact matches win over categories and ignore the offset entirely:
    // `=2` already names the literal number, so `#` substitutes the raw
    // value there.
    if value.fract() == 0.0
        && let Some(text) = node.exact_case(value as i64)
    {
        return substitute(text, Some(value), bindings);
    }

    let adjusted = value - f64::from(node.offset.unwrap_or(0));
    let category = plurals::category(value, locale, ordinal);
    let text = node
        .named_case(category.as_str())
        .or_else(|| node.other_case())
        .unwrap_or("");
    substitute(text, Some(adjusted), bindings)
}

/// Runtime entry point for deferred ICU calls.
///
/// Looks up `message_id` in the catalog for `locale`, falling back to the
/// template embedded at the call site, then parses and renders it. Text
/// that does not parse as an ICU expression is returned unmodified; the
/// caller always gets *some* string back.
pub fn evaluate(
    catalog: &TranslationCatalog,
    message_id: &str,
    raw_template: &str,
    locale: &str,
    values: &ValueMap,
) -> String {
    let text = catalog
        .get(locale, message_id)
        .unwrap_or_else(|| raw_template.to_string());

    match pattern::parse(&text) {
        Some(node) => render(&node, values, locale),
        None => text,
    }
}

/// Substitute `#` tokens and placeholder names into case text.
///
/// Placeholder names match whole words only, so a binding named `count`
/// cannot corrupt the substring inside `discount`. All replacements happen
/// in a single pass over the text, which makes them idempotent per
/// placeholder: substituted output is never re-scanned.
fn substitute(text: &str, number: Option<f64>, bindings: &ValueMap) -> String {
    let result = if let Some(number) = number {
        text.replace('#', &format_number(number))
    } else {
        text.to_string()
    };

    if bindings.is_empty() {
        return result;
    }

    let alternation = bindings
        .keys()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    // Built per call from trusted escaped names; cannot fail.
    let matcher = match Regex::new(&format!(r"\b(?:{})\b", alternation)) {
        Ok(matcher) => matcher,
        Err(_) => return result,
    };

    matcher
        .replace_all(&result, |captures: &regex::Captures<'_>| {
            let name = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
            bindings.get(name).map(value_to_string).unwrap_or_default()
        })
        .into_owned()
}

/// Driving value as a number, if it is one.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// String form of a bound value, without JSON quoting for plain strings.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Decimal rendering of the `#` token: integral values drop the fraction.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
