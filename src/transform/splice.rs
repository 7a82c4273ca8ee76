//! Byte-range splicing of replacement code into source text.

use super::occurrence::Replacement;

/// Apply replacements to `source`, returning the rewritten text.
///
/// Ranges must lie within the source and not overlap; the collector
/// guarantees both (matched templates are never descended into). Out of
/// caution, a replacement violating either constraint is skipped rather
/// than corrupting the output.
pub fn apply_replacements(source: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by_key(|replacement| replacement.byte_range.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for replacement in ordered {
        let range = &replacement.byte_range;
        if range.start < cursor || range.end > source.len() || range.start > range.end {
            continue;
        }
        out.push_str(&source[cursor..range.start]);
        out.push_str(&replacement.code);
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}
