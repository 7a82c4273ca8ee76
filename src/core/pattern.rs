//! ICU message pattern parser.
//!
//! Parses patterns of the shape
//! `{ <variable>, <plural|select|selectordinal> [, offset: <int>] <key> {<text>} ... }`
//! into a [`MessagePattern`]. A non-match returns `None` rather than an error:
//! callers treat the input as plain text in that case.
//!
//! The parser is a small bracket-counting tokenizer. Case text may contain
//! nested literal braces (they are kept verbatim); nested ICU expressions
//! inside a case body are *not* parsed recursively; the text is handed to
//! the renderer as-is. That boundary is deliberate and covered by tests.

use std::fmt;

/// Branching kind of an ICU expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Cardinal pluralization: `{n, plural, ...}`
    Plural,
    /// String matching: `{gender, select, ...}`
    Select,
    /// Ordinal pluralization: `{rank, selectordinal, ...}`
    Ordinal,
}

impl PatternKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "plural" => Some(PatternKind::Plural),
            "select" => Some(PatternKind::Select),
            "selectordinal" => Some(PatternKind::Ordinal),
            _ => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            PatternKind::Plural => "plural",
            PatternKind::Select => "select",
            PatternKind::Ordinal => "selectordinal",
        }
    }
}

/// Key of a single case branch.
///
/// Either an exact numeric match (`=0`, `=1`, ...) or a name. For
/// plural/ordinal kinds the name is a CLDR category
/// (`zero|one|two|few|many|other`); for select it is an arbitrary word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseKey {
    Exact(i64),
    Name(String),
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseKey::Exact(n) => write!(f, "={}", n),
            CaseKey::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A parsed ICU expression.
///
/// Constructed fresh by [`parse`] and never mutated afterwards. Cases keep
/// their encounter order; lookup helpers return the first match.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePattern {
    pub kind: PatternKind,
    /// Name of the driving variable (`n` in `{n, plural, ...}`).
    pub variable: String,
    /// Case branches in encounter order. Text is trimmed but otherwise raw:
    /// it may contain `#` tokens and placeholder names.
    pub cases: Vec<(CaseKey, String)>,
    /// Optional non-negative offset (`offset: 1`).
    pub offset: Option<u32>,
}

impl MessagePattern {
    /// Case text for an exact-match key (`=value`).
    pub fn exact_case(&self, value: i64) -> Option<&str> {
        self.cases.iter().find_map(|(key, text)| match key {
            CaseKey::Exact(n) if *n == value => Some(text.as_str()),
            _ => None,
        })
    }

    /// Case text for a named key (category or select word).
    pub fn named_case(&self, name: &str) -> Option<&str> {
        self.cases.iter().find_map(|(key, text)| match key {
            CaseKey::Name(n) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// The conventional `other` fallback branch, if present.
    pub fn other_case(&self) -> Option<&str> {
        self.named_case("other")
    }
}

/// Re-serialize into pattern syntax.
///
/// `parse(&pattern.to_string())` yields an equivalent structure for any
/// pattern whose case text survives trimming (the round-trip property the
/// tests rely on).
impl fmt::Display for MessagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {},", self.variable, self.kind.keyword())?;
        if let Some(offset) = self.offset {
            write!(f, " offset: {}", offset)?;
        }
        for (key, text) in &self.cases {
            write!(f, " {} {{{}}}", key, text)?;
        }
        write!(f, "}}")
    }
}

/// Parse the first ICU expression found in `pattern`.
///
/// Returns `None` when no well-formed expression is present. The expression
/// may be embedded in surrounding text; anything outside the matched braces
/// is ignored (the renderer only ever produces the selected case text).
pub fn parse(pattern: &str) -> Option<MessagePattern> {
    // Try every opening brace in turn; the first position that parses wins.
    for (index, ch) in pattern.char_indices() {
        if ch == '{'
            && let Some(parsed) = parse_at(pattern, index)
        {
            return Some(parsed);
        }
    }
    None
}

/// Attempt to parse an ICU expression whose opening brace is at `start`.
fn parse_at(pattern: &str, start: usize) -> Option<MessagePattern> {
    let (body, _end) = balanced_block(pattern, start)?;

    // `<variable> , <kind> , <tail>`
    let (variable, rest) = body.split_once(',')?;
    let variable = variable.trim();
    if variable.is_empty() || variable.contains(['{', '}']) {
        return None;
    }

    let (keyword, tail) = match rest.split_once(',') {
        Some((keyword, tail)) => (keyword.trim(), tail),
        None => return None,
    };
    let kind = PatternKind::from_keyword(keyword)?;

    let mut cursor = tail.trim_start();

    // Optional `offset: <digits>` before the case list.
    let mut offset = None;
    if let Some(after) = cursor.strip_prefix("offset:") {
        let after = after.trim_start();
        let digits: &str = after
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or("");
        if digits.is_empty() {
            return None;
        }
        offset = Some(digits.parse::<u32>().ok()?);
        cursor = after[digits.len()..].trim_start();
    }

    // Case list: `<key> { <text> }` pairs until the body is exhausted.
    let mut cases = Vec::new();
    while !cursor.is_empty() {
        let (key, after_key) = parse_case_key(cursor)?;
        let after_key = after_key.trim_start();
        if !after_key.starts_with('{') {
            return None;
        }
        let (text, end) = balanced_block(after_key, 0)?;
        cases.push((key, text.trim().to_string()));
        cursor = after_key[end..].trim_start();
    }

    if cases.is_empty() {
        return None;
    }

    Some(MessagePattern {
        kind,
        variable: variable.to_string(),
        cases,
        offset,
    })
}

/// Parse one case key (`=12` or a word) off the front of `input`.
fn parse_case_key(input: &str) -> Option<(CaseKey, &str)> {
    if let Some(rest) = input.strip_prefix('=') {
        let digits: &str = rest
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or("");
        if digits.is_empty() {
            return None;
        }
        let value = digits.parse::<i64>().ok()?;
        return Some((CaseKey::Exact(value), &rest[digits.len()..]));
    }

    let end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some((CaseKey::Name(input[..end].to_string()), &input[end..]))
}

/// Extract the content of the balanced brace block opening at `start`.
///
/// Returns the inner text (exclusive of the outer braces) and the byte index
/// just past the closing brace. Nested braces are tracked by depth, so case
/// text with literal `{...}` runs is preserved intact.
fn balanced_block(input: &str, start: usize) -> Option<(&str, usize)> {
    debug_assert_eq!(input[start..].chars().next(), Some('{'));
    let mut depth = 0usize;
    for (index, ch) in input[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let open = start + 1;
                    let close = start + index;
                    return Some((&input[open..close], close + 1));
                }
            }
            _ => {}
        }
    }
    None
}
