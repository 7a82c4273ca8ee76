//! Source file parsing and tagged-template collection.
//!
//! Uses swc to parse JS/TS/JSX and a `Visit` implementation to find every
//! tagged template whose tag is the configured localize identifier. Each
//! match is lowered into an AST-independent [`LiteralOccurrence`] carrying
//! the raw segments, the source text of each embedded expression, and the
//! byte range to splice over.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::{Expr, Module, TaggedTpl};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use super::occurrence::{ExpressionSource, LiteralOccurrence};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub file: Arc<SourceFile>,
}

/// Parse one JS/TS/JSX source string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*file), None);
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedSource {
            module,
            source_map,
            file,
        })
    })
}

/// Collect every `<localize_name>`-tagged template in the module.
///
/// Matched templates are not descended into: an occurrence nested inside
/// another occurrence's interpolation is carried along as raw expression
/// text and left for the outer replacement.
pub fn collect_occurrences(
    parsed: &ParsedSource,
    source: &str,
    localize_name: &str,
) -> Vec<LiteralOccurrence> {
    let mut collector = TemplateCollector {
        source,
        localize_name,
        source_map: &parsed.source_map,
        file_start: parsed.file.start_pos.0 as usize,
        occurrences: Vec::new(),
    };
    parsed.module.visit_with(&mut collector);
    collector.occurrences
}

struct TemplateCollector<'a> {
    source: &'a str,
    localize_name: &'a str,
    source_map: &'a SourceMap,
    file_start: usize,
    occurrences: Vec<LiteralOccurrence>,
}

impl<'a> TemplateCollector<'a> {
    /// Byte range of a span within the parsed file.
    fn byte_range(&self, span: swc_common::Span) -> std::ops::Range<usize> {
        let lo = (span.lo.0 as usize).saturating_sub(self.file_start);
        let hi = (span.hi.0 as usize).saturating_sub(self.file_start);
        lo..hi
    }

    fn lower(&self, node: &TaggedTpl) -> LiteralOccurrence {
        let segments = node
            .tpl
            .quasis
            .iter()
            .map(|quasi| quasi.raw.to_string())
            .collect();

        let expressions = node
            .tpl
            .exprs
            .iter()
            .map(|expr| {
                let range = self.byte_range(expr.span());
                ExpressionSource::new(&self.source[range])
            })
            .collect();

        let loc = self.source_map.lookup_char_pos(node.span.lo);
        let mut occurrence =
            LiteralOccurrence::new(segments, expressions, self.byte_range(node.span), loc.line);
        occurrence.col = loc.col_display + 1;
        occurrence.source_line = loc
            .file
            .get_line(loc.line.saturating_sub(1))
            .map(|line| line.trim_end().to_string());
        occurrence
    }
}

impl<'a> Visit for TemplateCollector<'a> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if let Expr::Ident(ident) = &*node.tag
            && ident.sym.as_str() == self.localize_name
        {
            self.occurrences.push(self.lower(node));
            return;
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(code: &str) -> Vec<LiteralOccurrence> {
        let source_map: Arc<SourceMap> = Default::default();
        let parsed = parse_source(code.to_string(), "test.ts", source_map).unwrap();
        collect_occurrences(&parsed, code, "$localize")
    }

    #[test]
    fn collects_simple_tagged_template() {
        let code = r#"const title = $localize`:@@title:Welcome`;"#;
        let occurrences = collect(code);

        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].segments, vec![":@@title:Welcome"]);
        assert!(occurrences[0].expressions.is_empty());
        assert_eq!(occurrences[0].line, 1);
        assert_eq!(
            &code[occurrences[0].byte_range.clone()],
            "$localize`:@@title:Welcome`"
        );
    }

    #[test]
    fn collects_segments_and_expression_text() {
        let code = r#"const msg = $localize`:@@cart:{${items.length}:count:, plural, other {# items}}`;"#;
        let occurrences = collect(code);

        assert_eq!(occurrences.len(), 1);
        assert_eq!(
            occurrences[0].segments,
            vec![":@@cart:{", ":count:, plural, other {# items}}"]
        );
        assert_eq!(occurrences[0].expressions[0].text, "items.length");
    }

    #[test]
    fn ignores_other_tags() {
        let code = "const a = gql`query { x }`; const b = $localize`:@@b:B`;";
        let occurrences = collect(code);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].segments, vec![":@@b:B"]);
    }

    #[test]
    fn collects_multiple_occurrences_in_order() {
        let code = "const a = $localize`:@@a:A`;\nconst b = $localize`:@@b:B`;";
        let occurrences = collect(code);
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].line, 1);
        assert_eq!(occurrences[1].line, 2);
    }

    #[test]
    fn finds_templates_inside_jsx_and_functions() {
        let code = r#"
export function Banner({count}: Props) {
  const label = $localize`:@@banner:{${count}:n:, plural, one {# new} other {# new}}`;
  return <div title={label}>{label}</div>;
}
"#;
        let occurrences = collect(code);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].expressions[0].text, "count");
    }

    #[test]
    fn parse_error_is_reported() {
        let source_map: Arc<SourceMap> = Default::default();
        let result = parse_source("const = ;;;".to_string(), "bad.ts", source_map);
        assert!(result.is_err());
    }

    #[test]
    fn custom_tag_name() {
        let code = "const a = i18n`:@@a:A`;";
        let source_map: Arc<SourceMap> = Default::default();
        let parsed = parse_source(code.to_string(), "test.ts", source_map).unwrap();
        let occurrences = collect_occurrences(&parsed, code, "i18n");
        assert_eq!(occurrences.len(), 1);
    }
}
