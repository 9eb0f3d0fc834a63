//! Granulation of a changed span into a unit of code
//!
//! Line grains are pure text slicing. Function and class grains parse the
//! context, anchor on the syntax node closest to the span and return the
//! source text of the enclosing function-like or class-like node.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser};

use super::ancestor::{getparent, AncestorKinds};
use super::distance::{closeref, DistanceKind};
use super::span::Span;
use crate::error::SieveError;
use crate::tree_sitter::treewalk;

/// Kind of grain to cut around a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Line,
    #[default]
    Function,
    Class,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Granularity::Line => "line",
            Granularity::Function => "function",
            Granularity::Class => "class",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Granularity {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Granularity::Line),
            "function" => Ok(Granularity::Function),
            "class" => Ok(Granularity::Class),
            _ => Err(SieveError::UnknownGranularity(s.to_string())),
        }
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Lines touched by `span`, widened by `level - 1` lines of context on each
/// side and clamped to the document.
pub fn linegrained(context: &str, span: Span, level: usize) -> String {
    if level == 0 || !span.fits(context) {
        return String::new();
    }

    let bytes = context.as_bytes();
    let last = if span.is_empty() { span.start } else { span.end - 1 };
    let start_line = 1 + count_newlines(&bytes[..span.start]);
    let end_line = 1 + count_newlines(&bytes[..last]);

    let lines: Vec<&str> = context.lines().collect();
    let lo = start_line.saturating_sub(level);
    let hi = end_line.saturating_add(level - 1).min(lines.len());
    if lo >= hi {
        return String::new();
    }
    lines[lo..hi].join("\n")
}

fn ancestorgrained(
    parser: &mut Parser,
    context: &str,
    span: Span,
    level: usize,
    distance: DistanceKind,
    kinds: &[String],
) -> Result<String, SieveError> {
    if kinds.is_empty() {
        return Err(SieveError::EmptyAncestorKinds);
    }
    if level == 0 {
        return Ok(String::new());
    }
    if !span.fits(context) {
        tracing::debug!(%span, len = context.len(), "span outside context, skipping");
        return Ok(String::new());
    }

    let Some(tree) = parser.parse(context, None) else {
        tracing::debug!("parser returned no tree");
        return Ok(String::new());
    };
    let nodes: Vec<Node> = treewalk(&tree).collect();
    if nodes.is_empty() {
        return Ok(String::new());
    }

    let anchor = closeref(&nodes, span, distance)?;
    tracing::trace!(
        kind = anchor.kind(),
        start = anchor.start_byte(),
        end = anchor.end_byte(),
        "anchor node"
    );

    let Some(parent) = getparent(Some(anchor), kinds, level)? else {
        return Ok(String::new());
    };
    Ok(parent
        .utf8_text(context.as_bytes())
        .map(str::to_string)
        .unwrap_or_default())
}

/// Source text of the `level`-th function enclosing the node closest to
/// `span`, or an empty string when there is none.
pub fn functiongrained(
    parser: &mut Parser,
    context: &str,
    span: Span,
    level: usize,
    distance: DistanceKind,
    kinds: &AncestorKinds,
) -> Result<String, SieveError> {
    ancestorgrained(parser, context, span, level, distance, kinds.functions())
}

/// Like [`functiongrained`] but for class-like nodes.
pub fn classgrained(
    parser: &mut Parser,
    context: &str,
    span: Span,
    level: usize,
    distance: DistanceKind,
    kinds: &AncestorKinds,
) -> Result<String, SieveError> {
    ancestorgrained(parser, context, span, level, distance, kinds.classes())
}

pub fn finegrained(
    parser: &mut Parser,
    context: &str,
    span: Span,
    granularity: Granularity,
    level: usize,
    distance: DistanceKind,
    kinds: &AncestorKinds,
) -> Result<String, SieveError> {
    match granularity {
        Granularity::Line => Ok(linegrained(context, span, level)),
        Granularity::Function => functiongrained(parser, context, span, level, distance, kinds),
        Granularity::Class => classgrained(parser, context, span, level, distance, kinds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sitter::Language;
    use pretty_assertions::assert_eq;

    const TEN_LINES: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";

    fn line_span(text: &str, line: usize) -> Span {
        // 1-based line, span strictly inside it
        let start: usize = text.split_inclusive('\n').take(line - 1).map(str::len).sum();
        let len = text.split_inclusive('\n').nth(line - 1).unwrap().len();
        Span::new(start + 1, start + len - 2)
    }

    #[test]
    fn test_line_level_one_is_exact_line() {
        let span = line_span(TEN_LINES, 5);
        assert_eq!(linegrained(TEN_LINES, span, 1), "five");
    }

    #[test]
    fn test_line_level_two_adds_one_line_each_side() {
        let span = line_span(TEN_LINES, 5);
        assert_eq!(linegrained(TEN_LINES, span, 2), "four\nfive\nsix");
    }

    #[test]
    fn test_line_window_is_clamped() {
        assert_eq!(linegrained(TEN_LINES, line_span(TEN_LINES, 1), 3), "one\ntwo\nthree");
        assert_eq!(
            linegrained(TEN_LINES, line_span(TEN_LINES, 10), 3),
            "eight\nnine\nten"
        );
    }

    #[test]
    fn test_line_span_of_whole_lines() {
        // bytes of "three\nfour\n"
        let span = Span::new(8, 19);
        assert_eq!(&TEN_LINES[8..19], "three\nfour\n");
        assert_eq!(linegrained(TEN_LINES, span, 1), "three\nfour");
    }

    #[test]
    fn test_line_level_zero_and_out_of_range() {
        assert_eq!(linegrained(TEN_LINES, Span::new(0, 3), 0), "");
        assert_eq!(linegrained(TEN_LINES, Span::new(0, 500), 1), "");
    }

    const PYTHON: &str = r#"import os


class Greeter:
    def greet(self, name):
        message = "hi " + name
        return message


def top():
    return 1
"#;

    fn span_of(text: &str, needle: &str) -> Span {
        let start = text.find(needle).unwrap();
        Span::new(start, start + needle.len())
    }

    #[test]
    fn test_function_grain_returns_enclosing_method() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let span = span_of(PYTHON, "\"hi \" + name");

        let grain =
            functiongrained(&mut parser, PYTHON, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert_eq!(
            grain,
            "def greet(self, name):\n        message = \"hi \" + name\n        return message"
        );
    }

    #[test]
    fn test_class_grain_returns_enclosing_class() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let span = span_of(PYTHON, "\"hi \" + name");

        let grain =
            classgrained(&mut parser, PYTHON, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert!(grain.starts_with("class Greeter:"));
        assert!(grain.ends_with("return message"));
    }

    #[test]
    fn test_no_enclosing_function_is_empty() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let span = span_of(PYTHON, "import os");

        let grain =
            functiongrained(&mut parser, PYTHON, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert_eq!(grain, "");

        let span = span_of(PYTHON, "return 1");
        let grain =
            classgrained(&mut parser, PYTHON, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert_eq!(grain, "");
    }

    #[test]
    fn test_function_level_two_without_outer_function_is_empty() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let span = span_of(PYTHON, "return 1");

        let grain =
            functiongrained(&mut parser, PYTHON, span, 2, DistanceKind::Between, &kinds).unwrap();
        assert_eq!(grain, "");
    }

    #[test]
    fn test_empty_context_is_empty() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let grain =
            functiongrained(&mut parser, "", Span::new(0, 0), 1, DistanceKind::Between, &kinds)
                .unwrap();
        assert_eq!(grain, "");
    }

    #[test]
    fn test_out_of_range_span_is_empty() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let span = Span::new(PYTHON.len(), PYTHON.len() + 10);
        let grain =
            functiongrained(&mut parser, PYTHON, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert_eq!(grain, "");
    }

    #[test]
    fn test_rust_kinds_from_language() {
        let mut parser = Language::Rust.parser().unwrap();
        let kinds = Language::Rust.ancestor_kinds();
        let code = "struct S;\n\nimpl S {\n    fn get(&self) -> u32 {\n        41 + 1\n    }\n}\n";
        let span = span_of(code, "41 + 1");

        let function =
            functiongrained(&mut parser, code, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert_eq!(function, "fn get(&self) -> u32 {\n        41 + 1\n    }");

        let class = classgrained(&mut parser, code, span, 1, DistanceKind::Between, &kinds).unwrap();
        assert!(class.starts_with("impl S {"));
    }

    #[test]
    fn test_finegrained_dispatch() {
        let mut parser = Language::Python.parser().unwrap();
        let kinds = AncestorKinds::default();
        let span = span_of(PYTHON, "return 1");

        let line = finegrained(
            &mut parser,
            PYTHON,
            span,
            Granularity::Line,
            1,
            DistanceKind::Between,
            &kinds,
        )
        .unwrap();
        assert_eq!(line, "    return 1");

        let function = finegrained(
            &mut parser,
            PYTHON,
            span,
            Granularity::Function,
            1,
            DistanceKind::Between,
            &kinds,
        )
        .unwrap();
        assert_eq!(function, "def top():\n    return 1");
    }

    #[test]
    fn test_granularity_names() {
        assert_eq!("class".parse::<Granularity>().unwrap(), Granularity::Class);
        assert_eq!(Granularity::Line.to_string(), "line");
        assert!(matches!(
            "module".parse::<Granularity>(),
            Err(SieveError::UnknownGranularity(name)) if name == "module"
        ));
    }
}
