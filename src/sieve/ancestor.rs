//! Ancestor lookup by node kind
//!
//! `level` counts matching ancestors: level 1 is the innermost enclosing
//! function (or class), level 2 the one enclosing that, and so on.

use tree_sitter::Node;

use super::grains::Granularity;
use crate::error::SieveError;

/// Grammar labels that count as function-like and class-like nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorKinds {
    functions: Vec<String>,
    classes: Vec<String>,
}

impl Default for AncestorKinds {
    /// Labels shared by the common tree-sitter grammars (JavaScript,
    /// TypeScript, Python, Java, C/C++, Ruby).
    fn default() -> Self {
        Self::new(
            &[
                "arrow_function",
                "function_declaration",
                "method_definition",
                "method_declaration",
                "function",
                "method",
                "function_definition",
            ],
            &["class_declaration", "class_specifier", "class_definition"],
        )
    }
}

impl AncestorKinds {
    pub fn new(functions: &[&str], classes: &[&str]) -> Self {
        Self {
            functions: functions.iter().map(|s| s.to_string()).collect(),
            classes: classes.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_functions(mut self, functions: Vec<String>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Kinds searched for a granularity; line grains have none.
    pub fn for_granularity(&self, granularity: Granularity) -> Option<&[String]> {
        match granularity {
            Granularity::Line => None,
            Granularity::Function => Some(&self.functions),
            Granularity::Class => Some(&self.classes),
        }
    }

    /// Fails only when the set searched by `granularity` is empty.
    pub fn validate(&self, granularity: Granularity) -> Result<(), SieveError> {
        match self.for_granularity(granularity) {
            Some(kinds) if kinds.is_empty() => Err(SieveError::EmptyAncestorKinds),
            _ => Ok(()),
        }
    }
}

/// Find the `level`-th node, counting from `node` upwards, whose kind is in
/// `kinds`.
///
/// `node` itself counts when it matches. With `level == 0` no climbing
/// happens: `node` is returned only if it matches.
pub fn getparent<'tree, S: AsRef<str>>(
    node: Option<Node<'tree>>,
    kinds: &[S],
    level: usize,
) -> Result<Option<Node<'tree>>, SieveError> {
    if kinds.is_empty() {
        return Err(SieveError::EmptyAncestorKinds);
    }
    let Some(node) = node else {
        return Ok(None);
    };
    let accepts = |n: &Node| kinds.iter().any(|k| k.as_ref() == n.kind());

    if level == 0 {
        return Ok(accepts(&node).then_some(node));
    }

    let mut matched = usize::from(accepts(&node));
    let mut current = Some(node);
    while matched < level {
        let Some(parent) = current.and_then(|n| n.parent()) else {
            return Ok(None);
        };
        if accepts(&parent) {
            matched += 1;
        }
        current = Some(parent);
    }

    Ok(current)
}
