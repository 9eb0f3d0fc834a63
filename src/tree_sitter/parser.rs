//! Tree-sitter parser construction
//!
//! Builds a ready-to-use parser for each grammar linked into the crate and
//! knows which node kinds count as functions and classes in that grammar.

use std::str::FromStr;

use thiserror::Error;
use tree_sitter::Parser;

use crate::sieve::AncestorKinds;

/// Supported programming languages for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Python,
    Rust,
}

impl Language {
    /// Detect language from file path extension
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit('.').next()?;
        match ext.to_lowercase().as_str() {
            "ts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            "js" => Some(Language::JavaScript),
            "jsx" => Some(Language::Jsx),
            "mjs" | "cjs" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
            Language::JavaScript => "JavaScript",
            Language::Jsx => "JSX",
            Language::Python => "Python",
            Language::Rust => "Rust",
        }
    }

    fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            // JSX uses the same grammar as JavaScript in tree-sitter-javascript
            Language::JavaScript | Language::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }

    /// Create a parser bound to this language's grammar.
    ///
    /// Each caller gets its own parser; parsers are not shared between
    /// granulators running side by side.
    pub fn parser(&self) -> Result<Parser, TreeSitterError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.grammar())
            .map_err(|e| TreeSitterError::LanguageInitFailed(e.to_string()))?;
        Ok(parser)
    }

    /// Function-like and class-like node kinds of this grammar
    pub fn ancestor_kinds(&self) -> AncestorKinds {
        match self {
            Language::TypeScript | Language::Tsx => AncestorKinds::new(
                &[
                    "function_declaration",
                    "generator_function_declaration",
                    "function_expression",
                    "arrow_function",
                    "method_definition",
                ],
                &["class_declaration", "abstract_class_declaration", "class"],
            ),
            Language::JavaScript | Language::Jsx => AncestorKinds::new(
                &[
                    "function_declaration",
                    "generator_function_declaration",
                    "function_expression",
                    "arrow_function",
                    "method_definition",
                ],
                &["class_declaration", "class"],
            ),
            Language::Python => AncestorKinds::new(
                &["function_definition", "lambda"],
                &["class_definition"],
            ),
            Language::Rust => AncestorKinds::new(
                &["function_item", "closure_expression"],
                &["struct_item", "enum_item", "impl_item", "trait_item"],
            ),
        }
    }
}

impl FromStr for Language {
    type Err = TreeSitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "tsx" => Ok(Language::Tsx),
            "javascript" | "js" => Ok(Language::JavaScript),
            "jsx" => Ok(Language::Jsx),
            "python" | "py" => Ok(Language::Python),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(TreeSitterError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error type for tree-sitter operations
#[derive(Debug, Error)]
pub enum TreeSitterError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Failed to initialize language: {0}")]
    LanguageInitFailed(String),
}
