//! Tree-sitter integration for codesieve
//!
//! Parser construction for the linked grammars and the cursor-based
//! pre-order walker the granulators scan for anchor nodes.

mod parser;
mod walker;

pub use parser::{Language, TreeSitterError};
pub use walker::{treewalk, TreeWalk};
