//! codesieve: granulated before/after code pairs
//!
//! Given a source text and its edited version, locate the changed regions
//! with a line diff and cut each one into a line window, its enclosing
//! function or its enclosing class, using a tree-sitter syntax tree.
//!
//! ```no_run
//! use codesieve_lib::data::{datasieve, SieveOptions};
//! use codesieve_lib::sieve::Granularity;
//! use codesieve_lib::tree_sitter::Language;
//!
//! let mut src_parser = Language::Python.parser()?;
//! let mut tgt_parser = Language::Python.parser()?;
//! let pairs = datasieve(
//!     &mut src_parser,
//!     &mut tgt_parser,
//!     "def f():\n    return 1\n",
//!     "def f():\n    return 2\n",
//!     Granularity::Function,
//!     &SieveOptions::default(),
//! )?;
//! assert_eq!(pairs.len(), 1);
//! # Ok::<(), codesieve_lib::error::SieveError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod sieve;
pub mod tree_sitter;
