//! Pair extraction from a before/after text pair
//!
//! Diffs the two texts, granulates every changed region on both sides and
//! keeps the aligned grain pairs that carry an actual edit.

mod collector;
mod datasieve;
mod opcodes;

pub use collector::GranulateCollector;
pub use datasieve::{datasieve, SieveOptions};
pub use opcodes::{changed_spans, line_offsets, opcodes, split_lines_keepends, OpTag, Opcode};
