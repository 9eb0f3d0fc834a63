//! Granulation engine
//!
//! Turns a byte span of a text into a "grain": the touched lines, the
//! enclosing function or the enclosing class.
//!
//! - `distance`: span-to-node metrics and closest-node selection
//! - `ancestor`: n-th matching ancestor lookup
//! - `grains`: the line/function/class strategies
//! - `granulator`: a strategy bound to a parser and its settings

mod ancestor;
mod distance;
mod grains;
mod granulator;
mod span;

pub use ancestor::{getparent, AncestorKinds};
pub use distance::{closeref, DistanceKind};
pub use grains::{classgrained, finegrained, functiongrained, linegrained, Granularity};
pub use granulator::Granulator;
pub use span::{Extent, Span};
