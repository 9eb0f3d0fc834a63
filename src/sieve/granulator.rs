use tree_sitter::Parser;

use super::ancestor::AncestorKinds;
use super::distance::DistanceKind;
use super::grains::{finegrained, Granularity};
use super::span::Span;
use crate::error::SieveError;

/// A configured grain cutter bound to one parser.
///
/// The configuration never changes after construction. The parser is only
/// used to produce a fresh tree per call, so one granulator can sieve any
/// number of spans, but a parser must not be shared between granulators
/// that run concurrently.
pub struct Granulator<'p> {
    parser: &'p mut Parser,
    granularity: Granularity,
    level: usize,
    distance: DistanceKind,
    kinds: AncestorKinds,
}

impl<'p> Granulator<'p> {
    pub fn new(
        parser: &'p mut Parser,
        granularity: Granularity,
        level: usize,
        distance: DistanceKind,
    ) -> Result<Self, SieveError> {
        if level == 0 {
            return Err(SieveError::InvalidLevel(level));
        }
        Ok(Self {
            parser,
            granularity,
            level,
            distance,
            kinds: AncestorKinds::default(),
        })
    }

    pub fn line(parser: &'p mut Parser, level: usize) -> Result<Self, SieveError> {
        Self::new(parser, Granularity::Line, level, DistanceKind::default())
    }

    pub fn function(
        parser: &'p mut Parser,
        level: usize,
        distance: DistanceKind,
    ) -> Result<Self, SieveError> {
        Self::new(parser, Granularity::Function, level, distance)
    }

    pub fn class(
        parser: &'p mut Parser,
        level: usize,
        distance: DistanceKind,
    ) -> Result<Self, SieveError> {
        Self::new(parser, Granularity::Class, level, distance)
    }

    /// Replace the function/class kinds, e.g. with
    /// [`Language::ancestor_kinds`](crate::tree_sitter::Language::ancestor_kinds).
    ///
    /// Only the set this granularity searches has to be non-empty.
    pub fn with_kinds(mut self, kinds: AncestorKinds) -> Result<Self, SieveError> {
        kinds.validate(self.granularity)?;
        self.kinds = kinds;
        Ok(self)
    }

    /// Grain for `span` of `context` at the configured level.
    pub fn sieve(&mut self, context: &str, span: Span) -> Result<String, SieveError> {
        self.sieve_at(context, span, self.level)
    }

    /// Grain for `span` at a one-off `level`; level 0 yields an empty grain.
    pub fn sieve_at(
        &mut self,
        context: &str,
        span: Span,
        level: usize,
    ) -> Result<String, SieveError> {
        finegrained(
            self.parser,
            context,
            span,
            self.granularity,
            level,
            self.distance,
            &self.kinds,
        )
    }
}
