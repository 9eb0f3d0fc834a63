use tree_sitter::Parser;

use super::collector::GranulateCollector;
use super::opcodes::changed_spans;
use crate::config::{DEFAULT_LEVEL, DEFAULT_LIMIT};
use crate::error::SieveError;
use crate::sieve::{AncestorKinds, DistanceKind, Granularity, Granulator};

/// Optional knobs of [`datasieve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieveOptions {
    /// Ancestor climb depth, or context width for line grains
    pub level: usize,
    /// Texts longer than this many characters are rejected outright
    pub limit: usize,
    pub distance: DistanceKind,
    pub kinds: AncestorKinds,
}

impl Default for SieveOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            limit: DEFAULT_LIMIT,
            distance: DistanceKind::default(),
            kinds: AncestorKinds::default(),
        }
    }
}

fn keep(src: &str, tgt: &str) -> bool {
    src != tgt && !src.trim().is_empty() && !tgt.trim().is_empty()
}

/// Aligned `(source, target)` grains for the changes between `src` and `tgt`.
///
/// Each side is granulated with its own parser. Grains are paired by
/// position after per-side deduplication, so the longer side is truncated.
/// Pairs that are identical, empty or whitespace-only are dropped.
pub fn datasieve(
    src_parser: &mut Parser,
    tgt_parser: &mut Parser,
    src: &str,
    tgt: &str,
    granularity: Granularity,
    options: &SieveOptions,
) -> Result<Vec<(String, String)>, SieveError> {
    let src_len = src.chars().count();
    let tgt_len = tgt.chars().count();
    if src_len > options.limit || tgt_len > options.limit {
        tracing::debug!(
            src_len,
            tgt_len,
            limit = options.limit,
            "input over limit, nothing sieved"
        );
        return Ok(Vec::new());
    }

    let src_granulator =
        Granulator::new(src_parser, granularity, options.level, options.distance)?
            .with_kinds(options.kinds.clone())?;
    let tgt_granulator =
        Granulator::new(tgt_parser, granularity, options.level, options.distance)?
            .with_kinds(options.kinds.clone())?;
    let mut src_collector = GranulateCollector::new(src_granulator);
    let mut tgt_collector = GranulateCollector::new(tgt_granulator);

    let ops = changed_spans(src, tgt);
    let src_grains = src_collector.collect(src, ops.iter().map(|op| op.src))?;
    let tgt_grains = tgt_collector.collect(tgt, ops.iter().map(|op| op.tgt))?;
    tracing::debug!(
        %granularity,
        level = options.level,
        opcodes = ops.len(),
        src_grains = src_grains.len(),
        tgt_grains = tgt_grains.len(),
        "granulated"
    );

    Ok(src_grains
        .into_iter()
        .zip(tgt_grains)
        .filter(|(s, t)| keep(s, t))
        .collect())
}
