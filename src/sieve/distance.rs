//! Span-to-node distance metrics
//!
//! A change rarely lines up with a single syntax node, so granulators rank
//! every node against the changed span and anchor on the closest one.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::span::{Extent, Span};
use crate::error::SieveError;

/// Which offsets of a node and a span are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceKind {
    /// `|node.start - span.start|`
    #[serde(rename = "s2s")]
    StartToStart,
    /// `|node.end - span.end|`
    #[serde(rename = "e2e")]
    EndToEnd,
    /// start-to-start plus end-to-end
    #[default]
    #[serde(rename = "btw")]
    Between,
    /// `|node.start - span.end|`
    #[serde(rename = "s2e")]
    StartToEnd,
    /// `|node.end - span.start|`
    #[serde(rename = "e2s")]
    EndToStart,
}

impl DistanceKind {
    pub fn measure<E: Extent + ?Sized>(&self, node: &E, span: Span) -> usize {
        match self {
            DistanceKind::StartToStart => node.start_byte().abs_diff(span.start),
            DistanceKind::EndToEnd => node.end_byte().abs_diff(span.end),
            DistanceKind::Between => {
                DistanceKind::StartToStart.measure(node, span)
                    + DistanceKind::EndToEnd.measure(node, span)
            }
            DistanceKind::StartToEnd => node.start_byte().abs_diff(span.end),
            DistanceKind::EndToStart => node.end_byte().abs_diff(span.start),
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            DistanceKind::StartToStart => "s2s",
            DistanceKind::EndToEnd => "e2e",
            DistanceKind::Between => "btw",
            DistanceKind::StartToEnd => "s2e",
            DistanceKind::EndToStart => "e2s",
        }
    }
}

impl std::fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for DistanceKind {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s2s" | "start-to-start" => Ok(DistanceKind::StartToStart),
            "e2e" | "end-to-end" => Ok(DistanceKind::EndToEnd),
            "btw" | "between" => Ok(DistanceKind::Between),
            "s2e" | "start-to-end" => Ok(DistanceKind::StartToEnd),
            "e2s" | "end-to-start" => Ok(DistanceKind::EndToStart),
            _ => Err(SieveError::UnknownDistance(s.to_string())),
        }
    }
}

/// Return the candidate closest to `span` under `kind`.
///
/// Ties go to the candidate that comes first in `nodes`.
pub fn closeref<E: Extent + Clone>(
    nodes: &[E],
    span: Span,
    kind: DistanceKind,
) -> Result<E, SieveError> {
    let mut best: Option<(&E, usize)> = None;
    for node in nodes {
        let dist = kind.measure(node, span);
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((node, dist)),
        }
    }
    best.map(|(node, _)| node.clone()).ok_or(SieveError::NoCandidates)
}
