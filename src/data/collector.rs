use std::collections::HashSet;

use crate::error::SieveError;
use crate::sieve::{Granulator, Span};

/// Runs a granulator over many spans, keeping each distinct grain once.
pub struct GranulateCollector<'p> {
    granulator: Granulator<'p>,
}

impl<'p> GranulateCollector<'p> {
    pub fn new(granulator: Granulator<'p>) -> Self {
        Self { granulator }
    }

    /// Distinct grains of `text` for `spans`, in first-seen order.
    ///
    /// Duplicates are only detected within this call.
    pub fn collect<I>(&mut self, text: &str, spans: I) -> Result<Vec<String>, SieveError>
    where
        I: IntoIterator<Item = Span>,
    {
        let mut seen = HashSet::new();
        let mut grains = Vec::new();

        for span in spans {
            let grain = self.granulator.sieve(text, span)?;
            if seen.insert(grain.clone()) {
                grains.push(grain);
            }
        }

        Ok(grains)
    }

    /// [`collect`](Self::collect) over each `(text, spans)` group, one group
    /// after the other, flattened in order.
    pub fn collectall<'t, G, I>(&mut self, groups: G) -> Result<Vec<String>, SieveError>
    where
        G: IntoIterator<Item = (&'t str, I)>,
        I: IntoIterator<Item = Span>,
    {
        let mut grains = Vec::new();
        for (text, spans) in groups {
            grains.extend(self.collect(text, spans)?);
        }
        Ok(grains)
    }
}
