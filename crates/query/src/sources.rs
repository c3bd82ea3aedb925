use core_types::{CountryYearRecord, SourcesUsed};
use std::collections::{BTreeMap, BTreeSet};

/// Merges per-year source lists into one set of sources per pillar.
///
/// The result only depends on which (pillar, source) pairs were added, not on
/// the order of the years or of the lists within them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAggregator {
    pillars: BTreeMap<String, BTreeSet<String>>,
}

impl SourceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sources: &SourcesUsed) {
        for (pillar, names) in sources {
            self.pillars
                .entry(pillar.clone())
                .or_default()
                .extend(names.iter().cloned());
        }
    }

    /// Folds every record that carries a `sources_used` map. Records without
    /// one are skipped.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CountryYearRecord>) -> Self {
        records
            .into_iter()
            .filter_map(|record| record.sources_used.as_ref())
            .fold(Self::new(), |mut acc, sources| {
                acc.add(sources);
                acc
            })
    }

    pub fn pillars(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.pillars
    }

    /// The serialized form: each pillar's sources as a sorted list.
    pub fn into_listing(self) -> BTreeMap<String, Vec<String>> {
        self.pillars
            .into_iter()
            .map(|(pillar, names)| (pillar, names.into_iter().collect()))
            .collect()
    }
}
