//! Facet tallies for the filter panel badges.

use atlas_corpus::{Century, MediaType, Realm, Work};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-value counts of a set of works along every facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetCounts {
    pub total: usize,
    pub types: BTreeMap<MediaType, usize>,
    pub categories: BTreeMap<String, usize>,
    pub emotions: BTreeMap<String, usize>,
    pub centuries: BTreeMap<Century, usize>,
    pub realms: BTreeMap<Realm, usize>,
}

impl FacetCounts {
    /// Tally works. A work with repeated tags counts once per tag.
    pub fn tally<'a>(works: impl IntoIterator<Item = &'a Work>) -> Self {
        let mut counts = Self::default();

        for work in works {
            counts.total += 1;
            *counts.types.entry(work.media_type).or_default() += 1;
            *counts.realms.entry(work.realm()).or_default() += 1;

            if let Some(century) = work.century() {
                *counts.centuries.entry(century).or_default() += 1;
            }

            let mut categories: Vec<&String> = work.categories().iter().collect();
            categories.sort_unstable();
            categories.dedup();
            for category in categories {
                *counts.categories.entry(category.clone()).or_default() += 1;
            }

            let mut emotions: Vec<&String> = work.emotions.iter().collect();
            emotions.sort_unstable();
            emotions.dedup();
            for emotion in emotions {
                *counts.emotions.entry(emotion.clone()).or_default() += 1;
            }
        }

        counts
    }

    /// Categories ordered by descending count, then name.
    pub fn top_categories(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self
            .categories
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }
}
