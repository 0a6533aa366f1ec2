//! Filter Predicate Builder - compiles facet selections into a work predicate.
//!
//! Two groups of constraints coexist:
//! 1. **Hard** constraints (media type, free-text search, year range) are
//!    always AND'd. A work failing any one of them is excluded.
//! 2. **Soft** constraints (categories, emotions, century) form a union.
//!    When at least one is set, a work must satisfy at least one of the set
//!    groups. This is what lets a guided journey combining a category and an
//!    emotion surface works matching either axis.

mod facets;
mod journey;
pub mod text;

pub use facets::*;
pub use journey::*;

use atlas_corpus::{Century, Corpus, MediaType, Realm, Work};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: f64,
    pub max: f64,
}

impl YearRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite bounds with `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        let year = f64::from(year);
        self.min <= year && year <= self.max
    }
}

/// The user's current facet selections.
///
/// Values within a set are OR'd. An empty set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub types: BTreeSet<MediaType>,
    pub categories: BTreeSet<String>,
    pub emotions: BTreeSet<String>,
    pub year_range: Option<YearRange>,
    pub search: String,
    #[serde(rename = "centuryFilter")]
    pub century: Option<Century>,
}

impl FilterState {
    /// Create a filter state that matches the whole corpus.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.types.insert(media_type);
        self
    }

    /// Add a media type by its dataset label. Unrecognized labels are kept
    /// as `MediaType::Unknown`, which matches no work.
    pub fn with_type_label(self, label: &str) -> Self {
        self.with_type(MediaType::from_label(label))
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotions.insert(emotion.into());
        self
    }

    pub fn with_year_range(mut self, min: f64, max: f64) -> Self {
        self.year_range = Some(YearRange::new(min, max));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_century(mut self, century: Century) -> Self {
        self.century = Some(century);
        self
    }

    /// Toggle a media type in or out of the selection.
    pub fn toggle_type(&mut self, media_type: MediaType) {
        if !self.types.remove(&media_type) {
            self.types.insert(media_type);
        }
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    pub fn toggle_emotion(&mut self, emotion: &str) {
        if !self.emotions.remove(emotion) {
            self.emotions.insert(emotion.to_string());
        }
    }

    /// Reset every facet.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no constraint of any kind is set.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.categories.is_empty()
            && self.emotions.is_empty()
            && self.year_range.is_none()
            && self.search.trim().is_empty()
            && self.century.is_none()
    }

    /// Number of active facet values, for a "filters (n)" badge.
    pub fn active_count(&self) -> usize {
        self.types.len()
            + self.categories.len()
            + self.emotions.len()
            + usize::from(self.year_range.is_some())
            + usize::from(!self.search.trim().is_empty())
            + usize::from(self.century.is_some())
    }
}

/// A compiled, immutable filter over works.
///
/// Built from a full `FilterState` snapshot, so evaluation never observes a
/// half-updated selection.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkPredicate {
    types: BTreeSet<MediaType>,
    needle: Option<String>,
    year_range: Option<YearRange>,
    categories: BTreeSet<String>,
    emotions: BTreeSet<String>,
    century: Option<Century>,
    realm: Option<Realm>,
}

/// Compile a filter state and the timeline's century selector into a
/// predicate. The selector, when set, takes precedence over
/// `filters.century`.
pub fn compile(filters: &FilterState, century_filter: Option<Century>) -> WorkPredicate {
    WorkPredicate::compile(filters, century_filter)
}

impl WorkPredicate {
    /// Compile a predicate. See [`compile`].
    pub fn compile(filters: &FilterState, century_filter: Option<Century>) -> Self {
        let needle = text::normalize(filters.search.trim());

        Self {
            types: filters.types.clone(),
            needle: (!needle.is_empty()).then_some(needle),
            year_range: filters.year_range,
            categories: filters.categories.clone(),
            emotions: filters.emotions.clone(),
            century: century_filter.or(filters.century),
            realm: None,
        }
    }

    /// A predicate that accepts every work.
    pub fn match_all() -> Self {
        Self::compile(&FilterState::default(), None)
    }

    /// Additionally require works to belong to `realm`, as a hard
    /// constraint.
    pub fn restrict_to_realm(mut self, realm: Option<Realm>) -> Self {
        self.realm = realm;
        self
    }

    /// Evaluate the predicate against a work.
    pub fn matches(&self, work: &Work) -> bool {
        self.passes_hard(work) && self.passes_soft(work)
    }

    fn passes_hard(&self, work: &Work) -> bool {
        if !self.types.is_empty()
            && !(work.media_type.is_known() && self.types.contains(&work.media_type))
        {
            return false;
        }

        if let Some(realm) = self.realm {
            if work.realm() != realm {
                return false;
            }
        }

        if let Some(range) = &self.year_range {
            let in_range = range.is_valid() && work.year().is_some_and(|y| range.contains(y));
            if !in_range {
                return false;
            }
        }

        match &self.needle {
            Some(needle) => text::haystack(work).contains(needle.as_str()),
            None => true,
        }
    }

    fn passes_soft(&self, work: &Work) -> bool {
        if !self.has_soft_constraints() {
            return true;
        }

        let category_hit = work.categories().iter().any(|c| self.categories.contains(c));
        let emotion_hit = work.emotions.iter().any(|e| self.emotions.contains(e));
        let century_hit = self.century.is_some() && work.century() == self.century;

        category_hit || emotion_hit || century_hit
    }

    /// Whether any of the union-group constraints is set.
    pub fn has_soft_constraints(&self) -> bool {
        !self.categories.is_empty() || !self.emotions.is_empty() || self.century.is_some()
    }

    /// Borrow the predicate as a plain closure.
    pub fn as_fn(&self) -> impl Fn(&Work) -> bool + '_ {
        move |work| self.matches(work)
    }

    /// The active subset of a corpus, in corpus order.
    pub fn apply<'a>(&self, corpus: &'a Corpus) -> Vec<&'a Work> {
        corpus.find_works(self.as_fn())
    }

    /// Count matching works without collecting them.
    pub fn count(&self, corpus: &Corpus) -> usize {
        corpus.iter().filter(|w| self.matches(w)).count()
    }
}
