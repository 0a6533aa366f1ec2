//! Guided journeys - named presets of soft constraints.

use atlas_corpus::Century;
use serde::Serialize;

use super::FilterState;

/// A curated path through the corpus.
///
/// Journeys only set union-group constraints, so applying one broadens the
/// selection to works matching any of its categories, emotions or century.
#[derive(Debug, Clone, Serialize)]
pub struct Journey {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub categories: &'static [&'static str],
    pub emotions: &'static [&'static str],
    pub century: Option<Century>,
}

const PRESETS: &[Journey] = &[
    Journey {
        id: "vertige-cosmique",
        title: "Vertige cosmique",
        description: "Des échelles de temps qui dépassent l'humain.",
        categories: &["temps cosmique", "temps géologique", "nature du temps"],
        emotions: &["fascination", "vertige"],
        century: None,
    },
    Journey {
        id: "memoire-intime",
        title: "Mémoire intime",
        description: "Le temps vécu, ses traces et ses pertes.",
        categories: &["temps vécu", "mémoire"],
        emotions: &["nostalgie", "mélancolie"],
        century: None,
    },
    Journey {
        id: "temps-brise",
        title: "Le temps brisé",
        description: "Boucles, rêves et chronologies manipulées.",
        categories: &["manipulations du temps", "temps et rêve"],
        emotions: &["confusion", "étrangeté"],
        century: None,
    },
    Journey {
        id: "siecle-des-machines",
        title: "Le siècle des machines",
        description: "Le temps mesuré, accéléré, industrialisé.",
        categories: &["temps social"],
        emotions: &["angoisse"],
        century: Some(Century(19)),
    },
];

impl Journey {
    /// All built-in journeys.
    pub fn presets() -> &'static [Journey] {
        PRESETS
    }

    /// Look up a journey by its identifier.
    pub fn find(id: &str) -> Option<&'static Journey> {
        PRESETS.iter().find(|j| j.id == id)
    }

    /// The filter state this journey selects. Hard constraints are left
    /// empty.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            categories: self.categories.iter().map(|c| c.to_string()).collect(),
            emotions: self.emotions.iter().map(|e| e.to_string()).collect(),
            century: self.century,
            ..FilterState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::compile;
    use atlas_corpus::Work;

    #[test]
    fn test_find_journey() {
        assert!(Journey::find("memoire-intime").is_some());
        assert!(Journey::find("nulle-part").is_none());
    }

    #[test]
    fn test_presets_have_unique_ids() {
        let mut ids: Vec<_> = Journey::presets().iter().map(|j| j.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Journey::presets().len());
    }

    #[test]
    fn test_journey_filter_is_soft_only() {
        let journey = Journey::find("vertige-cosmique").unwrap();
        let filters = journey.filter_state();

        assert!(filters.types.is_empty());
        assert!(filters.search.is_empty());
        assert_eq!(filters.categories.len(), 3);
        assert!(filters.emotions.contains("fascination"));
    }

    #[test]
    fn test_journey_reveals_either_axis() {
        let filters = Journey::find("vertige-cosmique").unwrap().filter_state();
        let predicate = compile(&filters, None);

        let by_category = Work::new("a").with_categories(["temps géologique"]);
        let by_emotion = Work::new("b").with_emotions(["vertige"]);
        let unrelated = Work::new("c").with_emotions(["joie"]);

        assert!(predicate.matches(&by_category));
        assert!(predicate.matches(&by_emotion));
        assert!(!predicate.matches(&unrelated));
    }
}
