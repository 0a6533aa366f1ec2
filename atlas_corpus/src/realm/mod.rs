//! Realm classification - the three coarse thematic clusters of the atlas.

use serde::{Deserialize, Serialize};

/// Category keywords that place a work in the cosmic realm.
pub const COSMIC_KEYWORDS: &[&str] = &[
    "temps cosmique",
    "nature du temps",
    "temps et espace",
    "temps géologique",
    "temps écologique",
];

/// Category keywords that place a work in the disrupted realm.
pub const DISRUPTED_KEYWORDS: &[&str] = &[
    "manipulation du temps",
    "manipulations du temps",
    "représentation du temps",
    "temps et rêve",
];

/// Thematic realm a work is clustered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    /// Cosmological, geological and ecological time.
    Cosmic,
    /// Lived time, memory and identity.
    #[default]
    Human,
    /// Manipulated, represented or dreamed time.
    Disrupted,
}

impl Realm {
    /// All realms in display order.
    pub const ALL: [Realm; 3] = [Realm::Cosmic, Realm::Human, Realm::Disrupted];

    /// Classify a list of category tags.
    ///
    /// Cosmic keywords are checked first, then disrupted ones; anything else
    /// is human. A work matching both groups is therefore always cosmic.
    pub fn classify<S: AsRef<str>>(categories: &[S]) -> Realm {
        let lowered: Vec<String> = categories
            .iter()
            .map(|c| c.as_ref().to_lowercase())
            .collect();

        let hits = |keywords: &[&str]| {
            lowered
                .iter()
                .any(|category| keywords.iter().any(|k| category.contains(k)))
        };

        if hits(COSMIC_KEYWORDS) {
            Realm::Cosmic
        } else if hits(DISRUPTED_KEYWORDS) {
            Realm::Disrupted
        } else {
            Realm::Human
        }
    }

    /// Parse a stored realm label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Realm> {
        match label.trim().to_lowercase().as_str() {
            "cosmic" => Some(Realm::Cosmic),
            "human" => Some(Realm::Human),
            "disrupted" => Some(Realm::Disrupted),
            _ => None,
        }
    }

    /// The serialized label of this realm.
    pub fn label(&self) -> &'static str {
        match self {
            Realm::Cosmic => "cosmic",
            Realm::Human => "human",
            Realm::Disrupted => "disrupted",
        }
    }
}

impl std::fmt::Display for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
