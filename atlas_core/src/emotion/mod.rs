//! Emotion-Coordinate Mapper - places works on Russell's circumplex.
//!
//! Each known emotion has a fixed (valence, arousal) pair. A work sits at the
//! plain arithmetic mean of its emotions' pairs.

use atlas_corpus::{Realm, Work, WorkId};
use serde::{Deserialize, Serialize};

use crate::filter::text::normalize;
use crate::layout::{Point, Viewport};

/// Per-emotion (valence, arousal) table, keyed by normalized name.
const EMOTION_TABLE: &[(&str, f64, f64)] = &[
    ("amusement", 0.7, 0.5),
    ("angoisse", -0.7, 0.7),
    ("apaisement", 0.6, -0.5),
    ("colere", -0.7, 0.8),
    ("confusion", -0.3, 0.4),
    ("contemplation", 0.4, -0.4),
    ("curiosite", 0.5, 0.4),
    ("desespoir", -0.9, -0.2),
    ("emerveillement", 0.8, 0.6),
    ("ennui", -0.4, -0.8),
    ("espoir", 0.6, 0.3),
    ("etrangete", -0.1, 0.5),
    ("fascination", 0.6, 0.6),
    ("inquietude", -0.5, 0.5),
    ("joie", 0.9, 0.5),
    ("melancolie", -0.4, -0.5),
    ("nostalgie", 0.1, -0.4),
    ("peur", -0.8, 0.8),
    ("serenite", 0.7, -0.6),
    ("solitude", -0.5, -0.5),
    ("surprise", 0.3, 0.8),
    ("tendresse", 0.7, -0.1),
    ("tristesse", -0.7, -0.4),
    ("vertige", -0.1, 0.8),
];

/// A point in valence/arousal space, both axes in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionCoords {
    pub valence: f64,
    pub arousal: f64,
}

impl EmotionCoords {
    pub const ORIGIN: EmotionCoords = EmotionCoords {
        valence: 0.0,
        arousal: 0.0,
    };

    pub fn new(valence: f64, arousal: f64) -> Self {
        Self { valence, arousal }
    }

    /// Project onto a viewport: valence left to right, arousal bottom to
    /// top, keeping `padding` pixels free on every side.
    pub fn to_screen(&self, viewport: &Viewport, padding: f64) -> Point {
        let usable_w = (viewport.width - 2.0 * padding).max(0.0);
        let usable_h = (viewport.height - 2.0 * padding).max(0.0);
        Point::new(
            padding + (self.valence + 1.0) / 2.0 * usable_w,
            padding + (1.0 - self.arousal) / 2.0 * usable_h,
        )
    }
}

/// Coordinates of a single emotion, if it is in the table.
pub fn lookup(emotion: &str) -> Option<EmotionCoords> {
    let key = normalize(emotion.trim());
    EMOTION_TABLE
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|&(_, valence, arousal)| EmotionCoords::new(valence, arousal))
}

/// Mean coordinates of a set of emotions.
///
/// Unknown emotions count as the origin; an empty list is the origin.
pub fn to_coords<S: AsRef<str>>(emotions: &[S]) -> EmotionCoords {
    if emotions.is_empty() {
        return EmotionCoords::ORIGIN;
    }

    let (valence, arousal) = emotions
        .iter()
        .map(|e| lookup(e.as_ref()).unwrap_or(EmotionCoords::ORIGIN))
        .fold((0.0, 0.0), |(v, a), c| (v + c.valence, a + c.arousal));

    let n = emotions.len() as f64;
    EmotionCoords::new(valence / n, arousal / n)
}

/// A work placed on the emotion map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionPoint {
    pub id: WorkId,
    pub realm: Realm,
    pub coords: EmotionCoords,
}

/// Emotion-map coordinates for a set of works, in input order.
pub fn scatter<'a>(works: impl IntoIterator<Item = &'a Work>) -> Vec<EmotionPoint> {
    works
        .into_iter()
        .map(|work| EmotionPoint {
            id: work.id.clone(),
            realm: work.realm(),
            coords: to_coords(&work.emotions),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn known_emotions() -> Vec<&'static str> {
        EMOTION_TABLE.iter().map(|(name, _, _)| *name).collect()
    }

    #[test]
    fn test_empty_is_origin() {
        let none: [&str; 0] = [];
        assert_eq!(to_coords(&none), EmotionCoords::ORIGIN);
    }

    #[test]
    fn test_single_emotion() {
        assert_eq!(to_coords(&["fascination"]), EmotionCoords::new(0.6, 0.6));
    }

    #[test]
    fn test_lookup_ignores_accents_and_case() {
        assert_eq!(lookup("Mélancolie"), lookup("melancolie"));
        assert!(lookup(" SÉRÉNITÉ ").is_some());
        assert_eq!(lookup("saudade"), None);
    }

    #[test]
    fn test_plain_mean() {
        let coords = to_coords(&["joie", "tristesse"]);
        assert!((coords.valence - 0.1).abs() < 1e-9);
        assert!((coords.arousal - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_emotion_pulls_toward_origin() {
        let coords = to_coords(&["fascination", "saudade"]);
        assert!((coords.valence - 0.3).abs() < 1e-9);
        assert!((coords.arousal - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_table_is_within_bounds() {
        for &(name, valence, arousal) in EMOTION_TABLE {
            assert!((-1.0..=1.0).contains(&valence), "{name}");
            assert!((-1.0..=1.0).contains(&arousal), "{name}");
            assert_eq!(normalize(name), name);
        }
    }

    #[test]
    fn test_to_screen_corners() {
        let viewport = Viewport::new(200.0, 100.0);
        let top_right = EmotionCoords::new(1.0, 1.0).to_screen(&viewport, 10.0);
        assert_eq!(top_right, Point::new(190.0, 10.0));

        let center = EmotionCoords::ORIGIN.to_screen(&viewport, 10.0);
        assert_eq!(center, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_scatter() {
        let works = [
            Work::new("1").with_emotions(["joie"]),
            Work::new("2"),
        ];

        let points = scatter(&works);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].coords, EmotionCoords::new(0.9, 0.5));
        assert_eq!(points[1].coords, EmotionCoords::ORIGIN);
    }

    proptest! {
        #[test]
        fn coords_stay_in_bounds(
            picks in prop::collection::vec(prop::sample::select(known_emotions()), 0..12),
        ) {
            let coords = to_coords(&picks);
            prop_assert!((-1.0..=1.0).contains(&coords.valence));
            prop_assert!((-1.0..=1.0).contains(&coords.arousal));
        }

        #[test]
        fn coords_ignore_order(
            picks in prop::collection::vec(prop::sample::select(known_emotions()), 1..8),
        ) {
            let mut reversed = picks.clone();
            reversed.reverse();
            let a = to_coords(&picks);
            let b = to_coords(&reversed);
            prop_assert!((a.valence - b.valence).abs() < 1e-9);
            prop_assert!((a.arousal - b.arousal).abs() < 1e-9);
        }
    }
}
