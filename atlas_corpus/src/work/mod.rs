//! Work definitions - the cataloged cultural items of the corpus.

mod lenient;
mod year;

pub use year::*;

use serde::{Deserialize, Serialize};

use crate::realm::Realm;

/// Unique identifier for works, as given by the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub String);

impl WorkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The kind of media a work belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum MediaType {
    Art,
    #[serde(rename = "Cinéma")]
    Cinema,
    #[serde(rename = "Littérature")]
    Literature,
    #[serde(rename = "Jeux vidéo")]
    VideoGame,
    #[serde(rename = "BD")]
    Comics,
    Music,
    /// Any label outside the known vocabulary.
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// All known media types, in dataset order.
    pub const KNOWN: [MediaType; 6] = [
        MediaType::Art,
        MediaType::Cinema,
        MediaType::Literature,
        MediaType::VideoGame,
        MediaType::Comics,
        MediaType::Music,
    ];

    /// Parse a dataset label. Unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> MediaType {
        let label = label.trim();
        Self::KNOWN
            .into_iter()
            .find(|t| t.label() == label)
            .unwrap_or(MediaType::Unknown)
    }

    /// The dataset label of this media type.
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Art => "Art",
            MediaType::Cinema => "Cinéma",
            MediaType::Literature => "Littérature",
            MediaType::VideoGame => "Jeux vidéo",
            MediaType::Comics => "BD",
            MediaType::Music => "Music",
            MediaType::Unknown => "",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != MediaType::Unknown
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One cataloged cultural work.
///
/// Field names on the wire follow the dataset (`titre`, `createur`, ...).
/// Every field except `id` is optional and degrades to "absent" when it is
/// missing or has the wrong shape.
///
/// `realm` is always derived from `categories`: a realm label stored in the
/// dataset is never trusted, and `categories` can only change through
/// [`Work::with_categories`], which reclassifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWork")]
pub struct Work {
    pub id: WorkId,

    #[serde(rename = "titre")]
    pub title: Option<String>,

    #[serde(rename = "createur")]
    pub creator: Option<String>,

    #[serde(rename = "studioEditeur")]
    pub studio: Option<String>,

    pub medium: Option<String>,

    #[serde(rename = "type")]
    pub media_type: MediaType,

    /// Free-text year, e.g. "1968" or "vers 1850-1860".
    #[serde(rename = "annee")]
    pub year_text: Option<String>,

    /// Precomputed numeric year field. Usually a century bucket (19 or 20),
    /// occasionally a full year.
    #[serde(rename = "anneeNum")]
    pub year_num: Option<u32>,

    categories: Vec<String>,

    pub emotions: Vec<String>,

    #[serde(rename = "motsCles")]
    pub keywords: Vec<String>,

    #[serde(rename = "commentaire")]
    pub comment: Option<String>,

    #[serde(rename = "lien")]
    pub link: Option<String>,

    realm: Realm,

    /// Realm the dataset declared when it disagrees with `realm`.
    #[serde(skip)]
    realm_mismatch: Option<Realm>,
}

/// Wire shape of a work record, before the realm is derived.
#[derive(Deserialize)]
struct RawWork {
    #[serde(deserialize_with = "lenient::id")]
    id: WorkId,

    #[serde(rename = "titre", default, deserialize_with = "lenient::opt_string")]
    title: Option<String>,

    #[serde(rename = "createur", default, deserialize_with = "lenient::opt_string")]
    creator: Option<String>,

    #[serde(rename = "studioEditeur", default, deserialize_with = "lenient::opt_string")]
    studio: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    medium: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient::media_type")]
    media_type: MediaType,

    #[serde(rename = "annee", default, deserialize_with = "lenient::opt_string")]
    year_text: Option<String>,

    #[serde(rename = "anneeNum", default, deserialize_with = "lenient::opt_number")]
    year_num: Option<u32>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    categories: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    emotions: Vec<String>,

    #[serde(rename = "motsCles", default, deserialize_with = "lenient::string_list")]
    keywords: Vec<String>,

    #[serde(rename = "commentaire", default, deserialize_with = "lenient::opt_string")]
    comment: Option<String>,

    #[serde(rename = "lien", default, deserialize_with = "lenient::opt_string")]
    link: Option<String>,

    #[serde(default, deserialize_with = "lenient::realm")]
    realm: Option<Realm>,
}

impl From<RawWork> for Work {
    fn from(raw: RawWork) -> Self {
        let realm = Realm::classify(&raw.categories);
        Self {
            id: raw.id,
            title: raw.title,
            creator: raw.creator,
            studio: raw.studio,
            medium: raw.medium,
            media_type: raw.media_type,
            year_text: raw.year_text,
            year_num: raw.year_num,
            categories: raw.categories,
            emotions: raw.emotions,
            keywords: raw.keywords,
            comment: raw.comment,
            link: raw.link,
            realm,
            realm_mismatch: raw.realm.filter(|declared| *declared != realm),
        }
    }
}

impl Work {
    /// Create a new work with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: WorkId::new(id),
            title: None,
            creator: None,
            studio: None,
            medium: None,
            media_type: MediaType::Unknown,
            year_text: None,
            year_num: None,
            categories: Vec::new(),
            emotions: Vec::new(),
            keywords: Vec::new(),
            comment: None,
            link: None,
            realm: Realm::Human,
            realm_mismatch: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    /// Set the free-text year.
    pub fn with_year(mut self, year_text: impl Into<String>) -> Self {
        self.year_text = Some(year_text.into());
        self
    }

    /// Set the precomputed numeric year field.
    pub fn with_year_num(mut self, year_num: u32) -> Self {
        self.year_num = Some(year_num);
        self
    }

    /// Set the categories and reclassify the realm.
    pub fn with_categories<S: Into<String>>(
        mut self,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self.realm = Realm::classify(&self.categories);
        self.realm_mismatch = None;
        self
    }

    pub fn with_emotions<S: Into<String>>(mut self, emotions: impl IntoIterator<Item = S>) -> Self {
        self.emotions = emotions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Realm derived from the categories.
    pub fn realm(&self) -> Realm {
        self.realm
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Take the realm label the dataset declared, if it disagreed with the
    /// classifier. Reported once.
    pub fn take_realm_mismatch(&mut self) -> Option<Realm> {
        self.realm_mismatch.take()
    }

    /// Year used for range filtering.
    ///
    /// A precomputed `anneeNum` is preferred when it holds a full year
    /// (>= 100). Below that it is a century bucket (19 for 1900-1999), so
    /// the first run of 3-4 digits in the free-text year is used instead.
    pub fn year(&self) -> Option<i32> {
        match self.year_num {
            Some(num) if num >= 100 => i32::try_from(num).ok(),
            _ => self.year_text.as_deref().and_then(extract_year),
        }
    }

    /// Century bucket of this work, preferring the precomputed field.
    pub fn century(&self) -> Option<Century> {
        match self.year_num {
            Some(num) if num >= 100 => Century::from_year(num as i32),
            Some(num) => u8::try_from(num).ok().map(Century),
            None => self.year().and_then(Century::from_year),
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn has_emotion(&self, emotion: &str) -> bool {
        self.emotions.iter().any(|e| e == emotion)
    }

    /// Display title, falling back to the identifier.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_builder() {
        let work = Work::new("w1")
            .with_title("Interstellar")
            .with_type(MediaType::Cinema)
            .with_categories(["temps cosmique"])
            .with_emotions(["fascination"]);

        assert_eq!(work.id, WorkId::from("w1"));
        assert_eq!(work.display_title(), "Interstellar");
        assert_eq!(work.realm(), Realm::Cosmic);
        assert!(work.has_category("temps cosmique"));
        assert!(work.has_emotion("fascination"));
        assert!(!work.has_emotion("tristesse"));
    }

    #[test]
    fn test_media_type_labels() {
        assert_eq!(MediaType::from_label("Cinéma"), MediaType::Cinema);
        assert_eq!(MediaType::from_label(" Jeux vidéo "), MediaType::VideoGame);
        assert_eq!(MediaType::from_label("Opéra"), MediaType::Unknown);
        assert!(!MediaType::Unknown.is_known());
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "42",
            "titre": "Solaris",
            "createur": "Andreï Tarkovski",
            "type": "Cinéma",
            "annee": "1972",
            "anneeNum": 19,
            "categories": ["temps vécu", "mémoire"],
            "emotions": ["mélancolie"],
            "motsCles": ["océan"],
            "lien": "https://example.org/solaris",
            "realm": "human"
        }"#;

        let mut work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.id.as_str(), "42");
        assert_eq!(work.title.as_deref(), Some("Solaris"));
        assert_eq!(work.media_type, MediaType::Cinema);
        assert_eq!(work.year(), Some(1972));
        assert_eq!(work.century(), Some(Century(19)));
        assert_eq!(work.categories().len(), 2);
        assert_eq!(work.keywords, vec!["océan".to_string()]);
        assert_eq!(work.realm(), Realm::Human);
        assert_eq!(work.take_realm_mismatch(), None);
    }

    #[test]
    fn test_deserialize_degrades_malformed_fields() {
        let json = r#"{
            "id": "7",
            "titre": null,
            "type": "Opéra",
            "annee": 1984,
            "anneeNum": "pas un nombre",
            "categories": "temps cosmique, nature du temps",
            "emotions": [1, "joie", null],
            "realm": 12
        }"#;

        let mut work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.title, None);
        assert_eq!(work.media_type, MediaType::Unknown);
        assert_eq!(work.year_text.as_deref(), Some("1984"));
        assert_eq!(work.year_num, None);
        assert_eq!(work.categories(), ["temps cosmique", "nature du temps"]);
        assert_eq!(work.emotions, vec!["joie"]);
        assert_eq!(work.realm(), Realm::Cosmic);
        assert_eq!(work.take_realm_mismatch(), None);
    }

    #[test]
    fn test_deserialize_derives_realm_from_categories() {
        let json = r#"{"id": "1", "categories": ["temps cosmique"], "realm": "cosmic"}"#;
        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.realm(), Realm::Cosmic);

        let json = r#"{"id": "2", "categories": ["temps et rêve"]}"#;
        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.realm(), Realm::Disrupted);

        let json = r#"{"id": "3", "categories": ["mémoire"], "realm": "cosmic"}"#;
        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.realm(), Realm::Human);
    }

    #[test]
    fn test_declared_realm_mismatch_is_reported_once() {
        let json = r#"{"id": "1", "categories": ["temps cosmique"], "realm": "human"}"#;
        let mut work: Work = serde_json::from_str(json).unwrap();

        assert_eq!(work.realm(), Realm::Cosmic);
        assert_eq!(work.take_realm_mismatch(), Some(Realm::Human));
        assert_eq!(work.take_realm_mismatch(), None);
        assert_eq!(work.realm(), Realm::Cosmic);
    }

    #[test]
    fn test_serialized_realm_survives_round_trip() {
        let work = Work::new("9").with_categories(["temps géologique"]);
        let value = serde_json::to_value(&work).unwrap();
        assert_eq!(value["realm"], "cosmic");
        assert_eq!(value["categories"][0], "temps géologique");

        let back: Work = serde_json::from_value(value).unwrap();
        assert_eq!(back, work);
    }

    #[test]
    fn test_year_prefers_full_precomputed_year() {
        let work = Work::new("a").with_year("vers 1850").with_year_num(1852);
        assert_eq!(work.year(), Some(1852));
        assert_eq!(work.century(), Some(Century(18)));

        let bucket_only = Work::new("b").with_year("1999").with_year_num(19);
        assert_eq!(bucket_only.year(), Some(1999));
        assert_eq!(bucket_only.century(), Some(Century(19)));

        let undated = Work::new("c").with_year("inconnue");
        assert_eq!(undated.year(), None);
        assert_eq!(undated.century(), None);
    }
}
