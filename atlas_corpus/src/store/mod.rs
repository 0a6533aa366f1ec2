//! Corpus Store - the immutable, in-memory catalog of works.

mod error;

pub use error::*;

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::realm::Realm;
use crate::work::{Work, WorkId};

/// The read-only catalog of works, loaded once at startup.
///
/// Works keep their dataset order. Every work's `realm` is computed by the
/// realm classifier at load time; a disagreeing label from the dataset is
/// replaced and logged.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    works: Vec<Work>,
    index: HashMap<WorkId, usize>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from already-parsed works.
    ///
    /// Later duplicates of an identifier are dropped.
    pub fn from_works(works: impl IntoIterator<Item = Work>) -> Self {
        let mut corpus = Self::new();
        for work in works {
            corpus.insert(work);
        }
        corpus
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_json_value(root)
    }

    /// Parse a dataset from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::from_json_value(root)
    }

    /// Load a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let corpus = Self::from_reader(std::io::BufReader::new(file))?;
        info!(path = %path.display(), works = corpus.len(), "Loaded corpus");
        Ok(corpus)
    }

    fn from_json_value(root: Value) -> Result<Self> {
        let records = match root {
            Value::Array(records) => records,
            Value::Object(_) => return Err(CorpusError::NotAnArray("an object")),
            Value::String(_) => return Err(CorpusError::NotAnArray("a string")),
            Value::Number(_) => return Err(CorpusError::NotAnArray("a number")),
            Value::Bool(_) => return Err(CorpusError::NotAnArray("a boolean")),
            Value::Null => return Err(CorpusError::NotAnArray("null")),
        };

        let total = records.len();
        let mut corpus = Self::new();
        for (position, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Work>(record) {
                Ok(work) => corpus.insert(work),
                Err(err) => warn!(position, error = %err, "Skipping malformed work record"),
            }
        }

        if corpus.len() < total {
            warn!(kept = corpus.len(), total, "Some work records were not loaded");
        }
        Ok(corpus)
    }

    fn insert(&mut self, mut work: Work) {
        if self.index.contains_key(&work.id) {
            warn!(id = %work.id, "Skipping duplicate work id");
            return;
        }

        if let Some(declared) = work.take_realm_mismatch() {
            warn!(
                id = %work.id,
                declared = %declared,
                computed = %work.realm(),
                "Stored realm disagrees with categories, using computed realm"
            );
        }

        self.index.insert(work.id.clone(), self.works.len());
        self.works.push(work);
    }

    /// Get a work by ID.
    pub fn get(&self, id: &WorkId) -> Option<&Work> {
        self.index.get(id).map(|&i| &self.works[i])
    }

    /// All works in dataset order.
    pub fn works(&self) -> &[Work] {
        &self.works
    }

    pub fn iter(&self) -> impl Iterator<Item = &Work> {
        self.works.iter()
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    /// Find works matching a predicate, in dataset order.
    pub fn find_works<F>(&self, predicate: F) -> Vec<&Work>
    where
        F: Fn(&Work) -> bool,
    {
        self.works.iter().filter(|w| predicate(w)).collect()
    }

    /// Works belonging to a realm.
    pub fn works_in_realm(&self, realm: Realm) -> Vec<&Work> {
        self.find_works(|w| w.realm() == realm)
    }

    /// Distinct category tags across the corpus, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.works
            .iter()
            .flat_map(|w| w.categories().iter().map(String::as_str))
            .collect()
    }

    /// Distinct emotion tags across the corpus, sorted.
    pub fn emotions(&self) -> BTreeSet<&str> {
        self.works
            .iter()
            .flat_map(|w| w.emotions.iter().map(String::as_str))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Work;
    type IntoIter = std::slice::Iter<'a, Work>;

    fn into_iter(self) -> Self::IntoIter {
        self.works.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work::MediaType;

    const DATASET: &str = r#"[
        {"id": "1", "titre": "Interstellar", "type": "Cinéma",
         "categories": ["temps cosmique"], "emotions": ["fascination"], "realm": "cosmic"},
        {"id": "2", "titre": "À la recherche du temps perdu", "type": "Littérature",
         "categories": ["temps vécu"], "emotions": ["tristesse"], "realm": "cosmic"},
        {"titre": "Sans identifiant"},
        {"id": 3, "type": "Cinéma"},
        {"id": ["bad"]},
        {"id": "1", "titre": "Doublon"}
    ]"#;

    #[test]
    fn test_load_dataset() {
        let corpus = Corpus::from_json_str(DATASET).unwrap();

        assert_eq!(corpus.len(), 3);
        let ids: Vec<_> = corpus.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let corpus = Corpus::from_json_str(DATASET).unwrap();
        let first = corpus.get(&WorkId::from("1")).unwrap();
        assert_eq!(first.title.as_deref(), Some("Interstellar"));
    }

    #[test]
    fn test_realm_is_reconciled_on_load() {
        let corpus = Corpus::from_json_str(DATASET).unwrap();

        assert_eq!(corpus.get(&WorkId::from("1")).unwrap().realm(), Realm::Cosmic);
        assert_eq!(corpus.get(&WorkId::from("2")).unwrap().realm(), Realm::Human);
        assert_eq!(corpus.get(&WorkId::from("3")).unwrap().realm(), Realm::Human);
    }

    #[test]
    fn test_rejects_non_array_root() {
        let err = Corpus::from_json_str(r#"{"works": []}"#).unwrap_err();
        assert!(matches!(err, CorpusError::NotAnArray("an object")));

        let err = Corpus::from_json_str("not json").unwrap_err();
        assert!(matches!(err, CorpusError::Json(_)));
    }

    #[test]
    fn test_find_works() {
        let corpus = Corpus::from_json_str(DATASET).unwrap();
        let films = corpus.find_works(|w| w.media_type == MediaType::Cinema);
        assert_eq!(films.len(), 2);
        assert_eq!(corpus.works_in_realm(Realm::Cosmic).len(), 1);
    }

    #[test]
    fn test_vocabularies() {
        let corpus = Corpus::from_json_str(DATASET).unwrap();
        assert!(corpus.categories().contains("temps vécu"));
        assert_eq!(corpus.emotions().len(), 2);
    }

    #[test]
    fn test_from_reader_and_missing_path() {
        let corpus = Corpus::from_reader(DATASET.as_bytes()).unwrap();
        assert_eq!(corpus.len(), 3);

        let err = Corpus::from_path("/nonexistent/atlas/works.json").unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
