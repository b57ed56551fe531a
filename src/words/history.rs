//! Recently used words.
//!
//! Every dealt pair is pushed to the front of the history so the next
//! selection can steer away from it. The engine keeps the list in memory
//! and only talks to durable storage through [`HistoryStore`].

use im::Vector;
use serde::{Deserialize, Serialize};

use super::bank::WordPair;

/// Pairs remembered; the list holds two words per pair.
pub const MAX_HISTORY: usize = 100;

/// Separator used by [`encode_blob`] / [`decode_blob`]. There is no
/// escaping: the word bank refuses words containing it.
pub const BLOB_DELIMITER: char = ';';

/// Most-recent-first list of used words, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordHistory {
    words: Vector<String>,
}

impl WordHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list, applying the same dedupe and cap as `record`.
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
        let mut history = Self {
            words: words.into_iter().filter(|w| !w.is_empty()).collect(),
        };
        history.normalize();
        history
    }

    /// Most recent first.
    pub fn recent_words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Either word of `pair` was used recently.
    #[must_use]
    pub fn touches(&self, pair: &WordPair) -> bool {
        self.contains(&pair.first) || self.contains(&pair.second)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Push both words to the front, `first` ending up most recent.
    pub fn record(&mut self, first: &str, second: &str) {
        self.words.push_front(second.to_string());
        self.words.push_front(first.to_string());
        self.normalize();
    }

    pub fn record_pair(&mut self, pair: &WordPair) {
        self.record(&pair.first, &pair.second);
    }

    /// Drop later duplicates, then cap the length.
    fn normalize(&mut self) {
        let mut seen = rustc_hash::FxHashSet::default();
        self.words.retain(|w| seen.insert(w.clone()));
        self.words.truncate(self.words.len().min(2 * MAX_HISTORY));
    }

    pub fn load_from(store: &impl HistoryStore) -> Self {
        Self::from_words(store.load())
    }

    pub fn save_to(&self, store: &mut impl HistoryStore) {
        let words: Vec<String> = self.words.iter().cloned().collect();
        store.save(&words);
    }
}

/// Durable storage for the history, provided by the host application.
pub trait HistoryStore {
    fn load(&self) -> Vec<String>;
    fn save(&mut self, words: &[String]);
}

/// Keeps the list in memory, for tests and hosts without storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistoryStore {
    pub words: Vec<String>,
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<String> {
        self.words.clone()
    }

    fn save(&mut self, words: &[String]) {
        self.words = words.to_vec();
    }
}

/// Join words into the flat text blob kept under one storage key.
#[must_use]
pub fn encode_blob(words: &[String]) -> String {
    words.join(&BLOB_DELIMITER.to_string())
}

/// Inverse of [`encode_blob`]; empty entries are ignored.
#[must_use]
pub fn decode_blob(blob: &str) -> Vec<String> {
    blob.split(BLOB_DELIMITER)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stores the history as a single delimiter-joined string.
#[derive(Clone, Debug, Default)]
pub struct BlobHistoryStore {
    pub blob: String,
}

impl HistoryStore for BlobHistoryStore {
    fn load(&self) -> Vec<String> {
        decode_blob(&self.blob)
    }

    fn save(&mut self, words: &[String]) {
        self.blob = encode_blob(words);
    }
}
