//! Word pair dataset.
//!
//! The dataset is a two-column comma-separated text: one pair per line.
//! Lines that do not split into exactly two non-empty fields, or with a
//! field holding the history delimiter, are skipped.
//! If the source cannot be read, or yields no pair at all, the bank falls
//! back to a single built-in pair so a round can always be dealt.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::history::BLOB_DELIMITER;

/// Two neighbouring secret words.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub first: String,
    pub second: String,
}

impl WordPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Either word equals `word` exactly.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.first == word || self.second == word
    }
}

/// Where the raw dataset text comes from.
pub trait WordSource {
    fn read(&self) -> std::io::Result<String>;
}

/// Dataset already held in memory.
#[derive(Clone, Debug)]
pub struct StaticWordSource(pub String);

impl WordSource for StaticWordSource {
    fn read(&self) -> std::io::Result<String> {
        Ok(self.0.clone())
    }
}

/// Dataset file on disk.
#[derive(Clone, Debug)]
pub struct FileWordSource {
    pub path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for FileWordSource {
    fn read(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Small dataset compiled into the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedWordSource;

const EMBEDDED_PAIRS: &str = "\
Cat,Dog
Coffee,Tea
Beach,Pool
Guitar,Violin
Train,Bus
Pizza,Burger
Winter,Autumn
Lion,Tiger
Book,Magazine
Moon,Sun
Piano,Organ
Castle,Palace
Knife,Sword
Rain,Snow
Bicycle,Scooter
Apple,Pear
Doctor,Nurse
Ship,Submarine
Wine,Beer
Cinema,Theatre
";

impl WordSource for EmbeddedWordSource {
    fn read(&self) -> std::io::Result<String> {
        Ok(EMBEDDED_PAIRS.to_string())
    }
}

/// Non-empty and free of the history blob delimiter.
fn storable(word: &str) -> bool {
    !word.is_empty() && !word.contains(BLOB_DELIMITER)
}

/// Parse dataset text, dropping malformed lines.
#[must_use]
pub fn parse_pairs(text: &str) -> Vec<WordPair> {
    let mut pairs = Vec::new();
    let mut dropped = 0usize;
    for line in text.lines() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [a, b] if storable(a) && storable(b) => pairs.push(WordPair::new(*a, *b)),
            [blank] if blank.is_empty() => {}
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, "skipped malformed word pair lines");
    }
    pairs
}

/// The loaded set of word pairs. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBank {
    pairs: Vec<WordPair>,
}

impl WordBank {
    /// Used whenever the dataset is unreadable or empty.
    pub const FALLBACK: (&'static str, &'static str) = ("Cat", "Dog");

    /// Read and parse `source` once. Never fails.
    pub fn load(source: &impl WordSource) -> Self {
        let pairs = match source.read() {
            Ok(text) => parse_pairs(&text),
            Err(err) => {
                warn!(error = %err, "word source unreadable, using fallback pair");
                Vec::new()
            }
        };
        if pairs.is_empty() {
            warn!("word source produced no pairs, using fallback pair");
            return Self::fallback();
        }
        debug!(count = pairs.len(), "loaded word pairs");
        Self { pairs }
    }

    /// A bank holding only the fallback pair.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            pairs: vec![WordPair::new(Self::FALLBACK.0, Self::FALLBACK.1)],
        }
    }

    /// Build from explicit pairs; an empty list yields the fallback bank.
    #[must_use]
    pub fn from_pairs(pairs: Vec<WordPair>) -> Self {
        if pairs.is_empty() {
            Self::fallback()
        } else {
            Self { pairs }
        }
    }

    #[must_use]
    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false: a bank holds at least the fallback pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::load(&EmbeddedWordSource)
    }
}
