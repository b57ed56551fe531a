//! Secret words: the pair dataset and the recent-words history.

pub mod bank;
pub mod history;

pub use bank::{
    parse_pairs, EmbeddedWordSource, FileWordSource, StaticWordSource, WordBank, WordPair,
    WordSource,
};
pub use history::{
    decode_blob, encode_blob, BlobHistoryStore, HistoryStore, MemoryHistoryStore, WordHistory,
    MAX_HISTORY,
};
