//! Mr. White's guess comparison.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decompose, strip combining marks and lowercase.
#[must_use]
pub fn fold_word(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case- and accent-insensitive equality.
#[must_use]
pub fn guess_matches(guess: &str, secret: &str) -> bool {
    fold_word(guess) == fold_word(secret)
}
