//! Search key folding

use unicode_normalization::UnicodeNormalization;

/// Fold text for case-insensitive substring matching: NFC composition so
/// precomposed and combining accents compare equal, then Unicode lowercase.
pub fn search_key(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}
