//! CJK-aware forward tokenizer.
//!
//! Text is lowercased and segmented into words by the Unicode word-boundary
//! rules, which already yield one word per ideograph and drop punctuation.
//! Kana, Hangul and Bopomofo runs are then split further into one token per
//! grapheme, since card names in these scripts have no spaces.
//!
//! For indexing, every word is also stored under each of its leading
//! prefixes (`"fire"` → `f`, `fi`, `fir`, `fire`), so a partially typed
//! word still finds the card.

use unicode_segmentation::UnicodeSegmentation;

/// Check if a character belongs to a syllabic script tokenized per
/// character (kana, Hangul, Bopomofo).
#[must_use]
pub fn is_syllabic(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}'     // Hangul Jamo
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{3100}'..='\u{312F}'   // Bopomofo
        | '\u{3130}'..='\u{318F}'   // Hangul Compatibility Jamo
        | '\u{31A0}'..='\u{31BF}'   // Bopomofo Extended
        | '\u{31F0}'..='\u{31FF}'   // Katakana Phonetic Extensions
        | '\u{A960}'..='\u{A97F}'   // Hangul Jamo Extended-A
        | '\u{AC00}'..='\u{D7FF}'   // Hangul Syllables, Jamo Extended-B
        | '\u{FF66}'..='\u{FF9F}'   // Half-width Katakana
        | '\u{FFA0}'..='\u{FFDC}'   // Half-width Hangul
    )
}

/// Split text into lowercase tokens, without prefix expansion.
///
/// ## Example
///
/// ```
/// use rust_ccg_search::index::tokenizer::tokenize;
///
/// assert_eq!(tokenize("Fire Heart/001"), vec!["fire", "heart", "001"]);
/// assert_eq!(tokenize("炎の剣"), vec!["炎", "の", "剣"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tokens = Vec::new();

    for word in lower.unicode_words() {
        if !word.chars().any(is_syllabic) {
            tokens.push(word.to_string());
            continue;
        }

        // Syllabic graphemes stand alone; anything between them stays one word.
        let mut run = String::new();
        for grapheme in word.graphemes(true) {
            if grapheme.chars().any(is_syllabic) {
                if !run.is_empty() {
                    tokens.push(std::mem::take(&mut run));
                }
                if grapheme.chars().any(char::is_alphanumeric) {
                    tokens.push(grapheme.to_string());
                }
            } else {
                run.push_str(grapheme);
            }
        }
        if !run.is_empty() {
            tokens.push(run);
        }
    }

    tokens
}

/// Terms stored in the index for `text`: every token plus every leading
/// prefix of multi-character words, deduplicated.
#[must_use]
pub fn index_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for token in tokenize(text) {
        for (end, _) in token.char_indices().skip(1) {
            terms.push(token[..end].to_string());
        }
        terms.push(token);
    }

    terms.sort_unstable();
    terms.dedup();
    terms
}
