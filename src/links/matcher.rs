//! Finding quoted card names in effect text.
//!
//! Effect texts refer to other cards as `「Card Name」`. The matcher compiles
//! every known name into one pattern so each effect text is scanned once,
//! instead of once per name.

use regex::{Regex, RegexBuilder};

use crate::core::Result;

/// Opening delimiter around a quoted card name.
pub const OPEN_QUOTE: char = '「';
/// Closing delimiter around a quoted card name.
pub const CLOSE_QUOTE: char = '」';

// Tens of thousands of names compile past the default regex size limit.
const PATTERN_SIZE_LIMIT: usize = 512 * (1 << 20);

/// Finds mentions of known card names in text.
pub trait MentionMatcher {
    /// Names quoted in `text`, in order of appearance.
    ///
    /// Only names the matcher was built from are returned.
    fn mentions<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

/// Single-pass matcher over an alternation of every known name.
///
/// ## Example
///
/// ```
/// use rust_ccg_search::links::{MentionMatcher, NameMatcher};
///
/// let matcher = NameMatcher::new(["Beta", "Gamma (Alt)"]).unwrap();
/// let found = matcher.mentions("Summon 「Beta」 or 「Gamma (Alt)」, not 「Delta」.");
/// assert_eq!(found, vec!["Beta", "Gamma (Alt)"]);
/// ```
#[derive(Clone, Debug)]
pub struct NameMatcher {
    pattern: Option<Regex>,
}

impl NameMatcher {
    /// Compile a matcher for the given names.
    ///
    /// Names are escaped, so punctuation inside them matches literally.
    /// Empty names are ignored. With no names the matcher finds nothing.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            return Ok(Self { pattern: None });
        }

        names.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!("{}({}){}", OPEN_QUOTE, alternation, CLOSE_QUOTE);

        let pattern = RegexBuilder::new(&source)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(PATTERN_SIZE_LIMIT)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Check if the matcher knows any names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }
}

impl MentionMatcher for NameMatcher {
    fn mentions<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}
