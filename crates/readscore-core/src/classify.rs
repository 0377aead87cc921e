//! Per-word classification.
//!
//! Each word token is judged on its own: syllable complexity, then Spache
//! familiarity, then Dale-Chall familiarity. Nothing is carried between
//! words except the read-only word lists.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stemmer::Stemmer;
use crate::suffix_rules::{dale_chall_inflection, spache_inflection};
use crate::syllables::SyllableCounter;
use crate::word_lists::{ListKind, WordLists};

/// A written integer: leading digit 1-9, optional comma grouping.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{0,2}(?:,?[0-9]{3})*$").expect("valid regex"));

/// Lower-case a token for list lookup.
///
/// Curly single quotes become `'`, hyphens are removed and apostrophes are
/// kept, so "Battle-field" becomes "battlefield" and "Don’t" becomes "don't".
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != '-')
        .map(|c| if matches!(c, '‘' | '’') { '\'' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Why a word did or did not count as familiar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Familiarity {
    /// Capitalized and treated as a proper name.
    Name,
    /// Listed verbatim.
    Listed,
    /// A written number (Dale-Chall only).
    Number,
    /// A regular inflection of a listed word.
    Inflection,
    /// The token has no letters.
    NoLetters,
    /// None of the above.
    Unfamiliar,
}

impl Familiarity {
    /// Returns `true` for every outcome except [`Familiarity::Unfamiliar`].
    pub const fn is_familiar(self) -> bool {
        !matches!(self, Self::Unfamiliar)
    }

    /// Returns the outcome in kebab-case.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Listed => "listed",
            Self::Number => "number",
            Self::Inflection => "inflection",
            Self::NoLetters => "no-letters",
            Self::Unfamiliar => "unfamiliar",
        }
    }
}

impl std::fmt::Display for Familiarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which checks to run and how to treat capitals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Treat words starting with an upper-case letter as proper names.
    pub caps_as_names: bool,
    /// Judge Spache familiarity.
    pub spache: bool,
    /// Judge Dale-Chall familiarity.
    pub dale_chall: bool,
}

/// The outcome of classifying one word token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Syllables reported by the syllable counter.
    pub syllables: usize,
    /// Characters in the raw surface text.
    pub letters: usize,
    /// Three or more syllables.
    pub is_polysyllabic: bool,
    /// Polysyllabic and not treated as a proper name.
    pub is_complex_polysyllabic: bool,
    /// Excluded from difficulty by the capitalized-name rule.
    pub is_name: bool,
    /// Spache outcome, when requested.
    pub spache: Option<Familiarity>,
    /// Dale-Chall outcome, when requested.
    pub dale_chall: Option<Familiarity>,
}

impl Classification {
    /// Spache familiarity, when requested.
    pub fn is_spache_familiar(&self) -> Option<bool> {
        self.spache.map(Familiarity::is_familiar)
    }

    /// Dale-Chall familiarity, when requested.
    pub fn is_dale_chall_familiar(&self) -> Option<bool> {
        self.dale_chall.map(Familiarity::is_familiar)
    }
}

/// A classification paired with the word it describes, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordReport {
    /// The word as given.
    pub word: String,
    /// The form used for list lookup.
    pub normalized: String,
    /// Estimated syllables.
    pub syllables: usize,
    /// Three or more syllables.
    pub polysyllabic: bool,
    /// Treated as a proper name.
    pub name: bool,
    /// Spache outcome, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spache: Option<Familiarity>,
    /// Dale-Chall outcome, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dale_chall: Option<Familiarity>,
}

impl WordReport {
    /// Describe `raw` using its classification.
    pub fn new(raw: &str, word: &Classification) -> Self {
        Self {
            word: raw.to_string(),
            normalized: normalize(raw),
            syllables: word.syllables,
            polysyllabic: word.is_polysyllabic,
            name: word.is_name,
            spache: word.spache,
            dale_chall: word.dale_chall,
        }
    }
}

/// Classifies word tokens against a pair of word lists.
pub struct Classifier<'a> {
    lists: &'a WordLists,
    stemmer: &'a dyn Stemmer,
    syllables: &'a dyn SyllableCounter,
    options: ClassifyOptions,
}

impl<'a> Classifier<'a> {
    /// Create a classifier borrowing its lists and collaborators.
    pub fn new(
        lists: &'a WordLists,
        stemmer: &'a dyn Stemmer,
        syllables: &'a dyn SyllableCounter,
        options: ClassifyOptions,
    ) -> Self {
        Self {
            lists,
            stemmer,
            syllables,
            options,
        }
    }

    /// Classify one raw word token.
    pub fn classify(&self, raw: &str) -> Classification {
        let syllables = self.syllables.count(raw);
        let normalized = normalize(raw);
        let has_letters = raw.chars().any(char::is_alphabetic);
        let is_name = self.options.caps_as_names
            && raw.chars().next().is_some_and(|c| c.is_ascii_uppercase());

        let is_polysyllabic = has_letters && syllables >= 3;
        Classification {
            syllables,
            letters: raw.chars().count(),
            is_polysyllabic,
            is_complex_polysyllabic: is_polysyllabic && !is_name,
            is_name,
            spache: self
                .options
                .spache
                .then(|| self.spache(&normalized, is_name, has_letters)),
            dale_chall: self
                .options
                .dale_chall
                .then(|| self.dale_chall(&normalized, is_name, has_letters)),
        }
    }

    fn spache(&self, normalized: &str, is_name: bool, has_letters: bool) -> Familiarity {
        let list = self.lists.get(ListKind::Spache);
        if is_name {
            Familiarity::Name
        } else if list.is_listed(normalized) {
            Familiarity::Listed
        } else if spache_inflection(normalized, list, self.stemmer) {
            Familiarity::Inflection
        } else if !has_letters {
            Familiarity::NoLetters
        } else {
            Familiarity::Unfamiliar
        }
    }

    fn dale_chall(&self, normalized: &str, is_name: bool, has_letters: bool) -> Familiarity {
        let list = self.lists.get(ListKind::DaleChall);
        if is_name {
            Familiarity::Name
        } else if list.is_listed(normalized) {
            Familiarity::Listed
        } else if NUMBER.is_match(normalized) {
            Familiarity::Number
        } else if dale_chall_inflection(normalized, list, self.stemmer) {
            Familiarity::Inflection
        } else if !has_letters {
            Familiarity::NoLetters
        } else {
            Familiarity::Unfamiliar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemmer::PorterStemmer;
    use crate::syllables::SyllableEstimator;
    use crate::word_lists::WordList;

    const ALL: ClassifyOptions = ClassifyOptions {
        caps_as_names: false,
        spache: true,
        dale_chall: true,
    };

    fn classify(raw: &str, options: ClassifyOptions) -> Classification {
        Classifier::new(WordLists::bundled(), &PorterStemmer, &SyllableEstimator, options)
            .classify(raw)
    }

    #[test]
    fn normalize_folds_case_quotes_and_hyphens() {
        assert_eq!(normalize("Battle-field"), "battlefield");
        assert_eq!(normalize("Don’t"), "don't");
        assert_eq!(normalize("‘tis"), "'tis");
        assert_eq!(normalize("can't"), "can't");
    }

    #[test]
    fn polysyllabic_words() {
        let word = classify("government", ALL);
        assert_eq!(word.syllables, 3);
        assert!(word.is_polysyllabic);
        assert!(word.is_complex_polysyllabic);
        assert_eq!(word.letters, 10);

        assert!(!classify("people", ALL).is_polysyllabic);
    }

    #[test]
    fn capitalized_names_are_familiar_but_still_polysyllabic() {
        let options = ClassifyOptions {
            caps_as_names: true,
            ..ALL
        };
        let word = classify("Dangerously", options);
        assert!(word.is_name);
        assert!(word.is_polysyllabic);
        assert!(!word.is_complex_polysyllabic);
        assert_eq!(word.spache, Some(Familiarity::Name));
        assert_eq!(word.dale_chall, Some(Familiarity::Name));
    }

    #[test]
    fn capitals_count_without_the_name_rule() {
        let word = classify("Substantially", ALL);
        assert!(!word.is_name);
        assert!(word.is_complex_polysyllabic);
        assert_eq!(word.is_dale_chall_familiar(), Some(false));
    }

    #[test]
    fn familiarity_reasons() {
        let word = classify("Mother", ALL);
        assert_eq!(word.spache, Some(Familiarity::Listed));
        assert_eq!(word.dale_chall, Some(Familiarity::Listed));

        assert_eq!(classify("dogs", ALL).spache, Some(Familiarity::Inflection));
        assert_eq!(classify("liveliest", ALL).dale_chall, Some(Familiarity::Inflection));
        assert_eq!(classify("pricklier", ALL).dale_chall, Some(Familiarity::Unfamiliar));
        assert_eq!(classify("nation", ALL).dale_chall, Some(Familiarity::Unfamiliar));
    }

    #[test]
    fn written_numbers_are_familiar_to_dale_chall() {
        assert_eq!(classify("1,000", ALL).dale_chall, Some(Familiarity::Number));
        assert_eq!(classify("1776", ALL).dale_chall, Some(Familiarity::Number));
        assert_eq!(classify("0123", ALL).dale_chall, Some(Familiarity::NoLetters));
    }

    #[test]
    fn tokens_without_letters_are_trivially_familiar() {
        let word = classify("3.50", ALL);
        assert!(!word.is_polysyllabic);
        assert_eq!(word.is_spache_familiar(), Some(true));
        assert_eq!(word.is_dale_chall_familiar(), Some(true));
    }

    #[test]
    fn unrequested_lists_are_skipped() {
        let word = classify("nation", ClassifyOptions::default());
        assert_eq!(word.spache, None);
        assert_eq!(word.is_dale_chall_familiar(), None);
    }

    #[test]
    fn word_report_serializes_outcomes_in_kebab_case() {
        let report = WordReport::new("Battle-field", &classify("Battle-field", ALL));
        assert_eq!(report.normalized, "battlefield");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("dale_chall").is_some());
        assert!(json.get("spache").is_some());

        let bare = WordReport::new("cat", &classify("cat", ClassifyOptions::default()));
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("spache").is_none());
        assert_eq!(Familiarity::NoLetters.to_string(), "no-letters");
    }

    #[test]
    fn injected_lists_replace_the_bundled_ones() {
        let lists = WordLists::new(
            WordList::new(["nation"], &PorterStemmer),
            WordList::new(["nation"], &PorterStemmer),
        );
        let classifier = Classifier::new(&lists, &PorterStemmer, &SyllableEstimator, ALL);
        assert_eq!(classifier.classify("nations").spache, Some(Familiarity::Inflection));
        assert_eq!(classifier.classify("nation").dale_chall, Some(Familiarity::Listed));
        assert_eq!(classifier.classify("mother").dale_chall, Some(Familiarity::Unfamiliar));
    }
}
