//! Folding word classifications into document totals.

use std::collections::HashSet;

use crate::classify::Classification;

/// Totals for one scored document.
///
/// The word lists are only filled when the caller asked for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCounts {
    /// Characters across all word tokens.
    pub letters: usize,
    /// Syllables across all word tokens.
    pub syllables: usize,
    /// Word tokens visited.
    pub words: usize,
    /// Sentences visited.
    pub sentences: usize,
    /// Words of three or more syllables.
    pub polysyllabic: usize,
    /// Polysyllabic words not treated as proper names.
    pub complex_polysyllabic: usize,
    /// Distinct surface forms unfamiliar to Spache.
    pub unfamiliar: usize,
    /// Occurrences of words difficult under Dale-Chall.
    pub difficult: usize,
    /// Complex polysyllabic words in reading order.
    pub polysyllabic_words: Option<Vec<String>>,
    /// Spache-unfamiliar words in order of first occurrence.
    pub unfamiliar_words: Option<Vec<String>>,
    /// Dale-Chall-difficult words in reading order.
    pub difficult_words: Option<Vec<String>>,
}

/// Accumulates [`DocumentCounts`] while tokens are visited.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: DocumentCounts,
    record_words: bool,
    seen_unfamiliar: HashSet<String>,
    unfamiliar_words: Vec<String>,
    difficult_words: Vec<String>,
    polysyllabic_words: Vec<String>,
}

impl Aggregator {
    /// Start an empty tally. With `record_words`, flagged words are kept.
    pub fn new(record_words: bool) -> Self {
        Self {
            record_words,
            ..Self::default()
        }
    }

    /// Count one sentence.
    pub const fn visit_sentence(&mut self) {
        self.counts.sentences += 1;
    }

    /// Fold one classified word token.
    pub fn visit_word(&mut self, raw: &str, word: &Classification) {
        let counts = &mut self.counts;
        counts.words += 1;
        counts.syllables += word.syllables;
        counts.letters += word.letters;

        if word.is_polysyllabic {
            counts.polysyllabic += 1;
        }
        if word.is_complex_polysyllabic {
            counts.complex_polysyllabic += 1;
            if self.record_words {
                self.polysyllabic_words.push(raw.to_string());
            }
        }

        if word.is_spache_familiar() == Some(false) && self.seen_unfamiliar.insert(raw.to_string())
        {
            counts.unfamiliar += 1;
            self.unfamiliar_words.push(raw.to_string());
        }

        if word.is_dale_chall_familiar() == Some(false) {
            counts.difficult += 1;
            if self.record_words {
                self.difficult_words.push(raw.to_string());
            }
        }
    }

    /// Finish the tally.
    pub fn finish(self) -> DocumentCounts {
        let record = |words: Vec<String>| self.record_words.then_some(words);
        DocumentCounts {
            polysyllabic_words: record(self.polysyllabic_words),
            unfamiliar_words: record(self.unfamiliar_words),
            difficult_words: record(self.difficult_words),
            ..self.counts
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Familiarity;

    fn word(syllables: usize, name: bool, familiar: bool) -> Classification {
        let outcome = if familiar {
            Familiarity::Listed
        } else {
            Familiarity::Unfamiliar
        };
        Classification {
            syllables,
            letters: 5,
            is_polysyllabic: syllables >= 3,
            is_complex_polysyllabic: syllables >= 3 && !name,
            is_name: name,
            spache: Some(outcome),
            dale_chall: Some(outcome),
        }
    }

    #[test]
    fn counts_sentences_words_and_letters() {
        let mut tally = Aggregator::new(false);
        tally.visit_sentence();
        tally.visit_word("hello", &word(2, false, true));
        tally.visit_word("world", &word(1, false, true));
        tally.visit_sentence();
        tally.visit_word("again", &word(2, false, true));

        let counts = tally.finish();
        assert_eq!(counts.sentences, 2);
        assert_eq!(counts.words, 3);
        assert_eq!(counts.letters, 15);
        assert_eq!(counts.syllables, 5);
        assert!(counts.unfamiliar_words.is_none());
    }

    #[test]
    fn unfamiliar_words_are_unique_by_surface_form() {
        let mut tally = Aggregator::new(true);
        for raw in ["Asked", "asked", "asked"] {
            tally.visit_word(raw, &word(1, false, false));
        }

        let counts = tally.finish();
        assert_eq!(counts.unfamiliar, 2);
        assert_eq!(counts.unfamiliar_words.unwrap(), ["Asked", "asked"]);
    }

    #[test]
    fn difficult_words_count_every_occurrence() {
        let mut tally = Aggregator::new(true);
        for raw in ["nation", "civil", "nation"] {
            tally.visit_word(raw, &word(2, false, false));
        }

        let counts = tally.finish();
        assert_eq!(counts.difficult, 3);
        assert_eq!(counts.difficult_words.unwrap(), ["nation", "civil", "nation"]);
    }

    #[test]
    fn names_are_left_out_of_the_polysyllabic_list() {
        let mut tally = Aggregator::new(true);
        tally.visit_word("Gettysburg", &word(3, true, true));
        tally.visit_word("government", &word(3, false, true));

        let counts = tally.finish();
        assert_eq!(counts.polysyllabic, 2);
        assert_eq!(counts.complex_polysyllabic, 1);
        assert_eq!(counts.polysyllabic_words.unwrap(), ["government"]);
    }

    #[test]
    fn unrequested_familiarity_is_not_counted() {
        let mut tally = Aggregator::new(true);
        let mut plain = word(1, false, false);
        plain.spache = None;
        plain.dale_chall = None;
        tally.visit_word("nation", &plain);

        let counts = tally.finish();
        assert_eq!(counts.unfamiliar, 0);
        assert_eq!(counts.difficult, 0);
    }
}
