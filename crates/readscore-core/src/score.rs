//! Scoring entry point.
//!
//! [`Scorer`] tokenizes a text, classifies every word, folds the results
//! into [`DocumentCounts`] and runs the selected formulas over them.
//! [`score`] does the same with a process-wide default scorer.

use std::borrow::Cow;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregator, DocumentCounts};
use crate::classify::{Classification, Classifier, ClassifyOptions, WordReport};
use crate::formulas::{self, Formula, round2};
use crate::stemmer::{PorterStemmer, Stemmer};
use crate::syllables::{SyllableCounter, SyllableEstimator};
use crate::tokenize::{EnglishTokenizer, Tokenizer};
use crate::word_lists::WordLists;

static DEFAULT_SCORER: LazyLock<Scorer> = LazyLock::new(Scorer::new);

/// Caller options for one scoring run.
///
/// An `only*` flag selects a single formula. Without one, every formula
/// except Spache runs unless its `skip*` flag is set. Flag names match the
/// camelCase keys accepted in JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreConfig {
    /// Include the flagged word lists in the result.
    pub difficult_words: bool,
    /// Treat words starting with a capital letter as proper names.
    pub caps_as_names: bool,
    /// Only compute Spache.
    pub only_spache: bool,
    /// Only compute Dale-Chall.
    pub only_dale_chall: bool,
    /// Only compute ARI.
    #[serde(rename = "onlyARI", alias = "onlyAri")]
    pub only_ari: bool,
    /// Only compute Coleman-Liau.
    pub only_coleman_liau: bool,
    /// Only compute Flesch-Kincaid.
    pub only_flesch_kincaid: bool,
    /// Only compute SMOG.
    #[serde(rename = "onlySMOG", alias = "onlySmog")]
    pub only_smog: bool,
    /// Only compute Gunning-Fog.
    pub only_gunning_fog: bool,
    /// Skip Dale-Chall.
    pub skip_dale_chall: bool,
    /// Skip ARI.
    #[serde(rename = "skipARI", alias = "skipAri")]
    pub skip_ari: bool,
    /// Skip Coleman-Liau.
    pub skip_coleman_liau: bool,
    /// Skip Flesch-Kincaid.
    pub skip_flesch_kincaid: bool,
    /// Skip SMOG.
    #[serde(rename = "skipSMOG", alias = "skipSmog")]
    pub skip_smog: bool,
    /// Skip Gunning-Fog.
    pub skip_gunning_fog: bool,
}

impl ScoreConfig {
    /// A configuration computing `formula` alone.
    pub fn only(formula: Formula) -> Self {
        let mut config = Self::default();
        *config.only_flag(formula) = true;
        config
    }

    /// A configuration computing the default formulas minus `formulas`.
    ///
    /// Spache is not a default formula, so skipping it changes nothing.
    pub fn skipping(formulas: &[Formula]) -> Self {
        let mut config = Self::default();
        for &formula in formulas {
            if let Some(flag) = config.skip_flag(formula) {
                *flag = true;
            }
        }
        config
    }

    /// Also return the flagged word lists.
    #[must_use]
    pub const fn with_difficult_words(mut self, enabled: bool) -> Self {
        self.difficult_words = enabled;
        self
    }

    /// Also treat capitalized words as proper names.
    #[must_use]
    pub const fn with_caps_as_names(mut self, enabled: bool) -> Self {
        self.caps_as_names = enabled;
        self
    }

    const fn only_flag(&mut self, formula: Formula) -> &mut bool {
        match formula {
            Formula::Spache => &mut self.only_spache,
            Formula::DaleChall => &mut self.only_dale_chall,
            Formula::Ari => &mut self.only_ari,
            Formula::ColemanLiau => &mut self.only_coleman_liau,
            Formula::FleschKincaid => &mut self.only_flesch_kincaid,
            Formula::Smog => &mut self.only_smog,
            Formula::GunningFog => &mut self.only_gunning_fog,
        }
    }

    const fn skip_flag(&mut self, formula: Formula) -> Option<&mut bool> {
        match formula {
            Formula::Spache => None,
            Formula::DaleChall => Some(&mut self.skip_dale_chall),
            Formula::Ari => Some(&mut self.skip_ari),
            Formula::ColemanLiau => Some(&mut self.skip_coleman_liau),
            Formula::FleschKincaid => Some(&mut self.skip_flesch_kincaid),
            Formula::Smog => Some(&mut self.skip_smog),
            Formula::GunningFog => Some(&mut self.skip_gunning_fog),
        }
    }

    const fn is_only(&self, formula: Formula) -> bool {
        match formula {
            Formula::Spache => self.only_spache,
            Formula::DaleChall => self.only_dale_chall,
            Formula::Ari => self.only_ari,
            Formula::ColemanLiau => self.only_coleman_liau,
            Formula::FleschKincaid => self.only_flesch_kincaid,
            Formula::Smog => self.only_smog,
            Formula::GunningFog => self.only_gunning_fog,
        }
    }

    const fn is_skipped(&self, formula: Formula) -> bool {
        match formula {
            Formula::Spache => true,
            Formula::DaleChall => self.skip_dale_chall,
            Formula::Ari => self.skip_ari,
            Formula::ColemanLiau => self.skip_coleman_liau,
            Formula::FleschKincaid => self.skip_flesch_kincaid,
            Formula::Smog => self.skip_smog,
            Formula::GunningFog => self.skip_gunning_fog,
        }
    }
}

/// The formulas and outputs one run will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSelection {
    /// Include the flagged word lists.
    pub difficult_words: bool,
    /// Treat capitalized words as proper names.
    pub caps_as_names: bool,
    enabled: [bool; Formula::ALL.len()],
}

impl ScoreSelection {
    /// Resolve a configuration.
    ///
    /// The first `only*` flag set, in [`Formula::ALL`] order, wins and
    /// disables everything else. Conflicting flags are never an error.
    pub fn resolve(config: &ScoreConfig) -> Self {
        let only = Formula::ALL.into_iter().find(|&f| config.is_only(f));
        let enabled = Formula::ALL.map(|f| match only {
            Some(chosen) => f == chosen,
            None => !config.is_skipped(f),
        });
        Self {
            difficult_words: config.difficult_words,
            caps_as_names: config.caps_as_names,
            enabled,
        }
    }

    /// Whether `formula` runs.
    pub fn includes(&self, formula: Formula) -> bool {
        Formula::ALL
            .iter()
            .position(|&f| f == formula)
            .is_some_and(|i| self.enabled[i])
    }

    /// The formulas that run, in [`Formula::ALL`] order.
    pub fn formulas(&self) -> impl Iterator<Item = Formula> + '_ {
        Formula::ALL.into_iter().filter(|&f| self.includes(f))
    }

    /// Classifier options implied by this selection.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            caps_as_names: self.caps_as_names,
            spache: self.includes(Formula::Spache),
            dale_chall: self.includes(Formula::DaleChall),
        }
    }
}

/// Counts and scores for one text.
///
/// Keys are camelCase in JSON and fields that were not computed are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Characters across all word tokens.
    pub letter_count: usize,
    /// Syllables across all word tokens.
    pub syllable_count: usize,
    /// Word tokens.
    pub word_count: usize,
    /// Sentences containing at least one word.
    pub sentence_count: usize,
    /// Polysyllabic words not treated as proper names.
    pub polysyllabic_word_count: usize,
    /// Those polysyllabic words, when word lists were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polysyllabic_words: Option<Vec<String>>,
    /// Distinct words unfamiliar to Spache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spache_unique_unfamiliar_word_count: Option<usize>,
    /// Those words, when word lists were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spache_unique_unfamiliar_words: Option<Vec<String>>,
    /// Spache grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spache: Option<f64>,
    /// Words difficult under Dale-Chall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dale_chall_difficult_word_count: Option<usize>,
    /// Those words, when word lists were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dale_chall_difficult_words: Option<Vec<String>>,
    /// Dale-Chall grade band, at most 17.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dale_chall: Option<u8>,
    /// Automated Readability Index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ari: Option<f64>,
    /// Coleman-Liau index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coleman_liau: Option<f64>,
    /// Flesch-Kincaid grade level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flesch_kincaid: Option<f64>,
    /// SMOG grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smog: Option<f64>,
    /// Gunning-Fog index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gunning_fog: Option<f64>,
}

impl ScoreResult {
    /// Assemble the result for `selection` from finished counts.
    pub fn from_counts(counts: DocumentCounts, selection: &ScoreSelection) -> Self {
        let spache = selection.includes(Formula::Spache);
        let dale_chall = selection.includes(Formula::DaleChall);
        let run = |formula: Formula, f: fn(&DocumentCounts) -> Option<f64>| {
            selection
                .includes(formula)
                .then(|| f(&counts))
                .flatten()
                .map(round2)
        };

        let scored = Self {
            spache: run(Formula::Spache, formulas::spache),
            dale_chall: dale_chall
                .then(|| formulas::dale_chall_raw(&counts))
                .flatten()
                .map(formulas::dale_chall_grade),
            ari: run(Formula::Ari, formulas::automated_readability),
            coleman_liau: run(Formula::ColemanLiau, formulas::coleman_liau),
            flesch_kincaid: run(Formula::FleschKincaid, formulas::flesch_kincaid),
            smog: run(Formula::Smog, formulas::smog),
            gunning_fog: run(Formula::GunningFog, formulas::gunning_fog),
            ..Self::default()
        };

        Self {
            letter_count: counts.letters,
            syllable_count: counts.syllables,
            word_count: counts.words,
            sentence_count: counts.sentences,
            polysyllabic_word_count: counts.complex_polysyllabic,
            polysyllabic_words: counts.polysyllabic_words,
            spache_unique_unfamiliar_word_count: spache.then_some(counts.unfamiliar),
            spache_unique_unfamiliar_words: counts.unfamiliar_words.filter(|_| spache),
            dale_chall_difficult_word_count: dale_chall.then_some(counts.difficult),
            dale_chall_difficult_words: counts.difficult_words.filter(|_| dale_chall),
            ..scored
        }
    }

    /// The reported value of one formula.
    pub fn get(&self, formula: Formula) -> Option<f64> {
        match formula {
            Formula::Spache => self.spache,
            Formula::DaleChall => self.dale_chall.map(f64::from),
            Formula::Ari => self.ari,
            Formula::ColemanLiau => self.coleman_liau,
            Formula::FleschKincaid => self.flesch_kincaid,
            Formula::Smog => self.smog,
            Formula::GunningFog => self.gunning_fog,
        }
    }
}

/// Scores texts against a set of word lists.
///
/// The type parameters are the stemmer, syllable counter and tokenizer.
/// Lists passed to [`with_collaborators`](Self::with_collaborators) must be
/// stem-indexed with the same stemmer.
pub struct Scorer<S = PorterStemmer, C = SyllableEstimator, T = EnglishTokenizer> {
    lists: Cow<'static, WordLists>,
    stemmer: S,
    syllables: C,
    tokenizer: T,
}

impl Scorer {
    /// A scorer over the bundled lists and the default collaborators.
    pub fn new() -> Self {
        Self {
            lists: Cow::Borrowed(WordLists::bundled()),
            stemmer: PorterStemmer,
            syllables: SyllableEstimator,
            tokenizer: EnglishTokenizer,
        }
    }

    /// A scorer over replacement lists built with [`PorterStemmer`].
    pub fn with_lists(lists: WordLists) -> Self {
        Self {
            lists: Cow::Owned(lists),
            ..Self::new()
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C, T> Scorer<S, C, T>
where
    S: Stemmer,
    C: SyllableCounter,
    T: Tokenizer,
{
    /// A scorer with every collaborator injected.
    pub fn with_collaborators(lists: WordLists, stemmer: S, syllables: C, tokenizer: T) -> Self {
        Self {
            lists: Cow::Owned(lists),
            stemmer,
            syllables,
            tokenizer,
        }
    }

    /// The word lists in use.
    pub fn lists(&self) -> &WordLists {
        &self.lists
    }

    /// Score `text`. Returns `None` for empty or whitespace-only input.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn score(&self, text: &str, config: &ScoreConfig) -> Option<ScoreResult> {
        if text.trim().is_empty() {
            return None;
        }
        let selection = ScoreSelection::resolve(config);
        let counts = self.count(text, &selection);
        tracing::debug!(
            words = counts.words,
            sentences = counts.sentences,
            difficult = counts.difficult,
            unfamiliar = counts.unfamiliar,
            "document counted"
        );
        Some(ScoreResult::from_counts(counts, &selection))
    }

    /// Tokenize and classify `text` into raw counts.
    pub fn count(&self, text: &str, selection: &ScoreSelection) -> DocumentCounts {
        let classifier = self.classifier(selection.classify_options());
        let mut tally = Aggregator::new(selection.difficult_words);
        for sentence in self.tokenizer.tokenize(text) {
            tally.visit_sentence();
            for word in sentence.words {
                tally.visit_word(word, &classifier.classify(word));
            }
        }
        tally.finish()
    }

    /// Classify a single word.
    pub fn classify(&self, word: &str, options: ClassifyOptions) -> Classification {
        self.classifier(options).classify(word)
    }

    /// Check each word against both lists.
    pub fn describe<'a>(
        &self,
        words: impl IntoIterator<Item = &'a str>,
        caps_as_names: bool,
    ) -> Vec<WordReport> {
        let classifier = self.classifier(ClassifyOptions {
            caps_as_names,
            spache: true,
            dale_chall: true,
        });
        words
            .into_iter()
            .map(|word| WordReport::new(word, &classifier.classify(word)))
            .collect()
    }

    fn classifier(&self, options: ClassifyOptions) -> Classifier<'_> {
        Classifier::new(&self.lists, &self.stemmer, &self.syllables, options)
    }
}

/// Score `text` with the bundled lists.
///
/// Empty and whitespace-only text has nothing to score and yields `None`.
/// Text with characters but no words (`"?!"`) scores zero counts.
///
/// ```
/// use readscore_core::{ScoreConfig, score};
///
/// let result = score("The cat sat on the mat.", &ScoreConfig::default()).unwrap();
/// assert_eq!(result.word_count, 6);
/// assert!(result.spache.is_none());
/// assert!(score("   ", &ScoreConfig::default()).is_none());
/// ```
pub fn score(text: &str, config: &ScoreConfig) -> Option<ScoreResult> {
    DEFAULT_SCORER.score(text, config)
}
