//! Familiar-word lists for the Spache and Dale-Chall formulas.
//!
//! Each [`WordList`] holds the raw entries and a [`StemIndex`] of their
//! stems, both built once when the list is constructed and immutable after.
//! The bundled lists are compiled into the binary; [`WordLists::bundled`]
//! builds them on first use and shares them for the rest of the process.

use std::collections::HashSet;
use std::sync::LazyLock;

use camino::Utf8Path;

use crate::error::{WordListError, WordListResult};
use crate::stemmer::{PorterStemmer, Stemmer};

const SPACHE: &str = include_str!("../data/spache.txt");
const DALE_CHALL: &str = include_str!("../data/dale-chall.txt");

static BUNDLED: LazyLock<WordLists> = LazyLock::new(|| {
    let lists = WordLists::new(
        WordList::from_text(SPACHE, &PorterStemmer),
        WordList::from_text(DALE_CHALL, &PorterStemmer),
    );
    tracing::debug!(
        spache = lists.spache.len(),
        dale_chall = lists.dale_chall.len(),
        "bundled word lists built"
    );
    lists
});

/// Which familiarity list to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// The Spache list of words familiar to early readers.
    Spache,
    /// The Dale-Chall list of about 3,000 words known to fourth graders.
    DaleChall,
}

impl ListKind {
    /// Returns the list name in kebab-case.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spache => "spache",
            Self::DaleChall => "dale-chall",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of stems of every list entry that has no apostrophe.
///
/// Contractions are left out: they only ever match the raw list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StemIndex(HashSet<String>);

impl StemIndex {
    fn build<'a, S>(entries: impl IntoIterator<Item = &'a String>, stemmer: &S) -> Self
    where
        S: Stemmer + ?Sized,
    {
        Self(
            entries
                .into_iter()
                .filter(|entry| !entry.contains('\''))
                .map(|entry| stemmer.stem(entry))
                .collect(),
        )
    }

    /// Whether `stem` is the stem of some listed word.
    pub fn contains(&self, stem: &str) -> bool {
        self.0.contains(stem)
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the index holds no stems.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One familiarity list and its stem index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    entries: HashSet<String>,
    stems: StemIndex,
}

impl WordList {
    /// Build a list from entries exactly as given.
    pub fn new<I, W, S>(words: I, stemmer: &S) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
        S: Stemmer + ?Sized,
    {
        let entries: HashSet<String> = words.into_iter().map(Into::into).collect();
        let stems = StemIndex::build(&entries, stemmer);
        Self { entries, stems }
    }

    /// Parse a list with one word per line.
    ///
    /// Entries are trimmed and lower-cased. Blank lines and lines starting
    /// with `#` are skipped.
    pub fn from_text<S: Stemmer + ?Sized>(text: &str, stemmer: &S) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase);
        Self::new(words, stemmer)
    }

    /// Load a replacement list from a file in the [`from_text`](Self::from_text) format.
    #[tracing::instrument(skip(stemmer))]
    pub fn from_file<S: Stemmer + ?Sized>(path: &Utf8Path, stemmer: &S) -> WordListResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WordListError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_text(&text, stemmer);
        if list.is_empty() {
            return Err(WordListError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(words = list.len(), stems = list.stems.len(), "word list loaded");
        Ok(list)
    }

    /// Exact membership of an already normalized word.
    pub fn is_listed(&self, normalized: &str) -> bool {
        self.entries.contains(normalized)
    }

    /// Whether `stem` belongs to the stem index.
    pub fn has_stem(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    /// The stem index built from this list.
    pub const fn stem_index(&self) -> &StemIndex {
        &self.stems
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The Spache and Dale-Chall lists used together by the classifier.
#[derive(Debug, Clone)]
pub struct WordLists {
    /// Words familiar under the Spache formula.
    pub spache: WordList,
    /// Words familiar under the Dale-Chall formula.
    pub dale_chall: WordList,
}

impl WordLists {
    /// Pair two lists.
    pub const fn new(spache: WordList, dale_chall: WordList) -> Self {
        Self { spache, dale_chall }
    }

    /// The lists shipped with the crate, stemmed with [`PorterStemmer`].
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Replace either bundled list with one read from disk.
    ///
    /// Returns `None` when neither path is given.
    pub fn load(
        spache: Option<&Utf8Path>,
        dale_chall: Option<&Utf8Path>,
    ) -> WordListResult<Option<Self>> {
        if spache.is_none() && dale_chall.is_none() {
            return Ok(None);
        }
        let load = |path: Option<&Utf8Path>, kind: ListKind| match path {
            Some(path) => WordList::from_file(path, &PorterStemmer),
            None => Ok(BUNDLED.get(kind).clone()),
        };
        Ok(Some(Self::new(
            load(spache, ListKind::Spache)?,
            load(dale_chall, ListKind::DaleChall)?,
        )))
    }

    /// The list for `kind`.
    pub const fn get(&self, kind: ListKind) -> &WordList {
        match kind {
            ListKind::Spache => &self.spache,
            ListKind::DaleChall => &self.dale_chall,
        }
    }

    /// Exact membership of a normalized word in one list.
    pub fn is_listed(&self, kind: ListKind, normalized: &str) -> bool {
        self.get(kind).is_listed(normalized)
    }

    /// The stem index of one list.
    pub const fn stem_index(&self, kind: ListKind) -> &StemIndex {
        self.get(kind).stem_index()
    }
}

impl Default for WordLists {
    fn default() -> Self {
        BUNDLED.clone()
    }
}
