//! Stemming for matching inflected words against base word lists.
//!
//! The familiarity lists only hold base forms, so "dedicated" has to be
//! compared with "dedicate" through a shared stem. The [`Stemmer`] trait is
//! the seam; [`PorterStemmer`] is the classic Porter (1980) algorithm.

/// Reduces a word to its morphological stem.
pub trait Stemmer: Send + Sync {
    /// Stem `word`. The result is lower-case.
    fn stem(&self, word: &str) -> String;
}

/// The Porter suffix-stripping stemmer.
///
/// ```
/// use readscore_core::stemmer::{PorterStemmer, Stemmer};
///
/// assert_eq!(PorterStemmer.stem("running"), "run");
/// assert_eq!(PorterStemmer.stem("generalization"), "gener");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        porter(word)
    }
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Stem a single word with the Porter algorithm.
fn porter(word: &str) -> String {
    let mut w: Vec<char> = word.to_lowercase().chars().collect();
    if w.len() < 3 {
        return w.into_iter().collect();
    }

    // A leading `y` is a consonant for every measure below.
    let leading_y = w[0] == 'y';
    if leading_y {
        w[0] = 'Y';
    }

    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    replace_longest(&mut w, STEP2);
    replace_longest(&mut w, STEP3);
    step4(&mut w);
    step5(&mut w);

    if leading_y && w.first() == Some(&'Y') {
        w[0] = 'y';
    }
    w.into_iter().collect()
}

fn step1a(w: &mut Vec<char>) {
    if (w.len() > 4 && ends_with(w, "sses")) || (w.len() > 3 && ends_with(w, "ies")) {
        w.truncate(w.len() - 2);
    } else if w.len() > 2 && ends_with(w, "s") && w[w.len() - 2] != 's' {
        w.pop();
    }
}

fn step1b(w: &mut Vec<char>) {
    if w.len() > 3 && ends_with(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.pop();
        }
        return;
    }

    let suffix_len = if w.len() > 2 && ends_with(w, "ed") {
        2
    } else if w.len() > 3 && ends_with(w, "ing") {
        3
    } else {
        return;
    };

    let stem_len = w.len() - suffix_len;
    if !has_vowel(&w[..stem_len]) {
        return;
    }
    w.truncate(stem_len);

    if ends_with(w, "at") || ends_with(w, "bl") || ends_with(w, "iz") {
        w.push('e');
    } else if ends_double_consonant(w) {
        w.pop();
    } else if is_cvc(w) {
        w.push('e');
    }
}

fn step1c(w: &mut [char]) {
    let n = w.len();
    if n > 1 && w[n - 1] == 'y' && has_vowel(&w[..n - 1]) {
        w[n - 1] = 'i';
    }
}

/// Swap the longest matching suffix for its replacement when the remaining
/// stem has a measure above zero. A shorter suffix is never tried instead.
fn replace_longest(w: &mut Vec<char>, table: &[(&'static str, &'static str)]) {
    let word: &[char] = w;
    let Some(&(suffix, replacement)) = table
        .iter()
        .filter(|(suffix, _)| word.len() > suffix.len() && ends_with(word, suffix))
        .max_by_key(|(suffix, _)| suffix.len())
    else {
        return;
    };

    let stem_len = w.len() - suffix.len();
    if measure(&w[..stem_len]) > 0 {
        w.truncate(stem_len);
        w.extend(replacement.chars());
    }
}

fn step4(w: &mut Vec<char>) {
    let word: &[char] = w;
    let longest = STEP4
        .iter()
        .copied()
        .filter(|suffix| word.len() > suffix.len() && ends_with(word, suffix))
        .max_by_key(|suffix| suffix.len());

    if let Some(suffix) = longest {
        let stem_len = w.len() - suffix.len();
        if measure(&w[..stem_len]) > 1 {
            w.truncate(stem_len);
        }
    } else if w.len() > 4 && ends_with(w, "ion") && matches!(w[w.len() - 4], 's' | 't') {
        let stem_len = w.len() - 3;
        if measure(&w[..stem_len]) > 1 {
            w.truncate(stem_len);
        }
    }
}

fn step5(w: &mut Vec<char>) {
    if w.len() > 1 && ends_with(w, "e") {
        let stem = &w[..w.len() - 1];
        if measure(stem) > 1 || (is_measure_one(stem) && !is_cvc(stem)) {
            w.pop();
        }
    }
    if ends_with(w, "ll") && measure(w) > 1 {
        w.pop();
    }
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    w.len() >= suffix.len() && w[w.len() - suffix.len()..].iter().copied().eq(suffix.chars())
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

const fn is_vowel_or_y(c: char) -> bool {
    is_vowel(c) || c == 'y'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Consonant,
    Vowel,
}

/// Split a word into alternating consonant and vowel runs.
///
/// A consonant run opens on any non-vowel and continues through letters
/// other than vowels and `y`; a vowel run opens on a vowel or `y` and
/// continues through vowels only.
fn runs(w: &[char]) -> Vec<Run> {
    let mut runs = Vec::new();
    let Some(&first) = w.first() else {
        return runs;
    };

    let mut kind = if is_vowel(first) {
        Run::Vowel
    } else {
        Run::Consonant
    };
    let mut i = 0;
    while i < w.len() {
        i += 1;
        match kind {
            Run::Consonant => {
                while i < w.len() && !is_vowel_or_y(w[i]) {
                    i += 1;
                }
            }
            Run::Vowel => {
                while i < w.len() && is_vowel(w[i]) {
                    i += 1;
                }
            }
        }
        runs.push(kind);
        kind = match kind {
            Run::Consonant => Run::Vowel,
            Run::Vowel => Run::Consonant,
        };
    }
    runs
}

/// The Porter measure: number of vowel runs followed by a consonant run.
fn measure(w: &[char]) -> usize {
    runs(w)
        .windows(2)
        .filter(|pair| matches!(pair, [Run::Vowel, Run::Consonant]))
        .count()
}

/// Exactly `[C]VC[V]`.
fn is_measure_one(w: &[char]) -> bool {
    let runs = runs(w);
    let rest = match runs.first() {
        Some(Run::Consonant) => &runs[1..],
        _ => &runs[..],
    };
    matches!(
        rest,
        [Run::Vowel, Run::Consonant] | [Run::Vowel, Run::Consonant, Run::Vowel]
    )
}

fn has_vowel(w: &[char]) -> bool {
    runs(w).contains(&Run::Vowel)
}

fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2
        && w[n - 1] == w[n - 2]
        && !matches!(w[n - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'l' | 's' | 'z')
}

/// Consonant run, single vowel, then a final consonant other than `w`, `x`, `y`.
fn is_cvc(w: &[char]) -> bool {
    let n = w.len();
    if n < 3 || is_vowel(w[0]) {
        return false;
    }
    let mut i = 1;
    while i < n && !is_vowel_or_y(w[i]) {
        i += 1;
    }
    i + 2 == n && !matches!(w[n - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'w' | 'x' | 'y')
}
