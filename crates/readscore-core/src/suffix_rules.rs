//! Inflection rules that extend the familiar-word lists.
//!
//! A word missing from a list can still be familiar when it is a regular
//! inflection of a listed word. Spache and Dale-Chall define their accepted
//! inflections differently, and the two rule sets are kept apart.

use crate::stemmer::Stemmer;
use crate::word_lists::WordList;

/// Endings that make a word a Spache inflection candidate.
const SPACHE_ENDINGS: &[&str] = &["s", "ing", "ed"];

/// Endings that make a word a Dale-Chall inflection candidate.
const DALE_CHALL_ENDINGS: &[&str] = &["s", "ing", "n", "ed", "ly", "er", "est"];

/// Endings stripped before stemming a Dale-Chall candidate, longest of each
/// family first. Only the first match is removed.
const DALE_CHALL_REMOVABLE: &[&str] = &["liest", "lier", "iest", "ier", "est", "er", "ly", "n"];

fn ends_with_any(word: &str, endings: &[&str]) -> bool {
    endings.iter().any(|ending| word.ends_with(*ending))
}

/// Whether a normalized word is a familiar Spache inflection.
///
/// The word must end in `s`, `ing` or `ed` and its stem must be the stem of
/// a listed word.
pub fn spache_inflection<S: Stemmer + ?Sized>(
    normalized: &str,
    list: &WordList,
    stemmer: &S,
) -> bool {
    ends_with_any(normalized, SPACHE_ENDINGS) && list.has_stem(&stemmer.stem(normalized))
}

/// Whether a normalized word is a familiar Dale-Chall inflection.
///
/// The checks run in a fixed order:
///
/// 1. the word must end in one of `s`, `ing`, `n`, `ed`, `ly`, `er`, `est`;
/// 2. the first removable ending (`liest`, `lier`, `iest`, `ier`, `est`,
///    `er`, `ly`, `n`) is cut off and the remainder stemmed;
/// 3. that stem must be in the list's stem index;
/// 4. a `-lier` or `-liest` word is accepted only when its `-ly` base is
///    listed verbatim, so "liveliest" passes through "lively" while
///    "pricklier" fails without "prickly".
pub fn dale_chall_inflection<S: Stemmer + ?Sized>(
    normalized: &str,
    list: &WordList,
    stemmer: &S,
) -> bool {
    if !ends_with_any(normalized, DALE_CHALL_ENDINGS) {
        return false;
    }

    let candidate = DALE_CHALL_REMOVABLE
        .iter()
        .find_map(|ending| normalized.strip_suffix(*ending))
        .unwrap_or(normalized);
    if !list.has_stem(&stemmer.stem(candidate)) {
        return false;
    }

    match ly_base(normalized) {
        Some(base) => list.is_listed(&base),
        None => true,
    }
}

/// Rewrite a trailing `lier`/`liest` to `ly`.
fn ly_base(word: &str) -> Option<String> {
    word.strip_suffix("liest")
        .or_else(|| word.strip_suffix("lier"))
        .map(|base| format!("{base}ly"))
}
