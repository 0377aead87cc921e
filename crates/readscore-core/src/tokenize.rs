//! Sentence and word segmentation.
//!
//! Produces borrowed views into the input: a [`Sentence`] is a slice of the
//! original text plus the word tokens inside it, in order. Tokens keep their
//! raw surface form (case, inner apostrophes, hyphens).

/// One sentence of the input and the words it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// The sentence text with surrounding whitespace trimmed.
    pub text: &'a str,
    /// Word tokens in reading order.
    pub words: Vec<&'a str>,
}

/// Splits text into sentences of word tokens.
pub trait Tokenizer: Send + Sync {
    /// Segment `text`. Sentences without any word are not returned.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Sentence<'a>>;
}

/// Punctuation-driven tokenizer for English prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTokenizer;

impl Tokenizer for EnglishTokenizer {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let sentences: Vec<Sentence<'a>> = split_sentences(text)
            .into_iter()
            .filter_map(|raw| {
                let words = split_words(raw);
                (!words.is_empty()).then(|| Sentence {
                    text: raw.trim(),
                    words,
                })
            })
            .collect();
        tracing::debug!(sentences = sentences.len(), "tokenized");
        sentences
    }
}

const fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

const fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | ')' | ']')
}

/// Split text at sentence terminators.
///
/// Runs of terminators and any closing quotes or brackets after them stay
/// with the sentence they end. A terminator is not a boundary when the next
/// non-space character is lower-case, or when a period is followed by a digit.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let offset = |i: usize| chars.get(i).map_or(text.len(), |&(pos, _)| pos);

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        let terminator = chars[i].1;
        if !is_terminator(terminator) {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < chars.len() && (is_terminator(chars[end].1) || is_closer(chars[end].1)) {
            end += 1;
        }

        let next = chars[end..]
            .iter()
            .map(|&(_, c)| c)
            .find(|c| !c.is_whitespace());
        let continues = next.is_some_and(|c| {
            c.is_lowercase() || (terminator == '.' && c.is_ascii_digit())
        });

        if !continues {
            let boundary = offset(end);
            sentences.push(&text[start..boundary]);
            start = boundary;
        }
        i = end;
    }

    if !text[start..].trim().is_empty() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Extract word tokens from text.
///
/// A word is a run of alphanumeric characters. It continues across `'`, `’`,
/// `-` or `&` when another alphanumeric follows, and across `,` or `.`
/// between two digits ("1,000", "3.14").
pub fn split_words(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let offset = |i: usize| chars.get(i).map_or(text.len(), |&(pos, _)| pos);
    let alnum_at = |i: usize| chars.get(i).is_some_and(|&(_, c)| c.is_alphanumeric());
    let digit_at = |i: usize| chars.get(i).is_some_and(|&(_, c)| c.is_ascii_digit());

    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !alnum_at(i) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() {
            let c = chars[j].1;
            let joins = c.is_alphanumeric()
                || (matches!(c, '\'' | '’' | '-' | '&') && alnum_at(j + 1))
                || (matches!(c, ',' | '.') && digit_at(j - 1) && digit_at(j + 1));
            if !joins {
                break;
            }
            j += 1;
        }

        words.push(&text[offset(i)..offset(j)]);
        i = j;
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        EnglishTokenizer
            .tokenize(text)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn splits_on_terminators() {
        assert_eq!(
            sentences("The cat sat on the mat. The dog ran fast!"),
            ["The cat sat on the mat.", "The dog ran fast!"]
        );
    }

    #[test]
    fn lowercase_continuation_is_not_a_boundary() {
        assert_eq!(sentences("Well… what would you do?"), ["Well… what would you do?"]);
        assert_eq!(
            sentences("\"Stop!\" she said. Then she left."),
            ["\"Stop!\" she said.", "Then she left."]
        );
    }

    #[test]
    fn closing_quotes_stay_with_their_sentence() {
        assert_eq!(
            sentences("“Did you have any fun? Tell me. What did you do?” And Sally"),
            ["“Did you have any fun?", "Tell me.", "What did you do?”", "And Sally"]
        );
    }

    #[test]
    fn decimals_do_not_split() {
        let found = EnglishTokenizer.tokenize("It cost 3.50 today.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].words, ["It", "cost", "3.50", "today"]);
    }

    #[test]
    fn trailing_text_is_a_sentence() {
        assert_eq!(sentences("One. Two"), ["One.", "Two"]);
    }

    #[test]
    fn wordless_sentences_are_dropped() {
        assert_eq!(sentences("Hello. -- ... !"), ["Hello."]);
        assert!(EnglishTokenizer.tokenize("   ").is_empty());
    }

    #[test]
    fn words_keep_joined_forms() {
        assert_eq!(
            split_words("We can't rest on a battle-field at AT&T, sir's 1,000 men."),
            ["We", "can't", "rest", "on", "a", "battle-field", "at", "AT&T", "sir's", "1,000", "men"]
        );
    }

    #[test]
    fn dangling_joiners_are_not_part_of_words() {
        assert_eq!(split_words("dedicate -- we 'can' end-"), ["dedicate", "we", "can", "end"]);
        assert_eq!(split_words("1,2 and 3, 4"), ["1,2", "and", "3", "4"]);
    }

    #[test]
    fn curly_apostrophes_join() {
        assert_eq!(split_words("don’t"), ["don’t"]);
    }
}
