//! Markdown to prose conversion.
//!
//! Readability formulas only make sense over running sentences. Headings,
//! code, tables and images are dropped; every remaining block is closed with
//! a sentence terminator so that a bullet list without punctuation does not
//! collapse into one giant sentence.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning plain prose suitable for scoring.
///
/// Removes code blocks, inline code, HTML, YAML front matter, headings,
/// tables and image alt text. Keeps link text, emphasis text, blockquotes
/// and list items.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut prose = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => {
                skip_depth += 1;
            }
            Event::End(
                TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image,
            ) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => {
                close_block(&mut prose);
            }
            _ => {}
        }
    }

    let trimmed_len = prose.trim_end().len();
    prose.truncate(trimmed_len);
    tracing::debug!(prose_len = prose.len(), "markdown stripped");
    prose
}

/// End the current block as a sentence unless it already ends as one.
fn close_block(prose: &mut String) {
    let trimmed_len = prose.trim_end().len();
    if trimmed_len == 0 {
        prose.clear();
        return;
    }
    prose.truncate(trimmed_len);
    let ends_sentence = prose
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, '.' | '!' | '?' | '…' | '"' | '\'' | '”' | '’' | ')'));
    if !ends_sentence && !prose.ends_with(':') {
        prose.push('.');
    }
    prose.push('\n');
}

/// Strip YAML front matter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_code_blocks() {
        let input = "Some text.\n\n```rust\nlet x = 1;\n```\n\nMore text.";
        let prose = strip_to_prose(input);
        assert!(!prose.contains("let x"));
        assert_eq!(prose, "Some text.\nMore text.");
    }

    #[test]
    fn drops_frontmatter() {
        let input = "---\nstatus: accepted\ndate: 2026-02-07\n---\n\nSome text.";
        let prose = strip_to_prose(input);
        assert!(!prose.contains("status"));
        assert_eq!(prose, "Some text.");
    }

    #[test]
    fn drops_headings() {
        let input = "# Header\n\nSome text.\n\n## Subheader\n\nMore text.";
        let prose = strip_to_prose(input);
        assert!(!prose.contains("Header"));
        assert!(prose.contains("Some text."));
        assert!(prose.contains("More text."));
    }

    #[test]
    fn keeps_link_text_only() {
        let prose = strip_to_prose("Check [this link](https://example.com) for details.");
        assert_eq!(prose, "Check this link for details.");
    }

    #[test]
    fn drops_inline_code() {
        let prose = strip_to_prose("Use `foo()` to do things.");
        assert!(!prose.contains("foo()"));
        assert!(prose.starts_with("Use"));
    }

    #[test]
    fn drops_table_cells() {
        let input = "Text before.\n\n| Alpha | Beta |\n|---|---|\n| 1 | 2 |\n\nText after.";
        let prose = strip_to_prose(input);
        assert!(!prose.contains("Alpha"));
        assert_eq!(prose, "Text before.\nText after.");
    }

    #[test]
    fn drops_image_alt_text() {
        let prose = strip_to_prose("See ![a diagram of parts](parts.png) here.");
        assert!(!prose.contains("diagram"));
    }

    #[test]
    fn list_items_become_sentences() {
        let input = "- first item\n- second item\n- third item!\n";
        assert_eq!(strip_to_prose(input), "first item.\nsecond item.\nthird item!");
    }

    #[test]
    fn lead_in_colon_is_left_alone() {
        let input = "You will need:\n\n- a pen\n";
        assert_eq!(strip_to_prose(input), "You will need:\na pen.");
    }

    #[test]
    fn keeps_blockquote_text() {
        let prose = strip_to_prose("> This is a quote.\n\nRegular text.");
        assert_eq!(prose, "This is a quote.\nRegular text.");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(strip_to_prose("").is_empty());
        assert!(strip_to_prose("```\ncode only\n```\n").is_empty());
    }
}
