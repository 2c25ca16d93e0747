//! Markdown processing utilities.
//!
//! Lyric sheets and poems are often kept as markdown, with section headings
//! ("Verse 1", "Chorus") between stanzas. Uses pulldown-cmark for proper
//! CommonMark parsing rather than regex-based stripping.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning the lyric lines.
///
/// Removes:
/// - YAML frontmatter
/// - Headings (section names are not sung)
/// - Code blocks and inline code
/// - Tables
/// - Image alt text
///
/// Preserves:
/// - Line breaks inside a paragraph (one lyric line each)
/// - Paragraph boundaries, as a blank line (stanza break)
/// - Link, emphasis, list item and blockquote text (without markers)
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_lyrics(text: &str) -> String {
    // Handle YAML frontmatter before parsing (pulldown-cmark doesn't know about it)
    let text = strip_frontmatter(text);

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(&text, options);

    let mut result = String::with_capacity(text.len());
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

            Event::Text(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => {
                result.push('\n');
            }
            Event::End(TagEnd::Item) if skip_depth == 0 => {
                result.push('\n');
            }
            Event::End(TagEnd::Paragraph) if skip_depth == 0 => {
                result.push_str("\n\n");
            }

            _ => {}
        }
    }

    result
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> String {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("---") {
        return text.to_string();
    }

    // Find the closing `---`
    let after_opening = &trimmed[3..];
    let Some(close_pos) = after_opening.find("\n---") else {
        return text.to_string();
    };

    // Skip past the closing `---` and its newline
    let remainder = &after_opening[close_pos + 4..];
    remainder
        .strip_prefix('\n')
        .unwrap_or(remainder)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_lines_within_a_stanza() {
        let input = "The clock struck nine\nI watched the time\n";
        let result = strip_to_lyrics(input);
        let lines: Vec<&str> = result.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["The clock struck nine", "I watched the time"]);
    }

    #[test]
    fn stanzas_are_separated_by_blank_line() {
        let input = "First stanza line.\n\nSecond stanza line.";
        let result = strip_to_lyrics(input);
        assert!(result.contains("First stanza line.\n\nSecond stanza line."));
    }

    #[test]
    fn removes_section_headings() {
        let input = "## Verse 1\n\nA line of verse.\n\n## Chorus\n\nA line of chorus.";
        let result = strip_to_lyrics(input);
        assert!(!result.contains("Verse 1"));
        assert!(!result.contains("Chorus"));
        assert!(result.contains("A line of verse."));
        assert!(result.contains("A line of chorus."));
    }

    #[test]
    fn removes_frontmatter() {
        let input = "---\ntitle: Night Song\nkey: D minor\n---\n\nSome words here.";
        let result = strip_to_lyrics(input);
        assert!(!result.contains("title"));
        assert!(result.contains("Some words here."));
    }

    #[test]
    fn removes_code_blocks() {
        let input = "Sing it.\n\n```\nchords: Am F C G\n```\n\nSing again.";
        let result = strip_to_lyrics(input);
        assert!(!result.contains("chords"));
        assert!(result.contains("Sing it."));
        assert!(result.contains("Sing again."));
    }

    #[test]
    fn removes_emphasis_markers() {
        let input = "This is **loud** and *soft* singing.";
        let result = strip_to_lyrics(input);
        assert!(result.contains("This is loud and soft singing."));
    }

    #[test]
    fn list_items_become_lines() {
        let input = "- first line\n- second line\n";
        let result = strip_to_lyrics(input);
        let lines: Vec<&str> = result.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(strip_to_lyrics("").is_empty());
    }
}
