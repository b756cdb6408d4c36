//! Word wrapping for article paragraphs
//!
//! Paragraph text pulled out of markup is full of newlines and indentation
//! from the page source. The wrapper treats all of it as plain spaces and
//! greedily packs words into lines no wider than the configured width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A utility for wrapping text at a fixed column width
#[derive(Debug, Clone)]
pub struct TextWrapper {
    /// Maximum display width of a wrapped line
    width: usize,
    /// Whether words wider than a whole line are split across lines
    break_long_words: bool,
    /// Whether hyphenated words may be split after the hyphen
    break_on_hyphens: bool,
}

impl TextWrapper {
    /// Creates a new TextWrapper with the specified width
    ///
    /// # Parameters
    /// * `width` - The maximum display width for wrapped lines
    pub fn new(width: usize) -> Self {
        Self {
            width,
            break_long_words: true,
            break_on_hyphens: true,
        }
    }

    /// Sets whether to break words that exceed the line width
    ///
    /// # Parameters
    /// * `break_long_words` - If false, an overlong word is left whole on its own line
    ///
    /// # Returns
    /// Self for method chaining
    pub fn break_long_words(mut self, break_long_words: bool) -> Self {
        self.break_long_words = break_long_words;
        self
    }

    /// Sets whether hyphenated words are candidates for line breaks
    pub fn break_on_hyphens(mut self, break_on_hyphens: bool) -> Self {
        self.break_on_hyphens = break_on_hyphens;
        self
    }

    /// Wraps text at the configured width
    ///
    /// # Parameters
    /// * `text` - The text to wrap
    ///
    /// # Returns
    /// The wrapped lines, without trailing newlines. Blank text gives no lines.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let width = self.width.max(1);

        // Chunks are consumed from the back.
        let mut chunks = self.split_chunks(text);
        chunks.reverse();

        let mut lines = Vec::new();
        while !chunks.is_empty() {
            let mut line: Vec<String> = Vec::new();
            let mut line_width = 0;

            while chunks.last().map_or(false, |c| is_space(c)) && line.is_empty() {
                chunks.pop();
            }

            while let Some(chunk) = chunks.last() {
                let chunk_width = chunk.width();
                if line_width + chunk_width <= width {
                    line_width += chunk_width;
                    if let Some(chunk) = chunks.pop() {
                        line.push(chunk);
                    }
                } else {
                    break;
                }
            }

            if chunks.last().map_or(false, |c| c.width() > width) {
                self.handle_long_word(&mut chunks, &mut line, line_width, width);
            }

            while line.last().map_or(false, |c| is_space(c)) {
                line.pop();
            }

            if !line.is_empty() {
                lines.push(line.concat());
            }
        }

        lines
    }

    /// Splits an overlong word so that its head fills the rest of the line
    fn handle_long_word(
        &self,
        chunks: &mut Vec<String>,
        line: &mut Vec<String>,
        line_width: usize,
        width: usize,
    ) {
        let space_left = width.saturating_sub(line_width).max(1);

        if self.break_long_words {
            if let Some(word) = chunks.pop() {
                let (head, tail) = split_at_width(&word, space_left);
                line.push(head);
                if !tail.is_empty() {
                    chunks.push(tail);
                }
            }
        } else if line.is_empty() {
            if let Some(word) = chunks.pop() {
                line.push(word);
            }
        }
    }

    /// Breaks text into alternating runs of spaces and words
    fn split_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_is_space = false;

        for ch in text.chars() {
            let ch_is_space = ch.is_whitespace();
            if !current.is_empty() && ch_is_space != current_is_space {
                chunks.push(std::mem::take(&mut current));
            }
            current.push(if ch_is_space { ' ' } else { ch });
            current_is_space = ch_is_space;
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        if !self.break_on_hyphens {
            return chunks;
        }

        chunks
            .into_iter()
            .flat_map(|chunk| {
                if is_space(&chunk) {
                    vec![chunk]
                } else {
                    split_hyphenated(&chunk)
                }
            })
            .collect()
    }
}

fn is_space(chunk: &str) -> bool {
    chunk.chars().all(|c| c == ' ')
}

/// Splits "well-known" into "well-" and "known". Leading, trailing and
/// doubled hyphens are not break points.
fn split_hyphenated(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);
        let breakable = ch == '-'
            && i > 0
            && chars[i - 1].is_alphanumeric()
            && chars.get(i + 1).map_or(false, |next| next.is_alphabetic());
        if breakable {
            parts.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

/// Splits at a grapheme boundary so the head is at most `width` columns.
/// The head always holds at least one grapheme.
fn split_at_width(word: &str, width: usize) -> (String, String) {
    let mut head_width = 0;
    let mut split = 0;

    for (offset, grapheme) in word.grapheme_indices(true) {
        let grapheme_width = grapheme.width();
        if head_width + grapheme_width > width && offset > 0 {
            break;
        }
        head_width += grapheme_width;
        split = offset + grapheme.len();
    }

    (word[..split].to_string(), word[split..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_line() {
        let wrapper = TextWrapper::new(80);
        assert_eq!(wrapper.wrap("A short paragraph."), vec!["A short paragraph."]);
    }

    #[test]
    fn test_basic_wrapping() {
        let wrapper = TextWrapper::new(20);
        let input = "This is a test of the line wrapping functionality";
        let wrapped = wrapper.wrap(input);

        assert_eq!(
            wrapped,
            vec!["This is a test of", "the line wrapping", "functionality"]
        );
    }

    #[test]
    fn test_lines_never_exceed_width_or_split_words() {
        let wrapper = TextWrapper::new(80);
        let input = "Officials said on Tuesday that the talks, which had stalled for \
                     months over the question of border crossings, would resume next \
                     week in the capital with observers from several neighbouring \
                     countries invited to attend.";
        let wrapped = wrapper.wrap(input);

        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(line.width() <= 80, "line too wide: {:?}", line);
            assert_eq!(line.trim(), line);
        }
        let rejoined = wrapped.join(" ");
        let original: Vec<&str> = input.split_whitespace().collect();
        assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), original);
    }

    #[test]
    fn test_markup_whitespace_is_normalised() {
        let wrapper = TextWrapper::new(80);
        let wrapped = wrapper.wrap("\n      Leading\tand\ntrailing   \n");
        assert_eq!(wrapped, vec!["Leading and trailing"]);
    }

    #[test]
    fn test_long_words() {
        let wrapper = TextWrapper::new(10);
        let input = "Supercalifragilisticexpialidocious";

        let wrapped = wrapper.wrap(input);
        assert_eq!(wrapped, vec!["Supercalif", "ragilistic", "expialidoc", "ious"]);

        let wrapper = wrapper.break_long_words(false);
        let wrapped = wrapper.wrap(input);
        assert_eq!(wrapped, vec![input]);
    }

    #[test]
    fn test_long_word_fills_current_line() {
        let wrapper = TextWrapper::new(10);
        let wrapped = wrapper.wrap("ab abcdefghijklm");
        assert_eq!(wrapped, vec!["ab abcdefg", "hijklm"]);
    }

    #[test]
    fn test_hyphen_breaks() {
        let wrapper = TextWrapper::new(12);
        let wrapped = wrapper.wrap("the well-known story");
        assert_eq!(wrapped, vec!["the well-", "known story"]);

        let wrapper = wrapper.break_on_hyphens(false);
        let wrapped = wrapper.wrap("the well-known story");
        assert_eq!(wrapped, vec!["the", "well-known", "story"]);
    }

    #[test]
    fn test_wide_characters_count_double() {
        let wrapper = TextWrapper::new(10);
        let wrapped = wrapper.wrap("こんにちは世界");
        assert_eq!(wrapped, vec!["こんにちは", "世界"]);
    }

    #[test]
    fn test_empty_text() {
        let wrapper = TextWrapper::new(10);
        assert!(wrapper.wrap("").is_empty());
        assert!(wrapper.wrap(" \n\t ").is_empty());
    }
}
