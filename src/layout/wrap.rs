use crate::font::TextMeasure;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Break `text` into lines no wider than `max_width` when set in `font` at `size`.
///
/// Lines break at whitespace; runs of whitespace collapse to a single space. A word wider
/// than a whole line is split between characters so nothing ever overflows. Explicit
/// newlines always start a new line, and a blank line in the input survives as an empty
/// line in the output. Text that is empty or only whitespace produces no lines at all.
///
/// The result depends only on the inputs, so the same text wraps identically every time.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    font: &M,
    size: Pt,
    max_width: Pt,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // replace tabs with spaces and normalize newlines
    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let space_width = font.text_width(" ", size);
    let mut lines: Vec<String> = Vec::new();

    for hard_line in text.trim_end().split('\n') {
        let mut current = String::new();
        let mut current_width = Pt(0.0);

        for word in hard_line.split_whitespace() {
            let word_width = font.text_width(word, size);

            if !current.is_empty() && current_width + space_width + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = Pt(0.0);
            }

            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                // no break point inside the word: fall back to character breaks
                for ch in word.chars() {
                    let ch_width = font.text_width(ch.encode_utf8(&mut [0; 4]), size);
                    if !current.is_empty() && current_width + ch_width > max_width {
                        lines.push(std::mem::take(&mut current));
                        current_width = Pt(0.0);
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard::StandardFont;
    use proptest::prelude::*;

    // Courier at 10pt: every character is exactly 6pt wide
    const COURIER: StandardFont = StandardFont::Courier;

    fn wrap(text: &str, chars_per_line: usize) -> Vec<String> {
        wrap_text(text, &COURIER, Pt(10.0), Pt(6.0 * chars_per_line as f32))
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("  \n\t ", 10).is_empty());
    }

    #[test]
    fn breaks_at_whitespace() {
        assert_eq!(wrap("the quick brown fox jumps", 10), vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn word_exactly_filling_a_line_fits() {
        assert_eq!(wrap("abcdefghij klm", 10), vec!["abcdefghij", "klm"]);
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        assert_eq!(wrap("ab abcdefghijklmnop", 8), vec!["ab", "abcdefgh", "ijklmnop"]);
    }

    #[test]
    fn keeps_hard_breaks_and_blank_lines() {
        assert_eq!(wrap("one\r\n\ntwo three", 20), vec!["one", "", "two three"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(wrap("a\t  b", 20), vec!["a b"]);
    }

    proptest! {
        #[test]
        fn wrapping_is_deterministic(text in "[a-z ]{0,200}", chars in 1usize..40) {
            prop_assert_eq!(wrap(&text, chars), wrap(&text, chars));
        }

        #[test]
        fn lines_never_exceed_the_width(text in "[a-zA-Z ]{0,300}", chars in 1usize..40) {
            for line in wrap(&text, chars) {
                prop_assert!(line.chars().count() <= chars, "{:?} is wider than {}", line, chars);
            }
        }

        #[test]
        fn wrapping_keeps_every_word(text in "[a-z]{1,8}( [a-z]{1,8}){0,30}") {
            let joined = wrap(&text, 12).join(" ");
            prop_assert_eq!(joined, text);
        }
    }
}
