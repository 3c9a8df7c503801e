//! Greedy word wrapping for generated comment blocks.

/// Wraps `text` into lines of at most `width` characters, each starting
/// with `prefix`.
///
/// Every input line is wrapped on its own, so bullet items keep their
/// own lines. Whitespace-only input lines are dropped. Words longer than
/// the room left after the prefix are split.
#[must_use]
pub fn wrap_with_prefix(text: &str, width: usize, prefix: &str) -> Vec<String> {
    let room = width.saturating_sub(prefix.chars().count()).max(1);
    let mut lines = Vec::new();

    for block in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in block.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= room {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(format!("{prefix}{current}"));
                current.clear();
                current_len = 0;
            }

            if word_len <= room {
                current.push_str(word);
                current_len = word_len;
                continue;
            }

            let chars: Vec<char> = word.chars().collect();
            let mut pieces = chars.chunks(room).peekable();
            while let Some(piece) = pieces.next() {
                let piece: String = piece.iter().collect();
                if pieces.peek().is_some() {
                    lines.push(format!("{prefix}{piece}"));
                } else {
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
        }

        if current_len > 0 {
            lines.push(format!("{prefix}{current}"));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "        // ";

    #[test]
    fn short_text_fits_on_one_line() {
        assert_eq!(
            wrap_with_prefix("Access is denied.", 80, PREFIX),
            vec!["        // Access is denied."]
        );
    }

    #[test]
    fn long_text_wraps_at_width() {
        let text = "The caller does not have the access rights required to perform the \
                    requested operation on the target mailbox folder.";
        let lines = wrap_with_prefix(text, 80, PREFIX);
        assert_eq!(
            lines,
            vec![
                "        // The caller does not have the access rights required to perform the",
                "        // requested operation on the target mailbox folder.",
            ]
        );
        assert!(lines.iter().all(|line| line.chars().count() <= 80));
    }

    #[test]
    fn each_input_line_wraps_separately() {
        let lines = wrap_with_prefix("Causes:\n* first point\n* second point", 80, "// ");
        assert_eq!(
            lines,
            vec!["// Causes:", "// * first point", "// * second point"]
        );
    }

    #[test]
    fn empty_text_yields_no_lines() {
        assert!(wrap_with_prefix("", 80, PREFIX).is_empty());
        assert!(wrap_with_prefix("  \n ", 80, PREFIX).is_empty());
    }

    #[test]
    fn overlong_words_are_split() {
        let lines = wrap_with_prefix("abcdefghij xy", 7, "// ");
        assert_eq!(lines, vec!["// abcd", "// efgh", "// ij", "// xy"]);
    }
}
