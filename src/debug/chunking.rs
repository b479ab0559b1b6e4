//! Splitting of oversized messages for length-limited outputs.

/// Splits `message` into segments of at most `max_len` chars.
///
/// The message is cut at every `\n` first (the newline itself is dropped), then
/// each line longer than `max_len` is cut into `max_len`-sized chunks. Empty
/// interior lines yield empty segments; a trailing newline yields none.
#[must_use]
pub fn split_for_output(message: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let len = message.len();
    let mut parts = Vec::new();
    let mut i = 0;

    while i < len {
        let newline = message[i..].find('\n').map_or(len, |offset| i + offset);
        loop {
            let end = message[i..newline]
                .char_indices()
                .nth(max_len)
                .map_or(newline, |(offset, _)| i + offset);
            parts.push(&message[i..end]);
            i = end;
            if i >= newline {
                break;
            }
        }
        // skip the '\n'
        i += 1;
    }

    parts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_long_line_into_max_sized_chunks() {
        let message = "a".repeat(10);
        assert_eq!(split_for_output(&message, 4), vec!["aaaa", "aaaa", "aa"]);
    }

    #[test]
    fn newlines_are_split_points_and_are_dropped() {
        assert_eq!(split_for_output("ab\ncdefg\n", 3), vec!["ab", "cde", "fg"]);
    }

    #[test]
    fn empty_interior_lines_are_kept() {
        assert_eq!(split_for_output("ab\n\ncd", 10), vec!["ab", "", "cd"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(split_for_output("ééééé", 2), vec!["éé", "éé", "é"]);
    }

    #[test]
    fn three_times_the_limit() {
        let limit = 4000;
        let message: String = (0..3 * limit).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let parts = split_for_output(&message, limit);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.chars().count() <= limit));
        assert_eq!(parts.concat(), message);
    }

    proptest! {
        #[test]
        fn chunks_reassemble_each_line(
            lines in prop::collection::vec("[a-z0-9 ]{0,40}", 1..6),
            max_len in 1usize..16,
        ) {
            let message = lines.join("\n");
            let parts = split_for_output(&message, max_len);

            prop_assert!(parts.iter().all(|p| p.chars().count() <= max_len));
            prop_assert!(parts.iter().all(|p| !p.contains('\n')));

            let mut expected = Vec::new();
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    // a final empty line is a trailing newline and yields nothing
                    if i + 1 < lines.len() {
                        expected.push(String::new());
                    }
                    continue;
                }
                let chars: Vec<char> = line.chars().collect();
                for chunk in chars.chunks(max_len) {
                    expected.push(chunk.iter().collect::<String>());
                }
            }
            prop_assert_eq!(parts, expected);
        }
    }
}
