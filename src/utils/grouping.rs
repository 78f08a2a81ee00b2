//! Output grouping.
//!
//! Ciphertext is traditionally written in blocks of five letters so that
//! word boundaries of the plaintext do not show.

/// Block width used for machine output.
pub const GROUP_WIDTH: usize = 5;

/// Splits `text` into blocks of `width` symbols separated by single spaces.
///
/// Whitespace already in `text` is dropped first. The last block may be
/// shorter than `width`. A `width` of 0 leaves the symbols ungrouped.
///
/// # Examples
///
/// ```
/// use enigma::utils::grouping::group;
///
/// assert_eq!(group("QVPQSOKOILPUBKJ", 5), "QVPQS OKOIL PUBKJ");
/// assert_eq!(group("ABCDEFG", 5), "ABCDE FG");
/// ```
pub fn group(text: &str, width: usize) -> String {
    let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if width == 0 {
        return symbols.into_iter().collect();
    }
    symbols
        .chunks(width)
        .map(|block| block.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple_has_no_trailing_space() {
        assert_eq!(group("ABCDEFGHIJ", 5), "ABCDE FGHIJ");
    }

    #[test]
    fn test_short_last_block() {
        assert_eq!(group("ABCDEFGHIJKL", 5), "ABCDE FGHIJ KL");
        assert_eq!(group("ABC", 5), "ABC");
    }

    #[test]
    fn test_empty() {
        assert_eq!(group("", 5), "");
    }

    #[test]
    fn test_existing_spaces_are_regrouped() {
        assert_eq!(group("AB CDE FG", 3), "ABC DEF G");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(group("AB CD", 0), "ABCD");
    }
}
