use unicode_normalization::UnicodeNormalization;

/// Canonical text form shared by resumes and job descriptions.
///
/// NFKD decomposition, then every non-ASCII remnant is dropped (so `ç` folds to
/// `c` and characters with no ASCII base disappear), then whitespace runs
/// collapse to a single space and the ends are trimmed.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let ascii: String = text.nfkd().filter(|c| c.is_ascii()).collect();
    ascii
        .split(is_separator)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F,
/// which `char::is_whitespace` does not cover.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
