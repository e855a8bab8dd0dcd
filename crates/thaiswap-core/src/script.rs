// Thaiswap Script Detection
// Decides which side of the layout a piece of text was typed on

use std::fmt;

/// First code point of the Thai Unicode block
pub const THAI_BLOCK_START: char = '\u{0E00}';
/// Last code point of the Thai Unicode block
pub const THAI_BLOCK_END: char = '\u{0E7F}';

/// Script a piece of text is considered to be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// At least one code point from the Thai block is present
    Thai,
    /// Everything else, including empty text
    Latin,
}

impl Script {
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Thai => "Thai",
            Script::Latin => "Latin",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check if a character lies in the Thai block (U+0E00..=U+0E7F)
#[inline]
pub fn is_thai(c: char) -> bool {
    (THAI_BLOCK_START..=THAI_BLOCK_END).contains(&c)
}

/// Check if any character of the text is Thai
pub fn contains_thai(text: &str) -> bool {
    text.chars().any(is_thai)
}

/// Detect the script of the text.
///
/// This is a presence test, not a majority vote: a single Thai code point
/// anywhere makes the whole text Thai.
pub fn detect_script(text: &str) -> Script {
    if contains_thai(text) {
        Script::Thai
    } else {
        Script::Latin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_boundaries() {
        assert!(is_thai('\u{0E00}'));
        assert!(is_thai('\u{0E7F}'));
        assert!(!is_thai('\u{0DFF}'));
        assert!(!is_thai('\u{0E80}')); // first Lao code point
    }

    #[test]
    fn test_detect_latin() {
        assert_eq!(detect_script("hello, world 123"), Script::Latin);
        assert_eq!(detect_script(""), Script::Latin);
        assert_eq!(detect_script("日本語"), Script::Latin);
    }

    #[test]
    fn test_detect_thai() {
        assert_eq!(detect_script("ไทย"), Script::Thai);
    }

    #[test]
    fn test_single_thai_code_point_wins() {
        assert_eq!(detect_script("mostly latin text ก"), Script::Thai);
        assert!(contains_thai("abc\u{0E48}"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Script::Thai.to_string(), "Thai");
        assert_eq!(Script::Latin.to_string(), "Latin");
    }
}
