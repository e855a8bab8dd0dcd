// Thaiswap Converter
// Character-by-character remapping between the Thai layout and QWERTY

use crate::direction::Direction;
use crate::layout::LayoutTable;

/// Layout converter bound to a table.
///
/// Every operation is total: unmapped characters are copied through, and the
/// output always has as many code points as the input.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    table: &'a LayoutTable,
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(LayoutTable::thai_qwerty())
    }
}

impl<'a> Converter<'a> {
    /// Create a converter over the given table
    pub fn new(table: &'a LayoutTable) -> Self {
        Self { table }
    }

    /// The table this converter reads from
    pub fn table(&self) -> &'a LayoutTable {
        self.table
    }

    /// Convert text, detecting the direction from its script.
    ///
    /// Empty and whitespace-only text is returned unchanged.
    pub fn convert(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let direction = Direction::of(text);
        log::debug!("converting {} code points, {}", text.chars().count(), direction);
        self.convert_as(text, direction)
    }

    /// Convert text in an explicit direction
    pub fn convert_as(&self, text: &str, direction: Direction) -> String {
        match direction {
            Direction::ThaiToEnglish => self.convert_thai_to_english(text),
            Direction::EnglishToThai => self.convert_english_to_thai(text),
        }
    }

    /// Replace each Thai character with the QWERTY key it sits on
    pub fn convert_thai_to_english(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.table.thai_to_latin(c).unwrap_or(c))
            .collect()
    }

    /// Replace each QWERTY key with its Thai character.
    ///
    /// Letters are lower-cased before lookup; Thai has no case, so the
    /// original case is dropped for mapped letters. Unmapped characters keep
    /// their original form.
    pub fn convert_english_to_thai(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.table.latin_to_thai(lower_single(c)).unwrap_or(c))
            .collect()
    }
}

/// Lower-case a character, keeping it as-is when the lower-case form is not
/// a single code point
fn lower_single(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Convert text with the default Thai/QWERTY table
pub fn convert(text: &str) -> String {
    Converter::default().convert(text)
}

/// Thai -> QWERTY pass with the default table, no detection
pub fn convert_thai_to_english(text: &str) -> String {
    Converter::default().convert_thai_to_english(text)
}

/// QWERTY -> Thai pass with the default table, no detection
pub fn convert_english_to_thai(text: &str) -> String {
    Converter::default().convert_english_to_thai(text)
}
