// Thaiswap Conversion Direction
// Which way a conversion runs, derived from script detection

use std::fmt;

use crate::script::{detect_script, Script};

/// Label reported for Thai input
pub const THAI_TO_ENGLISH: &str = "Thai→English";
/// Label reported for non-Thai input
pub const ENGLISH_TO_THAI: &str = "English→Thai";

/// Direction a conversion takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Thai text typed on the Thai layout, converted to the QWERTY keys
    ThaiToEnglish,
    /// Latin text typed on QWERTY, converted to the Thai characters
    EnglishToThai,
}

impl Direction {
    /// Direction implied by a detected script
    pub fn from_script(script: Script) -> Self {
        match script {
            Script::Thai => Direction::ThaiToEnglish,
            Script::Latin => Direction::EnglishToThai,
        }
    }

    /// Direction `convert` takes for this (unconverted) text
    pub fn of(text: &str) -> Self {
        Self::from_script(detect_script(text))
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Direction::ThaiToEnglish => THAI_TO_ENGLISH,
            Direction::EnglishToThai => ENGLISH_TO_THAI,
        }
    }

    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Direction::ThaiToEnglish => Direction::EnglishToThai,
            Direction::EnglishToThai => Direction::ThaiToEnglish,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label for the direction `convert` takes on `text`.
///
/// Pass the original text, not the converted output, to get the direction
/// that was actually used.
pub fn conversion_direction(text: &str) -> &'static str {
    Direction::of(text).label()
}
