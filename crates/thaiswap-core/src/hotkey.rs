// Thaiswap Hotkey Parser
// Parses hotkey strings like "Ctrl+Shift+Space" into structured components

use std::fmt;
use std::str::FromStr;

/// Modifier part of a hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HotkeyModifier {
    Ctrl,
    Shift,
    Alt,
    Win,
}

impl HotkeyModifier {
    /// Look up a modifier by one of its aliases (case-insensitive)
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_lowercase().as_str() {
            "ctrl" | "control" | "c" => Some(HotkeyModifier::Ctrl),
            "shift" | "s" => Some(HotkeyModifier::Shift),
            "alt" | "opt" | "option" | "a" => Some(HotkeyModifier::Alt),
            "win" | "super" | "meta" | "cmd" | "command" => Some(HotkeyModifier::Win),
            _ => None,
        }
    }

    /// Canonical name used when formatting
    pub fn as_str(&self) -> &'static str {
        match self {
            HotkeyModifier::Ctrl => "Ctrl",
            HotkeyModifier::Shift => "Shift",
            HotkeyModifier::Alt => "Alt",
            HotkeyModifier::Win => "Win",
        }
    }
}

impl fmt::Display for HotkeyModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named keys accepted as the final hotkey component
const NAMED_KEYS: &[(&str, &[&str])] = &[
    ("Space", &["space", "spacebar"]),
    ("Enter", &["enter", "return"]),
    ("Tab", &["tab"]),
    ("Esc", &["esc", "escape"]),
    ("Backspace", &["backspace"]),
    ("Insert", &["insert", "ins"]),
    ("Delete", &["delete", "del"]),
    ("Home", &["home"]),
    ("End", &["end"]),
    ("PageUp", &["pageup", "pgup"]),
    ("PageDown", &["pagedown", "pgdn"]),
    ("Pause", &["pause"]),
];

/// Non-modifier part of a hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyKey {
    /// An ASCII letter (stored upper-case) or digit
    Char(char),
    /// Function key F1..F24
    Function(u8),
    /// One of the named keys, by canonical name
    Named(&'static str),
}

impl HotkeyKey {
    /// Look up a key by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() {
                return Some(HotkeyKey::Char(c.to_ascii_uppercase()));
            }
            return None;
        }

        let lower = name.to_lowercase();
        if let Some(number) = lower.strip_prefix('f') {
            if let Ok(n) = number.parse::<u8>() {
                if (1..=24).contains(&n) {
                    return Some(HotkeyKey::Function(n));
                }
            }
        }

        NAMED_KEYS
            .iter()
            .find(|(_, aliases)| aliases.contains(&lower.as_str()))
            .map(|&(canonical, _)| HotkeyKey::Named(canonical))
    }
}

impl fmt::Display for HotkeyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HotkeyKey::Char(c) => write!(f, "{}", c),
            HotkeyKey::Function(n) => write!(f, "F{}", n),
            HotkeyKey::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A parsed hotkey: zero or more modifiers followed by one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    /// Modifiers in the order they were written, without duplicates
    pub modifiers: Vec<HotkeyModifier>,
    /// The final component
    pub key: HotkeyKey,
}

impl Hotkey {
    /// Check whether the hotkey includes a modifier
    pub fn has_modifier(&self, modifier: HotkeyModifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hotkey(s)
    }
}

/// Errors that can occur during hotkey parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyParseError {
    #[error("hotkey string cannot be empty")]
    EmptyInput,

    #[error("hotkey string cannot end with '+'")]
    TrailingSeparator,

    #[error("hotkey has an empty component")]
    MissingKey,

    #[error("unknown modifier: '{0}'")]
    UnknownModifier(String),

    #[error("unknown key name: '{0}'")]
    UnknownKey(String),
}

/// Parse a hotkey string like "Ctrl+Shift+Space"
///
/// # Examples
/// ```
/// use thaiswap_core::hotkey::{parse_hotkey, HotkeyKey, HotkeyModifier};
/// let hotkey = parse_hotkey("Ctrl+Shift+Space").unwrap();
/// assert_eq!(hotkey.modifiers, vec![HotkeyModifier::Ctrl, HotkeyModifier::Shift]);
/// assert_eq!(hotkey.key, HotkeyKey::Named("Space"));
/// ```
pub fn parse_hotkey(exp: &str) -> Result<Hotkey, HotkeyParseError> {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return Err(HotkeyParseError::EmptyInput);
    }

    if trimmed.ends_with('+') {
        return Err(HotkeyParseError::TrailingSeparator);
    }

    let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(HotkeyParseError::MissingKey);
    }

    // The last part is always the key
    let (key_str, modifier_parts) = match parts.split_last() {
        Some(split) => split,
        None => return Err(HotkeyParseError::EmptyInput),
    };
    let key = HotkeyKey::from_name(key_str)
        .ok_or_else(|| HotkeyParseError::UnknownKey(key_str.to_string()))?;

    let mut modifiers = Vec::new();
    for part in modifier_parts {
        let modifier = HotkeyModifier::from_alias(part)
            .ok_or_else(|| HotkeyParseError::UnknownModifier(part.to_string()))?;

        // Avoid duplicate modifiers
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }

    Ok(Hotkey { modifiers, key })
}
