// Thaiswap Core Library
// Thai/QWERTY keyboard-layout remapping

pub mod converter;
pub mod direction;
pub mod hotkey;
pub mod layout;
pub mod script;
pub mod trigger;

#[cfg(feature = "settings")]
pub mod settings;

pub use converter::{convert, convert_english_to_thai, convert_thai_to_english, Converter};
pub use direction::{conversion_direction, Direction, ENGLISH_TO_THAI, THAI_TO_ENGLISH};
pub use hotkey::{parse_hotkey, Hotkey, HotkeyKey, HotkeyModifier, HotkeyParseError};
pub use layout::{LayoutTable, THAI_QWERTY_PAIRS};
pub use script::{contains_thai, detect_script, is_thai, Script};
pub use trigger::{
    preview, BufferError, ConversionTrigger, FileBuffer, MemoryBuffer, RetryPolicy, TextBuffer,
    TriggerOutcome,
};

#[cfg(feature = "settings")]
pub use settings::{default_settings_content, Settings, SettingsError};
