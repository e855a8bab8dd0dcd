// Thaiswap Conversion Trigger
// Read a text buffer, convert it, write it back and report what happened

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::converter::Converter;
use crate::direction::Direction;

#[cfg(feature = "settings")]
use crate::settings::Settings;

/// Preview length used when no settings are supplied
pub const DEFAULT_PREVIEW_LENGTH: usize = 15;

/// Errors raised by a text buffer
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// The buffer is temporarily held by someone else
    #[error("buffer unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl BufferError {
    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            BufferError::Unavailable(_) => true,
            BufferError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
        }
    }
}

/// Somewhere text can be taken from and put back, such as a clipboard
pub trait TextBuffer {
    /// Current text, or `None` if the buffer holds no text
    fn read_text(&mut self) -> Result<Option<String>, BufferError>;

    /// Replace the buffer contents
    fn write_text(&mut self, text: &str) -> Result<(), BufferError>;
}

/// How often and how patiently buffer access is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(50))
    }
}

impl RetryPolicy {
    /// Create a policy; at least one attempt is always made
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out
    pub fn run<T, F>(&self, mut op: F) -> Result<T, BufferError>
    where
        F: FnMut() -> Result<T, BufferError>,
    {
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    log::debug!(
                        "buffer attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    attempt += 1;
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Result of one trigger run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The buffer held no text, or only whitespace
    Empty,
    /// The buffer could not be read
    ReadFailed,
    /// Conversion produced the same text
    NoMappableCharacters,
    /// The converted text could not be written back
    WriteFailed,
    /// The buffer now holds the converted text
    Converted {
        direction: Direction,
        original_preview: String,
        converted_preview: String,
    },
}

impl TriggerOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, TriggerOutcome::Converted { .. })
    }
}

impl fmt::Display for TriggerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerOutcome::Empty => write!(f, "ℹ️ Nothing to convert"),
            TriggerOutcome::ReadFailed => write!(f, "✗ Failed to read text"),
            TriggerOutcome::NoMappableCharacters => write!(f, "✗ No mappable characters found"),
            TriggerOutcome::WriteFailed => write!(f, "✗ Failed to update text"),
            TriggerOutcome::Converted {
                direction,
                original_preview,
                converted_preview,
            } => write!(
                f,
                "✓ {}\n{} → {}",
                direction, original_preview, converted_preview
            ),
        }
    }
}

/// First `max_chars` characters of `text`, with "..." appended if cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Runs a conversion against a text buffer when the host fires it
/// (hotkey, menu entry, command line).
pub struct ConversionTrigger<'a, B: TextBuffer> {
    buffer: B,
    converter: Converter<'a>,
    policy: RetryPolicy,
    preview_length: usize,
}

impl<B: TextBuffer> ConversionTrigger<'static, B> {
    /// Create a trigger with the default table and policy
    pub fn new(buffer: B) -> Self {
        Self {
            buffer,
            converter: Converter::default(),
            policy: RetryPolicy::default(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

impl<'a, B: TextBuffer> ConversionTrigger<'a, B> {
    /// Use a different converter
    pub fn with_converter<'b>(self, converter: Converter<'b>) -> ConversionTrigger<'b, B> {
        ConversionTrigger {
            buffer: self.buffer,
            converter,
            policy: self.policy,
            preview_length: self.preview_length,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_preview_length(mut self, preview_length: usize) -> Self {
        self.preview_length = preview_length;
        self
    }

    /// Take retry policy and preview length from settings
    #[cfg(feature = "settings")]
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.with_policy(settings.retry_policy())
            .with_preview_length(settings.preview_length())
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    /// Convert the buffer contents in place
    pub fn fire(&mut self) -> TriggerOutcome {
        let original = match self.policy.run(|| self.buffer.read_text()) {
            Ok(Some(text)) => text,
            Ok(None) => return TriggerOutcome::Empty,
            Err(e) => {
                log::warn!("reading text failed: {}", e);
                return TriggerOutcome::ReadFailed;
            }
        };

        if original.trim().is_empty() {
            return TriggerOutcome::Empty;
        }

        let converted = self.converter.convert(&original);
        if converted == original {
            log::debug!("no mappable characters in {:?}", preview(&original, self.preview_length));
            return TriggerOutcome::NoMappableCharacters;
        }

        if let Err(e) = self.policy.run(|| self.buffer.write_text(&converted)) {
            log::warn!("writing converted text failed: {}", e);
            return TriggerOutcome::WriteFailed;
        }

        let outcome = TriggerOutcome::Converted {
            direction: Direction::of(&original),
            original_preview: preview(&original, self.preview_length),
            converted_preview: preview(&converted, self.preview_length),
        };
        log::info!("{}", outcome.to_string().replace('\n', ": "));
        outcome
    }
}

/// In-memory text buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    text: Option<String>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl TextBuffer for MemoryBuffer {
    fn read_text(&mut self) -> Result<Option<String>, BufferError> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), BufferError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Text buffer backed by a UTF-8 file
#[derive(Debug, Clone)]
pub struct FileBuffer {
    path: PathBuf,
}

impl FileBuffer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextBuffer for FileBuffer {
    fn read_text(&mut self) -> Result<Option<String>, BufferError> {
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write_text(&mut self, text: &str) -> Result<(), BufferError> {
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutTable;

    /// Buffer that reports itself busy a fixed number of times per operation
    struct BusyBuffer {
        inner: MemoryBuffer,
        busy_reads: u32,
        busy_writes: u32,
        reads: u32,
        writes: u32,
        io_kind: Option<io::ErrorKind>,
    }

    impl BusyBuffer {
        fn new(text: &str, busy_reads: u32, busy_writes: u32) -> Self {
            Self {
                inner: MemoryBuffer::with_text(text),
                busy_reads,
                busy_writes,
                reads: 0,
                writes: 0,
                io_kind: None,
            }
        }

        /// Report busy attempts as I/O errors of the given kind
        fn with_io_error(mut self, kind: io::ErrorKind) -> Self {
            self.io_kind = Some(kind);
            self
        }

        fn busy_error(&self) -> BufferError {
            match self.io_kind {
                Some(kind) => io::Error::new(kind, "busy").into(),
                None => BufferError::Unavailable("locked".to_string()),
            }
        }
    }

    impl TextBuffer for BusyBuffer {
        fn read_text(&mut self) -> Result<Option<String>, BufferError> {
            self.reads += 1;
            if self.reads <= self.busy_reads {
                return Err(self.busy_error());
            }
            self.inner.read_text()
        }

        fn write_text(&mut self, text: &str) -> Result<(), BufferError> {
            self.writes += 1;
            if self.writes <= self.busy_writes {
                return Err(self.busy_error());
            }
            self.inner.write_text(text)
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::ZERO)
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 15), "short");
        assert_eq!(preview("exactly15chars!", 15), "exactly15chars!");
        assert_eq!(preview("this is longer than that", 15), "this is longer ...");
        assert_eq!(preview("สวัสดีครับ", 3), "สวั...");
    }

    #[test]
    fn test_converts_buffer_in_place() {
        let mut trigger = ConversionTrigger::new(MemoryBuffer::with_text("sdfsdf"));
        let outcome = trigger.fire();
        assert_eq!(
            outcome,
            TriggerOutcome::Converted {
                direction: Direction::EnglishToThai,
                original_preview: "sdfsdf".to_string(),
                converted_preview: "ตถทตถท".to_string(),
            }
        );
        assert_eq!(trigger.buffer().text(), Some("ตถทตถท"));
        assert_eq!(outcome.to_string(), "✓ English→Thai\nsdfsdf → ตถทตถท");
    }

    #[test]
    fn test_direction_reported_from_original_text() {
        let mut trigger = ConversionTrigger::new(MemoryBuffer::with_text("ไทย"));
        match trigger.fire() {
            TriggerOutcome::Converted { direction, .. } => {
                assert_eq!(direction, Direction::ThaiToEnglish)
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(trigger.into_buffer().text(), Some("wfv"));
    }

    #[test]
    fn test_empty_buffer() {
        let mut trigger = ConversionTrigger::new(MemoryBuffer::new());
        assert_eq!(trigger.fire(), TriggerOutcome::Empty);

        let mut trigger = ConversionTrigger::new(MemoryBuffer::with_text("  \n"));
        assert_eq!(trigger.fire(), TriggerOutcome::Empty);
        assert_eq!(trigger.buffer().text(), Some("  \n"));
    }

    #[test]
    fn test_unchanged_text() {
        let mut trigger = ConversionTrigger::new(MemoryBuffer::with_text("-!?"));
        assert_eq!(trigger.fire(), TriggerOutcome::NoMappableCharacters);
        assert_eq!(
            TriggerOutcome::NoMappableCharacters.to_string(),
            "✗ No mappable characters found"
        );
    }

    #[test]
    fn test_long_text_is_previewed() {
        let mut trigger =
            ConversionTrigger::new(MemoryBuffer::with_text("qwertyqwerty")).with_preview_length(4);
        match trigger.fire() {
            TriggerOutcome::Converted {
                original_preview,
                converted_preview,
                ..
            } => {
                assert_eq!(original_preview, "qwer...");
                assert_eq!(converted_preview, "กไำง...");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_transient_read_failures_are_retried() {
        let buffer = BusyBuffer::new("q", 2, 0);
        let mut trigger = ConversionTrigger::new(buffer).with_policy(fast_policy());
        assert!(trigger.fire().is_converted());
        assert_eq!(trigger.buffer().reads, 3);
        assert_eq!(trigger.buffer().inner.text(), Some("ก"));
    }

    #[test]
    fn test_read_gives_up_after_max_attempts() {
        let buffer = BusyBuffer::new("q", 3, 0);
        let mut trigger = ConversionTrigger::new(buffer).with_policy(fast_policy());
        assert_eq!(trigger.fire(), TriggerOutcome::ReadFailed);
        assert_eq!(trigger.buffer().reads, 3);
    }

    #[test]
    fn test_interrupted_io_is_retried() {
        let buffer = BusyBuffer::new("q", 1, 2).with_io_error(io::ErrorKind::Interrupted);
        let mut trigger = ConversionTrigger::new(buffer).with_policy(fast_policy());
        assert!(trigger.fire().is_converted());
        assert_eq!(trigger.buffer().reads, 2);
        assert_eq!(trigger.buffer().writes, 3);
        assert_eq!(trigger.buffer().inner.text(), Some("ก"));
    }

    #[test]
    fn test_would_block_gives_up_after_max_attempts() {
        let buffer = BusyBuffer::new("q", 5, 0).with_io_error(io::ErrorKind::WouldBlock);
        let mut trigger = ConversionTrigger::new(buffer).with_policy(fast_policy());
        assert_eq!(trigger.fire(), TriggerOutcome::ReadFailed);
        assert_eq!(trigger.buffer().reads, 3);
    }

    #[test]
    fn test_other_io_errors_fail_at_once() {
        let buffer = BusyBuffer::new("q", 1, 0).with_io_error(io::ErrorKind::PermissionDenied);
        let mut trigger = ConversionTrigger::new(buffer).with_policy(fast_policy());
        assert_eq!(trigger.fire(), TriggerOutcome::ReadFailed);
        assert_eq!(trigger.buffer().reads, 1);
    }

    #[test]
    fn test_write_failure() {
        let buffer = BusyBuffer::new("q", 0, 5);
        let mut trigger = ConversionTrigger::new(buffer).with_policy(fast_policy());
        assert_eq!(trigger.fire(), TriggerOutcome::WriteFailed);
        assert_eq!(trigger.buffer().writes, 3);
        assert_eq!(trigger.buffer().inner.text(), Some("q"));
    }

    #[test]
    fn test_permanent_errors_are_not_retried() {
        let mut attempts = 0;
        let result: Result<(), BufferError> = fast_policy().run(|| {
            attempts += 1;
            Err(io::Error::new(io::ErrorKind::NotFound, "gone").into())
        });
        assert!(result.is_err());
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_policy_makes_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_custom_converter() {
        let table = LayoutTable::from_pairs([('ก', 'x')]);
        let mut trigger = ConversionTrigger::new(MemoryBuffer::with_text("xq"))
            .with_converter(Converter::new(&table));
        assert!(trigger.fire().is_converted());
        assert_eq!(trigger.buffer().text(), Some("กq"));
    }

    #[test]
    fn test_file_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "sdf;").unwrap();

        let mut trigger = ConversionTrigger::new(FileBuffer::new(&path));
        assert!(trigger.fire().is_converted());
        assert_eq!(fs::read_to_string(&path).unwrap(), "ตถทพ");
        assert_eq!(trigger.buffer().path(), path.as_path());
    }

    #[test]
    fn test_missing_file_fails_to_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut trigger = ConversionTrigger::new(FileBuffer::new(dir.path().join("missing.txt")));
        assert_eq!(trigger.fire(), TriggerOutcome::ReadFailed);
    }
}
