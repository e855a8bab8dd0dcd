// Thaiswap Layout Table
// Physical-key association between the Thai layout and QWERTY

use std::sync::LazyLock;

use indexmap::IndexMap;

/// Default Thai/QWERTY table, built on first access and never mutated
static THAI_QWERTY: LazyLock<LayoutTable> = LazyLock::new(|| {
    let table = LayoutTable::from_pairs(THAI_QWERTY_PAIRS.iter().copied());
    log::trace!(
        "built Thai/QWERTY layout table: {} forward, {} reverse entries",
        table.len(),
        table.reverse_len()
    );
    table
});

/// Resolved (thai, latin) pairs in registration order.
///
/// Order matters for the reverse table: the first Thai character registered
/// for a Latin key is the one `latin_to_thai` returns. Keys of the partial
/// number/top-row pass come first, in the order they were first registered,
/// each carrying its final value; keys only the full physical pass knows
/// follow.
pub const THAI_QWERTY_PAIRS: &[(char, char)] = &[
    // Number and top row signs
    ('๏', '0'),
    ('ๆ', 'a'),
    ('\u{0E4E}', '8'), // yamakkan
    ('\u{0E4D}', '7'), // nikhahit
    ('\u{0E38}', 'u'), // sara u
    ('\u{0E36}', 'u'), // sara ue
    ('๑', '1'),
    ('๓', '3'),
    ('๒', '2'),
    ('๐', '0'),
    ('ไ', 'w'),
    ('ำ', 'e'),
    ('พ', ';'),
    ('ะ', 'a'),
    ('\u{0E31}', 'l'), // mai han-akat
    ('า', 'a'),
    ('\u{0E35}', 'i'), // sara ii
    ('\u{0E34}', 'i'), // sara i
    ('ซ', 'i'),
    ('ใ', 'i'),
    ('ฉ', 'y'),
    ('ว', 'm'),
    ('บ', 'j'),
    ('ข', 'w'),
    ('ค', 'e'),
    ('เ', 'e'),
    ('แ', 'e'),
    ('โ', 'o'),
    // Remaining Thai digits
    ('๔', '4'),
    ('๕', '5'),
    ('๖', '6'),
    ('๗', '7'),
    ('๘', '8'),
    ('๙', '9'),
    // Top row
    ('ก', 'q'),
    ('ง', 'r'),
    ('จ', 't'),
    ('ช', 'u'),
    ('ฌ', 'o'),
    ('ญ', 'p'),
    // Home row
    ('ด', 'a'),
    ('ต', 's'),
    ('ถ', 'd'),
    ('ท', 'f'),
    ('ธ', 'g'),
    ('น', 'h'),
    ('ป', 'k'),
    ('ผ', 'l'),
    // Bottom row
    ('ฟ', 'z'),
    ('ภ', 'x'),
    ('ม', 'c'),
    ('ย', 'v'),
    ('ร', 'b'),
    ('ล', 'n'),
    // Long vowels
    ('\u{0E39}', 'u'), // sara uu
    ('ๅ', 'o'),
    // Tone marks
    ('\u{0E48}', '`'), // mai ek
    ('\u{0E49}', '~'), // mai tho
    ('\u{0E4A}', '^'), // mai tri
    ('\u{0E4B}', '&'), // mai chattawa
];

/// Character table between a Thai layout and the QWERTY keys it sits on.
///
/// The forward direction (Thai -> Latin) is many-to-one. The reverse
/// direction keeps, for each Latin character, the first Thai character
/// registered for it, so it is a partial and lossy inverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutTable {
    forward: IndexMap<char, char>,
    reverse: IndexMap<char, char>,
}

impl LayoutTable {
    /// Build a table from (thai, latin) pairs applied in order.
    ///
    /// A repeated Thai character overwrites its forward value in place.
    /// A repeated Latin character never replaces its reverse entry.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut forward = IndexMap::new();
        let mut reverse = IndexMap::new();

        for (thai, latin) in pairs {
            if let Some(previous) = forward.insert(thai, latin) {
                if previous != latin {
                    log::trace!("{:?} reassigned from {:?} to {:?}", thai, previous, latin);
                }
            }
            reverse.entry(latin).or_insert(thai);
        }

        Self { forward, reverse }
    }

    /// The process-wide Thai/QWERTY table
    pub fn thai_qwerty() -> &'static LayoutTable {
        &THAI_QWERTY
    }

    /// Latin key for a Thai character
    pub fn thai_to_latin(&self, thai: char) -> Option<char> {
        self.forward.get(&thai).copied()
    }

    /// Thai character for a Latin key (first registered wins)
    pub fn latin_to_thai(&self, latin: char) -> Option<char> {
        self.reverse.get(&latin).copied()
    }

    /// Number of forward entries
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Number of reverse entries
    pub fn reverse_len(&self) -> usize {
        self.reverse.len()
    }

    /// Forward (thai, latin) entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.forward.iter().map(|(&thai, &latin)| (thai, latin))
    }

    /// Reverse (latin, thai) entries in registration order
    pub fn reverse_entries(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.reverse.iter().map(|(&latin, &thai)| (latin, thai))
    }
}
