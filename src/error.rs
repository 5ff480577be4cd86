//! Error taxonomy for layout configuration, parsing, and stroke queries.
//!
//! Every failure is synchronous and represents a caller or configuration
//! mistake, never a transient condition: hosts are expected to surface
//! these, not retry them.

use thiserror::Error;

use crate::key::Side;

/// A key layout could not be turned into a [`StrokeSystem`].
///
/// [`StrokeSystem`]: crate::StrokeSystem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A key token is empty, longer than two characters, a lone hyphen, or
    /// otherwise malformed.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// The layout has no keys, or more than 64.
    #[error("unsupported number of keys: {0}")]
    UnsupportedKeyCount(usize),

    /// A left-marked key appeared at or after the first right-marked key.
    #[error("invalid `keys`; left key on the right-hand side: {0:?}")]
    LeftKeyOnRight(String),

    /// A bare letter was claimed twice on the same side.
    #[error("invalid `keys`; duplicate letter {letter:?} on the {side} side")]
    DuplicateLetter {
        /// The repeated bare letter.
        letter: char,
        /// The side on which it repeats.
        side: Side,
    },

    /// `number_key` and `digit_map` were not supplied together.
    #[error("`number_key` and `digit_map` must be supplied together")]
    NumberKeyPairing,

    /// The number key does not name a configured key.
    #[error("invalid `number_key`: {0:?}")]
    UnknownNumberKey(String),

    /// The digit map does not cover each of the ten digits exactly once
    /// over existing keys.
    #[error("invalid `digit_map`: {0}")]
    InvalidDigitMap(String),

    /// An explicit implicit-hyphen key is neither a key nor a digit alias.
    #[error("invalid `implicit_hyphen_keys`: not all keys accounted for")]
    HyphenKeysNotAccountedFor,

    /// The explicit implicit-hyphen keys do not form one contiguous block
    /// of the auto-detected implicit-hyphen span.
    #[error("invalid `implicit_hyphen_keys`: not a continuous block")]
    HyphenKeysNotContinuous,

    /// An explicit implicit-hyphen key's letter is also used on the other
    /// side, so it cannot render without a hyphen.
    #[error("invalid `implicit_hyphen_keys`: some letters are not unique")]
    HyphenKeysNotUnique,
}

/// Steno notation (or a key token list) could not be matched against the
/// configured layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character did not match any key at or after the scan cursor.
    #[error("invalid letter {letter:?} in {steno:?}")]
    UnknownLetter {
        /// The offending character.
        letter: char,
        /// The complete input text.
        steno: String,
    },

    /// A hyphen appeared once the cursor was already on the right side.
    #[error("misplaced hyphen in {steno:?}")]
    MisplacedHyphen {
        /// The complete input text.
        steno: String,
    },

    /// A digit character was used but is not covered by the number overlay.
    #[error("unknown digit {digit:?} in {steno:?}")]
    UnknownDigit {
        /// The offending digit.
        digit: char,
        /// The complete input text.
        steno: String,
    },

    /// A key token does not name a configured key or digit alias.
    #[error("invalid key: {0:?}")]
    UnknownKey(String),
}

/// An integer holds bits outside the configured key mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid keys mask: {value:#x}")]
pub struct RangeError {
    /// The rejected integer value.
    pub value: u64,
}

/// `first` or `last` was asked of the empty stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("empty stroke has no keys")]
pub struct EmptyError;

/// Any error the engine can produce, for callers going through the
/// shape-dispatching constructors or the system definition loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrokeError {
    /// Layout configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Notation or key-token parse failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Integer outside the key mask.
    #[error(transparent)]
    Range(#[from] RangeError),
    /// Query on the empty stroke.
    #[error(transparent)]
    Empty(#[from] EmptyError),
    /// A system definition document could not be decoded.
    #[error("invalid system definition: {0}")]
    Definition(String),
}
