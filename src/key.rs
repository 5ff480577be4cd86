//! Key identifiers: one physical key, named by a short token.
//!
//! A token is at most two characters in one of three shapes: a bare letter
//! (`#`, `*`), a left-marked letter (`S-`), or a right-marked letter
//! (`-S`). A lone hyphen is not a key.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Which hand a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left-marked (`X-`).
    Left,
    /// Right-marked (`-X`).
    Right,
    /// Unmarked; belongs to whichever range of the layout it sits in.
    Neutral,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Neutral => "neutral",
        })
    }
}

/// One physical key: a bare letter plus its side marker.
///
/// # Examples
///
/// ```
/// use steno_stroke::{Key, Side};
///
/// let key: Key = "S-".parse().unwrap();
/// assert_eq!(key.letter(), 'S');
/// assert_eq!(key.side(), Side::Left);
/// assert_eq!(key.to_string(), "S-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    letter: char,
    side: Side,
}

impl Key {
    /// Creates a key from its bare letter and side.
    #[must_use]
    pub const fn new(letter: char, side: Side) -> Self {
        Self { letter, side }
    }

    /// The bare letter, without any side marker.
    #[must_use]
    pub const fn letter(&self) -> char {
        self.letter
    }

    /// The side marker.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Whether this key's letter is a decimal digit (a digit alias from a
    /// number overlay rather than a physical letter).
    #[must_use]
    pub const fn is_digit(&self) -> bool {
        self.letter.is_ascii_digit()
    }
}

impl FromStr for Key {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidKey(token.to_string());
        let mut chars = token.chars();
        let first = chars.next().ok_or_else(invalid)?;
        match (first, chars.next(), chars.next()) {
            (letter, None, _) if letter != '-' => Ok(Self::new(letter, Side::Neutral)),
            ('-', Some(letter), None) if letter != '-' => Ok(Self::new(letter, Side::Right)),
            (letter, Some('-'), None) if letter != '-' => Ok(Self::new(letter, Side::Left)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Side::Left => write!(f, "{}-", self.letter),
            Side::Right => write!(f, "-{}", self.letter),
            Side::Neutral => write!(f, "{}", self.letter),
        }
    }
}
