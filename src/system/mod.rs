//! Layout configuration: the immutable per-profile structure every other
//! operation is interpreted against.
//!
//! A [`StrokeSystem`] is built once through [`SystemBuilder`], which
//! validates the key list, partitions it into left and right ranges,
//! detects the implicit-hyphen block, and wires up the optional number
//! overlay. After that it is read-only and freely shareable.

mod builder;
mod codec;

pub use builder::SystemBuilder;
pub use codec::StrokeInput;

use std::collections::HashMap;

use crate::key::Key;
use crate::stroke::Stroke;

/// Immutable layout configuration for one stroke profile.
///
/// # Examples
///
/// ```
/// use steno_stroke::StrokeSystem;
///
/// let system = StrokeSystem::builder(["#", "S-", "T-", "-E", "-S"]).build()?;
/// let stroke = system.parse("S-S")?;
/// assert_eq!(system.format(stroke), "S-S");
/// # Ok::<(), steno_stroke::StrokeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StrokeSystem {
    /// Keys in layout order; position = bit index.
    keys: Vec<Key>,
    /// Bare letter of each key, in key order (the parse scan order).
    letters: Vec<char>,
    /// Render character of each key: the digit alias where one exists,
    /// otherwise the bare letter.
    render: Vec<char>,
    /// Index of the first right-marked key; `keys.len()` when there is
    /// none.
    right_boundary: usize,
    /// Mask with one bit per configured key.
    key_mask: u64,
    /// Keys whose letters render without an explicit hyphen.
    implicit_hyphen_mask: u64,
    /// The number key's bit, or 0 without a number overlay.
    number_key_mask: u64,
    /// Digit-capable keys (the number key itself excluded).
    digits_mask: u64,
    /// Key index claimed by each digit character `0`..`9`.
    digit_to_key: [Option<usize>; 10],
    /// Key token or digit-alias token to key index.
    tokens: HashMap<Key, usize>,
}

impl StrokeSystem {
    /// Number of configured keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Keys in layout order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// The concatenated bare letters, in key order. This is the scan order
    /// [`parse`](Self::parse) matches against.
    #[must_use]
    pub fn letters(&self) -> String {
        self.letters.iter().collect()
    }

    /// Index of the first right-side key; equals [`key_count`] when the
    /// layout has no right-marked keys.
    ///
    /// [`key_count`]: Self::key_count
    #[must_use]
    pub const fn right_boundary(&self) -> usize {
        self.right_boundary
    }

    /// The stroke with every configured key pressed.
    #[must_use]
    pub const fn full_stroke(&self) -> Stroke {
        Stroke::from_raw(self.key_mask)
    }

    /// The implicit-hyphen keys, as a stroke.
    #[must_use]
    pub const fn implicit_hyphen_keys(&self) -> Stroke {
        Stroke::from_raw(self.implicit_hyphen_mask)
    }

    /// The number key, when a number overlay is configured.
    #[must_use]
    pub fn number_key(&self) -> Option<Key> {
        let index = crate::bits::lsb_index(self.number_key_mask)?;
        Some(self.keys[index as usize])
    }

    /// The digit-capable keys (number key excluded), as a stroke.
    #[must_use]
    pub const fn digit_keys(&self) -> Stroke {
        Stroke::from_raw(self.digits_mask)
    }

    /// Looks up the bit index of a key or digit-alias token.
    #[must_use]
    pub fn key_index(&self, key: &Key) -> Option<usize> {
        self.tokens.get(key).copied()
    }

    pub(crate) const fn key_mask(&self) -> u64 {
        self.key_mask
    }

    pub(crate) const fn number_key_mask(&self) -> u64 {
        self.number_key_mask
    }

    pub(crate) const fn digits_mask(&self) -> u64 {
        self.digits_mask
    }

    pub(crate) const fn implicit_hyphen_mask(&self) -> u64 {
        self.implicit_hyphen_mask
    }

    pub(crate) fn digit_key_index(&self, digit: char) -> Option<usize> {
        self.digit_to_key[digit.to_digit(10)? as usize]
    }

    pub(crate) fn letter_at(&self, index: usize) -> char {
        self.letters[index]
    }

    pub(crate) fn render_at(&self, index: usize) -> char {
        self.render[index]
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        keys: Vec<Key>,
        letters: Vec<char>,
        render: Vec<char>,
        right_boundary: usize,
        implicit_hyphen_mask: u64,
        number_key_mask: u64,
        digits_mask: u64,
        digit_to_key: [Option<usize>; 10],
        tokens: HashMap<Key, usize>,
    ) -> Self {
        let key_mask = crate::bits::low_bits(keys.len() as u32);
        Self {
            keys,
            letters,
            render,
            right_boundary,
            key_mask,
            implicit_hyphen_mask,
            number_key_mask,
            digits_mask,
            digit_to_key,
            tokens,
        }
    }
}
