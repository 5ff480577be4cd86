//! One-time validation and derivation of a [`StrokeSystem`].

use std::collections::{HashMap, HashSet};

use crate::bits;
use crate::error::ConfigError;
use crate::key::{Key, Side};

use super::StrokeSystem;

const MAX_KEYS: usize = 64;
const DIGIT_COUNT: u32 = 10;

/// Collects the layout inputs and performs the whole validation in
/// [`build`](Self::build). There is no partial reconfiguration: a builder
/// either yields a complete [`StrokeSystem`] or an error.
///
/// # Examples
///
/// ```
/// use steno_stroke::StrokeSystem;
///
/// let system = StrokeSystem::builder([
///     "#", "S-", "T-", "K-", "P-", "W-", "H-", "R-", "A-", "O-", "*",
///     "-E", "-U", "-F", "-R", "-P", "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
/// ])
/// .implicit_hyphen_keys(["A-", "O-", "*", "-E", "-U"])
/// .build()?;
/// assert_eq!(system.key_count(), 23);
/// # Ok::<(), steno_stroke::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SystemBuilder {
    keys: Vec<String>,
    implicit_hyphen_keys: Option<Vec<String>>,
    number_key: Option<String>,
    digit_map: Option<Vec<(String, String)>>,
}

impl StrokeSystem {
    /// Starts a builder over the ordered key tokens; position = bit index.
    pub fn builder<I, S>(keys: I) -> SystemBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SystemBuilder {
            keys: keys.into_iter().map(Into::into).collect(),
            implicit_hyphen_keys: None,
            number_key: None,
            digit_map: None,
        }
    }
}

impl SystemBuilder {
    /// Supplies the implicit-hyphen keys explicitly instead of relying on
    /// auto-detection. Digit aliases of those keys are accepted too.
    #[must_use]
    pub fn implicit_hyphen_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_hyphen_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Designates the number key. Requires [`digit_map`](Self::digit_map).
    #[must_use]
    pub fn number_key(mut self, key: impl Into<String>) -> Self {
        self.number_key = Some(key.into());
        self
    }

    /// Maps key tokens to digit-alias tokens (e.g. `S-` to `1-`). Must
    /// cover each digit exactly once. Requires
    /// [`number_key`](Self::number_key).
    #[must_use]
    pub fn digit_map<I, K, V>(mut self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.digit_map = Some(
            map.into_iter()
                .map(|(key, alias)| (key.into(), alias.into()))
                .collect(),
        );
        self
    }

    /// Validates everything and derives the immutable system.
    pub fn build(self) -> Result<StrokeSystem, ConfigError> {
        if self.keys.is_empty() || self.keys.len() > MAX_KEYS {
            return Err(ConfigError::UnsupportedKeyCount(self.keys.len()));
        }

        let (keys, right_boundary) = parse_keys(&self.keys)?;
        let letters: Vec<char> = keys.iter().map(Key::letter).collect();
        let mut render = letters.clone();

        let mut tokens: HashMap<Key, usize> = HashMap::new();
        for (index, key) in keys.iter().enumerate() {
            tokens.insert(*key, index);
        }

        let (number_key_mask, digits_mask, digit_to_key) = apply_number_overlay(
            self.number_key.as_deref(),
            self.digit_map.as_deref(),
            &keys,
            &mut render,
            &mut tokens,
        )?;

        let unique_mask = unique_letters_mask(&letters);
        let auto_mask = detect_implicit_hyphen_block(unique_mask, right_boundary, keys.len());
        let implicit_hyphen_mask = match &self.implicit_hyphen_keys {
            Some(explicit) => {
                resolve_explicit_hyphen_keys(explicit, &tokens, unique_mask, auto_mask)?
            }
            None => auto_mask,
        };

        Ok(StrokeSystem::from_parts(
            keys,
            letters,
            render,
            right_boundary,
            implicit_hyphen_mask,
            number_key_mask,
            digits_mask,
            digit_to_key,
            tokens,
        ))
    }
}

/// Parses every token and checks the left/right partition invariants:
/// right keys form one contiguous trailing range, and a bare letter is
/// claimed at most once per side.
fn parse_keys(tokens: &[String]) -> Result<(Vec<Key>, usize), ConfigError> {
    let mut keys = Vec::with_capacity(tokens.len());
    let mut right_boundary = tokens.len();
    let mut left_letters: HashSet<char> = HashSet::new();
    let mut right_letters: HashSet<char> = HashSet::new();

    for (index, token) in tokens.iter().enumerate() {
        let key: Key = token.parse()?;
        let on_right_range = right_boundary != tokens.len();
        match key.side() {
            Side::Left if on_right_range => {
                return Err(ConfigError::LeftKeyOnRight(token.clone()));
            }
            Side::Right if !on_right_range => right_boundary = index,
            _ => {}
        }

        if right_boundary == tokens.len() || index < right_boundary {
            // Left range: left-marked and neutral keys.
            if !left_letters.insert(key.letter()) {
                return Err(ConfigError::DuplicateLetter {
                    letter: key.letter(),
                    side: Side::Left,
                });
            }
        } else {
            // Right range: right-marked keys, and neutral keys whose
            // letter is still free on the left.
            if !right_letters.insert(key.letter()) {
                return Err(ConfigError::DuplicateLetter {
                    letter: key.letter(),
                    side: Side::Right,
                });
            }
            if key.side() == Side::Neutral && left_letters.contains(&key.letter()) {
                return Err(ConfigError::DuplicateLetter {
                    letter: key.letter(),
                    side: Side::Left,
                });
            }
        }
        keys.push(key);
    }

    Ok((keys, right_boundary))
}

/// Validates the number key / digit map pairing and builds the overlay
/// tables. Digit-alias tokens are registered as lookup aliases for their
/// underlying keys.
fn apply_number_overlay(
    number_key: Option<&str>,
    digit_map: Option<&[(String, String)]>,
    keys: &[Key],
    render: &mut [char],
    tokens: &mut HashMap<Key, usize>,
) -> Result<(u64, u64, [Option<usize>; 10]), ConfigError> {
    let mut digit_to_key = [None; 10];
    let (Some(number_token), Some(digit_map)) = (number_key, digit_map) else {
        if number_key.is_some() || digit_map.is_some() {
            return Err(ConfigError::NumberKeyPairing);
        }
        return Ok((0, 0, digit_to_key));
    };

    let number_key: Key = number_token
        .parse()
        .map_err(|_| ConfigError::UnknownNumberKey(number_token.to_string()))?;
    let number_index = keys
        .iter()
        .position(|key| *key == number_key)
        .ok_or_else(|| ConfigError::UnknownNumberKey(number_token.to_string()))?;
    let number_key_mask = 1 << number_index;

    let mut digits_mask = 0u64;
    for (key_token, alias_token) in digit_map {
        let invalid =
            || ConfigError::InvalidDigitMap(format!("entry {key_token:?}: {alias_token:?}"));
        let key: Key = key_token.parse().map_err(|_| invalid())?;
        let alias: Key = alias_token.parse().map_err(|_| invalid())?;
        let index = *tokens.get(&key).ok_or_else(invalid)?;
        let digit = alias
            .letter()
            .to_digit(10)
            .ok_or_else(invalid)? as usize;
        if digit_to_key[digit].is_some() || digits_mask & (1 << index) != 0 {
            return Err(invalid());
        }
        digit_to_key[digit] = Some(index);
        digits_mask |= 1 << index;
        render[index] = alias.letter();
        tokens.insert(alias, index);
    }

    if digits_mask.count_ones() != DIGIT_COUNT {
        return Err(ConfigError::InvalidDigitMap(
            "must cover each digit exactly once".to_string(),
        ));
    }

    Ok((number_key_mask, digits_mask, digit_to_key))
}

/// Mask of keys whose bare letter appears exactly once in the layout.
fn unique_letters_mask(letters: &[char]) -> u64 {
    let mut mask = 0u64;
    for (index, letter) in letters.iter().enumerate() {
        let occurrences = letters.iter().filter(|l| *l == letter).count();
        if occurrences == 1 {
            mask |= 1 << index;
        }
    }
    mask
}

/// The maximal contiguous block of unique-letter keys straddling the
/// left/right boundary: scan backward then forward from the boundary,
/// stopping at the first key whose letter also exists on the other side.
fn detect_implicit_hyphen_block(unique_mask: u64, right_boundary: usize, key_count: usize) -> u64 {
    let mut low = right_boundary;
    while low > 0 && unique_mask & (1 << (low - 1)) != 0 {
        low -= 1;
    }
    let mut high = right_boundary;
    while high < key_count && unique_mask & (1 << high) != 0 {
        high += 1;
    }
    unique_mask & bits::low_bits(high as u32) & !bits::low_bits(low as u32)
}

/// Resolves an explicit implicit-hyphen key set and checks it against the
/// auto-detected block.
fn resolve_explicit_hyphen_keys(
    explicit: &[String],
    tokens: &HashMap<Key, usize>,
    unique_mask: u64,
    auto_mask: u64,
) -> Result<u64, ConfigError> {
    let mut mask = 0u64;
    for token in explicit {
        let key: Key = token
            .parse()
            .map_err(|_| ConfigError::HyphenKeysNotAccountedFor)?;
        let index = *tokens
            .get(&key)
            .ok_or(ConfigError::HyphenKeysNotAccountedFor)?;
        mask |= 1 << index;
    }
    if bits::span_mask(mask) != mask {
        return Err(ConfigError::HyphenKeysNotContinuous);
    }
    if mask & unique_mask != mask {
        return Err(ConfigError::HyphenKeysNotUnique);
    }
    if mask & auto_mask != mask {
        // Contiguous and unique, but disconnected from the block that
        // straddles the hyphen position.
        return Err(ConfigError::HyphenKeysNotContinuous);
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH_KEYS: [&str; 23] = [
        "#", "S-", "T-", "K-", "P-", "W-", "H-", "R-", "A-", "O-", "*", "-E", "-U", "-F", "-R",
        "-P", "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
    ];

    const ENGLISH_DIGITS: [(&str, &str); 10] = [
        ("S-", "1-"),
        ("T-", "2-"),
        ("P-", "3-"),
        ("H-", "4-"),
        ("A-", "5-"),
        ("O-", "0-"),
        ("-F", "-6"),
        ("-P", "-7"),
        ("-L", "-8"),
        ("-T", "-9"),
    ];

    fn english_builder() -> SystemBuilder {
        StrokeSystem::builder(ENGLISH_KEYS)
    }

    #[test]
    fn test_build_plain() {
        let system = english_builder().build().unwrap();
        assert_eq!(system.right_boundary(), 11);
        assert_eq!(system.number_key(), None);
        assert!(system.digit_keys().is_empty());
    }

    #[test]
    fn test_auto_detected_implicit_hyphen_block() {
        // Without an explicit set the detected block also swallows -F,
        // whose letter F is unique.
        let system = english_builder().build().unwrap();
        assert_eq!(system.implicit_hyphen_keys().raw(), 0b11_1111 << 8);
    }

    #[test]
    fn test_auto_detection_whole_layout() {
        let system = StrokeSystem::builder(["#", "A-", "O-", "*"]).build().unwrap();
        assert_eq!(system.implicit_hyphen_keys(), system.full_stroke());
        assert_eq!(system.right_boundary(), 4);
    }

    #[test]
    fn test_auto_detection_all_right_layout() {
        let system = StrokeSystem::builder(["-F", "-R", "-P", "-B"]).build().unwrap();
        assert_eq!(system.right_boundary(), 0);
        assert_eq!(system.implicit_hyphen_keys(), system.full_stroke());
    }

    #[test]
    fn test_explicit_implicit_hyphen_subset() {
        let system = english_builder()
            .implicit_hyphen_keys(["A-", "O-", "*", "-E", "-U"])
            .build()
            .unwrap();
        assert_eq!(system.implicit_hyphen_keys().raw(), 0b1_1111 << 8);
    }

    #[test]
    fn test_explicit_set_accepts_digit_aliases() {
        let system = english_builder()
            .implicit_hyphen_keys(["A-", "O-", "5-", "0-", "-E", "-U", "*"])
            .number_key("#")
            .digit_map(ENGLISH_DIGITS)
            .build()
            .unwrap();
        assert_eq!(system.implicit_hyphen_keys().raw(), 0b1_1111 << 8);
    }

    #[test]
    fn test_explicit_set_with_gap_is_rejected() {
        // Missing * splits the block.
        let err = english_builder()
            .implicit_hyphen_keys(["A-", "O-", "-E", "-U"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::HyphenKeysNotContinuous);
    }

    #[test]
    fn test_explicit_set_with_unknown_key_is_rejected() {
        let err = english_builder()
            .implicit_hyphen_keys(["A-", "O-", "-E", "-U", "-V"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::HyphenKeysNotAccountedFor);
    }

    #[test]
    fn test_explicit_set_with_shared_letter_is_rejected() {
        // R exists on both sides, so R- cannot drop its hyphen.
        let err = english_builder()
            .implicit_hyphen_keys(["R-", "A-", "O-", "*", "-E", "-U"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::HyphenKeysNotUnique);
    }

    #[test]
    fn test_explicit_set_outside_boundary_block_is_rejected() {
        // K is unique and trivially contiguous, but nowhere near the
        // hyphen position.
        let err = english_builder()
            .implicit_hyphen_keys(["K-"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::HyphenKeysNotContinuous);
    }

    #[test]
    fn test_number_key_requires_digit_map() {
        let err = english_builder().number_key("#").build().unwrap_err();
        assert_eq!(err, ConfigError::NumberKeyPairing);

        let err = english_builder()
            .digit_map(ENGLISH_DIGITS)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NumberKeyPairing);
    }

    #[test]
    fn test_unknown_number_key_is_rejected() {
        let err = english_builder()
            .number_key("V-")
            .digit_map(ENGLISH_DIGITS)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownNumberKey("V-".to_string()));
    }

    #[test]
    fn test_incomplete_digit_map_is_rejected() {
        let err = english_builder()
            .number_key("#")
            .digit_map([("S-", "1-"), ("T-", "2-")])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDigitMap(_)));
    }

    #[test]
    fn test_digit_map_with_unknown_key_is_rejected() {
        let mut digits = ENGLISH_DIGITS;
        digits[0] = ("V-", "1-");
        let err = english_builder()
            .number_key("#")
            .digit_map(digits)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDigitMap(_)));
    }

    #[test]
    fn test_left_key_after_right_is_rejected() {
        let err = StrokeSystem::builder(["-R", "L-"]).build().unwrap_err();
        assert_eq!(err, ConfigError::LeftKeyOnRight("L-".to_string()));
    }

    #[test]
    fn test_duplicate_right_letter_is_rejected() {
        let err = StrokeSystem::builder(["-R", "-R"]).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateLetter {
                letter: 'R',
                side: Side::Right
            }
        );
    }

    #[test]
    fn test_neutral_after_boundary_colliding_with_left_is_rejected() {
        let err = StrokeSystem::builder(["#", "-R", "#"]).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateLetter {
                letter: '#',
                side: Side::Left
            }
        );
    }

    #[test]
    fn test_letter_allowed_once_per_side() {
        let system = StrokeSystem::builder(["R-", "-R"]).build().unwrap();
        assert_eq!(system.key_count(), 2);
    }

    #[test]
    fn test_malformed_keys_are_rejected() {
        assert_eq!(
            StrokeSystem::builder(["S-", "-"]).build().unwrap_err(),
            ConfigError::InvalidKey("-".to_string())
        );
        assert_eq!(
            StrokeSystem::builder(["STK"]).build().unwrap_err(),
            ConfigError::InvalidKey("STK".to_string())
        );
    }

    #[test]
    fn test_empty_and_oversized_layouts_are_rejected() {
        assert_eq!(
            StrokeSystem::builder(Vec::<String>::new()).build().unwrap_err(),
            ConfigError::UnsupportedKeyCount(0)
        );
        let too_many: Vec<String> = (0u8..65)
            .map(|i| format!("{}-", (b'A' + (i % 26)) as char))
            .collect();
        assert_eq!(
            StrokeSystem::builder(too_many).build().unwrap_err(),
            ConfigError::UnsupportedKeyCount(65)
        );
    }

    #[test]
    fn test_case_sensitive_letters_are_distinct() {
        // Lowercase right-hand letters do not collide with uppercase left
        // ones, and the whole layout stays implicit-hyphen eligible.
        let keys = [
            "#", "S-", "P-", "C-", "T-", "H-", "V-", "R-", "I-", "A-", "-E", "-O", "-c", "-s",
            "-t", "-h", "-p", "-r", "*", "-i", "-e", "-a", "-o",
        ];
        let system = StrokeSystem::builder(keys).build().unwrap();
        assert_eq!(system.implicit_hyphen_keys(), system.full_stroke());
    }
}
