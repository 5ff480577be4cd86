//! Stroke construction and canonical serialization against a
//! [`StrokeSystem`].

use crate::error::{EmptyError, ParseError, RangeError, StrokeError};
use crate::key::Key;
use crate::stroke::Stroke;

use super::StrokeSystem;

/// Anything a stroke can be built from: an existing stroke, a raw mask,
/// steno notation, or a list of key tokens.
///
/// This is the dispatch type behind [`StrokeSystem::stroke`], the
/// "parse any shape" constructor.
#[derive(Debug, Clone)]
pub enum StrokeInput<'a> {
    /// An already-built stroke, passed through unchanged.
    Stroke(Stroke),
    /// A raw bitmask, validated against the key mask.
    Bits(u64),
    /// Steno notation text.
    Text(&'a str),
    /// Key or digit-alias tokens.
    Keys(&'a [&'a str]),
}

impl From<Stroke> for StrokeInput<'_> {
    fn from(stroke: Stroke) -> Self {
        Self::Stroke(stroke)
    }
}

impl From<u64> for StrokeInput<'_> {
    fn from(bits: u64) -> Self {
        Self::Bits(bits)
    }
}

impl<'a> From<&'a str> for StrokeInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [&'a str]> for StrokeInput<'a> {
    fn from(keys: &'a [&'a str]) -> Self {
        Self::Keys(keys)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for StrokeInput<'a> {
    fn from(keys: &'a [&'a str; N]) -> Self {
        Self::Keys(keys)
    }
}

impl StrokeSystem {
    /// Parses steno notation into a stroke.
    ///
    /// Characters are matched left to right against [`letters`], with a
    /// cursor that only moves forward: each letter must be found at or
    /// after the previous match, and the cursor advances past it. A
    /// hyphen jumps the cursor to the right-hand range (legal only while
    /// still left of it); a digit character resolves through the number
    /// overlay and also presses the number key.
    ///
    /// The empty string parses to the empty stroke.
    ///
    /// [`letters`]: Self::letters
    pub fn parse(&self, steno: &str) -> Result<Stroke, ParseError> {
        let mut mask = 0u64;
        let mut cursor = 0usize;
        for ch in steno.chars() {
            if ch == '-' {
                if cursor >= self.right_boundary() {
                    return Err(ParseError::MisplacedHyphen {
                        steno: steno.to_string(),
                    });
                }
                cursor = self.right_boundary();
                continue;
            }
            let position = if ch.is_ascii_digit() {
                let index = self
                    .digit_key_index(ch)
                    .ok_or_else(|| ParseError::UnknownDigit {
                        digit: ch,
                        steno: steno.to_string(),
                    })?;
                mask |= self.number_key_mask();
                index
            } else {
                (cursor..self.key_count())
                    .find(|&i| self.letter_at(i) == ch)
                    .ok_or_else(|| ParseError::UnknownLetter {
                        letter: ch,
                        steno: steno.to_string(),
                    })?
            };
            mask |= 1 << position;
            cursor = position + 1;
        }
        Ok(Stroke::from_raw(mask))
    }

    /// Builds a stroke from key or digit-alias tokens. A digit alias also
    /// presses the number key.
    pub fn stroke_from_keys<I, S>(&self, tokens: I) -> Result<Stroke, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = 0u64;
        for token in tokens {
            let token = token.as_ref();
            let key: Key = token
                .parse()
                .map_err(|_| ParseError::UnknownKey(token.to_string()))?;
            let index = self
                .key_index(&key)
                .ok_or_else(|| ParseError::UnknownKey(token.to_string()))?;
            if key.is_digit() {
                mask |= self.number_key_mask();
            }
            mask |= 1 << index;
        }
        Ok(Stroke::from_raw(mask))
    }

    /// Wraps a raw integer as a stroke, rejecting bits outside the key
    /// mask.
    pub const fn stroke_from_bits(&self, value: u64) -> Result<Stroke, RangeError> {
        if value & !self.key_mask() != 0 {
            return Err(RangeError { value });
        }
        Ok(Stroke::from_raw(value))
    }

    /// Builds a stroke from any supported input shape; see
    /// [`StrokeInput`].
    pub fn stroke<'a>(&self, input: impl Into<StrokeInput<'a>>) -> Result<Stroke, StrokeError> {
        match input.into() {
            StrokeInput::Stroke(stroke) => Ok(stroke),
            StrokeInput::Bits(bits) => Ok(self.stroke_from_bits(bits)?),
            StrokeInput::Text(text) => Ok(self.parse(text)?),
            StrokeInput::Keys(keys) => Ok(self.stroke_from_keys(keys)?),
        }
    }

    /// Renders the unique canonical text of a stroke.
    ///
    /// When the stroke [`is_number`], digit-capable keys render as their
    /// digit characters and the number key is left out. Keys otherwise
    /// render as bare letters in layout order, with a single hyphen
    /// inserted before the first right-side key unless an implicit-hyphen
    /// key is present (or no right-side key is).
    ///
    /// [`is_number`]: Self::is_number
    #[must_use]
    pub fn format(&self, stroke: Stroke) -> String {
        let mut mask = stroke.raw();
        let digit_mode = self.is_number(stroke);
        if digit_mode {
            mask &= !self.number_key_mask();
        }

        let mut hyphen_at = if mask & self.implicit_hyphen_mask() != 0 {
            // An implicit-hyphen key marks the separation by itself.
            usize::MAX
        } else {
            self.right_boundary()
        };

        let mut text = String::new();
        for index in Stroke::from_raw(mask).iter_indices() {
            let index = index as usize;
            if index >= hyphen_at {
                text.push('-');
                hyphen_at = usize::MAX;
            }
            text.push(if digit_mode {
                self.render_at(index)
            } else {
                self.letter_at(index)
            });
        }
        text
    }

    /// The keys of a stroke, in increasing bit (left-to-right) order.
    #[must_use]
    pub fn keys_of(&self, stroke: Stroke) -> Vec<Key> {
        stroke
            .iter_indices()
            .map(|index| self.keys()[index as usize])
            .collect()
    }

    /// The leftmost key of a stroke.
    pub fn first(&self, stroke: Stroke) -> Result<Key, EmptyError> {
        let index = stroke.first_index().ok_or(EmptyError)?;
        Ok(self.keys()[index as usize])
    }

    /// The rightmost key of a stroke.
    pub fn last(&self, stroke: Stroke) -> Result<Key, EmptyError> {
        let index = stroke.last_index().ok_or(EmptyError)?;
        Ok(self.keys()[index as usize])
    }

    /// Whether the stroke renders entirely as digits: the number key is
    /// pressed together with at least one digit-capable key and nothing
    /// else.
    #[must_use]
    pub const fn is_number(&self, stroke: Stroke) -> bool {
        let mask = stroke.raw();
        let number = self.number_key_mask();
        number != 0
            && mask & number != 0
            && mask != number
            && mask & !(number | self.digits_mask()) == 0
    }

    /// Whether any digit-capable key is pressed, with or without the
    /// number key.
    #[must_use]
    pub const fn has_digit(&self, stroke: Stroke) -> bool {
        stroke.raw() & self.digits_mask() != 0
    }

    /// The keys of the layout not pressed in `stroke`.
    #[must_use]
    pub const fn complement(&self, stroke: Stroke) -> Stroke {
        Stroke::from_raw(!stroke.raw() & self.key_mask())
    }

    /// Canonicalizes a multi-stroke outline: every `/`-separated stroke
    /// is parsed and re-rendered in canonical form.
    pub fn normalize_outline(&self, outline: &str) -> Result<String, ParseError> {
        let strokes: Vec<String> = outline
            .split('/')
            .map(|steno| Ok(self.format(self.parse(steno)?)))
            .collect::<Result<_, ParseError>>()?;
        Ok(strokes.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> StrokeSystem {
        StrokeSystem::english().expect("embedded English definition")
    }

    #[test]
    fn test_parse_basic() {
        let system = english();
        assert_eq!(system.parse("#").unwrap().raw(), 0b1);
        assert_eq!(system.parse("ST").unwrap().raw(), 0b110);
        assert_eq!(system.parse("*Z").unwrap().raw(), (1 << 10) | (1 << 22));
        assert_eq!(system.parse("").unwrap(), Stroke::EMPTY);
    }

    #[test]
    fn test_parse_hyphen_jumps_to_right_side() {
        let system = english();
        // R appears on both sides; the hyphen forces the second onto the
        // right hand.
        assert_eq!(system.parse("R-R").unwrap().raw(), (1 << 7) | (1 << 14));
        assert_eq!(system.parse("-PB").unwrap().raw(), (1 << 15) | (1 << 16));
    }

    #[test]
    fn test_parse_rejects_misplaced_hyphen() {
        let system = english();
        assert!(matches!(
            system.parse("-E-U"),
            Err(ParseError::MisplacedHyphen { .. })
        ));
        assert!(matches!(
            system.parse("AOE-"),
            Err(ParseError::MisplacedHyphen { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_backtracking_letter() {
        let system = english();
        // W sits left of the cursor after matching E.
        assert!(matches!(
            system.parse("EW"),
            Err(ParseError::UnknownLetter { letter: 'W', .. })
        ));
    }

    #[test]
    fn test_parse_digits_press_the_number_key() {
        let system = english();
        let from_digits = system.parse("1207").unwrap();
        let from_letters = system.parse("#STO-P").unwrap();
        assert_eq!(from_digits, from_letters);
        assert!(system.is_number(from_digits));
    }

    #[test]
    fn test_parse_unknown_digit_without_overlay() {
        let system = StrokeSystem::builder(["S-", "T-", "-E"]).build().unwrap();
        assert!(matches!(
            system.parse("1"),
            Err(ParseError::UnknownDigit { digit: '1', .. })
        ));
    }

    #[test]
    fn test_stroke_from_keys() {
        let system = english();
        let stroke = system.stroke_from_keys(["T-", "-B", "-P", "S-"]).unwrap();
        assert_eq!(system.format(stroke), "ST-PB");
        // Digit aliases press the number key too.
        let digits = system.stroke_from_keys(["1-", "2-", "0-", "-7"]).unwrap();
        assert_eq!(digits, system.parse("1207").unwrap());
        assert!(matches!(
            system.stroke_from_keys(["-Q"]),
            Err(ParseError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_stroke_from_bits_validates_mask() {
        let system = StrokeSystem::builder(["S-", "T-", "-E"]).build().unwrap();
        assert_eq!(system.stroke_from_bits(0b101).unwrap().raw(), 0b101);
        assert_eq!(
            system.stroke_from_bits(0b1000),
            Err(RangeError { value: 0b1000 })
        );
    }

    #[test]
    fn test_stroke_dispatch() {
        let system = english();
        let reference = system.parse("ST-PB").unwrap();
        assert_eq!(system.stroke(reference).unwrap(), reference);
        assert_eq!(system.stroke(reference.raw()).unwrap(), reference);
        assert_eq!(system.stroke("ST-PB").unwrap(), reference);
        assert_eq!(
            system.stroke(&["S-", "T-", "-P", "-B"]).unwrap(),
            reference
        );
    }

    #[test]
    fn test_format_separator_policy() {
        let system = english();
        // Left keys only: no separator.
        assert_eq!(system.format(system.parse("ST").unwrap()), "ST");
        // Right keys only: leading hyphen.
        assert_eq!(system.format(system.parse("-PB").unwrap()), "-PB");
        // Implicit-hyphen key present: no hyphen needed.
        assert_eq!(system.format(system.parse("AOE").unwrap()), "AOE");
        assert_eq!(system.format(system.parse("*Z").unwrap()), "*Z");
        // Both sides without a middle key: hyphen between.
        assert_eq!(system.format(system.parse("ST-PB").unwrap()), "ST-PB");
        assert_eq!(system.format(Stroke::EMPTY), "");
    }

    #[test]
    fn test_format_number_strokes() {
        let system = english();
        let number = system.parse("#STO-P").unwrap();
        assert_eq!(system.format(number), "1207");
        // The number key alone is not a number.
        let bare = system.parse("#").unwrap();
        assert_eq!(system.format(bare), "#");
        // A non-digit key keeps the whole stroke in letter mode.
        let mixed = system.parse("#12E7").unwrap();
        assert_eq!(system.format(mixed), "#STEP");
    }

    #[test]
    fn test_roundtrip_canonical_texts() {
        let system = english();
        for steno in ["#", "#-Z", "ST-PB", "AOE", "*Z", "R-R", "-FL", "1207"] {
            let stroke = system.parse(steno).unwrap();
            let text = system.format(stroke);
            assert_eq!(system.parse(&text).unwrap(), stroke, "via {steno:?}");
            assert_eq!(system.format(system.parse(&text).unwrap()), text);
        }
    }

    #[test]
    fn test_keys_of_first_last() {
        let system = english();
        let stroke = system.parse("AO-E").unwrap();
        let tokens: Vec<String> = system.keys_of(stroke).iter().map(Key::to_string).collect();
        assert_eq!(tokens, ["A-", "O-", "-E"]);
        assert_eq!(system.first(stroke).unwrap().to_string(), "A-");
        assert_eq!(system.last(stroke).unwrap().to_string(), "-E");
        assert_eq!(system.first(Stroke::EMPTY), Err(EmptyError));
        assert_eq!(system.last(Stroke::EMPTY), Err(EmptyError));
    }

    #[test]
    fn test_number_predicates() {
        let system = english();
        assert!(system.is_number(system.parse("1207").unwrap()));
        assert!(system.has_digit(system.parse("1207").unwrap()));
        assert!(!system.is_number(system.parse("#").unwrap()));
        assert!(!system.is_number(Stroke::EMPTY));
        assert!(!system.is_number(system.parse("#12E7").unwrap()));
        assert!(system.has_digit(system.parse("#12E7").unwrap()));
        // Digit-capable keys count as digits even without the number key.
        assert!(system.has_digit(system.parse("ST").unwrap()));
        assert!(!system.has_digit(system.parse("*Z").unwrap()));
    }

    #[test]
    fn test_complement_is_involutive() {
        let system = english();
        let stroke = system.parse("AOEU").unwrap();
        assert_eq!(system.complement(system.complement(stroke)), stroke);
        assert_eq!(system.complement(Stroke::EMPTY), system.full_stroke());
        assert_eq!(
            system.format(system.complement(stroke)),
            "#STKPWHR*FRPBLGTSDZ"
        );
    }

    #[test]
    fn test_normalize_outline() {
        let system = english();
        assert_eq!(
            system.normalize_outline("#STO-P/AO-E").unwrap(),
            "1207/AOE"
        );
        assert_eq!(system.normalize_outline("AOE").unwrap(), "AOE");
        assert!(system.normalize_outline("AOE/QQ").is_err());
    }
}
