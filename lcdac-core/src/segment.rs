//! Character to segment pattern lookup
//!
//! Each glyph is a 16-bit word made of four nibbles. Nibble `k` (bits
//! `4k+3..4k`) is the cell's contribution to the data register on COM
//! line `k`. The codebook ties logical segments to the panel's physical
//! wiring, so the values below must not be "tidied up".

use core::fmt::Write;

use heapless::String;

use crate::error::LcdError;
use crate::position::{ComLine, CELL_COUNT};

/// Segment words for the digits 0-9
pub const DIGIT_PATTERNS: [u16; 10] = [
    0x1551, // 0
    0x0110, // 1
    0x1E11, // 2
    0x1B11, // 3
    0x0B50, // 4
    0x1B41, // 5
    0x1F40, // 6
    0x0111, // 7
    0x1F51, // 8
    0x0B51, // 9
];

/// Largest value [`render_number`] can fit on the panel
pub const MAX_DISPLAY_NUMBER: u32 = 999_999;

/// A segment pattern taken from the codebook
///
/// Only the codebook and the blank pattern can produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u16);

impl SegmentPattern {
    /// All segments off
    pub const BLANK: SegmentPattern = SegmentPattern(0);

    /// Raw 16-bit word
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Nibble destined for the register on `com`
    pub const fn nibble(self, com: ComLine) -> u8 {
        ((self.0 >> (com.index() * 4)) & 0x0F) as u8
    }

    /// Nibbles for COM0..COM3
    pub fn nibbles(self) -> [u8; 4] {
        ComLine::ALL.map(|com| self.nibble(com))
    }
}

/// A displayable character: a decimal digit or blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    // None = blank, Some(d) with d in 0..=9
    digit: Option<u8>,
}

impl Glyph {
    /// The blank glyph
    pub const BLANK: Glyph = Glyph { digit: None };

    /// Glyph for a digit value (0-9)
    pub const fn digit(value: u8) -> Option<Self> {
        if value < 10 {
            Some(Glyph { digit: Some(value) })
        } else {
            None
        }
    }

    /// Parse a character
    pub fn from_char(c: char) -> Result<Self, LcdError> {
        match c {
            ' ' => Ok(Self::BLANK),
            '0'..='9' => Ok(Glyph {
                digit: Some(c as u8 - b'0'),
            }),
            _ => Err(LcdError::InvalidCharacter),
        }
    }

    /// Segment pattern for this glyph
    pub fn pattern(self) -> SegmentPattern {
        match self.digit {
            Some(d) => SegmentPattern(DIGIT_PATTERNS[d as usize]),
            None => SegmentPattern::BLANK,
        }
    }

    /// Whether this is the blank glyph
    pub fn is_blank(self) -> bool {
        self.digit.is_none()
    }

    /// Character this glyph renders
    pub fn as_char(self) -> char {
        match self.digit {
            Some(d) => (b'0' + d) as char,
            None => ' ',
        }
    }
}

impl TryFrom<char> for Glyph {
    type Error = LcdError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

/// Segment pattern for a character
pub fn pattern_for(c: char) -> Result<SegmentPattern, LcdError> {
    Glyph::from_char(c).map(Glyph::pattern)
}

/// Lay out a number right-justified across the panel, blank padded
pub fn render_number(value: u32) -> Result<[Glyph; CELL_COUNT], LcdError> {
    if value > MAX_DISPLAY_NUMBER {
        return Err(LcdError::NumberTooLarge);
    }

    let mut text: String<CELL_COUNT> = String::new();
    write!(text, "{:>width$}", value, width = CELL_COUNT).map_err(|_| LcdError::NumberTooLarge)?;

    let mut glyphs = [Glyph::BLANK; CELL_COUNT];
    for (slot, c) in glyphs.iter_mut().zip(text.chars()) {
        *slot = Glyph::from_char(c)?;
    }
    Ok(glyphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digit_codebook() {
        let expected: [(char, u16); 10] = [
            ('0', 0x1551),
            ('1', 0x0110),
            ('2', 0x1E11),
            ('3', 0x1B11),
            ('4', 0x0B50),
            ('5', 0x1B41),
            ('6', 0x1F40),
            ('7', 0x0111),
            ('8', 0x1F51),
            ('9', 0x0B51),
        ];

        for (c, bits) in expected {
            assert_eq!(pattern_for(c).map(SegmentPattern::bits), Ok(bits));
        }
    }

    #[test]
    fn test_blank_pattern() {
        assert_eq!(pattern_for(' '), Ok(SegmentPattern::BLANK));
        assert_eq!(SegmentPattern::BLANK.bits(), 0);
        assert!(Glyph::BLANK.is_blank());
    }

    #[test]
    fn test_invalid_characters() {
        for c in ['a', 'Z', '-', '.', '/', ':', '\0', '\t', 'é'] {
            assert_eq!(pattern_for(c), Err(LcdError::InvalidCharacter));
        }
    }

    #[test]
    fn test_nibble_order() {
        // '3' = 0x1B11: COM0 gets bits 3..0, COM3 gets bits 15..12
        let pattern = pattern_for('3').unwrap();
        assert_eq!(pattern.nibbles(), [0x1, 0x1, 0xB, 0x1]);
        assert_eq!(pattern.nibble(ComLine::Com2), 0xB);
    }

    #[test]
    fn test_glyph_digit_constructor() {
        assert_eq!(Glyph::digit(7).map(Glyph::as_char), Some('7'));
        assert_eq!(Glyph::digit(10), None);
        assert_eq!(Glyph::BLANK.as_char(), ' ');
    }

    #[test]
    fn test_render_number_right_justified() {
        let glyphs = render_number(42).unwrap();
        let text: [char; CELL_COUNT] = glyphs.map(Glyph::as_char);
        assert_eq!(text, [' ', ' ', ' ', ' ', '4', '2']);
    }

    #[test]
    fn test_render_number_limits() {
        let zero = render_number(0).unwrap();
        assert_eq!(zero[CELL_COUNT - 1].as_char(), '0');
        assert!(zero[..CELL_COUNT - 1].iter().all(|g| g.is_blank()));

        let max = render_number(MAX_DISPLAY_NUMBER).unwrap();
        assert!(max.iter().all(|g| g.as_char() == '9'));

        assert_eq!(
            render_number(MAX_DISPLAY_NUMBER + 1),
            Err(LcdError::NumberTooLarge)
        );
    }

    proptest! {
        #[test]
        fn prop_only_digits_and_space_accepted(c in any::<char>()) {
            let accepted = pattern_for(c).is_ok();
            prop_assert_eq!(accepted, c == ' ' || c.is_ascii_digit());
        }

        #[test]
        fn prop_glyph_char_round_trip(d in 0u8..10) {
            let glyph = Glyph::digit(d).unwrap();
            prop_assert_eq!(Glyph::from_char(glyph.as_char()), Ok(glyph));
        }
    }
}
