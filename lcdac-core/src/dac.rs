//! D/A converter sample framing
//!
//! The converter takes a 16-bit word, most significant byte first. The
//! 12-bit sample sits two bits up from the bottom; the remaining bits
//! are don't-care and sent as zero.

/// Sample resolution in bits
pub const SAMPLE_BITS: u32 = 12;

/// Largest accepted sample value
pub const MAX_SAMPLE: u16 = (1 << SAMPLE_BITS) - 1;

/// Left shift applied to a sample before framing
pub const FRAME_SHIFT: u32 = 2;

/// A 12-bit converter sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacSample(u16);

impl DacSample {
    /// Zero output
    pub const ZERO: DacSample = DacSample(0);

    /// Full-scale output
    pub const MAX: DacSample = DacSample(MAX_SAMPLE);

    /// Validate a raw sample
    pub const fn new(value: u16) -> Option<Self> {
        if value <= MAX_SAMPLE {
            Some(DacSample(value))
        } else {
            None
        }
    }

    /// Raw sample value
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Word shifted into converter position
    pub const fn word(self) -> u16 {
        self.0 << FRAME_SHIFT
    }

    /// Bytes in wire order (MSB, LSB)
    pub const fn frame(self) -> [u8; 2] {
        let word = self.word();
        [(word >> 8) as u8, (word & 0xFF) as u8]
    }
}

impl TryFrom<u16> for DacSample {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_examples() {
        assert_eq!(DacSample::ZERO.frame(), [0x00, 0x00]);
        assert_eq!(DacSample::MAX.frame(), [0x3F, 0xFC]);
        assert_eq!(DacSample::new(0x123).map(DacSample::frame), Some([0x04, 0x8C]));
    }

    #[test]
    fn test_range() {
        assert!(DacSample::new(MAX_SAMPLE).is_some());
        assert!(DacSample::new(MAX_SAMPLE + 1).is_none());
        assert_eq!(DacSample::try_from(0x1000), Err(0x1000));
    }

    proptest! {
        #[test]
        fn prop_frame_is_shifted_word(value in 0u16..=MAX_SAMPLE) {
            let sample = DacSample::new(value).unwrap();
            let [msb, lsb] = sample.frame();
            let word = u16::from(msb) << 8 | u16::from(lsb);
            prop_assert_eq!(word, value << 2);
            // Top two and bottom two bits are padding
            prop_assert_eq!(word & 0xC003, 0);
        }
    }
}
