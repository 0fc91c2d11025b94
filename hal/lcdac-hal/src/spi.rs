//! SPI port abstractions
//!
//! The D/A converter is driven by an SPI master that is fed one byte at a
//! time through its data register. Completion and fault state are read
//! back from the status register, so the trait exposes those flags
//! rather than a buffered transfer API.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SPI status register (`SPSR`) bits
pub mod status {
    /// Transfer complete flag
    pub const SPIF: u8 = 1 << 7;
    /// Write collision flag
    pub const WCOL: u8 = 1 << 6;
    /// Double clock speed
    pub const SPI2X: u8 = 1 << 0;
}

/// SPI control register (`SPCR`) bits
pub mod control {
    /// Interrupt enable
    pub const SPIE: u8 = 1 << 7;
    /// Peripheral enable
    pub const SPE: u8 = 1 << 6;
    /// Data order (1 = LSB first)
    pub const DORD: u8 = 1 << 5;
    /// Master select
    pub const MSTR: u8 = 1 << 4;
    /// Clock polarity
    pub const CPOL: u8 = 1 << 3;
    /// Clock phase
    pub const CPHA: u8 = 1 << 2;
    /// Clock rate select bit 1
    pub const SPR1: u8 = 1 << 1;
    /// Clock rate select bit 0
    pub const SPR0: u8 = 1 << 0;
}

/// Byte-oriented SPI master
///
/// Mirrors the shape of a single-buffered hardware SPI: a byte is placed
/// in the data register, which starts shifting it out, and the caller
/// polls for completion.
pub trait SpiPort {
    /// Error type for SPI operations
    type Error;

    /// Program the peripheral from a configuration
    fn configure(&mut self, config: &SpiConfig) -> Result<(), Self::Error>;

    /// Read the status register and report whether a write collision
    /// is flagged
    fn write_collision(&mut self) -> bool;

    /// Load a byte into the data register, starting a transfer
    fn start_transfer(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Whether the last transfer has finished shifting out
    fn transfer_complete(&mut self) -> bool;
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiConfig {
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bit order on the wire
    pub bit_order: BitOrder,
    /// SCK frequency as a divider of the system clock
    pub clock: ClockDivider,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Mode0,
            bit_order: BitOrder::MsbFirst,
            clock: ClockDivider::Div8,
        }
    }
}

impl SpiConfig {
    /// `SPCR` value for master operation with interrupts disabled
    pub fn control_byte(&self) -> u8 {
        let (polarity, phase) = self.mode.into();
        let mut spcr = control::SPE | control::MSTR;

        if self.bit_order == BitOrder::LsbFirst {
            spcr |= control::DORD;
        }
        if polarity == Polarity::IdleHigh {
            spcr |= control::CPOL;
        }
        if phase == Phase::CaptureOnSecondTransition {
            spcr |= control::CPHA;
        }

        spcr | self.clock.rate_bits()
    }

    /// `SPSR` value (only `SPI2X` is writable)
    pub fn status_byte(&self) -> u8 {
        if self.clock.double_speed() {
            status::SPI2X
        } else {
            0
        }
    }

    /// SCK frequency for a given system clock
    pub fn sck_hz(&self, system_clock_hz: u32) -> u32 {
        system_clock_hz / self.clock.divisor()
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// SCK divider relative to the system clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockDivider {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
}

impl ClockDivider {
    /// Divisor applied to the system clock
    pub fn divisor(self) -> u32 {
        match self {
            ClockDivider::Div2 => 2,
            ClockDivider::Div4 => 4,
            ClockDivider::Div8 => 8,
            ClockDivider::Div16 => 16,
            ClockDivider::Div32 => 32,
            ClockDivider::Div64 => 64,
            ClockDivider::Div128 => 128,
        }
    }

    /// `SPR1:SPR0` field
    fn rate_bits(self) -> u8 {
        match self {
            ClockDivider::Div4 | ClockDivider::Div2 => 0,
            ClockDivider::Div16 | ClockDivider::Div8 => control::SPR0,
            ClockDivider::Div64 | ClockDivider::Div32 => control::SPR1,
            ClockDivider::Div128 => control::SPR1 | control::SPR0,
        }
    }

    /// Whether `SPI2X` must be set to reach this divider
    fn double_speed(self) -> bool {
        matches!(
            self,
            ClockDivider::Div2 | ClockDivider::Div8 | ClockDivider::Div32
        )
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_bytes() {
        // Master, mode 0, MSB first, f/8
        let config = SpiConfig::default();
        assert_eq!(config.control_byte(), 0x51);
        assert_eq!(config.status_byte(), 0x01);
        assert_eq!(config.sck_hz(8_000_000), 1_000_000);
    }

    #[test]
    fn test_mode_bits() {
        let config = SpiConfig {
            mode: Mode::Mode3,
            bit_order: BitOrder::LsbFirst,
            clock: ClockDivider::Div4,
        };
        let spcr = config.control_byte();
        assert_eq!(spcr & control::CPOL, control::CPOL);
        assert_eq!(spcr & control::CPHA, control::CPHA);
        assert_eq!(spcr & control::DORD, control::DORD);
        assert_eq!(spcr & (control::SPR1 | control::SPR0), 0);
        assert_eq!(config.status_byte(), 0);
    }

    #[test]
    fn test_clock_dividers() {
        let cases = [
            (ClockDivider::Div2, 0b00, true),
            (ClockDivider::Div4, 0b00, false),
            (ClockDivider::Div8, 0b01, true),
            (ClockDivider::Div16, 0b01, false),
            (ClockDivider::Div32, 0b10, true),
            (ClockDivider::Div64, 0b10, false),
            (ClockDivider::Div128, 0b11, false),
        ];

        for (divider, spr, spi2x) in cases {
            assert_eq!(divider.rate_bits(), spr);
            assert_eq!(divider.double_speed(), spi2x);
        }
    }

    #[test]
    fn test_mode_conversion() {
        let (pol, pha): (Polarity, Phase) = Mode::Mode1.into();
        assert_eq!(pol, Polarity::IdleLow);
        assert_eq!(pha, Phase::CaptureOnSecondTransition);
    }
}
