//! LCD controller configuration
//!
//! Settings for the on-chip segment LCD controller and the control
//! register values they encode to. The panel geometry (duty, bias,
//! segment count) is fixed once at initialization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `LCDCRA` bits
pub mod cra {
    /// Controller enable
    pub const LCDEN: u8 = 1 << 7;
    /// Low power waveform
    pub const LCDAB: u8 = 1 << 6;
    /// Interrupt flag
    pub const LCDIF: u8 = 1 << 4;
    /// Interrupt enable
    pub const LCDIE: u8 = 1 << 3;
    /// Blanking
    pub const LCDBL: u8 = 1 << 0;
}

/// `LCDCRB` bits
pub mod crb {
    /// External asynchronous clock source
    pub const LCDCS: u8 = 1 << 7;
    /// Half bias
    pub const LCD2B: u8 = 1 << 6;
    /// Duty select shift (`LCDMUX1:0`)
    pub const LCDMUX_SHIFT: u8 = 4;
}

/// `LCDFRR` prescaler shift (`LCDPS2:0`)
pub const LCDPS_SHIFT: u8 = 4;

/// Segment counts selectable through the port mask (`LCDPM2:0`)
pub const SEGMENT_COUNTS: [u8; 8] = [13, 15, 17, 19, 21, 23, 24, 25];

/// Segment pins the six cells need (SEG0..SEG23)
pub const MIN_SEGMENTS: u8 = 24;

/// Errors from validating an [`LcdConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Clock divide must be 1-8
    ClockDivideOutOfRange,
    /// Contrast code must be 0-15
    ContrastOutOfRange,
    /// Segment count not selectable by the port mask
    UnsupportedSegmentCount,
    /// Encodable, but the cell layout needs 1/4 duty and SEG0..SEG23
    UnsupportedGeometry,
}

/// LCD clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockSource {
    /// System clock
    System,
    /// External 32.768 kHz crystal
    #[default]
    External,
}

/// Drive bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bias {
    /// 1/3 bias
    #[default]
    Third,
    /// 1/2 bias
    Half,
}

/// Multiplex duty cycle (number of COM lines driven)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Duty {
    /// Static (COM0)
    Static,
    /// 1/2 (COM0:1)
    Half,
    /// 1/3 (COM0:2)
    Third,
    /// 1/4 (COM0:3)
    #[default]
    Quarter,
}

impl Duty {
    fn mux_bits(self) -> u8 {
        match self {
            Duty::Static => 0,
            Duty::Half => 1,
            Duty::Third => 2,
            Duty::Quarter => 3,
        }
    }

    /// Frame-rate divisor K for this duty
    pub fn frame_divisor(self) -> u32 {
        match self {
            Duty::Third => 6,
            _ => 8,
        }
    }
}

/// LCD clock prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prescaler {
    Div16,
    #[default]
    Div64,
    Div128,
    Div256,
    Div512,
    Div1024,
    Div2048,
    Div4096,
}

impl Prescaler {
    fn bits(self) -> u8 {
        match self {
            Prescaler::Div16 => 0,
            Prescaler::Div64 => 1,
            Prescaler::Div128 => 2,
            Prescaler::Div256 => 3,
            Prescaler::Div512 => 4,
            Prescaler::Div1024 => 5,
            Prescaler::Div2048 => 6,
            Prescaler::Div4096 => 7,
        }
    }

    /// Prescaler divisor N
    pub fn divisor(self) -> u32 {
        match self {
            Prescaler::Div16 => 16,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
            Prescaler::Div512 => 512,
            Prescaler::Div1024 => 1024,
            Prescaler::Div2048 => 2048,
            Prescaler::Div4096 => 4096,
        }
    }
}

/// Encoded control register values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegisters {
    /// `LCDCRA`
    pub cra: u8,
    /// `LCDCRB`
    pub crb: u8,
    /// `LCDFRR`
    pub frr: u8,
    /// `LCDCCR`
    pub ccr: u8,
}

/// LCD controller configuration
///
/// The default matches the STK502 panel: external 32.768 kHz clock,
/// 1/3 bias, 1/4 duty, 25 segments, 64 Hz frame rate, ~3.0 V drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcdConfig {
    /// Clock source
    pub clock_source: ClockSource,
    /// Use the low power waveform
    pub low_power_waveform: bool,
    /// Drive bias
    pub bias: Bias,
    /// Duty cycle
    pub duty: Duty,
    /// Segment pins in use (13, 15, 17, 19, 21, 23, 24 or 25)
    pub segments: u8,
    /// Clock prescaler
    pub prescaler: Prescaler,
    /// Clock divide (1-8)
    pub clock_divide: u8,
    /// Contrast control code (0-15)
    pub contrast: u8,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::External,
            low_power_waveform: false,
            bias: Bias::Third,
            duty: Duty::Quarter,
            segments: 25,
            prescaler: Prescaler::Div64,
            clock_divide: 1,
            contrast: 8,
        }
    }
}

impl LcdConfig {
    /// Check every field is encodable and the panel geometry is drivable
    ///
    /// Cell writes always touch four COM-line registers and cells 6/7
    /// drive SEG16..SEG23, so only 1/4 duty with at least 24 segment
    /// pins is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.clock_divide) {
            return Err(ConfigError::ClockDivideOutOfRange);
        }
        if self.contrast > 0x0F {
            return Err(ConfigError::ContrastOutOfRange);
        }
        self.port_mask()?;
        if self.duty != Duty::Quarter || self.segments < MIN_SEGMENTS {
            return Err(ConfigError::UnsupportedGeometry);
        }
        Ok(())
    }

    /// `LCDPM2:0` for the configured segment count
    fn port_mask(&self) -> Result<u8, ConfigError> {
        SEGMENT_COUNTS
            .iter()
            .position(|&n| n == self.segments)
            .map(|i| i as u8)
            .ok_or(ConfigError::UnsupportedSegmentCount)
    }

    /// Encode the four control registers
    pub fn control_registers(&self) -> Result<ControlRegisters, ConfigError> {
        self.validate()?;

        let mut control_a = cra::LCDEN;
        if self.low_power_waveform {
            control_a |= cra::LCDAB;
        }

        let mut control_b = (self.duty.mux_bits() << crb::LCDMUX_SHIFT) | self.port_mask()?;
        if self.clock_source == ClockSource::External {
            control_b |= crb::LCDCS;
        }
        if self.bias == Bias::Half {
            control_b |= crb::LCD2B;
        }

        let frr = (self.prescaler.bits() << LCDPS_SHIFT) | (self.clock_divide - 1);

        Ok(ControlRegisters {
            cra: control_a,
            crb: control_b,
            frr,
            ccr: self.contrast,
        })
    }

    /// Frame rate for a given LCD clock
    ///
    /// `f_frame = f_clk / (K * N * D)`
    pub fn frame_rate_hz(&self, clock_hz: u32) -> u32 {
        let divisor =
            self.duty.frame_divisor() * self.prescaler.divisor() * self.clock_divide.max(1) as u32;
        clock_hz / divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_control_registers() {
        let regs = LcdConfig::default().control_registers().unwrap();
        assert_eq!(regs.cra, 0x80);
        assert_eq!(regs.crb, 0xB7);
        assert_eq!(regs.frr, 0x10);
        assert_eq!(regs.ccr, 0x08);
    }

    #[test]
    fn test_default_frame_rate() {
        assert_eq!(LcdConfig::default().frame_rate_hz(32_768), 64);
    }

    #[test]
    fn test_prescaler_divisors() {
        let expected = [
            (Prescaler::Div16, 16),
            (Prescaler::Div64, 64),
            (Prescaler::Div128, 128),
            (Prescaler::Div256, 256),
            (Prescaler::Div512, 512),
            (Prescaler::Div1024, 1024),
            (Prescaler::Div2048, 2048),
            (Prescaler::Div4096, 4096),
        ];
        for (prescaler, n) in expected {
            assert_eq!(prescaler.divisor(), n);
        }
    }

    #[test]
    fn test_alternate_settings() {
        let config = LcdConfig {
            clock_source: ClockSource::System,
            low_power_waveform: true,
            bias: Bias::Half,
            duty: Duty::Quarter,
            segments: 24,
            prescaler: Prescaler::Div4096,
            clock_divide: 8,
            contrast: 15,
        };
        let regs = config.control_registers().unwrap();
        assert_eq!(regs.cra, cra::LCDEN | cra::LCDAB);
        // 24 segments is port mask 6
        assert_eq!(regs.crb, crb::LCD2B | (3 << crb::LCDMUX_SHIFT) | 6);
        assert_eq!(regs.frr, 0x77);
        assert_eq!(regs.ccr, 0x0F);
    }

    #[test]
    fn test_rejects_undrivable_geometry() {
        for duty in [Duty::Static, Duty::Half, Duty::Third] {
            let config = LcdConfig {
                duty,
                ..LcdConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::UnsupportedGeometry));
        }

        for segments in [13, 15, 17, 19, 21, 23] {
            let config = LcdConfig {
                segments,
                ..LcdConfig::default()
            };
            assert_eq!(
                config.control_registers(),
                Err(ConfigError::UnsupportedGeometry)
            );
        }

        let smallest = LcdConfig {
            segments: MIN_SEGMENTS,
            ..LcdConfig::default()
        };
        assert_eq!(smallest.validate(), Ok(()));
    }

    #[test]
    fn test_third_duty_frame_divisor() {
        let config = LcdConfig {
            duty: Duty::Third,
            ..LcdConfig::default()
        };
        assert_eq!(config.frame_rate_hz(32_768), 85);
    }

    #[test]
    fn test_validation() {
        let bad_divide = LcdConfig {
            clock_divide: 0,
            ..LcdConfig::default()
        };
        assert_eq!(bad_divide.validate(), Err(ConfigError::ClockDivideOutOfRange));

        let bad_contrast = LcdConfig {
            contrast: 16,
            ..LcdConfig::default()
        };
        assert_eq!(
            bad_contrast.control_registers(),
            Err(ConfigError::ContrastOutOfRange)
        );

        let bad_segments = LcdConfig {
            segments: 20,
            ..LcdConfig::default()
        };
        assert_eq!(
            bad_segments.validate(),
            Err(ConfigError::UnsupportedSegmentCount)
        );
    }
}
