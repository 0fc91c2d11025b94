//! SPI D/A converter driver
//!
//! Streams 12-bit samples to an external serial D/A converter. Each
//! sample is one 16-bit frame, most significant byte first:
//!
//! ```text
//!  15 14 | 13 .............. 2 | 1 0
//!  0  0  |   12-bit sample     | 0 0
//! ```
//!
//! # Write sequence
//!
//! 1. Select the converter (chip select low)
//! 2. Check the status register for a write collision, report if set
//! 3. Load the MSB and wait for the transfer to complete
//! 4. Check for a write collision again, report if set
//! 5. Load the LSB and wait for the transfer to complete
//! 6. Deselect the converter (chip select high)
//!
//! A write collision is the only fault the SPI block can detect. It is
//! reported but does not abort the frame; the flag clears itself on the
//! next status read.

use lcdac_core::dac::DacSample;
use lcdac_core::error::{ErrorKind, ErrorReporter};
use lcdac_hal::gpio::{ChipSelect, OutputPin};
use lcdac_hal::spi::{SpiConfig, SpiPort};

/// D/A driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DtoAConfig {
    /// SPI peripheral settings
    pub spi: SpiConfig,
    /// Polls of the transfer-complete flag before giving up on a byte
    pub max_spins: u32,
}

impl Default for DtoAConfig {
    fn default() -> Self {
        Self {
            spi: SpiConfig::default(),
            // A byte at f/8 takes 64 CPU cycles; this leaves a wide margin
            max_spins: 10_000,
        }
    }
}

/// D/A write errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacError<E> {
    /// Sample does not fit in 12 bits
    SampleOutOfRange,
    /// Transfer-complete flag never set
    Timeout,
    /// Underlying bus error
    Bus(E),
}

/// Serial D/A converter on an SPI port with a dedicated chip select
pub struct DtoA<S, P, E> {
    spi: S,
    cs: ChipSelect<P>,
    reporter: E,
    config: DtoAConfig,
}

impl<S: SpiPort, P: OutputPin, E: ErrorReporter> DtoA<S, P, E> {
    /// Create a driver; the converter starts deselected
    pub fn new(spi: S, cs: P, reporter: E, config: DtoAConfig) -> Self {
        Self {
            spi,
            cs: ChipSelect::new(cs),
            reporter,
            config,
        }
    }

    /// Configure the SPI port and drive the output to zero
    pub fn init(&mut self) -> Result<(), DacError<S::Error>> {
        self.spi
            .configure(&self.config.spi)
            .map_err(DacError::Bus)?;
        self.cs.deselect();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "D/A SPI configured: SPCR={=u8:#x} SPSR={=u8:#x}",
            self.config.spi.control_byte(),
            self.config.spi.status_byte()
        );

        self.write(DacSample::ZERO)
    }

    /// Write a raw 12-bit sample
    ///
    /// Values above 0x0FFF are rejected before the converter is selected.
    pub fn write_sample(&mut self, value: u16) -> Result<(), DacError<S::Error>> {
        let Some(sample) = DacSample::new(value) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("D/A sample out of range: {=u16}", value);
            return Err(DacError::SampleOutOfRange);
        };
        self.write(sample)
    }

    /// Write a validated sample
    ///
    /// The converter is always deselected before this returns, even when
    /// a byte fails.
    pub fn write(&mut self, sample: DacSample) -> Result<(), DacError<S::Error>> {
        let [msb, lsb] = sample.frame();

        self.cs.select();
        let result = self.send(msb).and_then(|()| self.send(lsb));
        self.cs.deselect();

        #[cfg(feature = "defmt")]
        if result.is_ok() {
            defmt::trace!("D/A sample {=u16}", sample.value());
        }

        result
    }

    /// Whether the converter is currently selected
    pub fn is_selected(&self) -> bool {
        self.cs.is_selected()
    }

    /// Get the configuration
    pub fn config(&self) -> &DtoAConfig {
        &self.config
    }

    /// Release the port, chip select pin and reporter
    pub fn release(self) -> (S, P, E) {
        (self.spi, self.cs.release(), self.reporter)
    }

    fn send(&mut self, byte: u8) -> Result<(), DacError<S::Error>> {
        if self.spi.write_collision() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI write collision");
            self.reporter.report(ErrorKind::DacWriteCollision);
        }

        self.spi.start_transfer(byte).map_err(DacError::Bus)?;

        let mut spins: u32 = 0;
        while !self.spi.transfer_complete() {
            spins += 1;
            if spins >= self.config.max_spins {
                self.reporter.report(ErrorKind::DacTimeout);
                return Err(DacError::Timeout);
            }
            core::hint::spin_loop();
        }

        Ok(())
    }
}
