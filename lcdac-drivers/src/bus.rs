//! `embedded-hal` adapters
//!
//! Lets the drivers run on any HAL that implements the `embedded-hal`
//! 1.0 SPI and digital traits, not only on a port that exposes the raw
//! status register.

use core::convert::Infallible;

use embedded_hal::digital;
use embedded_hal::spi;
use lcdac_hal::gpio::OutputPin;
use lcdac_hal::spi::{SpiConfig, SpiPort};

/// [`SpiPort`] over a blocking `embedded-hal` SPI bus
///
/// Each byte is written and flushed before `start_transfer` returns, so
/// the transfer is always complete by the time it is polled and no write
/// collision can occur. Clock and mode are fixed when the HAL builds the
/// bus, so `configure` has nothing to program.
pub struct BlockingSpi<B> {
    bus: B,
}

impl<B> BlockingSpi<B> {
    /// Wrap a bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: spi::SpiBus<u8>> SpiPort for BlockingSpi<B> {
    type Error = B::Error;

    fn configure(&mut self, _config: &SpiConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_collision(&mut self) -> bool {
        false
    }

    fn start_transfer(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.bus.write(&[byte])?;
        self.bus.flush()
    }

    fn transfer_complete(&mut self) -> bool {
        true
    }
}

/// HAL [`OutputPin`] over an infallible `embedded-hal` output pin
pub struct HalPin<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin<Error = Infallible>> HalPin<P> {
    /// Wrap a pin, driving it high
    pub fn new(pin: P) -> Self {
        let mut wrapped = Self { pin, high: true };
        wrapped.set_high();
        wrapped
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin<Error = Infallible>> OutputPin for HalPin<P> {
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(e) => match e {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(e) => match e {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
