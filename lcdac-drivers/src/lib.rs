//! Hardware driver implementations
//!
//! This crate provides the drivers built on the traits in `lcdac-hal`:
//!
//! - Segment LCD (character cell writes, numbers, clearing)
//! - SPI D/A converter (12-bit sample writes)
//! - Adapters for `embedded-hal` buses and pins

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod dac;
pub mod lcd;

pub use bus::{BlockingSpi, HalPin};
pub use dac::{DacError, DtoA, DtoAConfig};
pub use lcd::SegmentLcd;
