//! lcdac Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the display and converter drivers
//! are written against. A board crate implements them on top of its
//! memory-mapped registers; tests implement them in RAM.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lcdac-drivers (SegmentLcd, DtoA)       │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lcdac-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ LCDDRx / LCDC │       │  SPCR / SPSR  │
//! │   registers   │       │   SPDR, PORTB │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`lcd::LcdRegisters`] - LCD controller data and control registers
//! - [`spi::SpiPort`] - Byte-at-a-time SPI master with status polling
//! - [`gpio::OutputPin`] - Digital output (D/A chip select)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod lcd;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use lcd::{ControlRegister, LcdRegisters, MemoryRegisters};
pub use spi::{SpiConfig, SpiPort};
