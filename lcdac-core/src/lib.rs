//! Board-agnostic core logic for the lcdac drivers
//!
//! This crate contains the parts of the display and converter drivers that
//! do not touch hardware:
//!
//! - Segment table (character to segment pattern)
//! - Cell position resolution (cell to register group and nibble)
//! - Error taxonomy and the error-reporting collaborator
//! - LCD controller configuration
//! - D/A sample framing

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dac;
pub mod error;
pub mod position;
pub mod segment;

pub use error::{ErrorKind, ErrorReporter, LcdError};
pub use position::{CellPosition, ComLine, Nibble, RegisterGroup};
pub use segment::{Glyph, SegmentPattern};
