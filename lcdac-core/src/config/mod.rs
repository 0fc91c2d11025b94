//! Configuration types
//!
//! Controller settings that are applied once at start-up.

pub mod lcd;

pub use lcd::*;
