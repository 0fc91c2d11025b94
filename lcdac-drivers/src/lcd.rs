//! Segment LCD driver
//!
//! Renders digits and blanks into the six character cells of a 1/4 duty
//! multiplexed panel. Every write is a read-modify-write of the four
//! data registers in the cell's group, replacing only the nibble the
//! cell owns so the neighbouring cell in the same registers is left
//! untouched.
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = SegmentLcd::new(registers, NullReporter);
//! lcd.init(&LcdConfig::default())?;
//! lcd.write_cell('3', 4)?;
//! lcd.show_number(1234)?;
//! ```
//!
//! Input is validated in full before the first register write, so a
//! rejected call never leaves a half-drawn glyph behind.

use heapless::Vec;
use lcdac_core::config::{ConfigError, LcdConfig};
use lcdac_core::error::{ErrorReporter, LcdError};
use lcdac_core::position::{resolve, CellPosition, ComLine, Nibble, RegisterGroup, CELL_COUNT};
use lcdac_core::segment::{self, Glyph, SegmentPattern};
use lcdac_hal::lcd::{ControlRegister, LcdRegisters};

/// Data registers cleared by [`SegmentLcd::init`]
///
/// The three cell groups plus the fourth column of each COM line.
pub const INIT_CLEARED_REGISTERS: [u8; 15] = [0, 1, 2, 3, 5, 6, 7, 8, 10, 11, 12, 13, 15, 16, 17];

/// Segment LCD driver
///
/// Owns the register bank handle for its lifetime; all display writes
/// go through `&mut self`, which serializes the read-modify-write
/// sequences on the shared register bytes.
pub struct SegmentLcd<R, E> {
    registers: R,
    reporter: E,
}

impl<R: LcdRegisters, E: ErrorReporter> SegmentLcd<R, E> {
    /// Create a driver over a register bank
    ///
    /// Does not touch the hardware; call [`init`](Self::init) once at
    /// start-up.
    pub fn new(registers: R, reporter: E) -> Self {
        Self {
            registers,
            reporter,
        }
    }

    /// Program the controller and blank every cell
    ///
    /// The configuration is validated before any register is written.
    pub fn init(&mut self, config: &LcdConfig) -> Result<(), ConfigError> {
        let control = config.control_registers()?;

        self.registers
            .write_control(ControlRegister::ControlA, control.cra);
        self.registers
            .write_control(ControlRegister::ControlB, control.crb);
        self.registers
            .write_control(ControlRegister::FrameRate, control.frr);
        self.registers
            .write_control(ControlRegister::Contrast, control.ccr);

        for index in INIT_CLEARED_REGISTERS {
            self.registers.write_data(index, 0);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "LCD configured: CRA={=u8:#x} CRB={=u8:#x} FRR={=u8:#x} CCR={=u8:#x}",
            control.cra,
            control.crb,
            control.frr,
            control.ccr
        );

        Ok(())
    }

    /// Draw a character in a cell
    ///
    /// `c` must be a decimal digit or a space and `position` must be in
    /// 2..=7. On failure the error is reported, returned, and no register
    /// is written.
    pub fn write_cell(&mut self, c: char, position: u8) -> Result<(), LcdError> {
        let resolved = resolve(position)
            .and_then(|(group, nibble)| Ok((group, nibble, segment::pattern_for(c)?)));
        let (group, nibble, pattern) = resolved.map_err(|e| self.reject(e))?;

        self.commit(group, nibble, pattern);
        Ok(())
    }

    /// Draw an already validated glyph
    pub fn write_glyph(&mut self, glyph: Glyph, cell: CellPosition) {
        self.commit(cell.group(), cell.nibble(), glyph.pattern());
    }

    /// Draw a run of characters starting at cell `start`
    ///
    /// `start` and every character and target cell are checked before
    /// the first write. An empty `text` still needs a valid `start`.
    pub fn write_str(&mut self, text: &str, start: u8) -> Result<(), LcdError> {
        let staged = match Self::stage(text, start) {
            Ok(staged) => staged,
            Err(e) => return Err(self.reject(e)),
        };

        for (cell, glyph) in staged {
            self.write_glyph(glyph, cell);
        }
        Ok(())
    }

    /// Show a number right-justified across the panel
    ///
    /// Leading cells are blanked. Values above 999 999 are rejected.
    pub fn show_number(&mut self, value: u32) -> Result<(), LcdError> {
        let glyphs = segment::render_number(value).map_err(|e| self.reject(e))?;

        for (cell, glyph) in CellPosition::all().zip(glyphs) {
            self.write_glyph(glyph, cell);
        }
        Ok(())
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        for cell in CellPosition::all() {
            self.write_glyph(Glyph::BLANK, cell);
        }
    }

    /// Pattern currently held in a cell's nibbles
    pub fn read_cell(&self, cell: CellPosition) -> u16 {
        let group = cell.group();
        let nibble = cell.nibble();

        ComLine::ALL.iter().fold(0u16, |acc, &com| {
            let byte = self.registers.read_data(group.data_register(com));
            acc | (u16::from(nibble.extract(byte)) << (com.index() * 4))
        })
    }

    /// Borrow the register bank
    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Release the register bank and reporter
    pub fn release(self) -> (R, E) {
        (self.registers, self.reporter)
    }

    fn stage(text: &str, start: u8) -> Result<Vec<(CellPosition, Glyph), CELL_COUNT>, LcdError> {
        CellPosition::new(start)?;
        let mut staged = Vec::new();

        for (offset, c) in text.chars().enumerate() {
            let index = u8::try_from(offset)
                .ok()
                .and_then(|offset| start.checked_add(offset))
                .ok_or(LcdError::InvalidPosition)?;
            let cell = CellPosition::new(index)?;
            let glyph = Glyph::from_char(c)?;
            staged
                .push((cell, glyph))
                .map_err(|_| LcdError::InvalidPosition)?;
        }

        Ok(staged)
    }

    fn commit(&mut self, group: RegisterGroup, nibble: Nibble, pattern: SegmentPattern) {
        for com in ComLine::ALL {
            let index = group.data_register(com);
            let old = self.registers.read_data(index);
            self.registers
                .write_data(index, nibble.merge(old, pattern.nibble(com)));
        }
    }

    fn reject(&mut self, error: LcdError) -> LcdError {
        #[cfg(feature = "defmt")]
        defmt::warn!("LCD write rejected: {}", error);

        self.reporter.report(error.into());
        error
    }
}
