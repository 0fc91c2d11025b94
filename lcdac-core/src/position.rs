//! Character cell addressing
//!
//! The panel has six addressable character cells, numbered 2 through 7.
//! Cells are paired into register groups: each group is four data
//! registers (one per COM line) and each register carries one nibble for
//! each cell of the pair.
//!
//! ```text
//!  cell      2   3   4   5   6   7
//!  group     0   0   1   1   2   2
//!  nibble    lo  hi  lo  hi  lo  hi
//! ```
//!
//! Group `g` on COM line `c` lives in data register `LCDDR(g + 5c)`.

use crate::error::LcdError;

/// Lowest addressable cell
pub const FIRST_CELL: u8 = 2;

/// Highest addressable cell
pub const LAST_CELL: u8 = 7;

/// Number of addressable cells
pub const CELL_COUNT: usize = (LAST_CELL - FIRST_CELL + 1) as usize;

/// Register index distance between consecutive COM lines
pub const COM_STRIDE: u8 = 5;

/// COM (multiplex) line of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComLine {
    Com0,
    Com1,
    Com2,
    Com3,
}

impl ComLine {
    /// All COM lines in register order
    pub const ALL: [ComLine; 4] = [ComLine::Com0, ComLine::Com1, ComLine::Com2, ComLine::Com3];

    /// Line number (0-3)
    pub const fn index(self) -> u8 {
        match self {
            ComLine::Com0 => 0,
            ComLine::Com1 => 1,
            ComLine::Com2 => 2,
            ComLine::Com3 => 3,
        }
    }
}

/// One of the three register groups holding a pair of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterGroup {
    /// Cells 2 and 3
    Group0,
    /// Cells 4 and 5
    Group1,
    /// Cells 6 and 7
    Group2,
}

impl RegisterGroup {
    /// Look up a group by its index (0-2)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(RegisterGroup::Group0),
            1 => Some(RegisterGroup::Group1),
            2 => Some(RegisterGroup::Group2),
            _ => None,
        }
    }

    /// Group index (0-2)
    pub const fn index(self) -> u8 {
        match self {
            RegisterGroup::Group0 => 0,
            RegisterGroup::Group1 => 1,
            RegisterGroup::Group2 => 2,
        }
    }

    /// Data register index for this group on a COM line
    pub const fn data_register(self, com: ComLine) -> u8 {
        self.index() + COM_STRIDE * com.index()
    }

    /// Data register indices for COM0..COM3
    pub fn data_registers(self) -> [u8; 4] {
        ComLine::ALL.map(|com| self.data_register(com))
    }
}

/// Half of a register byte owned by a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Nibble {
    /// Bits 3..0 (even cells)
    Low,
    /// Bits 7..4 (odd cells)
    High,
}

impl Nibble {
    /// Replace this half of `old` with `value`, keeping the other half
    ///
    /// Only the low four bits of `value` are used.
    pub const fn merge(self, old: u8, value: u8) -> u8 {
        let value = value & 0x0F;
        match self {
            Nibble::Low => (old & 0xF0) | value,
            Nibble::High => (old & 0x0F) | (value << 4),
        }
    }

    /// Read this half of `byte`
    pub const fn extract(self, byte: u8) -> u8 {
        match self {
            Nibble::Low => byte & 0x0F,
            Nibble::High => byte >> 4,
        }
    }
}

/// A validated character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellPosition(u8);

impl CellPosition {
    /// Validate a cell index
    pub fn new(index: u8) -> Result<Self, LcdError> {
        if (FIRST_CELL..=LAST_CELL).contains(&index) {
            Ok(Self(index))
        } else {
            Err(LcdError::InvalidPosition)
        }
    }

    /// Every cell, leftmost first
    pub fn all() -> impl Iterator<Item = CellPosition> {
        (FIRST_CELL..=LAST_CELL).map(CellPosition)
    }

    /// Raw cell index
    pub fn index(self) -> u8 {
        self.0
    }

    /// Register group holding this cell
    pub fn group(self) -> RegisterGroup {
        self.location().0
    }

    /// Nibble this cell owns within each register of its group
    pub fn nibble(self) -> Nibble {
        self.location().1
    }

    /// group = `(index / 2) - 1`, nibble = `index % 2`
    fn location(self) -> (RegisterGroup, Nibble) {
        let group = match RegisterGroup::from_index(self.0 / 2 - 1) {
            Some(group) => group,
            None => unreachable!("cell {} outside 2..=7", self.0),
        };
        let nibble = if self.0 % 2 == 0 {
            Nibble::Low
        } else {
            Nibble::High
        };

        (group, nibble)
    }
}

impl TryFrom<u8> for CellPosition {
    type Error = LcdError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

/// Resolve a cell index to its register group and nibble
///
/// Indices outside 2..=7 fail with [`LcdError::InvalidPosition`].
pub fn resolve(index: u8) -> Result<(RegisterGroup, Nibble), LcdError> {
    CellPosition::new(index).map(CellPosition::location)
}
