//! LCD controller register abstractions
//!
//! The segment LCD controller exposes a bank of 8-bit data registers
//! (`LCDDR0`..`LCDDR18`) and four control registers. Data register `n`
//! is addressed by its index; the controller latches whatever is in the
//! bank on every frame, so a write is visible on the next refresh.

/// Number of addressable data register slots (`LCDDR0`..`LCDDR18`)
pub const DATA_REGISTER_COUNT: usize = 19;

/// LCD controller control registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlRegister {
    /// `LCDCRA` - enable, waveform, interrupt, blanking
    ControlA,
    /// `LCDCRB` - clock source, bias, duty, port mask
    ControlB,
    /// `LCDFRR` - frame rate prescaler and clock divide
    FrameRate,
    /// `LCDCCR` - contrast (drive voltage)
    Contrast,
}

impl ControlRegister {
    /// All control registers, in the order they are programmed
    pub const ALL: [ControlRegister; 4] = [
        ControlRegister::ControlA,
        ControlRegister::ControlB,
        ControlRegister::FrameRate,
        ControlRegister::Contrast,
    ];

    /// Slot used by [`MemoryRegisters`]
    pub fn index(self) -> usize {
        match self {
            ControlRegister::ControlA => 0,
            ControlRegister::ControlB => 1,
            ControlRegister::FrameRate => 2,
            ControlRegister::Contrast => 3,
        }
    }
}

/// Access to the LCD controller's register bank
///
/// The bank is shared hardware state. Implementations perform plain
/// volatile byte accesses; any read-modify-write sequencing is the
/// caller's responsibility.
pub trait LcdRegisters {
    /// Read data register `LCDDR<index>`
    fn read_data(&self, index: u8) -> u8;

    /// Write data register `LCDDR<index>`
    fn write_data(&mut self, index: u8, value: u8);

    /// Write a control register
    fn write_control(&mut self, register: ControlRegister, value: u8);
}

impl<T: LcdRegisters + ?Sized> LcdRegisters for &mut T {
    fn read_data(&self, index: u8) -> u8 {
        (**self).read_data(index)
    }

    fn write_data(&mut self, index: u8, value: u8) {
        (**self).write_data(index, value)
    }

    fn write_control(&mut self, register: ControlRegister, value: u8) {
        (**self).write_control(register, value)
    }
}

/// RAM-backed register bank
///
/// Simulates the controller's register memory for host tests and
/// off-target rendering. Counts every write so callers can assert that
/// a rejected operation left the bank untouched. Accesses to indices
/// beyond [`DATA_REGISTER_COUNT`] read as zero and are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegisters {
    data: [u8; DATA_REGISTER_COUNT],
    control: [u8; 4],
    writes: usize,
}

impl Default for MemoryRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRegisters {
    /// Create a zeroed register bank
    pub const fn new() -> Self {
        Self {
            data: [0; DATA_REGISTER_COUNT],
            control: [0; 4],
            writes: 0,
        }
    }

    /// Create a bank with every data register preset to `value`
    pub const fn filled(value: u8) -> Self {
        Self {
            data: [value; DATA_REGISTER_COUNT],
            control: [0; 4],
            writes: 0,
        }
    }

    /// Snapshot of the data registers
    pub fn data(&self) -> &[u8; DATA_REGISTER_COUNT] {
        &self.data
    }

    /// Last value written to a control register
    pub fn control(&self, register: ControlRegister) -> u8 {
        self.control[register.index()]
    }

    /// Total number of register writes performed
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LcdRegisters for MemoryRegisters {
    fn read_data(&self, index: u8) -> u8 {
        self.data.get(index as usize).copied().unwrap_or(0)
    }

    fn write_data(&mut self, index: u8, value: u8) {
        if let Some(slot) = self.data.get_mut(index as usize) {
            *slot = value;
            self.writes += 1;
        }
    }

    fn write_control(&mut self, register: ControlRegister, value: u8) {
        self.control[register.index()] = value;
        self.writes += 1;
    }
}
