//! GPIO pin abstractions
//!
//! The only discrete output the drivers need is the D/A converter's
//! active-low chip select line.

/// Digital output pin
///
/// Implementations should handle the actual port register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Active-low device select line
///
/// Wraps an output pin so callers speak in terms of selecting and
/// deselecting the device rather than pin levels.
pub struct ChipSelect<P> {
    pin: P,
}

impl<P: OutputPin> ChipSelect<P> {
    /// Take ownership of the pin and leave the device deselected
    pub fn new(pin: P) -> Self {
        let mut cs = Self { pin };
        cs.deselect();
        cs
    }

    /// Drive the line low
    pub fn select(&mut self) {
        self.pin.set_low();
    }

    /// Drive the line high
    pub fn deselect(&mut self) {
        self.pin.set_high();
    }

    /// Whether the device is currently selected
    pub fn is_selected(&self) -> bool {
        self.pin.is_set_low()
    }

    /// Release the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
        writes: u8,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_chip_select_starts_deselected() {
        let cs = ChipSelect::new(MockPin {
            high: false,
            writes: 0,
        });
        assert!(!cs.is_selected());

        let pin = cs.release();
        assert!(pin.is_set_high());
        assert_eq!(pin.writes, 1);
    }

    #[test]
    fn test_chip_select_is_active_low() {
        let mut cs = ChipSelect::new(MockPin {
            high: true,
            writes: 0,
        });

        cs.select();
        assert!(cs.is_selected());

        cs.deselect();
        assert!(!cs.is_selected());
    }

    #[test]
    fn test_set_state() {
        let mut pin = MockPin {
            high: false,
            writes: 0,
        };
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(pin.is_set_low());
    }
}
