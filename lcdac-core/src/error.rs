//! Error taxonomy and reporting

/// Validation failures from the display engine
///
/// All of these are raised before any register is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Character is not a decimal digit or a space
    InvalidCharacter,
    /// Cell index outside 2..=7
    InvalidPosition,
    /// Number has more digits than the panel has cells
    NumberTooLarge,
}

/// Error classification handed to an [`ErrorReporter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// LCD write rejected: bad character
    LcdInvalidCharacter,
    /// LCD write rejected: bad cell index
    LcdInvalidPosition,
    /// LCD number does not fit the panel
    LcdNumberTooLarge,
    /// SPI write collision flagged during a D/A transfer
    DacWriteCollision,
    /// D/A transfer-complete flag never set
    DacTimeout,
}

impl ErrorKind {
    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::LcdInvalidCharacter => "LCD: invalid character",
            ErrorKind::LcdInvalidPosition => "LCD: invalid position",
            ErrorKind::LcdNumberTooLarge => "LCD: number too large",
            ErrorKind::DacWriteCollision => "D/A: write collision",
            ErrorKind::DacTimeout => "D/A: transfer timeout",
        }
    }
}

impl From<LcdError> for ErrorKind {
    fn from(e: LcdError) -> Self {
        match e {
            LcdError::InvalidCharacter => ErrorKind::LcdInvalidCharacter,
            LcdError::InvalidPosition => ErrorKind::LcdInvalidPosition,
            LcdError::NumberTooLarge => ErrorKind::LcdNumberTooLarge,
        }
    }
}

/// Sink for errors the drivers detect
///
/// Reporting is one-way: the sink cannot influence the operation that
/// raised the error.
pub trait ErrorReporter {
    /// Record an error
    fn report(&mut self, error: ErrorKind);
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for &mut T {
    fn report(&mut self, error: ErrorKind) {
        (**self).report(error)
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&mut self, _error: ErrorKind) {}
}

/// Reporter that logs through defmt
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtReporter;

#[cfg(feature = "defmt")]
impl ErrorReporter for DefmtReporter {
    fn report(&mut self, error: ErrorKind) {
        defmt::error!("{}", error.description());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingReporter {
        last: Option<ErrorKind>,
        count: usize,
    }

    impl ErrorReporter for CountingReporter {
        fn report(&mut self, error: ErrorKind) {
            self.last = Some(error);
            self.count += 1;
        }
    }

    #[test]
    fn test_lcd_error_classification() {
        assert_eq!(
            ErrorKind::from(LcdError::InvalidCharacter),
            ErrorKind::LcdInvalidCharacter
        );
        assert_eq!(
            ErrorKind::from(LcdError::InvalidPosition),
            ErrorKind::LcdInvalidPosition
        );
        assert_eq!(
            ErrorKind::from(LcdError::NumberTooLarge),
            ErrorKind::LcdNumberTooLarge
        );
    }

    /// Takes the reporter by value, as the drivers do
    fn report_transfer_faults<R: ErrorReporter>(mut reporter: R) {
        reporter.report(ErrorKind::DacWriteCollision);
        reporter.report(ErrorKind::DacTimeout);
    }

    #[test]
    fn test_reporting_through_mut_ref() {
        let mut reporter = CountingReporter {
            last: None,
            count: 0,
        };

        // R = &mut CountingReporter goes through the forwarding impl
        report_transfer_faults(&mut reporter);
        report_transfer_faults(&mut &mut reporter);

        assert_eq!(reporter.count, 4);
        assert_eq!(reporter.last, Some(ErrorKind::DacTimeout));
    }

    #[test]
    fn test_descriptions_are_distinct() {
        let kinds = [
            ErrorKind::LcdInvalidCharacter,
            ErrorKind::LcdInvalidPosition,
            ErrorKind::LcdNumberTooLarge,
            ErrorKind::DacWriteCollision,
            ErrorKind::DacTimeout,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.description(), b.description());
            }
        }
    }
}
