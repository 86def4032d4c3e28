//! Crate-wide error type
//!
//! Every failure the firmware can observe is reported as an [`Error`]. The
//! numeric [`Error::code`] groups them into families so they fit in a log
//! record.

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Every software timer in the pool has been handed out.
    TimerPoolExhausted,
    /// The minor-cycle interrupt fired while the PRIMARY phase was still
    /// running.
    Overrun { slot: usize },
    /// A slot index outside the dispatch table.
    InvalidSlot { slot: usize },
    /// No room left in a task table.
    TaskTableFull,
    /// A compiled Morse sequence would not fit its buffer.
    CapacityExceeded { capacity: usize },
    /// A timer period that the hardware cannot represent.
    InvalidPeriod,
    /// Driving an output pin failed.
    Pin,
    /// The serial port rejected a byte.
    Serial,
}

impl Error {
    /// Diagnostic code for logging.
    pub fn code(&self) -> u16 {
        match self {
            Error::Pin => 0x1001,
            Error::Serial => 0x3001,
            Error::Overrun { .. } => 0x5001,
            Error::InvalidPeriod => 0x5002,
            Error::InvalidSlot { .. } => 0x5003,
            Error::TimerPoolExhausted => 0x6001,
            Error::TaskTableFull => 0x6002,
            Error::CapacityExceeded { .. } => 0x6003,
        }
    }

    /// Extra datum stored alongside the code.
    pub fn data(&self) -> u32 {
        match *self {
            Error::Overrun { slot } | Error::InvalidSlot { slot } => slot as u32,
            Error::CapacityExceeded { capacity } => capacity as u32,
            _ => 0,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Error::TimerPoolExhausted => "timer pool exhausted",
            Error::Overrun { .. } => "minor cycle overrun",
            Error::InvalidSlot { .. } => "invalid scheduler slot",
            Error::TaskTableFull => "task table full",
            Error::CapacityExceeded { .. } => "morse sequence capacity exceeded",
            Error::InvalidPeriod => "invalid timer period",
            Error::Pin => "output pin failure",
            Error::Serial => "serial write failure",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Overrun { slot } | Error::InvalidSlot { slot } => {
                write!(f, "{} (slot {})", self.describe(), slot)
            }
            Error::CapacityExceeded { capacity } => {
                write!(f, "{} ({} units)", self.describe(), capacity)
            }
            _ => f.write_str(self.describe()),
        }
    }
}

impl ufmt::uDisplay for Error {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> core::result::Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.describe())?;
        match *self {
            Error::Overrun { slot } | Error::InvalidSlot { slot } => {
                ufmt::uwrite!(f, " (slot {})", slot)
            }
            Error::CapacityExceeded { capacity } => ufmt::uwrite!(f, " ({} units)", capacity),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn codes_are_grouped_by_family() {
        assert_eq!(Error::Pin.code() & 0xF000, 0x1000);
        assert_eq!(Error::Serial.code() & 0xF000, 0x3000);
        assert_eq!(Error::Overrun { slot: 2 }.code() & 0xF000, 0x5000);
        assert_eq!(Error::TimerPoolExhausted.code() & 0xF000, 0x6000);
    }

    #[test]
    fn display_includes_slot() {
        assert_eq!(
            Error::Overrun { slot: 7 }.to_string(),
            "minor cycle overrun (slot 7)"
        );
        assert_eq!(Error::Overrun { slot: 7 }.data(), 7);
    }
}
