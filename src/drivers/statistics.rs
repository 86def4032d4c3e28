//! Per-line character statistics over the serial console

use embedded_hal::serial;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use super::serial_console::SerialConsole;
use crate::error::Result;
use crate::utils::ascii;

/// Saturating counter. Once it reaches 255 it is marked clamped and prints
/// with a `+` suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count {
    count: u8,
    clamped: bool,
}

impl Count {
    fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
        if self.count == u8::MAX {
            self.clamped = true;
        }
    }

    pub fn value(&self) -> u8 {
        self.count
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}

impl uDisplay for Count {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(f, "{}", self.count)?;
        if self.clamped {
            f.write_str("+")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SentenceStatistics {
    letters: Count,
    vowels: Count,
    digits: Count,
    whitespace: Count,
    punctuation: Count,
}

impl SentenceStatistics {
    pub const fn new() -> Self {
        const ZERO: Count = Count {
            count: 0,
            clamped: false,
        };
        Self {
            letters: ZERO,
            vowels: ZERO,
            digits: ZERO,
            whitespace: ZERO,
            punctuation: ZERO,
        }
    }

    /// Echoes and counts one pending byte. A newline is counted as
    /// whitespace and then triggers the report.
    pub fn process<S>(&mut self, console: &mut SerialConsole<S>) -> Result<()>
    where
        S: serial::Read<u8> + serial::Write<u8>,
    {
        if let Some(byte) = console.read_byte()? {
            console.write_byte(byte)?;
            self.count(byte);
            if byte == b'\n' {
                self.report(console)?;
                *self = Self::new();
            }
        }
        Ok(())
    }

    pub fn count(&mut self, c: u8) {
        if ascii::is_alpha(c) {
            self.letters.increment();
            if ascii::is_vowel(c) {
                self.vowels.increment();
            }
        } else if ascii::is_numeric(c) {
            self.digits.increment();
        } else if ascii::is_whitespace(c) {
            self.whitespace.increment();
        } else if ascii::is_punctuation(c) {
            self.punctuation.increment();
        }
    }

    pub fn report<W: uWrite + ?Sized>(&self, w: &mut W) -> core::result::Result<(), W::Error> {
        uwrite!(w, "\n=================\n")?;
        uwrite!(w, "Letters    : {}\n", self.letters)?;
        uwrite!(w, "Vowels     : {}\n", self.vowels)?;
        uwrite!(w, "Digits     : {}\n", self.digits)?;
        uwrite!(w, "Whitespace : {}\n", self.whitespace)?;
        uwrite!(w, "Punctuation: {}\n\n", self.punctuation)
    }

    pub fn letters(&self) -> Count {
        self.letters
    }

    pub fn vowels(&self) -> Count {
        self.vowels
    }

    pub fn digits(&self) -> Count {
        self.digits
    }

    pub fn whitespace(&self) -> Count {
        self.whitespace
    }

    pub fn punctuation(&self) -> Count {
        self.punctuation
    }
}
