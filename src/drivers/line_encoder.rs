//! Serial command entry for the Morse encoder
//!
//! Bytes typed on the console are echoed and buffered until a newline, which
//! submits the line for one-shot playback. Characters the encoder has no use
//! for are swallowed without echo.

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;
use heapless::Vec;

use super::serial_console::SerialConsole;
use crate::config::MAX_MESSAGE_LEN;
use crate::error::Result;
use crate::morse::MorseEncoder;

pub const BUSY_MESSAGE: &str = "\n\rERROR: Encoding already in progress!\n\r";

fn is_ignored(byte: u8) -> bool {
    matches!(
        byte,
        b'\0' | b'~' | b'`' | b'@' | b'#' | b'$' | b'%' | b'^' | b'&' | b'*' | b'(' | b')'
            | b'-' | b'_' | b'=' | b'+' | b'[' | b'{' | b']' | b'}' | b'\\' | b'|' | b';'
            | b':' | b'\'' | b'"' | b',' | b'<' | b'/' | b'\r'
    )
}

#[derive(Debug, Default)]
pub struct LineEncoder {
    line: Vec<u8, MAX_MESSAGE_LEN>,
}

impl LineEncoder {
    pub const fn new() -> Self {
        Self { line: Vec::new() }
    }

    /// Handles at most one pending byte. Call as often as possible so the
    /// receive ring never overflows.
    pub fn process<S, P>(
        &mut self,
        console: &mut SerialConsole<S>,
        morse: &mut MorseEncoder<P>,
    ) -> Result<()>
    where
        S: serial::Read<u8> + serial::Write<u8>,
        P: OutputPin,
    {
        match console.read_byte()? {
            Some(byte) => self.handle(byte, console, morse),
            None => Ok(()),
        }
    }

    pub fn handle<S, P>(
        &mut self,
        byte: u8,
        console: &mut SerialConsole<S>,
        morse: &mut MorseEncoder<P>,
    ) -> Result<()>
    where
        S: serial::Read<u8> + serial::Write<u8>,
        P: OutputPin,
    {
        match byte {
            b'\n' => self.finish_line(console, morse),
            b if is_ignored(b) => Ok(()),
            b => {
                // Full line: drop further input until the newline.
                if self.line.push(b).is_ok() {
                    console.write_byte(b)?;
                }
                Ok(())
            }
        }
    }

    fn finish_line<S, P>(
        &mut self,
        console: &mut SerialConsole<S>,
        morse: &mut MorseEncoder<P>,
    ) -> Result<()>
    where
        S: serial::Read<u8> + serial::Write<u8>,
        P: OutputPin,
    {
        let outcome = if morse.is_encoding() {
            console.write_str(BUSY_MESSAGE)
        } else {
            morse.submit(&self.line, false)
        };
        self.line.clear();
        let newline = console.write_str("\n\r");
        outcome.and(newline)
    }

    /// Bytes buffered so far.
    pub fn line(&self) -> &[u8] {
        &self.line
    }
}
