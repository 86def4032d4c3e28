//! RAM event log
//!
//! Records are kept in a fixed ring; once it is full the oldest record is
//! overwritten. [`Logger::flush`] drains them as text to any `ufmt` writer,
//! normally the serial console.

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::config::LOG_CAPACITY;
use crate::utils::Ring;

/// Firmware started.
pub const SYS_BOOT: u16 = 0x0001;
/// Beacon message handed to the encoder. Data is the message length.
pub const SYS_MESSAGE_SUBMITTED: u16 = 0x0002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp_ms: u32,
    pub log_type: LogType,
    pub code: u16,
    pub data: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    System = 0,
    Error = 1,
    Debug = 2,
}

impl LogType {
    fn tag(self) -> &'static str {
        match self {
            LogType::System => "SYS",
            LogType::Error => "ERR",
            LogType::Debug => "DBG",
        }
    }
}

struct Hex16(u16);

impl uDisplay for Hex16 {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        let mut buf = [0u8; 4];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = HEX_CHARS[((self.0 >> (12 - 4 * i)) & 0xF) as usize];
        }
        // Only ASCII digits were written.
        f.write_str(core::str::from_utf8(&buf).unwrap_or("????"))
    }
}

impl uDisplay for LogEntry {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "[{}] t={} code=0x{} data={}",
            self.log_type.tag(),
            self.timestamp_ms,
            Hex16(self.code),
            self.data
        )
    }
}

pub struct Logger {
    entries: Ring<LogEntry, LOG_CAPACITY>,
    timestamp_ms: u32,
    overwritten: u32,
}

impl Logger {
    pub const fn new() -> Self {
        Self {
            entries: Ring::new(),
            timestamp_ms: 0,
            overwritten: 0,
        }
    }

    /// Timestamp stamped on subsequent records.
    pub fn set_timestamp(&mut self, ms: u32) {
        self.timestamp_ms = ms;
    }

    pub fn log_system(&mut self, code: u16, data: u32) {
        self.log_entry(LogType::System, code, data)
    }

    pub fn log_error(&mut self, code: u16, data: u32) {
        self.log_entry(LogType::Error, code, data)
    }

    pub fn log_debug(&mut self, code: u16, data: u32) {
        self.log_entry(LogType::Debug, code, data)
    }

    fn log_entry(&mut self, log_type: LogType, code: u16, data: u32) {
        let entry = LogEntry {
            timestamp_ms: self.timestamp_ms,
            log_type,
            code,
            data,
        };

        if self.entries.is_full() {
            let _ = self.entries.pop();
            self.overwritten = self.overwritten.saturating_add(1);
        }
        let _ = self.entries.push(entry);
    }

    /// Writes every record, oldest first, one per line. A record is only
    /// removed once it has been written.
    pub fn flush<W: uWrite + ?Sized>(&mut self, w: &mut W) -> Result<(), W::Error> {
        while let Some(entry) = self.entries.peek() {
            uwrite!(w, "{}\r\n", entry)?;
            let _ = self.entries.pop();
        }
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = LogEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records lost to a full ring.
    pub fn overwritten(&self) -> u32 {
        self.overwritten
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
