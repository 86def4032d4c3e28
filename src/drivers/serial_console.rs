use embedded_hal::serial;

use crate::error::{Error, Result};

/// Text console over any non-blocking serial port.
///
/// Writes block until the port accepts each byte. Reads never block.
pub struct SerialConsole<S> {
    serial: S,
}

impl<S> SerialConsole<S>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    /// Next received byte, if any.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.serial.read() {
            Ok(byte) => Ok(Some(byte)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(_)) => Err(Error::Serial),
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        nb::block!(self.serial.write(byte)).map_err(|_| Error::Serial)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        bytes.iter().try_for_each(|&b| self.write_byte(b))
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_line(&mut self, s: &str) -> Result<()> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    // Debug helper - print hex value
    pub fn write_hex(&mut self, val: u8) -> Result<()> {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        self.write_byte(HEX_CHARS[(val >> 4) as usize])?;
        self.write_byte(HEX_CHARS[(val & 0xF) as usize])
    }

    pub fn debug(&mut self, msg: &str, val: u8) -> Result<()> {
        self.write_str("[DBG] ")?;
        self.write_str(msg)?;
        self.write_str(": 0x")?;
        self.write_hex(val)?;
        self.write_str("\r\n")
    }

    pub fn flush(&mut self) -> Result<()> {
        nb::block!(self.serial.flush()).map_err(|_| Error::Serial)
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn free(self) -> S {
        self.serial
    }
}

impl<S> ufmt::uWrite for SerialConsole<S>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    type Error = Error;

    fn write_str(&mut self, s: &str) -> Result<()> {
        SerialConsole::write_str(self, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::serial::{Mock, Transaction};

    #[test]
    fn debug_line_format() {
        let expectations = [Transaction::write_many(b"[DBG] rx: 0x3F\r\n")];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        console.debug("rx", 0x3F).unwrap();
        console.free().done();
    }

    #[test]
    fn reads_do_not_block() {
        let expectations = [Transaction::read(b'k'), Transaction::read_error(nb::Error::WouldBlock)];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        assert_eq!(console.read_byte(), Ok(Some(b'k')));
        assert_eq!(console.read_byte(), Ok(None));
        console.free().done();
    }

    #[test]
    fn port_errors_are_reported() {
        let expectations = [
            Transaction::read_error(nb::Error::Other(embedded_hal_mock::MockError::Io(
                std::io::ErrorKind::Other,
            ))),
            Transaction::write_error(
                b'x',
                nb::Error::Other(embedded_hal_mock::MockError::Io(std::io::ErrorKind::Other)),
            ),
        ];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        assert_eq!(console.read_byte(), Err(Error::Serial));
        assert_eq!(console.write_byte(b'x'), Err(Error::Serial));
        console.free().done();
    }

    #[test]
    fn ufmt_goes_through_the_port() {
        let expectations = [Transaction::write_many(b"t=42\r\n")];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        ufmt::uwrite!(console, "t={}", 42u32).unwrap();
        console.write_str("\r\n").unwrap();
        console.free().done();
    }
}
