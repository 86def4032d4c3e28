pub mod line_encoder;
pub mod serial_console;
pub mod statistics;

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;

use crate::error::Result;
use crate::hal::Led;

pub use line_encoder::LineEncoder;
pub use serial_console::SerialConsole;
pub use statistics::SentenceStatistics;

/// Sends one pending byte straight back and toggles `led`. Returns whether a
/// byte was echoed.
pub fn echo<S, P>(console: &mut SerialConsole<S>, led: &mut Led<P>) -> Result<bool>
where
    S: serial::Read<u8> + serial::Write<u8>,
    P: OutputPin,
{
    match console.read_byte()? {
        Some(byte) => {
            console.write_byte(byte)?;
            led.toggle()?;
            Ok(true)
        }
        None => Ok(false),
    }
}
