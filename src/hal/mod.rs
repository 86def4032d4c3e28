pub mod gpio;
pub mod systick;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use embedded_hal::digital::v2::OutputPin;
pub use gpio::Led;
pub use systick::{reload_for, PeriodicInterrupt};
pub use timer::{prescaler_for, TickSource, Tim1Counter};
pub use uart::BufferedUart;

#[cfg(feature = "systick")]
pub use systick::SysTickInterrupt;
