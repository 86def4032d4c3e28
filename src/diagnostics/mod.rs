//! Error handling and diagnostics system

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::FAULT_BLINK_MS;
use crate::error::{Error, Result};
use crate::hal::Led;
use crate::logger::Logger;

pub struct Diagnostics {
    logger: Logger,
    last_error: Option<Error>,
    error_count: u32,
}

impl Diagnostics {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            last_error: None,
            error_count: 0,
        }
    }

    /// Records `error` and logs its code and datum.
    pub fn report_error(&mut self, error: Error) {
        self.last_error = Some(error);
        self.error_count = self.error_count.saturating_add(1);
        self.logger.log_error(error.code(), error.data());
    }

    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }
}

/// Errors the cooperative loop cannot continue from: a blown cycle budget or
/// a missing timer.
pub fn is_fatal(error: &Error) -> bool {
    matches!(error, Error::Overrun { .. } | Error::TimerPoolExhausted)
}

/// Toggles `led` `toggles` times, `FAULT_BLINK_MS` apart.
pub fn fault_blink<P, D>(led: &mut Led<P>, delay: &mut D, toggles: u32) -> Result<()>
where
    P: OutputPin,
    D: DelayMs<u32>,
{
    for _ in 0..toggles {
        led.toggle()?;
        delay.delay_ms(FAULT_BLINK_MS);
    }
    Ok(())
}

/// Blinks `led` forever. Pin failures are ignored since nothing is left to
/// report them to.
pub fn error_trap<P, D>(led: &mut Led<P>, delay: &mut D) -> !
where
    P: OutputPin,
    D: DelayMs<u32>,
{
    loop {
        let _ = fault_blink(led, delay, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogType;
    use embedded_hal_mock::delay::MockNoop;
    use embedded_hal_mock::pin::{Mock, State, Transaction};

    #[test]
    fn report_records_and_logs() {
        let mut diag = Diagnostics::new(Logger::new());
        diag.report_error(Error::Pin);
        diag.report_error(Error::Overrun { slot: 4 });
        assert_eq!(diag.error_count(), 2);
        assert_eq!(diag.last_error(), Some(Error::Overrun { slot: 4 }));

        let entry = diag.logger().entries().last().unwrap();
        assert_eq!(entry.log_type, LogType::Error);
        assert_eq!(entry.code, 0x5001);
        assert_eq!(entry.data, 4);
    }

    #[test]
    fn fatal_classification() {
        assert!(is_fatal(&Error::Overrun { slot: 0 }));
        assert!(is_fatal(&Error::TimerPoolExhausted));
        assert!(!is_fatal(&Error::Serial));
        assert!(!is_fatal(&Error::CapacityExceeded { capacity: 400 }));
    }

    #[test]
    fn fault_pattern_toggles_led() {
        let expectations = [
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ];
        let mut led = Led::new(Mock::new(&expectations)).unwrap();
        fault_blink(&mut led, &mut MockNoop::new(), 3).unwrap();
        assert!(led.is_on());
        led.free().done();
    }
}
