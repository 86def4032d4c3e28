//! Periodic interrupt source
//!
//! The scheduler needs one interrupt per minor cycle. On the Cortex-M3 that is
//! the SysTick exception, clocked from the core clock divided by
//! [`SYS_TICK_CLK_DIV`]. The handler itself lives with the board start-up
//! code; it calls [`Frame::on_interrupt`][crate::rtos::Frame::on_interrupt].

use crate::config::{CPU_FREQ_HZ, SYS_TICK_CLK_DIV, SYS_TICK_MAX_TICKS};
use crate::error::{Error, Result};

pub const USEC_PER_SEC: u32 = 1_000_000;
pub const MSEC_PER_SEC: u32 = 1_000;
pub const SEC_PER_SEC: u32 = 1;

/// A hardware interrupt that fires once per configured period.
pub trait PeriodicInterrupt {
    /// Reprograms the period and (re)starts the interrupt.
    fn set_period(&mut self, duration: u32, units_per_second: u32) -> Result<()>;
    fn enable(&mut self);
    fn disable(&mut self);

    fn set_period_us(&mut self, us: u32) -> Result<()> {
        self.set_period(us, USEC_PER_SEC)
    }

    fn set_period_ms(&mut self, ms: u32) -> Result<()> {
        self.set_period(ms, MSEC_PER_SEC)
    }

    fn set_period_s(&mut self, s: u32) -> Result<()> {
        self.set_period(s, SEC_PER_SEC)
    }
}

/// SysTick ticks for `duration` expressed in `1 / units_per_second` seconds.
///
/// Zero periods, periods that round down to zero ticks, and periods beyond
/// the 24-bit counter are rejected.
pub fn reload_for(duration: u32, units_per_second: u32) -> Result<u32> {
    if units_per_second == 0 {
        return Err(Error::InvalidPeriod);
    }
    let per_unit = (CPU_FREQ_HZ / SYS_TICK_CLK_DIV) / units_per_second;
    let ticks = duration
        .checked_mul(per_unit)
        .ok_or(Error::InvalidPeriod)?;
    match ticks {
        0 => Err(Error::InvalidPeriod),
        t if t > SYS_TICK_MAX_TICKS => Err(Error::InvalidPeriod),
        // The counter spends one tick at zero, so load one less.
        t => Ok(t - 1),
    }
}

#[cfg(feature = "systick")]
pub use self::cortex::SysTickInterrupt;

#[cfg(feature = "systick")]
mod cortex {
    use cortex_m::peripheral::{syst::SystClkSource, SYST};

    use super::{reload_for, PeriodicInterrupt};
    use crate::error::Result;

    pub struct SysTickInterrupt {
        syst: SYST,
    }

    impl SysTickInterrupt {
        pub fn new(mut syst: SYST) -> Self {
            syst.disable_counter();
            syst.set_clock_source(SystClkSource::External);
            syst.enable_interrupt();
            Self { syst }
        }

        pub fn free(self) -> SYST {
            self.syst
        }
    }

    impl PeriodicInterrupt for SysTickInterrupt {
        fn set_period(&mut self, duration: u32, units_per_second: u32) -> Result<()> {
            let result = reload_for(duration, units_per_second).map(|reload| {
                self.syst.disable_counter();
                self.syst.set_reload(reload);
                self.syst.clear_current();
            });
            // A failed update leaves the old period running.
            self.syst.enable_counter();
            result
        }

        fn enable(&mut self) {
            self.syst.enable_counter();
        }

        fn disable(&mut self) {
            self.syst.disable_counter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_cycle_reload() {
        // 1MHz SysTick clock, 100ms period.
        assert_eq!(reload_for(100, MSEC_PER_SEC), Ok(99_999));
        assert_eq!(reload_for(500, USEC_PER_SEC), Ok(499));
    }

    #[test]
    fn out_of_range_periods() {
        assert_eq!(reload_for(0, MSEC_PER_SEC), Err(Error::InvalidPeriod));
        assert_eq!(reload_for(17, SEC_PER_SEC), Err(Error::InvalidPeriod));
        assert_eq!(reload_for(1, 0), Err(Error::InvalidPeriod));
        assert_eq!(reload_for(u32::MAX, MSEC_PER_SEC), Err(Error::InvalidPeriod));
    }

    #[test]
    fn longest_period_fits_counter() {
        assert_eq!(reload_for(16, SEC_PER_SEC), Ok(15_999_999));
    }

    struct Recorder {
        reloads: Vec<u32>,
        enabled: bool,
    }

    impl PeriodicInterrupt for Recorder {
        fn set_period(&mut self, duration: u32, units_per_second: u32) -> Result<()> {
            let reload = reload_for(duration, units_per_second)?;
            self.reloads.push(reload);
            self.enabled = true;
            Ok(())
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn disable(&mut self) {
            self.enabled = false;
        }
    }

    #[test]
    fn unit_helpers_scale_the_period() {
        let mut irq = Recorder { reloads: Vec::new(), enabled: false };
        irq.set_period_ms(100).unwrap();
        irq.set_period_us(100_000).unwrap();
        irq.set_period_s(1).unwrap();
        assert_eq!(irq.reloads, vec![99_999, 99_999, 999_999]);
        irq.disable();
        assert!(!irq.enabled);
    }
}
