//! Free-running hardware tick counter
//!
//! TIM1 is configured as a 16-bit up counter at 2kHz and never stopped. The
//! software timers only ever read it, so the hardware contract is a single
//! trait.

use crate::config::{CPU_FREQ_HZ, TIMER_WRAP_OFFSET, USEC_PER_TIMER_TICK};
use crate::error::{Error, Result};

/// A counter that increments at a fixed rate and wraps to zero after
/// `WRAP_OFFSET - 1`.
pub trait TickSource {
    /// Counter modulus. A 16-bit counter wraps at `0x1_0000`.
    const WRAP_OFFSET: u32;
    /// Microseconds represented by one tick.
    const MICROS_PER_TICK: u32;

    fn read_ticks(&self) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    const WRAP_OFFSET: u32 = T::WRAP_OFFSET;
    const MICROS_PER_TICK: u32 = T::MICROS_PER_TICK;

    #[inline]
    fn read_ticks(&self) -> u32 {
        (**self).read_ticks()
    }
}

/// Prescaler that divides `cpu_hz` down to `tick_hz`.
///
/// The division must be exact, otherwise every elapsed-time reading would
/// drift, so an inexact or out-of-range ratio is rejected.
pub fn prescaler_for(cpu_hz: u32, tick_hz: u32) -> Result<u16> {
    if tick_hz == 0 || tick_hz > cpu_hz {
        return Err(Error::InvalidPeriod);
    }
    let divider = cpu_hz / tick_hz;
    if divider - 1 > u16::MAX as u32 {
        return Err(Error::InvalidPeriod);
    }
    if divider * tick_hz != cpu_hz {
        return Err(Error::InvalidPeriod);
    }
    Ok((divider - 1) as u16)
}

/// TIM1 prescaler for the configured tick period.
pub fn sw_timer_prescaler() -> Result<u16> {
    prescaler_for(CPU_FREQ_HZ, 1_000_000 / USEC_PER_TIMER_TICK)
}

/// Raw TIM1 `CNT` access.
///
/// `cnt` must point at the counter register of an enabled timer. The board
/// layer constructs this once after clock bring-up.
pub struct Tim1Counter {
    cnt: *const u32,
}

/// TIM1 `CNT` on the STM32F103.
#[cfg(feature = "stm32f103")]
pub const TIM1_CNT: usize = 0x4001_2C24;

impl Tim1Counter {
    /// The board's TIM1.
    ///
    /// # Safety
    ///
    /// TIM1 must be clocked and enabled before the counter is read.
    #[cfg(feature = "stm32f103")]
    pub const unsafe fn board() -> Self {
        Self::new(TIM1_CNT as *const u32)
    }

    /// # Safety
    ///
    /// `cnt` must be the address of a readable TIM1 `CNT` register for the
    /// whole lifetime of the returned value.
    pub const unsafe fn new(cnt: *const u32) -> Self {
        Self { cnt }
    }
}

impl TickSource for Tim1Counter {
    const WRAP_OFFSET: u32 = TIMER_WRAP_OFFSET;
    const MICROS_PER_TICK: u32 = USEC_PER_TIMER_TICK;

    #[inline]
    fn read_ticks(&self) -> u32 {
        unsafe { core::ptr::read_volatile(self.cnt) & (TIMER_WRAP_OFFSET - 1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_khz_from_eight_mhz() {
        assert_eq!(prescaler_for(8_000_000, 2_000), Ok(3_999));
        assert_eq!(sw_timer_prescaler(), Ok(3_999));
    }

    #[test]
    fn inexact_divider_is_rejected() {
        assert_eq!(prescaler_for(8_000_000, 3_000), Err(Error::InvalidPeriod));
    }

    #[test]
    fn divider_wider_than_16_bits_is_rejected() {
        assert_eq!(prescaler_for(72_000_000, 1_000), Err(Error::InvalidPeriod));
        assert_eq!(prescaler_for(8_000_000, 0), Err(Error::InvalidPeriod));
    }

    #[test]
    fn counter_reads_through_pointer() {
        let reg: u32 = 0x0001_2345;
        let counter = unsafe { Tim1Counter::new(&reg) };
        assert_eq!(counter.read_ticks(), 0x2345);
    }
}
