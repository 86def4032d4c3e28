//! Host-side stand-ins for the board hardware
//!
//! These let the scheduler, timers and Morse encoder run without a target:
//! a tick counter advanced by hand and an output pin that remembers what was
//! driven on it.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::config::{TIMER_WRAP_OFFSET, USEC_PER_TIMER_TICK};
use crate::hal::TickSource;

/// A 16-bit, 500us tick counter that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTicks {
    now: Cell<u32>,
}

impl ManualTicks {
    pub const fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start % TIMER_WRAP_OFFSET),
        }
    }

    pub fn set(&self, ticks: u32) {
        self.now.set(ticks % TIMER_WRAP_OFFSET);
    }

    /// Moves the counter forward, wrapping like the hardware does.
    pub fn advance(&self, ticks: u32) {
        let next = (self.now.get() as u64 + ticks as u64) % TIMER_WRAP_OFFSET as u64;
        self.now.set(next as u32);
    }

    /// Moves the counter forward by a whole number of milliseconds.
    pub fn advance_ms(&self, ms: u32) {
        self.advance(ms * 1_000 / USEC_PER_TIMER_TICK);
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }
}

impl TickSource for ManualTicks {
    const WRAP_OFFSET: u32 = TIMER_WRAP_OFFSET;
    const MICROS_PER_TICK: u32 = USEC_PER_TIMER_TICK;

    fn read_ticks(&self) -> u32 {
        self.now.get()
    }
}

/// Output pin that records its level and counts rising edges.
#[derive(Debug, Default)]
pub struct RecordingPin {
    high: bool,
    rising_edges: u32,
    writes: u32,
}

impl RecordingPin {
    pub const fn new() -> Self {
        Self {
            high: false,
            rising_edges: 0,
            writes: 0,
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn rising_edges(&self) -> u32 {
        self.rising_edges
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl OutputPin for RecordingPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
