//! Software timers backed by a free-running hardware counter
//!
//! A [`TimerPool`] owns a fixed number of elapsed-time trackers and hands them
//! out by [`TimerHandle`]. Each tracker remembers the counter value it last
//! saw and accumulates the difference, in microseconds, every time it is
//! queried.
//!
//! Accuracy depends on polling: the counter wraps every
//! `WRAP_OFFSET * MICROS_PER_TICK` microseconds (about 33 seconds for TIM1),
//! and any tracker left unread for longer than that silently loses a whole
//! wrap period. Call [`TimerPool::poll_all`] from the main loop.
//!
//! Only millisecond and second readings are meaningful; one tick is 500us.

use crate::error::{Error, Result};
use crate::hal::TickSource;
use crate::utils::Ring;

/// Reference to one tracker in a [`TimerPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(usize);

impl TimerHandle {
    /// Returned by [`TimerPool::acquire`] when the pool is empty. Every pool
    /// operation accepts it and does nothing.
    pub const NONE: TimerHandle = TimerHandle(usize::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SwTimer {
    usec: u64,
    prev_ticks: u32,
    in_use: bool,
}

pub struct TimerPool<S: TickSource, const N: usize> {
    source: S,
    timers: [SwTimer; N],
    free: Ring<TimerHandle, N>,
}

impl<S: TickSource, const N: usize> TimerPool<S, N> {
    pub fn new(source: S) -> Self {
        let now = source.read_ticks();
        let mut free = Ring::new();
        for i in 0..N {
            // Cannot fail: the ring holds exactly N handles.
            let _ = free.push(TimerHandle(i));
        }
        Self {
            source,
            timers: [SwTimer {
                usec: 0,
                prev_ticks: now,
                in_use: false,
            }; N],
            free,
        }
    }

    /// Takes a tracker from the pool, reset to zero. Returns
    /// [`TimerHandle::NONE`] when the pool is exhausted.
    pub fn acquire(&mut self) -> TimerHandle {
        match self.free.pop() {
            Some(handle) => {
                self.timers[handle.0].in_use = true;
                self.reset(handle);
                handle
            }
            None => TimerHandle::NONE,
        }
    }

    /// Like [`acquire`](Self::acquire) but reports exhaustion as an error.
    pub fn try_acquire(&mut self) -> Result<TimerHandle> {
        let handle = self.acquire();
        if handle.is_none() {
            Err(Error::TimerPoolExhausted)
        } else {
            Ok(handle)
        }
    }

    /// Returns a tracker to the pool. Releasing a handle that is not in use
    /// is ignored, so a handle can never be queued twice. Once the tracker is
    /// acquired again the old handle refers to the new owner, so callers must
    /// drop it on release.
    pub fn release(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.timers.get_mut(handle.0) {
            if timer.in_use {
                timer.in_use = false;
                let _ = self.free.push(handle);
            }
        }
    }

    /// Zeroes the tracker and resynchronises it to the current counter value.
    /// Handles that are not in use, the sentinel included, are ignored.
    pub fn reset(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.timers.get_mut(handle.0).filter(|t| t.in_use) {
            timer.usec = 0;
            timer.prev_ticks = self.source.read_ticks();
        }
    }

    /// Microseconds since the last reset. A handle that is not in use reads
    /// zero without touching the counter.
    pub fn elapsed_microseconds(&mut self, handle: TimerHandle) -> u64 {
        match self.timers.get_mut(handle.0).filter(|t| t.in_use) {
            Some(timer) => {
                let curr_ticks = self.source.read_ticks();
                let lapsed = if curr_ticks < timer.prev_ticks {
                    (curr_ticks + S::WRAP_OFFSET) - timer.prev_ticks
                } else {
                    curr_ticks - timer.prev_ticks
                };
                timer.prev_ticks = curr_ticks;
                timer.usec += lapsed as u64 * S::MICROS_PER_TICK as u64;
                timer.usec
            }
            None => 0,
        }
    }

    pub fn elapsed_milliseconds(&mut self, handle: TimerHandle) -> u32 {
        saturate(self.elapsed_microseconds(handle) / 1_000)
    }

    pub fn elapsed_seconds(&mut self, handle: TimerHandle) -> u32 {
        saturate(self.elapsed_microseconds(handle) / 1_000_000)
    }

    /// Refreshes every acquired tracker so none of them misses a wrap.
    pub fn poll_all(&mut self) {
        for i in 0..N {
            if self.timers[i].in_use {
                let _ = self.elapsed_microseconds(TimerHandle(i));
            }
        }
    }

    /// Trackers still free.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[inline]
fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
