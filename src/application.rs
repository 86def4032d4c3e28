//! Application layer: the repeating Morse beacon
//!
//! [`Beacon`] is the context object handed to every scheduler task. Its
//! PRIMARY pass runs the [`MorseExecutive`] once per minor cycle, which in
//! turn ticks the encoder at the same 100ms rate. The BACKGROUND pass keeps
//! the software timers polled so none of them misses a counter wrap.

use embedded_hal::digital::v2::OutputPin;

use crate::config::{MAX_SW_TIMERS, MORSE_REPEAT_DELAY_S};
use crate::diagnostics::{is_fatal, Diagnostics};
use crate::error::{Error, Result};
use crate::hal::{Led, TickSource};
use crate::logger::{Logger, SYS_BOOT, SYS_MESSAGE_SUBMITTED};
use crate::morse::MorseEncoder;
use crate::rtos::{Executive, Phase, TaskBuilder, TimerHandle, TimerPool};

pub const BEACON_MESSAGE: &[u8] = b"Dave's not here.";

/// Plays a message, waits [`MORSE_REPEAT_DELAY_S`] seconds after it ends,
/// and plays it again.
pub struct MorseExecutive {
    message: &'static [u8],
    delay: TimerHandle,
    was_encoding: bool,
}

impl MorseExecutive {
    pub fn new<S: TickSource, const N: usize>(
        timers: &mut TimerPool<S, N>,
        message: &'static [u8],
    ) -> Result<Self> {
        Ok(Self {
            message,
            delay: timers.try_acquire()?,
            // Seen as a finished encoding on the first pass, which starts the delay.
            was_encoding: true,
        })
    }

    /// One PRIMARY pass. Returns whether the message was resubmitted.
    pub fn run<P, S, const N: usize>(
        &mut self,
        morse: &mut MorseEncoder<P>,
        timers: &mut TimerPool<S, N>,
    ) -> Result<bool>
    where
        P: OutputPin,
        S: TickSource,
    {
        let is_encoding = morse.is_encoding();
        let mut submitted = false;
        if !is_encoding {
            if self.was_encoding {
                timers.reset(self.delay);
            } else if timers.elapsed_seconds(self.delay) >= MORSE_REPEAT_DELAY_S {
                morse.submit(self.message, false)?;
                submitted = true;
            }
        }
        self.was_encoding = is_encoding;
        // A fresh submission has already started its first unit.
        if !submitted {
            morse.tick()?;
        }
        Ok(submitted)
    }

    pub fn message(&self) -> &'static [u8] {
        self.message
    }
}

pub struct Beacon<P, S: TickSource> {
    morse: MorseEncoder<P>,
    timers: TimerPool<S, MAX_SW_TIMERS>,
    executive: MorseExecutive,
    uptime: TimerHandle,
    diagnostics: Diagnostics,
}

impl<P: OutputPin, S: TickSource> Beacon<P, S> {
    pub fn new(led: Led<P>, ticks: S, message: &'static [u8]) -> Result<Self> {
        let mut timers = TimerPool::new(ticks);
        let uptime = timers.try_acquire()?;
        let executive = MorseExecutive::new(&mut timers, message)?;

        let mut diagnostics = Diagnostics::new(Logger::new());
        diagnostics.logger_mut().log_system(SYS_BOOT, 0);

        Ok(Self {
            morse: MorseEncoder::new(led),
            timers,
            executive,
            uptime,
            diagnostics,
        })
    }

    /// Task tables for this context.
    pub fn executive<const N: usize>() -> Result<Executive<Self, N>> {
        let mut executive = Executive::new();
        TaskBuilder::new(Self::primary_pass).build(&mut executive)?;
        TaskBuilder::new(Self::background_pass)
            .phase(Phase::Background)
            .build(&mut executive)?;
        Ok(executive)
    }

    fn primary_pass(&mut self) -> Result<()> {
        let now = self.timers.elapsed_milliseconds(self.uptime);
        self.diagnostics.logger_mut().set_timestamp(now);
        if self.executive.run(&mut self.morse, &mut self.timers)? {
            let len = self.executive.message().len() as u32;
            self.diagnostics.logger_mut().log_system(SYS_MESSAGE_SUBMITTED, len);
        }
        Ok(())
    }

    fn background_pass(&mut self) -> Result<()> {
        self.timers.poll_all();
        Ok(())
    }

    /// Reports `error` and tells the caller whether it must trap.
    pub fn handle_error(&mut self, error: Error) -> bool {
        self.diagnostics.report_error(error);
        is_fatal(&error)
    }

    pub fn morse(&self) -> &MorseEncoder<P> {
        &self.morse
    }

    pub fn timers(&self) -> &TimerPool<S, MAX_SW_TIMERS> {
        &self.timers
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualTicks, RecordingPin};

    fn pass(
        exec: &mut MorseExecutive,
        morse: &mut MorseEncoder<RecordingPin>,
        timers: &mut TimerPool<&ManualTicks, 4>,
        ticks: &ManualTicks,
    ) -> bool {
        let submitted = exec.run(morse, timers).unwrap();
        ticks.advance_ms(100);
        submitted
    }

    #[test]
    fn first_message_after_delay_then_repeats() {
        let ticks = ManualTicks::new(0);
        let mut timers: TimerPool<&ManualTicks, 4> = TimerPool::new(&ticks);
        let mut exec = MorseExecutive::new(&mut timers, b"E").unwrap();
        let mut morse = MorseEncoder::new(Led::new(RecordingPin::new()).unwrap());

        // Pass 0 resets the delay; 3s later (pass 30) the message goes out.
        for n in 0..30 {
            assert!(!pass(&mut exec, &mut morse, &mut timers, &ticks), "pass {}", n);
        }
        assert!(pass(&mut exec, &mut morse, &mut timers, &ticks));
        assert!(morse.is_encoding());

        // "E" ends on the next tick, then another 3s delay.
        assert!(!pass(&mut exec, &mut morse, &mut timers, &ticks));
        assert!(!morse.is_encoding());
        let mut passes = 1;
        while !pass(&mut exec, &mut morse, &mut timers, &ticks) {
            passes += 1;
            assert!(passes < 100);
        }
        assert_eq!(passes, 31);
    }

    #[test]
    fn executive_needs_a_timer() {
        let ticks = ManualTicks::new(0);
        let mut timers: TimerPool<&ManualTicks, 1> = TimerPool::new(&ticks);
        let _ = timers.acquire();
        assert!(matches!(
            MorseExecutive::new(&mut timers, BEACON_MESSAGE),
            Err(Error::TimerPoolExhausted)
        ));
    }

    #[test]
    fn handle_error_logs_and_classifies() {
        let ticks = ManualTicks::new(0);
        let led = Led::new(RecordingPin::new()).unwrap();
        let mut beacon = Beacon::new(led, &ticks, BEACON_MESSAGE).unwrap();
        assert!(!beacon.handle_error(Error::Serial));
        assert!(beacon.handle_error(Error::Overrun { slot: 3 }));
        assert_eq!(beacon.diagnostics().error_count(), 2);
        assert_eq!(beacon.timers().available(), 2);
    }
}
