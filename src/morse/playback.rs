//! Morse playback state machine
//!
//! [`MorseEncoder::submit`] compiles a message and starts its first unit at
//! once. [`MorseEncoder::tick`] must then be called every
//! [`MORSE_TICK_MS`](crate::config::MORSE_TICK_MS), one dot. A unit of `n`
//! dots holds the output for `n` ticks, so a message of total length
//! `total_ticks` finishes, output off, on exactly its `total_ticks`-th tick.
//! A repeating message spends that tick dark and restarts on the next one.

use embedded_hal::digital::v2::OutputPin;

use super::compiler::{compile, CompiledSequence};
use crate::error::Result;
use crate::hal::Led;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Encoding,
}

pub struct MorseEncoder<P> {
    led: Led<P>,
    state: State,
    sequence: CompiledSequence,
    position: usize,
    ticks_remaining: u8,
    repeat: bool,
}

impl<P: OutputPin> MorseEncoder<P> {
    pub fn new(led: Led<P>) -> Self {
        Self {
            led,
            state: State::Idle,
            sequence: CompiledSequence::new(),
            position: 0,
            ticks_remaining: 0,
            repeat: false,
        }
    }

    /// Replaces whatever is playing with `message`.
    ///
    /// A message that does not compile is rejected and the current playback
    /// carries on untouched.
    pub fn submit(&mut self, message: &[u8], repeat: bool) -> Result<()> {
        self.sequence = compile(message)?;
        self.repeat = repeat;
        self.position = 0;
        self.ticks_remaining = 0;
        self.state = State::Encoding;
        self.advance()
    }

    pub fn tick(&mut self) -> Result<()> {
        if self.state == State::Idle {
            return Ok(());
        }
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.ticks_remaining == 0 {
            self.advance()
        } else {
            Ok(())
        }
    }

    /// Starts the unit under the cursor, or handles the end of the sequence.
    fn advance(&mut self) -> Result<()> {
        if self.position >= self.sequence.len() {
            self.led.set(false)?;
            self.position = 0;
            // An empty message has nothing to repeat.
            if !self.repeat || self.sequence.is_empty() {
                self.state = State::Idle;
            } else {
                // One dark tick before the next repetition.
                self.ticks_remaining = 1;
            }
            return Ok(());
        }

        let unit = self.sequence[self.position];
        self.led.set(unit.is_mark())?;
        self.ticks_remaining = unit.ticks();
        self.position += 1;
        Ok(())
    }

    #[inline]
    pub fn is_encoding(&self) -> bool {
        self.state == State::Encoding
    }

    /// Repeat flag of the last accepted message.
    #[inline]
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Index of the next unit to start.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn sequence(&self) -> &CompiledSequence {
        &self.sequence
    }

    pub fn led(&self) -> &Led<P> {
        &self.led
    }

    pub fn free(self) -> Led<P> {
        self.led
    }
}
