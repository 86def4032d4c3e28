//! Minor-cycle cooperative scheduler
//!
//! Time is divided into minor cycles of [`MINOR_CYCLE_MS`] each, `N` of which
//! make a major cycle. Every minor cycle starts with the periodic interrupt,
//! which puts the [`Frame`] into the PRIMARY phase and advances the slot
//! index. The main loop then runs the PRIMARY task set exactly once, drops to
//! BACKGROUND, and keeps running the BACKGROUND task set until the next
//! interrupt.
//!
//! Tasks must never block. If the interrupt fires while PRIMARY work is still
//! in progress the cycle has overrun its budget; the frame latches the
//! overrun and every later call reports [`Error::Overrun`] until
//! [`Frame::restart`].
//!
//! [`MINOR_CYCLE_MS`]: crate::config::MINOR_CYCLE_MS

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use heapless::Vec;

use crate::error::{Error, Result};

/// Tasks per phase that run on every minor cycle.
pub const MAX_CYCLE_TASKS: usize = 8;

pub type Task<C> = fn(&mut C) -> Result<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Primary = 0,
    Background = 1,
}

impl Phase {
    #[inline]
    fn from_raw(raw: u8) -> Self {
        if raw == Phase::Primary as u8 {
            Phase::Primary
        } else {
            Phase::Background
        }
    }
}

/// Phase and slot shared between the minor-cycle interrupt and the main loop.
///
/// Each field is a single atomic word, so neither side can observe a torn
/// update.
pub struct Frame<const N: usize> {
    phase: AtomicU8,
    slot: AtomicUsize,
    overrun: AtomicBool,
}

impl<const N: usize> Frame<N> {
    /// Starts in BACKGROUND at the last slot so the first interrupt lands on
    /// slot 0.
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Background as u8),
            slot: AtomicUsize::new(N - 1),
            overrun: AtomicBool::new(false),
        }
    }

    /// Minor-cycle interrupt body.
    pub fn on_interrupt(&self) -> Result<()> {
        let slot = self.slot.load(Ordering::SeqCst);
        if self.overrun.load(Ordering::SeqCst) || self.phase() == Phase::Primary {
            self.overrun.store(true, Ordering::SeqCst);
            return Err(Error::Overrun { slot });
        }

        let next = if slot + 1 >= N { 0 } else { slot + 1 };
        // Slot before phase: the main loop loads phase first, then slot.
        self.slot.store(next, Ordering::SeqCst);
        self.phase.store(Phase::Primary as u8, Ordering::SeqCst);
        Ok(())
    }

    pub fn finish_primary(&self) {
        self.phase.store(Phase::Background as u8, Ordering::SeqCst);
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::SeqCst))
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.slot.load(Ordering::SeqCst)
    }

    pub fn overrun(&self) -> bool {
        self.overrun.load(Ordering::SeqCst)
    }

    /// Returns to the power-on state and clears a latched overrun.
    pub fn restart(&self) {
        self.overrun.store(false, Ordering::SeqCst);
        self.phase.store(Phase::Background as u8, Ordering::SeqCst);
        self.slot.store(N - 1, Ordering::SeqCst);
    }

    pub const fn slot_count(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

struct PhaseTable<C, const N: usize> {
    every_cycle: Vec<Task<C>, MAX_CYCLE_TASKS>,
    slots: [Option<Task<C>>; N],
}

impl<C, const N: usize> PhaseTable<C, N> {
    fn new() -> Self {
        Self {
            every_cycle: Vec::new(),
            slots: [None; N],
        }
    }

    fn add(&mut self, slot: Option<usize>, task: Task<C>) -> Result<()> {
        match slot {
            None => self.every_cycle.push(task).map_err(|_| Error::TaskTableFull),
            Some(slot) => {
                let entry = self.slots.get_mut(slot).ok_or(Error::InvalidSlot { slot })?;
                if entry.is_some() {
                    return Err(Error::TaskTableFull);
                }
                *entry = Some(task);
                Ok(())
            }
        }
    }

    fn run(&self, slot: usize, ctx: &mut C) -> Result<()> {
        for task in self.every_cycle.iter() {
            task(ctx)?;
        }
        match self.slots.get(slot) {
            Some(Some(task)) => task(ctx),
            Some(None) => Ok(()),
            None => Err(Error::InvalidSlot { slot }),
        }
    }
}

/// The PRIMARY and BACKGROUND task tables for a context type `C`.
pub struct Executive<C, const N: usize> {
    primary: PhaseTable<C, N>,
    background: PhaseTable<C, N>,
}

impl<C, const N: usize> Executive<C, N> {
    pub fn new() -> Self {
        Self {
            primary: PhaseTable::new(),
            background: PhaseTable::new(),
        }
    }

    /// Registers `task` in `phase`, either for every cycle (`slot == None`) or
    /// for one slot of the major cycle.
    pub fn add_task(&mut self, phase: Phase, slot: Option<usize>, task: Task<C>) -> Result<()> {
        match phase {
            Phase::Primary => self.primary.add(slot, task),
            Phase::Background => self.background.add(slot, task),
        }
    }

    /// Runs one pass of whichever phase `frame` is in and returns it.
    ///
    /// A PRIMARY pass always ends in BACKGROUND, even when a task fails.
    pub fn run_once(&self, frame: &Frame<N>, ctx: &mut C) -> Result<Phase> {
        if frame.overrun() {
            return Err(Error::Overrun { slot: frame.slot() });
        }

        // Phase before slot, the reverse of the interrupt's store order.
        let phase = frame.phase();
        let slot = frame.slot();
        match phase {
            Phase::Primary => {
                let result = self.primary.run(slot, ctx);
                frame.finish_primary();
                result.map(|_| Phase::Primary)
            }
            Phase::Background => self.background.run(slot, ctx).map(|_| Phase::Background),
        }
    }

    /// Main loop. Only returns when a task or the frame reports an error.
    pub fn run(&self, frame: &Frame<N>, ctx: &mut C) -> Error {
        loop {
            if let Err(e) = self.run_once(frame, ctx) {
                return e;
            }
        }
    }
}

impl<C, const N: usize> Default for Executive<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TaskBuilder<C> {
    function: Task<C>,
    phase: Phase,
    slot: Option<usize>,
}

impl<C> TaskBuilder<C> {
    /// A PRIMARY task that runs every cycle unless configured otherwise.
    pub fn new(function: Task<C>) -> Self {
        Self {
            function,
            phase: Phase::Primary,
            slot: None,
        }
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Run once per major cycle, in minor cycle `slot`.
    pub fn slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn build<const N: usize>(self, executive: &mut Executive<C, N>) -> Result<()> {
        executive.add_task(self.phase, self.slot, self.function)
    }
}
