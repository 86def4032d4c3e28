//! Morse code encoding and playback
pub mod alphabet;
pub mod compiler;
pub mod playback;
pub mod timing;

pub use compiler::{compile, total_ticks, CompiledSequence, SEQUENCE_CAPACITY};
pub use playback::{MorseEncoder, State};
pub use timing::Unit;
