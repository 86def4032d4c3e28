//! Morse beacon firmware for the STM32F103 "blue pill"
//!
//! A cooperative minor-cycle scheduler drives a Morse code encoder on the
//! board LED, with software timers layered over a free-running hardware
//! counter and a small set of serial console tasks. Everything above the
//! `hal` register shims is plain owned state, so the whole stack runs on the
//! host under `cargo test` with the fakes in [`testing`].
#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod logger;
pub mod morse;
pub mod rtos;
pub mod testing;
pub mod utils;

pub use application::{Beacon, MorseExecutive, BEACON_MESSAGE};
pub use error::{Error, Result};
