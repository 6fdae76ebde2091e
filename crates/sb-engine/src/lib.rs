//! Tick-driven playback engine for the stepbox sequencer.
//!
//! Drives interpreters over the song grid, schedules their output, and
//! dispatches it to a transport sink.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod controls;
pub mod demo;
pub mod machines;
mod scheduler;
mod sequencer;

pub use scheduler::MessageScheduler;
pub use sequencer::{
    Sequencer, BRIGHTNESS_BEAT, BRIGHTNESS_DIM, BRIGHTNESS_DOWNBEAT,
};
