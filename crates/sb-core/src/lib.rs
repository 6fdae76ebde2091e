//! Core types for the stepbox sequencer.
//!
//! This crate defines the fixed-capacity data model shared by the whole
//! workspace: the bit-packed cell grid (cell → track → pattern → song),
//! the outbound message types and their bounded scratch buffer, the
//! interpreter contract, the input-snapshot type, and the transport-sink
//! trait. Everything is allocation-free and fixed-size; the engine crate
//! builds the timing machinery on top.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod cell;
mod input;
mod interp;
mod message;
mod pattern;
mod sink;
pub mod song;

pub use cell::Cell;
pub use input::InputFrame;
pub use interp::{Interpreter, PureInterpreter};
pub use message::{
    is_valid_channel, MessageBuffer, MessageKind, OutboundMessage, MAX_CHANNEL, MIN_CHANNEL,
};
pub use pattern::{Pattern, Track};
pub use sink::TransportSink;
pub use song::Song;
