//! Interpreter contract: binding recorded cells to outbound messages.
//!
//! An interpreter ("mode") is the musical meaning of one channel's grid.
//! Every tick the sequencer hands it one voice's cell for the current
//! step; the interpreter appends zero or more outbound messages into the
//! shared buffer. The sequencer schedules them in bulk afterwards.
//!
//! Two capability variants make statefulness explicit instead of hiding
//! it behind a nominally-const call:
//!
//! - [`PureInterpreter`] takes `&self` and is truly stateless: identical
//!   `(voice, cell, step_time_ms)` arguments always append a bit-identical
//!   ordered message sequence, regardless of call history.
//! - [`Interpreter`] takes `&mut self` and may carry per-voice interior
//!   state (a slide memory, an alternating direction). Its determinism is
//!   scoped: identical call history since the last deactivating call for
//!   a voice yields identical output, and an inactive cell MUST both
//!   append nothing and reset that voice's interior state.
//!
//! Every `PureInterpreter` is lifted into `Interpreter` by a blanket
//! impl, so the sequencer only ever consumes the mutable form.

use crate::cell::Cell;
use crate::message::MessageBuffer;

/// A mode implementation, possibly carrying per-voice state.
///
/// Invariants every implementation must uphold:
/// - an inactive `cell` appends exactly zero messages;
/// - the instance is bound to one channel at construction, forever;
/// - per-voice state is reset by a deactivating call for that voice.
pub trait Interpreter: Send {
    /// Turn one voice's cell at the current step into outbound messages.
    ///
    /// `step_time_ms` is the host-clock time of the step, for delta
    /// calculations. A full buffer drops further appends silently.
    fn process(&mut self, voice: u8, cell: Cell, step_time_ms: u64, out: &mut MessageBuffer);

    /// The outbound channel (1-16) this instance was built with.
    fn channel(&self) -> u8;

    /// Identifying name for display and registry lookup.
    fn name(&self) -> &'static str;
}

/// A stateless mode implementation: same arguments, same output, always.
pub trait PureInterpreter: Send {
    fn process(&self, voice: u8, cell: Cell, step_time_ms: u64, out: &mut MessageBuffer);
    fn channel(&self) -> u8;
    fn name(&self) -> &'static str;
}

impl<T: PureInterpreter> Interpreter for T {
    fn process(&mut self, voice: u8, cell: Cell, step_time_ms: u64, out: &mut MessageBuffer) {
        PureInterpreter::process(self, voice, cell, step_time_ms, out);
    }

    fn channel(&self) -> u8 {
        PureInterpreter::channel(self)
    }

    fn name(&self) -> &'static str {
        PureInterpreter::name(self)
    }
}
