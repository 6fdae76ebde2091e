//! Outbound protocol messages and the fixed-capacity step buffer.
//!
//! Interpreters append [`OutboundMessage`]s into a [`MessageBuffer`]
//! during step processing; the engine's scheduler then converts the
//! relative delays into absolute fire times. The buffer is a bounded
//! scratch accumulator — when it fills, `push` reports failure and the
//! caller decides whether to flush or drop. It never reallocates.

use arrayvec::ArrayVec;

/// Lowest valid outbound channel.
pub const MIN_CHANNEL: u8 = 1;
/// Highest valid outbound channel.
pub const MAX_CHANNEL: u8 = 16;

/// True if `channel` is in the valid 1-16 range.
pub const fn is_valid_channel(channel: u8) -> bool {
    channel >= MIN_CHANNEL && channel <= MAX_CHANNEL
}

/// What an outbound message does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Trigger a note (data1 = note, data2 = velocity).
    VoiceOn,
    /// Release a note (data1 = note).
    VoiceOff,
    /// Controller change (data1 = controller, data2 = value).
    ControlChange,
    /// Silence every voice on the channel.
    StopAll,
}

/// A single outbound message with a relative delay.
///
/// Immutable value type: build one with a factory constructor, never
/// mutate it afterwards. `delay_ms` is an offset from the moment the
/// message is produced; the scheduler turns it into an absolute time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub kind: MessageKind,
    /// Target channel (1-16; anything else is dropped at scheduling).
    pub channel: u8,
    pub data1: u8,
    pub data2: u8,
    pub delay_ms: u32,
}

impl OutboundMessage {
    pub const fn voice_on(channel: u8, note: u8, velocity: u8, delay_ms: u32) -> Self {
        Self { kind: MessageKind::VoiceOn, channel, data1: note, data2: velocity, delay_ms }
    }

    pub const fn voice_off(channel: u8, note: u8, delay_ms: u32) -> Self {
        Self { kind: MessageKind::VoiceOff, channel, data1: note, data2: 0, delay_ms }
    }

    pub const fn control_change(channel: u8, controller: u8, value: u8, delay_ms: u32) -> Self {
        Self { kind: MessageKind::ControlChange, channel, data1: controller, data2: value, delay_ms }
    }

    pub const fn stop_all(channel: u8, delay_ms: u32) -> Self {
        Self { kind: MessageKind::StopAll, channel, data1: 0, data2: 0, delay_ms }
    }
}

/// Fixed-capacity (32) ordered accumulator of outbound messages.
#[derive(Clone, Debug, Default)]
pub struct MessageBuffer {
    messages: ArrayVec<OutboundMessage, 32>,
}

impl MessageBuffer {
    /// Maximum messages per buffer (one step's worth, all modes combined).
    pub const CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self { messages: ArrayVec::new() }
    }

    /// Append a message, preserving insertion order.
    ///
    /// Returns `false` (message dropped) when the buffer is full. There
    /// is no reallocation and no error type — bounded capacity with
    /// caller-visible failure is the whole contract.
    pub fn push(&mut self, message: OutboundMessage) -> bool {
        self.messages.try_push(message).is_ok()
    }

    pub fn voice_on(&mut self, channel: u8, note: u8, velocity: u8, delay_ms: u32) -> bool {
        self.push(OutboundMessage::voice_on(channel, note, velocity, delay_ms))
    }

    pub fn voice_off(&mut self, channel: u8, note: u8, delay_ms: u32) -> bool {
        self.push(OutboundMessage::voice_off(channel, note, delay_ms))
    }

    pub fn control_change(&mut self, channel: u8, controller: u8, value: u8, delay_ms: u32) -> bool {
        self.push(OutboundMessage::control_change(channel, controller, value, delay_ms))
    }

    pub fn stop_all(&mut self, channel: u8, delay_ms: u32) -> bool {
        self.push(OutboundMessage::stop_all(channel, delay_ms))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.messages.is_full()
    }

    /// Slots still free before `push` starts failing.
    pub fn remaining(&self) -> usize {
        self.messages.remaining_capacity()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn iter(&self) -> core::slice::Iter<'_, OutboundMessage> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[OutboundMessage] {
        self.messages.as_slice()
    }
}

impl<'a> IntoIterator for &'a MessageBuffer {
    type Item = &'a OutboundMessage;
    type IntoIter = core::slice::Iter<'a, OutboundMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
