//! Delta-time message scheduler backed by a fixed slot pool.
//!
//! Converts the relative delays carried by outbound messages into
//! absolute fire times and executes each message exactly once when due.
//! The pool is a statically sized array of 64 slots with an active flag
//! each — never a growable collection. Exhaustion and invalid channels
//! are silent drops; nothing here can fail loudly.

use sb_core::{is_valid_channel, MessageBuffer, MessageKind, OutboundMessage, TransportSink};

/// One pool slot: an outbound message pinned to an absolute fire time.
#[derive(Clone, Copy, Debug)]
struct ScheduledMessage {
    kind: MessageKind,
    channel: u8,
    data1: u8,
    data2: u8,
    fire_at_ms: u64,
    active: bool,
}

impl ScheduledMessage {
    const fn idle() -> Self {
        Self {
            kind: MessageKind::VoiceOn,
            channel: 1,
            data1: 0,
            data2: 0,
            fire_at_ms: 0,
            active: false,
        }
    }
}

/// Fixed pool of delayed outbound messages.
pub struct MessageScheduler {
    slots: [ScheduledMessage; 64],
}

impl Default for MessageScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageScheduler {
    /// Pool capacity: pending messages beyond this are dropped.
    pub const CAPACITY: usize = 64;

    pub const fn new() -> Self {
        Self { slots: [ScheduledMessage::idle(); 64] }
    }

    /// Schedule one message `delay_ms` from `now_ms`.
    ///
    /// Returns `false` when the message was dropped: channel outside
    /// 1-16, or no inactive slot left. No error is surfaced either way.
    pub fn schedule_one(
        &mut self,
        kind: MessageKind,
        channel: u8,
        data1: u8,
        data2: u8,
        delay_ms: u32,
        now_ms: u64,
    ) -> bool {
        if !is_valid_channel(channel) {
            return false;
        }
        let Some(slot) = self.slots.iter_mut().find(|s| !s.active) else {
            return false;
        };
        *slot = ScheduledMessage {
            kind,
            channel,
            data1,
            data2,
            fire_at_ms: now_ms + delay_ms as u64,
            active: true,
        };
        true
    }

    /// Schedule an already-built message relative to `now_ms`.
    pub fn schedule(&mut self, message: &OutboundMessage, now_ms: u64) -> bool {
        self.schedule_one(
            message.kind,
            message.channel,
            message.data1,
            message.data2,
            message.delay_ms,
            now_ms,
        )
    }

    /// Schedule every message in the buffer, in order.
    ///
    /// Invalid-channel messages are skipped; once the pool is exhausted
    /// the remaining messages are dropped. Returns the number scheduled.
    pub fn schedule_all(&mut self, buffer: &MessageBuffer, now_ms: u64) -> usize {
        let mut scheduled = 0;
        for message in buffer {
            if !is_valid_channel(message.channel) {
                continue;
            }
            if self.slots.iter().all(|s| s.active) {
                break;
            }
            if self.schedule(message, now_ms) {
                scheduled += 1;
            }
        }
        scheduled
    }

    /// Fire every due message against the sink and retire its slot.
    ///
    /// Call at least as often as the smallest delay difference to be
    /// resolved; hosts drive this at ~1 ms on a monotonic clock.
    pub fn tick<S: TransportSink>(&mut self, now_ms: u64, sink: &mut S) {
        for slot in &mut self.slots {
            if !slot.active || now_ms < slot.fire_at_ms {
                continue;
            }
            match slot.kind {
                MessageKind::VoiceOn => sink.voice_on(slot.channel, slot.data1, slot.data2),
                MessageKind::VoiceOff => sink.voice_off(slot.channel, slot.data1),
                MessageKind::ControlChange => {
                    sink.control_change(slot.channel, slot.data1, slot.data2)
                }
                MessageKind::StopAll => sink.stop_all(slot.channel),
            }
            slot.active = false;
        }
    }

    /// Discard every pending message without executing anything.
    ///
    /// Purely forgets state: no stop-all or voice-off is emitted. A
    /// caller that wants audible silence must schedule stop-all itself.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// Number of occupied slots.
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }
}
