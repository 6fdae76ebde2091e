//! MetaArp — directional scale arpeggiator.

use sb_core::{Cell, Interpreter, MessageBuffer};

use super::scale;

const MIN_NOTE: u8 = 24; // C1
const MAX_NOTE: u8 = 96; // C7
const MIN_NOTES: u32 = 2;
const MAX_NOTES: u32 = 16;
const MIN_DURATION_MS: u32 = 20;
const MAX_DURATION_MS: u32 = 400;
const BASE_VELOCITY: u8 = 100;
const MIN_VELOCITY: u8 = 60;

/// Arpeggiates up the selected scale on one active step, down on the
/// next, alternating per voice. Stateful: each voice carries its
/// direction toggle, and an inactive step resets it to ascending so a
/// re-entered phrase always starts upward.
///
/// Parameters: p0 root note (C1-C7), p1 scale select, p2 per-note
/// duration, p3 note count.
pub struct MetaArp {
    channel: u8,
    ascending: [bool; 8],
}

impl MetaArp {
    pub fn new(channel: u8) -> Self {
        Self { channel, ascending: [true; 8] }
    }
}

impl Interpreter for MetaArp {
    fn process(&mut self, voice: u8, cell: Cell, _step_time_ms: u64, out: &mut MessageBuffer) {
        let voice = (voice & 0x07) as usize;

        if !cell.is_active() {
            self.ascending[voice] = true;
            return;
        }

        let root = (MIN_NOTE + (cell.param(0) as u16 * (MAX_NOTE - MIN_NOTE) as u16 / 127) as u8)
            .min(MAX_NOTE);
        let table = scale::select(cell.param(1));
        let duration =
            MIN_DURATION_MS + (cell.param(2) as u32 * (MAX_DURATION_MS - MIN_DURATION_MS)) / 127;
        let count = MIN_NOTES + (cell.param(3) as u32 * (MAX_NOTES - MIN_NOTES)) / 127;

        let up = self.ascending[voice];
        let span = table.len() * 3; // up to three octaves
        let mut delay: u32 = 0;

        for i in 0..count {
            let degree = if up {
                i as usize % span
            } else {
                (count - 1 - i) as usize % span
            };
            let note = scale::degree_note(root, table, degree);
            let velocity = BASE_VELOCITY.saturating_sub((i * 5) as u8).max(MIN_VELOCITY);

            out.voice_on(self.channel, note, velocity, delay);
            out.voice_off(self.channel, note, delay + duration);
            delay += duration;
        }

        self.ascending[voice] = !up;
    }

    fn channel(&self) -> u8 {
        self.channel
    }

    fn name(&self) -> &'static str {
        "MetaArp"
    }
}
