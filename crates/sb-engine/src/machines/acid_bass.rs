//! AcidBass — monophonic 303-style bass with slide and accent.

use sb_core::{Cell, Interpreter, MessageBuffer};

const MIN_NOTE: u8 = 36; // C1
const MAX_NOTE: u8 = 72; // C4
const BASE_VELOCITY: u8 = 80;
const MAX_ACCENT: u8 = 47;
const MIN_GATE_MS: u32 = 10;
const GATE_RANGE_MS: u32 = 1990;

/// Stateful: remembers each voice's last note to detect slides. An
/// inactive step resets that voice's memory, so a slide never reaches
/// across a rest.
///
/// Parameters: p0 pitch (C1-C4), p1 accent, p2 gate length, p3 slide
/// (portamento CC 65/5 when a previous note exists).
pub struct AcidBass {
    channel: u8,
    last_note: [u8; 8],
}

impl AcidBass {
    pub fn new(channel: u8) -> Self {
        Self { channel, last_note: [0; 8] }
    }
}

impl Interpreter for AcidBass {
    fn process(&mut self, voice: u8, cell: Cell, _step_time_ms: u64, out: &mut MessageBuffer) {
        let voice = (voice & 0x07) as usize;

        if !cell.is_active() {
            self.last_note[voice] = 0;
            return;
        }

        let note = (MIN_NOTE + (cell.param(0) as u16 * (MAX_NOTE - MIN_NOTE) as u16 / 127) as u8)
            .min(MAX_NOTE);
        let accent = (cell.param(1) as u16 * MAX_ACCENT as u16 / 127) as u8;
        let velocity = BASE_VELOCITY.saturating_add(accent).min(127);
        let gate = MIN_GATE_MS + (cell.param(2) as u32 * GATE_RANGE_MS) / 127;
        let slide = cell.param(3);

        if slide > 0 && self.last_note[voice] > 0 {
            out.control_change(self.channel, 65, 127, 0); // portamento on
            out.control_change(self.channel, 5, slide, 0); // portamento time
        } else {
            out.control_change(self.channel, 65, 0, 0);
        }

        out.voice_on(self.channel, note, velocity, 0);
        out.voice_off(self.channel, note, gate);

        self.last_note[voice] = note;
    }

    fn channel(&self) -> u8 {
        self.channel
    }

    fn name(&self) -> &'static str {
        "AcidBass"
    }
}
