//! BassLine — chord-progression bassline maker.

use sb_core::{Cell, MessageBuffer, PureInterpreter};

use super::scale;

const MIN_NOTE: u8 = 36; // C1
const MAX_NOTE: u8 = 72; // C4
const BASE_VELOCITY: u8 = 110;
const ACCENT_VELOCITY: u8 = 127;
const MIN_DURATION_MS: u32 = 50;
const MAX_DURATION_MS: u32 = 1000;
/// One 16th-note step at the 120 BPM reference tempo; the walk styles
/// subdivide it for their offbeat hits.
const MS_PER_STEP: u32 = 125;

/// Each active step is a chord: the style band picks one of eight bass
/// figures over that chord, from a whole-note root up to a jazz walk.
/// Stateless.
///
/// Parameters: p0 root (C1-C4), p1 scale select (bass bands), p2 figure
/// style, p3 note duration 50-1000 ms.
pub struct BassLine {
    channel: u8,
}

impl BassLine {
    pub fn new(channel: u8) -> Self {
        Self { channel }
    }

    fn hit(&self, out: &mut MessageBuffer, note: u8, velocity: u8, delay: u32, duration: u32) {
        out.voice_on(self.channel, note, velocity, delay);
        out.voice_off(self.channel, note, delay + duration);
    }
}

impl PureInterpreter for BassLine {
    fn process(&self, _voice: u8, cell: Cell, _step_time_ms: u64, out: &mut MessageBuffer) {
        if !cell.is_active() {
            return;
        }

        let root_note = (MIN_NOTE
            + (cell.param(0) as u16 * (MAX_NOTE - MIN_NOTE) as u16 / 127) as u8)
            .min(MAX_NOTE);
        let table = scale::select_bass(cell.param(1));
        let duration =
            MIN_DURATION_MS + cell.param(3) as u32 * (MAX_DURATION_MS - MIN_DURATION_MS) / 127;

        let degree = |d: usize| scale::degree_note(root_note, table, d);

        match cell.param(2) >> 4 {
            // Root only, whole note
            0 => {
                self.hit(out, degree(0), ACCENT_VELOCITY, 0, duration);
            }
            // Root + fifth, alternating
            1 => {
                self.hit(out, degree(0), ACCENT_VELOCITY, 0, duration);
                self.hit(out, degree(4), BASE_VELOCITY, MS_PER_STEP / 2, duration);
            }
            // Root + fifth + octave, walking up
            2 => {
                self.hit(out, degree(0), ACCENT_VELOCITY, 0, duration);
                self.hit(out, degree(4), BASE_VELOCITY, MS_PER_STEP / 3, duration);
                self.hit(out, degree(7), BASE_VELOCITY, MS_PER_STEP * 2 / 3, duration);
            }
            // Triad walk
            3 => {
                self.hit(out, degree(0), ACCENT_VELOCITY, 0, duration);
                self.hit(out, degree(2), BASE_VELOCITY, MS_PER_STEP / 3, duration);
                self.hit(out, degree(4), BASE_VELOCITY, MS_PER_STEP * 2 / 3, duration);
            }
            // Jazz walk: root, third, fifth, seventh
            4 => {
                self.hit(out, degree(0), ACCENT_VELOCITY, 0, duration);
                self.hit(out, degree(2), BASE_VELOCITY, MS_PER_STEP / 4, duration);
                self.hit(out, degree(4), BASE_VELOCITY, MS_PER_STEP / 2, duration);
                self.hit(out, degree(6), BASE_VELOCITY, MS_PER_STEP * 3 / 4, duration);
            }
            // Octave bounce
            5 => {
                self.hit(out, degree(0), ACCENT_VELOCITY, 0, duration);
                self.hit(out, degree(7), BASE_VELOCITY, MS_PER_STEP / 2, duration);
            }
            // Chromatic approach from a half-step below
            6 => {
                let approach = root_note.saturating_sub(1);
                self.hit(out, approach, BASE_VELOCITY - 20, 0, duration / 2);
                self.hit(out, degree(0), ACCENT_VELOCITY, MS_PER_STEP / 4, duration);
            }
            // Fifth pedal: fifth on the beat, root on the offbeat
            _ => {
                self.hit(out, degree(4), BASE_VELOCITY, 0, duration);
                self.hit(out, degree(0), ACCENT_VELOCITY, MS_PER_STEP / 2, duration);
            }
        }
    }

    fn channel(&self) -> u8 {
        self.channel
    }

    fn name(&self) -> &'static str {
        "BassLine"
    }
}
