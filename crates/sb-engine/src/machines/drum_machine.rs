//! DrumMachine — eight fixed GM drum voices with flam, gate, and pan.

use sb_core::{Cell, MessageBuffer, PureInterpreter};

/// GM drum note per voice: kick, snare, closed hat, open hat, low tom,
/// mid tom, crash, ride.
const DRUM_NOTES: [u8; 8] = [36, 38, 42, 46, 43, 47, 49, 51];

const DEFAULT_VELOCITY: u8 = 100;
const MIN_GATE_MS: u32 = 10;
const GATE_RANGE_MS: u32 = 1990;

/// A classic drum machine. Stateless: every hit is derived entirely
/// from the cell's parameters.
///
/// Parameters: p0 velocity (0 plays at the default), p1 flam amount,
/// p2 gate length, p3 pan (CC 10 when nonzero).
pub struct DrumMachine {
    channel: u8,
}

impl DrumMachine {
    pub fn new(channel: u8) -> Self {
        Self { channel }
    }
}

impl PureInterpreter for DrumMachine {
    fn process(&self, voice: u8, cell: Cell, _step_time_ms: u64, out: &mut MessageBuffer) {
        if !cell.is_active() {
            return;
        }

        let note = DRUM_NOTES[(voice & 0x07) as usize];

        let mut velocity = cell.param(0);
        if velocity == 0 {
            velocity = DEFAULT_VELOCITY;
        }
        let flam = cell.param(1);
        let gate = MIN_GATE_MS + (cell.param(2) as u32 * GATE_RANGE_MS) / 127;
        let pan = cell.param(3);

        if flam > 0 {
            // Grace note immediately at 60% velocity, main hit delayed
            // 5-50 ms behind it
            let flam_delay = 5 + (flam as u32 * 45) / 127;
            let grace_velocity = (velocity as u16 * 60 / 100) as u8;

            out.voice_on(self.channel, note, grace_velocity, 0);
            out.voice_off(self.channel, note, gate / 3);
            out.voice_on(self.channel, note, velocity, flam_delay);
            out.voice_off(self.channel, note, flam_delay + gate);
        } else {
            out.voice_on(self.channel, note, velocity, 0);
            out.voice_off(self.channel, note, gate);
        }

        if pan > 0 {
            out.control_change(self.channel, 10, pan, 0);
        }
    }

    fn channel(&self) -> u8 {
        self.channel
    }

    fn name(&self) -> &'static str {
        "DrumMachine"
    }
}
