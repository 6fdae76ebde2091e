//! EchoFade — generative echo layers with geometric spacing.

use sb_core::{Cell, MessageBuffer, PureInterpreter};

const MIN_NOTE: u8 = 24; // C1
const MAX_NOTE: u8 = 96; // C7
const MAX_ECHOES: u8 = 8;
const MIN_DELAY_STEPS: u32 = 1;
const MAX_DELAY_STEPS: u32 = 16;
/// One 16th-note step at the 120 BPM reference tempo.
const MS_PER_STEP: u32 = 125;
const BASE_VELOCITY: u8 = 100;
const VELOCITY_FADE: f32 = 0.80;
const MIN_VELOCITY: u8 = 10;
const MIN_GATE_MS: u32 = 50;

/// A single trigger becomes a train of echoes: spacing doubles each
/// time, pitch shifts per echo, velocity fades by 20%. Stateless.
///
/// Parameters: p0 base pitch (C1-C7), p1 echo spacing in steps, p2 echo
/// count, p3 per-echo pitch shift (-12..+12 semitones, centered at 64).
pub struct EchoFade {
    channel: u8,
}

impl EchoFade {
    pub fn new(channel: u8) -> Self {
        Self { channel }
    }
}

impl PureInterpreter for EchoFade {
    fn process(&self, _voice: u8, cell: Cell, _step_time_ms: u64, out: &mut MessageBuffer) {
        if !cell.is_active() {
            return;
        }

        let base_note = (MIN_NOTE
            + (cell.param(0) as u16 * (MAX_NOTE - MIN_NOTE) as u16 / 127) as u8)
            .min(MAX_NOTE);
        let delay_steps =
            MIN_DELAY_STEPS + (cell.param(1) as u32 * (MAX_DELAY_STEPS - MIN_DELAY_STEPS)) / 127;
        let base_delay_ms = delay_steps * MS_PER_STEP;
        let echoes = 1 + (cell.param(2) as u32 * (MAX_ECHOES as u32 - 1)) / 127;
        let shift_semitones = ((cell.param(3) as i16 - 64) * 12) / 64;

        let gate = (base_delay_ms / 2).max(MIN_GATE_MS);

        let mut velocity = BASE_VELOCITY as f32;
        let mut echo_delay: u32 = 0;
        let mut spacing = base_delay_ms;

        for i in 0..echoes {
            let note = (base_note as i16 + shift_semitones * i as i16).clamp(0, 127) as u8;
            let echo_velocity = (velocity as u8).max(MIN_VELOCITY);

            out.voice_on(self.channel, note, echo_velocity, echo_delay);
            out.voice_off(self.channel, note, echo_delay + gate);

            // Spacing doubles each echo: d, 2d, 4d, ...
            echo_delay += spacing;
            spacing *= 2;
            velocity *= VELOCITY_FADE;
        }
    }

    fn channel(&self) -> u8 {
        self.channel
    }

    fn name(&self) -> &'static str {
        "EchoFade"
    }
}
