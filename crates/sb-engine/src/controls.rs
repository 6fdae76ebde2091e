//! Control-value mappings between 7-bit controls and engine ranges.
//!
//! Hosts read raw 0-127 values off their pots and sliders; these helpers
//! map them onto tempo, mode, pattern, and track ranges. The meta-track's
//! pattern targeting uses the same `value * N / 128` mapping.

/// Slowest supported tempo.
pub const MIN_BPM: f32 = 20.0;
/// Fastest supported tempo.
pub const MAX_BPM: f32 = 800.0;
pub const DEFAULT_BPM: f32 = 120.0;

/// Steps per beat (16th notes).
pub const STEPS_PER_BEAT: f32 = 4.0;
/// Clock pulses per quarter note.
pub const PULSES_PER_QUARTER: f32 = 24.0;

pub fn clamp_bpm(bpm: f32) -> f32 {
    bpm.clamp(MIN_BPM, MAX_BPM)
}

/// Milliseconds between step advances at `bpm`.
///
/// Never zero for any clamped tempo (18 ms at 800 BPM).
pub fn step_interval_ms(bpm: f32) -> u64 {
    ((60_000.0 / clamp_bpm(bpm)) / STEPS_PER_BEAT) as u64
}

/// Milliseconds between clock pulses at `bpm` (24 PPQN).
pub fn clock_interval_ms(bpm: f32) -> u64 {
    ((60_000.0 / clamp_bpm(bpm)) / PULSES_PER_QUARTER) as u64
}

/// Map a 0-127 control value onto the 20-800 BPM range.
///
/// Linear from 20 to 120 over the lower half, quadratic from 120 to 800
/// over the upper half, so the musically common range gets most of the
/// pot travel.
pub fn bpm_from_control(value: u8) -> f32 {
    let normalized = (value & 0x7F) as f32 / 127.0;
    if normalized < 0.5 {
        MIN_BPM + (normalized * 2.0) * 100.0
    } else {
        DEFAULT_BPM + libm::powf((normalized - 0.5) * 2.0, 2.0) * (MAX_BPM - DEFAULT_BPM)
    }
}

/// Map a 0-127 control value onto a mode index (0-14).
pub fn mode_from_control(value: u8) -> u8 {
    // 128 divisor keeps value 127 from overflowing to N
    let mode = ((value & 0x7F) as u16 * 15) / 128;
    (mode as u8).min(14)
}

/// Map a 0-127 control value onto a pattern index (0-31).
pub fn pattern_from_control(value: u8) -> u8 {
    let pattern = ((value & 0x7F) as u16 * 32) / 128;
    (pattern as u8).min(31)
}

/// Map a 0-127 control value onto a track index (0-7).
pub fn track_from_control(value: u8) -> u8 {
    let track = ((value & 0x7F) as u16 * 8) / 128;
    (track as u8).min(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_at_default_tempo() {
        // 120 BPM: 500 ms per beat, 125 ms per 16th, ~20 ms per pulse
        assert_eq!(step_interval_ms(120.0), 125);
        assert_eq!(clock_interval_ms(120.0), 20);
    }

    #[test]
    fn intervals_never_zero() {
        assert!(step_interval_ms(MAX_BPM) >= 1);
        assert!(clock_interval_ms(MAX_BPM) >= 1);
        // Out-of-range tempos are clamped, not propagated
        assert_eq!(step_interval_ms(100_000.0), step_interval_ms(MAX_BPM));
        assert_eq!(step_interval_ms(0.0), step_interval_ms(MIN_BPM));
    }

    #[test]
    fn bpm_curve_endpoints() {
        assert!((bpm_from_control(0) - MIN_BPM).abs() < 1.0);
        let mid = bpm_from_control(64);
        assert!((119.0..=122.0).contains(&mid), "midpoint was {mid}");
        assert!((bpm_from_control(127) - MAX_BPM).abs() < 1.0);
    }

    #[test]
    fn bpm_curve_is_monotonic() {
        let mut previous = bpm_from_control(0);
        for value in 1..=127u8 {
            let bpm = bpm_from_control(value);
            assert!(bpm >= previous, "curve dipped at {value}");
            previous = bpm;
        }
    }

    #[test]
    fn selection_mappings_cover_their_ranges() {
        assert_eq!(mode_from_control(0), 0);
        assert_eq!(mode_from_control(127), 14);
        assert_eq!(pattern_from_control(0), 0);
        assert_eq!(pattern_from_control(127), 31);
        assert_eq!(track_from_control(0), 0);
        assert_eq!(track_from_control(127), 7);
    }

    #[test]
    fn pattern_mapping_matches_meta_track_quantization() {
        // value * 32 / 128: each pattern covers 4 control values
        assert_eq!(pattern_from_control(3), 0);
        assert_eq!(pattern_from_control(4), 1);
        assert_eq!(pattern_from_control(20), 5);
        assert_eq!(pattern_from_control(124), 31);
    }
}
