//! Scale interval tables shared by the melodic machines.

/// Semitone offsets from the root, one octave.
pub const MAJOR: &[u8] = &[0, 2, 4, 5, 7, 9, 11];
pub const MINOR: &[u8] = &[0, 2, 3, 5, 7, 8, 10];
pub const DORIAN: &[u8] = &[0, 2, 3, 5, 7, 9, 10];
pub const PHRYGIAN: &[u8] = &[0, 1, 3, 5, 7, 8, 10];
pub const MIXOLYDIAN: &[u8] = &[0, 2, 4, 5, 7, 9, 10];
pub const PENTATONIC_MAJOR: &[u8] = &[0, 2, 4, 7, 9];
pub const PENTATONIC_MINOR: &[u8] = &[0, 3, 5, 7, 10];
pub const BLUES: &[u8] = &[0, 3, 5, 6, 7, 10];
pub const LOCRIAN: &[u8] = &[0, 1, 3, 5, 6, 8, 10];
pub const CHROMATIC: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Select an arpeggiator scale from a 0-127 control value, 16 values
/// per band.
pub fn select(value: u8) -> &'static [u8] {
    match value >> 4 {
        0 => MAJOR,
        1 => MINOR,
        2 => DORIAN,
        3 => PHRYGIAN,
        4 => MIXOLYDIAN,
        5 => PENTATONIC_MAJOR,
        6 => PENTATONIC_MINOR,
        _ => CHROMATIC,
    }
}

/// Select a bassline scale. Same 16-value bands, but the bass palette
/// trades the pentatonics for blues and locrian.
pub fn select_bass(value: u8) -> &'static [u8] {
    match value >> 4 {
        0 => MAJOR,
        1 => MINOR,
        2 => DORIAN,
        3 => MIXOLYDIAN,
        4 => BLUES,
        5 => PHRYGIAN,
        6 => LOCRIAN,
        _ => CHROMATIC,
    }
}

/// Note for scale degree `degree` above `root`, octave-folding through
/// the table and clamped to the 0-127 note range.
pub fn degree_note(root: u8, scale: &[u8], degree: usize) -> u8 {
    let octave = (degree / scale.len()) as i16;
    let position = degree % scale.len();
    let note = root as i16 + octave * 12 + scale[position] as i16;
    note.clamp(0, 127) as u8
}
