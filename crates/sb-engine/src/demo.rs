//! Factory patterns that sound good out of the box.

use sb_core::{Cell, Song};

fn set_cell(song: &mut Song, mode: usize, track: usize, step: usize, params: [u8; 4]) {
    *song.pattern_mut(mode, 0).track_mut(track).cell_mut(step) = Cell::new(true, params);
}

/// Basic demo: a kick and a snare, with the meta-track looping pattern 0.
pub fn demo_song() -> Song {
    let mut song = Song::new();

    // Sequence slot 0 -> pattern 0, looped forever
    set_cell(&mut song, 0, 0, 0, [0, 0, 0, 0]);

    // Kick on the downbeat, snare on the backbeat
    set_cell(&mut song, 1, 0, 0, [127, 0, 0, 64]);
    set_cell(&mut song, 1, 1, 8, [127, 0, 0, 64]);

    song
}

/// Classic 909-style techno beat.
pub fn techno_pattern() -> Song {
    let mut song = Song::new();

    // Kick: four on the floor
    for step in (0..16).step_by(4) {
        set_cell(&mut song, 1, 0, step, [127, 0, 0, 64]);
    }

    // Clap on 2 and 4
    set_cell(&mut song, 1, 1, 4, [100, 0, 40, 64]);
    set_cell(&mut song, 1, 1, 12, [100, 0, 40, 64]);

    // Closed hats: 16ths, accented every beat
    for step in 0..16 {
        let velocity = if step % 4 == 0 { 110 } else { 70 };
        set_cell(&mut song, 1, 2, step, [velocity, 0, 30, 64]);
    }

    // Open hats, sparse
    set_cell(&mut song, 1, 3, 2, [80, 0, 0, 64]);
    set_cell(&mut song, 1, 3, 10, [75, 0, 0, 64]);

    // Crashes at the start and halfway
    set_cell(&mut song, 1, 6, 0, [120, 0, 50, 64]);
    set_cell(&mut song, 1, 6, 8, [100, 0, 40, 64]);

    song
}

/// Funky syncopated break.
pub fn breakbeat() -> Song {
    let mut song = Song::new();

    // Kick, swung with a ghost note
    set_cell(&mut song, 1, 0, 0, [127, 0, 0, 64]);
    set_cell(&mut song, 1, 0, 3, [100, 0, 0, 64]);
    set_cell(&mut song, 1, 0, 8, [120, 0, 0, 64]);
    set_cell(&mut song, 1, 0, 13, [90, 0, 0, 64]);

    // Snare break with a flammed pickup
    set_cell(&mut song, 1, 1, 4, [120, 0, 20, 64]);
    set_cell(&mut song, 1, 1, 12, [127, 0, 20, 64]);
    set_cell(&mut song, 1, 1, 14, [100, 30, 15, 64]);

    // Funky 16th hats with gaps at 5, 7, 13
    for step in [0, 1, 2, 3, 4, 6, 8, 9, 10, 11, 12, 14, 15] {
        let velocity = if step % 4 == 0 { 100 } else { 75 };
        set_cell(&mut song, 1, 2, step, [velocity, 0, 0, 64]);
    }

    // Sparse open hats
    set_cell(&mut song, 1, 3, 2, [90, 0, 10, 64]);
    set_cell(&mut song, 1, 3, 10, [85, 0, 10, 64]);

    // Tom fills
    set_cell(&mut song, 1, 4, 7, [100, 0, 0, 64]);
    set_cell(&mut song, 1, 5, 15, [110, 0, 0, 64]);

    song
}
