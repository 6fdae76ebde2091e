//! Track and pattern containers for the sequencer grid.
//!
//! A track is one voice's 16-step loop; a pattern is 8 parallel tracks
//! playing simultaneously. Both are fixed-size, by-value containers with
//! no allocation — index access wraps via masking and can never go out
//! of bounds.

use crate::cell::Cell;

/// One voice's 16-step sequence of cells. Exactly 64 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Track {
    cells: [Cell; 16],
}

impl Track {
    /// Steps per track, matching the 16 hardware buttons.
    pub const STEPS: usize = 16;

    pub const fn new() -> Self {
        Self { cells: [Cell::empty(); 16] }
    }

    /// Get a cell. The step index wraps via `& 0x0F`.
    pub fn cell(&self, step: usize) -> &Cell {
        &self.cells[step & 0x0F]
    }

    /// Get a mutable cell. The step index wraps via `& 0x0F`.
    pub fn cell_mut(&mut self, step: usize) -> &mut Cell {
        &mut self.cells[step & 0x0F]
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// True if any step's switch is on.
    pub fn has_active_cells(&self) -> bool {
        self.cells.iter().any(|c| c.is_active())
    }

    /// Number of steps with the switch on.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_active()).count()
    }
}

/// Eight parallel tracks, one per voice. Exactly 512 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    tracks: [Track; 8],
}

impl Pattern {
    /// Voices (parallel tracks) per pattern.
    pub const VOICES: usize = 8;

    pub const fn new() -> Self {
        Self { tracks: [Track::new(); 8] }
    }

    /// Get a track. The voice index wraps via `& 0x07`.
    pub fn track(&self, voice: usize) -> &Track {
        &self.tracks[voice & 0x07]
    }

    /// Get a mutable track. The voice index wraps via `& 0x07`.
    pub fn track_mut(&mut self, voice: usize) -> &mut Track {
        &mut self.tracks[voice & 0x07]
    }

    pub fn clear(&mut self) {
        for track in &mut self.tracks {
            track.clear();
        }
    }

    /// True if any voice has an active step.
    pub fn has_active_cells(&self) -> bool {
        self.tracks.iter().any(|t| t.has_active_cells())
    }
}
