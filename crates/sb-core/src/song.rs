//! The complete song grid: 15 modes of 32 patterns each.
//!
//! A song is the whole performance — every pattern of every mode,
//! allocated once and mutated in place for the lifetime of the process.
//! Mode 0, pattern 0, voice 0 is reserved as the meta-track that selects
//! which pattern plays on every other mode (see the engine's sequencer).
//!
//! Memory: 15 modes x 32 patterns x 512 bytes = 245 760 bytes.

use crate::pattern::Pattern;

/// The full 15x32 pattern grid.
#[derive(Clone)]
pub struct Song {
    patterns: [[Pattern; 32]; 15],
}

impl Song {
    /// Interpreter slots (outbound channels 1-15).
    pub const MODES: usize = 15;
    /// Selectable patterns per mode.
    pub const PATTERNS: usize = 32;

    /// A zeroed song. Callers that need it on the heap should box the
    /// result; the engine owns its song as `Box<Song>`.
    pub const fn new() -> Self {
        Self { patterns: [[Pattern::new(); 32]; 15] }
    }

    /// Total size of the grid in bytes.
    pub const fn memory_size() -> usize {
        Song::MODES * Song::PATTERNS * core::mem::size_of::<Pattern>()
    }

    /// Get a pattern. The mode index wraps modulo 15, the pattern index
    /// via `& 0x1F`.
    pub fn pattern(&self, mode: usize, pattern: usize) -> &Pattern {
        &self.patterns[mode % Song::MODES][pattern & 0x1F]
    }

    /// Get a mutable pattern, with the same index wrapping.
    pub fn pattern_mut(&mut self, mode: usize, pattern: usize) -> &mut Pattern {
        &mut self.patterns[mode % Song::MODES][pattern & 0x1F]
    }

    /// Clear the entire grid, cascading down to every cell.
    pub fn clear(&mut self) {
        for mode in &mut self.patterns {
            for pattern in mode {
                pattern.clear();
            }
        }
    }
}

impl Default for Song {
    fn default() -> Self {
        Self::new()
    }
}
