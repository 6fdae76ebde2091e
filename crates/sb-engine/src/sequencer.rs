//! Step sequencer orchestration.
//!
//! The `Sequencer` owns the song, the interpreter registry, the scratch
//! message buffer, and the scheduler, and mutates all of them from one
//! place: `tick`. Hosts call `tick` on a monotonic millisecond clock
//! (typically every ~1 ms) with an optional input frame; note output
//! leaves through the `TransportSink` passed to the same call.

use alloc::boxed::Box;

use sb_core::{
    Cell, InputFrame, Interpreter, MessageBuffer, MessageKind, Pattern, Song, Track,
    TransportSink,
};

use crate::controls;
use crate::scheduler::MessageScheduler;

/// Flush the scratch buffer once fewer than this many slots remain.
///
/// Every process call starts with at least this much headroom; a call
/// that emits more than that may still fill the buffer, and the excess
/// is a silent drop, same as pool exhaustion.
const FLUSH_MARGIN: usize = 8;

/// Downbeat indication level for step 0.
pub const BRIGHTNESS_DOWNBEAT: u8 = 255;
/// Indication level for the quarter-note steps 4, 8, 12.
pub const BRIGHTNESS_BEAT: u8 = 50;
/// Indication level for every other step.
pub const BRIGHTNESS_DIM: u8 = 5;

/// The tick-driven sequencer core.
///
/// Single-threaded by construction: nothing here is shared, and every
/// piece of state is touched only from `tick` and the explicit
/// navigation calls.
pub struct Sequencer {
    song: Box<Song>,
    interpreters: [Option<Box<dyn Interpreter>>; Song::MODES],
    scheduler: MessageScheduler,
    scratch: MessageBuffer,
    /// Currently selected pattern per mode, driven by the meta-track.
    pattern_select: [u8; Song::MODES],
    step: u8,
    sequence_cursor: u8,
    current_mode: u8,
    current_track: u8,
    bpm: f32,
    step_interval_ms: u64,
    clock_interval_ms: u64,
    step_anchor: u64,
    clock_anchor: u64,
    playing: bool,
    clock_enabled: bool,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Self::with_song(Box::new(Song::new()))
    }

    /// Build a sequencer around an existing song.
    pub fn with_song(song: Box<Song>) -> Self {
        let bpm = controls::DEFAULT_BPM;
        Self {
            song,
            interpreters: core::array::from_fn(|_| None),
            scheduler: MessageScheduler::new(),
            scratch: MessageBuffer::new(),
            pattern_select: [0; Song::MODES],
            step: 0,
            sequence_cursor: 0,
            current_mode: 0,
            current_track: 0,
            bpm,
            step_interval_ms: controls::step_interval_ms(bpm),
            clock_interval_ms: controls::clock_interval_ms(bpm),
            step_anchor: 0,
            clock_anchor: 0,
            playing: false,
            clock_enabled: true,
        }
    }

    // === interpreter registry ===

    /// Register an interpreter on mode slot `mode` (wrapped modulo 15).
    ///
    /// Mode 0 doubles as the meta-track; an interpreter registered there
    /// still plays its cells like any other mode.
    pub fn register(&mut self, mode: usize, interpreter: Box<dyn Interpreter>) {
        self.interpreters[mode % Song::MODES] = Some(interpreter);
    }

    /// Remove and return the interpreter on `mode`, if any.
    pub fn unregister(&mut self, mode: usize) -> Option<Box<dyn Interpreter>> {
        self.interpreters[mode % Song::MODES].take()
    }

    pub fn interpreter(&self, mode: usize) -> Option<&dyn Interpreter> {
        self.interpreters[mode % Song::MODES].as_deref()
    }

    // === song access ===

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn song_mut(&mut self) -> &mut Song {
        &mut self.song
    }

    /// Clear every cell in the song.
    pub fn clear_song(&mut self) {
        self.song.clear();
    }

    // === navigation and tempo ===

    /// Set the tempo, clamped to 20-800 BPM, and recompute intervals.
    pub fn set_bpm(&mut self, bpm: f32) {
        self.bpm = controls::clamp_bpm(bpm);
        self.step_interval_ms = controls::step_interval_ms(self.bpm);
        self.clock_interval_ms = controls::clock_interval_ms(self.bpm);
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Select the mode that recording edits target (wrapped modulo 15).
    pub fn select_mode(&mut self, mode: u8) {
        self.current_mode = mode % Song::MODES as u8;
    }

    /// Select the track that recording edits target (wrapped modulo 8).
    pub fn select_track(&mut self, track: u8) {
        self.current_track = track & 0x07;
    }

    /// Select the current mode's pattern (wrapped modulo 32).
    ///
    /// The meta-track overwrites every selector but mode 0's on each
    /// loop wrap, so a manual selection on another mode lasts at most
    /// one loop while playing.
    pub fn select_pattern(&mut self, pattern: u8) {
        self.pattern_select[self.current_mode as usize] = pattern & 0x1F;
    }

    pub fn selected_pattern(&self, mode: usize) -> u8 {
        self.pattern_select[mode % Song::MODES]
    }

    /// Enable or disable outbound clock pulses (24 PPQN).
    pub fn set_clock_enabled(&mut self, enabled: bool) {
        self.clock_enabled = enabled;
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn current_mode(&self) -> u8 {
        self.current_mode
    }

    pub fn current_track(&self) -> u8 {
        self.current_track
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Downbeat indication for the current step, polled by display hosts.
    pub fn step_brightness(&self) -> u8 {
        if self.step == 0 {
            BRIGHTNESS_DOWNBEAT
        } else if self.step % 4 == 0 {
            BRIGHTNESS_BEAT
        } else {
            BRIGHTNESS_DIM
        }
    }

    /// Number of scheduled messages that have not fired yet.
    pub fn pending_messages(&self) -> usize {
        self.scheduler.pending()
    }

    /// Discard all pending scheduled messages without firing them.
    ///
    /// `stop` does not do this on its own: note-offs for notes already
    /// sounding stay in the pool and still fire. Hosts that want hard
    /// silence call this after `stop`.
    pub fn clear_pending(&mut self) {
        self.scheduler.clear();
    }

    // === transport ===

    /// Begin playback at step 0.
    ///
    /// The meta-track sequence cursor is left where it was; only the
    /// step cursor and the timing anchors reset.
    pub fn start<S: TransportSink>(&mut self, now_ms: u64, sink: &mut S) {
        self.step = 0;
        self.step_anchor = now_ms;
        self.clock_anchor = now_ms;
        sink.transport_start();
        self.playing = true;
    }

    /// Stop playback and quiet every registered channel.
    pub fn stop<S: TransportSink>(&mut self, now_ms: u64, sink: &mut S) {
        sink.transport_stop();
        for interpreter in self.interpreters.iter().flatten() {
            self.scheduler
                .schedule_one(MessageKind::StopAll, interpreter.channel(), 0, 0, 0, now_ms);
        }
        self.playing = false;
    }

    /// One orchestration tick.
    ///
    /// Order is fixed: input, clock pulse, step catch-up (each overdue
    /// step advanced and processed individually), scheduler dispatch.
    pub fn tick<S: TransportSink>(
        &mut self,
        now_ms: u64,
        input: Option<&InputFrame>,
        sink: &mut S,
    ) {
        if let Some(frame) = input {
            self.apply_input(frame);
        }

        if self.playing {
            if self.clock_enabled
                && now_ms.saturating_sub(self.clock_anchor) >= self.clock_interval_ms
            {
                sink.clock_tick();
                // Advance by exactly one interval, never to `now`, so
                // the pulse train cannot drift over a long run.
                self.clock_anchor += self.clock_interval_ms;
            }

            while now_ms.saturating_sub(self.step_anchor) >= self.step_interval_ms {
                self.step_anchor += self.step_interval_ms;
                self.step = (self.step + 1) & 0x0F;
                // The wrap re-evaluates the meta-track first, so the
                // downbeat already plays from the new pattern selection
                if self.step == 0 {
                    self.apply_sequence();
                }
                self.process_step(now_ms);
            }
        }

        self.scheduler.tick(now_ms, sink);
    }

    /// Toggle the cell at `step` of the current editing position and
    /// capture the frame's slider values into its parameters.
    pub fn record(&mut self, step: usize, frame: &InputFrame) {
        let pattern = self.pattern_select[self.current_mode as usize];
        let cell = self
            .song
            .pattern_mut(self.current_mode as usize, pattern as usize)
            .track_mut(self.current_track as usize)
            .cell_mut(step);
        cell.toggle();
        for (index, value) in frame.sliders.iter().enumerate() {
            cell.set_param(index, *value);
        }
    }

    fn apply_input(&mut self, frame: &InputFrame) {
        for step in 0..Track::STEPS {
            if frame.just_pressed(step) {
                self.record(step, frame);
            }
        }
    }

    /// Run every registered interpreter over the current step, flushing
    /// the scratch buffer into the scheduler before it can overflow.
    fn process_step(&mut self, now_ms: u64) {
        let step = self.step as usize;
        for (mode, slot) in self.interpreters.iter_mut().enumerate() {
            let Some(interpreter) = slot else { continue };
            let pattern_index = self.pattern_select[mode] as usize;
            let pattern = self.song.pattern(mode, pattern_index);
            for voice in 0..Pattern::VOICES {
                let cell = *pattern.track(voice).cell(step);
                interpreter.process(voice as u8, cell, now_ms, &mut self.scratch);
                if self.scratch.remaining() < FLUSH_MARGIN {
                    self.scheduler.schedule_all(&self.scratch, now_ms);
                    self.scratch.clear();
                }
            }
        }
        if !self.scratch.is_empty() {
            self.scheduler.schedule_all(&self.scratch, now_ms);
            self.scratch.clear();
        }
    }

    /// Pattern-sequencing protocol, run on each wrap to step 0.
    ///
    /// Mode 0 / pattern 0 / voice 0 is the meta-track: an active cell at
    /// the sequence cursor maps its first parameter onto a pattern number
    /// and applies it to every other mode's selector, then the cursor
    /// advances. An inactive cell resets the cursor to 0 and re-evaluates
    /// slot 0 immediately without advancing, so an empty meta-track pins
    /// every mode to pattern 0 and a lone active slot 0 is re-applied on
    /// every loop.
    fn apply_sequence(&mut self) {
        let cell = self.sequence_cell(self.sequence_cursor as usize);
        if cell.is_active() {
            self.apply_target(cell.param(0));
            self.sequence_cursor = (self.sequence_cursor + 1) & 0x0F;
        } else {
            self.sequence_cursor = 0;
            let first = self.sequence_cell(0);
            if first.is_active() {
                self.apply_target(first.param(0));
            }
        }
    }

    fn sequence_cell(&self, step: usize) -> Cell {
        *self.song.pattern(0, 0).track(0).cell(step)
    }

    /// Apply a meta-track target to every mode's selector except mode 0.
    fn apply_target(&mut self, value: u8) {
        let target = controls::pattern_from_control(value);
        for selector in self.pattern_select.iter_mut().skip(1) {
            *selector = target;
        }
    }
}
