//! Integration test: build a song, drive the sequencer with a simulated
//! clock, verify what reaches the transport sink.

use sb_core::{Cell, InputFrame, MessageBuffer, PureInterpreter, Song, TransportSink};
use sb_engine::{controls, demo, machines, Sequencer};

#[derive(Debug, PartialEq, Eq)]
enum Out {
    On(u8, u8, u8),
    Off(u8, u8),
    Cc(u8, u8, u8),
    StopAll(u8),
    Start,
    Stop,
    Clock,
}

#[derive(Default)]
struct CollectingSink {
    output: Vec<Out>,
}

impl CollectingSink {
    fn voice_ons(&self) -> Vec<(u8, u8, u8)> {
        self.output
            .iter()
            .filter_map(|o| match o {
                Out::On(c, n, v) => Some((*c, *n, *v)),
                _ => None,
            })
            .collect()
    }

    fn count_clocks(&self) -> usize {
        self.output.iter().filter(|o| matches!(o, Out::Clock)).count()
    }
}

impl TransportSink for CollectingSink {
    fn voice_on(&mut self, channel: u8, note: u8, velocity: u8) {
        self.output.push(Out::On(channel, note, velocity));
    }
    fn voice_off(&mut self, channel: u8, note: u8) {
        self.output.push(Out::Off(channel, note));
    }
    fn control_change(&mut self, channel: u8, controller: u8, value: u8) {
        self.output.push(Out::Cc(channel, controller, value));
    }
    fn stop_all(&mut self, channel: u8) {
        self.output.push(Out::StopAll(channel));
    }
    fn transport_start(&mut self) {
        self.output.push(Out::Start);
    }
    fn transport_stop(&mut self) {
        self.output.push(Out::Stop);
    }
    fn clock_tick(&mut self) {
        self.output.push(Out::Clock);
    }
}

/// Drive `seq` with 1 ms ticks from `from_ms` to `to_ms` inclusive.
fn run_clock(seq: &mut Sequencer, sink: &mut CollectingSink, from_ms: u64, to_ms: u64) {
    for now in from_ms..=to_ms {
        seq.tick(now, None, sink);
    }
}

// --- demo song playback ---

#[test]
fn demo_song_plays_kick_and_snare_each_loop() {
    let mut seq = Sequencer::with_song(Box::new(demo::demo_song()));
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    run_clock(&mut seq, &mut sink, 1, interval * 32);

    // Two loops: the kick (36) and snare (38) hit twice each
    let ons = sink.voice_ons();
    let kicks: Vec<_> = ons.iter().filter(|(_, n, _)| *n == 36).collect();
    let snares: Vec<_> = ons.iter().filter(|(_, n, _)| *n == 38).collect();
    assert_eq!(kicks.len(), 2);
    assert_eq!(snares.len(), 2);
    assert!(ons.iter().all(|(c, _, _)| *c == 10));
}

#[test]
fn techno_pattern_produces_a_dense_bar() {
    let mut seq = Sequencer::with_song(Box::new(demo::techno_pattern()));
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    run_clock(&mut seq, &mut sink, 1, interval * 16);

    // 4 kicks + 2 claps + 16 hats + 2 open hats + 2 crashes
    assert_eq!(sink.voice_ons().len(), 26);
}

// --- timing ---

#[test]
fn a_late_tick_processes_each_overdue_step_individually() {
    let mut seq = Sequencer::with_song(Box::new(demo::techno_pattern()));
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    // One giant gap covering four steps, then a single tick
    seq.tick(interval * 4, None, &mut sink);

    assert_eq!(seq.step(), 4);
    // Steps 1-4 of the hat track all played, none collapsed: hats on
    // 1, 2, 3, 4 plus the kick on 4
    let hats = sink.voice_ons().iter().filter(|(_, n, _)| *n == 42).count();
    assert_eq!(hats, 4);
}

#[test]
fn clock_runs_at_24_ppqn() {
    let mut seq = Sequencer::new();
    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    // One beat at 120 BPM is 500 ms; the pulse interval floors to
    // 20 ms, so [1, 500] carries 25 pulses
    run_clock(&mut seq, &mut sink, 1, 500);
    assert_eq!(sink.count_clocks(), 25);
}

// --- meta-track ---

#[test]
fn meta_track_switches_patterns_between_loops() {
    let mut song = Box::new(Song::new());

    // Meta-track: slot 0 -> pattern 0, slot 1 -> pattern 4
    *song.pattern_mut(0, 0).track_mut(0).cell_mut(0) = Cell::new(true, [0, 0, 0, 0]);
    *song.pattern_mut(0, 0).track_mut(0).cell_mut(1) = Cell::new(true, [16, 0, 0, 0]);

    // Mode 1 pattern 0: kick on step 1; pattern 4: snare on step 1
    *song.pattern_mut(1, 0).track_mut(0).cell_mut(1) = Cell::new(true, [100, 0, 0, 0]);
    *song.pattern_mut(1, 4).track_mut(1).cell_mut(1) = Cell::new(true, [100, 0, 0, 0]);

    let mut seq = Sequencer::with_song(song);
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    // Loop 1 plays pattern 0 (kick); the wrap applies slot 0 again and
    // advances the cursor, so loop 2 still plays pattern 0; the next
    // wrap applies slot 1 and loop 3 plays pattern 4 (snare)
    run_clock(&mut seq, &mut sink, 1, interval * 48);

    let ons = sink.voice_ons();
    let kicks = ons.iter().filter(|(_, n, _)| *n == 36).count();
    let snares = ons.iter().filter(|(_, n, _)| *n == 38).count();
    assert_eq!(kicks + snares, 3);
    assert!(kicks >= 1 && snares >= 1);
}

#[test]
fn pattern_switch_takes_effect_on_the_downbeat() {
    let mut song = Box::new(Song::new());

    // Meta-track slot 0 -> pattern 4; the old and new patterns differ
    // exactly on step 0 (kick in pattern 0, snare in pattern 4)
    *song.pattern_mut(0, 0).track_mut(0).cell_mut(0) = Cell::new(true, [16, 0, 0, 0]);
    *song.pattern_mut(1, 0).track_mut(0).cell_mut(0) = Cell::new(true, [100, 0, 0, 0]);
    *song.pattern_mut(1, 4).track_mut(1).cell_mut(0) = Cell::new(true, [100, 0, 0, 0]);

    let mut seq = Sequencer::with_song(song);
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    run_clock(&mut seq, &mut sink, 1, interval * 16);

    // The wrap applies the new selection before step 0 plays: the first
    // downbeat heard is the snare from pattern 4, never pattern 0's kick
    let notes: Vec<u8> = sink.voice_ons().iter().map(|(_, n, _)| *n).collect();
    assert_eq!(notes, vec![38]);
}

// --- recording through input frames ---

#[test]
fn recorded_input_plays_on_the_next_pass() {
    let mut seq = Sequencer::new();
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.set_clock_enabled(false);
    seq.select_mode(1);
    seq.select_track(0);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    // Press button 5 with the velocity slider at 90
    let mut frame = InputFrame::idle();
    frame.pressed[5] = true;
    frame.sliders = [90, 0, 0, 0];
    seq.tick(1, Some(&frame), &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    run_clock(&mut seq, &mut sink, 2, interval * 16);

    let ons = sink.voice_ons();
    assert_eq!(ons, vec![(10, 36, 90)]);
}

// --- buffer flushing under load ---

/// Emits enough messages per cell to force mid-scan flushes.
struct Chord {
    channel: u8,
}

impl PureInterpreter for Chord {
    fn process(&self, voice: u8, cell: Cell, _step_time_ms: u64, out: &mut MessageBuffer) {
        if !cell.is_active() {
            return;
        }
        for offset in 0..3 {
            let note = 60 + voice * 3 + offset;
            out.voice_on(self.channel, note, 100, 0);
            out.voice_off(self.channel, note, 50);
        }
    }
    fn channel(&self) -> u8 {
        self.channel
    }
    fn name(&self) -> &'static str {
        "chord"
    }
}

#[test]
fn full_step_output_exceeding_one_buffer_still_arrives() {
    let mut song = Box::new(Song::new());
    // All 8 voices active on step 1: 8 * 6 = 48 messages, more than
    // one 32-slot buffer holds
    for voice in 0..8 {
        *song.pattern_mut(1, 0).track_mut(voice).cell_mut(1) = Cell::new(true, [0; 4]);
    }

    let mut seq = Sequencer::with_song(song);
    seq.register(1, Box::new(Chord { channel: 9 }));
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    run_clock(&mut seq, &mut sink, 1, interval + 100);

    assert_eq!(sink.voice_ons().len(), 24);
    let offs = sink.output.iter().filter(|o| matches!(o, Out::Off(..))).count();
    assert_eq!(offs, 24);
}

// --- transport ---

#[test]
fn stop_quiets_registered_channels_and_halts_stepping() {
    let mut seq = Sequencer::with_song(Box::new(demo::techno_pattern()));
    seq.register(1, machines::create_interpreter("DrumMachine", 10).unwrap());
    seq.register(2, machines::create_interpreter("AcidBass", 2).unwrap());
    seq.set_clock_enabled(false);

    let mut sink = CollectingSink::default();
    seq.start(0, &mut sink);

    let interval = controls::step_interval_ms(seq.bpm());
    run_clock(&mut seq, &mut sink, 1, interval * 2);
    seq.stop(interval * 2 + 1, &mut sink);
    seq.tick(interval * 2 + 1, None, &mut sink);

    assert!(sink.output.contains(&Out::Stop));
    assert!(sink.output.contains(&Out::StopAll(10)));
    assert!(sink.output.contains(&Out::StopAll(2)));

    // No further steps fire while stopped
    let before = sink.voice_ons().len();
    run_clock(&mut seq, &mut sink, interval * 2 + 2, interval * 8);
    assert_eq!(sink.voice_ons().len(), before);
}
