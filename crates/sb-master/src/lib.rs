//! Headless controller for the stepbox sequencer.
//!
//! Owns a configured `Sequencer` and manages a playback thread that
//! drives it against a transport sink at ~1 ms cadence. The sequencer
//! itself stays single-threaded: `play` moves it into the thread and
//! `stop` moves it back, so exactly one thread touches it at a time.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

// Re-export common types so callers don't need sb-core/sb-engine directly.
pub use sb_core::{Cell, InputFrame, Song, TransportSink};
pub use sb_engine::{controls, demo, machines, Sequencer};

/// Longest relative delay any built-in interpreter schedules (the
/// 2000 ms maximum gate), used to bound the post-stop drain.
const DRAIN_LIMIT_MS: u64 = 2100;

/// Headless sequencer controller — owns the sequencer and manages playback.
pub struct Controller {
    sequencer: Option<Sequencer>,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    current_step: Arc<AtomicU8>,
    input_tx: mpsc::Sender<InputFrame>,
    thread: Option<JoinHandle<Sequencer>>,
}

impl Controller {
    /// A controller around an empty sequencer with no interpreters.
    pub fn new() -> Self {
        Self::with_sequencer(Sequencer::new())
    }

    pub fn with_sequencer(sequencer: Sequencer) -> Self {
        Self { sequencer: Some(sequencer), playback: None }
    }

    /// A controller loaded with the demo song and the built-in
    /// interpreters on their conventional channels.
    pub fn demo() -> Self {
        let mut sequencer = Sequencer::with_song(Box::new(demo::demo_song()));
        for (mode, name, channel) in [
            (1, "DrumMachine", 10),
            (2, "AcidBass", 2),
            (3, "EchoFade", 3),
            (4, "MetaArp", 4),
            (5, "BassLine", 5),
        ] {
            if let Some(interp) = machines::create_interpreter(name, channel) {
                sequencer.register(mode, interp);
            }
        }
        Self::with_sequencer(sequencer)
    }

    // --- Sequencer access (only while stopped) ---

    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }

    pub fn sequencer_mut(&mut self) -> Option<&mut Sequencer> {
        self.sequencer.as_mut()
    }

    // --- Real-time playback ---

    /// Move the sequencer into a playback thread driving `sink`.
    ///
    /// Stops any previous playback first. A controller whose sequencer
    /// was lost to a panicking playback thread does nothing.
    pub fn play<S: TransportSink + Send + 'static>(&mut self, sink: S) {
        self.stop();

        let Some(sequencer) = self.sequencer.take() else {
            return;
        };

        let stop_signal = Arc::new(AtomicBool::new(false));
        let current_step = Arc::new(AtomicU8::new(0));
        let (input_tx, input_rx) = mpsc::channel();

        let stop = stop_signal.clone();
        let step = current_step.clone();

        let thread = std::thread::spawn(move || {
            playback_thread(sequencer, sink, stop, step, input_rx)
        });

        self.playback = Some(PlaybackHandle {
            stop_signal,
            current_step,
            input_tx,
            thread: Some(thread),
        });
    }

    /// Stop playback and take the sequencer back.
    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                if let Ok(sequencer) = handle.join() {
                    self.sequencer = Some(sequencer);
                }
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// The step the playback thread last processed, for displays.
    pub fn current_step(&self) -> u8 {
        match &self.playback {
            Some(pb) => pb.current_step.load(Ordering::Relaxed),
            None => self.sequencer.as_ref().map_or(0, |s| s.step()),
        }
    }

    /// Forward an input frame to the playback thread.
    ///
    /// Frames queue until the next tick; only the newest one is
    /// applied, matching hardware that samples its panel once per tick.
    /// Dropped silently when nothing is playing.
    pub fn send_input(&self, frame: InputFrame) {
        if let Some(pb) = &self.playback {
            let _ = pb.input_tx.send(frame);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

fn playback_thread<S: TransportSink>(
    mut sequencer: Sequencer,
    mut sink: S,
    stop_signal: Arc<AtomicBool>,
    current_step: Arc<AtomicU8>,
    input_rx: mpsc::Receiver<InputFrame>,
) -> Sequencer {
    let epoch = Instant::now();
    sequencer.start(0, &mut sink);

    while !stop_signal.load(Ordering::Relaxed) {
        let now = epoch.elapsed().as_millis() as u64;
        let frame = input_rx.try_iter().last();
        sequencer.tick(now, frame.as_ref(), &mut sink);
        current_step.store(sequencer.step(), Ordering::Relaxed);
        std::thread::sleep(Duration::from_millis(1));
    }

    let stopped_at = epoch.elapsed().as_millis() as u64;
    sequencer.stop(stopped_at, &mut sink);

    // Let pending note-offs and the stop-alls fire before handing the
    // sequencer back, bounded by the longest gate any machine schedules
    loop {
        let now = epoch.elapsed().as_millis() as u64;
        sequencer.tick(now, None, &mut sink);
        if sequencer.pending_messages() == 0 || now >= stopped_at + DRAIN_LIMIT_MS {
            break;
        }
        std::thread::sleep(Duration::from_millis(1));
    }

    sequencer
}
