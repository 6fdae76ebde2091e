//! Immutable hardware input snapshot consumed by the recording step.
//!
//! Sampling, smoothing, and debouncing happen outside the core; by the
//! time a frame reaches the sequencer it is already clean. `pressed`
//! carries edge-triggered "just pressed" flags, not level state — a held
//! button appears in exactly one frame.

/// One frame of debounced hardware input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// The four slider values, 0-127 each.
    pub sliders: [u8; 4],
    /// Edge-triggered press flags for the sixteen step buttons.
    pub pressed: [bool; 16],
}

impl InputFrame {
    /// A frame with no presses and all sliders at zero.
    pub const fn idle() -> Self {
        Self { sliders: [0; 4], pressed: [false; 16] }
    }

    /// Whether button `index` was just pressed. The index wraps via `& 0x0F`.
    pub fn just_pressed(&self, index: usize) -> bool {
        self.pressed[index & 0x0F]
    }

    /// True if any button was just pressed this frame.
    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|p| *p)
    }
}
