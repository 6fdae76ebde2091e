//! Bit-packed step cell: one activity bit plus four 7-bit parameters.
//!
//! A cell is the snapshot captured when the performer presses a step
//! button: whether the step is on, and the four slider values at that
//! moment. Everything fits in a single 32-bit word:
//!
//! ```text
//! [31:29] unused
//! [28]    switch (activity bit)
//! [27:21] param 0
//! [20:14] param 1
//! [13:7]  param 2
//! [6:0]   param 3
//! ```
//!
//! The raw word is also the normative unit of any future save format
//! (little-endian u32 per step).

/// One step's recorded data, packed into a `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Cell(u32);

impl Cell {
    /// Number of independent 7-bit parameters per cell.
    pub const PARAMS: usize = 4;

    const SWITCH_MASK: u32 = 1 << 28;
    const PARAM_MASK: u32 = 0x7F;
    /// Bit offset of each parameter field, param 0 highest.
    const PARAM_SHIFT: [u32; 4] = [21, 14, 7, 0];

    /// The all-zero (inactive, empty) cell.
    pub const fn empty() -> Self {
        Cell(0)
    }

    /// Build a cell from an activity flag and four parameter values.
    ///
    /// Parameter values are truncated to 7 bits, same as [`set_param`].
    ///
    /// [`set_param`]: Cell::set_param
    pub fn new(active: bool, params: [u8; 4]) -> Self {
        let mut cell = Cell(0);
        cell.set_active(active);
        for (index, value) in params.iter().enumerate() {
            cell.set_param(index, *value);
        }
        cell
    }

    /// Whether the step's switch is on.
    pub const fn is_active(self) -> bool {
        self.0 & Self::SWITCH_MASK != 0
    }

    pub fn set_active(&mut self, on: bool) {
        if on {
            self.0 |= Self::SWITCH_MASK;
        } else {
            self.0 &= !Self::SWITCH_MASK;
        }
    }

    /// Flip the activity bit, leaving the parameters untouched.
    pub fn toggle(&mut self) {
        self.0 ^= Self::SWITCH_MASK;
    }

    /// Read a parameter (0-127). The index wraps modulo 4.
    pub fn param(self, index: usize) -> u8 {
        let shift = Self::PARAM_SHIFT[index & 3];
        ((self.0 >> shift) & Self::PARAM_MASK) as u8
    }

    /// Write a parameter. The value is truncated to 7 bits (`value & 0x7F`,
    /// not saturated) and the index wraps modulo 4.
    pub fn set_param(&mut self, index: usize, value: u8) {
        let shift = Self::PARAM_SHIFT[index & 3];
        let value = (value as u32) & Self::PARAM_MASK;
        self.0 = (self.0 & !(Self::PARAM_MASK << shift)) | (value << shift);
    }

    /// The raw 32-bit word. Round-trips bit-exact through [`from_raw`].
    ///
    /// [`from_raw`]: Cell::from_raw
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn from_raw(raw: u32) -> Self {
        Cell(raw)
    }

    pub fn set_raw(&mut self, raw: u32) {
        self.0 = raw;
    }

    /// True if the cell is the all-zero bit pattern.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
