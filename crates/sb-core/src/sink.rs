//! Transport sink: the boundary to the outbound protocol driver.
//!
//! The core never talks to hardware; the scheduler executes due messages
//! against this trait and the sequencer emits realtime transport and
//! clock signals through it. Hosts implement it over USB MIDI, a DIN
//! jack, a test recorder — the core does not care.

/// Outbound message and transport signal consumer.
pub trait TransportSink {
    fn voice_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn voice_off(&mut self, channel: u8, note: u8);
    fn control_change(&mut self, channel: u8, controller: u8, value: u8);
    /// Silence every voice on `channel` immediately.
    fn stop_all(&mut self, channel: u8);
    fn transport_start(&mut self);
    fn transport_stop(&mut self);
    /// One timing pulse (24 per quarter note).
    fn clock_tick(&mut self);
}
