//! Built-in interpreter implementations.

mod acid_bass;
mod bass_line;
mod drum_machine;
mod echo_fade;
mod meta_arp;
pub mod scale;

use alloc::boxed::Box;

use sb_core::Interpreter;

pub use acid_bass::AcidBass;
pub use bass_line::BassLine;
pub use drum_machine::DrumMachine;
pub use echo_fade::EchoFade;
pub use meta_arp::MetaArp;

/// Create an interpreter by name, bound to `channel`.
pub fn create_interpreter(name: &str, channel: u8) -> Option<Box<dyn Interpreter>> {
    Some(match name {
        "DrumMachine" => Box::new(DrumMachine::new(channel)),
        "AcidBass" => Box::new(AcidBass::new(channel)),
        "EchoFade" => Box::new(EchoFade::new(channel)),
        "MetaArp" => Box::new(MetaArp::new(channel)),
        "BassLine" => Box::new(BassLine::new(channel)),
        _ => return None,
    })
}
