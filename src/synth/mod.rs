// Purpose: voice lifecycle, polyphony, control-event handling
// This layer composes the dsp primitives over a shared SoundBank

pub mod message;
pub mod poly;
pub mod voice;

pub use message::{MessageReceiver, SynthMessage};
pub use poly::PolySynth;
pub use voice::{Voice, VoiceState};
