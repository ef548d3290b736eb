pub mod dsp;
pub mod synth; // Voice management and polyphony
pub mod tables; // Immutable ROM lookup tables

pub use synth::{PolySynth, SynthMessage, Voice};
pub use tables::{EnvelopeTable, PitchTable, SoundBank, WaveTable};

/// Largest block a single `render_block` call may be asked to fill.
pub const MAX_BLOCK_SIZE: usize = 2048;
