//! Immutable ROM lookup tables that drive the synthesis core.
//!
//! The three tables are a binary contract inherited from the original
//! instrument ROM: 1152 signed 8-bit waveform samples, 1024 unsigned 8-bit
//! envelope values, and 128 unsigned 16-bit per-note phase increments. They
//! are constructed once at load time, never mutated afterwards, and shared by
//! reference across any number of rendering voices.

/// Envelope shape table and segment layout.
pub mod envelope;
/// MIDI note to phase-increment lookup.
pub mod pitch;
/// Waveform sample table with configurable cycle length.
pub mod wave;

pub use envelope::{EnvelopeLayout, EnvelopeTable, ENVELOPE_TABLE_LEN};
pub use pitch::{NoteError, PitchTable, PITCH_TABLE_LEN};
pub use wave::{WaveTable, WAVE_TABLE_LEN};

use thiserror::Error;

/// Errors raised while constructing a table set. These can only occur at load
/// time; once a table exists every lookup over its valid input range is total.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("cycle length {0} must be non-zero and divide the table length {WAVE_TABLE_LEN}")]
    BadCycleLength(usize),
    #[error(
        "envelope layout indices (attack_end {attack_end}, sustain_index {sustain_index}, \
         release_start {release_start}) must be ordered and within {ENVELOPE_TABLE_LEN}"
    )]
    BadEnvelopeLayout {
        attack_end: usize,
        sustain_index: usize,
        release_start: usize,
    },
}

/// The full ROM image: one waveform table, one envelope table, one pitch
/// table. Voices borrow a bank; the bank itself owns the data so it can live
/// in a `static` or on the heap as the embedder prefers.
pub struct SoundBank {
    pub waves: WaveTable,
    pub envelope: EnvelopeTable,
    pub pitch: PitchTable,
}

impl SoundBank {
    pub fn new(waves: WaveTable, envelope: EnvelopeTable, pitch: PitchTable) -> Self {
        Self {
            waves,
            envelope,
            pitch,
        }
    }
}
