use thiserror::Error;

/// One entry per MIDI note.
pub const PITCH_TABLE_LEN: usize = 128;

/// Fractional bits of the phase accumulator (Q16.16).
pub const PHASE_FRAC_BITS: u32 = 16;

/// Fractional bits of a raw pitch-table entry (Q8.8).
pub const PITCH_FRAC_BITS: u32 = 8;

/// Control-path errors. These are reported to the caller and never disturb
/// rendering voices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    /// The note number is outside the 0-127 MIDI range. Out-of-range input
    /// is an error rather than being clamped to the nearest valid note.
    #[error("MIDI note {0} outside supported range 0-127")]
    OutOfRange(u8),
}

/// The pitch ROM: per-note phase increments in Q8.8 fixed point, measured in
/// cycle-index units per output sample at the reference sample rate the table
/// was computed for. The sample rate itself is external configuration and not
/// encoded here.
///
/// Lookups are pure and the table is immutable, so it is safe to share across
/// any number of concurrently rendering voices.
pub struct PitchTable {
    data: [u16; PITCH_TABLE_LEN],
}

impl PitchTable {
    pub fn new(data: [u16; PITCH_TABLE_LEN]) -> Self {
        Self { data }
    }

    /// Raw Q8.8 phase increment for a MIDI note.
    #[inline]
    pub fn lookup(&self, note: u8) -> Result<u16, NoteError> {
        self.data
            .get(note as usize)
            .copied()
            .ok_or(NoteError::OutOfRange(note))
    }

    /// Phase increment widened to the oscillator's Q16.16 format.
    #[inline]
    pub fn increment(&self, note: u8) -> Result<u32, NoteError> {
        let raw = self.lookup(note)?;
        Ok((raw as u32) << (PHASE_FRAC_BITS - PITCH_FRAC_BITS))
    }
}
