#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tables::BankError;

/// Number of entries in the envelope shape ROM.
pub const ENVELOPE_TABLE_LEN: usize = 1024;

/// Segment boundaries inside the envelope table.
///
/// The ROM image does not carry segment metadata, so the boundaries are
/// configuration rather than hard-coded offsets. The defaults split the
/// table into attack `[0, 256)`, decay `[256, 511]`, a sustain hold at index
/// 511, and release `[512, 1024)` running down to silence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeLayout {
    /// First index past the attack segment (the decay segment starts here).
    pub attack_end: usize,
    /// Index whose value is held while a note sustains; also the last index
    /// of the decay segment.
    pub sustain_index: usize,
    /// First index of the release segment. Release runs from here to the end
    /// of the table.
    pub release_start: usize,
}

impl Default for EnvelopeLayout {
    fn default() -> Self {
        Self {
            attack_end: 256,
            sustain_index: 511,
            release_start: 512,
        }
    }
}

impl EnvelopeLayout {
    fn validate(&self) -> Result<(), BankError> {
        let ordered = self.attack_end <= self.sustain_index
            && self.sustain_index < self.release_start
            && self.release_start < ENVELOPE_TABLE_LEN;
        if ordered {
            Ok(())
        } else {
            Err(BankError::BadEnvelopeLayout {
                attack_end: self.attack_end,
                sustain_index: self.sustain_index,
                release_start: self.release_start,
            })
        }
    }
}

/// The envelope shape ROM: unsigned 8-bit amplitude values indexed by
/// envelope progress, plus the segment layout used to walk them.
pub struct EnvelopeTable {
    data: [u8; ENVELOPE_TABLE_LEN],
    layout: EnvelopeLayout,
}

impl EnvelopeTable {
    pub fn new(data: [u8; ENVELOPE_TABLE_LEN]) -> Self {
        Self {
            data,
            layout: EnvelopeLayout::default(),
        }
    }

    pub fn with_layout(
        data: [u8; ENVELOPE_TABLE_LEN],
        layout: EnvelopeLayout,
    ) -> Result<Self, BankError> {
        layout.validate()?;
        Ok(Self { data, layout })
    }

    pub fn layout(&self) -> EnvelopeLayout {
        self.layout
    }

    /// Raw table value at `index`, clamped to the table. Indexing is total.
    #[inline]
    pub fn value(&self, index: usize) -> u8 {
        debug_assert!(index < ENVELOPE_TABLE_LEN);
        self.data[index.min(ENVELOPE_TABLE_LEN - 1)]
    }

    /// Table value at `index` normalized to `[0, 1]`.
    #[inline]
    pub fn level(&self, index: usize) -> f32 {
        self.value(index) as f32 / u8::MAX as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        assert!(EnvelopeLayout::default().validate().is_ok());
    }

    #[test]
    fn rejects_unordered_layout() {
        let layout = EnvelopeLayout {
            attack_end: 600,
            sustain_index: 511,
            release_start: 512,
        };
        assert!(matches!(
            EnvelopeTable::with_layout([0; ENVELOPE_TABLE_LEN], layout),
            Err(BankError::BadEnvelopeLayout { .. })
        ));
    }

    #[test]
    fn rejects_release_start_past_table_end() {
        let layout = EnvelopeLayout {
            attack_end: 256,
            sustain_index: 511,
            release_start: ENVELOPE_TABLE_LEN,
        };
        assert!(EnvelopeTable::with_layout([0; ENVELOPE_TABLE_LEN], layout).is_err());
    }

    #[test]
    fn level_is_normalized() {
        let mut data = [0u8; ENVELOPE_TABLE_LEN];
        data[10] = 255;
        data[11] = 128;
        let table = EnvelopeTable::new(data);
        assert_eq!(table.level(10), 1.0);
        assert!((table.level(11) - 128.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(table.level(0), 0.0);
    }

    #[test]
    fn reads_final_entry() {
        let mut data = [0u8; ENVELOPE_TABLE_LEN];
        data[ENVELOPE_TABLE_LEN - 1] = 7;
        let table = EnvelopeTable::new(data);
        assert_eq!(table.value(ENVELOPE_TABLE_LEN - 1), 7);
    }
}
