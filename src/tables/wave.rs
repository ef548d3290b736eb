use crate::tables::BankError;

/// Total number of waveform samples in the ROM.
pub const WAVE_TABLE_LEN: usize = 1152;

/// Default single-cycle length. 1152 / 128 = 9 concatenated waveforms.
pub const DEFAULT_CYCLE_LEN: usize = 128;

/// The waveform ROM: signed 8-bit samples holding one or more concatenated
/// single-cycle waveforms.
///
/// The ROM image alone does not say how many waveforms it contains, so the
/// cycle length is a construction parameter rather than a baked-in constant.
/// The default of 128 samples per cycle partitions the table into 9 waveforms.
/// All playback index arithmetic wraps modulo the cycle length within the
/// selected waveform, so reads can never leave the table.
#[derive(Debug)]
pub struct WaveTable {
    data: [i8; WAVE_TABLE_LEN],
    cycle_len: usize,
}

impl WaveTable {
    /// Build a table with the default 128-sample cycle length.
    pub fn new(data: [i8; WAVE_TABLE_LEN]) -> Self {
        match Self::with_cycle_len(data, DEFAULT_CYCLE_LEN) {
            Ok(table) => table,
            // 128 divides 1152; unreachable by construction.
            Err(_) => unreachable!(),
        }
    }

    /// Build a table with an explicit cycle length. The length must be
    /// non-zero and divide [`WAVE_TABLE_LEN`] so every waveform is complete.
    pub fn with_cycle_len(
        data: [i8; WAVE_TABLE_LEN],
        cycle_len: usize,
    ) -> Result<Self, BankError> {
        if cycle_len == 0 || WAVE_TABLE_LEN % cycle_len != 0 {
            return Err(BankError::BadCycleLength(cycle_len));
        }
        Ok(Self { data, cycle_len })
    }

    /// Samples per single-cycle waveform.
    pub fn cycle_len(&self) -> usize {
        self.cycle_len
    }

    /// Number of waveforms stored in the table.
    pub fn waveform_count(&self) -> usize {
        WAVE_TABLE_LEN / self.cycle_len
    }

    /// Read one sample of the given waveform. `index` wraps modulo the cycle
    /// length; `waveform` wraps modulo the waveform count. Lookups are total.
    #[inline]
    pub fn sample(&self, waveform: usize, index: usize) -> i8 {
        let waveform = waveform % self.waveform_count();
        let index = index % self.cycle_len;
        let flat = waveform * self.cycle_len + index;
        debug_assert!(flat < WAVE_TABLE_LEN);
        self.data[flat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_data() -> [i8; WAVE_TABLE_LEN] {
        let mut data = [0i8; WAVE_TABLE_LEN];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = (i % 256) as u8 as i8;
        }
        data
    }

    #[test]
    fn default_cycle_partitions_into_nine_waveforms() {
        let table = WaveTable::new(ramp_data());
        assert_eq!(table.cycle_len(), 128);
        assert_eq!(table.waveform_count(), 9);
    }

    #[test]
    fn rejects_cycle_length_that_does_not_divide() {
        assert_eq!(
            WaveTable::with_cycle_len(ramp_data(), 100).unwrap_err(),
            BankError::BadCycleLength(100)
        );
        assert_eq!(
            WaveTable::with_cycle_len(ramp_data(), 0).unwrap_err(),
            BankError::BadCycleLength(0)
        );
    }

    #[test]
    fn sample_wraps_index_and_waveform() {
        let table = WaveTable::new(ramp_data());
        assert_eq!(table.sample(0, 0), table.sample(0, 128));
        assert_eq!(table.sample(2, 5), table.sample(2 + 9, 5));
    }
}
