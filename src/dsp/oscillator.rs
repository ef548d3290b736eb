use crate::tables::pitch::PHASE_FRAC_BITS;
use crate::tables::WaveTable;

/*
Fixed-Point Wavetable Oscillator
================================

The oscillator walks a single-cycle waveform stored in the ROM with a phase
accumulator in Q16.16 fixed point, measured in cycle-index units:

  phase      Current position in the cycle. Upper bits select the sample
             index, the low 16 bits are the fraction between two samples.

  increment  Added to phase once per sample. Comes from the pitch ROM
             (Q8.8, widened to Q16.16 on note-on). An increment of 0 is
             legal and simply freezes the phase.

Each sample:

  1. index = phase >> 16, wrapped modulo the cycle length
  2. read table[index] and table[index + 1 mod cycle_len]
  3. linear interpolation by the 16-bit fraction
  4. phase = (phase + increment) mod (cycle_len << 16)

Linear interpolation keeps the per-sample cost to one multiply-add; the
8-bit source material does not reward higher-order schemes. All index
arithmetic wraps, so reads can never leave the table.
*/

const PHASE_FRAC_MASK: u32 = (1 << PHASE_FRAC_BITS) - 1;

/// Reads one waveform cycle from the ROM through a Q16.16 phase accumulator.
pub struct Oscillator<'a> {
    table: &'a WaveTable,
    waveform: usize,
    phase: u32,
    increment: u32,
}

impl<'a> Oscillator<'a> {
    pub fn new(table: &'a WaveTable) -> Self {
        Self {
            table,
            waveform: 0,
            phase: 0,
            increment: 0,
        }
    }

    /// Select which of the concatenated waveforms to read. Wraps modulo the
    /// waveform count.
    pub fn set_waveform(&mut self, waveform: usize) {
        self.waveform = waveform % self.table.waveform_count();
    }

    /// Install a new Q16.16 phase increment. Zero freezes the phase.
    pub fn set_increment(&mut self, increment: u32) {
        self.increment = increment;
    }

    /// Rewind the phase to the start of the cycle.
    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Current phase in Q16.16 cycle-index units, always in
    /// `[0, cycle_len << 16)`.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Span of the phase accumulator: cycle length in Q16.16.
    pub fn phase_span(&self) -> u32 {
        (self.table.cycle_len() as u32) << PHASE_FRAC_BITS
    }

    /// Produce one interpolated sample in `[-1, 1)` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let cycle_len = self.table.cycle_len();
        let index = (self.phase >> PHASE_FRAC_BITS) as usize;
        debug_assert!(index < cycle_len);

        let s0 = self.table.sample(self.waveform, index) as f32;
        let s1 = self.table.sample(self.waveform, index + 1) as f32;
        let frac = (self.phase & PHASE_FRAC_MASK) as f32 / (1 << PHASE_FRAC_BITS) as f32;
        let sample = (s0 + frac * (s1 - s0)) / 128.0;

        self.phase = (self.phase + self.increment) % self.phase_span();
        sample
    }

    /// Render a block of samples into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for slot in buffer.iter_mut() {
            *slot = self.next_sample();
        }
    }
}
