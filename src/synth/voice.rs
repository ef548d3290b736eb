use crate::dsp::{EnvelopeGenerator, Oscillator};
use crate::tables::{NoteError, PitchTable, SoundBank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Playing, envelope in attack/decay/sustain
    Releasing, // Key released, envelope in release phase
}

/// One unit of sound generation: an oscillator and an envelope generator
/// bound to a shared [`SoundBank`], plus the note that activated them.
///
/// Lifecycle: Free → Active (note_on) → Releasing (note_off) → Free (the
/// envelope reaches silence). A Free voice renders exact zeros.
pub struct Voice<'a> {
    pitch: &'a PitchTable,
    osc: Oscillator<'a>,
    env: EnvelopeGenerator<'a>,
    note: u8,
    velocity: u8,
    state: VoiceState,
    age: u64,
}

impl<'a> Voice<'a> {
    pub fn new(bank: &'a SoundBank) -> Self {
        Self {
            pitch: &bank.pitch,
            osc: Oscillator::new(&bank.waves),
            env: EnvelopeGenerator::new(&bank.envelope),
            note: 0,
            velocity: 0,
            state: VoiceState::Free,
            age: 0,
        }
    }

    /// Start (or retrigger) a note. An out-of-range note number fails with
    /// [`NoteError::OutOfRange`] and leaves the voice untouched; a note-on
    /// while Active silently retriggers from the top of the attack.
    ///
    /// `age` is an allocation timestamp used for voice stealing.
    pub fn note_on(&mut self, note: u8, velocity: u8, age: u64) -> Result<(), NoteError> {
        let increment = self.pitch.increment(note)?;

        self.note = note;
        self.velocity = velocity;
        self.state = VoiceState::Active;
        self.age = age;

        self.osc.reset();
        self.osc.set_increment(increment);
        self.env.note_on();
        Ok(())
    }

    /// Release the note. A no-op when the voice is Free or already Releasing.
    pub fn note_off(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.env.note_off();
        }
    }

    /// Select the waveform the oscillator reads. Takes effect immediately.
    pub fn set_waveform(&mut self, waveform: usize) {
        self.osc.set_waveform(waveform);
    }

    /// Render one sample: oscillator × envelope × velocity scaling. When the
    /// envelope reaches Idle the voice frees itself and subsequent calls
    /// return exactly 0.0 until reactivated.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.state == VoiceState::Free {
            return 0.0;
        }

        let sample = self.osc.next_sample();
        let amplitude = self.env.tick();
        let velocity_scale = self.velocity as f32 / 127.0;

        if !self.env.is_active() {
            self.free();
            return 0.0;
        }
        sample * amplitude * velocity_scale
    }

    /// Render a block of samples into the buffer.
    pub fn render(&mut self, out: &mut [f32]) {
        for slot in out.iter_mut() {
            *slot = self.next_sample();
        }
    }

    /// True only when the envelope is Idle and the voice can be reallocated.
    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    /// Current envelope level, used by stealing policies.
    pub fn envelope_level(&self) -> f32 {
        self.env.level()
    }

    fn free(&mut self) {
        self.state = VoiceState::Free;
        self.note = 0;
        self.velocity = 0;
        self.env.reset();
        self.osc.set_increment(0);
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}
