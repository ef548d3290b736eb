use crate::{
    synth::{
        message::{MessageReceiver, SynthMessage},
        voice::{Voice, VoiceState},
    },
    tables::SoundBank,
    MAX_BLOCK_SIZE,
};

/// A fixed pool of voices mixed down to one output stream.
///
/// Control messages are drained from the receiver at the top of each block,
/// so voice state never changes concurrently with rendering. All buffers are
/// preallocated; the render path performs no allocation.
pub struct PolySynth<'a, R: MessageReceiver> {
    voices: Vec<Voice<'a>>,
    rx: R,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
    rejected_notes: u64,
}

impl<'a, R: MessageReceiver> PolySynth<'a, R> {
    pub fn new(bank: &'a SoundBank, max_voices: usize, rx: R) -> Self {
        let voices = (0..max_voices).map(|_| Voice::new(bank)).collect();

        Self {
            voices,
            rx,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
            rejected_notes: 0,
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::NoteOn { note, velocity } => {
                    let age = self.frame_counter;
                    if let Some(voice) = self.allocate_voice() {
                        // An invalid note must not disturb other voices; the
                        // event is counted and dropped.
                        if voice.note_on(note, velocity, age).is_err() {
                            self.rejected_notes += 1;
                        }
                    }
                }
                SynthMessage::NoteOff { note } => {
                    if let Some(voice) = self.find_voice(note) {
                        voice.note_off();
                    }
                }
                SynthMessage::SetWaveform { index } => {
                    for voice in &mut self.voices {
                        voice.set_waveform(index as usize);
                    }
                }
                SynthMessage::AllNotesOff => {
                    for voice in &mut self.voices {
                        if voice.is_active() {
                            voice.note_off();
                        }
                    }
                }
            }
        }

        // Mix voices
        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                voice.render(&mut self.temp_buffer[..out.len()]);

                for (o, v) in out.iter_mut().zip(&self.temp_buffer) {
                    *o += v;
                }
            }
        }

        self.frame_counter += out.len() as u64;
    }

    /// Control events with an out-of-range note dropped so far.
    pub fn rejected_notes(&self) -> u64 {
        self.rejected_notes
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    fn allocate_voice(&mut self) -> Option<&mut Voice<'a>> {
        // First pass: find a free voice
        let free_idx = self.voices.iter().position(|v| v.is_free());
        if let Some(idx) = free_idx {
            return Some(&mut self.voices[idx]);
        }

        // Second pass: steal the oldest releasing voice
        let steal_idx = self
            .voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == VoiceState::Releasing)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx);

        steal_idx.map(|idx| &mut self.voices[idx])
    }

    fn find_voice(&mut self, note: u8) -> Option<&mut Voice<'a>> {
        self.voices
            .iter_mut()
            .find(|v| v.note() == note && v.state() == VoiceState::Active)
    }
}
