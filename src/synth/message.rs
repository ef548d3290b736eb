#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control events handed from the control path to the render thread.
///
/// Events must never be applied concurrently with rendering; they travel
/// through a single-producer/single-consumer queue and are drained at block
/// boundaries.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    SetWaveform { index: u8 },
    AllNotesOff,
}

/// Source of control events drained by the synth at block boundaries.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for std::collections::VecDeque<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        self.pop_front()
    }
}
