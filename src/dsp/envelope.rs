use crate::tables::{EnvelopeTable, ENVELOPE_TABLE_LEN};

/*
Table-Driven Envelope Generator
===============================

Amplitude over a note's lifetime comes straight out of the envelope ROM
rather than from computed ramps. A progress index walks the table one step
per audio sample (control rate equals sample rate) and the stage machine
decides which segment the index is allowed to move through:

    ┌──────┐ note_on ┌────────┐ index=attack_end ┌───────┐
    │ Idle │ ──────→ │ Attack │ ───────────────→ │ Decay │
    └──────┘         └────────┘                  └───────┘
        ↑                 │                          │ index=sustain_index
        │                 │ note_off                 ↓
        │            ┌─────────┐    note_off    ┌─────────┐
        │            │ Release │ ←───────────── │ Sustain │
        │            └─────────┘                └─────────┘
        │   value=0 or    │
        └─────────────────┘  table exhausted

note_off jumps the index to the start of the release segment from ANY
active stage; note_on restarts the attack from the top regardless of the
current stage (retrigger is a documented policy, not a bug). While
sustaining, the index holds at the layout's sustain_index and does not
advance until note_off.

Output is the u8 table value normalized to [0, 1]; it is non-negative and
bounded in every reachable state.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // inactive, output 0
    Attack,  // walking the attack segment
    Decay,   // walking the decay segment toward the sustain point
    Sustain, // holding the sustain value while the gate is high
    Release, // walking the release segment down to silence
}

/// Walks the envelope ROM and reports the current amplitude multiplier.
pub struct EnvelopeGenerator<'a> {
    table: &'a EnvelopeTable,
    stage: EnvelopeState,
    index: usize,
    level: f32,
}

impl<'a> EnvelopeGenerator<'a> {
    pub fn new(table: &'a EnvelopeTable) -> Self {
        Self {
            table,
            stage: EnvelopeState::Idle,
            index: 0,
            level: 0.0,
        }
    }

    /// Gate high: restart the attack segment from the top. Retriggering an
    /// already-active envelope restarts it the same way.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeState::Attack;
        self.index = 0;
        self.level = 0.0;
    }

    /// Gate low: jump to the release segment. A no-op while Idle.
    pub fn note_off(&mut self) {
        if self.stage == EnvelopeState::Idle {
            return;
        }
        self.stage = EnvelopeState::Release;
        self.index = self.table.layout().release_start;
    }

    /// Advance one step and return the amplitude in `[0, 1]`.
    pub fn tick(&mut self) -> f32 {
        let layout = self.table.layout();

        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level = self.table.level(self.index);
                self.index += 1;
                if self.index >= layout.attack_end {
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.level = self.table.level(self.index);
                if self.index >= layout.sustain_index {
                    self.index = layout.sustain_index;
                    self.stage = EnvelopeState::Sustain;
                } else {
                    self.index += 1;
                }
            }

            EnvelopeState::Sustain => {
                // Hold; the index stays parked until note_off.
                self.level = self.table.level(layout.sustain_index);
            }

            EnvelopeState::Release => {
                let value = self.table.value(self.index);
                self.level = value as f32 / u8::MAX as f32;
                self.index += 1;
                if value == 0 || self.index >= ENVELOPE_TABLE_LEN {
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Returns true if the envelope is producing output (not Idle).
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    /// Current amplitude without advancing the state.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    /// Reset to Idle.
    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.index = 0;
        self.level = 0.0;
    }
}
