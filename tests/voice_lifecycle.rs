//! End-to-end checks over the public API: a voice driven through a full
//! note lifecycle against a realistic ROM image.

use romwave::tables::{EnvelopeLayout, EnvelopeTable, PitchTable, SoundBank, WaveTable};
use romwave::synth::{SynthMessage, Voice};
use romwave::PolySynth;

const WAVE_LEN: usize = 1152;
const ENV_LEN: usize = 1024;

/// A plausible instrument ROM: sine cycles, a linear ADSR shape, and an
/// equal-tempered pitch table for a 128-sample cycle at 44.1 kHz.
fn rom_bank() -> SoundBank {
    let mut wave = [0i8; WAVE_LEN];
    for (i, slot) in wave.iter_mut().enumerate() {
        let phase = (i % 128) as f32 / 128.0 * std::f32::consts::TAU;
        *slot = (phase.sin() * 127.0) as i8;
    }

    let layout = EnvelopeLayout::default();
    let mut envelope = [0u8; ENV_LEN];
    for (i, slot) in envelope.iter_mut().enumerate() {
        *slot = if i < layout.attack_end {
            (i * 255 / (layout.attack_end - 1)) as u8
        } else if i <= layout.sustain_index {
            let span = layout.sustain_index - layout.attack_end;
            (255 - (i - layout.attack_end) * 95 / span) as u8
        } else {
            let span = (ENV_LEN - 1 - layout.release_start) as u32;
            let pos = (i - layout.release_start) as u32;
            160u32.saturating_sub(pos * 160 / span) as u8
        };
    }

    let mut pitch = [0u16; 128];
    for (note, slot) in pitch.iter_mut().enumerate() {
        let freq = 440.0 * 2.0f64.powf((note as f64 - 69.0) / 12.0);
        *slot = (freq * 128.0 / 44_100.0 * 256.0).round() as u16;
    }

    SoundBank::new(
        WaveTable::new(wave),
        EnvelopeTable::new(envelope),
        PitchTable::new(pitch),
    )
}

#[test]
fn note_round_trip_returns_voice_to_silence() {
    let bank = rom_bank();
    let mut voice = Voice::new(&bank);

    voice.note_on(60, 100, 0).unwrap();
    let mut buffer = [0.0f32; 2048];
    voice.render(&mut buffer);
    assert!(buffer.iter().any(|s| s.abs() > 0.01));
    assert!(buffer.iter().all(|s| s.abs() <= 1.0));

    voice.note_off();
    let mut budget = 8192;
    while !voice.is_free() && budget > 0 {
        voice.next_sample();
        budget -= 1;
    }
    assert!(voice.is_free());

    voice.render(&mut buffer);
    assert!(buffer.iter().all(|&s| s == 0.0));
}

#[test]
fn a4_completes_a_cycle_at_the_table_rate() {
    let bank = rom_bank();
    let increment = bank.pitch.increment(69).unwrap();

    let mut voice = Voice::new(&bank);
    voice.note_on(69, 127, 0).unwrap();

    // Samples per wavetable cycle: (cycle_len << 16) / increment, rounded.
    let span = (bank.waves.cycle_len() as u64) << 16;
    let period = (span as f64 / increment as f64).round() as usize;

    // Run past the attack/decay transient so the envelope is sustaining and
    // only the oscillator varies between consecutive periods.
    for _ in 0..600 {
        voice.next_sample();
    }

    let first: Vec<f32> = (0..period).map(|_| voice.next_sample()).collect();
    let second: Vec<f32> = (0..period).map(|_| voice.next_sample()).collect();

    // Consecutive periods differ only by interpolation rounding and the
    // residual phase drift of the rounded period length.
    let worst = first
        .iter()
        .zip(&second)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(worst < 0.05, "periodicity drift too large: {worst}");
}

#[test]
fn poly_synth_drains_queue_and_mixes() {
    let bank = rom_bank();
    let (mut tx, rx) = rtrb::RingBuffer::<SynthMessage>::new(64);
    let mut synth = PolySynth::new(&bank, 8, rx);

    tx.push(SynthMessage::NoteOn { note: 60, velocity: 100 }).unwrap();
    tx.push(SynthMessage::NoteOn { note: 67, velocity: 100 }).unwrap();

    let mut out = [0.0f32; 1024];
    synth.render_block(&mut out);
    assert_eq!(synth.active_voices(), 2);
    assert!(out.iter().any(|s| s.abs() > 0.01));

    tx.push(SynthMessage::AllNotesOff).unwrap();
    let mut blocks = 0;
    while synth.active_voices() > 0 && blocks < 32 {
        synth.render_block(&mut out);
        blocks += 1;
    }
    assert_eq!(synth.active_voices(), 0);
    synth.render_block(&mut out);
    assert!(out.iter().all(|&s| s == 0.0));
}
