//! Allocation-free per-sample synthesis primitives.
//!
//! These components are realtime-safe: every operation is an O(1) table
//! lookup plus fixed-point arithmetic, with no blocking, allocation, or I/O.
//! They borrow the immutable ROM tables and keep only their own small mutable
//! state, so they embed directly inside voice structs.

/// Table-driven envelope generator.
pub mod envelope;
/// Fixed-point wavetable oscillator.
pub mod oscillator;

pub use envelope::{EnvelopeGenerator, EnvelopeState};
pub use oscillator::Oscillator;
