//! Low-level DSP primitives for the pad engine.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. Each one advances by exactly one sample
//! per call, reading the sample rate from a shared [`node::RenderCtx`].

/// Attack/decay/sustain/release envelope peaking at 0.8.
pub mod adsr;
/// Two-state linear key envelope.
pub mod envelope;
/// Biquad low-pass filter and coefficient design.
pub mod filter;
/// Control-rate sine used for filter sweep and tremolo.
pub mod lfo;
/// Render context and the gate trait shared by the envelopes.
pub mod node;
/// Phase-accumulator oscillators (sine, saw, square).
pub mod oscillator;

pub use adsr::{Adsr, AdsrState};
pub use envelope::{Envelope, KeyState};
pub use filter::{Biquad, Coefficients};
pub use lfo::Lfo;
pub use node::{Gate, RenderCtx};
pub use oscillator::{Oscillator, Waveform};
