use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::node::RenderCtx;

/*
Phase-Accumulator Oscillators
=============================

Every waveform here is driven by the same normalized phase accumulator:

    phase ∈ [0, 1)        one full cycle of the waveform
    increment = f / sr    fraction of a cycle covered per sample

Each tick reads the waveform at the current phase, then advances and wraps the
phase. Because the accumulator is shared, a 60 Hz sine, saw and square all
complete exactly the same number of cycles per second; only the mapping from
phase to value differs:

    Sine     sin(2π·phase)
    Saw      1 − 2·phase          +1 ╲      falling ramp, snaps back at wrap
                                  -1   ╲
    Square   +1 below 0.5, −1 at or above 0.5 (fixed 50% duty)

No band-limiting is applied; saw and square alias at high harmonics. That is
the intended (raw) character of the pad.

Wrapping
--------

The normal case is a single subtraction when the phase reaches 1. Degenerate
frequencies (negative, larger than the sample rate, NaN) fall back to a
Euclidean remainder so the phase can never leave [0, 1) or grow unbounded.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    Saw,
    #[default]
    Square,
}

impl Waveform {
    /// Waveform value at `phase`, in [-1, 1].
    #[inline]
    pub fn value_at(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Saw => 1.0 - 2.0 * phase,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
    frequency: f32,
    gain: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            frequency,
            gain: 1.0,
        }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(Waveform::Sine, frequency)
    }

    pub fn sawtooth(frequency: f32) -> Self {
        Self::new(Waveform::Saw, frequency)
    }

    pub fn square(frequency: f32) -> Self {
        Self::new(Waveform::Square, frequency)
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn tick(&mut self, ctx: &RenderCtx) -> f32 {
        let value = self.waveform.value_at(self.phase);
        self.advance(ctx);
        value * self.gain
    }

    /// Fill `out` with consecutive samples.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self.tick(ctx);
        }
    }

    #[inline]
    fn advance(&mut self, ctx: &RenderCtx) {
        self.phase += self.frequency / ctx.sample_rate;

        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        // Only reachable with degenerate frequencies.
        if !(0.0..1.0).contains(&self.phase) {
            self.phase = wrap_phase(self.phase);
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Jump to `phase`, normalized into [0, 1).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = wrap_phase(phase);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency = frequency_hz;
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
}

#[inline]
fn wrap_phase(phase: f32) -> f32 {
    if !phase.is_finite() {
        return 0.0;
    }

    let wrapped = phase.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
