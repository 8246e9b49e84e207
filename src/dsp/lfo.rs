//! Low Frequency Oscillator used by the pad engine.

use crate::dsp::{node::RenderCtx, oscillator::Oscillator};

/*
Low Frequency Oscillators
=========================

An LFO is the same phase-accumulator sine as an audio oscillator, run at a
control rate (fractions of a hertz up to a few tens of hertz). The pad engine
advances one shared LFO per output frame and uses its bipolar output twice:

  1. filter sweep   cutoff = base_cutoff + lfo · mod_depth
  2. tremolo        out    = sum · master_gain · lfo

The second use multiplies by the raw bipolar value, so the output amplitude
swings through zero twice per LFO cycle and the polarity flips on the negative
half.


Pitch Tracking
--------------

When a pad key goes down, the LFO can be retuned relative to the note:

    rate = (note_frequency / 60) · 0.5

so a 60 Hz fundamental pulses at 0.5 Hz, its 4th harmonic at 2 Hz, and so on.
Higher pads pulse faster. Retuning leaves the phase untouched.
*/

/// Reference frequency for pitch-tracked LFO rates.
pub const TRACKING_REFERENCE_HZ: f32 = 60.0;

/// Scale applied to the note/reference ratio.
pub const TRACKING_SCALE: f32 = 0.5;

/// LFO rate for a key-on at `note_frequency` Hz.
#[inline]
pub fn pitch_tracking_rate(note_frequency: f32) -> f32 {
    (note_frequency / TRACKING_REFERENCE_HZ) * TRACKING_SCALE
}

#[derive(Debug, Clone)]
pub struct Lfo {
    osc: Oscillator,
}

impl Lfo {
    pub fn sine(rate_hz: f32) -> Self {
        Self {
            osc: Oscillator::sine(rate_hz),
        }
    }

    /// Advance one sample, returning the bipolar value in [-1, 1].
    #[inline]
    pub fn tick(&mut self, ctx: &RenderCtx) -> f32 {
        self.osc.tick(ctx)
    }

    pub fn rate(&self) -> f32 {
        self.osc.frequency()
    }

    pub fn set_rate(&mut self, rate_hz: f32) {
        self.osc.set_frequency(rate_hz);
    }

    /// Retune to follow a newly struck note.
    pub fn track_pitch(&mut self, note_frequency: f32) {
        self.set_rate(pitch_tracking_rate(note_frequency));
    }

    pub fn phase(&self) -> f32 {
        self.osc.phase()
    }
}
