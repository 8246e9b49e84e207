use std::f32::consts::TAU;

use crate::dsp::node::RenderCtx;

/*
Biquad Low-Pass
===============

A second-order IIR filter in Direct Form I:

    y0 = (b0·x0 + b1·x1 + b2·x2 − a1·y1 − a2·y2) / a0

x1, x2 are the previous two inputs, y1, y2 the previous two outputs. The
coefficients are kept un-normalized and the division by a0 happens on every
sample, so a coefficient set can be swapped in as one unit without a separate
normalization pass.

Resonant low-pass design (RBJ cookbook):

    w0    = 2π · cutoff / sample_rate
    alpha = sin(w0) / (2Q)

    b0 = (1 − cos w0) / 2      a0 = 1 + alpha
    b1 =  1 − cos w0           a1 = −2 cos w0
    b2 = (1 − cos w0) / 2      a2 = 1 − alpha

Q = 0.707 is maximally flat (Butterworth); larger Q adds a resonant peak at
the cutoff.

Modulation
----------

The engine re-derives the coefficients every frame while the LFO sweeps the
cutoff. Only the coefficients change; the x/y history is left untouched so
the output stays continuous across the update.

Guards
------

Cutoff is clamped into [MIN_CUTOFF_HZ, 0.49 · sample_rate] and Q to at least
MIN_Q. Within that range alpha > 0, so a0 > 1 and the per-sample division is
always safe.
*/

pub const MIN_CUTOFF_HZ: f32 = 10.0;
pub const MIN_Q: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Coefficients {
    /// y = x
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
    };
}

/// Resonant low-pass coefficients for `cutoff_hz` and `q`.
pub fn lowpass_coefficients(cutoff_hz: f32, q: f32, ctx: &RenderCtx) -> Coefficients {
    let cutoff = clamp_cutoff(cutoff_hz, ctx);
    let q = if q.is_finite() { q.max(MIN_Q) } else { MIN_Q };

    let w0 = TAU * cutoff / ctx.sample_rate;
    let (sin_w0, cos_w0) = w0.sin_cos();
    let alpha = sin_w0 / (2.0 * q);

    Coefficients {
        b0: (1.0 - cos_w0) / 2.0,
        b1: 1.0 - cos_w0,
        b2: (1.0 - cos_w0) / 2.0,
        a0: 1.0 + alpha,
        a1: -2.0 * cos_w0,
        a2: 1.0 - alpha,
    }
}

#[inline]
fn clamp_cutoff(cutoff_hz: f32, ctx: &RenderCtx) -> f32 {
    let ceiling = ctx.nyquist_guard().max(MIN_CUTOFF_HZ);
    if cutoff_hz.is_finite() {
        cutoff_hz.clamp(MIN_CUTOFF_HZ, ceiling)
    } else {
        ceiling
    }
}

#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: Coefficients,

    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// A filter that passes its input unchanged until configured.
    pub fn new() -> Self {
        Self {
            coefficients: Coefficients::PASSTHROUGH,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32, q: f32, ctx: &RenderCtx) -> Self {
        let mut filter = Self::new();
        filter.set_lowpass(cutoff_hz, q, ctx);
        filter
    }

    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let output = (c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2)
            / c.a0;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.tick(*sample);
        }
    }

    /// Recompute all six coefficients for a resonant low-pass. History is kept.
    pub fn set_lowpass(&mut self, cutoff_hz: f32, q: f32, ctx: &RenderCtx) {
        self.coefficients = lowpass_coefficients(cutoff_hz, q, ctx);
    }

    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Clear the delay line without touching the coefficients.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// (x1, x2, y1, y2)
    pub fn history(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.x2, self.y1, self.y2)
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
