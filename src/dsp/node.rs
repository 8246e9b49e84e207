/// Lowest sample rate a context will carry. Anything below is clamped so the
/// per-sample increments never divide by zero.
pub const MIN_SAMPLE_RATE: f32 = 1.0;

/// How close a ramp must come to its target to count as having reached it.
/// Ramps accumulate in f64, so this only absorbs rounding, never a step.
pub(crate) const RAMP_TOLERANCE: f64 = 1e-6;

/// Context passed to every per-sample tick.
///
/// The sample rate is fixed for the lifetime of an audio stream, so the engine
/// builds one context up front and hands a reference to each generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate.is_finite() {
            sample_rate.max(MIN_SAMPLE_RATE)
        } else {
            MIN_SAMPLE_RATE
        };

        Self { sample_rate }
    }

    /// Number of samples spanned by `seconds`, never less than one sample.
    #[inline]
    pub fn samples(&self, seconds: f32) -> f32 {
        (seconds * self.sample_rate).max(1.0)
    }

    /// Highest frequency a filter or oscillator should be driven at.
    #[inline]
    pub fn nyquist_guard(&self) -> f32 {
        self.sample_rate * 0.49
    }
}

impl Default for RenderCtx {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}

/// Key events shared by the amplitude shapers.
///
/// Both the linear envelope and the ADSR respond to the same two edges coming
/// from the control boundary; voices hold either one behind this trait.
pub trait Gate {
    /// Gate high.
    fn key_on(&mut self);

    /// Gate low.
    fn key_off(&mut self);

    /// Advance one sample and return the new level.
    fn tick(&mut self, ctx: &RenderCtx) -> f32;

    /// Current level without advancing.
    fn level(&self) -> f32;

    /// Whether the shaper is still producing a non-silent level.
    fn is_active(&self) -> bool {
        self.level() > 0.0
    }
}
