use crate::{
    config::EnvelopeConfig,
    dsp::{
        adsr::Adsr,
        envelope::Envelope,
        filter::Biquad,
        node::{Gate, RenderCtx},
        oscillator::{Oscillator, Waveform},
    },
};

/// The amplitude shaper a voice is built with.
#[derive(Debug, Clone)]
pub enum VoiceEnvelope {
    Linear(Envelope),
    Adsr(Adsr),
}

impl VoiceEnvelope {
    pub fn from_config(config: &EnvelopeConfig) -> Self {
        match *config {
            EnvelopeConfig::Linear { duration } => VoiceEnvelope::Linear(Envelope::new(duration)),
            EnvelopeConfig::Adsr {
                attack,
                decay,
                sustain,
                release,
            } => VoiceEnvelope::Adsr(Adsr::new(attack, decay, sustain, release)),
        }
    }

    fn gate(&self) -> &dyn Gate {
        match self {
            VoiceEnvelope::Linear(env) => env,
            VoiceEnvelope::Adsr(env) => env,
        }
    }

    fn gate_mut(&mut self) -> &mut dyn Gate {
        match self {
            VoiceEnvelope::Linear(env) => env,
            VoiceEnvelope::Adsr(env) => env,
        }
    }
}

impl Gate for VoiceEnvelope {
    fn key_on(&mut self) {
        self.gate_mut().key_on();
    }

    fn key_off(&mut self) {
        self.gate_mut().key_off();
    }

    #[inline]
    fn tick(&mut self, ctx: &RenderCtx) -> f32 {
        // Static dispatch on the hot path.
        match self {
            VoiceEnvelope::Linear(env) => env.next_sample(ctx),
            VoiceEnvelope::Adsr(env) => env.next_sample(ctx),
        }
    }

    fn level(&self) -> f32 {
        self.gate().level()
    }

    fn is_active(&self) -> bool {
        self.gate().is_active()
    }
}

/// One sounding tone: an oscillator shaped by an envelope, optionally filtered.
///
/// Every voice owns its own instances; nothing is shared between voices.
#[derive(Debug, Clone)]
pub struct Voice {
    oscillator: Oscillator,
    envelope: VoiceEnvelope,
    filter: Option<Biquad>,
}

impl Voice {
    pub fn new(waveform: Waveform, frequency: f32, envelope: VoiceEnvelope) -> Self {
        Self {
            oscillator: Oscillator::new(waveform, frequency),
            envelope,
            filter: None,
        }
    }

    /// Attach a per-voice filter applied after the envelope.
    pub fn with_filter(mut self, filter: Biquad) -> Self {
        self.filter = Some(filter);
        self
    }

    /// oscillator × envelope, through the voice filter when one is attached.
    #[inline]
    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        let shaped = self.oscillator.tick(ctx) * self.envelope.tick(ctx);
        match self.filter.as_mut() {
            Some(filter) => filter.tick(shaped),
            None => shaped,
        }
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn key_on(&mut self) {
        self.envelope.key_on();
    }

    pub fn key_off(&mut self) {
        self.envelope.key_off();
    }

    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.oscillator.set_frequency(frequency_hz);
    }

    pub fn frequency(&self) -> f32 {
        self.oscillator.frequency()
    }

    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    pub fn envelope(&self) -> &VoiceEnvelope {
        &self.envelope
    }
}
