//! Engine configuration.
//!
//! Everything the engine needs before the first render call. The sample rate is
//! fixed for the lifetime of an engine; the remaining fields are starting values
//! that the control boundary may change later.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::oscillator::Waveform, error::ConfigError};

/// Per-voice amplitude shaper.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvelopeConfig {
    /// Two-state ramp, `duration` seconds across the full range.
    Linear { duration: f32 },
    /// Four-stage shaper; `sustain` is a level, the rest are seconds.
    Adsr {
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
    },
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        EnvelopeConfig::Adsr {
            attack: 0.1,
            decay: 0.1,
            sustain: 0.1,
            release: 0.1,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub master_gain: f32,
    pub fundamental: f32,
    pub filter_q: f32,
    /// Centre of the LFO filter sweep.
    pub base_cutoff: f32,
    /// Hz of cutoff movement per unit of LFO output.
    pub mod_depth: f32,
    /// Initial LFO rate.
    pub lfo_rate: f32,
    /// Retune the LFO from the note frequency on every pad key-on.
    pub lfo_tracks_pitch: bool,
    /// Run the voice sum through the low-pass filter.
    pub filter_enabled: bool,
    pub waveform: Waveform,
    pub envelope: EnvelopeConfig,
    pub voice_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            master_gain: 0.5,
            fundamental: 60.0,
            filter_q: 2.0,
            base_cutoff: 2_000.0,
            mod_depth: 800.0,
            lfo_rate: 2.0,
            lfo_tracks_pitch: true,
            filter_enabled: false,
            waveform: Waveform::Square,
            envelope: EnvelopeConfig::default(),
            voice_count: 3,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopeConfig) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_filter(mut self, enabled: bool) -> Self {
        self.filter_enabled = enabled;
        self
    }

    /// Check every field, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sample_rate", self.sample_rate)?;
        positive("fundamental", self.fundamental)?;
        positive("filter_q", self.filter_q)?;
        positive("base_cutoff", self.base_cutoff)?;
        finite("mod_depth", self.mod_depth)?;
        finite("lfo_rate", self.lfo_rate)?;

        if !(0.0..=1.0).contains(&self.master_gain) {
            return Err(ConfigError::invalid(
                "master_gain",
                self.master_gain,
                "must be within [0, 1]",
            ));
        }

        match self.envelope {
            EnvelopeConfig::Linear { duration } => {
                non_negative("envelope.duration", duration)?;
            }
            EnvelopeConfig::Adsr {
                attack,
                decay,
                sustain,
                release,
            } => {
                non_negative("envelope.attack", attack)?;
                non_negative("envelope.decay", decay)?;
                non_negative("envelope.release", release)?;
                if !(0.0..=1.0).contains(&sustain) {
                    return Err(ConfigError::invalid(
                        "envelope.sustain",
                        sustain,
                        "is a level and must be within [0, 1]",
                    ));
                }
            }
        }

        if self.voice_count == 0 {
            return Err(ConfigError::NoVoices);
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "must be finite"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "must be greater than zero"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "must not be negative"))
    }
}
