use crate::{
    config::EngineConfig,
    dsp::{
        filter::{Biquad, MIN_Q},
        lfo::Lfo,
        node::RenderCtx,
    },
    error::{ConfigError, ControlError},
    io::AudioOutput,
    synth::{
        harmonics::{pad_slot, FundamentalPreset},
        message::{ControlMessage, MessageReceiver},
        voice::{Voice, VoiceEnvelope},
    },
};

/// Cutoff the shared filter starts at, before the first frame re-derives it.
pub const INITIAL_CUTOFF_HZ: f32 = 400.0;

/// Lowest fundamental the control boundary can set.
pub const MIN_FUNDAMENTAL_HZ: f32 = 1.0;

/// The pad engine: a fixed set of voices, one shared LFO and one shared
/// low-pass filter, mixed to a mono signal duplicated onto both channels.
///
/// All state here is owned by the audio thread. Other threads reach it only
/// through [`ControlMessage`]s drained at the start of each block.
pub struct SynthEngine {
    ctx: RenderCtx,
    voices: Vec<Voice>,
    lfo: Lfo,
    filter: Biquad,

    master_gain: f32,
    fundamental: f32,
    filter_q: f32,
    base_cutoff: f32,
    mod_depth: f32,
    filter_enabled: bool,
    lfo_tracks_pitch: bool,

    frame_counter: u64,
    rejected_messages: u64,
}

impl SynthEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ctx = RenderCtx::new(config.sample_rate);
        let voices = (0..config.voice_count)
            .map(|_| {
                Voice::new(
                    config.waveform,
                    config.fundamental,
                    VoiceEnvelope::from_config(&config.envelope),
                )
            })
            .collect();

        tracing::info!(
            sample_rate = config.sample_rate,
            voices = config.voice_count,
            waveform = ?config.waveform,
            envelope = ?config.envelope,
            filter_enabled = config.filter_enabled,
            "synth engine created"
        );

        Ok(Self {
            ctx,
            voices,
            lfo: Lfo::sine(config.lfo_rate),
            filter: Biquad::lowpass(INITIAL_CUTOFF_HZ, config.filter_q, &ctx),
            master_gain: config.master_gain,
            fundamental: config.fundamental,
            filter_q: config.filter_q,
            base_cutoff: config.base_cutoff,
            mod_depth: config.mod_depth,
            filter_enabled: config.filter_enabled,
            lfo_tracks_pitch: config.lfo_tracks_pitch,
            frame_counter: 0,
            rejected_messages: 0,
        })
    }

    /// Compute one output frame.
    #[inline]
    pub fn next_frame(&mut self) -> f32 {
        let ctx = self.ctx;

        let lfo = self.lfo.tick(&ctx);
        self.filter
            .set_lowpass(self.base_cutoff + lfo * self.mod_depth, self.filter_q, &ctx);

        let mut sum = 0.0;
        for voice in self.voices.iter_mut() {
            sum += voice.next_sample(&ctx);
        }

        if self.filter_enabled {
            sum = self.filter.tick(sum);
        }

        // The LFO doubles as a tremolo on the final mix.
        sum * self.master_gain * lfo
    }

    /// Fill `left` and `right` with identical samples.
    ///
    /// Renders `min(left.len(), right.len())` frames; callers are expected to
    /// pass equal lengths.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len().min(right.len());

        for (l, r) in left[..frames].iter_mut().zip(right[..frames].iter_mut()) {
            let sample = self.next_frame();
            *l = sample;
            *r = sample;
        }

        self.frame_counter += frames as u64;
    }

    /// Apply every pending control message, then render the block.
    pub fn render_with<R: MessageReceiver>(
        &mut self,
        rx: &mut R,
        left: &mut [f32],
        right: &mut [f32],
    ) {
        self.process_messages(rx);
        self.render(left, right);
    }

    /// Render into an [`AudioOutput`] sized by its own buffers.
    pub fn process_block(&mut self, output: &mut AudioOutput) {
        let (left, right) = output.channels_mut();
        self.render(left, right);
    }

    pub fn process_messages<R: MessageReceiver>(&mut self, rx: &mut R) {
        while let Some(msg) = rx.pop() {
            if self.apply(msg).is_err() {
                self.rejected_messages += 1;
            }
        }
    }

    pub fn apply(&mut self, msg: ControlMessage) -> Result<(), ControlError> {
        match msg {
            ControlMessage::SetFrequency { voice, hz } => self.set_frequency(voice, hz),
            ControlMessage::KeyOn { voice } => self.key_on(voice),
            ControlMessage::KeyOff { voice } => self.key_off(voice),
            ControlMessage::TriggerHarmonic { index, on } => self.trigger_harmonic(index, on),
            ControlMessage::SetMasterGain(level) => {
                self.set_master_gain(level);
                Ok(())
            }
            ControlMessage::SetFundamental(hz) => {
                self.set_fundamental(hz);
                Ok(())
            }
            ControlMessage::ScaleFundamental(factor) => {
                self.scale_fundamental(factor);
                Ok(())
            }
            ControlMessage::SetFilterEnabled(enabled) => {
                self.set_filter_enabled(enabled);
                Ok(())
            }
            ControlMessage::SetFilterQ(q) => {
                self.set_filter_q(q);
                Ok(())
            }
            ControlMessage::AllKeysOff => {
                self.all_keys_off();
                Ok(())
            }
        }
    }

    fn voice_mut(&mut self, voice: usize) -> Result<&mut Voice, ControlError> {
        self.voices
            .get_mut(voice)
            .ok_or(ControlError::UnknownVoice(voice))
    }

    pub fn set_frequency(&mut self, voice: usize, hz: f32) -> Result<(), ControlError> {
        self.voice_mut(voice)?.set_frequency(hz);
        Ok(())
    }

    pub fn key_on(&mut self, voice: usize) -> Result<(), ControlError> {
        self.voice_mut(voice)?.key_on();
        Ok(())
    }

    pub fn key_off(&mut self, voice: usize) -> Result<(), ControlError> {
        self.voice_mut(voice)?.key_off();
        Ok(())
    }

    /// Pad press or release.
    ///
    /// A press tunes the pad's voice to `fundamental × multiple` and keys it
    /// on. A release keys the voice off even if a later pad has since taken it
    /// over.
    pub fn trigger_harmonic(&mut self, index: usize, on: bool) -> Result<(), ControlError> {
        let slot = pad_slot(index, self.voices.len()).ok_or(ControlError::UnknownPad(index))?;

        if on {
            let frequency = slot.frequency(self.fundamental);
            let voice = self.voice_mut(slot.voice)?;
            voice.set_frequency(frequency);
            voice.key_on();

            if self.lfo_tracks_pitch {
                self.lfo.track_pitch(frequency);
            }
        } else {
            self.voice_mut(slot.voice)?.key_off();
        }

        Ok(())
    }

    pub fn all_keys_off(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.key_off();
        }
    }

    /// Clamped into [0, 1]; non-finite values are ignored.
    pub fn set_master_gain(&mut self, level: f32) {
        if level.is_finite() {
            self.master_gain = level.clamp(0.0, 1.0);
        }
    }

    /// Takes effect on the next pad press. Sounding voices keep their pitch.
    pub fn set_fundamental(&mut self, hz: f32) {
        if hz.is_finite() {
            self.fundamental = hz.max(MIN_FUNDAMENTAL_HZ);
        }
    }

    pub fn scale_fundamental(&mut self, factor: f32) {
        self.set_fundamental(self.fundamental * factor);
    }

    pub fn apply_preset(&mut self, preset: FundamentalPreset) {
        self.scale_fundamental(preset.factor());
    }

    pub fn set_filter_enabled(&mut self, enabled: bool) {
        self.filter_enabled = enabled;
    }

    pub fn set_filter_q(&mut self, q: f32) {
        if q.is_finite() {
            self.filter_q = q.max(MIN_Q);
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn fundamental(&self) -> f32 {
        self.fundamental
    }

    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    pub fn filter_q(&self) -> f32 {
        self.filter_q
    }

    pub fn filter(&self) -> &Biquad {
        &self.filter
    }

    pub fn lfo_rate(&self) -> f32 {
        self.lfo.rate()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn voice(&self, index: usize) -> Option<&Voice> {
        self.voices.get(index)
    }

    /// Frames rendered since construction.
    pub fn frames_rendered(&self) -> u64 {
        self.frame_counter
    }

    /// Queued messages that named an unknown voice or pad.
    pub fn rejected_messages(&self) -> u64 {
        self.rejected_messages
    }
}
