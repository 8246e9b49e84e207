//! Audio device session: owns the cpal stream and the engine inside it.

use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat, SampleRate, StreamConfig,
};

use primepad::{
    io::interleave,
    synth::{control::DEFAULT_CAPACITY, control_channel, ControlHandle},
    EngineConfig, SynthEngine, MAX_BLOCK_SIZE,
};

use crate::keys::PadState;

/// Time given to releasing voices before the stream is torn down.
const RELEASE_TAIL: Duration = Duration::from_millis(250);

pub struct AudioSession {
    stream: cpal::Stream,
    controls: ControlHandle,
    sample_rate: f32,
    channels: usize,
    initial: PadState,
}

impl AudioSession {
    /// Open the default output device, build the engine at the negotiated
    /// sample rate and start the stream.
    pub fn start(mut config: EngineConfig) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let default_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let requested = SampleRate(config.sample_rate as u32);
        let supported = device
            .supported_output_configs()
            .wrap_err("failed to query output configs")?
            .filter(|range| range.sample_format() == SampleFormat::F32)
            .filter(|range| range.channels() == default_config.channels())
            .find(|range| range.min_sample_rate() <= requested && requested <= range.max_sample_rate())
            .map(|range| range.with_sample_rate(requested));

        let chosen = match supported {
            Some(chosen) => chosen,
            None => {
                tracing::info!(
                    requested = requested.0,
                    device = default_config.sample_rate().0,
                    "requested sample rate unsupported, using device default"
                );
                default_config
            }
        };

        if chosen.sample_format() != SampleFormat::F32 {
            return Err(eyre!(
                "device output format {:?} is not supported, need f32",
                chosen.sample_format()
            ));
        }

        let stream_config: StreamConfig = chosen.into();
        let channels = stream_config.channels as usize;
        config.sample_rate = stream_config.sample_rate.0 as f32;

        let mut engine = SynthEngine::new(&config).wrap_err("failed to build engine")?;
        let (controls, mut rx) = control_channel(DEFAULT_CAPACITY, config.voice_count);

        // Scratch buffers live in the callback; nothing allocates per block.
        let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut right = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let (l, r) = (&mut left[..frames], &mut right[..frames]);

                    engine.render_with(&mut rx, l, r);

                    let offset = frames_written * channels;
                    interleave(l, r, &mut data[offset..], channels);
                    frames_written += frames;
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        Ok(Self {
            stream,
            controls,
            sample_rate: config.sample_rate,
            channels,
            initial: PadState::from_config(&config),
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn controls(&mut self) -> &mut ControlHandle {
        &mut self.controls
    }

    pub fn initial_state(&self) -> PadState {
        self.initial.clone()
    }

    /// Release every voice, let the tails ring out, then drop the stream.
    pub fn stop(mut self) {
        if let Err(err) = self.controls.all_keys_off() {
            tracing::warn!(%err, "could not release voices before stopping");
        }
        std::thread::sleep(RELEASE_TAIL);

        if let Err(err) = self.stream.pause() {
            tracing::warn!(%err, "failed to pause stream");
        }
        tracing::info!("audio stream stopped");
    }
}
