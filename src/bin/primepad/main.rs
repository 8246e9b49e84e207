//! primepad - terminal harmonic pad
//!
//! Run with: cargo run -- --help

mod audio;
mod keys;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use primepad::{dsp::Waveform, EngineConfig, EnvelopeConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WaveArg {
    Sine,
    Saw,
    Square,
}

impl From<WaveArg> for Waveform {
    fn from(arg: WaveArg) -> Self {
        match arg {
            WaveArg::Sine => Waveform::Sine,
            WaveArg::Saw => Waveform::Saw,
            WaveArg::Square => Waveform::Square,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnvelopeArg {
    /// Two-state ramp using --duration
    Linear,
    /// Attack/decay/sustain/release
    Adsr,
}

#[derive(Parser, Debug)]
#[command(name = "primepad")]
#[command(version, about = "Harmonic pad synthesizer for the terminal", long_about = None)]
struct Args {
    /// Requested sample rate; the device default is used if unsupported
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Master gain, 0 to 1
    #[arg(long, default_value_t = 0.5)]
    gain: f32,

    /// Fundamental frequency in Hz
    #[arg(long, default_value_t = 60.0)]
    fundamental: f32,

    /// Filter resonance
    #[arg(long, default_value_t = 2.0)]
    filter_q: f32,

    /// Put the LFO-swept low-pass filter in the signal path
    #[arg(long)]
    filter: bool,

    /// Keep the LFO rate fixed instead of following each pad's pitch
    #[arg(long)]
    fixed_lfo: bool,

    #[arg(long, value_enum, default_value_t = WaveArg::Square)]
    waveform: WaveArg,

    #[arg(long, value_enum, default_value_t = EnvelopeArg::Adsr)]
    envelope: EnvelopeArg,

    /// Linear envelope ramp time in seconds
    #[arg(long, default_value_t = 0.1)]
    duration: f32,

    /// ADSR attack in seconds
    #[arg(long, default_value_t = 0.1)]
    attack: f32,

    /// ADSR decay in seconds
    #[arg(long, default_value_t = 0.1)]
    decay: f32,

    /// ADSR sustain level, 0 to 1
    #[arg(long, default_value_t = 0.1)]
    sustain: f32,

    /// ADSR release in seconds
    #[arg(long, default_value_t = 0.1)]
    release: f32,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let envelope = match self.envelope {
            EnvelopeArg::Linear => EnvelopeConfig::Linear {
                duration: self.duration,
            },
            EnvelopeArg::Adsr => EnvelopeConfig::Adsr {
                attack: self.attack,
                decay: self.decay,
                sustain: self.sustain,
                release: self.release,
            },
        };

        EngineConfig {
            sample_rate: self.sample_rate as f32,
            master_gain: self.gain,
            fundamental: self.fundamental,
            filter_q: self.filter_q,
            filter_enabled: self.filter,
            lfo_tracks_pitch: !self.fixed_lfo,
            waveform: self.waveform.into(),
            envelope,
            ..EngineConfig::default()
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.engine_config();
    config.validate().wrap_err("invalid engine configuration")?;

    let mut session = audio::AudioSession::start(config).wrap_err("failed to start audio")?;
    tracing::info!(
        sample_rate = session.sample_rate(),
        channels = session.channels(),
        "audio stream running"
    );

    let initial = session.initial_state();
    let result = keys::run(session.controls(), initial);

    session.stop();
    result
}
