pub mod config;
pub mod dsp;
pub mod error;
pub mod io;
pub mod synth; // Voices, pad table and the mixing engine

pub use config::{EngineConfig, EnvelopeConfig};
pub use error::{ConfigError, ControlError};
pub use synth::SynthEngine;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
