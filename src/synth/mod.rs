// Purpose: voices, the pad table and the block-rendering engine that mixes them
// This layer sits above the dsp primitives and owns all per-stream state

#[cfg(feature = "rtrb")]
pub mod control;
pub mod engine;
pub mod harmonics;
pub mod message;
pub mod voice;

#[cfg(feature = "rtrb")]
pub use control::{control_channel, ControlHandle};
pub use engine::SynthEngine;
pub use harmonics::{pad_slot, FundamentalPreset, PadSlot, PAD_COUNT, PAD_HARMONICS};
pub use message::{ControlMessage, MessageReceiver};
pub use voice::{Voice, VoiceEnvelope};
