use thiserror::Error;

use crate::synth::message::ControlMessage;

/// Rejected engine configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} = {value} is invalid: {reason}")]
    InvalidValue {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("voice count must be at least 1")]
    NoVoices,
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value,
            reason,
        }
    }
}

/// Failure to hand a control message to the audio thread.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// The queue was full; the message was not delivered.
    #[error("control queue is full, dropped {0:?}")]
    QueueFull(ControlMessage),

    #[error("pad index {0} is out of range")]
    UnknownPad(usize),

    #[error("voice {0} does not exist")]
    UnknownVoice(usize),
}
