use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{
    error::ControlError,
    synth::{
        harmonics::{FundamentalPreset, PAD_COUNT},
        message::ControlMessage,
    },
};

/// Default queue depth: far more than a person can press between two blocks.
pub const DEFAULT_CAPACITY: usize = 256;

/// Create the UI-side handle and the audio-side consumer for an engine with
/// `voice_count` voices.
pub fn control_channel(
    capacity: usize,
    voice_count: usize,
) -> (ControlHandle, Consumer<ControlMessage>) {
    let (tx, rx) = RingBuffer::new(capacity.max(1));
    (ControlHandle { tx, voice_count }, rx)
}

/// The control boundary as seen from the UI thread.
///
/// Every call is a non-blocking push onto a wait-free single-producer queue;
/// the audio thread applies the messages at the start of its next block.
pub struct ControlHandle {
    tx: Producer<ControlMessage>,
    voice_count: usize,
}

impl ControlHandle {
    pub fn send(&mut self, msg: ControlMessage) -> Result<(), ControlError> {
        self.tx.push(msg).map_err(|PushError::Full(msg)| {
            tracing::warn!(?msg, "control queue full, message dropped");
            ControlError::QueueFull(msg)
        })
    }

    fn check_voice(&self, voice: usize) -> Result<(), ControlError> {
        if voice < self.voice_count {
            Ok(())
        } else {
            Err(ControlError::UnknownVoice(voice))
        }
    }

    pub fn set_frequency(&mut self, voice: usize, hz: f32) -> Result<(), ControlError> {
        self.check_voice(voice)?;
        self.send(ControlMessage::SetFrequency { voice, hz })
    }

    pub fn key_on(&mut self, voice: usize) -> Result<(), ControlError> {
        self.check_voice(voice)?;
        self.send(ControlMessage::KeyOn { voice })
    }

    pub fn key_off(&mut self, voice: usize) -> Result<(), ControlError> {
        self.check_voice(voice)?;
        self.send(ControlMessage::KeyOff { voice })
    }

    pub fn trigger_harmonic(&mut self, index: usize, on: bool) -> Result<(), ControlError> {
        if index >= PAD_COUNT {
            return Err(ControlError::UnknownPad(index));
        }
        self.send(ControlMessage::TriggerHarmonic { index, on })
    }

    pub fn set_master_gain(&mut self, level: f32) -> Result<(), ControlError> {
        self.send(ControlMessage::SetMasterGain(level))
    }

    pub fn set_fundamental(&mut self, hz: f32) -> Result<(), ControlError> {
        self.send(ControlMessage::SetFundamental(hz))
    }

    pub fn apply_preset(&mut self, preset: FundamentalPreset) -> Result<(), ControlError> {
        self.send(ControlMessage::ScaleFundamental(preset.factor()))
    }

    pub fn set_filter_enabled(&mut self, enabled: bool) -> Result<(), ControlError> {
        self.send(ControlMessage::SetFilterEnabled(enabled))
    }

    pub fn set_filter_q(&mut self, q: f32) -> Result<(), ControlError> {
        self.send(ControlMessage::SetFilterQ(q))
    }

    pub fn all_keys_off(&mut self) -> Result<(), ControlError> {
        self.send(ControlMessage::AllKeysOff)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::message::MessageReceiver;

    #[test]
    fn messages_arrive_in_order() {
        let (mut handle, mut rx) = control_channel(8, 3);
        handle.trigger_harmonic(4, true).unwrap();
        handle.set_master_gain(0.3).unwrap();
        handle.trigger_harmonic(4, false).unwrap();

        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(ControlMessage::TriggerHarmonic { index: 4, on: true })
        );
        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(ControlMessage::SetMasterGain(0.3))
        );
        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(ControlMessage::TriggerHarmonic { index: 4, on: false })
        );
        assert_eq!(MessageReceiver::pop(&mut rx), None);
    }

    #[test]
    fn full_queue_returns_the_message() {
        let (mut handle, _rx) = control_channel(1, 3);
        handle.key_on(0).unwrap();
        assert_eq!(
            handle.key_off(0),
            Err(ControlError::QueueFull(ControlMessage::KeyOff { voice: 0 }))
        );
        assert_eq!(handle.slots(), 0);
    }

    #[test]
    fn invalid_targets_never_reach_the_queue() {
        let (mut handle, _rx) = control_channel(4, 3);
        assert_eq!(handle.key_on(3), Err(ControlError::UnknownVoice(3)));
        assert_eq!(
            handle.trigger_harmonic(PAD_COUNT, true),
            Err(ControlError::UnknownPad(PAD_COUNT))
        );
        assert_eq!(handle.slots(), 4);
    }

    #[test]
    fn drives_an_engine_across_threads() {
        use crate::{config::EngineConfig, synth::engine::SynthEngine};

        let (mut handle, mut rx) = control_channel(DEFAULT_CAPACITY, 3);
        let mut engine = SynthEngine::new(&EngineConfig::default()).unwrap();

        let ui = std::thread::spawn(move || {
            handle.set_fundamental(110.0).unwrap();
            handle.trigger_harmonic(2, true).unwrap();
        });
        ui.join().unwrap();

        let mut left = vec![0.0f32; 128];
        let mut right = vec![0.0f32; 128];
        engine.render_with(&mut rx, &mut left, &mut right);
        assert_eq!(engine.voice(2).unwrap().frequency(), 330.0);
        assert!(engine.voice(2).unwrap().is_active());
    }
}
