#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// A control-boundary event, produced on the UI thread and applied on the
/// audio thread at the start of the next block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    SetFrequency { voice: usize, hz: f32 },
    KeyOn { voice: usize },
    KeyOff { voice: usize },
    /// Pad press (`on`) or release, resolved through the pad table.
    TriggerHarmonic { index: usize, on: bool },
    SetMasterGain(f32),
    SetFundamental(f32),
    /// Multiply the fundamental (double, triple, half, third presets).
    ScaleFundamental(f32),
    SetFilterEnabled(bool),
    SetFilterQ(f32),
    AllKeysOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// A plain queue works as a receiver for offline rendering and tests.
impl MessageReceiver for std::collections::VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}
