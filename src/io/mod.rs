// Purpose - buffers handed across the audio-device boundary, format conversions

pub mod converter;

pub use converter::interleave;

/// A stereo block of planar output.
#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl AudioOutput {
    /// Allocate zeroed buffers for `frames` frames. Not for the audio thread.
    pub fn with_frames(frames: usize) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
        }
    }

    pub fn frames(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    pub fn channels_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.left, &mut self.right)
    }

    /// Largest absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}
