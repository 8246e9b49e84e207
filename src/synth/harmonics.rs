//! The pad grid: which harmonic each pad plays and which voice sounds it.

/// Harmonic multiples of the fundamental, one per pad, in grid order.
pub const PAD_HARMONICS: [u16; 69] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 30, 32, 33, 34, 35, 36, 38, 39, 40, 42, 44, 45, 46, 48, 49, 50, 51, 52, 55, 56, 57, 60,
    63, 65, 66, 68, 69, 70, 75, 76, 77, 78, 80, 84, 85, 88, 91, 92, 95, 98, 99,
];

pub const PAD_COUNT: usize = PAD_HARMONICS.len();

/// Where a pad lands: the voice it drives and the multiple of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadSlot {
    pub voice: usize,
    pub multiple: u16,
}

impl PadSlot {
    /// Oscillator frequency for this pad at `fundamental` Hz.
    #[inline]
    pub fn frequency(&self, fundamental: f32) -> f32 {
        fundamental * f32::from(self.multiple)
    }
}

/// Fixed steps for moving the fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundamentalPreset {
    Double,
    Triple,
    Half,
    Third,
}

impl FundamentalPreset {
    pub fn factor(self) -> f32 {
        match self {
            FundamentalPreset::Double => 2.0,
            FundamentalPreset::Triple => 3.0,
            FundamentalPreset::Half => 0.5,
            // Not exactly 1/3: repeated triple/third drifts downward.
            FundamentalPreset::Third => 0.33,
        }
    }
}

/// Pads are dealt round-robin across `voice_count` voices.
#[inline]
pub fn pad_slot(index: usize, voice_count: usize) -> Option<PadSlot> {
    let multiple = *PAD_HARMONICS.get(index)?;
    let voice = index % voice_count.max(1);
    Some(PadSlot { voice, multiple })
}
