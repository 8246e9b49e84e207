/// Write planar stereo into an interleaved device buffer with `channels`
/// channels per frame.
///
/// Channel 0 takes `left`, channel 1 takes `right`, and any further channels
/// repeat `left` (the engine's output is mono duplicated, so every channel
/// carries the same signal). A mono device gets `left` only. Returns the
/// number of frames written, which is bounded by the shortest input.
pub fn interleave(left: &[f32], right: &[f32], out: &mut [f32], channels: usize) -> usize {
    if channels == 0 {
        return 0;
    }

    let frames = left.len().min(right.len()).min(out.len() / channels);
    for (i, frame) in out.chunks_exact_mut(channels).take(frames).enumerate() {
        for (ch, sample) in frame.iter_mut().enumerate() {
            *sample = if ch == 1 { right[i] } else { left[i] };
        }
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_interleaves_left_right() {
        let left = [1.0, 2.0, 3.0];
        let right = [-1.0, -2.0, -3.0];
        let mut out = [0.0f32; 6];
        assert_eq!(interleave(&left, &right, &mut out, 2), 3);
        assert_eq!(out, [1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn extra_channels_repeat_left() {
        let left = [0.5, 0.25];
        let right = [0.5, 0.25];
        let mut out = [0.0f32; 8];
        assert_eq!(interleave(&left, &right, &mut out, 4), 2);
        assert_eq!(out, [0.5, 0.5, 0.5, 0.5, 0.25, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn short_device_buffer_bounds_frames() {
        let left = [1.0; 8];
        let right = [1.0; 8];
        let mut out = [0.0f32; 5];
        assert_eq!(interleave(&left, &right, &mut out, 2), 2);
        assert_eq!(out[4], 0.0);
        assert_eq!(interleave(&left, &right, &mut out, 0), 0);
    }
}
