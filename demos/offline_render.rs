use std::collections::VecDeque;

use primepad::{
    io::AudioOutput,
    synth::{ControlMessage, FundamentalPreset},
    EngineConfig, SynthEngine,
};

fn main() {
    let config = EngineConfig::default().with_filter(true);
    let mut engine = SynthEngine::new(&config).expect("default config is valid");

    // First three harmonics, then the same pads an octave up.
    let mut queue: VecDeque<ControlMessage> = [0, 2, 1]
        .into_iter()
        .map(|index| ControlMessage::TriggerHarmonic { index, on: true })
        .collect();

    let mut output = AudioOutput::with_frames(4_800);
    for block in 0..20 {
        if block == 10 {
            queue.push_back(ControlMessage::ScaleFundamental(
                FundamentalPreset::Double.factor(),
            ));
            queue.extend([0, 2, 1].map(|index| ControlMessage::TriggerHarmonic { index, on: true }));
        }
        if block == 16 {
            queue.push_back(ControlMessage::AllKeysOff);
        }

        let (left, right) = output.channels_mut();
        engine.render_with(&mut queue, left, right);
        println!(
            "block {block:>2}: fundamental {:>5.1} Hz, peak {:.3}",
            engine.fundamental(),
            output.peak()
        );
    }

    println!("Rendered {} frames", engine.frames_rendered());
}
