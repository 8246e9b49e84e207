//! Property-based tests for the pad engine's DSP primitives.
//!
//! Tests oscillator phase bounds, envelope level bounds under arbitrary key
//! sequences, and biquad stability using proptest for randomized input.

use proptest::prelude::*;
use primepad::{
    dsp::{Adsr, Biquad, Envelope, Gate, Oscillator, RenderCtx, Waveform},
    EngineConfig, EnvelopeConfig, SynthEngine,
};

fn waveform(index: usize) -> Waveform {
    match index % 3 {
        0 => Waveform::Sine,
        1 => Waveform::Saw,
        _ => Waveform::Square,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any frequency, including negative and above the sample rate,
    /// the phase never leaves [0, 1) and the output never leaves [-1, 1].
    #[test]
    fn oscillator_phase_stays_in_unit_interval(
        freq in -200_000.0f32..200_000.0f32,
        sample_rate in 1.0f32..192_000.0f32,
        shape in 0usize..3,
        ticks in 1usize..2_000,
    ) {
        let ctx = RenderCtx::new(sample_rate);
        let mut osc = Oscillator::new(waveform(shape), freq);

        for _ in 0..ticks {
            let out = osc.tick(&ctx);
            prop_assert!((-1.0..=1.0).contains(&out), "output {} out of range", out);
            let phase = osc.phase();
            prop_assert!((0.0..1.0).contains(&phase), "phase {} out of range", phase);
        }
    }

    /// Random key edges at random intervals keep the linear envelope in [0, 1].
    #[test]
    fn linear_envelope_stays_bounded(
        duration in 0.0f32..0.5f32,
        edges in prop::collection::vec((any::<bool>(), 0usize..400), 1..20),
    ) {
        let ctx = RenderCtx::new(8_000.0);
        let mut env = Envelope::new(duration);

        for (on, hold) in edges {
            if on { env.key_on() } else { env.key_off() }
            for _ in 0..hold {
                let level = env.tick(&ctx);
                prop_assert!((0.0..=1.0).contains(&level), "level {}", level);
            }
        }
    }

    /// Random key edges keep the ADSR in [0, 0.8] and it always returns to
    /// silence after a long enough release.
    #[test]
    fn adsr_stays_bounded_and_releases(
        attack in 0.0f32..0.1f32,
        decay in 0.0f32..0.1f32,
        sustain in 0.0f32..1.0f32,
        release in 0.0f32..0.1f32,
        edges in prop::collection::vec((any::<bool>(), 0usize..400), 1..20),
    ) {
        let ctx = RenderCtx::new(1_000.0);
        let mut env = Adsr::new(attack, decay, sustain, release);

        for (on, hold) in edges {
            if on { env.key_on() } else { env.key_off() }
            for _ in 0..hold {
                let level = env.tick(&ctx);
                prop_assert!((0.0..=0.8).contains(&level), "level {}", level);
            }
        }

        // Worst case: releasing from the peak at the slowest release rate.
        env.key_off();
        let rate = env.sustain().max(1e-3);
        let worst = (0.8 / rate * ctx.samples(release)) as usize + 2;
        for _ in 0..worst {
            env.tick(&ctx);
        }
        prop_assert!(!env.is_active());
        prop_assert_eq!(env.value(), 0.0);
    }

    /// For any cutoff above 100 Hz and Q in [0.5, 10], the impulse response
    /// stays finite and dies away.
    #[test]
    fn biquad_impulse_decays(
        cutoff in 100.0f32..20_000.0f32,
        q in 0.5f32..10.0f32,
    ) {
        let ctx = RenderCtx::new(48_000.0);
        let mut filter = Biquad::lowpass(cutoff, q, &ctx);

        let mut tail = 0.0f32;
        for n in 0..20_000 {
            let out = filter.tick(if n == 0 { 1.0 } else { 0.0 });
            prop_assert!(out.is_finite(), "non-finite output at {}", n);
            if n >= 19_000 {
                tail = tail.max(out.abs());
            }
        }
        prop_assert!(tail < 1e-3, "tail {} (cutoff={}, q={})", tail, cutoff, q);
    }

    /// A single keyed voice never drives the engine past the master gain.
    #[test]
    fn single_voice_output_bounded_by_gain(
        gain in 0.0f32..=1.0f32,
        pad in 0usize..69,
        shape in 0usize..3,
        linear in any::<bool>(),
    ) {
        let envelope = if linear {
            EnvelopeConfig::Linear { duration: 0.01 }
        } else {
            EnvelopeConfig::Adsr { attack: 0.01, decay: 0.01, sustain: 0.5, release: 0.01 }
        };
        let config = EngineConfig {
            master_gain: gain,
            waveform: waveform(shape),
            envelope,
            ..EngineConfig::default()
        };
        let mut engine = SynthEngine::new(&config).unwrap();
        engine.trigger_harmonic(pad, true).unwrap();

        let mut left = vec![0.0f32; 2_048];
        let mut right = vec![0.0f32; 2_048];
        engine.render(&mut left, &mut right);

        for &s in &left {
            prop_assert!(s.abs() <= gain + 1e-6, "sample {} above gain {}", s, gain);
        }
    }
}
