use crate::{
    dsp::node::{Gate, RenderCtx, RAMP_TOLERANCE},
    MIN_TIME,
};

/*
ADSR Envelope
=============

A linear attack/decay/sustain/release amplitude shaper with a fixed peak.

Vocabulary
----------

  value       The envelope's current output (0.0 to PEAK_LEVEL). Multiplies
              the oscillator to shape the amplitude of a voice.

  state       Which stage we're in: Off, Attack, Decay, Sustain or Release.

  sustain     A LEVEL, not a time. Attack, decay and release are durations in
              seconds; sustain is the value held while the key stays down.

  increment   How much `value` moves per sample while ramping:

                attack   PEAK_LEVEL / (attack · sr)
                decay    (1 − sustain) / (decay · sr)
                release  sustain / (release · sr)

              Decay and release use the full-scale formulas even though the
              ramp starts at PEAK_LEVEL (decay) or wherever the key was
              released (release), so those stages finish sooner than their
              nominal duration. That is the shape this pad has always had.


The Shape
---------

  Value
    0.8 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
         A   D     Sustain     R


The State Machine
-----------------

    Off ──key_on──→ Attack ──value≥0.8──→ Decay ──value≤S──→ Sustain
     ↑                                                         │
     └──────value≤0────── Release ←────────key_off─────────────┘

Transitions out of Attack, Decay and Release happen when the value crosses
its target, never on an elapsed-sample count; the durations only set the
increments. key_on jumps to Attack and key_off jumps to Release from ANY
state without touching the value, so retriggering mid-release restarts the
ramp from wherever it currently is.

Guards
------

  - Durations are clamped to at least MIN_TIME so increments stay finite.
  - Sustain is clamped to [0, PEAK_LEVEL]; a higher sustain would make decay
    jump the value above the peak.
  - Release uses max(sustain, MIN_RELEASE_LEVEL) as its scale so a zero
    sustain still releases when the key goes up during attack or decay.
  - A stage ends on the first sample whose value reaches its target, and
    the value is set exactly onto the target. The ramp accumulates in f64 so
    that rounding never delays the handover by a sample.
*/

/// Ceiling of the attack ramp.
pub const PEAK_LEVEL: f32 = 0.8;

/// Smallest level used to scale the release increment.
pub const MIN_RELEASE_LEVEL: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdsrState {
    Off,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone)]
pub struct Adsr {
    attack: f32,  // seconds, 0 → PEAK_LEVEL
    decay: f32,   // seconds, scale of the decay increment
    sustain: f32, // level held while the key is down
    release: f32, // seconds, scale of the release increment

    state: AdsrState,
    value: f64,
}

impl Adsr {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(MIN_TIME),
            decay: decay.max(MIN_TIME),
            sustain: sustain.clamp(0.0, PEAK_LEVEL),
            release: release.max(MIN_TIME),
            state: AdsrState::Off,
            value: 0.0,
        }
    }

    /// Advance by one sample and return the new value.
    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        let peak = f64::from(PEAK_LEVEL);
        let sustain = f64::from(self.sustain);

        match self.state {
            AdsrState::Off => {}

            AdsrState::Attack => {
                self.value += peak / f64::from(ctx.samples(self.attack));

                if self.value >= peak - RAMP_TOLERANCE {
                    self.value = peak;
                    self.state = AdsrState::Decay;
                }
            }

            AdsrState::Decay => {
                self.value -= (1.0 - sustain) / f64::from(ctx.samples(self.decay));

                if self.value <= sustain + RAMP_TOLERANCE {
                    self.value = sustain;
                    self.state = AdsrState::Sustain;
                }
            }

            AdsrState::Sustain => {}

            AdsrState::Release => {
                let scale = sustain.max(f64::from(MIN_RELEASE_LEVEL));
                self.value -= scale / f64::from(ctx.samples(self.release));

                if self.value <= RAMP_TOLERANCE {
                    self.value = 0.0;
                    self.state = AdsrState::Off;
                }
            }
        }

        self.value = self.value.clamp(0.0, peak);
        self.value as f32
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn note_on(&mut self) {
        self.state = AdsrState::Attack;
    }

    pub fn note_off(&mut self) {
        self.state = AdsrState::Release;
    }

    pub fn value(&self) -> f32 {
        self.value as f32
    }

    pub fn state(&self) -> AdsrState {
        self.state
    }

    pub fn sustain(&self) -> f32 {
        self.sustain
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(0.1, 0.1, 0.1, 0.1)
    }
}

impl Gate for Adsr {
    fn key_on(&mut self) {
        self.note_on();
    }

    fn key_off(&mut self) {
        self.note_off();
    }

    fn tick(&mut self, ctx: &RenderCtx) -> f32 {
        self.next_sample(ctx)
    }

    fn level(&self) -> f32 {
        self.value()
    }

    fn is_active(&self) -> bool {
        self.state != AdsrState::Off
    }
}
