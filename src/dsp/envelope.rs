use crate::{
    dsp::node::{Gate, RenderCtx, RAMP_TOLERANCE},
    MIN_TIME,
};

/*
Linear Key Envelope
===================

The simplest amplitude shaper: a ramp that climbs toward 1.0 while the key
is down and falls toward 0.0 once it is released. Both directions use the
same slope:

    N        = duration · sample_rate      samples to cross [0, 1]
    step     = 1 / N                       change per sample

        1.0 ┐    ┌───────────┐
            │   ╱             ╲
            │  ╱               ╲
        0.0 └─╱─────────────────╲──→ Time
             on                off

Unlike the ADSR, reaching a bound never changes the state. The value stays
pinned at 1.0 (or 0.0) until the next key event.

A bound counts as reached on the first sample the ramp arrives at it, so a
full traverse takes ceil(N) samples. The ramp accumulates in f64; summing
thousands of f32 steps drifts far enough to add a sample.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    On,
    Off,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    duration: f32, // seconds to traverse the full range
    value: f64,
    state: KeyState,
}

impl Envelope {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(MIN_TIME),
            value: 0.0,
            state: KeyState::Off,
        }
    }

    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        let step = 1.0 / f64::from(ctx.samples(self.duration));

        match self.state {
            KeyState::On => {
                if self.value < 1.0 {
                    self.value += step;
                }
                if self.value >= 1.0 - RAMP_TOLERANCE {
                    self.value = 1.0;
                }
            }
            KeyState::Off => {
                if self.value > 0.0 {
                    self.value -= step;
                }
                if self.value <= RAMP_TOLERANCE {
                    self.value = 0.0;
                }
            }
        }

        self.value = self.value.clamp(0.0, 1.0);
        self.value as f32
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn note_on(&mut self) {
        self.state = KeyState::On;
    }

    pub fn note_off(&mut self) {
        self.state = KeyState::Off;
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn value(&self) -> f32 {
        self.value as f32
    }

    pub fn state(&self) -> KeyState {
        self.state
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Gate for Envelope {
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
        self.state == KeyState::On || self.value > 0.0
    }
}
