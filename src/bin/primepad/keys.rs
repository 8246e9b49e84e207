//! Raw-mode keyboard input.
//!
//! Four keyboard rows form a 40-key bank over the pad grid; Tab flips to the
//! next bank so every pad is reachable. Pads latch: one press starts the
//! harmonic, the next press releases it.

use std::io::{stdout, Write};

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};

use primepad::{
    synth::{pad_slot, ControlHandle, FundamentalPreset, PAD_COUNT},
    ControlError, EngineConfig,
};

const BANK_KEYS: [char; 40] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', //
    'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', //
    'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';', //
    'z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '/',
];

const GAIN_STEP: f32 = 0.05;
const Q_STEP: f32 = 0.5;

/// Pad index for a key in the given bank.
pub fn pad_for_key(key: char, bank: usize) -> Option<usize> {
    let position = BANK_KEYS.iter().position(|&k| k == key.to_ascii_lowercase())?;
    let index = bank * BANK_KEYS.len() + position;
    (index < PAD_COUNT).then_some(index)
}

fn bank_count() -> usize {
    PAD_COUNT.div_ceil(BANK_KEYS.len())
}

/// What the UI believes the engine is doing.
#[derive(Debug, Clone)]
pub struct PadState {
    held: [bool; PAD_COUNT],
    bank: usize,
    gain: f32,
    fundamental: f32,
    filter_enabled: bool,
    filter_q: f32,
    voice_count: usize,
}

impl PadState {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            held: [false; PAD_COUNT],
            bank: 0,
            gain: config.master_gain,
            fundamental: config.fundamental,
            filter_enabled: config.filter_enabled,
            filter_q: config.filter_q,
            voice_count: config.voice_count,
        }
    }

    /// Flip a pad, returning whether it is now held.
    fn toggle(&mut self, index: usize) -> bool {
        let held = !self.held[index];
        if held {
            // The pad takes over its voice from any pad sharing it.
            let voice = index % self.voice_count.max(1);
            for (other, flag) in self.held.iter_mut().enumerate() {
                if other % self.voice_count.max(1) == voice {
                    *flag = false;
                }
            }
        }
        self.held[index] = held;
        held
    }

    fn status_line(&self) -> String {
        let held: Vec<String> = self
            .held
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .filter_map(|(i, _)| pad_slot(i, self.voice_count))
            .map(|slot| format!("{}x", slot.multiple))
            .collect();

        format!(
            "bank {}/{} | {:.1} Hz | gain {:.2} | filter {} q {:.1} | {}",
            self.bank + 1,
            bank_count(),
            self.fundamental,
            self.gain,
            if self.filter_enabled { "on" } else { "off" },
            self.filter_q,
            if held.is_empty() { "-".to_string() } else { held.join(" ") },
        )
    }
}

/// Leaves raw mode however the loop exits.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        println!();
    }
}

enum Action {
    Continue,
    Quit,
}

/// Read keys until Esc or Ctrl-C, forwarding each action to the engine.
pub fn run(controls: &mut ControlHandle, mut state: PadState) -> Result<()> {
    println!("primepad: rows 1-0 q-p a-; z-/ toggle pads, Tab next bank");
    println!("  +/- gain, arrows up/down/right/left = double/half/triple/third");
    println!("  Enter filter on/off, [ ] filter q, Space release all, Esc quit");

    let _guard = RawModeGuard::enable()?;
    draw(&state)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(key, controls, &mut state) {
            Ok(Action::Quit) => break,
            Ok(Action::Continue) => {}
            Err(err) => tracing::warn!(%err, "control message not sent"),
        }
        draw(&state)?;
    }

    Ok(())
}

fn handle_key(
    key: KeyEvent,
    controls: &mut ControlHandle,
    state: &mut PadState,
) -> Result<Action, ControlError> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    match key.code {
        KeyCode::Esc => return Ok(Action::Quit),
        KeyCode::Tab => state.bank = (state.bank + 1) % bank_count(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.gain = (state.gain + GAIN_STEP).min(1.0);
            controls.set_master_gain(state.gain)?;
        }
        KeyCode::Char('-') => {
            state.gain = (state.gain - GAIN_STEP).max(0.0);
            controls.set_master_gain(state.gain)?;
        }
        KeyCode::Up => preset(controls, state, FundamentalPreset::Double)?,
        KeyCode::Down => preset(controls, state, FundamentalPreset::Half)?,
        KeyCode::Right => preset(controls, state, FundamentalPreset::Triple)?,
        KeyCode::Left => preset(controls, state, FundamentalPreset::Third)?,
        KeyCode::Enter => {
            state.filter_enabled = !state.filter_enabled;
            controls.set_filter_enabled(state.filter_enabled)?;
        }
        KeyCode::Char('[') => {
            state.filter_q = (state.filter_q - Q_STEP).max(Q_STEP);
            controls.set_filter_q(state.filter_q)?;
        }
        KeyCode::Char(']') => {
            state.filter_q += Q_STEP;
            controls.set_filter_q(state.filter_q)?;
        }
        KeyCode::Char(' ') => {
            state.held = [false; PAD_COUNT];
            controls.all_keys_off()?;
        }
        KeyCode::Char(c) => {
            if let Some(index) = pad_for_key(c, state.bank) {
                let on = state.toggle(index);
                controls.trigger_harmonic(index, on)?;
            }
        }
        _ => {}
    }

    Ok(Action::Continue)
}

fn preset(
    controls: &mut ControlHandle,
    state: &mut PadState,
    preset: FundamentalPreset,
) -> Result<(), ControlError> {
    state.fundamental = (state.fundamental * preset.factor()).max(1.0);
    controls.apply_preset(preset)
}

fn draw(state: &PadState) -> Result<()> {
    let mut out = stdout();
    write!(out, "\r\x1b[2K{}", state.status_line())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_pads_per_bank() {
        assert_eq!(pad_for_key('1', 0), Some(0));
        assert_eq!(pad_for_key('Q', 0), Some(10));
        assert_eq!(pad_for_key('/', 0), Some(39));
        assert_eq!(pad_for_key('1', 1), Some(40));
        // The second bank stops at the last pad.
        assert_eq!(pad_for_key('k', 1), Some(68));
        assert_eq!(pad_for_key('l', 1), None);
        assert_eq!(pad_for_key('-', 0), None);
    }

    #[test]
    fn every_pad_is_reachable() {
        let reachable = (0..bank_count())
            .flat_map(|bank| BANK_KEYS.iter().filter_map(move |&k| pad_for_key(k, bank)))
            .count();
        assert_eq!(reachable, PAD_COUNT);
    }

    #[test]
    fn toggle_releases_pads_sharing_a_voice() {
        let mut state = PadState::from_config(&EngineConfig::default());
        assert!(state.toggle(0));
        assert!(state.toggle(3));
        assert!(!state.held[0]);
        assert!(!state.toggle(3));
    }
}
