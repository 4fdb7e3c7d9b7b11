//! Keyboard sampling into per-tick `Inputs`
//!
//! Key presses are latched until the next `sample`. Soft drop is a held key,
//! but terminals rarely report releases, so it counts as held while press or
//! repeat events keep arriving.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tetrs_remix::Inputs;

/// Time after which we consider a key "released" if no repeat received
const KEY_TIMEOUT: Duration = Duration::from_millis(100);

/// Keys that leave the round rather than steer it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Back to the main menu
    Menu,
    Quit,
}

#[derive(Debug, Default)]
pub struct InputSampler {
    latched: Inputs,
    /// Last time a soft drop key event arrived
    soft_drop_seen: Option<Instant>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press (or repeat)
    pub fn key_down(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        match normalize_key(key.code) {
            KeyCode::Left => self.latched.move_left = true,
            KeyCode::Right => self.latched.move_right = true,
            KeyCode::Up => self.latched.rotate = true,
            KeyCode::Down => self.soft_drop_seen = Some(Instant::now()),
            KeyCode::Char(' ') => self.latched.use_bomb = true,
            KeyCode::Char('a') => self.latched.toggle_ai = true,
            KeyCode::Esc => return Some(Command::Menu),
            KeyCode::Char('q') => return Some(Command::Quit),
            _ => {}
        }
        None
    }

    /// Handle a key release (may not be called on Linux)
    pub fn key_up(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Down {
            self.soft_drop_seen = None;
        }
    }

    /// Take everything pressed since the last call
    pub fn sample(&mut self) -> Inputs {
        self.sample_at(Instant::now())
    }

    fn sample_at(&mut self, now: Instant) -> Inputs {
        if let Some(seen) = self.soft_drop_seen {
            if now.duration_since(seen) > KEY_TIMEOUT {
                self.soft_drop_seen = None;
            }
        }

        let mut inputs = std::mem::take(&mut self.latched);
        inputs.soft_drop = self.soft_drop_seen.is_some();
        inputs
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_presses_latch_until_sampled() {
        let mut sampler = InputSampler::new();
        sampler.key_down(press(KeyCode::Left));
        sampler.key_down(press(KeyCode::Char('A')));

        let inputs = sampler.sample();
        assert!(inputs.move_left);
        assert!(inputs.toggle_ai);
        assert_eq!(sampler.sample(), Inputs::default());
    }

    #[test]
    fn test_soft_drop_times_out() {
        let mut sampler = InputSampler::new();
        sampler.key_down(press(KeyCode::Down));
        let now = Instant::now();
        assert!(sampler.sample_at(now).soft_drop);
        assert!(sampler.sample_at(now).soft_drop);
        assert!(!sampler.sample_at(now + KEY_TIMEOUT * 2).soft_drop);
    }

    #[test]
    fn test_commands() {
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.key_down(press(KeyCode::Esc)), Some(Command::Menu));
        assert_eq!(sampler.key_down(press(KeyCode::Char('q'))), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(sampler.key_down(ctrl_c), Some(Command::Quit));
    }
}
