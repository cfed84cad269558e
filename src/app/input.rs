//! Keyboard input → player intent.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::model::world::PlayerInput;

/// Per-frame input state. Movement keys set intent for the frame being
/// built; [`InputState::take_frame`] hands the intent to the simulation and
/// resets it.
#[derive(Debug, Default)]
pub struct InputState {
    move_x: f64,
    move_y: f64,
    attack: bool,
    pub quit: bool,
    pub pause: bool,
    pub restart: bool,
}

impl InputState {
    /// Applies one key event. Unknown keys are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }
        match key.code {
            KeyCode::Char('w') | KeyCode::Up => self.move_y = -1.0,
            KeyCode::Char('s') | KeyCode::Down => self.move_y = 1.0,
            KeyCode::Char('a') | KeyCode::Left => self.move_x = -1.0,
            KeyCode::Char('d') | KeyCode::Right => self.move_x = 1.0,
            KeyCode::Char(' ') => self.attack = true,
            KeyCode::Char('p') => self.pause = true,
            KeyCode::Char('r') => self.restart = true,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Returns this frame's player intent and resets the per-frame state.
    pub fn take_frame(&mut self) -> PlayerInput {
        let input = PlayerInput {
            move_x: self.move_x,
            move_y: self.move_y,
            attack: self.attack,
        };
        self.move_x = 0.0;
        self.move_y = 0.0;
        self.attack = false;
        input
    }

    pub fn take_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause)
    }

    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_movement_keys_set_intent() {
        let mut input = InputState::default();
        input.handle_key(press(KeyCode::Char('d')));
        input.handle_key(press(KeyCode::Up));
        let frame = input.take_frame();
        assert_eq!((frame.move_x, frame.move_y), (1.0, -1.0));
    }

    #[test]
    fn test_take_frame_resets_intent() {
        let mut input = InputState::default();
        input.handle_key(press(KeyCode::Char('a')));
        input.handle_key(press(KeyCode::Char(' ')));
        let first = input.take_frame();
        assert!(first.attack);
        let second = input.take_frame();
        assert_eq!(second.move_x, 0.0);
        assert!(!second.attack);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut input = InputState::default();
        input.handle_key(KeyEvent {
            code: KeyCode::Char('w'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(input.take_frame().move_y, 0.0);
    }

    #[test]
    fn test_quit_and_restart_flags() {
        let mut input = InputState::default();
        input.handle_key(press(KeyCode::Esc));
        input.handle_key(press(KeyCode::Char('r')));
        assert!(input.quit);
        assert!(input.take_restart());
        assert!(!input.take_restart());
    }
}
