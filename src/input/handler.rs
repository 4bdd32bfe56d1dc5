use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

use crate::game::{Action, Direction, SpeedControl, SpeedRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

/// Which keys change the speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpeedKeys {
    /// Shift / Ctrl (or `+` / `-`) nudge the speed
    Step,
    /// `1`..`9` pick a level
    Levels,
}

pub struct InputHandler {
    speed_keys: SpeedKeys,
}

impl InputHandler {
    pub fn new(speed_control: &SpeedControl) -> Self {
        let speed_keys = match speed_control {
            SpeedControl::Step { .. } => SpeedKeys::Step,
            SpeedControl::Levels { .. } => SpeedKeys::Levels,
        };
        Self { speed_keys }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            code => self.speed_key(code),
        }
    }

    fn speed_key(&self, code: KeyCode) -> KeyAction {
        let request = match (self.speed_keys, code) {
            // Bare modifier presses only arrive when the terminal reports them
            (
                SpeedKeys::Step,
                KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift),
            ) => SpeedRequest::Faster,
            (
                SpeedKeys::Step,
                KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl),
            ) => SpeedRequest::Slower,
            (SpeedKeys::Step, KeyCode::Char('+') | KeyCode::Char('=')) => SpeedRequest::Faster,
            (SpeedKeys::Step, KeyCode::Char('-') | KeyCode::Char('_')) => SpeedRequest::Slower,
            (SpeedKeys::Levels, KeyCode::Char(c @ '1'..='9')) => {
                SpeedRequest::Level(c as usize - '1' as usize)
            }
            _ => return KeyAction::None,
        };
        KeyAction::GameAction(Action::Speed(request))
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::GameAction(Action::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(&SpeedControl::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels_handler() -> InputHandler {
        InputHandler::new(&SpeedControl::evenly_spaced(5, 30))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::default();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(up),
            KeyAction::GameAction(Action::Turn(Direction::Up))
        );

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(down),
            KeyAction::GameAction(Action::Turn(Direction::Down))
        );

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(left),
            KeyAction::GameAction(Action::Turn(Direction::Left))
        );

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(right),
            KeyAction::GameAction(Action::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::default();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(w),
            KeyAction::GameAction(Action::Turn(Direction::Up))
        );

        let a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(a),
            KeyAction::GameAction(Action::Turn(Direction::Left))
        );
    }

    #[test]
    fn test_step_speed_keys() {
        let handler = InputHandler::default();

        let shift = KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyModifiers::SHIFT,
        );
        assert_eq!(
            handler.handle_key_event(shift),
            KeyAction::GameAction(Action::Speed(SpeedRequest::Faster))
        );

        let ctrl = KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::RightControl),
            KeyModifiers::CONTROL,
        );
        assert_eq!(
            handler.handle_key_event(ctrl),
            KeyAction::GameAction(Action::Speed(SpeedRequest::Slower))
        );

        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(plus),
            KeyAction::GameAction(Action::Speed(SpeedRequest::Faster))
        );

        let minus = KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(minus),
            KeyAction::GameAction(Action::Speed(SpeedRequest::Slower))
        );

        // Level keys mean nothing in step mode
        let five = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(five), KeyAction::None);
    }

    #[test]
    fn test_level_speed_keys() {
        let handler = levels_handler();

        let one = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(one),
            KeyAction::GameAction(Action::Speed(SpeedRequest::Level(0)))
        );

        let nine = KeyEvent::new(KeyCode::Char('9'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(nine),
            KeyAction::GameAction(Action::Speed(SpeedRequest::Level(8)))
        );

        let zero = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(zero), KeyAction::None);

        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(plus), KeyAction::None);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::default();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), KeyAction::Quit);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::default();

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), KeyAction::None);
    }
}
