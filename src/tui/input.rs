use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map key events to UI actions
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Process a key event
    pub fn handle_key(&self, key: KeyEvent) -> InputAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => InputAction::Quit,
            KeyCode::Char('n') if ctrl => InputAction::NewSession,
            KeyCode::Char('b') if ctrl => InputAction::ToggleSidebar,
            KeyCode::Down if ctrl => InputAction::NextSession,
            KeyCode::Up if ctrl => InputAction::PreviousSession,
            KeyCode::Tab => InputAction::NextSession,
            KeyCode::BackTab => InputAction::PreviousSession,
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Esc => InputAction::Quit,
            KeyCode::Backspace => InputAction::Delete,
            KeyCode::Up | KeyCode::PageUp => InputAction::ScrollUp,
            KeyCode::Down | KeyCode::PageDown => InputAction::ScrollDown,
            KeyCode::Char(c) if !ctrl => InputAction::Insert(c),
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    Insert(char),
    Delete,
    NewSession,
    NextSession,
    PreviousSession,
    ScrollUp,
    ScrollDown,
    ToggleSidebar,
    Quit,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_typing_and_submit() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            InputAction::Insert('a')
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            InputAction::Insert('N')
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::Submit
        );
    }

    #[test]
    fn test_session_shortcuts() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            InputAction::NewSession
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            InputAction::NextSession
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            InputAction::PreviousSession
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Up, KeyModifiers::CONTROL)),
            InputAction::PreviousSession
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Up, KeyModifiers::NONE)),
            InputAction::ScrollUp
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            InputAction::Quit
        );
    }
}
