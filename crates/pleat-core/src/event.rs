use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};

/// Terminal events a host loop forwards to pleat components.
///
/// Each variant wraps the corresponding [`crossterm::event::Event`] payload,
/// so key codes and modifiers can be matched with the full crossterm API.
/// Widgets only ever look at [`TerminalEvent::Key`]; the rest is carried so
/// a host can convert every crossterm event in one place.
///
/// # Example
///
/// ```rust,ignore
/// use pleat_core::TerminalEvent;
///
/// match TerminalEvent::from(crossterm::event::read()?) {
///     TerminalEvent::Key(key) => accordion.handle_key(key),
///     _ => None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Return the key event if this is a key *press*.
    ///
    /// Release and repeat events are filtered out so a single physical key
    /// press never toggles a panel twice on terminals that report both.
    pub fn key_press(&self) -> Option<KeyEvent> {
        match self {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn key_press_passes_presses() {
        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        let ev = TerminalEvent::from(crossterm::event::Event::Key(key));
        assert_eq!(ev.key_press(), Some(key));
    }

    #[test]
    fn key_press_ignores_releases() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(TerminalEvent::Key(key).key_press(), None);
    }

    #[test]
    fn non_key_events_have_no_key() {
        assert_eq!(TerminalEvent::Resize(80, 24).key_press(), None);
        assert_eq!(TerminalEvent::FocusLost.key_press(), None);
    }
}
