//! Remappable key bindings for accordion navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// One or more key combinations mapped to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Short label used for help display, e.g. `"↓/j"`.
    pub help_key: String,
    /// What the action does.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

/// A key press with the modifiers that must be held alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key.
    pub code: KeyCode,
    /// Required modifiers.
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// A key with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key with the Ctrl modifier.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

impl Binding {
    /// Bind several key combinations to one action.
    pub fn new(
        keys: Vec<KeyCombination>,
        help_key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` triggers this binding.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    /// Enable or disable the binding.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Types that expose their bindings for a help line.
pub trait KeyMap {
    /// The bindings worth showing, in display order.
    fn short_help(&self) -> Vec<&Binding>;

    /// Render the enabled bindings as `key action` pairs on one line.
    fn help_line(&self) -> Line<'_> {
        let key_style = Style::default().fg(Color::Cyan);
        let mut spans = Vec::new();
        for binding in self.short_help().into_iter().filter(|b| b.enabled) {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(binding.help_key.as_str(), key_style));
            spans.push(Span::raw(" "));
            spans.push(Span::raw(binding.description.as_str()));
        }
        Line::from(spans)
    }
}

/// What a key press asks the accordion to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move focus to the next item's header.
    Next,
    /// Move focus to the previous item's header.
    Previous,
    /// Move focus to the first header.
    First,
    /// Move focus to the last header.
    Last,
    /// Open or close the focused item.
    Toggle,
}

/// Key bindings for the [`Accordion`](crate::accordion::Accordion).
#[derive(Debug, Clone)]
pub struct AccordionKeyBindings {
    /// Default: Down, j
    pub next: Binding,
    /// Default: Up, k
    pub previous: Binding,
    /// Default: Home, g
    pub first: Binding,
    /// Default: End, G
    pub last: Binding,
    /// Default: Enter, Space
    pub toggle: Binding,
}

impl AccordionKeyBindings {
    /// Resolve a key event to an action. Earlier fields win on overlap.
    pub fn action(&self, event: &KeyEvent) -> Option<Action> {
        [
            (&self.next, Action::Next),
            (&self.previous, Action::Previous),
            (&self.first, Action::First),
            (&self.last, Action::Last),
            (&self.toggle, Action::Toggle),
        ]
        .into_iter()
        .find(|(binding, _)| binding.matches(event))
        .map(|(_, action)| action)
    }
}

impl Default for AccordionKeyBindings {
    fn default() -> Self {
        Self {
            next: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::new(KeyCode::Char('j')),
                ],
                "↓/j",
                "next",
            ),
            previous: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::new(KeyCode::Char('k')),
                ],
                "↑/k",
                "previous",
            ),
            first: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Home),
                    KeyCombination::new(KeyCode::Char('g')),
                ],
                "home",
                "first",
            ),
            last: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::End),
                    KeyCombination::new(KeyCode::Char('G')),
                ],
                "end",
                "last",
            ),
            toggle: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                ],
                "enter/space",
                "toggle",
            ),
        }
    }
}

impl KeyMap for AccordionKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.previous, &self.toggle]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_resolve() {
        let kb = AccordionKeyBindings::default();
        assert_eq!(kb.action(&press(KeyCode::Down)), Some(Action::Next));
        assert_eq!(kb.action(&press(KeyCode::Char('k'))), Some(Action::Previous));
        assert_eq!(kb.action(&press(KeyCode::Home)), Some(Action::First));
        assert_eq!(kb.action(&press(KeyCode::End)), Some(Action::Last));
        assert_eq!(kb.action(&press(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(kb.action(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn shifted_capital_still_matches() {
        let kb = AccordionKeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(kb.action(&ev), Some(Action::Last));
    }

    #[test]
    fn ctrl_binding_requires_ctrl() {
        let b = Binding::new(vec![KeyCombination::ctrl(KeyCode::Char('n'))], "^n", "next");
        assert!(!b.matches(&press(KeyCode::Char('n'))));
        assert!(b.matches(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn disabled_binding_never_matches() {
        let mut kb = AccordionKeyBindings::default();
        kb.toggle = kb.toggle.enabled(false);
        assert_eq!(kb.action(&press(KeyCode::Enter)), None);
    }

    #[test]
    fn help_line_lists_enabled_bindings() {
        let mut kb = AccordionKeyBindings::default();
        kb.previous = kb.previous.enabled(false);
        let text: String = kb
            .help_line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "↓/j next  enter/space toggle");
    }
}
