//! Accordion component: a stack of collapsible panels with keyboard focus.
//!
//! [`Accordion`] composes a [`StateEngine`] (which items are open) with a
//! [`FocusNavigator`] (which header has keyboard focus) and draws each item
//! through a [`PanelRenderer`].
//!
//! Every accepted open/close change is reported to the parent as
//! [`Message::Changed`] and, if configured, to the `on_change` callback.
//! When the accordion is *controlled* (built with
//! [`AccordionOptions::with_state`]) the parent must feed the reported state
//! back through [`Accordion::set_state`] for it to become visible.
//!
//! # Example
//!
//! ```ignore
//! use pleat_widgets::accordion::{Accordion, AccordionOptions};
//! use pleat_widgets::panel::AccordionItem;
//!
//! let mut faq = Accordion::new(
//!     vec![
//!         AccordionItem::new("Shipping", "Orders ship within two days."),
//!         AccordionItem::new("Returns", "Returns are free for 30 days."),
//!     ],
//!     AccordionOptions::default().with_initial_item(0),
//! )?;
//! faq.focus();
//! ```

use crate::accordion_state::{AccordionState, ChangeCallback, EngineOptions, StateEngine};
use crate::error::AccordionError;
use crate::focus::{FocusCursor, FocusNavigator, Focusable};
use crate::id;
use crate::key::{AccordionKeyBindings, Action};
use crate::panel::{
    AccordionItem, AccordionStyle, DefaultPanel, IconPosition, PanelProps, PanelRenderer,
    Transition,
};
use crossterm::event::KeyEvent;
use pleat_core::command::Command;
use pleat_core::component::Component;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::Frame;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Messages for the accordion component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press forwarded to the accordion.
    KeyPress(KeyEvent),
    /// Request to open or close the item at the given index.
    Toggle(usize),
    /// Request to move keyboard focus to the item at the given index.
    Focus(usize),
    /// Emitted after an accepted change, carrying the next state.
    Changed(AccordionState),
}

/// Construction options for an [`Accordion`].
///
/// All fields have defaults; chain the `with_*` setters to override them.
pub struct AccordionOptions {
    /// Allow several items open at once (default: `false`).
    pub multiple: bool,
    /// Item opened at creation in single mode (default: none).
    pub initial_item: Option<usize>,
    /// Starting state for an uncontrolled accordion.
    pub initial_state: Option<AccordionState>,
    /// Externally owned state; makes the accordion controlled for its lifetime.
    pub state: Option<AccordionState>,
    /// Called with the next state after every accepted change.
    pub on_change: Option<ChangeCallback>,
    /// Open/close animation length (default: 200ms).
    pub transition_duration: Duration,
    /// Header icon glyph (default: `"▸"`).
    pub icon: Option<String>,
    /// Keep the closed icon while an item is open (default: `false`).
    pub disable_icon_rotation: bool,
    /// Header side the icon is drawn on (default: left).
    pub icon_position: IconPosition,
    /// Base id for the accordion and its items (default: generated).
    pub id: Option<String>,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        Self {
            multiple: false,
            initial_item: None,
            initial_state: None,
            state: None,
            on_change: None,
            transition_duration: Duration::from_millis(200),
            icon: None,
            disable_icon_rotation: false,
            icon_position: IconPosition::Left,
            id: None,
        }
    }
}

impl AccordionOptions {
    /// Allow several items to be open at once.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Open the item at `index` at creation (single mode only).
    pub fn with_initial_item(mut self, index: usize) -> Self {
        self.initial_item = Some(index);
        self
    }

    /// Start from the given state.
    pub fn with_initial_state(mut self, state: AccordionState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Make the accordion controlled, starting from `state`.
    pub fn with_state(mut self, state: AccordionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Call `on_change` with the next state after every accepted change.
    pub fn with_on_change(
        mut self,
        on_change: impl FnMut(&AccordionState) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Set the open/close animation length. `Duration::ZERO` disables it.
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Use a custom header icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Keep the closed icon while an item is open.
    pub fn with_disable_icon_rotation(mut self, disable: bool) -> Self {
        self.disable_icon_rotation = disable;
        self
    }

    /// Draw the icon on the given side of the header.
    pub fn with_icon_position(mut self, position: IconPosition) -> Self {
        self.icon_position = position;
        self
    }

    /// Use an explicit base id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Focus handle for one item's header.
///
/// The accordion owns these; its navigator only holds weak references.
#[derive(Debug)]
pub struct ItemControl {
    index: usize,
    cursor: Arc<FocusCursor>,
}

impl ItemControl {
    /// The item this control belongs to.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Focusable for ItemControl {
    fn focus(&self) {
        self.cursor.set(self.index);
    }
}

/// A vertical stack of collapsible panels.
pub struct Accordion {
    id: String,
    items: Vec<AccordionItem>,
    engine: StateEngine,
    navigator: FocusNavigator<ItemControl>,
    controls: Vec<Arc<ItemControl>>,
    cursor: Arc<FocusCursor>,
    transitions: Vec<Transition>,
    transition_duration: Duration,
    icon: String,
    icon_position: IconPosition,
    disable_icon_rotation: bool,
    focus: bool,
    style: AccordionStyle,
    key_bindings: AccordionKeyBindings,
    renderer: Box<dyn PanelRenderer>,
    block: Option<Block<'static>>,
}

impl Accordion {
    /// Create an accordion over `items`.
    ///
    /// Fails when the options are inconsistent: `initial_item` with
    /// `multiple`, a supplied state of the wrong shape, or a supplied state
    /// naming a missing item.
    pub fn new(
        items: Vec<AccordionItem>,
        options: AccordionOptions,
    ) -> Result<Self, AccordionError> {
        let AccordionOptions {
            multiple,
            initial_item,
            initial_state,
            state,
            on_change,
            transition_duration,
            icon,
            disable_icon_rotation,
            icon_position,
            id,
        } = options;

        let mut engine = StateEngine::new(EngineOptions {
            multiple,
            items_count: items.len(),
            initial_item,
            initial_state,
            state,
        })?;
        engine.set_on_change(on_change);

        let mut accordion = Self {
            id: id::resolve_id(id.as_deref()),
            items: Vec::new(),
            engine,
            navigator: FocusNavigator::new(),
            controls: Vec::new(),
            cursor: Arc::new(FocusCursor::new()),
            transitions: Vec::new(),
            transition_duration,
            icon: icon.unwrap_or_else(|| "▸".to_string()),
            icon_position,
            disable_icon_rotation,
            focus: false,
            style: AccordionStyle::default(),
            key_bindings: AccordionKeyBindings::default(),
            renderer: Box::new(DefaultPanel),
            block: None,
        };
        accordion.mount(items.len());
        accordion.items = items;
        tracing::debug!(
            id = %accordion.id,
            items = accordion.items.len(),
            multiple,
            controlled = accordion.engine.is_controlled(),
            "accordion created"
        );
        Ok(accordion)
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: AccordionStyle) -> Self {
        self.style = style;
        self
    }

    /// Set custom key bindings.
    pub fn with_key_bindings(mut self, bindings: AccordionKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Draw items with a custom renderer.
    pub fn with_renderer(mut self, renderer: impl PanelRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Wrap the accordion in a block (border/title).
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Give the accordion keyboard focus.
    ///
    /// The first header is focused if no header held focus before.
    pub fn focus(&mut self) {
        self.focus = true;
        if self.cursor.get().is_none() {
            self.navigator.move_first();
        }
    }

    /// Remove keyboard focus. The focused header is remembered.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The accordion's base id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The id of the item at `index`.
    pub fn item_id(&self, index: usize) -> String {
        id::item_id(&self.id, index)
    }

    /// The current items.
    pub fn items(&self) -> &[AccordionItem] {
        &self.items
    }

    /// The current open state.
    pub fn state(&self) -> &AccordionState {
        self.engine.state()
    }

    /// Whether the item at `index` is open.
    pub fn is_open(&self, index: usize) -> bool {
        self.engine.is_open(index)
    }

    /// Whether the open state is owned by the parent.
    pub fn is_controlled(&self) -> bool {
        self.engine.is_controlled()
    }

    /// Index of the header holding keyboard focus.
    pub fn focused_item(&self) -> Option<usize> {
        self.cursor.get()
    }

    /// The key bindings in use.
    pub fn key_bindings(&self) -> &AccordionKeyBindings {
        &self.key_bindings
    }

    /// Whether any open/close transition is still running at `now`.
    ///
    /// Hosts should keep redrawing while this is true.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transitions.iter().any(|t| t.is_running(now))
    }

    /// Open or close the item at `index`.
    pub fn toggle(&mut self, index: usize) -> Command<Message> {
        let prev = self.engine.state().clone();
        let next = self.engine.toggle(index);
        self.notify(prev, next)
    }

    /// Open the item at `index` if it is closed.
    pub fn open(&mut self, index: usize) -> Command<Message> {
        let prev = self.engine.state().clone();
        let next = self.engine.open(index);
        self.notify(prev, next)
    }

    /// Close the item at `index` if it is open.
    pub fn close(&mut self, index: usize) -> Command<Message> {
        let prev = self.engine.state().clone();
        let next = self.engine.close(index);
        self.notify(prev, next)
    }

    /// Close every item.
    pub fn close_all(&mut self) -> Command<Message> {
        let prev = self.engine.state().clone();
        let next = self.engine.close_all();
        self.notify(prev, next)
    }

    /// Feed the parent-owned state into a controlled accordion.
    pub fn set_state(&mut self, state: AccordionState) -> Result<(), AccordionError> {
        let prev = self.engine.state().clone();
        self.engine.set_state(state)?;
        self.animate_changes(&prev);
        Ok(())
    }

    /// Replace the items.
    ///
    /// When the count changes, open indices (uncontrolled) and focus handles
    /// beyond the new count are dropped, and focus moves to the last item if
    /// it was on a removed one.
    pub fn set_items(&mut self, items: Vec<AccordionItem>) {
        let count = items.len();
        self.items = items;
        if count == self.controls.len() {
            return;
        }
        let prev = self.engine.state().clone();
        self.engine.set_items_count(count);
        self.mount(count);
        self.animate_changes(&prev);
        if self.cursor.get().is_some_and(|i| i >= count) {
            self.cursor.clear();
            self.navigator.move_last();
        }
    }

    /// Focus the header of the item at `index`. Returns whether it exists.
    pub fn focus_item(&mut self, index: usize) -> bool {
        match self.navigator.handle(index) {
            Some(control) => {
                control.focus();
                true
            }
            None => false,
        }
    }

    /// Handle a key press.
    ///
    /// Returns `None` when the key is not an accordion binding or the
    /// accordion is not focused, so the parent can route it elsewhere.
    /// Bound keys are always consumed, even when they have no effect.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command<Message>> {
        if !self.focus {
            return None;
        }
        let action = self.key_bindings.action(&key)?;
        let from = self.cursor.get();
        match action {
            Action::Next => {
                match from {
                    Some(i) => self.navigator.move_next(i),
                    None => self.navigator.move_first(),
                };
            }
            Action::Previous => {
                match from {
                    Some(i) => self.navigator.move_previous(i),
                    None => self.navigator.move_last(),
                };
            }
            Action::First => {
                self.navigator.move_first();
            }
            Action::Last => {
                self.navigator.move_last();
            }
            Action::Toggle => {
                return Some(from.map_or_else(Command::none, |i| self.toggle(i)));
            }
        }
        Some(Command::none())
    }

    /// Register a control for every index below `count` that lacks one and
    /// drop the rest.
    fn mount(&mut self, count: usize) {
        self.navigator.truncate(count);
        self.controls.truncate(count);
        self.transitions.truncate(count);
        for index in self.controls.len()..count {
            let control = Arc::new(ItemControl {
                index,
                cursor: self.cursor.clone(),
            });
            self.navigator.register_handle(index, &control);
            self.controls.push(control);
            self.transitions.push(Transition::new(self.transition_duration));
        }
    }

    fn notify(&mut self, prev: AccordionState, next: Option<AccordionState>) -> Command<Message> {
        match next {
            Some(next) => {
                self.animate_changes(&prev);
                Command::message(Message::Changed(next))
            }
            None => Command::none(),
        }
    }

    fn animate_changes(&mut self, prev: &AccordionState) {
        let now = Instant::now();
        let state = self.engine.state();
        for (index, transition) in self.transitions.iter_mut().enumerate() {
            if prev.contains(index) != state.contains(index) {
                transition.start(now);
            }
        }
    }
}

impl Component for Accordion {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => self.handle_key(key).unwrap_or_else(Command::none),
            Message::Toggle(index) => self.toggle(index),
            Message::Focus(index) => {
                self.focus_item(index);
                Command::none()
            }
            Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            frame.render_widget(block.clone(), area);
            inner
        } else {
            area
        };

        let now = Instant::now();
        let focused = self.cursor.get().filter(|_| self.focus);
        let mut y = inner.y;
        for (index, item) in self.items.iter().enumerate() {
            let remaining = inner.bottom().saturating_sub(y);
            if remaining == 0 {
                break;
            }
            let id = self.item_id(index);
            let props = PanelProps {
                id: &id,
                index,
                opened: self.engine.is_open(index),
                focused: focused == Some(index),
                transition: &self.transitions[index],
                now,
                icon: &self.icon,
                icon_position: self.icon_position,
                disable_icon_rotation: self.disable_icon_rotation,
                style: &self.style,
            };
            let height = self.renderer.height(item, &props, inner.width).min(remaining);
            let panel = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height,
            };
            self.renderer.render(frame, panel, item, &props);
            y += height;
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pleat_core::testing::TestHarness;

    fn items(n: usize) -> Vec<AccordionItem> {
        (0..n)
            .map(|i| AccordionItem::new(format!("Item {i}"), format!("Body {i}")))
            .collect()
    }

    fn options() -> AccordionOptions {
        AccordionOptions::default()
            .with_id("acc")
            .with_transition_duration(Duration::ZERO)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn toggle_emits_changed() {
        let mut acc = Accordion::new(items(3), options()).unwrap();
        let msgs = acc.toggle(1).into_messages();
        assert_eq!(msgs, vec![Message::Changed(AccordionState::Single(Some(1)))]);
        assert!(acc.is_open(1));
    }

    #[test]
    fn out_of_range_toggle_emits_nothing() {
        let mut acc = Accordion::new(items(2), options()).unwrap();
        assert!(acc.toggle(5).is_none());
        assert_eq!(acc.state(), &AccordionState::Single(None));
    }

    #[test]
    fn open_close_and_close_all() {
        let mut acc = Accordion::new(items(3), options().with_multiple(true)).unwrap();
        assert!(!acc.open(0).is_none());
        assert!(acc.open(0).is_none());
        assert!(!acc.open(2).is_none());
        assert!(!acc.close(0).is_none());
        assert_eq!(acc.state(), &AccordionState::Multiple(vec![2]));
        assert!(!acc.close_all().is_none());
        assert!(acc.state().is_empty());
    }

    #[test]
    fn item_ids_derive_from_base() {
        let acc = Accordion::new(items(2), options()).unwrap();
        assert_eq!(acc.id(), "acc");
        assert_eq!(acc.item_id(1), "acc-1");
    }

    #[test]
    fn focus_starts_on_first_header() {
        let mut acc = Accordion::new(items(3), options()).unwrap();
        assert_eq!(acc.focused_item(), None);
        acc.focus();
        assert_eq!(acc.focused_item(), Some(0));
        assert!(acc.focused());
    }

    #[test]
    fn keys_move_focus_with_wrap() {
        let mut acc = Accordion::new(items(3), options()).unwrap();
        acc.focus();
        acc.handle_key(key(KeyCode::Up));
        assert_eq!(acc.focused_item(), Some(2));
        acc.handle_key(key(KeyCode::Down));
        assert_eq!(acc.focused_item(), Some(0));
        acc.handle_key(key(KeyCode::Char('j')));
        assert_eq!(acc.focused_item(), Some(1));
        acc.handle_key(key(KeyCode::End));
        assert_eq!(acc.focused_item(), Some(2));
        acc.handle_key(key(KeyCode::Home));
        assert_eq!(acc.focused_item(), Some(0));
    }

    #[test]
    fn bound_keys_are_consumed_others_pass_through() {
        let mut acc = Accordion::new(items(2), options()).unwrap();
        assert!(acc.handle_key(key(KeyCode::Down)).is_none(), "unfocused");
        acc.focus();
        assert!(acc.handle_key(key(KeyCode::Down)).is_some());
        assert!(acc.handle_key(key(KeyCode::Char('x'))).is_none());
    }

    #[test]
    fn enter_toggles_focused_item() {
        let mut h = TestHarness::new(Accordion::new(items(3), options()).unwrap());
        h.component_mut().focus();
        h.send(Message::KeyPress(key(KeyCode::Down)));
        h.send(Message::KeyPress(key(KeyCode::Enter)));
        assert!(h.component().is_open(1));
        assert_eq!(
            h.take_notifications(),
            vec![Message::Changed(AccordionState::Single(Some(1)))]
        );
    }

    #[test]
    fn focus_message_targets_item() {
        let mut acc = Accordion::new(items(3), options()).unwrap();
        acc.update(Message::Focus(2));
        assert_eq!(acc.focused_item(), Some(2));
        assert!(!acc.focus_item(7));
        assert_eq!(acc.focused_item(), Some(2));
    }

    #[test]
    fn shrinking_items_drops_state_handles_and_focus() {
        let mut acc = Accordion::new(items(4), options().with_multiple(true)).unwrap();
        acc.toggle(1);
        acc.toggle(3);
        acc.focus_item(3);
        acc.set_items(items(2));
        assert_eq!(acc.state(), &AccordionState::Multiple(vec![1]));
        assert_eq!(acc.focused_item(), Some(1));
        assert!(acc.navigator.handle(2).is_none());
        assert!(acc.navigator.handle(3).is_none());
        assert_eq!(acc.navigator.handle(1).map(|c| c.index()), Some(1));
    }

    #[test]
    fn growing_items_registers_new_handles() {
        let mut acc = Accordion::new(items(1), options()).unwrap();
        acc.set_items(items(3));
        assert!(acc.focus_item(2));
        assert!(!acc.toggle(2).is_none());
    }

    #[test]
    fn view_shows_open_bodies_only() {
        let mut h = TestHarness::new(
            Accordion::new(items(3), options().with_initial_item(1)).unwrap(),
        );
        let out = h.render_string(20, 5);
        assert!(out.contains("▸ Item 0"));
        assert!(out.contains("▾ Item 1"));
        assert!(out.contains("Body 1"));
        assert!(!out.contains("Body 0"));

        h.send(Message::Toggle(1));
        let out = h.render_string(20, 5);
        assert!(!out.contains("Body 1"));
        assert!(out.contains("▸ Item 1"));
    }

    #[test]
    fn view_respects_icon_options() {
        let h = TestHarness::new(
            Accordion::new(
                items(1),
                options()
                    .with_initial_item(0)
                    .with_icon("+")
                    .with_icon_position(IconPosition::Right),
            )
            .unwrap(),
        );
        let out = h.render_string(10, 2);
        assert!(out.starts_with("Item 0   -"), "got {out:?}");
    }

    #[test]
    fn running_transition_reports_animating() {
        let mut acc = Accordion::new(
            items(2),
            AccordionOptions::default().with_transition_duration(Duration::from_secs(60)),
        )
        .unwrap();
        assert!(!acc.is_animating(Instant::now()));
        acc.toggle(0);
        assert!(acc.is_animating(Instant::now()));
    }
}
