use crate::command::Command;
use crate::component::Component;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Component`] without a real terminal.
///
/// `TestHarness` lets you exercise the update/view cycle in a plain
/// `#[test]` function.  Every message a component emits through its returned
/// [`Command`] is recorded as a *notification*, exactly as a parent would
/// receive it, and can be inspected with
/// [`notifications`](TestHarness::notifications) or taken with
/// [`take_notifications`](TestHarness::take_notifications).
///
/// Notifications are never fed back into the component: that is the
/// parent's decision, which is what controlled widgets rely on.
///
/// # Example
///
/// ```rust,ignore
/// use pleat_core::testing::TestHarness;
///
/// let mut h = TestHarness::new(accordion);
/// h.send(accordion::Message::Toggle(1));
/// assert!(h.component().is_open(1));
/// assert_eq!(h.take_notifications().len(), 1);
///
/// let output = h.render_string(40, 6);
/// assert!(output.contains("▾ Second"));
/// ```
pub struct TestHarness<C: Component> {
    component: C,
    notifications: Vec<C::Message>,
}

impl<C: Component> TestHarness<C> {
    /// Wrap a component that has already been constructed.
    pub fn new(component: C) -> Self {
        Self {
            component,
            notifications: Vec::new(),
        }
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.record(cmd);
    }

    /// Call an arbitrary component method that returns a [`Command`] and
    /// record its notifications, e.g. `h.apply(|a| a.handle_key(key))`.
    pub fn apply(&mut self, f: impl FnOnce(&mut C) -> Command<C::Message>) {
        let cmd = f(&mut self.component);
        self.record(cmd);
    }

    /// Get a shared reference to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Get a mutable reference to the component for direct test setup.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Notifications recorded so far, oldest first.
    pub fn notifications(&self) -> &[C::Message] {
        &self.notifications
    }

    /// Take and clear the recorded notifications.
    pub fn take_notifications(&mut self) -> Vec<C::Message> {
        std::mem::take(&mut self.notifications)
    }

    /// Consume the harness and return the component.
    pub fn into_inner(self) -> C {
        self.component
    }

    /// Render the component to a ratatui [`Buffer`] of the given dimensions.
    ///
    /// The component receives the full buffer area.  For a simpler
    /// string-based assertion, see [`render_string`](TestHarness::render_string).
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                self.component.view(frame, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the component and return the visible content as a plain string.
    ///
    /// Each row of the buffer is concatenated into a line; rows are separated
    /// by newlines.  Trailing whitespace within each row is preserved.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &buf[(x, y)];
                output.push_str(cell.symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn record(&mut self, cmd: Command<C::Message>) {
        self.notifications.extend(cmd.into_messages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use ratatui::Frame;

    // A minimal switch that reports every flip to its parent
    struct Switch {
        on: bool,
    }

    #[derive(Debug, PartialEq)]
    enum SwitchMsg {
        Flip,
        Flipped(bool),
    }

    impl Component for Switch {
        type Message = SwitchMsg;

        fn update(&mut self, msg: SwitchMsg) -> Command<SwitchMsg> {
            match msg {
                SwitchMsg::Flip => {
                    self.on = !self.on;
                    Command::message(SwitchMsg::Flipped(self.on))
                }
                SwitchMsg::Flipped(_) => Command::none(),
            }
        }

        fn view(&self, frame: &mut Frame, area: Rect) {
            let text = if self.on { "[on]" } else { "[off]" };
            frame.render_widget(Paragraph::new(text), area);
        }
    }

    #[test]
    fn send_updates_component() {
        let mut h = TestHarness::new(Switch { on: false });
        h.send(SwitchMsg::Flip);
        assert!(h.component().on);
    }

    #[test]
    fn notifications_are_recorded_not_fed_back() {
        let mut h = TestHarness::new(Switch { on: false });
        h.send(SwitchMsg::Flip);
        h.send(SwitchMsg::Flip);
        assert_eq!(
            h.notifications(),
            &[SwitchMsg::Flipped(true), SwitchMsg::Flipped(false)]
        );
        assert!(!h.component().on);
    }

    #[test]
    fn take_notifications_clears() {
        let mut h = TestHarness::new(Switch { on: false });
        h.send(SwitchMsg::Flip);
        assert_eq!(h.take_notifications().len(), 1);
        assert!(h.notifications().is_empty());
    }

    #[test]
    fn apply_records_method_commands() {
        let mut h = TestHarness::new(Switch { on: true });
        h.apply(|s| s.update(SwitchMsg::Flip));
        assert_eq!(h.take_notifications(), vec![SwitchMsg::Flipped(false)]);
    }

    #[test]
    fn render_string_reflects_state() {
        let mut h = TestHarness::new(Switch { on: false });
        assert!(h.render_string(10, 1).contains("[off]"));
        h.send(SwitchMsg::Flip);
        assert!(h.render_string(10, 1).contains("[on]"));
    }
}
