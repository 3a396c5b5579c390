use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable widget that renders into a given [`Rect`] area.
///
/// A parent decides *where* each child renders by passing it a sub-region
/// of the frame, and routes events to it by wrapping the child's message
/// type in one of its own variants. Notifications flow back up through the
/// returned [`Command`], lifted with [`Command::map`]:
///
/// ```rust,ignore
/// use pleat_core::{Command, Component};
/// use pleat_widgets::accordion::{self, Accordion};
///
/// struct Settings { sections: Accordion }
///
/// enum Msg { Sections(accordion::Message) }
///
/// impl Settings {
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Sections(m) => self.sections.update(m).map(Msg::Sections),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.sections.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] carrying any
    /// notifications for the parent.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// This is a hint for input routing.  A parent can query `focused()` to
    /// decide which child should receive keyboard events.  The default
    /// implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
