//! Core primitives for **pleat** widgets.
//!
//! `pleat-core` provides the small set of traits and types every pleat
//! widget is built from.  Widgets follow the [Elm Architecture]: state is
//! changed only in `update`, drawn only in `view`, and anything the parent
//! needs to know about is returned as a [`Command`] instead of being pushed
//! through a callback.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Reusable widget that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Notifications a component hands back to its parent |
//! | [`TerminalEvent`] | Crossterm events as delivered to components |
//! | [`TestHarness`](testing::TestHarness) | Headless harness for unit-testing a [`Component`] |
//!
//! # Cycle
//!
//! 1. **event** -- The host converts a crossterm event into a component
//!    message (or calls a key handler directly).
//! 2. **update** -- [`Component::update`] mutates state and returns a
//!    [`Command`] carrying notifications.
//! 3. **notify** -- The parent receives the notifications, possibly feeding
//!    new state back into the component.
//! 4. **view** -- The host redraws with [`Component::view`].
//!
//! Every step runs synchronously on the UI thread, so one event fully
//! resolves before the next is processed.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use testing::TestHarness;
