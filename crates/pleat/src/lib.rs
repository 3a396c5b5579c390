//! **pleat** -- collapsible accordion panels for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! pleat = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`pleat_core`] are available at the crate root
//!   ([`Component`], [`Command`], [`TerminalEvent`], [`TestHarness`]).
//! * The [`widgets`] module re-exports everything from [`pleat_widgets`]
//!   ([`Accordion`](widgets::Accordion), its options, state engine and
//!   focus navigator).
//! * [`ratatui`] and [`crossterm`] are re-exported so downstream crates do
//!   not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use pleat::widgets::{Accordion, AccordionItem, AccordionOptions};
//! use pleat::{Component, TerminalEvent};
//!
//! let mut faq = Accordion::new(
//!     vec![
//!         AccordionItem::new("Shipping", "Orders ship within two days."),
//!         AccordionItem::new("Returns", "Returns are free for 30 days."),
//!     ],
//!     AccordionOptions::default(),
//! )?;
//! faq.focus();
//!
//! loop {
//!     terminal.draw(|f| faq.view(f, f.area()))?;
//!     if let Some(key) = TerminalEvent::from(crossterm::event::read()?).key_press() {
//!         faq.handle_key(key);
//!     }
//! }
//! ```

pub use pleat_core::*;
pub mod widgets {
    pub use pleat_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
