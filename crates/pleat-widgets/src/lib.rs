//! Accordion widget for the **pleat** component model.
//!
//! [`Accordion`](accordion::Accordion) implements [`pleat_core::Component`], so
//! it can be embedded in any host that drives pleat components and placed
//! freely within [`ratatui`] layouts.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`accordion`] | The accordion component and its options |
//! | [`accordion_state`] | Open/close state engine, single and multiple mode, controlled or not |
//! | [`focus`] | [`FocusNavigator`](focus::FocusNavigator): wraparound focus over weak handles |
//! | [`panel`] | Item descriptors, panel renderer trait, default renderer and transitions |
//! | [`key`] | Remappable key bindings |
//! | [`id`] | Instance and item id generation |
//! | [`error`] | Configuration errors |

pub mod accordion;
pub mod accordion_state;
pub mod error;
pub mod focus;
pub mod id;
pub mod key;
pub mod panel;

pub use accordion::{Accordion, AccordionOptions};
pub use accordion_state::{AccordionState, StateEngine};
pub use error::AccordionError;
pub use panel::{AccordionItem, IconPosition};
