//! Keyboard focus traversal across a dynamically sized list of controls.
//!
//! [`FocusNavigator`] does not own the controls it moves focus between.
//! Each control is registered under its item index as a weak reference and
//! only upgraded for the duration of a lookup, so a control that was dropped
//! by its owner simply counts as absent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

/// Something that can receive keyboard focus.
pub trait Focusable: Send + Sync {
    /// Move focus to this control.
    fn focus(&self);
}

/// Moves focus forward and backward, with wraparound, among registered handles.
pub struct FocusNavigator<H: Focusable + ?Sized = dyn Focusable> {
    handles: Vec<Option<Weak<H>>>,
}

impl<H: Focusable + ?Sized> FocusNavigator<H> {
    /// Create an empty navigator.
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Record (or overwrite) the handle for `index`.
    pub fn register_handle(&mut self, index: usize, handle: &Arc<H>) {
        if self.handles.len() <= index {
            self.handles.resize_with(index + 1, || None);
        }
        self.handles[index] = Some(Arc::downgrade(handle));
    }

    /// Forget the handle for `index`, if any.
    pub fn unregister_handle(&mut self, index: usize) {
        if let Some(slot) = self.handles.get_mut(index) {
            *slot = None;
        }
        while matches!(self.handles.last(), Some(None)) {
            self.handles.pop();
        }
    }

    /// Drop every handle at an index `>= count`.
    pub fn truncate(&mut self, count: usize) {
        if self.handles.len() > count {
            tracing::debug!(from = self.handles.len(), to = count, "truncating focus handles");
            self.handles.truncate(count);
        }
    }

    /// Look up the live handle for `index`.
    pub fn handle(&self, index: usize) -> Option<Arc<H>> {
        self.handles.get(index)?.as_ref()?.upgrade()
    }

    /// Whether no live handle is registered.
    pub fn is_empty(&self) -> bool {
        self.last_index().is_none()
    }

    /// Index of the last live handle.
    pub fn last_index(&self) -> Option<usize> {
        (0..self.handles.len()).rev().find(|&i| self.handle(i).is_some())
    }

    /// Focus the handle after `from`, wrapping to index 0 when there is none.
    ///
    /// Only the immediate neighbour is considered; if it is missing, focus
    /// goes straight to the wraparound target.  Returns the focused index.
    pub fn move_next(&self, from: usize) -> Option<usize> {
        let target = from
            .checked_add(1)
            .filter(|&next| self.handle(next).is_some())
            .or_else(|| self.handle(0).map(|_| 0))?;
        self.focus_at(target)
    }

    /// Focus the handle before `from`, wrapping to the last handle when
    /// there is none.  Returns the focused index.
    pub fn move_previous(&self, from: usize) -> Option<usize> {
        let target = from
            .checked_sub(1)
            .filter(|&prev| self.handle(prev).is_some())
            .or_else(|| self.last_index())?;
        self.focus_at(target)
    }

    /// Focus the handle at index 0, if registered.
    pub fn move_first(&self) -> Option<usize> {
        self.focus_at(0)
    }

    /// Focus the last live handle.
    pub fn move_last(&self) -> Option<usize> {
        self.focus_at(self.last_index()?)
    }

    fn focus_at(&self, index: usize) -> Option<usize> {
        let handle = self.handle(index)?;
        tracing::trace!(index, "moving focus");
        handle.focus();
        Some(index)
    }
}

impl<H: Focusable + ?Sized> Default for FocusNavigator<H> {
    fn default() -> Self {
        Self::new()
    }
}

const NO_FOCUS: usize = usize::MAX;

/// Shared record of which item currently holds focus.
///
/// Item controls write their index here when focused; the widget reads it
/// when routing keys and rendering.
#[derive(Debug)]
pub struct FocusCursor(AtomicUsize);

impl FocusCursor {
    /// A cursor with nothing focused.
    pub fn new() -> Self {
        Self(AtomicUsize::new(NO_FOCUS))
    }

    /// The focused index, if any.
    pub fn get(&self) -> Option<usize> {
        match self.0.load(Ordering::Relaxed) {
            NO_FOCUS => None,
            index => Some(index),
        }
    }

    /// Record `index` as focused.
    pub fn set(&self, index: usize) {
        self.0.store(index, Ordering::Relaxed);
    }

    /// Clear the focused index.
    pub fn clear(&self) {
        self.0.store(NO_FOCUS, Ordering::Relaxed);
    }
}

impl Default for FocusCursor {
    fn default() -> Self {
        Self::new()
    }
}
