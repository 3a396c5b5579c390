//! Open/close state engine for accordion items.
//!
//! [`StateEngine`] tracks which item indices are open and applies toggle
//! requests under one of two mutual-exclusion policies:
//!
//! * **single** -- at most one item is open; opening another closes it.
//! * **multiple** -- any subset of items may be open.
//!
//! The engine also bridges the two ownership regimes a widget can run
//! under.  An *uncontrolled* engine stores its own state.  A *controlled*
//! engine only echoes the state its owner last supplied: toggles compute
//! the next state and report it through the change callback, but nothing
//! changes until the owner feeds it back with [`StateEngine::set_state`].
//! The regime is chosen once at construction and never switches.

use crate::error::AccordionError;

/// The observable set of open items.
///
/// The variant is fixed by the accordion's mode for the lifetime of an
/// instance: single-mode accordions always report [`AccordionState::Single`],
/// multiple-mode accordions always report [`AccordionState::Multiple`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccordionState {
    /// The open item, or `None` when every item is closed.
    Single(Option<usize>),
    /// Open items in the order they were opened.
    Multiple(Vec<usize>),
}

impl AccordionState {
    /// The empty state for the given mode.
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            AccordionState::Multiple(Vec::new())
        } else {
            AccordionState::Single(None)
        }
    }

    /// Whether this state has the multiple-mode shape.
    pub fn is_multiple(&self) -> bool {
        matches!(self, AccordionState::Multiple(_))
    }

    /// Whether the item at `index` is open.
    pub fn contains(&self, index: usize) -> bool {
        match self {
            AccordionState::Single(open) => *open == Some(index),
            AccordionState::Multiple(open) => open.contains(&index),
        }
    }

    /// Open indices, in opening order.
    pub fn open_indices(&self) -> Vec<usize> {
        match self {
            AccordionState::Single(open) => open.iter().copied().collect(),
            AccordionState::Multiple(open) => open.clone(),
        }
    }

    /// Whether no item is open.
    pub fn is_empty(&self) -> bool {
        match self {
            AccordionState::Single(open) => open.is_none(),
            AccordionState::Multiple(open) => open.is_empty(),
        }
    }

    /// The state that results from toggling `index`.
    ///
    /// In multiple mode `index` is removed if present and appended
    /// otherwise.  In single mode toggling the open item closes it, and
    /// toggling any other item replaces the open one in a single step.
    pub fn toggled(&self, index: usize) -> Self {
        match self {
            AccordionState::Single(open) if *open == Some(index) => AccordionState::Single(None),
            AccordionState::Single(_) => AccordionState::Single(Some(index)),
            AccordionState::Multiple(open) => {
                let mut next: Vec<usize> = open.iter().copied().filter(|&i| i != index).collect();
                if next.len() == open.len() {
                    next.push(index);
                }
                AccordionState::Multiple(next)
            }
        }
    }

    /// Drop every open index `>= count`.
    pub fn pruned(&self, count: usize) -> Self {
        match self {
            AccordionState::Single(open) => AccordionState::Single(open.filter(|&i| i < count)),
            AccordionState::Multiple(open) => {
                AccordionState::Multiple(open.iter().copied().filter(|&i| i < count).collect())
            }
        }
    }

    fn highest(&self) -> Option<usize> {
        match self {
            AccordionState::Single(open) => *open,
            AccordionState::Multiple(open) => open.iter().copied().max(),
        }
    }

    fn shape(&self) -> &'static str {
        if self.is_multiple() {
            "multiple"
        } else {
            "single"
        }
    }

    fn mode_name(multiple: bool) -> &'static str {
        if multiple {
            "multiple"
        } else {
            "single"
        }
    }
}

impl Default for AccordionState {
    fn default() -> Self {
        AccordionState::Single(None)
    }
}

/// Callback invoked with the next state after every accepted change.
pub type ChangeCallback = Box<dyn FnMut(&AccordionState) + Send>;

/// Construction inputs for a [`StateEngine`].
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Allow several items open at once. Fixed for the engine's lifetime.
    pub multiple: bool,
    /// Number of items currently managed.
    pub items_count: usize,
    /// Item to open at creation (single mode only). Ignored when out of range.
    pub initial_item: Option<usize>,
    /// Starting state for an uncontrolled engine; takes precedence over `initial_item`.
    pub initial_state: Option<AccordionState>,
    /// Externally owned state. Its presence makes the engine controlled.
    pub state: Option<AccordionState>,
}

/// Who owns the open set.
enum StateOwner {
    /// The engine stores and mutates the state itself.
    SelfOwned(AccordionState),
    /// The last value supplied by the owner; never written by the engine.
    ExternallyOwned(AccordionState),
}

/// Tracks and changes which accordion items are open.
pub struct StateEngine {
    multiple: bool,
    items_count: usize,
    owner: StateOwner,
    on_change: Option<ChangeCallback>,
}

impl StateEngine {
    /// Build an engine, validating that every supplied state matches the
    /// mode and only references existing items.
    pub fn new(options: EngineOptions) -> Result<Self, AccordionError> {
        let EngineOptions {
            multiple,
            items_count,
            initial_item,
            initial_state,
            state,
        } = options;

        if multiple && initial_item.is_some() {
            return Err(AccordionError::ModeMismatch);
        }

        let owner = if let Some(state) = state {
            validate(&state, "state", multiple, items_count)?;
            if initial_state.is_some() || initial_item.is_some() {
                tracing::debug!("controlled accordion ignores initial_state and initial_item");
            }
            StateOwner::ExternallyOwned(state)
        } else if let Some(initial) = initial_state {
            validate(&initial, "initial_state", multiple, items_count)?;
            StateOwner::SelfOwned(initial)
        } else {
            let open = match initial_item {
                Some(i) if i < items_count => Some(i),
                Some(i) => {
                    tracing::debug!(
                        index = i,
                        count = items_count,
                        "initial_item out of range, ignored"
                    );
                    None
                }
                None => None,
            };
            if multiple {
                StateOwner::SelfOwned(AccordionState::Multiple(Vec::new()))
            } else {
                StateOwner::SelfOwned(AccordionState::Single(open))
            }
        };

        Ok(Self {
            multiple,
            items_count,
            owner,
            on_change: None,
        })
    }

    /// Set the callback invoked with the next state after every accepted change.
    pub fn with_on_change(
        mut self,
        on_change: impl FnMut(&AccordionState) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Replace (or clear) the change callback.
    pub fn set_on_change(&mut self, on_change: Option<ChangeCallback>) {
        self.on_change = on_change;
    }

    /// Whether several items may be open at once.
    pub fn multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the state is owned by the caller.
    pub fn is_controlled(&self) -> bool {
        matches!(self.owner, StateOwner::ExternallyOwned(_))
    }

    /// Number of items currently managed.
    pub fn items_count(&self) -> usize {
        self.items_count
    }

    /// The current state. For a controlled engine this is exactly the value
    /// last supplied by the owner.
    pub fn state(&self) -> &AccordionState {
        match &self.owner {
            StateOwner::SelfOwned(state) | StateOwner::ExternallyOwned(state) => state,
        }
    }

    /// Whether the item at `index` is open.
    pub fn is_open(&self, index: usize) -> bool {
        self.state().contains(index)
    }

    /// Toggle the item at `index`.
    ///
    /// Returns the next state, which has also been reported to the change
    /// callback.  An uncontrolled engine stores it; a controlled engine
    /// leaves its visible state untouched.  Returns `None`, without
    /// notifying, when `index` is not a current item.
    ///
    /// The next state never names an item beyond the current count, even
    /// when a controlled owner has not yet caught up with a shrink.
    pub fn toggle(&mut self, index: usize) -> Option<AccordionState> {
        if index >= self.items_count {
            tracing::debug!(
                index,
                count = self.items_count,
                "toggle rejected: index out of range"
            );
            return None;
        }
        let next = self.state().pruned(self.items_count).toggled(index);
        tracing::trace!(index, ?next, controlled = self.is_controlled(), "toggle");
        Some(self.commit(next))
    }

    /// Open the item at `index` if it is closed.
    ///
    /// Returns `None` when the item is already open or out of range.
    pub fn open(&mut self, index: usize) -> Option<AccordionState> {
        if self.is_open(index) {
            return None;
        }
        self.toggle(index)
    }

    /// Close the item at `index` if it is open.
    ///
    /// Returns `None` when the item is already closed or out of range.
    pub fn close(&mut self, index: usize) -> Option<AccordionState> {
        if !self.is_open(index) {
            return None;
        }
        self.toggle(index)
    }

    /// Close every item. Returns `None` when nothing was open.
    pub fn close_all(&mut self) -> Option<AccordionState> {
        if self.state().is_empty() {
            return None;
        }
        Some(self.commit(AccordionState::empty(self.multiple)))
    }

    /// Update the number of items.
    ///
    /// An uncontrolled engine drops open indices that no longer exist,
    /// without notifying.  A controlled engine leaves the owner's state
    /// alone; the owner is expected to supply a fitting one.
    pub fn set_items_count(&mut self, count: usize) {
        self.items_count = count;
        if let StateOwner::SelfOwned(state) = &mut self.owner {
            if state.highest().is_some_and(|i| i >= count) {
                let pruned = state.pruned(count);
                tracing::debug!(count, ?pruned, "pruned open items beyond new count");
                *state = pruned;
            }
        }
    }

    /// Feed a new externally owned state into a controlled engine.
    pub fn set_state(&mut self, state: AccordionState) -> Result<(), AccordionError> {
        validate(&state, "state", self.multiple, self.items_count)?;
        match &mut self.owner {
            StateOwner::ExternallyOwned(current) => {
                *current = state;
                Ok(())
            }
            StateOwner::SelfOwned(_) => Err(AccordionError::NotControlled),
        }
    }

    fn commit(&mut self, next: AccordionState) -> AccordionState {
        if let StateOwner::SelfOwned(state) = &mut self.owner {
            *state = next.clone();
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&next);
        }
        next
    }
}

fn validate(
    state: &AccordionState,
    field: &'static str,
    multiple: bool,
    items_count: usize,
) -> Result<(), AccordionError> {
    if state.is_multiple() != multiple {
        return Err(AccordionError::ShapeMismatch {
            field,
            expected: AccordionState::mode_name(multiple),
            found: state.shape(),
        });
    }
    if let Some(index) = state.highest().filter(|&i| i >= items_count) {
        return Err(AccordionError::OutOfRange {
            index,
            count: items_count,
        });
    }
    if let AccordionState::Multiple(open) = state {
        for (pos, &index) in open.iter().enumerate() {
            if open[..pos].contains(&index) {
                return Err(AccordionError::DuplicateIndex { index });
            }
        }
    }
    Ok(())
}
