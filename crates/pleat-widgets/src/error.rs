//! Configuration errors surfaced to integrators.

/// Errors raised when an accordion is configured inconsistently.
///
/// Runtime requests that reference a missing item (an out-of-range toggle, a
/// focus move with no target) are not errors; they are declined as no-ops.
/// Only misconfiguration at construction, and feeding state into an instance
/// that does not accept it, is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccordionError {
    /// `initial_item` was supplied to an accordion in multiple mode.
    #[error("initial_item requires single mode; use initial_state with multiple = true")]
    ModeMismatch,

    /// A supplied state has the wrong shape for the accordion's mode.
    #[error("{field} has {found} shape but the accordion is in {expected} mode")]
    ShapeMismatch {
        /// Which input was rejected (`"state"` or `"initial_state"`).
        field: &'static str,
        /// The mode the accordion was built with.
        expected: &'static str,
        /// The shape of the rejected value.
        found: &'static str,
    },

    /// A supplied state references an item that does not exist.
    #[error("index {index} is out of range for {count} items")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The number of items at the time of the check.
        count: usize,
    },

    /// A supplied multiple-mode state names the same item twice.
    #[error("index {index} appears more than once")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },

    /// External state was fed into an accordion that owns its own state.
    #[error("set_state called on an uncontrolled accordion; pass `state` to control it")]
    NotControlled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = AccordionError::ShapeMismatch {
            field: "state",
            expected: "multiple",
            found: "single",
        };
        assert_eq!(
            err.to_string(),
            "state has single shape but the accordion is in multiple mode"
        );
        let err = AccordionError::OutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "index 4 is out of range for 3 items");
        let err = AccordionError::DuplicateIndex { index: 1 };
        assert_eq!(err.to_string(), "index 1 appears more than once");
    }
}
