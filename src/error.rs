//! Non-fatal refusals.
//!
//! None of the stepping or editing operations can put an engine into an
//! invalid state. When a call cannot be honoured (stepping past either end,
//! starting a backtrack on an unfinished table, editing a row that does not
//! exist) the operation returns a [`Refusal`] and leaves every piece of state
//! exactly as it was. Callers are free to ignore it and re-read state.

use thiserror::Error;

/// Why an operation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    /// The cursor is already at its last position.
    #[error("already complete: cursor is at the last step")]
    AtEnd,

    /// The cursor is already at position zero.
    #[error("already at the first step")]
    AtStart,

    /// Backtracking needs a fully computed DP table.
    #[error("DP table is incomplete ({filled}/{total} cells)")]
    DpIncomplete { filled: usize, total: usize },

    /// A backtrack command arrived while no backtrack is active.
    #[error("no backtrack in progress")]
    NoBacktrack,

    /// An item edit referenced a row outside the list.
    #[error("no item at index {index} (list has {len})")]
    NoSuchItem { index: usize, len: usize },
}
