//! Undo history for the DP fill.
//!
//! Two interchangeable strategies with identical observable behaviour:
//! - [`HistoryMode::Snapshots`]: a deep copy of the whole table after every
//!   step (entry 0 is the initial zero table). Simple, O(steps x cells).
//! - [`HistoryMode::Reversible`]: only the overwritten cell and its previous
//!   value per step. O(steps).
//!
//! Both report `len() == fill_step + 1`, and both discard any entries beyond
//! the current position before recording a new step.

use serde::{Deserialize, Serialize};

use crate::table::{Cell, DpTable};

/// How the fill history is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    #[default]
    Snapshots,
    Reversible,
}

/// One overwritten cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellWrite {
    cell: Cell,
    previous: u64,
}

#[derive(Debug, Clone)]
pub(crate) enum History {
    Snapshots(Vec<DpTable>),
    Reversible(Vec<CellWrite>),
}

impl History {
    pub(crate) fn new(mode: HistoryMode, initial: &DpTable) -> Self {
        match mode {
            HistoryMode::Snapshots => History::Snapshots(vec![initial.clone()]),
            HistoryMode::Reversible => History::Reversible(Vec::new()),
        }
    }

    pub(crate) fn mode(&self) -> HistoryMode {
        match self {
            History::Snapshots(_) => HistoryMode::Snapshots,
            History::Reversible(_) => HistoryMode::Reversible,
        }
    }

    /// Number of recorded states, counting the initial one.
    pub(crate) fn len(&self) -> usize {
        match self {
            History::Snapshots(snaps) => snaps.len(),
            History::Reversible(log) => log.len() + 1,
        }
    }

    /// Record the step that moved the fill from `position` to `position + 1`.
    ///
    /// `table` is the state after the write and `previous` the value the
    /// write replaced.
    pub(crate) fn record(&mut self, position: usize, table: &DpTable, cell: Cell, previous: u64) {
        match self {
            History::Snapshots(snaps) => {
                snaps.truncate(position + 1);
                snaps.push(table.clone());
            }
            History::Reversible(log) => {
                log.truncate(position);
                log.push(CellWrite { cell, previous });
            }
        }
        debug_assert_eq!(self.len(), position + 2);
    }

    /// Drop the latest state and restore `table` to the one before it.
    ///
    /// Returns `false` (and leaves `table` alone) when only the initial
    /// state remains.
    pub(crate) fn rewind(&mut self, table: &mut DpTable) -> bool {
        match self {
            History::Snapshots(snaps) => {
                if snaps.len() <= 1 {
                    return false;
                }
                snaps.pop();
                if let Some(prev) = snaps.last() {
                    table.clone_from(prev);
                }
                true
            }
            History::Reversible(log) => match log.pop() {
                Some(write) => {
                    table.set(write.cell, write.previous);
                    true
                }
                None => false,
            },
        }
    }

    /// Approximate number of table values held, for memory comparisons.
    pub(crate) fn stored_values(&self) -> usize {
        match self {
            History::Snapshots(snaps) => snaps.iter().map(|t| t.rows() * t.cols()).sum(),
            History::Reversible(log) => log.len(),
        }
    }
}
