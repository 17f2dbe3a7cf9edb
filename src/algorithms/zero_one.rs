//! 0/1 knapsack DP table, filled one cell per step.
//!
//! `dp[i][w]` is the best value achievable with the first `i` items and
//! capacity `w`:
//!
//! ```text
//! dp[0][w] = 0
//! dp[i][w] = dp[i-1][w]                                      if weight(i) > w
//!          = max(dp[i-1][w], dp[i-1][w - weight(i)] + value(i)) otherwise
//! ```
//!
//! Row 0 is free. The stepper computes the remaining `n * (W + 1)` cells in
//! row-major order, reading only row `i - 1`, and records every step in a
//! [`History`] so it can step backward exactly.

use serde::{Deserialize, Serialize};

use crate::error::Refusal;
use crate::history::{History, HistoryMode};
use crate::model::Item;
use crate::table::{Cell, CellFlags, Dependencies, DpTable};
use crate::traits::Steppable;

/// How a cell's value was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// The item is heavier than the column capacity; the value is copied
    /// from the cell above.
    TooHeavy { up: u64 },
    /// Skip (`up`) versus take (`diag + value`). `took` is true only when
    /// taking is strictly better, so a tie reports a skip. This is stricter
    /// than a `take >= skip` explanation would be, and matches the
    /// backtracker, which reads an unchanged value as "not chosen".
    Compare {
        skip: u64,
        diag: u64,
        take: u64,
        took: bool,
    },
}

/// Record of one forward fill step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillStep {
    /// Fill index of this step (0-based).
    pub step: usize,
    pub cell: Cell,
    /// 0-based index of the item considered on this row.
    pub item_index: usize,
    pub transition: Transition,
    pub value: u64,
}

/// Apply the recurrence for `cell` reading only `table`'s previous row.
pub(crate) fn evaluate(table: &DpTable, item: &Item, cell: Cell) -> (Transition, u64) {
    debug_assert!(cell.row >= 1, "row 0 is the base case");
    let up = table.get(Cell::new(cell.row - 1, cell.col));
    if item.weight > cell.col {
        return (Transition::TooHeavy { up }, up);
    }
    let diag = table.get(Cell::new(cell.row - 1, cell.col - item.weight));
    let take = diag.saturating_add(item.value);
    let took = take > up;
    let value = if took { take } else { up };
    (
        Transition::Compare {
            skip: up,
            diag,
            take,
            took,
        },
        value,
    )
}

/// Stepwise DP fill with undo.
#[derive(Debug, Clone)]
pub struct DpStepper {
    items: Vec<Item>,
    capacity: usize,
    table: DpTable,
    fill_step: usize,
    history: History,
}

impl DpStepper {
    /// Fresh zero table, empty history, `fill_step = 0`.
    pub fn new(items: Vec<Item>, capacity: usize) -> Self {
        Self::with_history(items, capacity, HistoryMode::default())
    }

    pub fn with_history(items: Vec<Item>, capacity: usize, mode: HistoryMode) -> Self {
        let table = DpTable::zeroed(items.len(), capacity);
        let history = History::new(mode, &table);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            items = items.len(),
            capacity,
            ?mode,
            "dp stepper initialized"
        );
        Self {
            items,
            capacity,
            table,
            fill_step: 0,
            history,
        }
    }

    /// Discard all progress and start over with new inputs.
    pub fn initialize(&mut self, items: Vec<Item>, capacity: usize) {
        let mode = self.history.mode();
        *self = Self::with_history(items, capacity, mode);
    }

    /// Return to step 0 with the same inputs.
    pub fn reset(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.initialize(items, self.capacity);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn table(&self) -> &DpTable {
        &self.table
    }

    pub fn fill_step(&self) -> usize {
        self.fill_step
    }

    /// `n * (W + 1)`.
    pub fn total_steps(&self) -> usize {
        self.table.fillable_cells()
    }

    pub fn is_complete(&self) -> bool {
        self.fill_step == self.total_steps()
    }

    pub fn history_mode(&self) -> HistoryMode {
        self.history.mode()
    }

    /// Always `fill_step() + 1`.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Table values held by the history.
    pub fn history_footprint(&self) -> usize {
        self.history.stored_values()
    }

    /// Cell computed by the next forward step, if any.
    pub fn next_cell(&self) -> Option<Cell> {
        if self.is_complete() {
            None
        } else {
            Some(Cell::from_fill_index(self.fill_step, self.table.cols()))
        }
    }

    /// Cells the recurrence reads for `cell` (row >= 1).
    pub fn dependencies(&self, cell: Cell) -> Option<Dependencies> {
        if cell.row == 0 || cell.row >= self.table.rows() || cell.col >= self.table.cols() {
            return None;
        }
        let weight = self.items[cell.row - 1].weight;
        Some(Dependencies {
            up: Cell::new(cell.row - 1, cell.col),
            diag: (weight <= cell.col).then(|| Cell::new(cell.row - 1, cell.col - weight)),
        })
    }

    /// Render flags for `cell` at the current fill position.
    pub fn cell_flags(&self, cell: Cell) -> CellFlags {
        let filled = match cell.fill_index(self.table.cols()) {
            None => true,
            Some(k) => k < self.fill_step,
        };
        let next = self.next_cell();
        let dependency = next
            .and_then(|c| self.dependencies(c))
            .is_some_and(|d| d.contains(cell));
        CellFlags {
            filled,
            current: next == Some(cell),
            dependency,
        }
    }

    /// Record of an already applied step `k`, rebuilt from the table.
    ///
    /// A filled cell only reads the row above it, which no later step in
    /// the fill order rewrites, so this equals what `step_forward` returned.
    pub fn filled_step(&self, k: usize) -> Option<FillStep> {
        if k >= self.fill_step {
            return None;
        }
        let cell = Cell::from_fill_index(k, self.table.cols());
        let item_index = cell.row - 1;
        let (transition, value) = evaluate(&self.table, &self.items[item_index], cell);
        Some(FillStep {
            step: k,
            cell,
            item_index,
            transition,
            value,
        })
    }

    /// Value of the full optimum, once complete.
    pub fn optimum(&self) -> Option<u64> {
        self.is_complete().then(|| self.table.optimum())
    }
}

impl Steppable for DpStepper {
    type Step = FillStep;

    fn cursor(&self) -> usize {
        self.fill_step
    }

    fn total_steps(&self) -> usize {
        DpStepper::total_steps(self)
    }

    fn step_forward(&mut self) -> Result<FillStep, Refusal> {
        let Some(cell) = self.next_cell() else {
            return Err(Refusal::AtEnd);
        };
        let item_index = cell.row - 1;
        let (transition, value) = evaluate(&self.table, &self.items[item_index], cell);
        let previous = self.table.get(cell);
        self.table.set(cell, value);
        self.history
            .record(self.fill_step, &self.table, cell, previous);
        let step = self.fill_step;
        self.fill_step += 1;
        debug_assert_eq!(self.history.len(), self.fill_step + 1);

        #[cfg(feature = "tracing")]
        tracing::trace!(step, row = cell.row, col = cell.col, value, "fill step");

        Ok(FillStep {
            step,
            cell,
            item_index,
            transition,
            value,
        })
    }

    fn step_backward(&mut self) -> Result<usize, Refusal> {
        if self.fill_step == 0 {
            return Err(Refusal::AtStart);
        }
        let rewound = self.history.rewind(&mut self.table);
        assert!(rewound, "history shorter than fill progress");
        self.fill_step -= 1;
        debug_assert_eq!(self.history.len(), self.fill_step + 1);

        #[cfg(feature = "tracing")]
        tracing::trace!(step = self.fill_step, "fill undo");

        Ok(self.fill_step)
    }
}
