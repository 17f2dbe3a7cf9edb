//! Reconstruction of the optimal 0/1 subset as a replayable sequence.
//!
//! Starting at `(n, W)`, each row `i` compares `dp[i][w]` with `dp[i-1][w]`:
//! equal means item `i` was skipped, different means it was taken and the
//! tracked capacity drops by its weight. The whole sequence is derived once
//! from the completed table; stepping only moves a cursor over it and keeps
//! the chosen set in sync.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::algorithms::zero_one::DpStepper;
use crate::error::Refusal;
use crate::model::Item;
use crate::table::{Cell, DpTable};
use crate::traits::Steppable;

/// One inclusion/exclusion decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// DP row `i` (1-based).
    pub row: usize,
    /// Tracked capacity `w` when the decision was made.
    pub capacity: usize,
    pub chosen: bool,
    /// 0-based item index, `row - 1`.
    pub item_index: usize,
}

impl Decision {
    /// Cell the decision reads.
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.capacity)
    }
}

/// Derive the decision sequence from a completed table, rows `n` down to 1.
///
/// # Panics
/// Panics if `table` is not a valid 0/1 table for `items` (a taken item
/// heavier than the tracked capacity).
pub fn decisions(table: &DpTable, items: &[Item]) -> Vec<Decision> {
    assert_eq!(table.rows(), items.len() + 1, "table/items mismatch");
    let mut w = table.cols() - 1;
    let mut out = Vec::with_capacity(items.len());
    for row in (1..table.rows()).rev() {
        let here = table.get(Cell::new(row, w));
        let above = table.get(Cell::new(row - 1, w));
        let chosen = here != above;
        out.push(Decision {
            row,
            capacity: w,
            chosen,
            item_index: row - 1,
        });
        if chosen {
            let weight = items[row - 1].weight;
            assert!(
                weight <= w,
                "item {} (weight {weight}) taken at capacity {w}",
                row - 1
            );
            w -= weight;
        }
    }
    out
}

/// Cursor over the decision sequence plus the derived chosen set.
#[derive(Debug, Clone)]
pub struct Backtracker {
    items: Vec<Item>,
    optimum: u64,
    sequence: Vec<Decision>,
    index: usize,
    chosen: BTreeSet<usize>,
}

impl Backtracker {
    /// Build from a completed fill. Refuses with
    /// [`Refusal::DpIncomplete`] otherwise.
    pub fn start(fill: &DpStepper) -> Result<Self, Refusal> {
        if !fill.is_complete() {
            return Err(Refusal::DpIncomplete {
                filled: fill.fill_step(),
                total: fill.total_steps(),
            });
        }
        let sequence = decisions(fill.table(), fill.items());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            decisions = sequence.len(),
            taken = sequence.iter().filter(|d| d.chosen).count(),
            "backtrack started"
        );
        Ok(Self {
            items: fill.items().to_vec(),
            optimum: fill.table().optimum(),
            sequence,
            index: 0,
            chosen: BTreeSet::new(),
        })
    }

    pub fn sequence(&self) -> &[Decision] {
        &self.sequence
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Item indices confirmed so far.
    pub fn chosen(&self) -> &BTreeSet<usize> {
        &self.chosen
    }

    /// Decision the next forward step applies.
    pub fn current(&self) -> Option<&Decision> {
        self.sequence.get(self.index)
    }

    /// `dp[n][W]` of the table this sequence came from.
    pub fn optimum(&self) -> u64 {
        self.optimum
    }

    pub fn chosen_weight(&self) -> usize {
        self.chosen.iter().map(|&k| self.items[k].weight).sum()
    }

    /// Saturates at `u64::MAX`, like the table cells.
    pub fn chosen_value(&self) -> u64 {
        self.chosen
            .iter()
            .fold(0u64, |acc, &k| acc.saturating_add(self.items[k].value))
    }

    pub fn chosen_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.chosen.iter().map(|&k| &self.items[k])
    }
}

impl Steppable for Backtracker {
    type Step = Decision;

    fn cursor(&self) -> usize {
        self.index
    }

    fn total_steps(&self) -> usize {
        self.sequence.len()
    }

    fn step_forward(&mut self) -> Result<Decision, Refusal> {
        let decision = *self.sequence.get(self.index).ok_or(Refusal::AtEnd)?;
        if decision.chosen {
            let inserted = self.chosen.insert(decision.item_index);
            debug_assert!(inserted, "item chosen twice");
        }
        self.index += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            row = decision.row,
            capacity = decision.capacity,
            chosen = decision.chosen,
            "backtrack step"
        );
        Ok(decision)
    }

    fn step_backward(&mut self) -> Result<usize, Refusal> {
        if self.index == 0 {
            return Err(Refusal::AtStart);
        }
        let decision = self.sequence[self.index - 1];
        if decision.chosen {
            let removed = self.chosen.remove(&decision.item_index);
            debug_assert!(removed, "undoing an item that was not chosen");
        }
        self.index -= 1;
        Ok(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_fill() -> DpStepper {
        let mut s = DpStepper::new(
            vec![
                Item::new("A", 6, 2),
                Item::new("B", 10, 4),
                Item::new("C", 12, 6),
            ],
            10,
        );
        s.run_to_end();
        s
    }

    #[test]
    fn refuses_incomplete_table() {
        let mut s = demo_fill();
        s.step_backward().unwrap();
        assert_eq!(
            Backtracker::start(&s).unwrap_err(),
            Refusal::DpIncomplete {
                filled: 32,
                total: 33
            }
        );
    }

    #[test]
    fn demo_sequence_picks_b_and_c() {
        let b = Backtracker::start(&demo_fill()).unwrap();
        let seq = b.sequence();
        assert_eq!(seq.len(), 3);
        assert_eq!(
            seq[0],
            Decision {
                row: 3,
                capacity: 10,
                chosen: true,
                item_index: 2
            }
        );
        assert_eq!(
            seq[1],
            Decision {
                row: 2,
                capacity: 4,
                chosen: true,
                item_index: 1
            }
        );
        assert_eq!(
            seq[2],
            Decision {
                row: 1,
                capacity: 0,
                chosen: false,
                item_index: 0
            }
        );
    }

    #[test]
    fn stepping_keeps_chosen_set_in_sync() {
        let mut b = Backtracker::start(&demo_fill()).unwrap();
        assert_eq!(b.step_backward(), Err(Refusal::AtStart));
        b.step_forward().unwrap();
        assert_eq!(b.chosen().iter().copied().collect::<Vec<_>>(), vec![2]);
        b.run_to_end();
        assert_eq!(b.step_forward(), Err(Refusal::AtEnd));
        assert_eq!(b.chosen().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(b.chosen_weight(), 10);
        assert_eq!(b.chosen_value(), 22);
        assert_eq!(b.chosen_value(), b.optimum());
        b.step_backward().unwrap();
        b.step_backward().unwrap();
        assert_eq!(b.chosen().len(), 1);
        b.rewind();
        assert!(b.chosen().is_empty());
        assert_eq!(b.current().map(Decision::cell), Some(Cell::new(3, 10)));
    }

    #[test]
    fn empty_inventory_has_empty_sequence() {
        let s = DpStepper::new(Vec::new(), 5);
        let b = Backtracker::start(&s).unwrap();
        assert!(b.sequence().is_empty());
        assert!(b.is_finished());
        assert!(b.chosen().is_empty());
    }
}
