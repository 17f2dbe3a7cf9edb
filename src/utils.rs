//! Assorted helpers shared by the steppers.

use crate::algorithms::zero_one::evaluate;
use crate::model::Item;
use crate::table::{Cell, DpTable};

/// Value per unit weight; 0 for weightless items.
#[inline]
pub fn ratio(value: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        value / weight
    } else {
        0.0
    }
}

/// Fill the whole 0/1 table directly, row by row, without history.
///
/// Uses the same recurrence as the stepper, so replaying every step of a
/// [`DpStepper`](crate::algorithms::zero_one::DpStepper) must reproduce this
/// table exactly. With the `parallel` feature each row's cells are computed
/// concurrently; they only read the row above.
pub fn full_table(items: &[Item], capacity: usize) -> DpTable {
    let mut table = DpTable::zeroed(items.len(), capacity);
    for (k, item) in items.iter().enumerate() {
        let row = fill_row(&table, item, k + 1);
        table.row_mut(k + 1).copy_from_slice(&row);
    }
    table
}

#[cfg(feature = "parallel")]
fn fill_row(table: &DpTable, item: &Item, row: usize) -> Vec<u64> {
    use rayon::prelude::*;
    (0..table.cols())
        .into_par_iter()
        .map(|col| evaluate(table, item, Cell::new(row, col)).1)
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn fill_row(table: &DpTable, item: &Item, row: usize) -> Vec<u64> {
    (0..table.cols())
        .map(|col| evaluate(table, item, Cell::new(row, col)).1)
        .collect()
}
