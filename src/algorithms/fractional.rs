//! Fractional knapsack as a greedy, steppable plan.
//!
//! Items are ordered by value/weight ratio (descending, stable on ties) and
//! taken whole while they fit; the first item that does not fit is taken
//! fractionally and everything after it is skipped. For divisible items this
//! greedy order is optimal.
//!
//! The plan is a pure function of the items and capacity. Stepping only
//! moves a read cursor; running totals are sums over the applied prefix.

use serde::{Deserialize, Serialize};

use crate::error::Refusal;
use crate::model::FractionalItem;
use crate::traits::Steppable;
use crate::utils::ratio;

/// One row of the greedy plan, in ratio order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Position in the original input.
    pub index: usize,
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub ratio: f64,
    /// 0 when skipped, 1 when taken whole, otherwise `remaining / weight`.
    pub fraction: f64,
    pub taken_weight: f64,
    pub taken_value: f64,
}

/// Render hints for one plan row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFlags {
    pub applied: bool,
    pub current: bool,
}

/// Running totals over the applied prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub used_weight: f64,
    pub total_value: f64,
    pub remaining: f64,
}

/// The full greedy allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyPlan {
    capacity: f64,
    entries: Vec<PlanEntry>,
    total_steps: usize,
}

impl GreedyPlan {
    /// Sort by ratio and allocate `capacity` greedily.
    pub fn compute(items: &[FractionalItem], capacity: f64) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("greedy_plan", items = items.len(), capacity).entered();

        let capacity = crate::model::non_negative(capacity);
        let mut order: Vec<(usize, &FractionalItem, f64)> = items
            .iter()
            .enumerate()
            .map(|(k, it)| (k, it, ratio(it.value, it.weight)))
            .collect();
        // `sort_by` is stable: equal ratios keep input order.
        order.sort_by(|a, b| b.2.total_cmp(&a.2));

        let mut remaining = capacity;
        let entries: Vec<PlanEntry> = order
            .into_iter()
            .map(|(index, it, r)| {
                let (fraction, taken_weight) = if remaining <= 0.0 || it.weight <= 0.0 {
                    (0.0, 0.0)
                } else if it.weight <= remaining {
                    remaining -= it.weight;
                    (1.0, it.weight)
                } else {
                    let f = remaining / it.weight;
                    let w = remaining;
                    remaining = 0.0;
                    (f, w)
                };
                PlanEntry {
                    index,
                    name: it.name.clone(),
                    value: it.value,
                    weight: it.weight,
                    ratio: r,
                    fraction,
                    taken_weight,
                    taken_value: it.value * fraction,
                }
            })
            .collect();

        let total_steps = entries
            .iter()
            .rposition(|e| e.fraction > 0.0)
            .map_or(0, |last| last + 1);

        #[cfg(feature = "tracing")]
        tracing::debug!(total_steps, "greedy plan computed");

        Self {
            capacity,
            entries,
            total_steps,
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Index of the last entry with `fraction > 0`, plus one.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Totals after applying the first `steps` entries.
    pub fn totals_at(&self, steps: usize) -> Totals {
        let applied = &self.entries[..steps.min(self.entries.len())];
        let used_weight: f64 = applied.iter().map(|e| e.taken_weight).sum();
        let total_value: f64 = applied.iter().map(|e| e.taken_value).sum();
        Totals {
            used_weight,
            total_value,
            remaining: (self.capacity - used_weight).max(0.0),
        }
    }

    /// Value of the whole plan.
    pub fn total_value(&self) -> f64 {
        self.totals_at(self.entries.len()).total_value
    }
}

/// Read cursor over a [`GreedyPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyStepper {
    plan: GreedyPlan,
    step_index: usize,
}

impl GreedyStepper {
    pub fn new(items: &[FractionalItem], capacity: f64) -> Self {
        Self::from_plan(GreedyPlan::compute(items, capacity))
    }

    pub fn from_plan(plan: GreedyPlan) -> Self {
        Self {
            plan,
            step_index: 0,
        }
    }

    /// Replace the plan wholesale and return the cursor to 0.
    pub fn recompute(&mut self, items: &[FractionalItem], capacity: f64) {
        *self = Self::new(items, capacity);
    }

    pub fn plan(&self) -> &GreedyPlan {
        &self.plan
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn totals(&self) -> Totals {
        self.plan.totals_at(self.step_index)
    }

    /// Row highlighted as current: `min(step_index, total_steps - 1)`.
    pub fn current_row(&self) -> Option<usize> {
        let total = self.plan.total_steps;
        (total > 0).then(|| self.step_index.min(total - 1))
    }

    pub fn row_flags(&self, row: usize) -> RowFlags {
        let applied = row < self.step_index
            && self
                .plan
                .entries
                .get(row)
                .is_some_and(|e| e.fraction > 0.0);
        RowFlags {
            applied,
            current: self.current_row() == Some(row),
        }
    }
}

impl Steppable for GreedyStepper {
    type Step = PlanEntry;

    fn cursor(&self) -> usize {
        self.step_index
    }

    fn total_steps(&self) -> usize {
        self.plan.total_steps
    }

    fn step_forward(&mut self) -> Result<PlanEntry, Refusal> {
        if self.step_index >= self.plan.total_steps {
            return Err(Refusal::AtEnd);
        }
        let entry = self.plan.entries[self.step_index].clone();
        self.step_index += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            step = self.step_index,
            index = entry.index,
            fraction = entry.fraction,
            "greedy step"
        );
        Ok(entry)
    }

    fn step_backward(&mut self) -> Result<usize, Refusal> {
        if self.step_index == 0 {
            return Err(Refusal::AtStart);
        }
        self.step_index -= 1;
        Ok(self.step_index)
    }
}
