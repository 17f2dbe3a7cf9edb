//! Core trait shared by every stepwise algorithm in the crate.
//!
//! The DP fill, the backtracking replay and the fractional greedy plan are
//! all "steppable plans": a cursor in `0..=total_steps()` that moves one
//! position at a time in either direction. Implementing [`Steppable`] lets
//! generic drivers (the [`AutoPlayer`](crate::autoplay::AutoPlayer), tests,
//! the CLI) walk any of them the same way.
//!
//! Contract for implementors:
//! - `cursor() <= total_steps()` at all times.
//! - `step_forward` at `cursor() == total_steps()` returns
//!   [`Refusal::AtEnd`] and changes nothing.
//! - `step_backward` at `cursor() == 0` returns [`Refusal::AtStart`] and
//!   changes nothing.
//! - A successful step moves the cursor by exactly one and is atomic: no
//!   caller can observe a half-applied step.
//! - `k` forward steps followed by `k` backward steps restore the exact
//!   observable state.

use crate::error::Refusal;

/// A replayable plan with a bidirectional cursor.
pub trait Steppable {
    /// Record describing what a forward step did.
    type Step;

    /// Number of steps already applied.
    fn cursor(&self) -> usize;

    /// Number of steps in the full plan.
    fn total_steps(&self) -> usize;

    /// Apply the step at `cursor()` and advance.
    fn step_forward(&mut self) -> Result<Self::Step, Refusal>;

    /// Undo the step at `cursor() - 1`. Returns the new cursor.
    fn step_backward(&mut self) -> Result<usize, Refusal>;

    /// True once every step has been applied.
    #[inline]
    fn is_finished(&self) -> bool {
        self.cursor() == self.total_steps()
    }

    /// Apply every remaining step. Returns how many were applied.
    fn run_to_end(&mut self) -> usize {
        let mut applied = 0;
        while self.step_forward().is_ok() {
            applied += 1;
        }
        applied
    }

    /// Undo every applied step. Returns how many were undone.
    fn rewind(&mut self) -> usize {
        let mut undone = 0;
        while self.step_backward().is_ok() {
            undone += 1;
        }
        undone
    }

    /// Move the cursor to `target` (clamped to `total_steps()`).
    fn seek(&mut self, target: usize) -> usize {
        let target = target.min(self.total_steps());
        while self.cursor() < target {
            if self.step_forward().is_err() {
                break;
            }
        }
        while self.cursor() > target {
            if self.step_backward().is_err() {
                break;
            }
        }
        self.cursor()
    }
}
