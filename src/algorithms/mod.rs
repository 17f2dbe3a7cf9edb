//! The stepwise knapsack algorithms.
//!
//! Each type implements [`Steppable`](crate::traits::Steppable):
//! - [`zero_one`]   : the 0/1 DP table, one cell per step, with undo.
//! - [`backtrack`]  : replay of the optimal subset reconstruction over a
//!   completed [`zero_one::DpStepper`].
//! - [`fractional`] : the greedy value/weight allocation for divisible items.

pub mod backtrack;
pub mod fractional;
pub mod zero_one;
