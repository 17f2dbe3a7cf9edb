//! Stepwise knapsack engines
//!
//! This crate exposes the 0/1 and fractional knapsack algorithms as
//! inspectable, replayable state, for teaching tools and visualizers.
//!
//! ## Core idea
//! 1. Every algorithm is a [`Steppable`] plan: a cursor that moves one step
//!    at a time, forward or backward, with every intermediate state readable.
//! 2. The 0/1 DP table is filled one cell per step, with an undo history.
//! 3. Once the table is complete, the optimal subset is reconstructed by a
//!    backtracking replay that can also be stepped both ways.
//! 4. The fractional variant is a greedy plan ordered by value/weight ratio.
//!
//! A [`KnapsackEngine`] owns all of it for one session; a presentation
//! layer reads it and drives it only through its methods.
//!
//! ## Quick start
//! ```
//! use knapstep::{KnapsackEngine, Steppable};
//!
//! let mut engine = KnapsackEngine::default(); // A(6,2), B(10,4), C(12,6), W = 10
//! while engine.step_forward().is_ok() {}
//! assert_eq!(engine.fill().table().optimum(), 22);
//!
//! engine.start_backtrack().unwrap();
//! while engine.backtrack_forward().is_ok() {}
//! let chosen: Vec<_> = engine.backtrack().unwrap().chosen().iter().copied().collect();
//! assert_eq!(chosen, vec![1, 2]); // B and C
//!
//! let mut greedy = engine.greedy().clone();
//! greedy.run_to_end();
//! assert!((greedy.totals().total_value - 24.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//! - [`model`]      : editable items and capacity, sanitized on read.
//! - [`algorithms`] : the DP stepper, the backtracker and the greedy planner.
//! - [`history`]    : snapshot or reversible undo storage for the fill.
//! - [`autoplay`]   : host-driven timer that steps a plan automatically.
//! - [`engine`]     : the session object tying it together.

pub mod algorithms;
pub mod autoplay;
pub mod builder;
pub mod engine;
pub mod error;
pub mod history;
pub mod model;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::{EngineBuilder, EngineConfig};
pub use crate::engine::{KnapsackEngine, PlayTarget};
pub use crate::error::Refusal;
pub use crate::traits::Steppable;
