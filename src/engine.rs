//! The session object that owns every piece of knapsack state.
//!
//! A [`KnapsackEngine`] is exclusively owned by one UI session. The
//! presentation layer reads it through borrows or an [`EngineView`] and
//! changes it only through the methods below:
//! - item/capacity edits reinitialize the DP fill, drop any backtrack,
//!   recompute the greedy plan and stop auto-play;
//! - fill, backtrack and greedy cursors step independently;
//! - auto-play is advanced by [`KnapsackEngine::tick`].
//!
//! Refused calls return a [`Refusal`] and leave the engine untouched.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::algorithms::backtrack::{Backtracker, Decision};
use crate::algorithms::fractional::{GreedyStepper, PlanEntry, RowFlags, Totals};
use crate::algorithms::zero_one::{DpStepper, FillStep};
use crate::autoplay::AutoPlayer;
use crate::builder::EngineConfig;
use crate::error::Refusal;
use crate::model::{Inventory, Item, ItemField, RawItem};
use crate::table::{Cell, Dependencies};
use crate::traits::Steppable;

/// Which cursor auto-play advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayTarget {
    #[default]
    Fill,
    Backtrack,
    Greedy,
}

#[derive(Debug, Clone)]
pub struct KnapsackEngine {
    inventory: Inventory,
    config: EngineConfig,
    fill: DpStepper,
    backtrack: Option<Backtracker>,
    greedy: GreedyStepper,
    player: AutoPlayer,
    target: PlayTarget,
}

impl Default for KnapsackEngine {
    /// Demo inventory with the default configuration.
    fn default() -> Self {
        Self::new(Inventory::default(), EngineConfig::default())
    }
}

impl KnapsackEngine {
    pub fn new(inventory: Inventory, config: EngineConfig) -> Self {
        let fill = DpStepper::with_history(inventory.items(), inventory.capacity(), config.history);
        let greedy = GreedyStepper::new(
            &inventory.fractional_items(),
            inventory.fractional_capacity(),
        );
        Self {
            inventory,
            config,
            fill,
            backtrack: None,
            greedy,
            player: AutoPlayer::new(config.speed_ms),
            target: PlayTarget::Fill,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fill(&self) -> &DpStepper {
        &self.fill
    }

    pub fn backtrack(&self) -> Option<&Backtracker> {
        self.backtrack.as_ref()
    }

    pub fn greedy(&self) -> &GreedyStepper {
        &self.greedy
    }

    // -- item/capacity model -------------------------------------------

    pub fn add_item(&mut self) -> usize {
        let index = self.inventory.add_item();
        self.invalidate();
        index
    }

    pub fn update_item(
        &mut self,
        index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> Result<(), Refusal> {
        self.inventory.update_item(index, field, value)?;
        self.invalidate();
        Ok(())
    }

    pub fn delete_item(&mut self, index: usize) -> Result<RawItem, Refusal> {
        let removed = self.inventory.delete_item(index)?;
        self.invalidate();
        Ok(removed)
    }

    pub fn set_capacity(&mut self, value: impl Into<String>) {
        self.inventory.set_capacity(value);
        self.invalidate();
    }

    /// Rebuild every derived structure from the inventory.
    fn invalidate(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            items = self.inventory.len(),
            capacity = self.inventory.raw_capacity(),
            "inputs changed"
        );
        self.fill
            .initialize(self.inventory.items(), self.inventory.capacity());
        self.backtrack = None;
        self.greedy.recompute(
            &self.inventory.fractional_items(),
            self.inventory.fractional_capacity(),
        );
        self.player.stop();
    }

    // -- DP fill -------------------------------------------------------

    pub fn step_forward(&mut self) -> Result<FillStep, Refusal> {
        self.fill.step_forward()
    }

    /// Undo one fill step. Any active backtrack belonged to the completed
    /// table and is dropped.
    pub fn step_backward(&mut self) -> Result<usize, Refusal> {
        let at = self.fill.step_backward()?;
        self.backtrack = None;
        Ok(at)
    }

    /// Back to fill step 0; stops auto-play and drops the backtrack.
    pub fn reset(&mut self) {
        self.player.stop();
        self.fill.reset();
        self.backtrack = None;
    }

    // -- backtracking --------------------------------------------------

    pub fn start_backtrack(&mut self) -> Result<&Backtracker, Refusal> {
        let started = Backtracker::start(&self.fill)?;
        Ok(self.backtrack.insert(started))
    }

    pub fn backtrack_forward(&mut self) -> Result<Decision, Refusal> {
        self.backtrack
            .as_mut()
            .ok_or(Refusal::NoBacktrack)?
            .step_forward()
    }

    pub fn backtrack_backward(&mut self) -> Result<usize, Refusal> {
        self.backtrack
            .as_mut()
            .ok_or(Refusal::NoBacktrack)?
            .step_backward()
    }

    // -- greedy --------------------------------------------------------

    pub fn greedy_forward(&mut self) -> Result<PlanEntry, Refusal> {
        self.greedy.step_forward()
    }

    pub fn greedy_backward(&mut self) -> Result<usize, Refusal> {
        self.greedy.step_backward()
    }

    pub fn greedy_reset(&mut self) {
        self.greedy.rewind();
    }

    // -- auto-play -----------------------------------------------------

    pub fn set_speed_ms(&mut self, speed_ms: u64) {
        self.config.speed_ms = speed_ms;
        self.player.set_speed_ms(speed_ms);
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn play_target(&self) -> PlayTarget {
        self.target
    }

    pub fn player(&self) -> &AutoPlayer {
        &self.player
    }

    /// Start auto-play on `target`. Refuses when the target has nothing
    /// left to do.
    pub fn start_autoplay(&mut self, target: PlayTarget, now: Instant) -> Result<(), Refusal> {
        let finished = match target {
            PlayTarget::Fill => self.fill.is_finished(),
            PlayTarget::Backtrack => self
                .backtrack
                .as_ref()
                .ok_or(Refusal::NoBacktrack)?
                .is_finished(),
            PlayTarget::Greedy => self.greedy.is_finished(),
        };
        if finished {
            return Err(Refusal::AtEnd);
        }
        self.target = target;
        self.player.start(now);
        Ok(())
    }

    pub fn stop_autoplay(&mut self) {
        self.player.stop();
    }

    /// Apply auto-play steps due by `now`. Returns how many were applied.
    pub fn tick(&mut self, now: Instant) -> usize {
        if !self.player.is_playing() {
            return 0;
        }
        match self.target {
            PlayTarget::Fill => self.player.poll(now, &mut self.fill),
            PlayTarget::Greedy => self.player.poll(now, &mut self.greedy),
            PlayTarget::Backtrack => match self.backtrack.as_mut() {
                Some(b) => self.player.poll(now, b),
                None => {
                    self.player.stop();
                    0
                }
            },
        }
    }

    // -- read contract -------------------------------------------------

    /// Owned, serializable snapshot of everything a renderer needs.
    pub fn view(&self) -> EngineView {
        let next_cell = self.fill.next_cell();
        EngineView {
            items: self.fill.items().to_vec(),
            capacity: self.fill.capacity(),
            table: self.fill.table().to_rows(),
            fill_step: self.fill.fill_step(),
            total_fill_steps: self.fill.total_steps(),
            complete: self.fill.is_complete(),
            next_cell,
            next_dependencies: next_cell.and_then(|c| self.fill.dependencies(c)),
            backtrack: self.backtrack.as_ref().map(|b| BacktrackView {
                index: b.index(),
                len: b.sequence().len(),
                current: b.current().copied(),
                chosen: b.chosen().iter().copied().collect(),
                chosen_weight: b.chosen_weight(),
                chosen_value: b.chosen_value(),
            }),
            greedy: GreedyView {
                capacity: self.greedy.plan().capacity(),
                step_index: self.greedy.step_index(),
                total_steps: self.greedy.plan().total_steps(),
                rows: self
                    .greedy
                    .plan()
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(row, entry)| GreedyRow {
                        entry: entry.clone(),
                        flags: self.greedy.row_flags(row),
                    })
                    .collect(),
                totals: self.greedy.totals(),
            },
            playing: self.player.is_playing(),
            play_target: self.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineView {
    pub items: Vec<Item>,
    pub capacity: usize,
    pub table: Vec<Vec<u64>>,
    pub fill_step: usize,
    pub total_fill_steps: usize,
    pub complete: bool,
    pub next_cell: Option<Cell>,
    pub next_dependencies: Option<Dependencies>,
    pub backtrack: Option<BacktrackView>,
    pub greedy: GreedyView,
    pub playing: bool,
    pub play_target: PlayTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktrackView {
    pub index: usize,
    pub len: usize,
    pub current: Option<Decision>,
    pub chosen: Vec<usize>,
    pub chosen_weight: usize,
    pub chosen_value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyView {
    pub capacity: f64,
    pub step_index: usize,
    pub total_steps: usize,
    pub rows: Vec<GreedyRow>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyRow {
    #[serde(flatten)]
    pub entry: PlanEntry,
    #[serde(flatten)]
    pub flags: RowFlags,
}
