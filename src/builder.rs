use serde::{Deserialize, Serialize};

use crate::autoplay::DEFAULT_SPEED_MS;
use crate::history::HistoryMode;
use crate::model::{Inventory, Item, RawItem};
use crate::KnapsackEngine;

/// Recognized engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay between auto-play steps, in milliseconds.
    pub speed_ms: u64,
    /// Storage strategy for the DP fill history.
    pub history: HistoryMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            history: HistoryMode::default(),
        }
    }
}

pub struct EngineBuilder {
    inventory: Inventory,
    config: EngineConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// No items, capacity 0, default config.
    pub fn new() -> Self {
        Self {
            inventory: Inventory::empty("0"),
            config: EngineConfig::default(),
        }
    }
    pub fn from_inventory(inventory: Inventory) -> Self {
        Self {
            inventory,
            config: EngineConfig::default(),
        }
    }
    pub fn capacity(mut self, capacity: impl ToString) -> Self {
        self.inventory.set_capacity(capacity.to_string());
        self
    }
    pub fn item(mut self, name: &str, value: u64, weight: usize) -> Self {
        self.inventory.push(RawItem::from(&Item::new(name, value, weight)));
        self
    }
    pub fn raw_item(mut self, item: RawItem) -> Self {
        self.inventory.push(item);
        self
    }
    pub fn speed_ms(mut self, speed_ms: u64) -> Self {
        self.config.speed_ms = speed_ms;
        self
    }
    pub fn history(mut self, mode: HistoryMode) -> Self {
        self.config.history = mode;
        self
    }
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
    pub fn build(self) -> KnapsackEngine {
        KnapsackEngine::new(self.inventory, self.config)
    }
}
