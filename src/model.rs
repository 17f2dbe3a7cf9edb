//! Item and capacity model.
//!
//! Users edit items as free text, so the model keeps each row as a
//! [`RawItem`] and only produces numbers on demand. Sanitization never fails:
//! - unparsable, non-finite or negative numbers become `0`,
//! - integer fields truncate toward zero and saturate at the type maximum,
//! - the 0/1 capacity is capped at [`MAX_CAPACITY`] and 0/1 item values at
//!   [`MAX_ITEM_VALUE`],
//! - blank names become a positional placeholder (`Item 1`, `Item 2`, ...).
//!
//! Item order is significant: position `k` becomes DP row `k + 1` and the
//! greedy planner's original index `k`.

use serde::{Deserialize, Serialize};

use crate::error::Refusal;

/// Largest integer capacity the DP table is built for. Larger inputs clamp.
pub const MAX_CAPACITY: usize = 1 << 16;

/// Largest 0/1 item value. Sums of up to `2^32` such values fit in a `u64`
/// table cell.
pub const MAX_ITEM_VALUE: u64 = u32::MAX as u64;

/// Sanitized item for the 0/1 engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub value: u64,
    pub weight: usize,
}

impl Item {
    pub fn new(name: impl Into<String>, value: u64, weight: usize) -> Self {
        Self {
            name: name.into(),
            value,
            weight,
        }
    }
}

/// Sanitized item for the fractional engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalItem {
    pub name: String,
    pub value: f64,
    pub weight: f64,
}

impl FractionalItem {
    pub fn new(name: impl Into<String>, value: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            value: non_negative(value),
            weight: non_negative(weight),
        }
    }
}

impl From<&Item> for FractionalItem {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            value: item.value as f64,
            weight: item.weight as f64,
        }
    }
}

/// Editable text of one item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub name: String,
    pub value: String,
    pub weight: String,
}

impl RawItem {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            weight: weight.into(),
        }
    }

    /// Sanitize into the 0/1 form. `position` is the 0-based row index.
    pub fn to_item(&self, position: usize) -> Item {
        Item {
            name: display_name(&self.name, position),
            value: parse_u64(&self.value).min(MAX_ITEM_VALUE),
            weight: parse_usize(&self.weight),
        }
    }

    /// Sanitize into the fractional form. `position` is the 0-based row index.
    pub fn to_fractional(&self, position: usize) -> FractionalItem {
        FractionalItem {
            name: display_name(&self.name, position),
            value: parse_real(&self.value),
            weight: parse_real(&self.weight),
        }
    }
}

impl Default for RawItem {
    /// A freshly added row: blank name, value 1, weight 1.
    fn default() -> Self {
        Self::new("", "1", "1")
    }
}

impl From<&Item> for RawItem {
    fn from(item: &Item) -> Self {
        Self::new(
            item.name.clone(),
            item.value.to_string(),
            item.weight.to_string(),
        )
    }
}

/// Which column of a row an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemField {
    Name,
    Value,
    Weight,
}

/// The editable item list plus capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<RawItem>,
    capacity: String,
}

impl Inventory {
    pub fn new(items: Vec<RawItem>, capacity: impl Into<String>) -> Self {
        Self {
            items,
            capacity: capacity.into(),
        }
    }

    /// Inventory with no items and the given capacity.
    pub fn empty(capacity: impl Into<String>) -> Self {
        Self::new(Vec::new(), capacity)
    }

    pub fn raw_items(&self) -> &[RawItem] {
        &self.items
    }

    pub fn raw_capacity(&self) -> &str {
        &self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a default row and return its index.
    pub fn add_item(&mut self) -> usize {
        self.push(RawItem::default())
    }

    /// Append a specific row and return its index.
    pub fn push(&mut self, item: RawItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn update_item(
        &mut self,
        index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> Result<(), Refusal> {
        let len = self.items.len();
        let row = self
            .items
            .get_mut(index)
            .ok_or(Refusal::NoSuchItem { index, len })?;
        let value = value.into();
        match field {
            ItemField::Name => row.name = value,
            ItemField::Value => row.value = value,
            ItemField::Weight => row.weight = value,
        }
        Ok(())
    }

    pub fn delete_item(&mut self, index: usize) -> Result<RawItem, Refusal> {
        if index >= self.items.len() {
            return Err(Refusal::NoSuchItem {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn set_capacity(&mut self, value: impl Into<String>) {
        self.capacity = value.into();
    }

    /// Sanitized items for the 0/1 engine, in input order.
    pub fn items(&self) -> Vec<Item> {
        self.items
            .iter()
            .enumerate()
            .map(|(k, raw)| raw.to_item(k))
            .collect()
    }

    /// Sanitized items for the fractional engine, in input order.
    pub fn fractional_items(&self) -> Vec<FractionalItem> {
        self.items
            .iter()
            .enumerate()
            .map(|(k, raw)| raw.to_fractional(k))
            .collect()
    }

    /// Integer capacity `W` for the DP table, at most [`MAX_CAPACITY`].
    pub fn capacity(&self) -> usize {
        parse_usize(&self.capacity).min(MAX_CAPACITY)
    }

    /// Real capacity for the greedy planner.
    pub fn fractional_capacity(&self) -> f64 {
        parse_real(&self.capacity)
    }
}

impl Default for Inventory {
    /// Three demo items `A(6,2)`, `B(10,4)`, `C(12,6)` and capacity 10.
    fn default() -> Self {
        Self::new(
            vec![
                RawItem::new("A", "6", "2"),
                RawItem::new("B", "10", "4"),
                RawItem::new("C", "12", "6"),
            ],
            "10",
        )
    }
}

/// Trimmed name, or `Item {position + 1}` when blank.
pub fn display_name(raw: &str, position: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Item {}", position + 1)
    } else {
        trimmed.to_string()
    }
}

/// Parse a non-negative real; anything else is 0.
pub fn parse_real(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(non_negative).unwrap_or(0.0)
}

/// Parse a non-negative integer, truncating fractions; anything else is 0.
pub fn parse_u64(raw: &str) -> u64 {
    // `as` saturates for out-of-range floats.
    parse_real(raw).trunc() as u64
}

pub fn parse_usize(raw: &str) -> usize {
    parse_real(raw).trunc() as usize
}

/// Clamp to `[0, +inf)`, mapping NaN and infinities to 0.
#[inline]
pub fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_coerce_to_zero() {
        assert_eq!(parse_real(""), 0.0);
        assert_eq!(parse_real("abc"), 0.0);
        assert_eq!(parse_real("-3"), 0.0);
        assert_eq!(parse_real("NaN"), 0.0);
        assert_eq!(parse_real("inf"), 0.0);
        assert_eq!(parse_real(" 2.5 "), 2.5);
        assert_eq!(parse_u64("7.9"), 7);
        assert_eq!(parse_usize("1e3"), 1000);
        assert_eq!(parse_u64("1e300"), u64::MAX);
    }

    #[test]
    fn blank_names_get_placeholders() {
        let raw = RawItem::new("   ", "4", "2");
        assert_eq!(raw.to_item(2).name, "Item 3");
        assert_eq!(RawItem::new(" gem ", "1", "1").to_item(0).name, "gem");
    }

    #[test]
    fn default_row_and_inventory() {
        let mut inv = Inventory::default();
        assert_eq!(inv.capacity(), 10);
        let idx = inv.add_item();
        assert_eq!(idx, 3);
        assert_eq!(inv.items()[3], Item::new("Item 4", 1, 1));
    }

    #[test]
    fn edits_and_refusals() {
        let mut inv = Inventory::default();
        inv.update_item(1, ItemField::Weight, "x").unwrap();
        assert_eq!(inv.items()[1].weight, 0);
        assert_eq!(
            inv.update_item(5, ItemField::Name, "z"),
            Err(Refusal::NoSuchItem { index: 5, len: 3 })
        );
        let removed = inv.delete_item(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(inv.len(), 2);
        assert!(inv.delete_item(2).is_err());
        inv.set_capacity("-4");
        assert_eq!(inv.capacity(), 0);
        inv.set_capacity("7.5");
        assert_eq!(inv.capacity(), 7);
        assert_eq!(inv.fractional_capacity(), 7.5);
        inv.set_capacity("1e300");
        assert_eq!(inv.capacity(), MAX_CAPACITY);
        assert_eq!(inv.fractional_capacity(), 1e300);
    }

    #[test]
    fn huge_values_clamp_for_the_table() {
        let item = RawItem::new("big", "1e19", "1e300").to_item(0);
        assert_eq!(item.value, MAX_ITEM_VALUE);
        assert_eq!(item.weight, usize::MAX);
        let f = RawItem::new("big", "1e19", "1").to_fractional(0);
        assert_eq!(f.value, 1e19);
    }

    #[test]
    fn fractional_keeps_reals() {
        let raw = RawItem::new("", "2.5", "0.5");
        let f = raw.to_fractional(0);
        assert_eq!(f.value, 2.5);
        assert_eq!(f.weight, 0.5);
        assert_eq!(FractionalItem::new("n", -1.0, f64::NAN).weight, 0.0);
    }
}
