use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::{convert, Currency};

/// One aggregated cart entry for a single menu item.
///
/// Price and currency are snapshots taken when the item is first added and
/// stay fixed even if the menu item changes afterwards; only the quantity is
/// mutated on later adds or explicit updates.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: i64,
    pub name: String,
    pub original_price: Decimal,
    pub original_currency: Currency,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    pub fn new(item_id: i64, name: String, price: Decimal, currency: Currency) -> Self {
        Self {
            item_id,
            name,
            original_price: price,
            original_currency: currency,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Unit price converted into the display currency at the given rate.
    pub fn unit_price_in(&self, display: Currency, rate: Decimal) -> Decimal {
        convert(self.original_price, self.original_currency, display, rate)
    }

    /// Line total (converted unit price times quantity).
    pub fn amount_in(&self, display: Currency, rate: Decimal) -> Decimal {
        self.unit_price_in(display, rate) * Decimal::from(self.quantity)
    }
}

/// In-memory order cart: one line per distinct menu item, insertion order
/// preserved. Mutations go through the methods below; callers read lines
/// through the immutable view only.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a snapshot of a menu item. An existing line for the same item has
    /// its quantity incremented by one and keeps the snapshot from the first
    /// add; otherwise a new line with quantity 1 is appended.
    pub fn add_line(&mut self, item_id: i64, name: String, price: Decimal, currency: Currency) {
        if let Some(existing) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            existing.quantity += 1;
        } else {
            self.lines.push(CartLine::new(item_id, name, price, currency));
        }
        self.updated_at = Utc::now();
    }

    /// Set the quantity of a line. A quantity below 1 removes the line; an
    /// unknown item id is a silent no-op. Returns whether the cart changed.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove_line(item_id);
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = quantity as u32;
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Remove a line if present. Returns whether the cart changed.
    pub fn remove_line(&mut self, item_id: i64) -> bool {
        let original_len = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        let removed = self.lines.len() != original_len;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Empty the cart. Invoked after a successful order submission or an
    /// explicit reset.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.updated_at = Utc::now();
    }

    /// Current lines in insertion order, read-only.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get_line(&self, item_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    pub fn contains_line(&self, item_id: i64) -> bool {
        self.lines.iter().any(|line| line.item_id == item_id)
    }

    pub fn line_quantity(&self, item_id: i64) -> u32 {
        self.get_line(item_id).map(|line| line.quantity).unwrap_or(0)
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Cart total in the display currency. An empty cart totals exactly zero.
    pub fn total_in(&self, display: Currency, rate: Decimal) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.amount_in(display, rate))
            .sum()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Request model for adding a menu item to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartLineRequest {
    pub item_id: i64,
}

/// Request model for updating a cart line quantity.
///
/// Signed so a client can push the quantity below 1 to remove the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartLineRequest {
    pub quantity: i64,
}

/// One cart line priced in the current display currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub item_id: i64,
    pub name: String,
    pub quantity: u32,
    pub original_price: Decimal,
    pub original_currency: Currency,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Cart view with amounts aggregated in the display currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub display_currency: Currency,
    pub exchange_rate: Decimal,
    pub lines: Vec<CartLineView>,
    pub total_items: u32,
    pub total_amount: Decimal,
    pub updated_at: DateTime<Utc>,
}
