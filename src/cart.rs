//! Process-wide shopping cart.
//!
//! [`CartStore`] is a cheap, cloneable handle to one shared cart. It is the
//! only way to change the cart, which keeps two invariants: at most one line
//! per `(kind, id)` pair, and a quantity that never drops below 1 except through
//! removal. Readers always get copies.
//!
//! Every call to a mutating operation fires one change notification per
//! subscriber after the mutation has been applied and before the call
//! returns, so a caller that mutates and then reads sees its own write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::{
    models::{Combo, ItemKind, OrderItem, Product},
    subscription::{Notifier, SubscriptionId},
};

/// Anything that can be put in the cart.
pub trait Purchasable {
    fn kind(&self) -> ItemKind;
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn price(&self) -> i64;
    fn image_url(&self) -> &str;
}

impl Purchasable for Product {
    fn kind(&self) -> ItemKind {
        ItemKind::Product
    }
    fn id(&self) -> i64 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn price(&self) -> i64 {
        self.price
    }
    fn image_url(&self) -> &str {
        &self.image_url
    }
}

impl Purchasable for Combo {
    fn kind(&self) -> ItemKind {
        ItemKind::Combo
    }
    fn id(&self) -> i64 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn price(&self) -> i64 {
        self.price
    }
    fn image_url(&self) -> &str {
        &self.image_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(default)]
    pub kind: ItemKind,
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    #[serde(alias = "quality")]
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }

    fn is(&self, kind: ItemKind, id: i64) -> bool {
        self.kind == kind && self.id == id
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        OrderItem {
            kind: line.kind,
            id: line.id,
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increase,
    Decrease,
}

#[derive(Debug, Default)]
struct CartInner {
    lines: Mutex<Vec<CartLine>>,
    notifier: Notifier,
}

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, creating its line on first add.
    pub fn add_item<P: Purchasable + ?Sized>(&self, item: &P) {
        let quantity = {
            let mut lines = self.lines();
            match lines.iter_mut().find(|line| line.is(item.kind(), item.id())) {
                Some(line) => {
                    line.quantity = line.quantity.saturating_add(1);
                    line.quantity
                }
                None => {
                    lines.push(CartLine {
                        kind: item.kind(),
                        id: item.id(),
                        name: item.name().to_string(),
                        price: item.price(),
                        image_url: item.image_url().to_string(),
                        quantity: 1,
                    });
                    1
                }
            }
        };
        tracing::debug!(kind = ?item.kind(), item_id = item.id(), quantity, "cart item added");
        self.inner.notifier.notify();
    }

    /// Snapshot of the cart in insertion order.
    pub fn items(&self) -> Vec<CartLine> {
        self.lines().clone()
    }

    pub fn get(&self, kind: ItemKind, id: i64) -> Option<CartLine> {
        self.lines().iter().find(|line| line.is(kind, id)).cloned()
    }

    /// Steps the quantity of line `(kind, id)` by one. Decrease stops at 1.
    ///
    /// Returns whether the quantity changed. An unknown line is a no-op.
    pub fn set_quantity(&self, kind: ItemKind, id: i64, change: QuantityChange) -> bool {
        let changed = {
            let mut lines = self.lines();
            match lines.iter_mut().find(|line| line.is(kind, id)) {
                Some(line) => match change {
                    QuantityChange::Increase => {
                        line.quantity = line.quantity.saturating_add(1);
                        true
                    }
                    QuantityChange::Decrease if line.quantity > 1 => {
                        line.quantity -= 1;
                        true
                    }
                    QuantityChange::Decrease => false,
                },
                None => false,
            }
        };
        tracing::debug!(?kind, item_id = id, ?change, changed, "cart quantity adjusted");
        self.inner.notifier.notify();
        changed
    }

    /// Removes line `(kind, id)`, returning it if it was present.
    pub fn remove_item(&self, kind: ItemKind, id: i64) -> Option<CartLine> {
        let removed = {
            let mut lines = self.lines();
            lines
                .iter()
                .position(|line| line.is(kind, id))
                .map(|index| lines.remove(index))
        };
        tracing::debug!(?kind, item_id = id, removed = removed.is_some(), "cart item removed");
        self.inner.notifier.notify();
        removed
    }

    pub fn clear(&self) {
        self.lines().clear();
        tracing::debug!("cart cleared");
        self.inner.notifier.notify();
    }

    /// Sum of `price * quantity` over all lines, saturating at `i64::MAX`.
    pub fn total(&self) -> i64 {
        self.lines()
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.line_total()))
    }

    /// Number of units in the cart, for badges.
    pub fn count(&self) -> u32 {
        self.lines()
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.notifier.unsubscribe(id)
    }

    fn lines(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.inner
            .lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
