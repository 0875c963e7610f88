//! Cart engine
//!
//! The cart holds one line item per beat: a weak beat reference, a quantity
//! and a license tier. Prices are derived on read from the catalog, so a
//! line whose beat no longer resolves simply drops out of display and
//! totals while staying in storage until removed.
//!
//! Every mutation writes the whole cart through to the persistence layer
//! before returning. A failed write is logged and remembered in
//! [`Cart::last_save_error`]; the in-memory cart stays authoritative for the
//! rest of the session.

use crate::catalog::{Beat, Catalog};
use crate::storage::{CollectionKey, KeyValueStore, Persistence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sales tax applied to the subtotal
pub const TAX_RATE: f64 = 0.08;

/// License tier, multiplying a beat's base price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    #[default]
    Basic,
    Premium,
    Exclusive,
}

impl LicenseType {
    pub const ALL: [LicenseType; 3] = [LicenseType::Basic, LicenseType::Premium, LicenseType::Exclusive];

    /// Price multiplier over the base price
    pub fn multiplier(self) -> f64 {
        match self {
            LicenseType::Basic => 1.0,
            LicenseType::Premium => 2.0,
            LicenseType::Exclusive => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LicenseType::Basic => "basic",
            LicenseType::Premium => "premium",
            LicenseType::Exclusive => "exclusive",
        }
    }

    /// Price of one unit of `beat` under this tier
    pub fn price_of(self, beat: &Beat) -> f64 {
        beat.price * self.multiplier()
    }
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cart line as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub beat_id: String,
    pub quantity: u32,
    pub license_type: LicenseType,
}

impl CartItem {
    /// New line: quantity 1, basic license
    pub fn new(beat_id: impl Into<String>) -> Self {
        Self {
            beat_id: beat_id.into(),
            quantity: 1,
            license_type: LicenseType::Basic,
        }
    }
}

/// A cart line resolved against the catalog, for display
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    pub item: &'a CartItem,
    pub beat: &'a Beat,
    /// Tier price for one unit
    pub unit_price: f64,
    /// `unit_price * quantity`
    pub line_price: f64,
}

/// Cart state rehydrated from durable storage
#[derive(Debug)]
pub struct Cart<S> {
    catalog: Arc<Catalog>,
    persistence: Persistence<S>,
    items: Vec<CartItem>,
    last_save_error: Option<String>,
}

impl<S: KeyValueStore> Cart<S> {
    /// Rehydrate the cart from the `"cart"` collection
    ///
    /// Lines that do not parse (such as an unknown tier) are skipped.
    /// Duplicate lines for a beat keep the first occurrence; stored
    /// quantities below 1 are raised to 1.
    pub async fn load(catalog: Arc<Catalog>, persistence: Persistence<S>) -> Self {
        let stored: Vec<CartItem> = persistence.load_collection(CollectionKey::Cart).await;
        Self {
            catalog,
            persistence,
            items: normalize(stored),
            last_save_error: None,
        }
    }

    /// All line items in insertion order, including unresolvable ones
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, beat_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.beat_id == beat_id)
    }

    pub fn contains(&self, beat_id: &str) -> bool {
        self.item(beat_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (the cart badge count)
    ///
    /// Summed as `u64`: each line may hold up to `u32::MAX` units.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Lines whose beat resolves, with prices
    pub fn lines(&self) -> Vec<CartLine<'_>> {
        self.items
            .iter()
            .filter_map(|item| {
                let beat = self.catalog.beat_by_id(&item.beat_id)?;
                let unit_price = item.license_type.price_of(beat);
                Some(CartLine {
                    item,
                    beat,
                    unit_price,
                    line_price: unit_price * f64::from(item.quantity),
                })
            })
            .collect()
    }

    /// Add a beat at quantity 1, basic tier. No-op if already in the cart.
    pub async fn add_item(&mut self, beat_id: &str) -> bool {
        if self.contains(beat_id) {
            return false;
        }
        self.items.push(CartItem::new(beat_id));
        debug!(beat_id, "Added to cart");
        self.save().await;
        true
    }

    /// Remove a beat's line. No-op if absent.
    pub async fn remove_item(&mut self, beat_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.beat_id != beat_id);
        if self.items.len() == before {
            return false;
        }
        debug!(beat_id, "Removed from cart");
        self.save().await;
        true
    }

    /// Set a line's quantity; zero or below removes the line
    pub async fn set_quantity(&mut self, beat_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(beat_id).await;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.items.iter_mut().find(|item| item.beat_id == beat_id) else {
            return false;
        };
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        debug!(beat_id, quantity, "Cart quantity changed");
        self.save().await;
        true
    }

    /// Change a line's license tier. No-op if absent.
    pub async fn set_license_type(&mut self, beat_id: &str, license_type: LicenseType) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.beat_id == beat_id) else {
            return false;
        };
        if item.license_type == license_type {
            return false;
        }
        item.license_type = license_type;
        debug!(beat_id, license = %license_type, "Cart license changed");
        self.save().await;
        true
    }

    /// Empty the cart
    pub async fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        debug!("Cart cleared");
        let result = self.persistence.clear(CollectionKey::Cart).await;
        self.record_save(result);
        true
    }

    /// `base_price * multiplier * quantity`, or `None` if the beat does not
    /// resolve
    pub fn price_for_item(&self, item: &CartItem) -> Option<f64> {
        let beat = self.catalog.beat_by_id(&item.beat_id)?;
        Some(item.license_type.price_of(beat) * f64::from(item.quantity))
    }

    /// Sum of resolvable line prices
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .filter_map(|item| self.price_for_item(item))
            .sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * TAX_RATE
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Error from the most recent failed write, cleared by the next success
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    async fn save(&mut self) {
        let result = self
            .persistence
            .save_collection(CollectionKey::Cart, &self.items)
            .await;
        self.record_save(result);
    }

    fn record_save(&mut self, result: crate::Result<()>) {
        match result {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!("Cart not persisted, keeping in-memory state: {}", e);
                self.last_save_error = Some(e.to_string());
            }
        }
    }
}

fn normalize(stored: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
    for mut item in stored {
        if items.iter().any(|existing| existing.beat_id == item.beat_id) {
            continue;
        }
        item.quantity = item.quantity.max(1);
        items.push(item);
    }
    items
}
