//! A player's item collection priced against a scraped price list.

use crate::database::{PriceDatabase, DEFAULT_COLOR};
use crate::types::PriceRange;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("unable to access inventory file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("inventory file {path} is not valid")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InventoryItem {
    pub name: String,
    /// Base certification, e.g. "Striker" for a "Fantastic Striker" item
    pub certification: Option<String>,
    pub paint: Option<String>,
    pub rarity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tradable: bool,
    pub quantity: u32,
    /// Price range in keys, e.g. "7-10". Empty when unknown.
    pub price: String,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>) -> Self {
        InventoryItem {
            name: name.into(),
            certification: None,
            paint: None,
            rarity: String::new(),
            kind: String::new(),
            tradable: false,
            quantity: 1,
            price: String::new(),
        }
    }

    pub fn with_paint(mut self, paint: impl Into<String>) -> Self {
        self.paint = Some(paint.into());
        self
    }

    pub fn with_certification(mut self, certification: impl Into<String>) -> Self {
        self.certification = Some(certification.into());
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn tradable(mut self, tradable: bool) -> Self {
        self.tradable = tradable;
        self
    }

    pub fn is_certified(&self) -> bool {
        self.certification.is_some()
    }

    pub fn is_painted(&self) -> bool {
        self.paint.is_some()
    }

    /// Two entries are the same item when everything but quantity and price
    /// matches.
    pub fn same_item(&self, other: &InventoryItem) -> bool {
        self.name == other.name
            && self.certification == other.certification
            && self.paint == other.paint
            && self.rarity == other.rarity
            && self.tradable == other.tradable
            && self.kind == other.kind
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        self.price.parse().ok()
    }

    /// Useful as a buying price.
    pub fn price_lower_bound(&self) -> Option<f64> {
        self.price_range().map(|range| range.lower)
    }

    /// Useful as a selling price.
    pub fn price_upper_bound(&self) -> Option<f64> {
        self.price_range().map(|range| range.upper)
    }
}

/// One line of a buying or selling list.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    pub name: String,
    pub paint: Option<String>,
    pub quantity: u32,
    pub keys: f64,
}

#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Inventory { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    fn position(&self, item: &InventoryItem) -> Option<usize> {
        self.items.iter().position(|held| held.same_item(item))
    }

    /// Bumps the quantity when the item is already held.
    pub fn add_item(&mut self, item: InventoryItem) {
        match self.position(&item) {
            Some(slot) => self.items[slot].quantity += 1,
            None => self.items.push(item),
        }
    }

    /// Drops one unit; the entry goes away with its last unit. Returns whether
    /// the item was held at all.
    pub fn remove_item(&mut self, item: &InventoryItem) -> bool {
        let Some(slot) = self.position(item) else {
            return false;
        };

        if self.items[slot].quantity > 1 {
            self.items[slot].quantity -= 1;
        } else {
            self.items.remove(slot);
        }
        true
    }

    pub fn update_item_price(&mut self, item: &InventoryItem, price: impl Into<String>) -> bool {
        match self.position(item) {
            Some(slot) => {
                self.items[slot].price = price.into();
                true
            }
            None => false,
        }
    }

    /// Reprices every item from the price list, using the item's paint or the
    /// default color. Returns how many items got a price.
    #[instrument(level = "info", name = "Repricing inventory", skip_all)]
    pub fn update_prices(&mut self, database: &PriceDatabase) -> usize {
        let mut priced = 0;
        for item in self.items.iter_mut() {
            let color = item.paint.as_deref().unwrap_or(DEFAULT_COLOR);
            match database.price_of_color(&item.name, color) {
                Some(price) => {
                    item.price = price.to_owned();
                    priced += 1;
                }
                None => debug!("No price for {} ({})", item.name, color),
            }
        }
        info!("Priced {} of {} items", priced, self.items.len());
        priced
    }

    /// Estimated value in keys: lower bounds times quantity, rounded. Items
    /// without a usable price count as zero.
    pub fn worth(&self) -> u64 {
        let worth: f64 = self
            .items
            .iter()
            .filter_map(|item| Some(item.price_lower_bound()? * f64::from(item.quantity)))
            .sum();
        worth.round() as u64
    }

    /// Items grouped by type. Items without a type are left out.
    pub fn by_type(&self) -> BTreeMap<&str, Vec<&InventoryItem>> {
        let mut groups: BTreeMap<&str, Vec<&InventoryItem>> = BTreeMap::new();
        for item in self.items.iter().filter(|item| !item.kind.is_empty()) {
            groups.entry(item.kind.as_str()).or_default().push(item);
        }
        groups
    }

    fn price_lines(&self, bound: impl Fn(&InventoryItem) -> Option<f64>) -> Vec<PriceLine> {
        self.items
            .iter()
            .filter_map(|item| {
                Some(PriceLine {
                    name: item.name.clone(),
                    paint: item.paint.clone(),
                    quantity: item.quantity,
                    keys: bound(item)?,
                })
            })
            .collect()
    }

    /// Priced items at their lower bound.
    pub fn buying_list(&self) -> Vec<PriceLine> {
        self.price_lines(InventoryItem::price_lower_bound)
    }

    /// Priced items at their upper bound.
    pub fn selling_list(&self) -> Vec<PriceLine> {
        self.price_lines(InventoryItem::price_upper_bound)
    }

    pub fn save(&self, path: &Path) -> Result<(), InventoryError> {
        let content = serde_json::to_string_pretty(self).map_err(|source| InventoryError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, content).map_err(|source| InventoryError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| InventoryError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, items) in self.by_type() {
            writeln!(f, "{}:", kind)?;
            for item in items {
                write!(f, "  {} x{}", item.name, item.quantity)?;
                if let Some(certification) = &item.certification {
                    write!(f, " [{}]", certification)?;
                }
                if let Some(paint) = &item.paint {
                    write!(f, " ({})", paint)?;
                }
                if !item.price.is_empty() {
                    write!(f, ": {} keys", item.price)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
