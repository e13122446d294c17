use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

pub const DEFAULT_DECIMALS: u32 = 3;

/// One consolidated line of a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub name: String,
    pub unit: Option<String>,
    /// `None` only when no contributing ingredient had a known quantity
    pub quantity: Option<f64>,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ListOrder {
    /// Order in which each line was first met while walking the week
    #[default]
    FirstSeen,
    /// Case-insensitive by name, then by unit with unit-less lines first
    Alphabetical,
}

/// Presentation-ready shopping list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new(items: Vec<ShoppingListItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ShoppingListItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ordered(mut self, order: ListOrder) -> Self {
        if order == ListOrder::Alphabetical {
            // Stable: equal keys keep their first-seen order
            self.items.sort_by_cached_key(|item| {
                (
                    item.name.to_lowercase(),
                    item.unit.as_deref().unwrap_or_default().to_lowercase(),
                )
            });
        }
        self
    }

    pub fn rounded(mut self, decimals: u32) -> Self {
        for item in &mut self.items {
            item.quantity = item.quantity.map(|q| round_quantity(q, decimals));
        }
        self
    }
}

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale are returned unchanged; at that size they carry
/// no fractional digits anyway.
pub fn round_quantity(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
