use std::collections::HashMap;

use mealflo_shared::{RecipeSource, WeekSnapshot};
use serde_json::Value;

use crate::error::ShoppingError;
use crate::list::{DEFAULT_DECIMALS, ListOrder, ShoppingList, ShoppingListItem};
use crate::normalize::MergeKey;
use crate::scale::{ScaledEntry, scale};

/// How a finished list is presented
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationOptions {
    pub order: ListOrder,
    pub decimals: u32,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            order: ListOrder::default(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

/// Running total for one merge key
struct MergedLine {
    name: String,
    unit: Option<String>,
    total: f64,
    has_known_quantity: bool,
}

/// Ingredient Aggregation Service
///
/// Stateless domain service that turns a week of planned meals into one
/// consolidated shopping list:
/// - scale: every placement's ingredients by `plannedServings / baseServings`
/// - merge: entries sharing a normalized (name, unit) pair, summing quantities
///
/// "Tomato Sauce 3 oz" + "tomato sauce 1.5 oz" = "Tomato Sauce 4.5 oz", while
/// "Flour 1 cup" and "Flour 200 g" stay two lines. No unit conversion is done.
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Stage 1: flatten and scale. See [`scale`].
    pub fn scale<S>(week: &WeekSnapshot, source: &S) -> Vec<ScaledEntry>
    where
        S: RecipeSource + ?Sized,
    {
        scale(week, source)
    }

    /// Stage 2: merge scaled entries by normalized (name, unit).
    ///
    /// Lines come out in the order their key was first seen and carry the
    /// display form of the first entry. A line's quantity is `None` only if
    /// every contributing entry lacked one.
    pub fn merge(entries: Vec<ScaledEntry>) -> Vec<ShoppingListItem> {
        let mut index: HashMap<MergeKey, usize> = HashMap::new();
        let mut lines: Vec<MergedLine> = Vec::new();

        for entry in entries {
            let key = MergeKey::new(&entry.name, entry.unit.as_deref());

            let position = *index.entry(key).or_insert_with(|| {
                lines.push(MergedLine {
                    name: entry.name.clone(),
                    unit: entry.unit.clone(),
                    total: 0.0,
                    has_known_quantity: false,
                });
                lines.len() - 1
            });

            if let Some(quantity) = entry.quantity {
                let line = &mut lines[position];
                line.total = (line.total + quantity).min(f64::MAX);
                line.has_known_quantity = true;
            }
        }

        lines
            .into_iter()
            .map(|line| ShoppingListItem {
                name: line.name,
                unit: line.unit,
                quantity: line.has_known_quantity.then_some(line.total),
            })
            .collect()
    }

    /// Aggregate a week whose placements resolve against its own recipe catalog
    pub fn aggregate(week: &WeekSnapshot) -> Vec<ShoppingListItem> {
        Self::aggregate_with(week, week)
    }

    /// Aggregate a week, resolving referenced recipes through `source`
    pub fn aggregate_with<S>(week: &WeekSnapshot, source: &S) -> Vec<ShoppingListItem>
    where
        S: RecipeSource + ?Sized,
    {
        let items = Self::merge(Self::scale(week, source));

        tracing::debug!(
            week_id = ?week.id,
            meal_groups = week.meal_groups.len(),
            placements = week.placement_count(),
            items = items.len(),
            "aggregated shopping list"
        );

        items
    }

    /// Decode a week from its JSON form and aggregate it.
    ///
    /// # Returns
    /// * Ok(Vec<ShoppingListItem>) - merged list, possibly empty
    /// * Err(ShoppingError::InvalidInput) - the week could not be traversed
    pub fn aggregate_value(value: Value) -> Result<Vec<ShoppingListItem>, ShoppingError> {
        let week = WeekSnapshot::from_value(value)?;
        Ok(Self::aggregate(&week))
    }

    /// Aggregate and shape the result for display
    pub fn shopping_list(week: &WeekSnapshot, options: AggregationOptions) -> ShoppingList {
        ShoppingList::new(Self::aggregate(week))
            .rounded(options.decimals)
            .ordered(options.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, unit: Option<&str>, quantity: Option<f64>) -> ScaledEntry {
        ScaledEntry {
            name: name.to_string(),
            unit: unit.map(str::to_string),
            quantity,
        }
    }

    #[test]
    fn test_merge_sums_same_key() {
        let items = IngredientAggregationService::merge(vec![
            entry("Tomato Sauce", Some("oz"), Some(3.0)),
            entry("Tomato Sauce", Some("oz"), Some(1.5)),
        ]);

        assert_eq!(
            items,
            vec![ShoppingListItem {
                name: "Tomato Sauce".to_string(),
                unit: Some("oz".to_string()),
                quantity: Some(4.5),
            }]
        );
    }

    #[test]
    fn test_merge_uses_first_seen_display_form() {
        let items = IngredientAggregationService::merge(vec![
            entry("Olive Oil", Some("Tbsp"), Some(1.0)),
            entry("olive   oil", Some("tbsp"), Some(2.0)),
        ]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Olive Oil");
        assert_eq!(items[0].unit.as_deref(), Some("Tbsp"));
        assert_eq!(items[0].quantity, Some(3.0));
    }

    #[test]
    fn test_merge_unknown_quantities() {
        let items = IngredientAggregationService::merge(vec![
            entry("Salt", None, None),
            entry("Pepper", None, None),
            entry("Salt", None, None),
            entry("Pepper", None, Some(0.5)),
        ]);

        assert_eq!(items[0].name, "Salt");
        assert_eq!(items[0].quantity, None);
        assert_eq!(items[1].name, "Pepper");
        assert_eq!(items[1].quantity, Some(0.5));
    }

    #[test]
    fn test_merge_known_zero_is_not_unknown() {
        let items =
            IngredientAggregationService::merge(vec![entry("Water", Some("ml"), Some(0.0))]);
        assert_eq!(items[0].quantity, Some(0.0));
    }

    #[test]
    fn test_merge_sum_stays_finite() {
        let items = IngredientAggregationService::merge(vec![
            entry("Flour", Some("g"), Some(f64::MAX)),
            entry("flour", Some("g"), Some(f64::MAX)),
        ]);
        assert_eq!(items[0].quantity, Some(f64::MAX));
    }

    #[test]
    fn test_merge_first_seen_order() {
        let items = IngredientAggregationService::merge(vec![
            entry("Onion", None, Some(1.0)),
            entry("Garlic", Some("clove"), Some(2.0)),
            entry("onion", None, Some(1.0)),
            entry("Basil", None, None),
        ]);

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Onion", "Garlic", "Basil"]);
    }

    #[test]
    fn test_merge_empty() {
        assert!(IngredientAggregationService::merge(Vec::new()).is_empty());
    }
}
