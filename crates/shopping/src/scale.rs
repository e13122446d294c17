use mealflo_shared::quantity::check_measure;
use mealflo_shared::{RecipeSource, WeekSnapshot};
use serde::Serialize;

/// One ingredient line of one placement, already scaled to the planned servings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledEntry {
    pub name: String,
    pub unit: Option<String>,
    /// `None` when the ingredient had no usable quantity
    pub quantity: Option<f64>,
}

/// `planned / base`, with both sides falling back instead of failing.
///
/// A missing or non-positive base counts as 1. A missing or non-positive
/// planned count means "as written", i.e. a factor of 1.
pub fn scale_factor(planned_servings: Option<f64>, base_servings: Option<f64>) -> f64 {
    let base = positive(base_servings).unwrap_or(1.0);
    let planned = positive(planned_servings).unwrap_or(base);
    planned / base
}

/// Scaled quantity, pinned to `f64::MAX` so a known amount never turns into `inf`
pub fn saturating_scale(quantity: f64, factor: f64) -> f64 {
    (quantity * factor).min(f64::MAX)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Flatten a week into scaled ingredient entries, in traversal order.
///
/// Placements whose recipe cannot be resolved and ingredients without a name
/// are skipped.
pub fn scale<S>(week: &WeekSnapshot, source: &S) -> Vec<ScaledEntry>
where
    S: RecipeSource + ?Sized,
{
    let mut entries = Vec::new();
    let mut unresolved = 0usize;

    for group in &week.meal_groups {
        if group.is_over_capacity() {
            tracing::warn!(
                group = %group.name,
                placements = group.recipes.len(),
                "meal group exceeds planner capacity"
            );
        }

        for placement in &group.recipes {
            let Some(recipe) = placement.resolve(source) else {
                unresolved += 1;
                tracing::debug!(
                    group = %group.name,
                    recipe_id = ?placement.recipe_id,
                    "skipping placement with unresolved recipe"
                );
                continue;
            };

            let factor = scale_factor(placement.planned_servings, recipe.base_servings);

            for ingredient in &recipe.ingredients {
                let Some(name) = ingredient
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                else {
                    continue;
                };

                let unit = ingredient
                    .unit
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty());

                let quantity = ingredient
                    .quantity
                    .and_then(|q| check_measure(q).ok())
                    .map(|q| saturating_scale(q, factor));

                entries.push(ScaledEntry {
                    name: name.to_string(),
                    unit: unit.map(str::to_string),
                    quantity,
                });
            }
        }
    }

    tracing::debug!(
        week_id = ?week.id,
        entries = entries.len(),
        unresolved,
        "scaled week ingredients"
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealflo_shared::{MealGroup, MealGroupRecipe, Recipe, RecipeIngredient};

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor(Some(6.0), Some(4.0)), 1.5);
        assert_eq!(scale_factor(Some(2.0), Some(2.0)), 1.0);
    }

    #[test]
    fn test_scale_factor_missing_base_counts_as_one() {
        assert_eq!(scale_factor(Some(3.0), None), 3.0);
        assert_eq!(scale_factor(Some(3.0), Some(0.0)), 3.0);
        assert_eq!(scale_factor(Some(3.0), Some(-2.0)), 3.0);
        assert_eq!(scale_factor(Some(3.0), Some(f64::NAN)), 3.0);
    }

    #[test]
    fn test_scale_factor_missing_planned_is_unscaled() {
        assert_eq!(scale_factor(None, Some(4.0)), 1.0);
        assert_eq!(scale_factor(Some(0.0), Some(4.0)), 1.0);
        assert_eq!(scale_factor(Some(-1.0), None), 1.0);
    }

    #[test]
    fn test_saturating_scale() {
        assert_eq!(saturating_scale(1.5, 2.0), 3.0);
        assert_eq!(saturating_scale(1e308, 10.0), f64::MAX);
    }

    #[test]
    fn test_scale_keeps_traversal_order_and_skips_blank_names() {
        let recipe = Recipe::new(1, "Pancakes", Some(2.0))
            .with_ingredient(RecipeIngredient::new("Flour", Some(1.0), Some("cup")))
            .with_ingredient(RecipeIngredient::new("   ", Some(3.0), Some("g")))
            .with_ingredient(RecipeIngredient::new(" Eggs ", Some(2.0), Some(" ")));

        let week = WeekSnapshot::new(Some(1)).with_group(
            MealGroup::new("Breakfast", None)
                .with_placement(MealGroupRecipe::embedded(recipe, Some(4.0))),
        );

        let entries = scale(&week, &week);

        assert_eq!(
            entries,
            vec![
                ScaledEntry {
                    name: "Flour".to_string(),
                    unit: Some("cup".to_string()),
                    quantity: Some(2.0),
                },
                ScaledEntry {
                    name: "Eggs".to_string(),
                    unit: None,
                    quantity: Some(4.0),
                },
            ]
        );
    }

    #[test]
    fn test_scale_drops_unmeasurable_quantities() {
        let recipe = Recipe::new(1, "Soup", Some(1.0))
            .with_ingredient(RecipeIngredient::new("Salt", Some(f64::NAN), None))
            .with_ingredient(RecipeIngredient::new("Pepper", Some(-1.0), None));

        let week = WeekSnapshot::new(None).with_group(
            MealGroup::new("Dinner", None)
                .with_placement(MealGroupRecipe::embedded(recipe, Some(2.0))),
        );

        let entries = scale(&week, &week);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.quantity.is_none()));
    }
}
