use serde::{Deserialize, Serialize};

use crate::lenient;

/// One ingredient line of a recipe, as authored for the recipe's base servings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::ordinal")]
    pub sort_order: i64,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: Option<f64>, unit: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            quantity,
            unit: unit.map(str::to_string),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", from = "RecipeRecord")]
pub struct Recipe {
    pub id: Option<i64>,
    pub title: String,
    /// Serving count the ingredient quantities were written for
    pub base_servings: Option<f64>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Wire form of a recipe. Older payloads name the base serving count
/// `servings`; when both keys are sent `baseServings` wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRecord {
    #[serde(default, deserialize_with = "lenient::integer")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::label")]
    title: String,
    #[serde(default, deserialize_with = "lenient::number")]
    base_servings: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    servings: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    ingredients: Vec<RecipeIngredient>,
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            base_servings: record.base_servings.or(record.servings),
            ingredients: record.ingredients,
        }
    }
}

impl Recipe {
    pub fn new(id: i64, title: impl Into<String>, base_servings: Option<f64>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            base_servings,
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, ingredient: RecipeIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

/// Supplies recipes for placements that reference one by id instead of
/// embedding it.
pub trait RecipeSource {
    fn recipe(&self, id: i64) -> Option<&Recipe>;
}

impl RecipeSource for [Recipe] {
    fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.iter().find(|r| r.id == Some(id))
    }
}

impl RecipeSource for Vec<Recipe> {
    fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.as_slice().recipe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_servings_alias() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 1,
            "title": "Chili",
            "servings": 4,
            "ingredients": []
        }))
        .unwrap();

        assert_eq!(recipe.base_servings, Some(4.0));
    }

    #[test]
    fn test_base_servings_wins_over_servings() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 1,
            "title": "Chili",
            "servings": 4,
            "baseServings": 4,
            "ingredients": []
        }))
        .unwrap();
        assert_eq!(recipe.base_servings, Some(4.0));

        let recipe: Recipe = serde_json::from_value(json!({
            "baseServings": 2,
            "servings": 6
        }))
        .unwrap();
        assert_eq!(recipe.base_servings, Some(2.0));

        let recipe: Recipe = serde_json::from_value(json!({
            "baseServings": "lots",
            "servings": 6
        }))
        .unwrap();
        assert_eq!(recipe.base_servings, Some(6.0));
    }

    #[test]
    fn test_null_ingredient_is_skipped() {
        let recipe: Recipe = serde_json::from_value(json!({
            "title": "Rice bowl",
            "ingredients": [null, {"name": "Rice", "quantity": 1, "unit": "cup"}]
        }))
        .unwrap();

        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].name.as_deref(), Some("Rice"));
    }

    #[test]
    fn test_degraded_fields_decode_as_absent() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "abc",
            "title": null,
            "baseServings": "plenty",
            "ingredients": [
                {"name": "Salt", "quantity": "to taste", "unit": false},
                {"name": 42, "quantity": "1/2", "unit": "cup"}
            ]
        }))
        .unwrap();

        assert_eq!(recipe.id, None);
        assert_eq!(recipe.title, "");
        assert_eq!(recipe.base_servings, None);
        assert_eq!(recipe.ingredients[0].quantity, None);
        assert_eq!(recipe.ingredients[0].unit, None);
        assert_eq!(recipe.ingredients[1].name.as_deref(), Some("42"));
        assert_eq!(recipe.ingredients[1].quantity, Some(0.5));
    }

    #[test]
    fn test_ingredients_must_be_a_list() {
        let result: Result<Recipe, _> = serde_json::from_value(json!({
            "title": "Broken",
            "ingredients": "flour, eggs"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_slice_source_finds_by_id() {
        let catalog = vec![Recipe::new(1, "Soup", Some(2.0)), Recipe::new(2, "Salad", None)];

        assert_eq!(catalog.recipe(2).map(|r| r.title.as_str()), Some("Salad"));
        assert!(catalog.recipe(3).is_none());
    }
}
