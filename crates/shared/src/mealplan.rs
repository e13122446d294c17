use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::recipe::{Recipe, RecipeSource};

/// Most recipes the planner lets a user place in one meal group
pub const MAX_RECIPES_PER_GROUP: usize = 5;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A recipe scheduled into a meal group
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealGroupRecipe {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub recipe_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub recipe: Option<Recipe>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub planned_servings: Option<f64>,
    #[serde(default, deserialize_with = "lenient::ordinal")]
    pub sort_order: i64,
}

impl MealGroupRecipe {
    pub fn embedded(recipe: Recipe, planned_servings: Option<f64>) -> Self {
        Self {
            recipe_id: recipe.id,
            recipe: Some(recipe),
            planned_servings,
            ..Default::default()
        }
    }

    pub fn referenced(recipe_id: i64, planned_servings: Option<f64>) -> Self {
        Self {
            recipe_id: Some(recipe_id),
            planned_servings,
            ..Default::default()
        }
    }

    /// The embedded recipe, or the one `source` holds under `recipe_id`
    pub fn resolve<'a, S>(&'a self, source: &'a S) -> Option<&'a Recipe>
    where
        S: RecipeSource + ?Sized,
    {
        self.recipe
            .as_ref()
            .or_else(|| self.recipe_id.and_then(|id| source.recipe(id)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", from = "MealGroupRecord")]
pub struct MealGroup {
    pub id: Option<i64>,
    pub day: Option<NaiveDate>,
    pub name: String,
    pub sort_order: i64,
    pub recipes: Vec<MealGroupRecipe>,
}

/// Wire form of a meal group. Placements arrive as `recipes` or, from some
/// clients, `placements`; a non-empty `recipes` wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealGroupRecord {
    #[serde(default, deserialize_with = "lenient::integer")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::date")]
    day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::label")]
    name: String,
    #[serde(default, deserialize_with = "lenient::ordinal")]
    sort_order: i64,
    #[serde(default, deserialize_with = "lenient::list")]
    recipes: Vec<MealGroupRecipe>,
    #[serde(default, deserialize_with = "lenient::list")]
    placements: Vec<MealGroupRecipe>,
}

impl From<MealGroupRecord> for MealGroup {
    fn from(record: MealGroupRecord) -> Self {
        let recipes = if record.recipes.is_empty() {
            record.placements
        } else {
            record.recipes
        };

        Self {
            id: record.id,
            day: record.day,
            name: record.name,
            sort_order: record.sort_order,
            recipes,
        }
    }
}

impl MealGroup {
    pub fn new(name: impl Into<String>, day: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            day,
            ..Default::default()
        }
    }

    pub fn with_placement(mut self, placement: MealGroupRecipe) -> Self {
        self.recipes.push(placement);
        self
    }

    pub fn is_over_capacity(&self) -> bool {
        self.recipes.len() > MAX_RECIPES_PER_GROUP
    }
}

/// Everything a user scheduled for one week, fully resolved for aggregation
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekSnapshot {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub week_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub meal_groups: Vec<MealGroup>,
    /// Recipes referenced by `recipeId` from placements that do not embed one
    #[serde(default, deserialize_with = "lenient::list")]
    pub recipes: Vec<Recipe>,
}

impl WeekSnapshot {
    pub fn new(id: Option<i64>) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_group(mut self, group: MealGroup) -> Self {
        self.meal_groups.push(group);
        self
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Decode a week snapshot from its JSON transport form.
    ///
    /// Fails only when the tree itself cannot be walked; malformed leaf
    /// values decode as absent.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        match value {
            Value::Null => Err(SnapshotError::InvalidInput(
                "week snapshot is missing".to_string(),
            )),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| SnapshotError::InvalidInput(e.to_string())),
            other => Err(SnapshotError::InvalidInput(format!(
                "week snapshot must be an object, found {}",
                lenient::kind(&other)
            ))),
        }
    }

    pub fn placement_count(&self) -> usize {
        self.meal_groups.iter().map(|g| g.recipes.len()).sum()
    }
}

impl RecipeSource for WeekSnapshot {
    fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.recipes.recipe(id)
    }
}
