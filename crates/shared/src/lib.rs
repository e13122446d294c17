pub mod lenient;
pub mod mealplan;
pub mod quantity;
pub mod recipe;

pub use mealplan::{MAX_RECIPES_PER_GROUP, MealGroup, MealGroupRecipe, SnapshotError, WeekSnapshot};
pub use quantity::{QuantityError, is_ambiguous_quantity, parse_quantity};
pub use recipe::{Recipe, RecipeIngredient, RecipeSource};
