pub mod aggregation;
pub mod error;
pub mod list;
pub mod normalize;
pub mod scale;

// Re-export commonly used types
pub use aggregation::{AggregationOptions, IngredientAggregationService};
pub use error::ShoppingError;
pub use list::{DEFAULT_DECIMALS, ListOrder, ShoppingList, ShoppingListItem, round_quantity};
pub use normalize::{MergeKey, normalize_key};
pub use scale::{ScaledEntry, scale_factor};
