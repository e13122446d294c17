use mealflo_shared::SnapshotError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShoppingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<SnapshotError> for ShoppingError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::InvalidInput(msg) => ShoppingError::InvalidInput(msg),
        }
    }
}
