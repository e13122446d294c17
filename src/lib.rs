pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use routes::{AppState, router};
pub use store::{FileWeekStore, MemoryWeekStore, WeekStore};
