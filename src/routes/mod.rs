use std::sync::Arc;

use axum::{Router, routing::get};
use mealflo_shopping::AggregationOptions;

use crate::store::WeekStore;

pub mod health;
pub mod shopping;

#[derive(Clone)]
pub struct AppState {
    pub options: AggregationOptions,
    pub store: Arc<dyn WeekStore>,
}

impl AppState {
    pub fn new(options: AggregationOptions, store: impl WeekStore + 'static) -> Self {
        Self {
            options,
            store: Arc::new(store),
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health::health))
        .route(
            "/shopping-lists",
            get(shopping::show).post(shopping::create),
        )
        .with_state(app_state)
}
