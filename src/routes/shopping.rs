use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use mealflo_shared::WeekSnapshot;
use mealflo_shopping::{
    AggregationOptions, IngredientAggregationService, ListOrder, ShoppingError, ShoppingList,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::routes::AppState;

/// Query parameters for the shopping list endpoints
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListQuery {
    /// Required on GET; ignored on POST
    week_id: Option<String>,
    /// "first-seen" (default from config) or "alphabetical"
    order: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    pub week_id: Option<i64>,
    pub items: ShoppingList,
}

/// GET /shopping-lists?weekId=N - Shopping list for a stored week
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ShoppingListQuery>,
) -> Result<Json<ShoppingListResponse>, AppError> {
    let week_id = parse_week_id(query.week_id.as_deref())?;
    let options = resolve_options(state.options, query.order.as_deref())?;

    let snapshot = state
        .store
        .load_week(week_id)
        .await?
        .ok_or(AppError::WeekNotFound)?;

    let mut response = build(snapshot, options)?;
    response.week_id = Some(week_id);

    Ok(Json(response))
}

/// POST /shopping-lists - Shopping list for a week snapshot sent in the body
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<ShoppingListQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ShoppingListResponse>, AppError> {
    let Json(snapshot) = payload?;
    let options = resolve_options(state.options, query.order.as_deref())?;
    Ok(Json(build(snapshot, options)?))
}

/// Decode, aggregate and shape one week
pub fn build(
    snapshot: Value,
    options: AggregationOptions,
) -> Result<ShoppingListResponse, AppError> {
    let week = WeekSnapshot::from_value(snapshot).map_err(ShoppingError::from)?;
    let items = IngredientAggregationService::shopping_list(&week, options);

    tracing::info!(
        week_id = ?week.id,
        items = items.len(),
        order = %options.order,
        "shopping list built"
    );

    Ok(ShoppingListResponse {
        week_id: week.id,
        items,
    })
}

fn parse_week_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("weekId is required".to_string()))?;

    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("weekId must be an integer, got '{raw}'")))
}

fn resolve_options(
    defaults: AggregationOptions,
    order: Option<&str>,
) -> Result<AggregationOptions, AppError> {
    let Some(order) = order else {
        return Ok(defaults);
    };

    let order = ListOrder::from_str(order.trim())
        .map_err(|_| AppError::BadRequest(format!("unknown order '{order}'")))?;

    Ok(AggregationOptions { order, ..defaults })
}
