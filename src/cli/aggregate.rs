use std::path::Path;

use anyhow::{Context, Result};
use mealflo_shopping::ListOrder;

use crate::routes::shopping::{ShoppingListResponse, build};

/// Aggregate a week snapshot file and return the response the HTTP API would give
pub async fn aggregate_file(
    config: &crate::config::Config,
    path: &Path,
    order: Option<ListOrder>,
) -> Result<ShoppingListResponse> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading week snapshot {}", path.display()))?;

    let snapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing week snapshot {}", path.display()))?;

    let mut options = config.shopping.options();
    if let Some(order) = order {
        options.order = order;
    }

    Ok(build(snapshot, options)?)
}

/// `mealflo aggregate <FILE>`: print the shopping list as JSON
pub async fn run(
    config: crate::config::Config,
    path: &Path,
    order: Option<ListOrder>,
) -> Result<()> {
    let response = aggregate_file(&config, path, order).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
