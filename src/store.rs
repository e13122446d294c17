use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

/// Supplies the raw snapshot of a planned week.
///
/// The snapshot is returned undecoded so that structural problems surface as
/// `InvalidInput` from the aggregation engine, not as store failures.
#[async_trait]
pub trait WeekStore: Send + Sync {
    async fn load_week(&self, week_id: i64) -> Result<Option<Value>, AppError>;
}

/// Week snapshots stored as `week-{id}.json` files in one directory
#[derive(Debug, Clone)]
pub struct FileWeekStore {
    dir: PathBuf,
}

impl FileWeekStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, week_id: i64) -> PathBuf {
        self.dir.join(format!("week-{week_id}.json"))
    }
}

#[async_trait]
impl WeekStore for FileWeekStore {
    async fn load_week(&self, week_id: i64) -> Result<Option<Value>, AppError> {
        let path = self.path_for(week_id);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(week_id, path = %path.display(), "week snapshot not found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// In-memory snapshots, keyed by week id
#[derive(Debug, Clone, Default)]
pub struct MemoryWeekStore {
    weeks: HashMap<i64, Value>,
}

impl MemoryWeekStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_week(mut self, week_id: i64, snapshot: Value) -> Self {
        self.weeks.insert(week_id, snapshot);
        self
    }
}

#[async_trait]
impl WeekStore for MemoryWeekStore {
    async fn load_week(&self, week_id: i64) -> Result<Option<Value>, AppError> {
        Ok(self.weeks.get(&week_id).cloned())
    }
}
