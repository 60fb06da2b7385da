use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FromSqliteRow, Provider};

/// A stored workout plan. The plan itself is an opaque JSON document from
/// the server's point of view; it is written once and replaced wholesale on
/// update, never patched field by field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub provider: Provider,
    pub plan: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for WorkoutRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let provider: String = row.get("provider")?;
        let plan: String = row.get("plan")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            title: row.get("title")?,
            provider: if provider == "openai" {
                Provider::Openai
            } else {
                Provider::Fallback
            },
            plan: serde_json::from_str(&plan).unwrap_or(serde_json::Value::Null),
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    pub title: String,
    #[serde(default)]
    pub provider: Option<Provider>,
    pub plan: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWorkout {
    pub title: Option<String>,
    pub plan: Option<serde_json::Value>,
}
