use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLog {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for NutritionLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            description: row.get("description")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbs: row.get("carbs")?,
            fat: row.get("fat")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNutritionLog {
    pub description: String,
    pub calories: i64,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: i64,
    #[serde(default)]
    pub fat: i64,
}
