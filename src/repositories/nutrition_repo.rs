use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{CreateNutritionLog, FromSqliteRow, NutritionLog};

#[derive(Clone)]
pub struct NutritionRepository {
    pool: DbPool,
}

impl NutritionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, form: &CreateNutritionLog) -> Result<NutritionLog> {
        let pool = self.pool.clone();
        let log = NutritionLog {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            description: form.description.clone(),
            calories: form.calories,
            protein: form.protein,
            carbs: form.carbs,
            fat: form.fat,
            created_at: Utc::now(),
        };
        let log_clone = log.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO nutrition_logs (id, user_id, description, calories, protein, carbs, fat, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    log_clone.id,
                    log_clone.user_id,
                    log_clone.description,
                    log_clone.calories,
                    log_clone.protein,
                    log_clone.carbs,
                    log_clone.fat,
                    log_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(log)
    }

    /// Newest-first, capped at `limit`.
    pub async fn find_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<NutritionLog>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM nutrition_logs WHERE user_id = ?
                 ORDER BY created_at DESC LIMIT ?",
            )?;
            let logs = stmt
                .query_map(rusqlite::params![user_id, limit], NutritionLog::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(logs)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM nutrition_logs WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
