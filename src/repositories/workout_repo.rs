use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Provider, WorkoutRecord};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Persist a plan document verbatim. The document is opaque from here
    /// on; it is never re-parsed, only replaced.
    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        provider: Provider,
        plan: &serde_json::Value,
    ) -> Result<WorkoutRecord> {
        let pool = self.pool.clone();
        let record = WorkoutRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            provider,
            plan: plan.clone(),
            created_at: Utc::now(),
        };
        let record_clone = record.clone();
        let plan_text = serde_json::to_string(plan)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let provider_text = if provider == Provider::Openai {
            "openai"
        } else {
            "fallback"
        };

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workout_plans (id, user_id, title, provider, plan, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    record_clone.id,
                    record_clone.user_id,
                    record_clone.title,
                    provider_text,
                    plan_text,
                    record_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<WorkoutRecord>> {
        let pool = self.pool.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workout_plans WHERE id = ?")?;
            let result = stmt.query_row([&id], WorkoutRecord::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<WorkoutRecord>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM workout_plans WHERE user_id = ? ORDER BY created_at DESC",
            )?;
            let records = stmt
                .query_map([&user_id], WorkoutRecord::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Replace title and/or the whole document. Editing is replacement, not
    /// a field-level patch.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        title: Option<&str>,
        plan: Option<&serde_json::Value>,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        let title = title.map(|t| t.to_string());
        let plan_text = match plan {
            Some(value) => Some(
                serde_json::to_string(value).map_err(|e| AppError::Internal(e.to_string()))?,
            ),
            None => None,
        };

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE workout_plans SET
                    title = COALESCE(?, title),
                    plan = COALESCE(?, plan)
                 WHERE id = ? AND user_id = ?",
                rusqlite::params![title, plan_text, id, user_id],
            )?;
            Ok(rows > 0)
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
                "DELETE FROM workout_plans WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
