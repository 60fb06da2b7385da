use axum::{extract::State, Json};
use serde_json::json;

use crate::db::DbPool;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct HealthState {
    pub pool: DbPool,
}

pub async fn health(State(state): State<HealthState>) -> Result<Json<serde_json::Value>> {
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let conn = pool.get()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(json!({ "status": "ok" })))
}
