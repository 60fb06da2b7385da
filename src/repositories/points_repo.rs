use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::ledger::PointsBalance;

/// Persistence side of the points ledger.
///
/// Every delta is a single atomic UPDATE mirroring `ledger::apply_delta`:
/// the balance is floored at zero and the lifetime counter only grows on
/// positive deltas. Concurrent deltas against the same user serialize at the
/// database, so none are lost to read-modify-write races.
#[derive(Clone)]
pub struct PointsRepository {
    pool: DbPool,
}

impl PointsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn balance(&self, user_id: &str) -> Result<PointsBalance> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            read_balance(&conn, &user_id)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Apply a signed delta and return the resulting balance.
    pub async fn apply_delta(&self, user_id: &str, delta: i64) -> Result<PointsBalance> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            // Skipping the write for a zero delta is an optimization, not a
            // correctness requirement.
            if delta != 0 {
                let rows = conn.execute(
                    "UPDATE users SET
                        points = MAX(0, points + ?1),
                        lifetime_points = lifetime_points
                            + CASE WHEN ?1 > 0 THEN ?1 ELSE 0 END
                     WHERE id = ?2",
                    rusqlite::params![delta, user_id],
                )?;
                if rows == 0 {
                    return Err(AppError::NotFound("User not found".to_string()));
                }
            }
            read_balance(&conn, &user_id)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Mark a challenge completed and award its points.
    ///
    /// Completion is once per user; a duplicate attempt is rejected before
    /// any points move.
    pub async fn complete_challenge(
        &self,
        user_id: &str,
        challenge_id: &str,
        points: i64,
    ) -> Result<PointsBalance> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let challenge_id = challenge_id.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            // Completion row and award commit together; a failed award must
            // not leave a completion that blocks every retry.
            let tx = conn.transaction()?;
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO challenge_completions (user_id, challenge_id, completed_at)
                 VALUES (?, ?, ?)",
                rusqlite::params![user_id, challenge_id, now],
            )?;
            if inserted == 0 {
                return Err(AppError::Conflict("Challenge already completed".to_string()));
            }
            tx.execute(
                "UPDATE users SET
                    points = points + ?1,
                    lifetime_points = lifetime_points + ?1
                 WHERE id = ?2",
                rusqlite::params![points, user_id],
            )?;
            let balance = read_balance(&tx, &user_id)?;
            tx.commit()?;
            Ok(balance)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Redeem a reward, deducting its cost.
    ///
    /// The sufficient-balance check and the deduction are one conditional
    /// UPDATE; an insufficient balance leaves the row untouched and is
    /// reported as `Ok(None)`.
    pub async fn redeem_reward(
        &self,
        user_id: &str,
        reward_id: &str,
        cost: i64,
    ) -> Result<Option<PointsBalance>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let reward_id = reward_id.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            // Deduction and redemption record commit together
            let tx = conn.transaction()?;
            let rows = tx.execute(
                "UPDATE users SET points = points - ?1 WHERE id = ?2 AND points >= ?1",
                rusqlite::params![cost, user_id],
            )?;
            if rows == 0 {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO reward_redemptions (id, user_id, reward_id, points, redeemed_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![Uuid::new_v4().to_string(), user_id, reward_id, cost, now],
            )?;
            let balance = read_balance(&tx, &user_id)?;
            tx.commit()?;
            Ok(Some(balance))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Users ordered by current points, with feed activity counts.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT u.id, u.first_name, u.last_name, u.avatar, u.points,
                        (SELECT COUNT(*) FROM posts p WHERE p.user_id = u.id) AS posts,
                        (SELECT COUNT(*) FROM comments c WHERE c.user_id = u.id) AS comments,
                        (SELECT COALESCE(SUM(p.likes), 0) FROM posts p WHERE p.user_id = u.id)
                            AS likes_received
                 FROM users u
                 ORDER BY u.points DESC, u.created_at ASC
                 LIMIT ?",
            )?;
            let entries = stmt
                .query_map([limit], |row| {
                    let first_name: String = row.get("first_name")?;
                    let last_name: String = row.get("last_name")?;
                    Ok(LeaderboardEntry {
                        id: row.get("id")?,
                        full_name: format!("{first_name} {last_name}"),
                        avatar: row.get("avatar")?,
                        points: row.get("points")?,
                        posts: row.get("posts")?,
                        comments: row.get("comments")?,
                        likes_received: row.get("likes_received")?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub points: i64,
    pub posts: i64,
    pub comments: i64,
    pub likes_received: i64,
}

fn read_balance(conn: &rusqlite::Connection, user_id: &str) -> Result<PointsBalance> {
    let balance = conn
        .query_row(
            "SELECT points, lifetime_points FROM users WHERE id = ?",
            [user_id],
            |row| {
                Ok(PointsBalance {
                    current: row.get(0)?,
                    lifetime_earned: row.get(1)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(balance)
}
