use std::collections::HashMap;

use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Comment, FromSqliteRow, Post, PostWithComments};

#[derive(Clone)]
pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Newest-first feed with comments attached, capped at `limit` posts.
    pub async fn list(&self, limit: i64) -> Result<Vec<PostWithComments>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM posts ORDER BY created_at DESC LIMIT ?")?;
            let posts = stmt
                .query_map([limit], Post::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut comments_by_post: HashMap<String, Vec<Comment>> = HashMap::new();
            let mut stmt = conn.prepare(
                "SELECT c.* FROM comments c
                 JOIN posts p ON c.post_id = p.id
                 ORDER BY c.created_at ASC",
            )?;
            for comment in stmt.query_map([], Comment::from_row)? {
                let comment = comment?;
                comments_by_post
                    .entry(comment.post_id.clone())
                    .or_default()
                    .push(comment);
            }

            Ok(posts
                .into_iter()
                .map(|post| {
                    let comments = comments_by_post.remove(&post.id).unwrap_or_default();
                    PostWithComments { post, comments }
                })
                .collect())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        let pool = self.pool.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM posts WHERE id = ?")?;
            let result = stmt.query_row([&id], Post::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, author: &AuthUser, content: &str) -> Result<Post> {
        let pool = self.pool.clone();
        let post = Post {
            id: Uuid::new_v4().to_string(),
            user_id: author.id.clone(),
            author_name: author.full_name(),
            author_avatar: author.avatar.clone(),
            content: content.to_string(),
            likes: 0,
            created_at: Utc::now(),
        };
        let post_clone = post.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO posts (id, user_id, author_name, author_avatar, content, likes, created_at)
                 VALUES (?, ?, ?, ?, ?, 0, ?)",
                rusqlite::params![
                    post_clone.id,
                    post_clone.user_id,
                    post_clone.author_name,
                    post_clone.author_avatar,
                    post_clone.content,
                    post_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(post)
    }

    /// Delete a post the caller authored. Comments and likes cascade.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM posts WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        author: &AuthUser,
        content: &str,
    ) -> Result<Comment> {
        let pool = self.pool.clone();
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.to_string(),
            user_id: author.id.clone(),
            author_name: author.full_name(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        let comment_clone = comment.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO comments (id, post_id, user_id, author_name, content, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    comment_clone.id,
                    comment_clone.post_id,
                    comment_clone.user_id,
                    comment_clone.author_name,
                    comment_clone.content,
                    comment_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(comment)
    }

    /// Delete a comment the caller authored, scoped to its post.
    pub async fn delete_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let post_id = post_id.to_string();
        let comment_id = comment_id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM comments WHERE id = ? AND post_id = ? AND user_id = ?",
                rusqlite::params![comment_id, post_id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Toggle the caller's like on a post. Returns `(now_liked, like_count)`.
    pub async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<(bool, i64)> {
        let pool = self.pool.clone();
        let post_id = post_id.to_string();
        let user_id = user_id.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            // OR IGNORE makes racing first-likes land on the unlike branch
            // instead of tripping the primary key.
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)",
                rusqlite::params![post_id, user_id, now],
            )?;

            let liked = if inserted > 0 {
                tx.execute("UPDATE posts SET likes = likes + 1 WHERE id = ?", [&post_id])?;
                true
            } else {
                tx.execute(
                    "DELETE FROM post_likes WHERE post_id = ? AND user_id = ?",
                    rusqlite::params![post_id, user_id],
                )?;
                tx.execute(
                    "UPDATE posts SET likes = MAX(0, likes - 1) WHERE id = ?",
                    [&post_id],
                )?;
                false
            };

            let likes: i64 =
                tx.query_row("SELECT likes FROM posts WHERE id = ?", [&post_id], |row| {
                    row.get(0)
                })?;
            tx.commit()?;
            Ok((liked, likes))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
