use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Post {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            author_name: row.get("author_name")?,
            author_avatar: row.get("author_avatar")?,
            content: row.get("content")?,
            likes: row.get("likes")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Comment {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            post_id: row.get("post_id")?,
            user_id: row.get("user_id")?,
            author_name: row.get("author_name")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
