use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{CreateUser, FromSqliteRow, UpdateProfile, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?")?;
            let result = stmt.query_row([&id], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let email = email.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE email = ?")?;
            let result = stmt.query_row([&email], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, form: &CreateUser) -> Result<User> {
        let password_hash = hash_password(&form.password)?;
        let now = Utc::now();

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: form.email.clone(),
            password_hash,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            gym_level: form.gym_level.clone(),
            bio: None,
            avatar: None,
            points: 0,
            lifetime_points: 0,
            created_at: now,
        };
        let user_clone = user.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (id, email, password_hash, first_name, last_name, gym_level,
                                    points, lifetime_points, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?)",
                rusqlite::params![
                    user_clone.id,
                    user_clone.email,
                    user_clone.password_hash,
                    user_clone.first_name,
                    user_clone.last_name,
                    user_clone.gym_level,
                    user_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(user)
    }

    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        let user = self.find_by_email(email).await?;

        match user {
            Some(user) => {
                if verify_password(password, &user.password_hash)? {
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    pub async fn update_profile(&self, id: &str, form: &UpdateProfile) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let form = UpdateProfile {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            bio: form.bio.clone(),
            avatar: form.avatar.clone(),
        };

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE users SET
                    first_name = COALESCE(?, first_name),
                    last_name = COALESCE(?, last_name),
                    bio = COALESCE(?, bio),
                    avatar = COALESCE(?, avatar)
                 WHERE id = ?",
                rusqlite::params![form.first_name, form.last_name, form.bio, form.avatar, id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?
        .to_string();
    Ok(password_hash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
