//! Users repository for the auth store (portal users and profiles)

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::user::{PortalUser, SignupCount, UserWithProfile},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<PortalUser>> {
        let user = sqlx::query_as::<_, PortalUser>(
            "SELECT id, email, password, created_at FROM portal_users WHERE LOWER(email) = LOWER(?)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Create a user and its profile. The profile is written once, at signup.
    pub async fn create(&self, email: &str, password_hash: &str, full_name: &str) -> AppResult<PortalUser> {
        let user = sqlx::query_as::<_, PortalUser>(
            r#"
            INSERT INTO portal_users (email, password)
            VALUES (?, ?)
            RETURNING id, email, password, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Email already exists"))?;

        sqlx::query("INSERT INTO profiles (user_id, full_name, role) VALUES (?, ?, 'user')")
            .bind(user.id)
            .bind(full_name)
            .execute(&self.pool)
            .await?;

        Ok(user)
    }

    /// All users with profile details, newest first
    pub async fn list_with_profiles(&self) -> AppResult<Vec<UserWithProfile>> {
        let rows = sqlx::query_as::<_, UserWithProfile>(
            r#"
            SELECT u.id, u.email, p.full_name, p.phone,
                   COALESCE(p.role, 'user') AS role, u.created_at
            FROM portal_users u
            LEFT JOIN profiles p ON p.user_id = u.id
            ORDER BY u.created_at DESC, u.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Signups per day over the last seven days
    pub async fn signups_last_week(&self) -> AppResult<Vec<SignupCount>> {
        let rows = sqlx::query_as::<_, SignupCount>(
            r#"
            SELECT DATE(created_at) AS date, COUNT(*) AS count
            FROM portal_users
            WHERE created_at >= DATE('now', '-7 days')
            GROUP BY DATE(created_at)
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
