//! MySQL implementation of the UserRepository trait.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ne_core::domain::entities::user::User;
use ne_core::errors::DomainError;
use ne_core::repositories::UserRepository;

use super::{column_error, millis_to_datetime};
use crate::bounded;
use crate::database::DatabasePool;

/// MySQL implementation of UserRepository over the `users` table
pub struct MySqlUserRepository {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    /// * `query_timeout` - Upper bound on each query
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Build a repository sharing the pool and its configured timeout
    pub fn from_pool(pool: &DatabasePool) -> Self {
        Self::new(pool.get_pool().clone(), pool.query_timeout())
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let pwd_update_time: DateTime<Utc> = row
            .try_get("pwd_update_time")
            .map_err(|e| column_error("pwd_update_time", e))?;
        let is_superuser: Option<bool> = row.try_get("super").map_err(|e| column_error("super", e))?;

        Ok(User {
            uid: row.try_get("uid").map_err(|e| column_error("uid", e))?,
            password_hash: row.try_get("pwh").map_err(|e| column_error("pwh", e))?,
            display_name: row.try_get("name").map_err(|e| column_error("name", e))?,
            phone: row.try_get("tel").map_err(|e| column_error("tel", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            pwd_update_time: pwd_update_time.timestamp_millis(),
            is_superuser: is_superuser.unwrap_or(false),
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT uid, pwh, name, tel, email, pwd_update_time, `super`
            FROM users
            WHERE uid = ?
            LIMIT 1
        "#;

        let row = bounded(
            "users.find_by_uid",
            self.query_timeout,
            sqlx::query(query).bind(uid).fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = r#"
            SELECT uid, pwh, name, tel, email, pwd_update_time, `super`
            FROM users
            ORDER BY uid
        "#;

        let rows = bounded(
            "users.list",
            self.query_timeout,
            sqlx::query(query).fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (uid, pwh, name, tel, email, pwd_update_time, `super`)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        bounded(
            "users.create",
            self.query_timeout,
            sqlx::query(query)
                .bind(&user.uid)
                .bind(&user.password_hash)
                .bind(&user.display_name)
                .bind(&user.phone)
                .bind(&user.email)
                .bind(millis_to_datetime(user.pwd_update_time)?)
                .bind(user.is_superuser)
                .execute(&self.pool),
        )
        .await?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                pwh = ?,
                name = ?,
                tel = ?,
                email = ?,
                pwd_update_time = ?,
                `super` = ?
            WHERE uid = ?
        "#;

        bounded(
            "users.update",
            self.query_timeout,
            sqlx::query(query)
                .bind(&user.password_hash)
                .bind(&user.display_name)
                .bind(&user.phone)
                .bind(&user.email)
                .bind(millis_to_datetime(user.pwd_update_time)?)
                .bind(user.is_superuser)
                .bind(&user.uid)
                .execute(&self.pool),
        )
        .await?;

        Ok(user)
    }

    async fn get_password_update_time(&self, uid: &str) -> Result<Option<i64>, DomainError> {
        let row = bounded(
            "users.get_password_update_time",
            self.query_timeout,
            sqlx::query("SELECT pwd_update_time FROM users WHERE uid = ?")
                .bind(uid)
                .fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(row) => {
                let time: DateTime<Utc> = row
                    .try_get("pwd_update_time")
                    .map_err(|e| column_error("pwd_update_time", e))?;
                Ok(Some(time.timestamp_millis()))
            }
            None => Ok(None),
        }
    }

    async fn user_exists(&self, uid: &str) -> Result<bool, DomainError> {
        let row = bounded(
            "users.user_exists",
            self.query_timeout,
            sqlx::query("SELECT 1 FROM users WHERE uid = ?")
                .bind(uid)
                .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.is_some())
    }
}
