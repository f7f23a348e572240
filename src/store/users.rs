//! User repository (provisioning collaborator)

use sqlx::PgPool;
use uuid::Uuid;

use super::{Scope, StoreError};
use crate::models::User;

pub struct UserRepo;

impl UserRepo {
    /// Get user by ID
    pub async fn get_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users_tb WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Get user by username
    pub async fn get_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users_tb WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Create a user inside a scope (provisioned together with its wallet)
    pub async fn create(tx: &mut Scope<'_>, username: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users_tb (username) VALUES ($1) RETURNING id, username, created_at",
        )
        .bind(username)
        .fetch_one(&mut **tx)
        .await?;

        Ok(user)
    }
}
