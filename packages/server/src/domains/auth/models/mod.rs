use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// Account that can save drafts, submit entries, and claim ownerless ones.
///
/// Credentials are opaque here: the password hash is produced by the
/// identity collaborator at registration, and OAuth sign-ins only record
/// provider + subject. The actual OAuth dance happens outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub oauth_provider: Option<String>,
    pub oauth_subject: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Find by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find by email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Register an email + password account
    pub async fn create(
        email: &str,
        display_name: Option<&str>,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, display_name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find or create an account from an OAuth identity.
    pub async fn find_or_create_oauth(
        provider: &str,
        subject: &str,
        email: &str,
        display_name: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        if let Some(user) = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE oauth_provider = $1 AND oauth_subject = $2",
        )
        .bind(provider)
        .bind(subject)
        .fetch_optional(pool)
        .await?
        {
            return Ok(user);
        }

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, display_name, oauth_provider, oauth_subject)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO UPDATE
            SET oauth_provider = EXCLUDED.oauth_provider,
                oauth_subject = EXCLUDED.oauth_subject
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(email)
        .bind(display_name)
        .bind(provider)
        .bind(subject)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
