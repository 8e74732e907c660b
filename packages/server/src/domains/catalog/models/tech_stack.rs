use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::TechStackId;

/// A technology label (language, framework, runtime) the form offers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TechStack {
    pub id: TechStackId,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl TechStack {
    /// Find all tech stacks ordered by slug
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, TechStack>("SELECT * FROM tech_stacks ORDER BY slug")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the stacks matching any of the given slugs
    pub async fn find_by_slugs(slugs: &[String], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, TechStack>(
            "SELECT * FROM tech_stacks WHERE slug = ANY($1) ORDER BY slug",
        )
        .bind(slugs)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find or create a tech stack by slug
    pub async fn find_or_create(slug: &str, name: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, TechStack>(
            r#"
            INSERT INTO tech_stacks (id, slug, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(TechStackId::new())
        .bind(slug)
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
