use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::pagination::ValidatedPage;
use crate::common::ProprietaryToolId;

/// The commercial product an alternative claims to replace.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProprietaryTool {
    pub id: ProprietaryToolId,
    pub slug: String,
    pub name: String,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProprietaryTool {
    /// Find all tools ordered by slug
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, ProprietaryTool>("SELECT * FROM proprietary_tools ORDER BY slug")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// One page of tools, cursor on id
    pub async fn find_paginated(page: &ValidatedPage, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, ProprietaryTool>(
            r#"
            SELECT * FROM proprietary_tools
            WHERE ($1::uuid IS NULL OR id > $1)
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(page.after)
        .bind(page.limit + 1)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find by slug
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, ProprietaryTool>("SELECT * FROM proprietary_tools WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the tools matching any of the given slugs
    pub async fn find_by_slugs(slugs: &[String], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, ProprietaryTool>(
            "SELECT * FROM proprietary_tools WHERE slug = ANY($1) ORDER BY slug",
        )
        .bind(slugs)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find or create a tool by slug
    pub async fn find_or_create(
        slug: &str,
        name: &str,
        website: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, ProprietaryTool>(
            r#"
            INSERT INTO proprietary_tools (id, slug, name, website)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                website = COALESCE(EXCLUDED.website, proprietary_tools.website)
            RETURNING *
            "#,
        )
        .bind(ProprietaryToolId::new())
        .bind(slug)
        .bind(name)
        .bind(website)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Count tools
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM proprietary_tools")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
