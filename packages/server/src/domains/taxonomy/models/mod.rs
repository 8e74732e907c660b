use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::pagination::ValidatedPage;
use crate::common::CategoryId;

/// Taxonomy label assigned to alternatives for browsing/filtering.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Find all categories ordered by slug
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY slug")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// One page of categories, cursor on id
    pub async fn find_paginated(page: &ValidatedPage, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
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

    /// Find category by slug
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find or create a category by slug
    pub async fn find_or_create(
        slug: &str,
        name: &str,
        description: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, slug, name, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                description = COALESCE(EXCLUDED.description, categories.description)
            RETURNING *
            "#,
        )
        .bind(CategoryId::new())
        .bind(slug)
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// The set of slugs that exist in the store. The matcher resolves rule
    /// categories against this set before accepting a match.
    pub async fn existing_slugs(pool: &PgPool) -> Result<HashSet<String>> {
        let slugs: Vec<(String,)> = sqlx::query_as("SELECT slug FROM categories")
            .fetch_all(pool)
            .await?;
        Ok(slugs.into_iter().map(|(slug,)| slug).collect())
    }

    /// Count categories
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
