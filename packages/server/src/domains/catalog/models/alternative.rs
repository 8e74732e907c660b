use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::pagination::ValidatedPage;
use crate::common::utils::{name_fingerprint, normalize_repository_url};
use crate::common::{AlternativeId, CategoryId, ProprietaryToolId, TechStackId, UserId};

/// Lifecycle status of a directory entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlternativeStatus {
    Pending,
    Approved,
    Rejected,
}

impl AlternativeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlternativeStatus::Pending => "pending",
            AlternativeStatus::Approved => "approved",
            AlternativeStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for AlternativeStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(AlternativeStatus::Pending),
            "approved" => Ok(AlternativeStatus::Approved),
            "rejected" => Ok(AlternativeStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid alternative status: {}", s)),
        }
    }
}

/// Submission tier. `Free` is gated on a verified backlink, `Sponsor` on a
/// completed payment confirmation; the two gates are never active together.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPlan {
    #[default]
    Free,
    Sponsor,
}

impl SubmissionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionPlan::Free => "free",
            SubmissionPlan::Sponsor => "sponsor",
        }
    }
}

impl std::str::FromStr for SubmissionPlan {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "free" => Ok(SubmissionPlan::Free),
            "sponsor" => Ok(SubmissionPlan::Sponsor),
            _ => Err(anyhow::anyhow!("Invalid submission plan: {}", s)),
        }
    }
}

/// A directory entry: an open-source project positioned as a substitute for
/// one or more proprietary products.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alternative {
    pub id: AlternativeId,
    pub slug: String,
    pub name: String,
    pub name_fingerprint: String,
    pub tagline: String,
    pub description: String,
    pub repository_url: String,
    pub repository_url_normalized: String,
    pub website: Option<String>,
    pub license: String,
    pub status: String,
    pub plan: String,
    pub owner_id: Option<UserId>,
    pub backlink_verified: bool,
    pub payment_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an alternative. Fingerprint and normalized URL are
/// derived here so every insert path shares the same normalization.
#[derive(Debug, Clone)]
pub struct CreateAlternative {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub repository_url: String,
    pub website: Option<String>,
    pub license: String,
    pub status: AlternativeStatus,
    pub plan: SubmissionPlan,
    pub owner_id: Option<UserId>,
    pub backlink_verified: bool,
    pub payment_ref: Option<String>,
}

impl Alternative {
    /// Insert a new entry.
    pub async fn create(input: CreateAlternative, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Alternative>(
            r#"
            INSERT INTO alternatives (
                id, slug, name, name_fingerprint, tagline, description,
                repository_url, repository_url_normalized, website, license,
                status, plan, owner_id, backlink_verified, payment_ref
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(AlternativeId::new())
        .bind(&input.slug)
        .bind(&input.name)
        .bind(name_fingerprint(&input.name))
        .bind(&input.tagline)
        .bind(&input.description)
        .bind(&input.repository_url)
        .bind(normalize_repository_url(&input.repository_url))
        .bind(&input.website)
        .bind(&input.license)
        .bind(input.status.as_str())
        .bind(input.plan.as_str())
        .bind(input.owner_id)
        .bind(input.backlink_verified)
        .bind(&input.payment_ref)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find by ID
    pub async fn find_by_id(id: AlternativeId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Alternative>("SELECT * FROM alternatives WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find by slug
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Alternative>("SELECT * FROM alternatives WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// One page of approved entries, optionally filtered by category slug.
    pub async fn find_approved_paginated(
        category_slug: Option<&str>,
        page: &ValidatedPage,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Alternative>(
            r#"
            SELECT a.*
            FROM alternatives a
            WHERE a.status = 'approved'
              AND ($1::uuid IS NULL OR a.id > $1)
              AND (
                  $2::text IS NULL
                  OR EXISTS (
                      SELECT 1
                      FROM alternative_categories ac
                      INNER JOIN categories c ON c.id = ac.category_id
                      WHERE ac.alternative_id = a.id AND c.slug = $2
                  )
              )
            ORDER BY a.id
            LIMIT $3
            "#,
        )
        .bind(page.after)
        .bind(category_slug)
        .bind(page.limit + 1)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Look for an existing approved or pending record colliding with the
    /// candidate's normalized name or repository URL.
    pub async fn find_duplicate(
        name: &str,
        repository_url: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Alternative>(
            r#"
            SELECT * FROM alternatives
            WHERE status IN ('approved', 'pending')
              AND (name_fingerprint = $1 OR repository_url_normalized = $2)
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(name_fingerprint(name))
        .bind(normalize_repository_url(repository_url))
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Assign ownership of an ownerless record to `user_id`. Returns `None`
    /// when the record is already owned (or does not exist) so callers can
    /// distinguish a lost race from success.
    pub async fn claim(
        id: AlternativeId,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Alternative>(
            r#"
            UPDATE alternatives
            SET owner_id = $2, updated_at = now()
            WHERE id = $1 AND owner_id IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the category links of an entry, preserving list order.
    pub async fn set_categories(
        id: AlternativeId,
        category_ids: &[CategoryId],
        pool: &PgPool,
    ) -> Result<()> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM alternative_categories WHERE alternative_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for (position, category_id) in category_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO alternative_categories (alternative_id, category_id, position)
                VALUES ($1, $2, $3)
                ON CONFLICT (alternative_id, category_id) DO NOTHING
                "#,
            )
            .bind(id)
            .bind(category_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Link an entry to a proprietary target.
    pub async fn link_proprietary(
        id: AlternativeId,
        tool_id: ProprietaryToolId,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO alternative_proprietary (alternative_id, proprietary_tool_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(tool_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Link an entry to a tech stack.
    pub async fn link_tech_stack(
        id: AlternativeId,
        tech_stack_id: TechStackId,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO alternative_tech_stacks (alternative_id, tech_stack_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(tech_stack_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Category slugs of an entry, in stored position order.
    pub async fn category_slugs(id: AlternativeId, pool: &PgPool) -> Result<Vec<String>> {
        let slugs: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT c.slug
            FROM categories c
            INNER JOIN alternative_categories ac ON ac.category_id = c.id
            WHERE ac.alternative_id = $1
            ORDER BY ac.position
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(slugs.into_iter().map(|(slug,)| slug).collect())
    }

    /// Count entries
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM alternatives")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
