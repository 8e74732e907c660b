use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;
use crate::domains::catalog::SubmissionPlan;

/// The persistable form field values of an in-progress submission.
///
/// This is exactly what a draft stores; transient workflow flags (duplicate
/// check cache, backlink verification) live on the machine and are absent
/// after a draft round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub license: String,
    /// Slugs of the proprietary products this project replaces.
    #[serde(default)]
    pub alternative_to: Vec<String>,
    /// Category slugs picked on the form.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Tech-stack slugs picked on the form.
    #[serde(default)]
    pub tech_stacks: Vec<String>,
}

/// Plan selection and payment confirmation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMeta {
    pub plan: SubmissionPlan,
    /// Capture id handed back by the payment processor.
    pub payment_ref: Option<String>,
    pub coupon_code: Option<String>,
}

/// Draft bookkeeping shown on the form ("last saved at ...").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMeta {
    pub last_saved_at: Option<DateTime<Utc>>,
}

/// A user's saved draft. One live draft per user: saves overwrite.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Draft {
    pub user_id: UserId,
    pub form: sqlx::types::Json<FormFields>,
    pub plan: String,
    pub payment_ref: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    /// Save (overwrite) the user's draft. Partial forms are fine; drafts
    /// are not validated for completeness.
    pub async fn upsert(
        user_id: UserId,
        form: &FormFields,
        plan: SubmissionPlan,
        payment_ref: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Draft>(
            r#"
            INSERT INTO drafts (user_id, form, plan, payment_ref, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (user_id) DO UPDATE
            SET form = EXCLUDED.form,
                plan = EXCLUDED.plan,
                payment_ref = EXCLUDED.payment_ref,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(sqlx::types::Json(form))
        .bind(plan.as_str())
        .bind(payment_ref)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Load the user's draft, if any
    pub async fn find_by_user(user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Draft>("SELECT * FROM drafts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Delete the user's draft. Returns whether a draft existed.
    pub async fn delete_by_user(user_id: UserId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drafts WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
