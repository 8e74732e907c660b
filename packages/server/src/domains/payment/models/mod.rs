use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PaymentId, UserId};

/// Lifecycle of a sponsor payment.
///
/// `Initiated` rows that never receive a capture (modal closed, navigation
/// away) are swept to `Abandoned` by a scheduled task; nothing else is
/// rolled back, matching the workflow's no-rollback cancellation rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Initiated,
    Captured,
    Abandoned,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Initiated => "initiated",
            PaymentStatus::Captured => "captured",
            PaymentStatus::Abandoned => "abandoned",
        }
    }
}

/// A sponsor-plan payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub amount: Decimal,
    pub coupon_code: Option<String>,
    pub capture_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Record an initiated payment
    pub async fn create(
        user_id: UserId,
        amount: Decimal,
        coupon_code: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, user_id, amount, coupon_code, status)
            VALUES ($1, $2, $3, $4, 'initiated')
            RETURNING *
            "#,
        )
        .bind(PaymentId::new())
        .bind(user_id)
        .bind(amount)
        .bind(coupon_code)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find by ID
    pub async fn find_by_id(id: PaymentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Record the processor's capture for an initiated payment. Returns
    /// `None` when the payment is missing or no longer capturable.
    pub async fn capture(
        id: PaymentId,
        capture_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET capture_id = $2, status = 'captured'
            WHERE id = $1 AND status = 'initiated'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(capture_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark stale initiated payments as abandoned. Returns the number of
    /// rows swept.
    pub async fn abandon_stale(older_than: Duration, pool: &PgPool) -> Result<u64> {
        let cutoff = Utc::now() - older_than;
        let result = sqlx::query(
            "UPDATE payments SET status = 'abandoned' WHERE status = 'initiated' AND created_at < $1",
        )
        .bind(cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
