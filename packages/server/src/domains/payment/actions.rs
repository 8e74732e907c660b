//! Payment actions: initiate a sponsor payment and record the processor
//! callback. The processor itself is an external collaborator; the capture
//! id it hands back is stored opaquely and later used as the submission's
//! payment confirmation token.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::common::{ApiError, PaymentId, UserId};
use crate::domains::payment::coupons::discounted_sponsor_price;
use crate::domains::payment::models::Payment;

/// Start a sponsor payment for the signed-in user.
///
/// Applies the coupon allow-list locally; an unknown code fails with a
/// validation message before anything is persisted.
pub async fn initiate_payment(
    user_id: UserId,
    base_price: Decimal,
    coupon_code: Option<&str>,
    pool: &PgPool,
) -> Result<Payment, ApiError> {
    let amount = discounted_sponsor_price(base_price, coupon_code)
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let payment = Payment::create(user_id, amount, coupon_code, pool).await?;
    info!(payment_id = %payment.id, %amount, "Sponsor payment initiated");
    Ok(payment)
}

/// Record the processor's capture callback.
pub async fn capture_payment(
    payment_id: PaymentId,
    capture_id: &str,
    pool: &PgPool,
) -> Result<Payment, ApiError> {
    if capture_id.trim().is_empty() {
        return Err(ApiError::Validation(
            "capture_id must not be empty".to_string(),
        ));
    }

    let payment = Payment::capture(payment_id, capture_id, pool)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No capturable payment with id {payment_id}"))
        })?;

    info!(payment_id = %payment.id, "Sponsor payment captured");
    Ok(payment)
}
