//! Sponsor payment endpoints. The processor is an external collaborator;
//! these endpoints only record the initiation and the capture callback.

use axum::extract::{Extension, Path};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{ApiError, PaymentId};
use crate::domains::payment::actions;
use crate::server::app::AppState;
use crate::server::middleware::RequireAuth;

#[derive(Debug, Deserialize)]
pub struct InitiatePaymentRequest {
    pub coupon_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitiatePaymentResponse {
    pub payment_id: Uuid,
    pub amount: Decimal,
}

/// POST /api/payments
pub async fn initiate_payment(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<Json<InitiatePaymentResponse>, ApiError> {
    let payment = actions::initiate_payment(
        user.user_id,
        state.sponsor_price,
        request.coupon_code.as_deref(),
        &state.db_pool,
    )
    .await?;

    Ok(Json(InitiatePaymentResponse {
        payment_id: payment.id.into_uuid(),
        amount: payment.amount,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    pub capture_id: String,
}

#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    pub payment_id: Uuid,
    pub status: String,
    /// The token the form passes along as its payment confirmation.
    pub payment_ref: String,
}

/// POST /api/payments/:id/capture - the processor callback
pub async fn capture_payment(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CaptureRequest>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let payment = actions::capture_payment(
        PaymentId::from_uuid(id),
        &request.capture_id,
        &state.db_pool,
    )
    .await?;

    Ok(Json(CaptureResponse {
        payment_id: payment.id.into_uuid(),
        status: payment.status.clone(),
        payment_ref: payment.capture_id.unwrap_or_default(),
    }))
}
