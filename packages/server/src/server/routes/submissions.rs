//! Submission endpoints: duplicate gating, backlink verification, the
//! terminal create, and the claim path for ownerless collisions.

use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{AlternativeId, ApiError};
use crate::domains::catalog::SubmissionPlan;
use crate::domains::submission::actions::{self, DuplicateCheckResult, SubmitInput};
use crate::domains::submission::models::FormFields;
use crate::server::app::AppState;
use crate::server::middleware::{MaybeAuth, RequireAuth};

#[derive(Debug, Deserialize)]
pub struct CheckDuplicateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub repository_url: String,
}

/// POST /api/submissions/check-duplicate
///
/// Available without sign-in, but only signed-in callers get claimable
/// results.
pub async fn check_duplicate(
    Extension(state): Extension<AppState>,
    MaybeAuth(user): MaybeAuth,
    Json(request): Json<CheckDuplicateRequest>,
) -> Result<Json<DuplicateCheckResult>, ApiError> {
    let result = actions::check_duplicate(
        &request.name,
        &request.repository_url,
        user.map(|u| u.user_id),
        &state.db_pool,
    )
    .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct VerifyBacklinkRequest {
    pub website_url: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyBacklinkResponse {
    pub verified: bool,
}

/// POST /api/submissions/verify-backlink
pub async fn verify_backlink(
    Extension(state): Extension<AppState>,
    Json(request): Json<VerifyBacklinkRequest>,
) -> Result<Json<VerifyBacklinkResponse>, ApiError> {
    if request.website_url.trim().is_empty() {
        return Err(ApiError::Validation("website_url is required".to_string()));
    }
    let verified = state
        .backlink_verifier
        .verify(request.website_url.trim())
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    Ok(Json(VerifyBacklinkResponse { verified }))
}

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub form: FormFields,
    #[serde(default)]
    pub plan: SubmissionPlan,
    pub payment_ref: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSubmissionResponse {
    pub id: Uuid,
    pub slug: String,
    pub status: String,
}

/// POST /api/submissions - the terminal action
pub async fn create_submission(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateSubmissionRequest>,
) -> Result<Json<CreateSubmissionResponse>, ApiError> {
    let record = actions::create_submission(
        SubmitInput {
            fields: request.form,
            plan: request.plan,
            payment_ref: request.payment_ref,
        },
        user.user_id,
        &state.backlink_verifier,
        &state.db_pool,
    )
    .await?;

    Ok(Json(CreateSubmissionResponse {
        id: record.id.into_uuid(),
        slug: record.slug,
        status: record.status,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub existing_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub slug: String,
    pub owner_id: Uuid,
}

/// POST /api/submissions/claim
pub async fn claim(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let record = actions::claim_alternative(
        AlternativeId::from_uuid(request.existing_id),
        user.user_id,
        &state.db_pool,
    )
    .await?;

    Ok(Json(ClaimResponse {
        id: record.id.into_uuid(),
        slug: record.slug,
        owner_id: record
            .owner_id
            .map(|id| id.into_uuid())
            .unwrap_or_default(),
    }))
}
