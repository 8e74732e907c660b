//! Single-slot draft endpoints. All of them require authentication and
//! none of them validate form completeness: drafts may be partial.

use axum::extract::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::ApiError;
use crate::domains::catalog::SubmissionPlan;
use crate::domains::submission::models::{Draft, FormFields};
use crate::server::app::AppState;
use crate::server::middleware::RequireAuth;

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub form: FormFields,
    #[serde(default)]
    pub plan: SubmissionPlan,
    pub payment_ref: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub form: FormFields,
    pub plan: SubmissionPlan,
    pub payment_ref: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Draft> for DraftResponse {
    type Error = anyhow::Error;

    fn try_from(draft: Draft) -> anyhow::Result<Self> {
        Ok(Self {
            form: draft.form.0,
            plan: SubmissionPlan::from_str(&draft.plan)?,
            payment_ref: draft.payment_ref,
            updated_at: draft.updated_at,
        })
    }
}

/// GET /api/drafts - load the caller's draft, if any
pub async fn load_draft(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Option<DraftResponse>>, ApiError> {
    let draft = Draft::find_by_user(user.user_id, &state.db_pool).await?;
    let response = draft.map(DraftResponse::try_from).transpose()?;
    Ok(Json(response))
}

/// PUT /api/drafts - save (overwrite) the caller's draft
pub async fn save_draft(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SaveDraftRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let draft = Draft::upsert(
        user.user_id,
        &request.form,
        request.plan,
        request.payment_ref.as_deref(),
        &state.db_pool,
    )
    .await?;
    Ok(Json(DraftResponse::try_from(draft)?))
}

#[derive(Debug, Serialize)]
pub struct DeleteDraftResponse {
    pub deleted: bool,
}

/// DELETE /api/drafts - delete the caller's draft
pub async fn delete_draft(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<DeleteDraftResponse>, ApiError> {
    let deleted = Draft::delete_by_user(user.user_id, &state.db_pool).await?;
    Ok(Json(DeleteDraftResponse { deleted }))
}
