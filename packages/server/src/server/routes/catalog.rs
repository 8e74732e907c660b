//! Public browse endpoints for the directory.

use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::pagination::{Page, PageArgs};
use crate::common::ApiError;
use crate::domains::catalog::Alternative;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct BrowseArgs {
    /// Filter to a category slug.
    pub category: Option<String>,
    pub first: Option<i64>,
    pub after: Option<String>,
}

/// GET /api/alternatives
pub async fn list_alternatives(
    Extension(state): Extension<AppState>,
    Query(args): Query<BrowseArgs>,
) -> Result<Json<Page<Alternative>>, ApiError> {
    let page = PageArgs {
        first: args.first,
        after: args.after.clone(),
    }
    .validate()
    .map_err(|err| ApiError::Validation(err.to_string()))?;
    let rows =
        Alternative::find_approved_paginated(args.category.as_deref(), &page, &state.db_pool)
            .await?;
    Ok(Json(Page::from_rows(rows, page.limit, |a| {
        a.id.into_uuid()
    })))
}

#[derive(Debug, Serialize)]
pub struct AlternativeDetail {
    #[serde(flatten)]
    pub alternative: Alternative,
    pub categories: Vec<String>,
}

/// GET /api/alternatives/:slug
pub async fn get_alternative(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AlternativeDetail>, ApiError> {
    let alternative = Alternative::find_by_slug(&slug, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No alternative with slug \"{slug}\"")))?;

    let categories = Alternative::category_slugs(alternative.id, &state.db_pool).await?;

    Ok(Json(AlternativeDetail {
        alternative,
        categories,
    }))
}
