//! Read-only label endpoints the submission form populates itself from.

use axum::extract::{Extension, Query};
use axum::Json;

use crate::common::pagination::{Page, PageArgs};
use crate::common::ApiError;
use crate::domains::catalog::{ProprietaryTool, TechStack};
use crate::domains::taxonomy::Category;
use crate::server::app::AppState;

/// GET /api/categories
pub async fn list_categories(
    Extension(state): Extension<AppState>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<Category>>, ApiError> {
    let page = args
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    let rows = Category::find_paginated(&page, &state.db_pool).await?;
    Ok(Json(Page::from_rows(rows, page.limit, |c| {
        c.id.into_uuid()
    })))
}

/// GET /api/proprietary
pub async fn list_proprietary(
    Extension(state): Extension<AppState>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<ProprietaryTool>>, ApiError> {
    let page = args
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    let rows = ProprietaryTool::find_paginated(&page, &state.db_pool).await?;
    Ok(Json(Page::from_rows(rows, page.limit, |t| {
        t.id.into_uuid()
    })))
}

/// GET /api/tech-stacks
pub async fn list_tech_stacks(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<TechStack>>, ApiError> {
    let stacks = TechStack::find_all(&state.db_pool).await?;
    Ok(Json(stacks))
}
