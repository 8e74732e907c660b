//! Submission actions: the IO behind the workflow's remote operations.
//!
//! Preconditions are enforced here again, server-side, in the same order
//! the machine enforces them client-side: field validation fails before any
//! store access, the duplicate check is re-run at submit time, and a
//! successful create deletes the user's draft (draft and submitted entry
//! are mutually exclusive).

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::utils::slugify;
use crate::common::{AlternativeId, ApiError, UserId};
use crate::domains::catalog::{
    Alternative, AlternativeStatus, CreateAlternative, ProprietaryTool, SubmissionPlan, TechStack,
};
use crate::domains::submission::machines::{validate_for_submission, SubmitBlocker};
use crate::domains::submission::models::{Draft, FormFields};
use crate::domains::taxonomy::Category;
use crate::kernel::BacklinkVerifier;

/// Result of a duplicate check.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCheckResult {
    pub duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_id: Option<Uuid>,
    /// True when the colliding record has no owner and the caller is signed
    /// in: the form can offer "claim this entry" instead of a dead end.
    pub claimable: bool,
}

impl DuplicateCheckResult {
    fn clear() -> Self {
        Self {
            duplicate: false,
            reason: None,
            existing_id: None,
            claimable: false,
        }
    }
}

/// Compare a candidate's name and repository URL against existing approved
/// and pending entries.
pub async fn check_duplicate(
    name: &str,
    repository_url: &str,
    caller: Option<UserId>,
    pool: &PgPool,
) -> Result<DuplicateCheckResult, ApiError> {
    if name.trim().is_empty() && repository_url.trim().is_empty() {
        return Err(ApiError::Validation(
            "Provide a name or repository URL to check".to_string(),
        ));
    }

    let existing = Alternative::find_duplicate(name, repository_url, pool).await?;
    let Some(existing) = existing else {
        return Ok(DuplicateCheckResult::clear());
    };

    let reason = if crate::common::utils::name_fingerprint(name) == existing.name_fingerprint {
        format!("An entry named \"{}\" already exists", existing.name)
    } else {
        "This repository is already listed".to_string()
    };

    Ok(DuplicateCheckResult {
        duplicate: true,
        reason: Some(reason),
        existing_id: Some(existing.id.into_uuid()),
        claimable: existing.owner_id.is_none() && caller.is_some(),
    })
}

/// Input to the terminal create-submission action.
#[derive(Debug, Clone)]
pub struct SubmitInput {
    pub fields: FormFields,
    pub plan: SubmissionPlan,
    pub payment_ref: Option<String>,
}

fn blocker_to_error(blocker: SubmitBlocker) -> ApiError {
    match blocker {
        SubmitBlocker::PaymentNotCompleted => ApiError::PaymentRequired(blocker.to_string()),
        other => ApiError::Validation(other.to_string()),
    }
}

/// Create the pending directory entry.
///
/// Precondition order: (1) license, (2) alternative-to selection, (3) the
/// active plan's gate, then the duplicate re-check, then the insert. Field
/// failures abort before any network or store call. On success the user's
/// draft is deleted.
pub async fn create_submission(
    input: SubmitInput,
    user_id: UserId,
    verifier: &BacklinkVerifier,
    pool: &PgPool,
) -> Result<Alternative, ApiError> {
    let SubmitInput {
        fields,
        plan,
        payment_ref,
    } = input;

    // Field + sponsor-gate validation, no IO yet. The backlink flag is
    // deferred: it needs a fetch, which must come after field validation.
    validate_for_submission(&fields, plan, payment_ref.as_deref(), true)
        .map_err(blocker_to_error)?;

    if plan == SubmissionPlan::Free {
        let website = fields
            .website
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .ok_or_else(|| {
                ApiError::Validation(SubmitBlocker::MissingWebsite.to_string())
            })?;
        let verified = verifier
            .verify(website)
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        if !verified {
            return Err(ApiError::Validation(
                SubmitBlocker::BacklinkNotVerified.to_string(),
            ));
        }
    }

    // Duplicate re-check at submit time; the form-level cache may be stale.
    if let Some(existing) =
        Alternative::find_duplicate(&fields.name, &fields.repository_url, pool).await?
    {
        return Err(ApiError::Duplicate {
            reason: format!("\"{}\" is already listed", existing.name),
            existing_id: Some(existing.id.into_uuid()),
            claimable: existing.owner_id.is_none(),
        });
    }

    let slug = unique_slug(&fields.name, pool).await?;
    let record = Alternative::create(
        CreateAlternative {
            slug,
            name: fields.name.clone(),
            tagline: fields.tagline.clone(),
            description: fields.description.clone(),
            repository_url: fields.repository_url.clone(),
            website: fields.website.clone(),
            license: fields.license.clone(),
            status: AlternativeStatus::Pending,
            plan,
            owner_id: Some(user_id),
            backlink_verified: plan == SubmissionPlan::Free,
            payment_ref,
        },
        pool,
    )
    .await?;

    link_labels(&record, &fields, pool).await?;

    // Draft and final submission are mutually exclusive terminal states.
    Draft::delete_by_user(user_id, pool).await?;

    info!(record_id = %record.id, plan = plan.as_str(), "Submission created");
    Ok(record)
}

/// Claim an existing ownerless entry instead of creating a duplicate.
pub async fn claim_alternative(
    id: AlternativeId,
    user_id: UserId,
    pool: &PgPool,
) -> Result<Alternative, ApiError> {
    let existing = Alternative::find_by_id(id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No entry with id {id}")))?;

    if existing.owner_id.is_some() {
        return Err(ApiError::Validation(
            "This entry already has an owner".to_string(),
        ));
    }

    let claimed = Alternative::claim(id, user_id, pool).await?.ok_or_else(|| {
        // Lost a race with another claimer.
        ApiError::Validation("This entry already has an owner".to_string())
    })?;

    info!(record_id = %claimed.id, %user_id, "Entry claimed");
    Ok(claimed)
}

/// Resolve the form's label slugs and create the junction rows. Unresolved
/// slugs are dropped, matching taxonomy resolution everywhere else.
async fn link_labels(
    record: &Alternative,
    fields: &FormFields,
    pool: &PgPool,
) -> Result<(), ApiError> {
    if !fields.categories.is_empty() {
        let mut category_ids = Vec::with_capacity(fields.categories.len());
        for slug in &fields.categories {
            if let Some(category) = Category::find_by_slug(slug, pool).await? {
                category_ids.push(category.id);
            }
        }
        Alternative::set_categories(record.id, &category_ids, pool).await?;
    }

    for tool in ProprietaryTool::find_by_slugs(&fields.alternative_to, pool).await? {
        Alternative::link_proprietary(record.id, tool.id, pool).await?;
    }

    for stack in TechStack::find_by_slugs(&fields.tech_stacks, pool).await? {
        Alternative::link_tech_stack(record.id, stack.id, pool).await?;
    }

    Ok(())
}

/// Derive a slug from the name, suffixing on collision with any existing
/// entry (including rejected ones, which keep their slugs).
async fn unique_slug(name: &str, pool: &PgPool) -> Result<String, ApiError> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if Alternative::find_by_slug(&base, pool).await?.is_none() {
        return Ok(base);
    }
    for n in 2..=20 {
        let candidate = format!("{base}-{n}");
        if Alternative::find_by_slug(&candidate, pool).await?.is_none() {
            return Ok(candidate);
        }
    }
    Err(ApiError::Validation(format!(
        "Could not derive a unique slug for \"{name}\""
    )))
}
