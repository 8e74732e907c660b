use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domains::catalog::SubmissionPlan;
use crate::domains::submission::models::FormFields;

/// Submission workflow events: immutable facts fed to the machine.
///
/// Request events come from user actions on the form; completion events
/// come from the async edges (duplicate check, payment callback, final
/// submission response).
#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    // =========================================================================
    // Form editing
    // =========================================================================
    /// The user changed form fields. The machine diffs name/repository URL
    /// to decide whether the duplicate-check cache must be invalidated.
    FieldsEdited { fields: FormFields },

    /// The user picked a submission plan (free or sponsor).
    PlanSelected { plan: SubmissionPlan },

    // =========================================================================
    // Duplicate gate
    // =========================================================================
    /// The user asked for a duplicate check (on demand, not per keystroke).
    DuplicateCheckRequested,

    /// The duplicate check came back clean.
    DuplicateCheckPassed,

    /// The duplicate check found a collision.
    DuplicateCheckHit {
        reason: String,
        existing_id: Uuid,
        claimable: bool,
    },

    /// The duplicate-check call itself failed; the workflow stays in its
    /// pre-call state and the message is shown inline.
    DuplicateCheckErrored { message: String },

    /// The user chose to claim the colliding ownerless record.
    ClaimRequested,

    // =========================================================================
    // Free-plan gate
    // =========================================================================
    /// The user asked for their backlink to be verified.
    BacklinkVerificationRequested,

    /// Result of a backlink verification fetch.
    BacklinkChecked { verified: bool },

    // =========================================================================
    // Sponsor-plan gate
    // =========================================================================
    /// The user opened the payment flow.
    PaymentRequested,

    /// The processor confirmed a capture.
    PaymentCaptured { capture_id: String },

    /// The payment modal was closed or the user navigated away. Nothing is
    /// rolled back.
    PaymentAbandoned,

    // =========================================================================
    // Final submission
    // =========================================================================
    SubmitRequested,

    SubmissionSucceeded { record_id: Uuid },

    SubmissionFailed { message: String },

    /// The user retries after a failure; the form content is preserved.
    RetryRequested,

    // =========================================================================
    // Drafts (allowed while editing; never change the submission phase)
    // =========================================================================
    SaveDraftRequested,

    DraftLoaded {
        fields: FormFields,
        plan: SubmissionPlan,
        payment_ref: Option<String>,
        saved_at: DateTime<Utc>,
    },

    DraftSaved { saved_at: DateTime<Utc> },

    DeleteDraftRequested,
}
