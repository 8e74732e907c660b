use uuid::Uuid;

use crate::domains::catalog::SubmissionPlan;
use crate::domains::submission::models::FormFields;

/// Submission workflow commands: the IO the machine asks the edges to run.
/// The machine itself performs no IO.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionCommand {
    /// Compare the candidate against existing approved/pending records.
    RunDuplicateCheck {
        name: String,
        repository_url: String,
    },

    /// Fetch the candidate's page and look for a link back to the
    /// directory.
    VerifyBacklink { website_url: String },

    /// Open the payment flow for the sponsor price (after coupon).
    BeginPayment { coupon_code: Option<String> },

    /// The terminal action: create the pending directory entry.
    CreateSubmission {
        fields: FormFields,
        plan: SubmissionPlan,
        payment_ref: Option<String>,
    },

    /// Take ownership of the colliding ownerless record instead of
    /// creating a duplicate.
    ClaimExisting { existing_id: Uuid },

    /// Persist the current form as the user's single draft slot.
    PersistDraft {
        fields: FormFields,
        plan: SubmissionPlan,
        payment_ref: Option<String>,
    },

    /// Delete the user's draft slot.
    DiscardDraft,
}
