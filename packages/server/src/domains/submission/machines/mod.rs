//! Submission workflow state machine.
//! Pure decision logic - NO IO, only state transitions.
//!
//! The machine consumes [`SubmissionEvent`]s and optionally emits a
//! [`SubmissionCommand`] for the edges to run. Two gates order the flow:
//! the duplicate check must complete clean before payment or final
//! submission is attempted, and each plan carries exactly one admission
//! requirement (free: verified backlink; sponsor: payment confirmation).
//! Draft save/load/delete never change the submission phase.

use thiserror::Error;
use uuid::Uuid;

use crate::domains::catalog::SubmissionPlan;
use crate::domains::submission::commands::SubmissionCommand;
use crate::domains::submission::events::SubmissionEvent;
use crate::domains::submission::models::{DraftMeta, FormFields, PaymentMeta};

/// Workflow phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Editing,
    DuplicateChecking,
    DuplicateBlocked,
    DuplicateClear,
    PaymentPending,
    Submitting,
    Submitted,
    Failed,
}

/// Why a submit request was refused. Each message names the unmet
/// requirement so the form can surface it inline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocker {
    #[error("License is required")]
    MissingLicense,

    #[error("Select at least one proprietary product this project replaces")]
    MissingAlternativeTo,

    #[error("Free plan requires a verified backlink to the directory")]
    BacklinkNotVerified,

    #[error("Sponsor plan requires a completed payment")]
    PaymentNotCompleted,

    #[error("Run the duplicate check before continuing")]
    DuplicateNotChecked,

    #[error("A matching entry already exists")]
    DuplicateBlocked,

    #[error("A website URL is required for backlink verification")]
    MissingWebsite,
}

/// Validate the submit preconditions, in their required order:
/// (1) license, (2) alternative-to selection, (3) the active plan's gate.
/// The first unmet precondition wins; nothing past it is evaluated.
pub fn validate_for_submission(
    fields: &FormFields,
    plan: SubmissionPlan,
    payment_ref: Option<&str>,
    backlink_verified: bool,
) -> Result<(), SubmitBlocker> {
    if fields.license.trim().is_empty() {
        return Err(SubmitBlocker::MissingLicense);
    }
    if fields.alternative_to.is_empty() {
        return Err(SubmitBlocker::MissingAlternativeTo);
    }
    match plan {
        SubmissionPlan::Free => {
            if !backlink_verified {
                return Err(SubmitBlocker::BacklinkNotVerified);
            }
        }
        SubmissionPlan::Sponsor => {
            if payment_ref.map(str::trim).filter(|r| !r.is_empty()).is_none() {
                return Err(SubmitBlocker::PaymentNotCompleted);
            }
        }
    }
    Ok(())
}

/// A duplicate-check hit kept around so the blocked form can offer the
/// claim path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateHit {
    pub reason: String,
    pub existing_id: Uuid,
    pub claimable: bool,
}

/// Submission workflow machine.
pub struct SubmissionMachine {
    phase: SubmissionPhase,
    fields: FormFields,
    payment: PaymentMeta,
    draft: DraftMeta,
    /// Cached clean duplicate-check result. Invalidated when the name or
    /// repository URL is edited.
    duplicate_checked: bool,
    backlink_verified: bool,
    pending_duplicate: Option<DuplicateHit>,
    last_blocker: Option<SubmitBlocker>,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Editing,
            fields: FormFields::default(),
            payment: PaymentMeta::default(),
            draft: DraftMeta::default(),
            duplicate_checked: false,
            backlink_verified: false,
            pending_duplicate: None,
            last_blocker: None,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn payment(&self) -> &PaymentMeta {
        &self.payment
    }

    pub fn draft_meta(&self) -> &DraftMeta {
        &self.draft
    }

    pub fn duplicate_checked(&self) -> bool {
        self.duplicate_checked
    }

    pub fn backlink_verified(&self) -> bool {
        self.backlink_verified
    }

    pub fn pending_duplicate(&self) -> Option<&DuplicateHit> {
        self.pending_duplicate.as_ref()
    }

    /// The blocker recorded by the most recent refused request, if any.
    pub fn last_blocker(&self) -> Option<&SubmitBlocker> {
        self.last_blocker.as_ref()
    }

    fn in_terminal_or_inflight(&self) -> bool {
        matches!(
            self.phase,
            SubmissionPhase::Submitting | SubmissionPhase::Submitted
        )
    }

    /// Consume an event, transition, and optionally emit a command.
    pub fn decide(&mut self, event: &SubmissionEvent) -> Option<SubmissionCommand> {
        match event {
            // =================================================================
            // Editing
            // =================================================================
            SubmissionEvent::FieldsEdited { fields } => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                let identity_changed = fields.name != self.fields.name
                    || fields.repository_url != self.fields.repository_url;
                let website_changed = fields.website != self.fields.website;

                self.fields = fields.clone();
                self.last_blocker = None;

                if identity_changed {
                    // The cached duplicate verdict no longer applies.
                    self.duplicate_checked = false;
                    self.pending_duplicate = None;
                    self.phase = SubmissionPhase::Editing;
                }
                if website_changed {
                    self.backlink_verified = false;
                }
                None
            }

            SubmissionEvent::PlanSelected { plan } => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                // Switching plans swaps which admission requirement is
                // active; the other one goes dormant, never both at once.
                self.payment.plan = *plan;
                self.last_blocker = None;
                None
            }

            // =================================================================
            // Duplicate gate
            // =================================================================
            SubmissionEvent::DuplicateCheckRequested => {
                if self.phase != SubmissionPhase::Editing {
                    return None;
                }
                self.phase = SubmissionPhase::DuplicateChecking;
                Some(SubmissionCommand::RunDuplicateCheck {
                    name: self.fields.name.clone(),
                    repository_url: self.fields.repository_url.clone(),
                })
            }

            SubmissionEvent::DuplicateCheckPassed => {
                if self.phase != SubmissionPhase::DuplicateChecking {
                    return None;
                }
                self.phase = SubmissionPhase::DuplicateClear;
                self.duplicate_checked = true;
                self.pending_duplicate = None;
                None
            }

            SubmissionEvent::DuplicateCheckHit {
                reason,
                existing_id,
                claimable,
            } => {
                if self.phase != SubmissionPhase::DuplicateChecking {
                    return None;
                }
                self.phase = SubmissionPhase::DuplicateBlocked;
                self.duplicate_checked = false;
                self.pending_duplicate = Some(DuplicateHit {
                    reason: reason.clone(),
                    existing_id: *existing_id,
                    claimable: *claimable,
                });
                None
            }

            SubmissionEvent::DuplicateCheckErrored { .. } => {
                // The call failed; fall back to the pre-call state.
                if self.phase == SubmissionPhase::DuplicateChecking {
                    self.phase = SubmissionPhase::Editing;
                }
                None
            }

            SubmissionEvent::ClaimRequested => {
                let hit = self.pending_duplicate.as_ref()?;
                if self.phase != SubmissionPhase::DuplicateBlocked || !hit.claimable {
                    return None;
                }
                Some(SubmissionCommand::ClaimExisting {
                    existing_id: hit.existing_id,
                })
            }

            // =================================================================
            // Free-plan gate
            // =================================================================
            SubmissionEvent::BacklinkVerificationRequested => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                let Some(website) = self
                    .fields
                    .website
                    .as_deref()
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                else {
                    self.last_blocker = Some(SubmitBlocker::MissingWebsite);
                    return None;
                };
                Some(SubmissionCommand::VerifyBacklink {
                    website_url: website.to_string(),
                })
            }

            SubmissionEvent::BacklinkChecked { verified } => {
                self.backlink_verified = *verified;
                if *verified {
                    self.last_blocker = None;
                }
                None
            }

            // =================================================================
            // Sponsor-plan gate
            // =================================================================
            SubmissionEvent::PaymentRequested => {
                if self.payment.plan != SubmissionPlan::Sponsor {
                    return None;
                }
                // Payment comes strictly after a clean duplicate check.
                if !self.duplicate_checked {
                    self.last_blocker = Some(SubmitBlocker::DuplicateNotChecked);
                    return None;
                }
                if self.phase != SubmissionPhase::DuplicateClear {
                    return None;
                }
                self.phase = SubmissionPhase::PaymentPending;
                Some(SubmissionCommand::BeginPayment {
                    coupon_code: self.payment.coupon_code.clone(),
                })
            }

            SubmissionEvent::PaymentCaptured { capture_id } => {
                if self.phase != SubmissionPhase::PaymentPending {
                    return None;
                }
                self.payment.payment_ref = Some(capture_id.clone());
                self.phase = SubmissionPhase::DuplicateClear;
                self.last_blocker = None;
                // Persist immediately so the capture survives a reload.
                Some(SubmissionCommand::PersistDraft {
                    fields: self.fields.clone(),
                    plan: self.payment.plan,
                    payment_ref: self.payment.payment_ref.clone(),
                })
            }

            SubmissionEvent::PaymentAbandoned => {
                // No rollback: any prior draft save stays as-is.
                if self.phase == SubmissionPhase::PaymentPending {
                    self.phase = SubmissionPhase::DuplicateClear;
                }
                None
            }

            // =================================================================
            // Final submission
            // =================================================================
            SubmissionEvent::SubmitRequested => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                if self.pending_duplicate.is_some() {
                    self.last_blocker = Some(SubmitBlocker::DuplicateBlocked);
                    return None;
                }
                if !self.duplicate_checked {
                    self.last_blocker = Some(SubmitBlocker::DuplicateNotChecked);
                    return None;
                }
                if let Err(blocker) = validate_for_submission(
                    &self.fields,
                    self.payment.plan,
                    self.payment.payment_ref.as_deref(),
                    self.backlink_verified,
                ) {
                    self.last_blocker = Some(blocker);
                    return None;
                }
                self.phase = SubmissionPhase::Submitting;
                self.last_blocker = None;
                Some(SubmissionCommand::CreateSubmission {
                    fields: self.fields.clone(),
                    plan: self.payment.plan,
                    payment_ref: self.payment.payment_ref.clone(),
                })
            }

            SubmissionEvent::SubmissionSucceeded { .. } => {
                if self.phase == SubmissionPhase::Submitting {
                    // The server deletes the draft as part of the create;
                    // draft and submitted entry are mutually exclusive.
                    self.phase = SubmissionPhase::Submitted;
                    self.draft.last_saved_at = None;
                }
                None
            }

            SubmissionEvent::SubmissionFailed { .. } => {
                if self.phase == SubmissionPhase::Submitting {
                    // Form content is preserved for retry.
                    self.phase = SubmissionPhase::Failed;
                }
                None
            }

            SubmissionEvent::RetryRequested => {
                if self.phase == SubmissionPhase::Failed {
                    self.phase = SubmissionPhase::Editing;
                }
                None
            }

            // =================================================================
            // Drafts: fire-and-forget relative to editing, no phase change
            // =================================================================
            SubmissionEvent::SaveDraftRequested => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                Some(SubmissionCommand::PersistDraft {
                    fields: self.fields.clone(),
                    plan: self.payment.plan,
                    payment_ref: self.payment.payment_ref.clone(),
                })
            }

            SubmissionEvent::DraftSaved { saved_at } => {
                self.draft.last_saved_at = Some(*saved_at);
                None
            }

            SubmissionEvent::DraftLoaded {
                fields,
                plan,
                payment_ref,
                saved_at,
            } => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                self.phase = SubmissionPhase::Editing;
                self.fields = fields.clone();
                self.payment.plan = *plan;
                self.payment.payment_ref = payment_ref.clone();
                self.draft.last_saved_at = Some(*saved_at);
                // Workflow flags are transient: a restored form re-earns
                // its gates.
                self.duplicate_checked = false;
                self.backlink_verified = false;
                self.pending_duplicate = None;
                self.last_blocker = None;
                None
            }

            SubmissionEvent::DeleteDraftRequested => {
                if self.in_terminal_or_inflight() {
                    return None;
                }
                self.draft.last_saved_at = None;
                Some(SubmissionCommand::DiscardDraft)
            }
        }
    }
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_order_license_first() {
        // Missing license AND missing alternative-to: the license error
        // wins, never a silent pass.
        let fields = FormFields::default();
        let err =
            validate_for_submission(&fields, SubmissionPlan::Free, None, true).unwrap_err();
        assert_eq!(err, SubmitBlocker::MissingLicense);
    }

    #[test]
    fn validation_order_alternative_to_second() {
        let fields = FormFields {
            license: "MIT".to_string(),
            ..Default::default()
        };
        let err =
            validate_for_submission(&fields, SubmissionPlan::Free, None, true).unwrap_err();
        assert_eq!(err, SubmitBlocker::MissingAlternativeTo);
    }

    #[test]
    fn plan_gates_are_exclusive() {
        let fields = FormFields {
            license: "AGPL-3.0".to_string(),
            alternative_to: vec!["trello".to_string()],
            ..Default::default()
        };

        // Free plan ignores payment, requires backlink.
        assert_eq!(
            validate_for_submission(&fields, SubmissionPlan::Free, None, false).unwrap_err(),
            SubmitBlocker::BacklinkNotVerified
        );
        assert!(validate_for_submission(&fields, SubmissionPlan::Free, None, true).is_ok());

        // Sponsor plan ignores backlink, requires payment.
        assert_eq!(
            validate_for_submission(&fields, SubmissionPlan::Sponsor, None, true).unwrap_err(),
            SubmitBlocker::PaymentNotCompleted
        );
        assert!(
            validate_for_submission(&fields, SubmissionPlan::Sponsor, Some("CAP-1"), false)
                .is_ok()
        );
    }

    #[test]
    fn blank_payment_ref_does_not_satisfy_sponsor_gate() {
        let fields = FormFields {
            license: "MIT".to_string(),
            alternative_to: vec!["slack".to_string()],
            ..Default::default()
        };
        assert_eq!(
            validate_for_submission(&fields, SubmissionPlan::Sponsor, Some("   "), false)
                .unwrap_err(),
            SubmitBlocker::PaymentNotCompleted
        );
    }
}
