//! Transition-table tests for the submission workflow machine.

use chrono::Utc;
use uuid::Uuid;

use altdir_core::domains::catalog::SubmissionPlan;
use altdir_core::domains::submission::models::FormFields;
use altdir_core::domains::submission::{
    SubmissionCommand, SubmissionEvent, SubmissionMachine, SubmissionPhase, SubmitBlocker,
};

fn filled_fields() -> FormFields {
    FormFields {
        name: "Wekan".to_string(),
        tagline: "Feature-rich kanban board".to_string(),
        description: "Collaborative kanban board application".to_string(),
        repository_url: "https://github.com/wekan/wekan".to_string(),
        website: Some("https://wekan.github.io".to_string()),
        license: "MIT".to_string(),
        alternative_to: vec!["trello".to_string()],
        categories: vec!["project-management".to_string()],
        tech_stacks: vec!["javascript".to_string()],
    }
}

/// Drive a machine to the DuplicateClear phase with a filled form.
fn machine_past_duplicate_gate() -> SubmissionMachine {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    let cmd = machine.decide(&SubmissionEvent::DuplicateCheckRequested);
    assert!(matches!(
        cmd,
        Some(SubmissionCommand::RunDuplicateCheck { .. })
    ));
    machine.decide(&SubmissionEvent::DuplicateCheckPassed);
    assert_eq!(machine.phase(), SubmissionPhase::DuplicateClear);
    machine
}

// ============================================================================
// Duplicate gate
// ============================================================================

#[test]
fn duplicate_check_carries_current_identity_fields() {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    let cmd = machine.decide(&SubmissionEvent::DuplicateCheckRequested);
    assert_eq!(
        cmd,
        Some(SubmissionCommand::RunDuplicateCheck {
            name: "Wekan".to_string(),
            repository_url: "https://github.com/wekan/wekan".to_string(),
        })
    );
    assert_eq!(machine.phase(), SubmissionPhase::DuplicateChecking);
}

#[test]
fn submit_refused_before_duplicate_check() {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });

    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    assert!(cmd.is_none());
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::DuplicateNotChecked)
    );
    assert_eq!(machine.phase(), SubmissionPhase::Editing);
}

#[test]
fn editing_identity_fields_invalidates_duplicate_cache() {
    let mut machine = machine_past_duplicate_gate();
    assert!(machine.duplicate_checked());

    let mut edited = filled_fields();
    edited.name = "Wekan Fork".to_string();
    machine.decide(&SubmissionEvent::FieldsEdited { fields: edited });

    assert!(!machine.duplicate_checked());
    assert_eq!(machine.phase(), SubmissionPhase::Editing);

    // A re-check is now required before proceeding.
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });
    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    assert!(cmd.is_none());
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::DuplicateNotChecked)
    );
}

#[test]
fn editing_non_identity_fields_keeps_duplicate_cache() {
    let mut machine = machine_past_duplicate_gate();

    let mut edited = filled_fields();
    edited.tagline = "A different tagline".to_string();
    machine.decide(&SubmissionEvent::FieldsEdited { fields: edited });

    assert!(machine.duplicate_checked());
    assert_eq!(machine.phase(), SubmissionPhase::DuplicateClear);
}

#[test]
fn duplicate_hit_blocks_and_offers_claim_when_claimable() {
    let existing_id = Uuid::new_v4();
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    machine.decide(&SubmissionEvent::DuplicateCheckRequested);
    machine.decide(&SubmissionEvent::DuplicateCheckHit {
        reason: "already listed".to_string(),
        existing_id,
        claimable: true,
    });

    assert_eq!(machine.phase(), SubmissionPhase::DuplicateBlocked);
    assert!(machine.decide(&SubmissionEvent::SubmitRequested).is_none());
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::DuplicateBlocked)
    );

    let cmd = machine.decide(&SubmissionEvent::ClaimRequested);
    assert_eq!(cmd, Some(SubmissionCommand::ClaimExisting { existing_id }));
}

#[test]
fn non_claimable_hit_has_no_claim_path() {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    machine.decide(&SubmissionEvent::DuplicateCheckRequested);
    machine.decide(&SubmissionEvent::DuplicateCheckHit {
        reason: "already listed".to_string(),
        existing_id: Uuid::new_v4(),
        claimable: false,
    });

    assert!(machine.decide(&SubmissionEvent::ClaimRequested).is_none());
}

#[test]
fn failed_duplicate_call_returns_to_pre_call_state() {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    machine.decide(&SubmissionEvent::DuplicateCheckRequested);
    machine.decide(&SubmissionEvent::DuplicateCheckErrored {
        message: "timeout".to_string(),
    });

    assert_eq!(machine.phase(), SubmissionPhase::Editing);
    assert!(!machine.duplicate_checked());
}

// ============================================================================
// Free plan gate
// ============================================================================

#[test]
fn free_plan_never_submits_without_verified_backlink() {
    let mut machine = machine_past_duplicate_gate();

    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    assert!(cmd.is_none());
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::BacklinkNotVerified)
    );
    assert_eq!(machine.phase(), SubmissionPhase::DuplicateClear);
}

#[test]
fn free_plan_submits_after_backlink_verification() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });

    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    match cmd {
        Some(SubmissionCommand::CreateSubmission {
            plan, payment_ref, ..
        }) => {
            assert_eq!(plan, SubmissionPlan::Free);
            assert!(payment_ref.is_none());
        }
        other => panic!("expected CreateSubmission, got {other:?}"),
    }
    assert_eq!(machine.phase(), SubmissionPhase::Submitting);
}

#[test]
fn editing_website_clears_backlink_verification() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });
    assert!(machine.backlink_verified());

    let mut edited = filled_fields();
    edited.website = Some("https://new-site.example".to_string());
    machine.decide(&SubmissionEvent::FieldsEdited { fields: edited });

    assert!(!machine.backlink_verified());
    // Name and repository were untouched, so the duplicate cache survives.
    assert!(machine.duplicate_checked());
}

#[test]
fn backlink_request_requires_a_website() {
    let mut machine = SubmissionMachine::new();
    let mut fields = filled_fields();
    fields.website = None;
    machine.decide(&SubmissionEvent::FieldsEdited { fields });

    assert!(machine
        .decide(&SubmissionEvent::BacklinkVerificationRequested)
        .is_none());
    assert_eq!(machine.last_blocker(), Some(&SubmitBlocker::MissingWebsite));
}

// ============================================================================
// Sponsor plan gate
// ============================================================================

#[test]
fn payment_refused_before_duplicate_check() {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::FieldsEdited {
        fields: filled_fields(),
    });
    machine.decide(&SubmissionEvent::PlanSelected {
        plan: SubmissionPlan::Sponsor,
    });

    let cmd = machine.decide(&SubmissionEvent::PaymentRequested);
    assert!(cmd.is_none());
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::DuplicateNotChecked)
    );
}

#[test]
fn sponsor_flow_payment_then_submit() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::PlanSelected {
        plan: SubmissionPlan::Sponsor,
    });

    let cmd = machine.decide(&SubmissionEvent::PaymentRequested);
    assert!(matches!(cmd, Some(SubmissionCommand::BeginPayment { .. })));
    assert_eq!(machine.phase(), SubmissionPhase::PaymentPending);

    // A successful capture also persists the draft so the confirmation
    // token survives a reload.
    let cmd = machine.decide(&SubmissionEvent::PaymentCaptured {
        capture_id: "CAP-123".to_string(),
    });
    match cmd {
        Some(SubmissionCommand::PersistDraft { payment_ref, .. }) => {
            assert_eq!(payment_ref.as_deref(), Some("CAP-123"));
        }
        other => panic!("expected PersistDraft after capture, got {other:?}"),
    }
    assert_eq!(machine.phase(), SubmissionPhase::DuplicateClear);

    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    match cmd {
        Some(SubmissionCommand::CreateSubmission {
            plan, payment_ref, ..
        }) => {
            assert_eq!(plan, SubmissionPlan::Sponsor);
            assert_eq!(payment_ref.as_deref(), Some("CAP-123"));
        }
        other => panic!("expected CreateSubmission, got {other:?}"),
    }
}

#[test]
fn sponsor_plan_never_submits_without_payment() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::PlanSelected {
        plan: SubmissionPlan::Sponsor,
    });
    // Backlink verification is irrelevant on the sponsor plan.
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });

    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    assert!(cmd.is_none());
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::PaymentNotCompleted)
    );
}

#[test]
fn abandoning_payment_returns_to_clear_without_capture() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::PlanSelected {
        plan: SubmissionPlan::Sponsor,
    });
    machine.decide(&SubmissionEvent::PaymentRequested);
    machine.decide(&SubmissionEvent::PaymentAbandoned);

    assert_eq!(machine.phase(), SubmissionPhase::DuplicateClear);
    assert!(machine.payment().payment_ref.is_none());
}

#[test]
fn plan_switch_swaps_the_active_requirement() {
    let mut machine = machine_past_duplicate_gate();

    // Free plan blocks on the backlink.
    machine.decide(&SubmissionEvent::SubmitRequested);
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::BacklinkNotVerified)
    );

    // After switching to sponsor, the backlink requirement goes dormant
    // and the payment requirement takes its place.
    machine.decide(&SubmissionEvent::PlanSelected {
        plan: SubmissionPlan::Sponsor,
    });
    machine.decide(&SubmissionEvent::SubmitRequested);
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::PaymentNotCompleted)
    );

    // And back again.
    machine.decide(&SubmissionEvent::PlanSelected {
        plan: SubmissionPlan::Free,
    });
    machine.decide(&SubmissionEvent::SubmitRequested);
    assert_eq!(
        machine.last_blocker(),
        Some(&SubmitBlocker::BacklinkNotVerified)
    );
}

// ============================================================================
// Validation ordering
// ============================================================================

#[test]
fn missing_license_reported_before_missing_alternative_to() {
    let mut machine = SubmissionMachine::new();
    let mut fields = filled_fields();
    fields.license = String::new();
    fields.alternative_to = Vec::new();
    machine.decide(&SubmissionEvent::FieldsEdited { fields });
    machine.decide(&SubmissionEvent::DuplicateCheckRequested);
    machine.decide(&SubmissionEvent::DuplicateCheckPassed);
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });

    let cmd = machine.decide(&SubmissionEvent::SubmitRequested);
    assert!(cmd.is_none());
    assert_eq!(machine.last_blocker(), Some(&SubmitBlocker::MissingLicense));
}

// ============================================================================
// Failure and retry
// ============================================================================

#[test]
fn failed_submission_preserves_form_for_retry() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });
    machine.decide(&SubmissionEvent::SubmitRequested);
    assert_eq!(machine.phase(), SubmissionPhase::Submitting);

    machine.decide(&SubmissionEvent::SubmissionFailed {
        message: "server unavailable".to_string(),
    });
    assert_eq!(machine.phase(), SubmissionPhase::Failed);
    assert_eq!(machine.fields(), &filled_fields());

    machine.decide(&SubmissionEvent::RetryRequested);
    assert_eq!(machine.phase(), SubmissionPhase::Editing);
    assert_eq!(machine.fields(), &filled_fields());
}

#[test]
fn successful_submission_is_terminal() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });
    machine.decide(&SubmissionEvent::SubmitRequested);
    machine.decide(&SubmissionEvent::SubmissionSucceeded {
        record_id: Uuid::new_v4(),
    });

    assert_eq!(machine.phase(), SubmissionPhase::Submitted);
    assert!(machine.decide(&SubmissionEvent::SubmitRequested).is_none());
    assert!(machine.decide(&SubmissionEvent::SaveDraftRequested).is_none());
}

// ============================================================================
// Drafts
// ============================================================================

#[test]
fn draft_save_does_not_change_submission_phase() {
    let mut machine = machine_past_duplicate_gate();

    let cmd = machine.decide(&SubmissionEvent::SaveDraftRequested);
    match cmd {
        Some(SubmissionCommand::PersistDraft { fields, plan, .. }) => {
            assert_eq!(fields, filled_fields());
            assert_eq!(plan, SubmissionPlan::Free);
        }
        other => panic!("expected PersistDraft, got {other:?}"),
    }
    assert_eq!(machine.phase(), SubmissionPhase::DuplicateClear);
    assert!(machine.duplicate_checked());
}

#[test]
fn draft_load_restores_fields_but_not_transient_gates() {
    let mut machine = machine_past_duplicate_gate();
    machine.decide(&SubmissionEvent::BacklinkChecked { verified: true });

    let saved_at = Utc::now();
    machine.decide(&SubmissionEvent::DraftLoaded {
        fields: filled_fields(),
        plan: SubmissionPlan::Sponsor,
        payment_ref: Some("CAP-9".to_string()),
        saved_at,
    });

    assert_eq!(machine.phase(), SubmissionPhase::Editing);
    assert_eq!(machine.fields(), &filled_fields());
    assert_eq!(machine.payment().plan, SubmissionPlan::Sponsor);
    assert_eq!(machine.payment().payment_ref.as_deref(), Some("CAP-9"));
    assert_eq!(machine.draft_meta().last_saved_at, Some(saved_at));
    // Gate flags are transient and re-earned after a reload.
    assert!(!machine.duplicate_checked());
    assert!(!machine.backlink_verified());
}

#[test]
fn form_fields_survive_a_persistence_roundtrip() {
    // The draft store persists the form as JSON; the round-trip must be
    // field-for-field lossless.
    let fields = filled_fields();
    let json = serde_json::to_string(&fields).unwrap();
    let restored: FormFields = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, fields);
}

#[test]
fn delete_draft_clears_saved_marker() {
    let mut machine = SubmissionMachine::new();
    machine.decide(&SubmissionEvent::DraftSaved {
        saved_at: Utc::now(),
    });
    assert!(machine.draft_meta().last_saved_at.is_some());

    let cmd = machine.decide(&SubmissionEvent::DeleteDraftRequested);
    assert_eq!(cmd, Some(SubmissionCommand::DiscardDraft));
    assert!(machine.draft_meta().last_saved_at.is_none());
}
