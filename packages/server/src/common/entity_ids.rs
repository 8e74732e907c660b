//! Typed ID definitions for all domain entities.
//!
//! One marker type + alias per entity. The aliases are the primary API;
//! mixing them up is a compile error.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (accounts that submit and claim entries).
pub struct User;

/// Marker type for Category entities (taxonomy labels).
pub struct Category;

/// Marker type for ProprietaryTool entities ("alternative-to" targets).
pub struct ProprietaryTool;

/// Marker type for TechStack entities.
pub struct TechStack;

/// Marker type for Alternative entities (directory entries).
pub struct Alternative;

/// Marker type for Payment entities (sponsor-plan payments).
pub struct Payment;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Category entities.
pub type CategoryId = Id<Category>;

/// Typed ID for ProprietaryTool entities.
pub type ProprietaryToolId = Id<ProprietaryTool>;

/// Typed ID for TechStack entities.
pub type TechStackId = Id<TechStack>;

/// Typed ID for Alternative entities.
pub type AlternativeId = Id<Alternative>;

/// Typed ID for Payment entities.
pub type PaymentId = Id<Payment>;
