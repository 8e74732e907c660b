pub mod actions;
pub mod commands;
pub mod events;
pub mod machines;
pub mod models;

pub use commands::SubmissionCommand;
pub use events::SubmissionEvent;
pub use machines::{validate_for_submission, SubmissionMachine, SubmissionPhase, SubmitBlocker};
pub use models::{Draft, DraftMeta, FormFields, PaymentMeta};
