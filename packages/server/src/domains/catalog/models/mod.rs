mod alternative;
mod proprietary;
mod tech_stack;

pub use alternative::{Alternative, AlternativeStatus, CreateAlternative, SubmissionPlan};
pub use proprietary::ProprietaryTool;
pub use tech_stack::TechStack;
