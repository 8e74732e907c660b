pub mod models;

pub use models::{
    Alternative, AlternativeStatus, CreateAlternative, ProprietaryTool, SubmissionPlan, TechStack,
};
