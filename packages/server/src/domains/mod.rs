// Domain modules. Each domain owns its models (sqlx data access) and any
// pure decision logic; IO orchestration lives in actions submodules.

pub mod auth;
pub mod catalog;
pub mod payment;
pub mod submission;
pub mod taxonomy;
