// AltDir - Open-Source Alternatives Directory - API Core
//
// This crate provides the backend for a directory of open-source alternatives
// to proprietary software: taxonomy + catalog data access, the category
// inference used by the seeding binary, and the submission workflow
// (duplicate gating, drafts, free/sponsor plans).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
