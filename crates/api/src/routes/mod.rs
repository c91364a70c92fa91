//! HTTP route handlers.

mod authz;

pub mod health;
pub mod members;
pub mod notes;
pub mod profile;
pub mod spaces;
pub mod study_plan;
pub mod tasks;
