//! External service integrations and side-effect dispatchers.

pub mod email;
pub mod notifier;
pub mod study_plan;

pub use email::{EmailMessage, EmailService};
pub use notifier::Notifier;
pub use study_plan::{StudyPlanClient, StudyPlanError};
