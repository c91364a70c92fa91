//! Background job scheduler and job implementations.

mod purge_notes;
mod scheduler;

pub use purge_notes::PurgeNotesJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
