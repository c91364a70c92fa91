//! Expired space-note purge job.
//!
//! Active-note queries already exclude expired rows; this job removes them
//! from storage so the table does not grow without bound.

use persistence::repositories::SpaceNoteRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

use crate::middleware::metrics::record_notes_purged;

/// Background job that deletes expired space notes in batches.
pub struct PurgeNotesJob {
    pool: PgPool,
    batch_size: i64,
}

impl PurgeNotesJob {
    pub fn new(pool: PgPool, batch_size: i64) -> Self {
        Self { pool, batch_size }
    }
}

#[async_trait::async_trait]
impl Job for PurgeNotesJob {
    fn name(&self) -> &'static str {
        "purge_notes"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), String> {
        let repo = SpaceNoteRepository::new(self.pool.clone());

        let deleted = repo
            .delete_expired(self.batch_size)
            .await
            .map_err(|e| format!("Failed to purge expired notes: {}", e))?;

        if deleted > 0 {
            record_notes_purged(deleted);
        }

        info!(
            deleted = deleted,
            batch_size = self.batch_size,
            "Purged expired space notes"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_frequency_is_hourly() {
        assert_eq!(JobFrequency::Hourly.duration(), Duration::from_secs(3600));
    }

    #[test]
    fn test_batch_size_covers_busy_days() {
        // One note per student per day at a few hundred students fits a batch
        let batch_size: i64 = 500;
        assert!(batch_size >= 100);
    }
}
