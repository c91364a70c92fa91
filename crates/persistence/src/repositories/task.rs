//! Task repository for database operations.

use domain::models::{KanbanStatus, Task};
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::task::{KanbanStatusDb, TaskEntity};

const TASK_COLUMNS: &str = "id, space_id, created_by, assigned_to, title, content, \
                            kanban_status, deadline, created_at, updated_at";

/// Repository for task database operations.
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a task. `space_id` is None for personal todos.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        space_id: Option<Uuid>,
        created_by: Uuid,
        title: Option<&str>,
        content: &str,
        assigned_to: Option<Uuid>,
        deadline: Option<chrono::DateTime<chrono::Utc>>,
        kanban_status: KanbanStatus,
    ) -> Result<Task, sqlx::Error> {
        let entity = sqlx::query_as::<_, TaskEntity>(&format!(
            r#"
            INSERT INTO tasks (space_id, created_by, title, content, assigned_to, deadline, kanban_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(space_id)
        .bind(created_by)
        .bind(title)
        .bind(content)
        .bind(assigned_to)
        .bind(deadline)
        .bind(KanbanStatusDb::from(kanban_status))
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find a task by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        let entity = sqlx::query_as::<_, TaskEntity>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List a user's personal todos, newest first.
    pub async fn list_personal(
        &self,
        user_id: Uuid,
        params: &PageParams,
    ) -> Result<(Vec<Task>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tasks WHERE space_id IS NULL AND created_by = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let entities = sqlx::query_as::<_, TaskEntity>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE space_id IS NULL AND created_by = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(user_id)
        .bind(params.per_page() as i64)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((entities.into_iter().map(Into::into).collect(), total))
    }

    /// List a space's tasks, newest first.
    pub async fn list_for_space(
        &self,
        space_id: Uuid,
        params: &PageParams,
    ) -> Result<(Vec<Task>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE space_id = $1")
            .bind(space_id)
            .fetch_one(&self.pool)
            .await?;

        let entities = sqlx::query_as::<_, TaskEntity>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE space_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(space_id)
        .bind(params.per_page() as i64)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((entities.into_iter().map(Into::into).collect(), total))
    }

    /// Partially update a task. Absent fields keep their current values;
    /// the nullable fields take `Some(None)` to be cleared back to NULL.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<Option<&str>>,
        content: Option<&str>,
        assigned_to: Option<Option<Uuid>>,
        deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
        kanban_status: Option<KanbanStatus>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let entity = sqlx::query_as::<_, TaskEntity>(&format!(
            r#"
            UPDATE tasks
            SET
                title = CASE WHEN $2 THEN $3 ELSE title END,
                content = COALESCE($4, content),
                assigned_to = CASE WHEN $5 THEN $6 ELSE assigned_to END,
                deadline = CASE WHEN $7 THEN $8 ELSE deadline END,
                kanban_status = COALESCE($9, kanban_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(title.is_some())
        .bind(title.flatten())
        .bind(content)
        .bind(assigned_to.is_some())
        .bind(assigned_to.flatten())
        .bind(deadline.is_some())
        .bind(deadline.flatten())
        .bind(kanban_status.map(KanbanStatusDb::from))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a task.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
