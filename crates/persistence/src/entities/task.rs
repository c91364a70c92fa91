//! Task entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for kanban_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "kanban_status", rename_all = "snake_case")]
pub enum KanbanStatusDb {
    Todo,
    InProgress,
    Done,
}

impl From<KanbanStatusDb> for domain::models::KanbanStatus {
    fn from(db: KanbanStatusDb) -> Self {
        match db {
            KanbanStatusDb::Todo => Self::Todo,
            KanbanStatusDb::InProgress => Self::InProgress,
            KanbanStatusDb::Done => Self::Done,
        }
    }
}

impl From<domain::models::KanbanStatus> for KanbanStatusDb {
    fn from(status: domain::models::KanbanStatus) -> Self {
        match status {
            domain::models::KanbanStatus::Todo => Self::Todo,
            domain::models::KanbanStatus::InProgress => Self::InProgress,
            domain::models::KanbanStatus::Done => Self::Done,
        }
    }
}

/// Database row mapping for the tasks table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskEntity {
    pub id: Uuid,
    pub space_id: Option<Uuid>,
    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,
    pub title: Option<String>,
    pub content: String,
    pub kanban_status: KanbanStatusDb,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskEntity> for domain::models::Task {
    fn from(entity: TaskEntity) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            created_by: entity.created_by,
            assigned_to: entity.assigned_to,
            title: entity.title,
            content: entity.content,
            kanban_status: entity.kanban_status.into(),
            deadline: entity.deadline,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
