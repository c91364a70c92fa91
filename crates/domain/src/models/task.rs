//! Task domain models.
//!
//! One task shape serves both personal todos and space tasks: a personal task
//! simply has no `space_id`. The kanban status lives on every task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kanban workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanbanStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for KanbanStatus {
    fn default() -> Self {
        KanbanStatus::Todo
    }
}

impl FromStr for KanbanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(KanbanStatus::Todo),
            "in_progress" => Ok(KanbanStatus::InProgress),
            "done" => Ok(KanbanStatus::Done),
            _ => Err(format!("Unknown kanban status: {}", s)),
        }
    }
}

impl std::fmt::Display for KanbanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KanbanStatus::Todo => write!(f, "todo"),
            KanbanStatus::InProgress => write!(f, "in_progress"),
            KanbanStatus::Done => write!(f, "done"),
        }
    }
}

/// Task domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: Uuid,
    /// None for personal todos, Some for space tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<Uuid>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub kanban_status: KanbanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether this task lives in a space (vs a personal todo).
    pub fn is_space_task(&self) -> bool {
        self.space_id.is_some()
    }
}

/// Request to create a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTaskRequest {
    #[validate(length(max = 120, message = "Title must not exceed 120 characters"))]
    pub title: Option<String>,
    #[validate(custom(function = "shared::validation::validate_task_content"))]
    pub content: String,
    pub assigned_to: Option<Uuid>,
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kanban_status: Option<KanbanStatus>,
}

/// Request to update a task. Absent fields are left unchanged; the nullable
/// fields (title, assignee, deadline) are cleared by sending an explicit
/// `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTaskRequest {
    #[validate(length(max = 120, message = "Title must not exceed 120 characters"))]
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[validate(custom(function = "shared::validation::validate_task_content"))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub kanban_status: Option<KanbanStatus>,
}

/// Distinguishes an absent field (`None`) from an explicit JSON `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
