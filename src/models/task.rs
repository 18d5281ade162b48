//! # 작업(Task) 모델
//!
//! 상태 흐름: `To Do` → `In Progress` → `Review` → `Done`
//! (전환 순서는 강제하지 않습니다.)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::Priority;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: String,
    pub status: String,
    /// "YYYY-MM-DD"
    pub due_date: Option<String>,
    /// 먼저 끝나야 하는 작업 ID 목록
    pub dependencies: Json<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }
}

/// `GET /tasks`: project_id를 생략하면 전체 작업
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
    pub dependencies: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
    pub dependencies: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_display_names() {
        let status: TaskStatus = serde_json::from_str(r#""To Do""#).unwrap();
        assert_eq!(status, TaskStatus::ToDo);
        assert_eq!(status.as_str(), "To Do");
    }

    #[test]
    fn update_request_rejects_project_id() {
        let result =
            serde_json::from_str::<UpdateTaskRequest>(r#"{ "title": "x", "project_id": "p2" }"#);
        assert!(result.is_err());
    }
}
