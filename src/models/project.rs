//! # 프로젝트(Project) 모델 정의
//!
//! ## 보관(Archive) 상태
//! ```text
//! [생성] → Active ──archive()──▶ Archived ──unarchive()──▶ Active
//! ```
//! `is_archived`, `archived_at`, `archived_by` 세 필드는 항상 함께 설정되고 함께 해제됩니다.
//! 일반 수정 요청(`UpdateProjectRequest`)으로는 이 필드들을 바꿀 수 없습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// 프로젝트 엔티티: DB의 `projects` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    /// "YYYY-MM-DD"
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub owner_id: String,
    /// 멤버 사용자 참조 목록
    pub members: Json<Vec<String>>,
    pub progress: i64,
    pub budget: Option<f64>,
    pub is_archived: bool,
    pub archived_at: Option<String>,
    pub archived_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 프로젝트 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// DB에 저장되는 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

/// 우선순위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// `POST /projects` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub members: Option<Vec<String>>,
    pub budget: Option<f64>,
}

/// `PATCH /projects/:id` 요청 본문
///
/// 허용된 필드만 받습니다. `deny_unknown_fields` 때문에
/// `is_archived` 같은 보관 상태 필드를 보내면 요청 자체가 거부됩니다.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub members: Option<Vec<String>>,
    pub progress: Option<i64>,
    pub budget: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_rejects_lifecycle_fields() {
        let result = serde_json::from_str::<UpdateProjectRequest>(
            r#"{ "name": "Renamed", "is_archived": false }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn status_uses_display_names() {
        let status: ProjectStatus = serde_json::from_str(r#""On Hold""#).unwrap();
        assert_eq!(status, ProjectStatus::OnHold);
        assert_eq!(status.as_str(), "On Hold");
    }
}
