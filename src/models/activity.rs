//! # 활동 로그(Activity Log) 모델
//!
//! 프로젝트 안에서 누가 무엇을 했는지 기록합니다.
//! 예: "uploaded" / Document / "report.pdf (v2)"

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLog {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    pub created_at: String,
}

/// 활동 대상 엔티티 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEntity {
    Project,
    Milestone,
    Document,
    Risk,
    Task,
}

impl ActivityEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityEntity::Project => "Project",
            ActivityEntity::Milestone => "Milestone",
            ActivityEntity::Document => "Document",
            ActivityEntity::Risk => "Risk",
            ActivityEntity::Task => "Task",
        }
    }
}

/// 기록할 활동 하나
#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub project_id: &'a str,
    pub user_id: &'a str,
    pub action: &'a str,
    pub entity: ActivityEntity,
    pub entity_id: Option<&'a str>,
    pub details: Option<String>,
}
