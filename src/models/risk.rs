//! # 리스크(Risk) 모델
//!
//! 프로젝트에 딸린 위험 요소입니다. 심각도와 대응 상태를 추적합니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Risk {
    pub id: String,
    pub project_id: String,
    pub description: String,
    pub severity: String,
    pub impact: Option<String>,
    pub mitigation: Option<String>,
    /// 담당자 사용자 참조
    pub owner_id: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSeverity::Low => "Low",
            RiskSeverity::Medium => "Medium",
            RiskSeverity::High => "High",
            RiskSeverity::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    Identified,
    Mitigating,
    Resolved,
    Accepted,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Identified => "Identified",
            RiskStatus::Mitigating => "Mitigating",
            RiskStatus::Resolved => "Resolved",
            RiskStatus::Accepted => "Accepted",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RiskListQuery {
    pub project_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRiskRequest {
    pub project_id: String,
    pub description: String,
    pub severity: Option<RiskSeverity>,
    pub impact: Option<String>,
    pub mitigation: Option<String>,
    pub owner_id: Option<String>,
    pub status: Option<RiskStatus>,
}

/// 허용된 필드만 수정 가능. project_id는 생성 후 바뀌지 않습니다.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRiskRequest {
    pub description: Option<String>,
    pub severity: Option<RiskSeverity>,
    pub impact: Option<String>,
    pub mitigation: Option<String>,
    pub owner_id: Option<String>,
    pub status: Option<RiskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_cannot_move_risk_between_projects() {
        let result = serde_json::from_str::<UpdateRiskRequest>(
            r#"{ "status": "Resolved", "project_id": "other" }"#,
        );
        assert!(result.is_err());
    }
}
