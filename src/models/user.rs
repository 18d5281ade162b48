//! # 사용자 역할(Role) 모델
//!
//! 사용자 계정 자체는 외부 인증 서비스가 관리합니다.
//! 이 서버는 JWT의 `sub`(사용자 ID)와 `role` 클레임만 사용합니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 권한이 큰 순서: Admin > ProjectManager > TeamMember > Viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[serde(rename = "Team Member")]
    TeamMember,
    Viewer,
}

impl Role {
    /// 프로젝트 생성/수정, 문서 삭제가 가능한 역할인지
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Admin | Role::ProjectManager)
    }

    /// 읽기 전용(Viewer)이 아닌지
    pub fn can_contribute(&self) -> bool {
        !matches!(self, Role::Viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_match_identity_service() {
        let role: Role = serde_json::from_str(r#""Project Manager""#).unwrap();
        assert_eq!(role, Role::ProjectManager);
        assert_eq!(serde_json::to_string(&Role::TeamMember).unwrap(), r#""Team Member""#);
    }

    #[test]
    fn privileges() {
        assert!(Role::Admin.is_manager());
        assert!(Role::ProjectManager.is_manager());
        assert!(!Role::TeamMember.is_manager());
        assert!(Role::TeamMember.can_contribute());
        assert!(!Role::Viewer.can_contribute());
    }
}
