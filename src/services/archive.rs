//! # 프로젝트 보관 게이트(Archive Gate)
//!
//! 프로젝트를 Active ↔ Archived 사이에서 전환합니다.
//!
//! ```text
//!          archive(by)                 archive(by') : 시각/처리자만 갱신
//! Active ─────────────▶ Archived ─────┐
//!   ▲                      │  ◀───────┘
//!   └──── unarchive() ─────┘
//! ```
//!
//! 세 필드(is_archived, archived_at, archived_by)는 항상 함께 바뀌고,
//! 이름/상태/진척도 등 다른 필드는 바뀌지 않습니다.
//! 역할 검사(관리자 전용)는 라우트 계층에서 합니다.

use sqlx::SqlitePool;

use crate::{db, error::AppError, models::Project};

#[derive(Debug, Clone)]
pub struct ArchiveGate {
    pool: SqlitePool,
}

impl ArchiveGate {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 프로젝트를 보관합니다. 이미 보관된 경우 시각과 처리자를 새로 기록합니다.
    pub async fn archive(&self, project_id: &str, acting_user: &str) -> Result<Project, AppError> {
        let project = db::set_archived(&self.pool, project_id, acting_user)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(project_id, archived_by = acting_user, "Project archived");
        Ok(project)
    }

    /// 보관을 해제합니다. 보관되지 않은 프로젝트에 호출해도 에러가 아닙니다.
    pub async fn unarchive(&self, project_id: &str) -> Result<Project, AppError> {
        let project = db::clear_archived(&self.pool, project_id)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(project_id, "Project unarchived");
        Ok(project)
    }

    pub async fn list_active(&self) -> Result<Vec<Project>, AppError> {
        db::list_projects(&self.pool, false).await
    }

    pub async fn list_archived(&self) -> Result<Vec<Project>, AppError> {
        db::list_projects(&self.pool, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;

    fn project_request(name: &str) -> CreateProjectRequest {
        CreateProjectRequest {
            name: name.to_string(),
            description: Some("desc".to_string()),
            status: Some(ProjectStatus::InProgress),
            priority: Some(Priority::High),
            start_date: None,
            end_date: None,
            members: None,
            budget: None,
        }
    }

    #[tokio::test]
    async fn archive_then_unarchive_round_trip() {
        let (_dir, pool) = db::test_pool().await;
        let before = db::create_project(&pool, "P2", "owner", &project_request("Beta"))
            .await
            .unwrap();
        let gate = ArchiveGate::new(pool);

        let archived = gate.archive("P2", "admin1").await.unwrap();
        assert!(archived.is_archived);
        assert_eq!(archived.archived_by.as_deref(), Some("admin1"));
        assert!(archived.archived_at.is_some());

        let ids: Vec<String> = gate.list_archived().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["P2".to_string()]);
        assert!(gate.list_active().await.unwrap().is_empty());

        let restored = gate.unarchive("P2").await.unwrap();
        assert!(!restored.is_archived);
        assert!(restored.archived_at.is_none());
        assert!(restored.archived_by.is_none());
        assert_eq!(gate.list_active().await.unwrap().len(), 1);
        assert!(gate.list_archived().await.unwrap().is_empty());

        // 보관 필드 외에는 변하지 않는다
        assert_eq!(restored.name, before.name);
        assert_eq!(restored.description, before.description);
        assert_eq!(restored.status, before.status);
        assert_eq!(restored.priority, before.priority);
        assert_eq!(restored.progress, before.progress);
        assert_eq!(restored.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn archiving_again_refreshes_actor() {
        let (_dir, pool) = db::test_pool().await;
        db::create_project(&pool, "P2", "owner", &project_request("Beta"))
            .await
            .unwrap();
        let gate = ArchiveGate::new(pool);

        gate.archive("P2", "admin1").await.unwrap();
        let again = gate.archive("P2", "admin2").await.unwrap();

        assert!(again.is_archived);
        assert_eq!(again.archived_by.as_deref(), Some("admin2"));
    }

    #[tokio::test]
    async fn unarchiving_active_project_is_a_no_op() {
        let (_dir, pool) = db::test_pool().await;
        db::create_project(&pool, "P2", "owner", &project_request("Beta"))
            .await
            .unwrap();
        let gate = ArchiveGate::new(pool);

        let project = gate.unarchive("P2").await.unwrap();
        assert!(!project.is_archived);
        assert!(project.archived_by.is_none());
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let (_dir, pool) = db::test_pool().await;
        let gate = ArchiveGate::new(pool);

        assert!(matches!(gate.archive("nope", "admin").await, Err(AppError::NotFound)));
        assert!(matches!(gate.unarchive("nope").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn active_and_archived_partition_all_projects() {
        let (_dir, pool) = db::test_pool().await;
        for id in ["a", "b", "c", "d"] {
            db::create_project(&pool, id, "owner", &project_request(id))
                .await
                .unwrap();
        }
        let gate = ArchiveGate::new(pool);
        gate.archive("b", "admin").await.unwrap();
        gate.archive("d", "admin").await.unwrap();

        let mut active: Vec<String> = gate.list_active().await.unwrap().into_iter().map(|p| p.id).collect();
        let mut archived: Vec<String> = gate.list_archived().await.unwrap().into_iter().map(|p| p.id).collect();
        active.sort();
        archived.sort();

        assert_eq!(active, vec!["a", "c"]);
        assert_eq!(archived, vec!["b", "d"]);
    }
}
