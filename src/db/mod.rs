//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `activity`: 활동 로그 기록/조회
//! - `documents`: 문서 메타데이터와 리비전 교체(upsert)
//! - `milestones`: 마일스톤 CRUD
//! - `projects`: 프로젝트 CRUD와 보관 상태 전환
//! - `risks`: 리스크 CRUD
//! - `tasks`: 작업 CRUD

pub mod activity;
pub mod documents;
pub mod milestones;
pub mod projects;
pub mod risks;
pub mod tasks;

pub use activity::*;
pub use documents::*;
pub use milestones::*;
pub use projects::*;
pub use risks::*;
pub use tasks::*;

/// 테스트용 임시 SQLite 데이터베이스를 만들고 마이그레이션을 실행합니다.
///
/// 반환된 `TempDir`이 drop되면 파일도 삭제되므로 테스트가 끝날 때까지 보관해야 합니다.
#[cfg(test)]
pub async fn test_pool() -> (tempfile::TempDir, sqlx::SqlitePool) {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    (dir, pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::*;

    fn project_request(name: &str) -> CreateProjectRequest {
        CreateProjectRequest {
            name: name.to_string(),
            description: None,
            status: None,
            priority: None,
            start_date: None,
            end_date: None,
            members: Some(vec!["u2".to_string()]),
            budget: Some(1500.0),
        }
    }

    #[tokio::test]
    async fn created_project_is_active_with_defaults() {
        let (_dir, pool) = test_pool().await;

        let project = create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();

        assert!(!project.is_archived);
        assert!(project.archived_at.is_none());
        assert!(project.archived_by.is_none());
        assert_eq!(project.status, "Not Started");
        assert_eq!(project.priority, "Medium");
        assert_eq!(project.members.0, vec!["u2".to_string()]);
    }

    #[tokio::test]
    async fn update_touches_only_given_fields() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();
        set_archived(&pool, "p1", "admin").await.unwrap();

        let req = UpdateProjectRequest {
            progress: Some(40),
            ..Default::default()
        };
        let updated = update_project(&pool, "p1", &req).await.unwrap().unwrap();

        assert_eq!(updated.progress, 40);
        assert_eq!(updated.name, "Apollo");
        assert_eq!(updated.budget, Some(1500.0));
        // 일반 수정 경로는 보관 상태를 건드리지 않는다
        assert!(updated.is_archived);
        assert_eq!(updated.archived_by.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn update_missing_project_returns_none() {
        let (_dir, pool) = test_pool().await;
        let req = UpdateProjectRequest::default();
        assert!(update_project(&pool, "nope", &req).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn out_of_range_progress_is_a_validation_error() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();

        let req = UpdateProjectRequest {
            progress: Some(150),
            ..Default::default()
        };
        let err = update_project(&pool, "p1", &req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn document_for_unknown_project_is_a_validation_error() {
        let (_dir, pool) = test_pool().await;
        let rev = NewRevision {
            project_id: "ghost".to_string(),
            original_name: "a.txt".to_string(),
            name: "a.txt".to_string(),
            storage_locator: "L1".to_string(),
            size_bytes: 1,
            mime_type: None,
            uploaded_by: "u1".to_string(),
        };

        let err = upsert_revision(&pool, "d1", &rev).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn milestones_cascade_with_project() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();
        let req = CreateMilestoneRequest {
            project_id: "p1".to_string(),
            name: "Kickoff".to_string(),
            description: None,
            due_date: None,
            status: None,
            completion_percentage: None,
            sort_order: Some(1),
        };
        create_milestone(&pool, "m1", &req).await.unwrap();

        assert!(delete_project(&pool, "p1").await.unwrap());
        assert!(get_milestone(&pool, "m1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn risks_and_tasks_cascade_with_project() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();
        let risk = CreateRiskRequest {
            project_id: "p1".to_string(),
            description: "Vendor slips".to_string(),
            severity: Some(RiskSeverity::High),
            impact: None,
            mitigation: None,
            owner_id: Some("u1".to_string()),
            status: None,
        };
        create_risk(&pool, "r1", &risk).await.unwrap();
        let task = CreateTaskRequest {
            project_id: "p1".to_string(),
            title: "Draft plan".to_string(),
            description: None,
            assigned_to: None,
            priority: None,
            status: None,
            due_date: None,
            dependencies: None,
        };
        create_task(&pool, "t1", &task).await.unwrap();

        assert!(delete_project(&pool, "p1").await.unwrap());
        assert!(get_risk(&pool, "r1").await.unwrap().is_none());
        assert!(get_task(&pool, "t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn risk_defaults_and_partial_update() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();
        let req = CreateRiskRequest {
            project_id: "p1".to_string(),
            description: "  Key engineer leaves  ".to_string(),
            severity: None,
            impact: Some("Schedule".to_string()),
            mitigation: None,
            owner_id: None,
            status: None,
        };
        let risk = create_risk(&pool, "r1", &req).await.unwrap();
        assert_eq!(risk.description, "Key engineer leaves");
        assert_eq!(risk.severity, "Medium");
        assert_eq!(risk.status, "Identified");

        let update = UpdateRiskRequest {
            status: Some(RiskStatus::Mitigating),
            mitigation: Some("Pair on critical modules".to_string()),
            ..Default::default()
        };
        let updated = update_risk(&pool, "r1", &update).await.unwrap().unwrap();
        assert_eq!(updated.status, "Mitigating");
        assert_eq!(updated.impact.as_deref(), Some("Schedule"));
        assert_eq!(updated.severity, "Medium");

        assert!(update_risk(&pool, "ghost", &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn risks_are_listed_newest_first() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();
        for (id, description) in [("r1", "first"), ("r2", "second")] {
            let req = CreateRiskRequest {
                project_id: "p1".to_string(),
                description: description.to_string(),
                severity: None,
                impact: None,
                mitigation: None,
                owner_id: None,
                status: None,
            };
            create_risk(&pool, id, &req).await.unwrap();
        }

        let ids: Vec<String> = list_risks(&pool, "p1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r2", "r1"]);
    }

    #[tokio::test]
    async fn tasks_filter_by_project_and_keep_dependencies() {
        let (_dir, pool) = test_pool().await;
        for (id, name) in [("p1", "Apollo"), ("p2", "Gemini")] {
            create_project(&pool, id, "u1", &project_request(name))
                .await
                .unwrap();
        }
        let task = |project_id: &str, title: &str, deps: Option<Vec<String>>| CreateTaskRequest {
            project_id: project_id.to_string(),
            title: title.to_string(),
            description: None,
            assigned_to: None,
            priority: Some(Priority::High),
            status: None,
            due_date: None,
            dependencies: deps,
        };
        create_task(&pool, "t1", &task("p1", "Design", None)).await.unwrap();
        let build = create_task(&pool, "t2", &task("p1", "Build", Some(vec!["t1".to_string()])))
            .await
            .unwrap();
        create_task(&pool, "t3", &task("p2", "Launch", None)).await.unwrap();

        assert_eq!(build.dependencies.0, vec!["t1".to_string()]);
        assert_eq!(build.status, "To Do");
        assert_eq!(build.priority, "High");

        assert_eq!(list_tasks(&pool, Some("p1")).await.unwrap().len(), 2);
        assert_eq!(list_tasks(&pool, None).await.unwrap().len(), 3);

        let update = UpdateTaskRequest {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let done = update_task(&pool, "t2", &update).await.unwrap().unwrap();
        assert_eq!(done.status, "Done");
        assert_eq!(done.dependencies.0, vec!["t1".to_string()]);

        assert!(delete_task(&pool, "t2").await.unwrap());
        assert!(!delete_task(&pool, "t2").await.unwrap());
    }

    #[tokio::test]
    async fn activity_is_listed_newest_first() {
        let (_dir, pool) = test_pool().await;
        create_project(&pool, "p1", "u1", &project_request("Apollo"))
            .await
            .unwrap();

        for action in ["created", "updated", "archived"] {
            insert_activity(
                &pool,
                &NewActivity {
                    project_id: "p1",
                    user_id: "u1",
                    action,
                    entity: ActivityEntity::Project,
                    entity_id: Some("p1"),
                    details: None,
                },
            )
            .await
            .unwrap();
        }

        let logs = list_activity(&pool, "p1", 2).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "archived");
        assert_eq!(logs[1].action, "updated");
    }
}
