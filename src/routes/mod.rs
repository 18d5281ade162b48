//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 API 라우터 구성입니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 업로드/다운로드/삭제, 그리고 공유 상태 `AppState`
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `milestones`: 마일스톤 CRUD
//! - `projects`: 프로젝트 CRUD, 보관/보관 해제, 활동 로그
//! - `risks`: 리스크 CRUD
//! - `tasks`: 작업 CRUD

pub mod documents;
pub mod health;
pub mod milestones;
pub mod projects;
pub mod risks;
pub mod tasks;

pub use documents::*;
pub use health::*;
pub use milestones::*;
pub use projects::*;
pub use risks::*;
pub use tasks::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, put},
    Router,
};

/// multipart 경계와 폼 필드 헤더에 쓰는 본문 여유분
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// `/api/v1` 아래에 중첩될 API 라우터를 만듭니다.
///
/// 경로 파라미터는 axum 0.8 문법(`{id}`)을 씁니다.
/// `/projects/archived`처럼 고정 경로는 `/projects/{id}`보다 먼저 매칭됩니다.
pub fn api_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        // 프로젝트
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/archived", get(list_archived_projects))
        .route(
            "/projects/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/projects/{id}/archive", put(archive_project))
        .route("/projects/{id}/unarchive", put(unarchive_project))
        .route("/projects/{id}/activity", get(list_project_activity))
        // 문서
        .route("/documents", get(list_documents).post(upload))
        .route("/documents/{id}", axum::routing::delete(delete_document))
        .route("/documents/{id}/download", get(download_document))
        // 마일스톤
        .route("/milestones", get(list_milestones).post(create_milestone))
        .route(
            "/milestones/{id}",
            patch(update_milestone).delete(delete_milestone),
        )
        // 리스크
        .route("/risks", get(list_risks).post(create_risk))
        .route("/risks/{id}", patch(update_risk).delete(delete_risk))
        // 작업
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        // 헬스체크
        .route("/health", get(health_check))
        // 업로드 본문 크기 제한 (기본 2MB 대신 설정값 + 여유분)
        // 파일 자체의 크기는 `upload` 핸들러에서 `max_upload_bytes`로 다시 확인합니다.
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
