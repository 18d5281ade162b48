//! # 프로젝트(Project) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/projects`                  → 활성 프로젝트 목록
//! - `GET    /api/v1/projects/archived`         → 보관된 프로젝트 목록
//! - `POST   /api/v1/projects`                  → 생성 (Admin, Project Manager)
//! - `GET    /api/v1/projects/{id}`             → 단일 조회 (보관된 것도 포함)
//! - `PATCH  /api/v1/projects/{id}`             → 부분 수정 (Admin, Project Manager)
//! - `DELETE /api/v1/projects/{id}`             → 삭제 (Admin)
//! - `PUT    /api/v1/projects/{id}/archive`     → 보관 (Admin)
//! - `PUT    /api/v1/projects/{id}/unarchive`   → 보관 해제 (Admin)
//! - `GET    /api/v1/projects/{id}/activity`    → 최근 활동 100건
//!
//! 보관 상태는 archive/unarchive 엔드포인트로만 바뀝니다.
//! PATCH 본문에 `is_archived` 같은 필드를 넣으면 역직렬화 단계에서 거부됩니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use super::AppState;

/// 활동 로그 조회 개수
const ACTIVITY_LIMIT: i64 = 100;

/// 시작일이 종료일보다 늦으면 거부합니다.
fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::BadRequest(
            "end_date must not be before start_date".to_string(),
        )),
        _ => Ok(()),
    }
}

/// `GET /projects`: 활성 프로젝트만
pub async fn list_projects(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let projects = state.archive.list_active().await?;
    Ok(Json(json!({ "projects": projects })))
}

/// `GET /projects/archived`
pub async fn list_archived_projects(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let projects = state.archive.list_archived().await?;
    Ok(Json(json!({ "projects": projects })))
}

pub async fn get_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = db::get_project(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(project))
}

/// `POST /projects`: 요청자가 소유자가 됩니다.
pub async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    user.require_manager()?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Project name is required".to_string()));
    }
    check_dates(req.start_date, req.end_date)?;

    let id = uuid::Uuid::now_v7().to_string();
    let project = db::create_project(&state.pool, &id, &user.user_id, &req).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &project.id,
            user_id: &user.user_id,
            action: "created",
            entity: ActivityEntity::Project,
            entity_id: Some(&project.id),
            details: Some(project.name.clone()),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(project)))
}

/// `PATCH /projects/{id}`: 요청에 포함된 필드만 수정합니다.
///
/// 한쪽 날짜만 바꾸는 경우에도 저장된 다른 쪽 날짜와 비교합니다.
pub async fn update_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    user.require_manager()?;

    if matches!(&req.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::BadRequest("Project name cannot be empty".to_string()));
    }

    let current = db::get_project(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let stored = |d: &Option<String>| d.as_deref().and_then(|s| s.parse::<NaiveDate>().ok());
    check_dates(
        req.start_date.or_else(|| stored(&current.start_date)),
        req.end_date.or_else(|| stored(&current.end_date)),
    )?;

    let project = db::update_project(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &project.id,
            user_id: &user.user_id,
            action: "updated",
            entity: ActivityEntity::Project,
            entity_id: Some(&project.id),
            details: None,
        },
    )
    .await;

    Ok(Json(project))
}

/// `DELETE /projects/{id}`
///
/// 문서는 원장을 통해 먼저 지웁니다 (현재 리비전 파일도 함께 삭제).
/// 마일스톤, 리스크, 작업, 활동 로그는 DB에서 CASCADE로 지워집니다.
pub async fn delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;

    if !state.ledger.remove_project(&id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(project_id = %id, deleted_by = %user.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /projects/{id}/archive`
pub async fn archive_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    user.require_admin()?;

    let project = state.archive.archive(&id, &user.user_id).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &project.id,
            user_id: &user.user_id,
            action: "archived",
            entity: ActivityEntity::Project,
            entity_id: Some(&project.id),
            details: None,
        },
    )
    .await;

    Ok(Json(project))
}

/// `PUT /projects/{id}/unarchive`
pub async fn unarchive_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    user.require_admin()?;

    let project = state.archive.unarchive(&id).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &project.id,
            user_id: &user.user_id,
            action: "unarchived",
            entity: ActivityEntity::Project,
            entity_id: Some(&project.id),
            details: None,
        },
    )
    .await;

    Ok(Json(project))
}

/// `GET /projects/{id}/activity`: 최신순 100건
pub async fn list_project_activity(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    db::get_project(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let activity = db::list_activity(&state.pool, &id, ACTIVITY_LIMIT).await?;
    Ok(Json(json!({ "activity": activity })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(check_dates(date("2026-03-01"), date("2026-02-01")).is_err());
        assert!(check_dates(date("2026-03-01"), date("2026-03-01")).is_ok());
        assert!(check_dates(None, date("2026-02-01")).is_ok());
    }
}
