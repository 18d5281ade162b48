//! # 마일스톤(Milestone) 라우트 핸들러
//!
//! - `GET    /api/v1/milestones?project_id=` → 목록 (sort_order 순)
//! - `POST   /api/v1/milestones`             → 생성
//! - `PATCH  /api/v1/milestones/{id}`        → 부분 수정 (project_id는 바꿀 수 없음)
//! - `DELETE /api/v1/milestones/{id}`        → 삭제
//!
//! 쓰기 작업은 Viewer를 제외한 역할만 가능합니다.

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;

pub async fn list_milestones(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<MilestoneListQuery>,
) -> Result<Json<Value>, AppError> {
    let milestones = db::list_milestones(&state.pool, &query.project_id).await?;
    Ok(Json(json!({ "milestones": milestones })))
}

pub async fn create_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateMilestoneRequest>,
) -> Result<(StatusCode, Json<Milestone>), AppError> {
    user.require_contributor()?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Milestone name is required".to_string()));
    }
    db::get_project(&state.pool, &req.project_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let id = uuid::Uuid::now_v7().to_string();
    let milestone = db::create_milestone(&state.pool, &id, &req).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &milestone.project_id,
            user_id: &user.user_id,
            action: "created",
            entity: ActivityEntity::Milestone,
            entity_id: Some(&milestone.id),
            details: Some(milestone.name.clone()),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(milestone)))
}

pub async fn update_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateMilestoneRequest>,
) -> Result<Json<Milestone>, AppError> {
    user.require_contributor()?;

    if matches!(&req.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::BadRequest("Milestone name cannot be empty".to_string()));
    }

    let milestone = db::update_milestone(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(milestone))
}

pub async fn delete_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_contributor()?;

    let milestone = db::get_milestone(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !db::delete_milestone(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &milestone.project_id,
            user_id: &user.user_id,
            action: "deleted",
            entity: ActivityEntity::Milestone,
            entity_id: Some(&milestone.id),
            details: Some(milestone.name),
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
