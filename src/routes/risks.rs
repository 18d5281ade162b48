//! # 리스크(Risk) 라우트 핸들러
//!
//! - `GET    /api/v1/risks?project_id=` → 목록 (최신순)
//! - `POST   /api/v1/risks`             → 생성
//! - `PATCH  /api/v1/risks/{id}`        → 부분 수정 (project_id는 바꿀 수 없음)
//! - `DELETE /api/v1/risks/{id}`        → 삭제
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

pub async fn list_risks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RiskListQuery>,
) -> Result<Json<Value>, AppError> {
    let risks = db::list_risks(&state.pool, &query.project_id).await?;
    Ok(Json(json!({ "risks": risks })))
}

pub async fn create_risk(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateRiskRequest>,
) -> Result<(StatusCode, Json<Risk>), AppError> {
    user.require_contributor()?;

    if req.description.trim().is_empty() {
        return Err(AppError::BadRequest("Risk description is required".to_string()));
    }
    db::get_project(&state.pool, &req.project_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let id = uuid::Uuid::now_v7().to_string();
    let risk = db::create_risk(&state.pool, &id, &req).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &risk.project_id,
            user_id: &user.user_id,
            action: "created",
            entity: ActivityEntity::Risk,
            entity_id: Some(&risk.id),
            details: Some(format!("{} ({})", risk.description, risk.severity)),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(risk)))
}

pub async fn update_risk(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRiskRequest>,
) -> Result<Json<Risk>, AppError> {
    user.require_contributor()?;

    if matches!(&req.description, Some(d) if d.trim().is_empty()) {
        return Err(AppError::BadRequest("Risk description cannot be empty".to_string()));
    }

    let risk = db::update_risk(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &risk.project_id,
            user_id: &user.user_id,
            action: "updated",
            entity: ActivityEntity::Risk,
            entity_id: Some(&risk.id),
            details: Some(risk.status.clone()),
        },
    )
    .await;

    Ok(Json(risk))
}

pub async fn delete_risk(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_contributor()?;

    let risk = db::get_risk(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !db::delete_risk(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &risk.project_id,
            user_id: &user.user_id,
            action: "deleted",
            entity: ActivityEntity::Risk,
            entity_id: Some(&risk.id),
            details: Some(risk.description),
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
