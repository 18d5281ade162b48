//! # 작업(Task) 라우트 핸들러
//!
//! - `GET    /api/v1/tasks[?project_id=]` → 목록 (생략하면 전체)
//! - `POST   /api/v1/tasks`               → 생성
//! - `PATCH  /api/v1/tasks/{id}`          → 부분 수정
//! - `DELETE /api/v1/tasks/{id}`          → 삭제
//!
//! 담당자 지정 시 알림 메일은 보내지 않습니다.

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;

/// 자기 자신을 선행 작업으로 둘 수 없습니다.
fn check_dependencies(id: &str, dependencies: Option<&[String]>) -> Result<(), AppError> {
    if dependencies.is_some_and(|deps| deps.iter().any(|d| d == id)) {
        return Err(AppError::BadRequest(
            "A task cannot depend on itself".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_tasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Value>, AppError> {
    let tasks = db::list_tasks(&state.pool, query.project_id.as_deref()).await?;
    Ok(Json(json!({ "tasks": tasks })))
}

pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    user.require_contributor()?;

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Task title is required".to_string()));
    }
    db::get_project(&state.pool, &req.project_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let id = uuid::Uuid::now_v7().to_string();
    let task = db::create_task(&state.pool, &id, &req).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &task.project_id,
            user_id: &user.user_id,
            action: "created",
            entity: ActivityEntity::Task,
            entity_id: Some(&task.id),
            details: Some(task.title.clone()),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    user.require_contributor()?;

    if matches!(&req.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::BadRequest("Task title cannot be empty".to_string()));
    }
    check_dependencies(&id, req.dependencies.as_deref())?;

    let task = db::update_task(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &task.project_id,
            user_id: &user.user_id,
            action: "updated",
            entity: ActivityEntity::Task,
            entity_id: Some(&task.id),
            details: Some(task.status.clone()),
        },
    )
    .await;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_contributor()?;

    let task = db::get_task(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !db::delete_task(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &task.project_id,
            user_id: &user.user_id,
            action: "deleted",
            entity: ActivityEntity::Task,
            entity_id: Some(&task.id),
            details: Some(task.title),
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_dependency_is_rejected() {
        let deps = vec!["t0".to_string(), "t1".to_string()];
        assert!(check_dependencies("t1", Some(&deps)).is_err());
        assert!(check_dependencies("t2", Some(&deps)).is_ok());
        assert!(check_dependencies("t1", None).is_ok());
    }
}
