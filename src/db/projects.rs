//! # 프로젝트 데이터베이스 쿼리 모듈
//!
//! `projects` 테이블 CRUD와 보관(archive) 상태 전환 쿼리입니다.
//!
//! 보관 상태 전환(`set_archived` / `clear_archived`)은 `UPDATE ... RETURNING` 한 문장으로
//! 세 필드(is_archived, archived_at, archived_by)를 함께 바꾸고,
//! 다른 컬럼(updated_at 포함)은 건드리지 않습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};

/// 보관 여부로 프로젝트 목록을 조회합니다 (최근 생성 순).
pub async fn list_projects(pool: &SqlitePool, archived: bool) -> Result<Vec<Project>, AppError> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, status, priority, start_date, end_date, owner_id,
               members, progress, budget, is_archived, archived_at, archived_by,
               created_at, updated_at
        FROM projects
        WHERE is_archived = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(archived)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// ID로 단일 프로젝트를 조회합니다. 보관된 프로젝트도 반환합니다.
pub async fn get_project(pool: &SqlitePool, id: &str) -> Result<Option<Project>, AppError> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, status, priority, start_date, end_date, owner_id,
               members, progress, budget, is_archived, archived_at, archived_by,
               created_at, updated_at
        FROM projects
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// 새 프로젝트를 생성합니다. 항상 Active 상태로 만들어집니다.
pub async fn create_project(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
    req: &CreateProjectRequest,
) -> Result<Project, AppError> {
    let status = req.status.unwrap_or(ProjectStatus::NotStarted);
    let priority = req.priority.unwrap_or(Priority::Medium);
    let members = Json(req.members.clone().unwrap_or_default());

    sqlx::query(
        r#"
        INSERT INTO projects (id, name, description, status, priority, start_date, end_date,
                              owner_id, members, budget)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(status.as_str())
    .bind(priority.as_str())
    .bind(req.start_date.map(|d| d.to_string()))
    .bind(req.end_date.map(|d| d.to_string()))
    .bind(owner_id)
    .bind(members)
    .bind(req.budget)
    .execute(pool)
    .await?;

    get_project(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created project".to_string()))
}

/// 프로젝트를 수정합니다 (부분 업데이트).
///
/// 요청에 포함된 필드만 SET 절에 추가합니다.
/// `QueryBuilder`로 한 문장을 만들어 실행하므로 필드가 여러 개여도 원자적입니다.
///
/// # 반환값
/// - `Ok(Some(Project))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 프로젝트가 없음
pub async fn update_project(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateProjectRequest,
) -> Result<Option<Project>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE projects SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );

    if let Some(name) = &req.name {
        query.push(", name = ").push_bind(name.trim().to_string());
    }
    if let Some(description) = &req.description {
        query.push(", description = ").push_bind(description.clone());
    }
    if let Some(status) = req.status {
        query.push(", status = ").push_bind(status.as_str());
    }
    if let Some(priority) = req.priority {
        query.push(", priority = ").push_bind(priority.as_str());
    }
    if let Some(start_date) = req.start_date {
        query.push(", start_date = ").push_bind(start_date.to_string());
    }
    if let Some(end_date) = req.end_date {
        query.push(", end_date = ").push_bind(end_date.to_string());
    }
    if let Some(members) = &req.members {
        query.push(", members = ").push_bind(Json(members.clone()));
    }
    if let Some(progress) = req.progress {
        query.push(", progress = ").push_bind(progress);
    }
    if let Some(budget) = req.budget {
        query.push(", budget = ").push_bind(budget);
    }

    query.push(" WHERE id = ").push_bind(id.to_string());

    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_project(pool, id).await
}

/// 프로젝트를 삭제합니다.
///
/// 마일스톤과 활동 로그는 `ON DELETE CASCADE`로 함께 삭제됩니다.
/// 문서는 외래키가 CASCADE가 아니므로, 호출자가 먼저 정리해야 합니다.
pub async fn delete_project(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 보관 상태로 전환합니다. 이미 보관된 경우 시각과 처리자를 새로 기록합니다.
///
/// 프로젝트가 없으면 `Ok(None)`.
pub async fn set_archived(
    pool: &SqlitePool,
    id: &str,
    archived_by: &str,
) -> Result<Option<Project>, AppError> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET is_archived = 1,
            archived_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
            archived_by = ?
        WHERE id = ?
        RETURNING id, name, description, status, priority, start_date, end_date, owner_id,
                  members, progress, budget, is_archived, archived_at, archived_by,
                  created_at, updated_at
        "#,
    )
    .bind(archived_by)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// 보관을 해제합니다. archived_at / archived_by 를 함께 비웁니다.
///
/// 프로젝트가 없으면 `Ok(None)`.
pub async fn clear_archived(pool: &SqlitePool, id: &str) -> Result<Option<Project>, AppError> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET is_archived = 0,
            archived_at = NULL,
            archived_by = NULL
        WHERE id = ?
        RETURNING id, name, description, status, priority, start_date, end_date, owner_id,
                  members, progress, budget, is_archived, archived_at, archived_by,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}
