use crate::error::AppError;
use crate::models::*;
use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};

const TASK_COLUMNS: &str = "id, project_id, title, description, assigned_to, priority, status, \
                            due_date, dependencies, created_at, updated_at";

/// 작업 목록. `project_id`가 None이면 전체 작업을 생성순으로 반환합니다.
pub async fn list_tasks(
    pool: &SqlitePool,
    project_id: Option<&str>,
) -> Result<Vec<Task>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {TASK_COLUMNS} FROM tasks"));
    if let Some(project_id) = project_id {
        query.push(" WHERE project_id = ").push_bind(project_id.to_string());
    }
    query.push(" ORDER BY created_at, rowid");

    let tasks = query.build_query_as::<Task>().fetch_all(pool).await?;
    Ok(tasks)
}

pub async fn get_task(pool: &SqlitePool, id: &str) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(task)
}

pub async fn create_task(
    pool: &SqlitePool,
    id: &str,
    req: &CreateTaskRequest,
) -> Result<Task, AppError> {
    let priority = req.priority.unwrap_or(Priority::Medium);
    let status = req.status.unwrap_or(TaskStatus::ToDo);
    let dependencies = Json(req.dependencies.clone().unwrap_or_default());

    sqlx::query(
        r#"
        INSERT INTO tasks (id, project_id, title, description, assigned_to, priority, status,
                           due_date, dependencies)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&req.project_id)
    .bind(req.title.trim())
    .bind(&req.description)
    .bind(&req.assigned_to)
    .bind(priority.as_str())
    .bind(status.as_str())
    .bind(req.due_date.map(|d| d.to_string()))
    .bind(dependencies)
    .execute(pool)
    .await?;

    get_task(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created task".to_string()))
}

/// 허용된 필드만 바꾸는 부분 업데이트. 없으면 `Ok(None)`.
pub async fn update_task(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateTaskRequest,
) -> Result<Option<Task>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE tasks SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );

    if let Some(title) = &req.title {
        query.push(", title = ").push_bind(title.trim().to_string());
    }
    if let Some(description) = &req.description {
        query.push(", description = ").push_bind(description.clone());
    }
    if let Some(assigned_to) = &req.assigned_to {
        query.push(", assigned_to = ").push_bind(assigned_to.clone());
    }
    if let Some(priority) = req.priority {
        query.push(", priority = ").push_bind(priority.as_str());
    }
    if let Some(status) = req.status {
        query.push(", status = ").push_bind(status.as_str());
    }
    if let Some(due_date) = req.due_date {
        query.push(", due_date = ").push_bind(due_date.to_string());
    }
    if let Some(dependencies) = &req.dependencies {
        query.push(", dependencies = ").push_bind(Json(dependencies.clone()));
    }

    query.push(" WHERE id = ").push_bind(id.to_string());

    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_task(pool, id).await
}

pub async fn delete_task(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
