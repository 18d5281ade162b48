use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub async fn list_milestones(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<Milestone>, AppError> {
    let milestones = sqlx::query_as::<_, Milestone>(
        r#"
        SELECT id, project_id, name, description, due_date, status, completion_percentage,
               sort_order, created_at, updated_at
        FROM milestones
        WHERE project_id = ?
        ORDER BY sort_order, created_at
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(milestones)
}

pub async fn get_milestone(pool: &SqlitePool, id: &str) -> Result<Option<Milestone>, AppError> {
    let milestone = sqlx::query_as::<_, Milestone>(
        r#"
        SELECT id, project_id, name, description, due_date, status, completion_percentage,
               sort_order, created_at, updated_at
        FROM milestones
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(milestone)
}

pub async fn create_milestone(
    pool: &SqlitePool,
    id: &str,
    req: &CreateMilestoneRequest,
) -> Result<Milestone, AppError> {
    let status = req.status.unwrap_or(MilestoneStatus::NotStarted);

    sqlx::query(
        r#"
        INSERT INTO milestones (id, project_id, name, description, due_date, status,
                                completion_percentage, sort_order)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&req.project_id)
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.due_date.map(|d| d.to_string()))
    .bind(status.as_str())
    .bind(req.completion_percentage.unwrap_or(0))
    .bind(req.sort_order.unwrap_or(0))
    .execute(pool)
    .await?;

    get_milestone(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created milestone".to_string()))
}

/// 허용된 필드만 바꾸는 부분 업데이트. 없으면 `Ok(None)`.
pub async fn update_milestone(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateMilestoneRequest,
) -> Result<Option<Milestone>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE milestones SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );

    if let Some(name) = &req.name {
        query.push(", name = ").push_bind(name.trim().to_string());
    }
    if let Some(description) = &req.description {
        query.push(", description = ").push_bind(description.clone());
    }
    if let Some(due_date) = req.due_date {
        query.push(", due_date = ").push_bind(due_date.to_string());
    }
    if let Some(status) = req.status {
        query.push(", status = ").push_bind(status.as_str());
    }
    if let Some(pct) = req.completion_percentage {
        query.push(", completion_percentage = ").push_bind(pct);
    }
    if let Some(sort_order) = req.sort_order {
        query.push(", sort_order = ").push_bind(sort_order);
    }

    query.push(" WHERE id = ").push_bind(id.to_string());

    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_milestone(pool, id).await
}

pub async fn delete_milestone(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM milestones WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
