use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// 프로젝트의 리스크 목록 (최신순)
pub async fn list_risks(pool: &SqlitePool, project_id: &str) -> Result<Vec<Risk>, AppError> {
    let risks = sqlx::query_as::<_, Risk>(
        r#"
        SELECT id, project_id, description, severity, impact, mitigation, owner_id, status,
               created_at, updated_at
        FROM risks
        WHERE project_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(risks)
}

pub async fn get_risk(pool: &SqlitePool, id: &str) -> Result<Option<Risk>, AppError> {
    let risk = sqlx::query_as::<_, Risk>(
        r#"
        SELECT id, project_id, description, severity, impact, mitigation, owner_id, status,
               created_at, updated_at
        FROM risks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(risk)
}

pub async fn create_risk(
    pool: &SqlitePool,
    id: &str,
    req: &CreateRiskRequest,
) -> Result<Risk, AppError> {
    let severity = req.severity.unwrap_or(RiskSeverity::Medium);
    let status = req.status.unwrap_or(RiskStatus::Identified);

    sqlx::query(
        r#"
        INSERT INTO risks (id, project_id, description, severity, impact, mitigation,
                           owner_id, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&req.project_id)
    .bind(req.description.trim())
    .bind(severity.as_str())
    .bind(&req.impact)
    .bind(&req.mitigation)
    .bind(&req.owner_id)
    .bind(status.as_str())
    .execute(pool)
    .await?;

    get_risk(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created risk".to_string()))
}

/// 허용된 필드만 바꾸는 부분 업데이트. 없으면 `Ok(None)`.
pub async fn update_risk(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateRiskRequest,
) -> Result<Option<Risk>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE risks SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );

    if let Some(description) = &req.description {
        query.push(", description = ").push_bind(description.trim().to_string());
    }
    if let Some(severity) = req.severity {
        query.push(", severity = ").push_bind(severity.as_str());
    }
    if let Some(impact) = &req.impact {
        query.push(", impact = ").push_bind(impact.clone());
    }
    if let Some(mitigation) = &req.mitigation {
        query.push(", mitigation = ").push_bind(mitigation.clone());
    }
    if let Some(owner_id) = &req.owner_id {
        query.push(", owner_id = ").push_bind(owner_id.clone());
    }
    if let Some(status) = req.status {
        query.push(", status = ").push_bind(status.as_str());
    }

    query.push(" WHERE id = ").push_bind(id.to_string());

    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_risk(pool, id).await
}

pub async fn delete_risk(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM risks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
