//! # 활동 로그 쿼리 모듈

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 활동 로그를 한 건 기록합니다.
pub async fn insert_activity(pool: &SqlitePool, entry: &NewActivity<'_>) -> Result<(), AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO activity_logs (id, project_id, user_id, action, entity, entity_id, details)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(entry.project_id)
    .bind(entry.user_id)
    .bind(entry.action)
    .bind(entry.entity.as_str())
    .bind(entry.entity_id)
    .bind(&entry.details)
    .execute(pool)
    .await?;

    Ok(())
}

/// 프로젝트의 최근 활동을 최신순으로 최대 `limit`건 조회합니다.
///
/// 같은 밀리초에 기록된 항목은 삽입 순서(rowid)로 정렬됩니다.
pub async fn list_activity(
    pool: &SqlitePool,
    project_id: &str,
    limit: i64,
) -> Result<Vec<ActivityLog>, AppError> {
    let logs = sqlx::query_as::<_, ActivityLog>(
        r#"
        SELECT id, project_id, user_id, action, entity, entity_id, details, created_at
        FROM activity_logs
        WHERE project_id = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(project_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(logs)
}

/// 활동을 기록하되 실패해도 요청을 실패시키지 않습니다.
///
/// 기록 실패는 `warn` 로그로만 남깁니다.
pub async fn record_activity(pool: &SqlitePool, entry: NewActivity<'_>) {
    if let Err(e) = insert_activity(pool, &entry).await {
        tracing::warn!(
            project_id = entry.project_id,
            action = entry.action,
            "Failed to record activity: {}",
            e
        );
    }
}
