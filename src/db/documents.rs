//! # 문서 데이터베이스 쿼리 모듈
//!
//! `documents` 테이블에 대한 쿼리 함수들입니다.
//!
//! 버전 교체는 `upsert_revision` 한 문장으로 처리합니다.
//! `INSERT ... ON CONFLICT DO UPDATE`는 SQLite 안에서 원자적으로 실행되므로
//! 같은 (project_id, original_name)에 대한 동시 업로드가 서로 섞이지 않습니다.
//! (읽기 → 수정 → 저장을 따로 하면 두 요청이 같은 버전을 읽고 하나의 이력이 사라질 수 있음)

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 새 리비전을 기록합니다.
///
/// - (project_id, original_name) 문서가 없으면: version_number = 1, history = [] 로 생성
/// - 있으면: 현재 리비전을 history 끝에 추가하고, 현재 리비전을 새 값으로 교체,
///   version_number를 1 증가
///
/// 표시 이름(`name`)은 최초 생성 때만 설정됩니다.
pub async fn upsert_revision(
    pool: &SqlitePool,
    id: &str,
    rev: &NewRevision,
) -> Result<Document, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        INSERT INTO documents (id, project_id, name, original_name, storage_locator,
                               size_bytes, mime_type, uploaded_by)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (project_id, original_name) DO UPDATE SET
            history = json_insert(
                documents.history, '$[#]',
                json_object(
                    'storage_locator', documents.storage_locator,
                    'size_bytes', documents.size_bytes,
                    'uploaded_by', documents.uploaded_by,
                    'created_at', documents.updated_at
                )
            ),
            storage_locator = excluded.storage_locator,
            size_bytes = excluded.size_bytes,
            mime_type = excluded.mime_type,
            uploaded_by = excluded.uploaded_by,
            version_number = documents.version_number + 1,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        RETURNING id, project_id, name, original_name, storage_locator, size_bytes,
                  mime_type, uploaded_by, version_number, history, created_at, updated_at
        "#,
        // ↑ DO UPDATE 안에서 `documents.컬럼`은 교체 전 값, `excluded.컬럼`은 새로 넣으려던 값입니다.
        //   '$[#]'는 JSON 배열의 끝(append) 위치를 뜻합니다.
    )
    .bind(id)
    .bind(&rev.project_id)
    .bind(&rev.name)
    .bind(&rev.original_name)
    .bind(&rev.storage_locator)
    .bind(rev.size_bytes)
    .bind(&rev.mime_type)
    .bind(&rev.uploaded_by)
    .fetch_one(pool)
    .await?;

    Ok(doc)
}

/// 프로젝트의 모든 문서를 조회합니다 (삽입 순서).
pub async fn list_documents_by_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, project_id, name, original_name, storage_locator, size_bytes,
               mime_type, uploaded_by, version_number, history, created_at, updated_at
        FROM documents
        WHERE project_id = ?
        ORDER BY rowid
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// ID로 단일 문서를 조회합니다.
pub async fn get_document(pool: &SqlitePool, id: &str) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, project_id, name, original_name, storage_locator, size_bytes,
               mime_type, uploaded_by, version_number, history, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}

/// 문서 메타데이터를 삭제하고, 삭제 직전의 행을 돌려줍니다.
///
/// `DELETE ... RETURNING` 한 문장이므로 돌려받은 `storage_locator`는
/// 삭제 시점의 현재 리비전입니다. 조회와 삭제 사이에 업로드가 끼어들 틈이 없습니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 삭제 성공
/// - `Ok(None)`: 해당 ID의 문서가 없음
pub async fn delete_document_returning(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        DELETE FROM documents
        WHERE id = ?
        RETURNING id, project_id, name, original_name, storage_locator, size_bytes,
                  mime_type, uploaded_by, version_number, history, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}
