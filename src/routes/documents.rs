//! # 문서(Document) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/documents?project_id=`       → 프로젝트의 문서 목록 (이력 포함)
//! - `POST   /api/v1/documents`                   → 업로드 (multipart: project_id, name?, file)
//! - `GET    /api/v1/documents/{id}/download`     → 파일 내려받기 (`?version=N`)
//! - `DELETE /api/v1/documents/{id}`              → 문서 삭제
//!
//! 같은 프로젝트에 같은 파일명으로 다시 올리면 새 문서가 아니라 새 버전이 됩니다.
//! 응답 코드로 구분합니다: 새로 생성 `201 Created`, 버전 교체 `200 OK`.

use std::sync::Arc;

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services::{ArchiveGate, BlobStorage, DocumentLedger, Upload},
};
use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 필드는 모두 Arc 기반이라 요청마다 clone해도 저렴합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// 문서 버전 원장
    pub ledger: DocumentLedger,
    /// 프로젝트 보관 게이트
    pub archive: ArchiveGate,
    /// 업로드 파일 한 개의 최대 크기 (바이트)
    pub max_upload_bytes: usize,
    /// JWT 검증용 비밀키 (외부 인증 서비스와 공유)
    pub jwt_secret: String,
}

impl AppState {
    /// 풀과 저장소로 원장/게이트를 구성합니다.
    pub fn new(
        pool: SqlitePool,
        storage: Arc<dyn BlobStorage>,
        jwt_secret: String,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            ledger: DocumentLedger::new(pool.clone(), storage),
            archive: ArchiveGate::new(pool.clone()),
            pool,
            max_upload_bytes,
            jwt_secret,
        }
    }
}

/// `GET /documents?project_id=...`
pub async fn list_documents(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<Value>, AppError> {
    let documents = state.ledger.list(&query.project_id).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `POST /documents`: multipart 업로드
///
/// 1. 폼 필드 읽기 (`project_id`, `name`, `file`)
/// 2. 파일 크기 확인 (`max_upload_bytes` 초과 시 413)
/// 3. 파일 저장 → 원장 기록 (`DocumentLedger::upload`)
/// 4. 활동 로그 기록
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Document>), AppError> {
    user.require_contributor()?;

    let mut project_id: Option<String> = None;
    let mut name: Option<String> = None;
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "project_id" => {
                project_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Read error: {e}")))?,
                );
            }
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Read error: {e}")))?,
                );
            }
            "file" => {
                let original_name = field.file_name().unwrap_or("").to_string();
                let mime_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Read error: {e}")))?;
                file = Some((original_name, mime_type, data));
            }
            _ => {}
        }
    }

    let project_id = project_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("project_id is required".to_string()))?;
    let (original_name, mime_type, data) =
        file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    if original_name.trim().is_empty() {
        return Err(AppError::BadRequest("Uploaded file has no name".to_string()));
    }
    // 본문 한도에는 multipart 경계/헤더 여유분이 있으므로 파일 크기는 여기서 따로 봅니다.
    if data.len() > state.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File exceeds {} bytes",
            state.max_upload_bytes
        )));
    }

    // 없는 프로젝트면 파일을 쓰기 전에 404로 끝냅니다.
    db::get_project(&state.pool, &project_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let document = state
        .ledger
        .upload(Upload {
            project_id,
            original_name,
            name,
            mime_type,
            uploaded_by: user.user_id.clone(),
            data,
        })
        .await?;

    let created = document.version_number == 1;
    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &document.project_id,
            user_id: &user.user_id,
            action: if created { "uploaded" } else { "uploaded new version" },
            entity: ActivityEntity::Document,
            entity_id: Some(&document.id),
            details: Some(format!(
                "{} (v{})",
                document.original_name, document.version_number
            )),
        },
    )
    .await;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(document)))
}

/// `GET /documents/{id}/download?version=N`
///
/// version을 생략하면 현재 리비전을 내려받습니다.
pub async fn download_document(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let document = state.ledger.get(&id).await?;
    let data = state.ledger.read(&document, query.version).await?;

    let content_type = document
        .mime_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    // 헤더 값에 넣을 수 없는 문자(따옴표, 제어문자)는 '_'로 바꿉니다.
    let filename: String = document
        .original_name
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Response build failed: {e}")))
}

/// `DELETE /documents/{id}`
///
/// 현재 리비전 파일과 메타데이터를 삭제합니다. 성공 시 `204 No Content`.
pub async fn delete_document(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_manager()?;

    let document = state.ledger.remove(&id).await?;

    db::record_activity(
        &state.pool,
        NewActivity {
            project_id: &document.project_id,
            user_id: &user.user_id,
            action: "deleted",
            entity: ActivityEntity::Document,
            entity_id: Some(&document.id),
            details: Some(document.original_name.clone()),
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
