//! # 문서 버전 원장(Document Version Ledger)
//!
//! 프로젝트별로 (원본 파일명 → 문서) 를 하나씩만 유지하고,
//! 같은 이름으로 다시 올라온 파일은 새 버전으로 쌓습니다.
//!
//! ## 처리 흐름
//! ```text
//! DocumentLedger::upload()
//!   1. BlobStorage::write()       ← 파일 바이트를 먼저 기록
//!   2. DocumentLedger::ingest()   ← 성공한 경우에만 메타데이터 기록
//!      (실패하면 1에서 쓴 파일을 지움)
//! ```
//!
//! 삭제(`remove`)는 반대 순서입니다. 메타데이터를 먼저 지우고,
//! 그 시점의 현재 리비전 파일만 지웁니다.
//! 이전 리비전(history) 파일은 디스크에 그대로 남습니다.

use std::sync::Arc;

use axum::body::Bytes;
use sqlx::SqlitePool;

use crate::{db, error::AppError, models::*, services::storage::BlobStorage};

/// 문서 버전 원장
///
/// DB 풀과 파일 저장소를 생성자에서 주입받습니다.
/// 둘 다 내부적으로 Arc이므로 clone 비용이 작습니다.
#[derive(Debug, Clone)]
pub struct DocumentLedger {
    pool: SqlitePool,
    storage: Arc<dyn BlobStorage>,
}

/// 업로드 한 건
#[derive(Debug)]
pub struct Upload {
    pub project_id: String,
    pub original_name: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub uploaded_by: String,
    pub data: Bytes,
}

impl DocumentLedger {
    pub fn new(pool: SqlitePool, storage: Arc<dyn BlobStorage>) -> Self {
        Self { pool, storage }
    }

    /// 이미 저장된 파일의 새 리비전을 기록합니다.
    ///
    /// - 같은 (project_id, original_name) 문서가 없으면 version 1로 생성
    /// - 있으면 현재 리비전을 history에 넣고 교체, version + 1
    ///
    /// 같은 키에 대한 동시 호출은 DB 안에서 직렬화되므로 이력이 유실되지 않습니다.
    pub async fn ingest(&self, rev: NewRevision) -> Result<Document, AppError> {
        let id = uuid::Uuid::now_v7().to_string();
        let doc = db::upsert_revision(&self.pool, &id, &rev).await?;

        tracing::info!(
            document_id = %doc.id,
            project_id = %doc.project_id,
            original_name = %doc.original_name,
            version = doc.version_number,
            "Document revision recorded"
        );
        Ok(doc)
    }

    /// 파일을 저장소에 먼저 쓰고, 성공하면 원장에 기록합니다.
    ///
    /// 원장 기록이 실패하면 방금 쓴 파일을 지웁니다.
    /// 이 정리 작업이 실패해도 원래 에러를 그대로 돌려주고 `warn` 로그만 남깁니다.
    pub async fn upload(&self, upload: Upload) -> Result<Document, AppError> {
        let size_bytes = i64::try_from(upload.data.len())
            .map_err(|_| AppError::PayloadTooLarge("File is too large".to_string()))?;

        let locator = self.storage.write(&upload.original_name, upload.data).await?;

        let rev = NewRevision {
            project_id: upload.project_id,
            name: upload
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| upload.original_name.clone()),
            original_name: upload.original_name,
            storage_locator: locator.clone(),
            size_bytes,
            mime_type: upload.mime_type,
            uploaded_by: upload.uploaded_by,
        };

        match self.ingest(rev).await {
            Ok(doc) => Ok(doc),
            Err(err) => {
                if let Err(cleanup) = self.storage.delete(&locator).await {
                    tracing::warn!(locator = %locator, "Failed to clean up unrecorded upload: {}", cleanup);
                }
                Err(err)
            }
        }
    }

    /// 프로젝트의 모든 문서를 현재 리비전과 전체 이력과 함께 반환합니다.
    pub async fn list(&self, project_id: &str) -> Result<Vec<Document>, AppError> {
        db::list_documents_by_project(&self.pool, project_id).await
    }

    /// ID로 문서를 조회합니다. 없으면 `NotFound`.
    pub async fn get(&self, id: &str) -> Result<Document, AppError> {
        db::get_document(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// 문서를 삭제합니다.
    ///
    /// 1. 메타데이터 삭제 (`DELETE ... RETURNING`)
    /// 2. 그 행이 가리키던 현재 리비전 파일 삭제 (이미 없으면 무시)
    ///
    /// 이전 리비전 파일은 삭제하지 않습니다.
    /// 2단계가 실패하면 `Storage` 에러를 돌려주며, 이때 레코드는 이미 없습니다.
    /// 삭제된 문서를 반환합니다 (활동 로그 기록용).
    pub async fn remove(&self, id: &str) -> Result<Document, AppError> {
        let doc = db::delete_document_returning(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.storage.delete(&doc.storage_locator).await?;

        tracing::info!(
            document_id = %doc.id,
            project_id = %doc.project_id,
            retained_revisions = doc.history.len(),
            "Document removed"
        );
        Ok(doc)
    }

    /// 프로젝트를 문서와 함께 삭제합니다.
    ///
    /// 문서를 모두 `remove`한 뒤 프로젝트 행을 지웁니다.
    /// 그 사이 업로드가 끼어들면 외래키 때문에 프로젝트 삭제가 `Validation`으로 실패하므로,
    /// 남은 문서를 다시 지우고 한 번 더 시도합니다.
    /// 두 번째도 실패하면 그 에러를 돌려주며, 이미 지운 문서는 복구되지 않습니다.
    ///
    /// 프로젝트가 없으면 `Ok(false)`.
    pub async fn remove_project(&self, project_id: &str) -> Result<bool, AppError> {
        let mut retried = false;
        loop {
            for document in self.list(project_id).await? {
                match self.remove(&document.id).await {
                    // 동시에 다른 요청이 지운 문서는 건너뜁니다.
                    Ok(_) | Err(AppError::NotFound) => {}
                    Err(e) => return Err(e),
                }
            }

            match db::delete_project(&self.pool, project_id).await {
                Err(AppError::Validation(msg)) if !retried => {
                    tracing::warn!(project_id, "Documents appeared during project delete, retrying: {}", msg);
                    retried = true;
                }
                result => return result,
            }
        }
    }

    /// 문서의 특정 버전(없으면 현재 버전) 파일 내용을 읽습니다.
    pub async fn read(&self, doc: &Document, version: Option<i64>) -> Result<Bytes, AppError> {
        let version = version.unwrap_or(doc.version_number);
        let locator = doc.locator_for_version(version).ok_or(AppError::NotFound)?;
        self.storage.read(locator).await
    }
}
