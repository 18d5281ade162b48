//! # 문서(Document) 모델 정의
//!
//! 프로젝트에 첨부된 파일의 메타데이터입니다.
//! 같은 프로젝트에 같은 원본 파일명(`original_name`)으로 다시 업로드하면
//! 새 문서가 생기지 않고, 현재 리비전이 `history`로 밀려나며 `version_number`가 1 증가합니다.
//!
//! ## 불변식
//! - `version_number == history.len() + 1`
//! - `history`는 오래된 순서로 쌓이며, 현재 리비전의 `storage_locator`를 포함하지 않음
//! - (project_id, original_name) 조합당 문서는 최대 하나

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// 문서 엔티티: DB의 `documents` 테이블 한 행에 대응합니다.
///
/// `storage_locator` ~ `updated_at`까지가 "현재 리비전"입니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub project_id: String,
    /// 표시 이름 (최초 업로드 때만 설정됨)
    pub name: String,
    /// 업로드된 파일의 원래 이름: 버전 매칭의 자연 키
    pub original_name: String,
    pub storage_locator: String,
    pub size_bytes: i64,
    pub mime_type: Option<String>,
    pub uploaded_by: String,
    pub version_number: i64,
    /// 이전 리비전 목록. JSON 배열 컬럼을 `Json<Vec<_>>`로 바로 디코딩합니다.
    pub history: Json<Vec<Revision>>,
    pub created_at: String,
    pub updated_at: String,
}

/// 과거 리비전 하나의 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub storage_locator: String,
    pub size_bytes: i64,
    pub uploaded_by: String,
    /// 이 리비전이 현재 리비전이 된 시각 (밀려나기 직전의 `updated_at`)
    pub created_at: String,
}

impl Document {
    /// 버전 번호에 해당하는 저장소 위치를 반환합니다.
    ///
    /// - `version_number`와 같으면 현재 리비전
    /// - `1..version_number` 범위면 `history[version - 1]`
    /// - 그 밖의 값이면 None
    pub fn locator_for_version(&self, version: i64) -> Option<&str> {
        if version == self.version_number {
            return Some(&self.storage_locator);
        }
        if version < 1 {
            return None;
        }
        // usize::try_from: 음수가 아님을 위에서 확인했으므로 실패하지 않습니다.
        let index = usize::try_from(version - 1).ok()?;
        self.history.get(index).map(|r| r.storage_locator.as_str())
    }
}

/// 원장(ledger)에 기록할 새 리비전
///
/// 파일 내용은 이미 Blob Storage에 기록된 상태여야 합니다.
/// 원장은 내용을 쓰지 않고, 위치(`storage_locator`)만 기록합니다.
#[derive(Debug, Clone)]
pub struct NewRevision {
    pub project_id: String,
    pub original_name: String,
    /// 표시 이름. 새 문서가 만들어질 때만 사용됩니다.
    pub name: String,
    pub storage_locator: String,
    pub size_bytes: i64,
    pub mime_type: Option<String>,
    pub uploaded_by: String,
}

/// `GET /documents?project_id=...` 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    pub project_id: String,
}

/// `GET /documents/:id/download?version=N` 쿼리 파라미터
/// version이 없으면 현재 리비전을 내려받습니다.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub version: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revision(locator: &str) -> Revision {
        Revision {
            storage_locator: locator.to_string(),
            size_bytes: 1,
            uploaded_by: "u1".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn document_with_history(locators: &[&str], current: &str) -> Document {
        Document {
            id: "d1".to_string(),
            project_id: "p1".to_string(),
            name: "report".to_string(),
            original_name: "report.pdf".to_string(),
            storage_locator: current.to_string(),
            size_bytes: 10,
            mime_type: Some("application/pdf".to_string()),
            uploaded_by: "u1".to_string(),
            version_number: locators.len() as i64 + 1,
            history: Json(locators.iter().map(|l| revision(l)).collect()),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-02T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn locator_for_version_resolves_current_and_history() {
        let doc = document_with_history(&["L1", "L2"], "L3");

        assert_eq!(doc.locator_for_version(1), Some("L1"));
        assert_eq!(doc.locator_for_version(2), Some("L2"));
        assert_eq!(doc.locator_for_version(3), Some("L3"));
        assert_eq!(doc.locator_for_version(0), None);
        assert_eq!(doc.locator_for_version(4), None);
        assert_eq!(doc.locator_for_version(-1), None);
    }

    #[test]
    fn history_serializes_as_plain_array() {
        let doc = document_with_history(&["L1"], "L2");
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["history"][0]["storage_locator"], "L1");
        assert_eq!(value["version_number"], 2);
    }
}
