//! # 파일 저장소(Blob Storage) 서비스
//!
//! 업로드된 파일의 원본 바이트를 저장/조회/삭제합니다.
//! 문서 원장(ledger)은 파일 내용을 직접 다루지 않고, 여기서 돌려준
//! 저장 위치(storage locator)만 기록합니다.
//!
//! - `write()`: 바이트를 저장하고 새 위치 문자열을 반환
//! - `read()`: 위치의 바이트를 읽음 (다운로드용)
//! - `delete()`: 위치의 파일을 삭제. 이미 없으면 성공으로 처리

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::{fs, io::AsyncWriteExt};

use crate::error::AppError;

/// 파일 저장소 인터페이스
///
/// `Arc<dyn BlobStorage>`로 AppState와 원장에 주입됩니다.
#[async_trait]
pub trait BlobStorage: Send + Sync + std::fmt::Debug {
    /// 바이트를 저장하고 저장 위치를 반환합니다.
    /// `original_name`은 위치 문자열을 만들 때 참고만 합니다.
    async fn write(&self, original_name: &str, data: Bytes) -> Result<String, AppError>;

    /// 저장 위치의 바이트를 읽습니다. 파일이 없으면 `NotFound`.
    async fn read(&self, locator: &str) -> Result<Bytes, AppError>;

    /// 저장 위치의 파일을 삭제합니다. 파일이 없어도 에러가 아닙니다.
    async fn delete(&self, locator: &str) -> Result<(), AppError>;
}

/// 로컬 디스크 저장소
///
/// 모든 파일은 `root` 바로 아래에 평평하게(flat) 저장됩니다.
#[derive(Debug, Clone)]
pub struct LocalBlobStorage {
    root: PathBuf,
}

impl LocalBlobStorage {
    /// 저장소 루트 디렉토리를 만들고(이미 있으면 그대로) 저장소를 생성합니다.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    /// 위치 문자열을 실제 경로로 바꿉니다.
    ///
    /// 위치는 파일 이름 하나여야 합니다. `../x`나 `a/b` 같은 값은 거부합니다.
    fn resolve(&self, locator: &str) -> Result<PathBuf, AppError> {
        let mut components = Path::new(locator).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(locator)),
            _ => Err(AppError::Storage(format!(
                "Invalid storage locator: {locator}"
            ))),
        }
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn write(&self, original_name: &str, data: Bytes) -> Result<String, AppError> {
        let locator = storage_file_name(original_name);
        let full_path = self.resolve(&locator)?;

        // sync_all()까지 끝나야 "기록 완료"로 봅니다.
        // 원장은 이 함수가 성공한 뒤에만 위치를 기록합니다.
        let write = async {
            let mut file = fs::File::create(&full_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await
        };
        write
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {locator}: {e}")))?;

        tracing::debug!(locator = %locator, bytes = data.len(), "Wrote blob");
        Ok(locator)
    }

    async fn read(&self, locator: &str) -> Result<Bytes, AppError> {
        let full_path = self.resolve(locator)?;
        match fs::read(&full_path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound),
            Err(e) => Err(AppError::Storage(format!("Failed to read {locator}: {e}"))),
        }
    }

    async fn delete(&self, locator: &str) -> Result<(), AppError> {
        let full_path = self.resolve(locator)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                tracing::debug!(locator, "Deleted blob");
                Ok(())
            }
            // 이미 없는 파일은 삭제된 것과 같습니다.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to delete {locator}: {e}"))),
        }
    }
}

/// 업로드 파일명으로 저장 위치(파일 이름)를 만듭니다.
///
/// 형식: `{UUIDv7}-{slug(이름)}.{slug(확장자)}`
///
/// # 예시
/// ```text
/// "Q3 Report (final).pdf" → "0192...-q3-report-final.pdf"
/// "README"                → "0192...-readme"
/// ```
pub fn storage_file_name(original_name: &str) -> String {
    let (stem, ext) = match original_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (original_name, None),
    };

    let mut safe_stem = slug::slugify(stem);
    if safe_stem.is_empty() {
        safe_stem = "file".to_string();
    }

    let id = uuid::Uuid::now_v7();
    match ext.map(slug::slugify).filter(|e| !e.is_empty()) {
        Some(ext) => format!("{id}-{safe_stem}.{ext}"),
        None => format!("{id}-{safe_stem}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalBlobStorage::new(dir.path()).await.unwrap();

        let locator = storage
            .write("notes.txt", Bytes::from("hello"))
            .await
            .unwrap();
        assert!(locator.ends_with("-notes.txt"));
        assert_eq!(storage.read(&locator).await.unwrap(), Bytes::from("hello"));

        storage.delete(&locator).await.unwrap();
        assert!(matches!(
            storage.read(&locator).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalBlobStorage::new(dir.path()).await.unwrap();

        storage.delete("never-written.bin").await.unwrap();
    }

    #[tokio::test]
    async fn same_name_gets_distinct_locators() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalBlobStorage::new(dir.path()).await.unwrap();

        let a = storage.write("x.txt", Bytes::from("a")).await.unwrap();
        let b = storage.write("x.txt", Bytes::from("b")).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(storage.read(&a).await.unwrap(), Bytes::from("a"));
        assert_eq!(storage.read(&b).await.unwrap(), Bytes::from("b"));
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalBlobStorage::new(dir.path().join("uploads")).await.unwrap();

        assert!(matches!(
            storage.read("../secret").await,
            Err(AppError::Storage(_))
        ));
        assert!(matches!(
            storage.delete("nested/file").await,
            Err(AppError::Storage(_))
        ));
    }

    #[test]
    fn storage_file_name_is_slugged() {
        let name = storage_file_name("Q3 Report (final).PDF");
        assert!(name.ends_with("-q3-report-final.pdf"), "{name}");

        let bare = storage_file_name("README");
        assert!(bare.ends_with("-readme"), "{bare}");

        let dotfile = storage_file_name(".env");
        assert!(dotfile.ends_with("-env"), "{dotfile}");
    }
}
