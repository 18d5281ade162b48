//! # 서비스 계층
//!
//! DB 쿼리 여러 개나 파일 저장소를 묶어서 쓰는 도메인 로직입니다.
//! - `storage`: 업로드 파일 바이트 저장소
//! - `ledger`: 문서 버전 원장과 업로드 흐름
//! - `archive`: 프로젝트 보관 상태 전환

pub mod archive;
pub mod ledger;
pub mod storage;

pub use archive::ArchiveGate;
pub use ledger::{DocumentLedger, Upload};
pub use storage::{BlobStorage, LocalBlobStorage};
