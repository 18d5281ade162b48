//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `activity`: 활동 로그
//! - `document`: 문서와 리비전 이력
//! - `milestone`: 마일스톤
//! - `project`: 프로젝트와 보관(archive) 상태
//! - `risk`: 프로젝트 리스크
//! - `task`: 작업
//! - `user`: 사용자 역할
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Document`처럼 짧게 접근합니다.

pub mod activity;
pub mod document;
pub mod milestone;
pub mod project;
pub mod risk;
pub mod task;
pub mod user;

pub use activity::*;
pub use document::*;
pub use milestone::*;
pub use project::*;
pub use risk::*;
pub use task::*;
pub use user::*;
