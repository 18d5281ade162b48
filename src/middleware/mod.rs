//! # 미들웨어 / 요청 추출기
//!
//! - `auth`: JWT 검증과 역할 검사 (`AuthUser`)

pub mod auth;
