//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /api/v1/health` → `{ "status": "ok" }`
//!
//! 인증 없이 호출할 수 있습니다. 로드밸런서나 컨테이너 헬스체크에서 사용합니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`
///
/// State도 인증도 필요 없는 가장 단순한 핸들러입니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
