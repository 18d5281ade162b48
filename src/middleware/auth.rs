//! # 인증 추출기(AuthUser)
//!
//! 토큰 발급은 외부 인증 서비스가 담당합니다.
//! 이 서버는 `Authorization: Bearer <JWT>` 헤더를 검증하고
//! `sub`(사용자 ID)와 `role`(역할)만 꺼내 씁니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::models::Role;
use crate::routes::AppState;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// 인증된 요청자
///
/// 핸들러 인자에 `user: AuthUser`를 적으면 토큰 검증이 자동으로 실행됩니다.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
}

impl AuthUser {
    /// Admin 전용 작업 (보관/보관 해제, 프로젝트 삭제)
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role is required".to_string()))
        }
    }

    /// Admin 또는 Project Manager 전용 작업
    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.role.is_manager() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Admin or Project Manager role is required".to_string(),
            ))
        }
    }

    /// Viewer를 제외한 역할 (업로드, 마일스톤 수정)
    pub fn require_contributor(&self) -> Result<(), AppError> {
        if self.role.can_contribute() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Viewers have read-only access".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = verify_access_token(token, &state.jwt_secret)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Authorization token is required",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid authorization token",
            ),
            AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "expired_token",
                "Authorization token has expired",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// 테스트용 토큰 발급 (운영 환경에서는 외부 인증 서비스가 발급)
#[cfg(test)]
pub fn create_access_token(user_id: &str, role: Role, secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(15)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_keeps_role() {
        let token = create_access_token("u1", Role::ProjectManager, "secret");
        let claims = verify_access_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, Role::ProjectManager);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = create_access_token("u1", Role::Admin, "secret");
        assert!(matches!(
            verify_access_token(&token, "other"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn role_guards() {
        let viewer = AuthUser {
            user_id: "v".to_string(),
            role: Role::Viewer,
        };
        let pm = AuthUser {
            user_id: "pm".to_string(),
            role: Role::ProjectManager,
        };

        assert!(matches!(viewer.require_contributor(), Err(AppError::Forbidden(_))));
        assert!(pm.require_manager().is_ok());
        assert!(matches!(pm.require_admin(), Err(AppError::Forbidden(_))));
    }
}
