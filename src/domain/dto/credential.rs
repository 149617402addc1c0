//! 자격 증명 서비스 요청/응답 계약
//!
//! 세션 관리자는 실제 인증 백엔드의 전송 방식이 아니라 이 형태에만 의존합니다.
//!
//! ```json
//! { "success": true, "data": { "user": { ... }, "token": { ... } } }
//! { "success": false, "error": "Invalid email or password" }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::models::{AuthToken, User};

/// 로그인 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

/// 리프레시 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// 로그인 성공 시 전달되는 데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatePayload {
    pub user: User,
    pub token: AuthToken,
}

/// 리프레시 성공 시 전달되는 데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshPayload {
    pub token: AuthToken,
}

/// 로그인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AuthenticatePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthenticateResponse {
    pub fn ok(user: User, token: AuthToken) -> Self {
        Self {
            success: true,
            data: Some(AuthenticatePayload { user, token }),
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(reason.into()),
        }
    }
}

/// 리프레시 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RefreshPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RefreshResponse {
    pub fn ok(token: AuthToken) -> Self {
        Self {
            success: true,
            data: Some(RefreshPayload { token }),
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_without_data_parses() {
        let json = r#"{"success":false,"error":"Invalid email or password"}"#;
        let response: AuthenticateResponse = serde_json::from_str(json).unwrap();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("Invalid email or password"));
    }

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let body = RefreshRequest {
            refresh_token: "r-1".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["refreshToken"], "r-1");
    }
}
