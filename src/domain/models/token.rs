//! 액세스/리프레시 토큰 쌍
//!
//! 로그인 또는 리프레시 시 생성되며, 리프레시마다 새 값으로 교체됩니다(변경되지 않음).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 토큰 타입 상수
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

fn default_token_type() -> String {
    BEARER_TOKEN_TYPE.to_string()
}

/// 인증 토큰
///
/// `expires_at`은 항상 절대 벽시계 시간으로 해석하며,
/// `now >= expires_at`이면 만료된 것으로 간주합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// 불투명 액세스 토큰
    pub access_token: String,
    /// 불투명 리프레시 토큰
    pub refresh_token: String,
    /// 만료 시각
    pub expires_at: DateTime<Utc>,
    /// 항상 `"Bearer"`
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl AuthToken {
    /// Bearer 토큰을 생성합니다.
    pub fn bearer(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
            token_type: default_token_type(),
        }
    }

    /// 주어진 시각 기준으로 만료되었는지 확인합니다.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let token = AuthToken::bearer("a", "r", now);

        assert!(token.is_expired_at(now));
        assert!(!token.is_expired_at(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_token_json_uses_camel_case() {
        let token = AuthToken::bearer("access", "refresh", Utc::now());
        let json = serde_json::to_value(&token).unwrap();

        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["refreshToken"], "refresh");
        assert_eq!(json["tokenType"], "Bearer");
        assert!(json["expiresAt"].is_string());
    }

    #[test]
    fn test_missing_token_type_defaults_to_bearer() {
        let json = r#"{"accessToken":"a","refreshToken":"r","expiresAt":"2030-01-01T00:00:00Z"}"#;
        let token: AuthToken = serde_json::from_str(json).unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.access_token, "a");
    }
}
