//! HTTP 응답 DTO
//!
//! 토큰 원문은 절대 응답에 포함하지 않습니다. 세션 상태는 [`SessionView`]로
//! 요약되어 전달됩니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::{AuthState, SessionPhase, User};
use crate::services::rate_limit::RateLimiter;

/// 공통 API 응답 래퍼
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// 세션 상태 요약
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: SessionPhase,
    pub user: Option<User>,
    pub token_type: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub token_expired: bool,
}

impl SessionView {
    /// 상태 스냅샷에서 토큰 원문을 제외한 요약을 만듭니다.
    pub fn from_state(state: &AuthState, now: DateTime<Utc>) -> Self {
        let token = state.token.as_ref();
        Self {
            is_authenticated: state.is_authenticated,
            is_loading: state.is_loading,
            error: state.error.clone(),
            phase: state.phase(),
            user: state.user.clone(),
            token_type: token.map(|t| t.token_type.clone()),
            expires_at: token.map(|t| t.expires_at),
            token_expired: token.is_none_or(|t| t.is_expired_at(now)),
        }
    }
}

/// 권한/역할 확인 결과
#[derive(Debug, Clone, Serialize)]
pub struct GrantCheck {
    pub name: String,
    pub granted: bool,
}

/// 리프레시 결과
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub refreshed: bool,
}

/// 속도 제한 현황
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
}

impl RateLimitStatus {
    pub fn for_identifier(limiter: &RateLimiter, identifier: &str) -> Self {
        Self {
            limit: limiter.limit(),
            remaining: limiter.get_remaining_requests(identifier),
            reset_time: limiter.get_reset_time(identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AuthToken;
    use chrono::Duration;

    #[test]
    fn test_session_view_hides_tokens() {
        let now = Utc::now();
        let state = AuthState {
            token: Some(AuthToken::bearer("secret-access", "secret-refresh", now + Duration::hours(1))),
            ..AuthState::default()
        };

        let view = SessionView::from_state(&state, now);
        let json = serde_json::to_string(&view).unwrap();

        assert!(!json.contains("secret-access"));
        assert!(!json.contains("secret-refresh"));
        assert!(!view.token_expired);
        assert_eq!(view.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn test_session_view_without_token_is_expired() {
        let view = SessionView::from_state(&AuthState::default(), Utc::now());
        assert!(view.token_expired);
        assert_eq!(view.phase, SessionPhase::SignedOut);
    }
}
