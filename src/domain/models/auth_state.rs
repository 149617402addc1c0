//! 세션 관리자가 단독 소유하는 인증 상태 집합체

use serde::{Deserialize, Serialize};

use super::token::AuthToken;
use super::user::User;

/// 관찰 가능한 세션 단계
///
/// 데이터 모델에 태그로 저장되지는 않으며 [`AuthState`] 필드에서 파생됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// 로그아웃 상태
    SignedOut,
    /// 로그인 또는 세션 복원 진행 중
    SigningIn,
    /// 로그인 상태
    SignedIn,
}

/// 인증 상태
///
/// `is_authenticated == true`이면 `user`와 `token`이 모두 존재하며,
/// 토큰은 마지막으로 설정된 시점에 만료되지 않았습니다.
/// 외부에는 항상 복사본만 전달됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// 현재 사용자
    pub user: Option<User>,
    /// 현재 토큰
    pub token: Option<AuthToken>,
    /// 인증 여부
    pub is_authenticated: bool,
    /// 비동기 작업 진행 여부
    pub is_loading: bool,
    /// 마지막 실패 사유
    pub error: Option<String>,
}

impl AuthState {
    /// 로그인 완료 상태를 생성합니다.
    pub fn signed_in(user: User, token: AuthToken) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
            error: None,
        }
    }

    /// 현재 세션 단계를 반환합니다.
    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::SigningIn
        } else if self.is_authenticated {
            SessionPhase::SignedIn
        } else {
            SessionPhase::SignedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::UserRole;
    use chrono::{Duration, Utc};
    use std::collections::BTreeSet;

    #[test]
    fn test_default_state_is_signed_out() {
        let state = AuthState::default();

        assert_eq!(state.phase(), SessionPhase::SignedOut);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_signed_in_state() {
        let user = User {
            id: "u-1".to_string(),
            email: "user@quiz.local".to_string(),
            name: "Quiz User".to_string(),
            role: UserRole::User,
            permissions: BTreeSet::new(),
            last_login: Utc::now(),
            is_active: true,
        };
        let token = AuthToken::bearer("a", "r", Utc::now() + Duration::hours(1));
        let mut state = AuthState::signed_in(user, token);

        assert_eq!(state.phase(), SessionPhase::SignedIn);
        state.is_loading = true;
        assert_eq!(state.phase(), SessionPhase::SigningIn);
    }
}
