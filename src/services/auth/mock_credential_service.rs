//! 메모리 내 모의 자격 증명 서비스
//!
//! 실제 인증 서버 없이 세션 흐름을 구동하기 위한 구현입니다.
//! 계정은 메모리에 보관되며, 불투명 UUID 토큰을 발급하고
//! 리프레시 시 리프레시 토큰을 교체합니다. 사용자당 유효한 리프레시 토큰은
//! 하나뿐이며, 다시 로그인하면 이전 토큰은 무효가 됩니다.
//!
//! # 데모 계정
//!
//! | 이메일 | 비밀번호 | 역할 | 권한 |
//! |--------|----------|------|------|
//! | `admin@quiz.local` | `admin123` | admin | - |
//! | `user@quiz.local` | `password123` | user | `quiz:read`, `quiz:attempt` |

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Duration;
use log::info;
use uuid::Uuid;

use super::credential_service::CredentialService;
use crate::domain::dto::credential::{AuthenticateResponse, RefreshResponse};
use crate::domain::models::{AuthToken, User, UserRole};
use crate::errors::AppResult;
use crate::utils::clock::Clock;
use crate::utils::string_utils::normalize_identifier;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

struct MockAccount {
    password: String,
    user: User,
}

#[derive(Default)]
struct MockState {
    accounts: HashMap<String, MockAccount>,
    /// 리프레시 토큰 → 사용자 이메일
    refresh_tokens: HashMap<String, String>,
}

/// 모의 자격 증명 서비스
pub struct MockCredentialService {
    state: Mutex<MockState>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

impl MockCredentialService {
    /// 계정이 없는 서비스를 생성합니다.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            clock,
            token_ttl: Duration::hours(1),
        }
    }

    /// 데모 계정이 등록된 서비스를 생성합니다.
    pub fn with_demo_accounts(clock: Arc<dyn Clock>) -> Self {
        let service = Self::new(clock);
        service.add_account("admin-1", "admin@quiz.local", "Quiz Admin", "admin123", UserRole::Admin, &[]);
        service.add_account(
            "user-1",
            "user@quiz.local",
            "Quiz Candidate",
            "password123",
            UserRole::User,
            &["quiz:read", "quiz:attempt"],
        );
        service
    }

    /// 발급할 액세스 토큰 수명을 설정합니다.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 계정을 등록합니다.
    pub fn add_account(
        &self,
        id: &str,
        email: &str,
        name: &str,
        password: &str,
        role: UserRole,
        permissions: &[&str],
    ) {
        let user = User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            permissions: permissions.iter().map(|p| p.to_string()).collect::<BTreeSet<_>>(),
            last_login: self.clock.now(),
            is_active: true,
        };

        self.state().accounts.insert(
            normalize_identifier(email),
            MockAccount {
                password: password.to_string(),
                user,
            },
        );
    }

    /// 발급된 모든 리프레시 토큰을 무효화합니다.
    pub fn revoke_refresh_tokens(&self) {
        self.state().refresh_tokens.clear();
    }

    fn issue_token(&self, state: &mut MockState, email: &str) -> AuthToken {
        let refresh_token = Uuid::new_v4().to_string();
        state
            .refresh_tokens
            .insert(refresh_token.clone(), email.to_string());

        AuthToken::bearer(
            Uuid::new_v4().to_string(),
            refresh_token,
            self.clock.now() + self.token_ttl,
        )
    }
}

#[async_trait]
impl CredentialService for MockCredentialService {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<AuthenticateResponse> {
        let key = normalize_identifier(email);
        let now = self.clock.now();
        let mut state = self.state();

        let user = match state.accounts.get_mut(&key) {
            Some(account) if account.password == password && account.user.is_active => {
                account.user.last_login = now;
                account.user.clone()
            }
            _ => return Ok(AuthenticateResponse::rejected(INVALID_CREDENTIALS)),
        };

        state.refresh_tokens.retain(|_, owner| owner != &key);
        let token = self.issue_token(&mut state, &key);
        info!("모의 인증 성공 - user_id: {}", user.id);
        Ok(AuthenticateResponse::ok(user, token))
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let mut state = self.state();

        let Some(email) = state.refresh_tokens.remove(refresh_token) else {
            return Ok(RefreshResponse::rejected(INVALID_REFRESH_TOKEN));
        };

        let token = self.issue_token(&mut state, &email);
        Ok(RefreshResponse::ok(token))
    }
}
