//! 인증 세션 관리자
//!
//! [`AuthState`]의 유일한 소유자이자 변경 주체입니다. 로그인, 로그아웃,
//! 토큰 갱신, 시작 시 세션 복원을 담당하며 자격 증명 서비스와 저장소
//! 어댑터는 trait 객체로 주입받습니다.
//!
//! # 동시성
//!
//! - 상태 스냅샷은 `RwLock` 아래에서 복사본으로만 전달됩니다.
//! - 저장소 쓰기와 상태 교체는 하나의 비동기 뮤텍스(커밋 구간)로 직렬화됩니다.
//! - 로그아웃은 세대 카운터를 올립니다. 로그인/갱신은 자격 증명 서비스 호출
//!   전에 세대를 기록하고, 커밋 시점에 세대가 바뀌었으면 결과를 버립니다.
//!
//! # 실패 정책
//!
//! | 실패 | 처리 |
//! |------|------|
//! | 로그인 거부/전송 실패 | `state.error` 설정 후 호출자에게 전파 |
//! | 갱신 거부/전송 실패 | 강제 로그아웃, `false` 반환 |
//! | 로그아웃 중 저장소 실패 | 경고 로그 후 진행 |
//! | 복원 중 저장소 읽기 실패 | 저장된 세션 없음으로 간주 |
//!
//! # 예제
//!
//! ```rust,ignore
//! let manager = AuthManager::new(store, credentials, Arc::new(SystemClock));
//! manager.check_auth_status().await;
//!
//! if !manager.is_authenticated() {
//!     manager.login("user@quiz.local", "password123").await?;
//! }
//! assert!(manager.has_permission("quiz:read"));
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::time::timeout;

use super::credential_service::CredentialService;
use crate::domain::dto::credential::{AuthenticateResponse, RefreshResponse};
use crate::domain::models::{AuthState, AuthToken, User};
use crate::errors::{AppError, AppResult};
use crate::storage::{
    AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, StoreAdapter, USER_DATA_KEY,
};
use crate::utils::clock::Clock;
use crate::utils::string_utils::mask_email;

/// 자격 증명 서비스 호출 기본 타임아웃
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 인증 세션 관리자
pub struct AuthManager {
    store: Arc<dyn StoreAdapter>,
    credentials: Arc<dyn CredentialService>,
    clock: Arc<dyn Clock>,
    state: RwLock<AuthState>,
    generation: AtomicU64,
    commit: Mutex<()>,
    request_timeout: Duration,
}

impl AuthManager {
    pub fn new(
        store: Arc<dyn StoreAdapter>,
        credentials: Arc<dyn CredentialService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            credentials,
            clock,
            state: RwLock::new(AuthState::default()),
            generation: AtomicU64::new(0),
            commit: Mutex::new(()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// 자격 증명 서비스 호출 타임아웃을 설정합니다.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 현재 세션 세대. 로그아웃마다 1씩 증가합니다.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation() != generation
    }

    // ========================================
    // 상태 전이
    // ========================================

    /// 이메일/비밀번호로 로그인합니다.
    ///
    /// 성공하면 토큰과 사용자를 저장소에 기록하고 로그인 상태가 됩니다.
    /// 저장소 쓰기 실패는 경고만 남기며 메모리 세션은 유지됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 자격 증명 거부 또는 이미 만료된 토큰 발급
    /// * `AppError::ExternalServiceError` - 네트워크 오류, 타임아웃, 잘못된 응답
    /// * `AppError::SessionSuperseded` - 응답 대기 중 로그아웃이 발생하여 결과를 버림
    pub async fn login(&self, email: &str, password: &str) -> AppResult<()> {
        let generation = self.generation();
        {
            let mut state = self.write_state();
            state.is_loading = true;
            state.error = None;
        }
        info!("로그인 시도 - {}", mask_email(email));

        let outcome = self
            .call_credentials("로그인", self.credentials.authenticate(email, password))
            .await;

        let _commit = self.commit.lock().await;
        if self.is_superseded(generation) {
            warn!("로그인 응답 폐기 - 대기 중 로그아웃 발생 ({})", mask_email(email));
            return Err(AppError::SessionSuperseded(
                "Logged out while login was in flight".to_string(),
            ));
        }

        let payload = match outcome {
            Ok(AuthenticateResponse {
                success: true,
                data: Some(payload),
                ..
            }) => payload,
            Ok(response) => {
                let reason = response
                    .error
                    .unwrap_or_else(|| "Authentication failed".to_string());
                info!("로그인 거부 - {}: {}", mask_email(email), reason);
                return Err(self.fail_login(AppError::AuthenticationError(reason)));
            }
            Err(e) => {
                warn!("로그인 실패 - {}: {}", mask_email(email), e);
                return Err(self.fail_login(e));
            }
        };

        if payload.token.is_expired_at(self.clock.now()) {
            warn!(
                "만료된 토큰이 발급되어 로그인을 거부합니다 - expires_at: {}",
                payload.token.expires_at
            );
            return Err(self.fail_login(AppError::AuthenticationError(
                "Issued token is already expired".to_string(),
            )));
        }

        if let Err(e) = self.persist_session(&payload.user, &payload.token).await {
            warn!("세션 저장 실패, 메모리 세션만 유지합니다: {}", e);
        }

        info!("로그인 성공 - user_id: {}, role: {}", payload.user.id, payload.user.role);
        *self.write_state() = AuthState::signed_in(payload.user, payload.token);
        Ok(())
    }

    fn fail_login(&self, error: AppError) -> AppError {
        let reason = match &error {
            AppError::AuthenticationError(reason) => reason.clone(),
            other => other.to_string(),
        };

        let mut state = self.write_state();
        state.is_loading = false;
        state.error = Some(reason);
        error
    }

    /// 로그아웃합니다. 저장소 실패가 있어도 항상 완료됩니다.
    ///
    /// 진행 중인 로그인/갱신 결과는 세대 증가로 무효화됩니다.
    pub async fn logout(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _commit = self.commit.lock().await;

        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove(key).await {
                warn!("로그아웃 중 저장소 키 삭제 실패 ({}): {}", key, e);
            }
        }

        *self.write_state() = AuthState::default();
        info!("로그아웃 완료 (generation {})", generation);
    }

    async fn logout_if_current(&self, generation: u64) {
        if !self.is_superseded(generation) {
            self.logout().await;
        }
    }

    /// 저장된 리프레시 토큰으로 액세스 토큰을 갱신합니다.
    ///
    /// # Returns
    ///
    /// * `true` - 새 토큰 설치
    /// * `false` - 리프레시 토큰 없음(상태 변화 없음), 갱신 실패(강제 로그아웃),
    ///   또는 대기 중 로그아웃 발생
    pub async fn refresh_token(&self) -> bool {
        let generation = self.generation();
        let Some(token) = self.exchange_refresh_token(generation).await else {
            return false;
        };

        let _commit = self.commit.lock().await;
        if self.is_superseded(generation) {
            debug!("갱신된 토큰 폐기 - 대기 중 로그아웃 발생");
            return false;
        }

        if let Err(e) = self.persist_token(&token).await {
            warn!("갱신된 토큰 저장 실패: {}", e);
        }

        let mut state = self.write_state();
        state.is_authenticated = state.user.is_some();
        state.token = Some(token);
        state.error = None;
        true
    }

    /// 리프레시 토큰을 새 토큰으로 교환합니다. 상태는 변경하지 않습니다.
    ///
    /// 저장된 리프레시 토큰이 없으면 `None`만 반환하고,
    /// 교환에 실패하면 세대가 그대로일 때 로그아웃한 뒤 `None`을 반환합니다.
    async fn exchange_refresh_token(&self, generation: u64) -> Option<AuthToken> {
        let refresh_token = match self.store.get(REFRESH_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                debug!("저장된 리프레시 토큰 없음");
                return None;
            }
            Err(e) => {
                warn!("리프레시 토큰 읽기 실패: {}", e);
                return None;
            }
        };

        let outcome = self
            .call_credentials("토큰 갱신", self.credentials.refresh(&refresh_token))
            .await;

        let failure = match outcome {
            Ok(RefreshResponse {
                success: true,
                data: Some(payload),
                ..
            }) => {
                if !payload.token.is_expired_at(self.clock.now()) {
                    return Some(payload.token);
                }
                "refreshed token is already expired".to_string()
            }
            Ok(response) => response
                .error
                .unwrap_or_else(|| "Refresh rejected".to_string()),
            Err(e) => e.to_string(),
        };

        warn!("토큰 갱신 실패, 세션을 종료합니다: {}", failure);
        self.logout_if_current(generation).await;
        None
    }

    /// 프로세스 시작 시 저장소에서 세션을 복원합니다.
    ///
    /// 저장된 토큰이 만료되었으면 갱신을 시도하고, 실패하면 로그아웃합니다.
    /// 저장소 읽기 실패나 손상된 데이터는 저장된 세션 없음으로 처리합니다.
    pub async fn check_auth_status(&self) {
        let generation = self.generation();
        self.write_state().is_loading = true;

        let restored = match self.load_persisted().await {
            Ok(restored) => restored,
            Err(e) => {
                warn!("저장된 세션을 읽을 수 없어 로그아웃 상태로 시작합니다: {}", e);
                None
            }
        };

        let Some((user, token)) = restored else {
            debug!("저장된 세션 없음");
            self.settle_loading(generation);
            return;
        };

        let (token, refreshed) = if token.is_expired_at(self.clock.now()) {
            info!("저장된 토큰 만료 - 갱신 시도 (user_id: {})", user.id);
            match self.exchange_refresh_token(generation).await {
                Some(token) => (token, true),
                None => {
                    self.logout_if_current(generation).await;
                    return;
                }
            }
        } else {
            (token, false)
        };

        let _commit = self.commit.lock().await;
        if self.is_superseded(generation) {
            debug!("세션 복원 결과 폐기 - 대기 중 로그아웃 발생");
            return;
        }

        if refreshed {
            if let Err(e) = self.persist_token(&token).await {
                warn!("갱신된 토큰 저장 실패: {}", e);
            }
        }

        info!("세션 복원 완료 - user_id: {}", user.id);
        *self.write_state() = AuthState::signed_in(user, token);
    }

    fn settle_loading(&self, generation: u64) {
        if !self.is_superseded(generation) {
            self.write_state().is_loading = false;
        }
    }

    // ========================================
    // 조회
    // ========================================

    /// 권한 보유 여부. 관리자는 모든 권한을 가집니다.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.read_state()
            .user
            .as_ref()
            .is_some_and(|user| user.has_permission(permission))
    }

    /// 역할 일치 여부. 로그아웃 상태에서는 항상 `false`입니다.
    pub fn has_role(&self, role: &str) -> bool {
        self.read_state()
            .user
            .as_ref()
            .is_some_and(|user| user.has_role(role))
    }

    /// 토큰이 없거나 `now >= expires_at`이면 `true`
    pub fn is_token_expired(&self) -> bool {
        let now = self.clock.now();
        self.read_state()
            .token
            .as_ref()
            .is_none_or(|token| token.is_expired_at(now))
    }

    /// 상태 스냅샷
    pub fn get_state(&self) -> AuthState {
        self.read_state().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_state().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated
    }

    // ========================================
    // 내부 헬퍼
    // ========================================

    async fn call_credentials<T, F>(&self, operation: &str, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::ExternalServiceError(format!(
                "{} 요청 시간 초과 ({:?})",
                operation, self.request_timeout
            ))),
        }
    }

    async fn persist_session(&self, user: &User, token: &AuthToken) -> AppResult<()> {
        self.store
            .set(USER_DATA_KEY, &serde_json::to_string(user)?)
            .await?;
        self.persist_token(token).await
    }

    async fn persist_token(&self, token: &AuthToken) -> AppResult<()> {
        self.store
            .set(AUTH_TOKEN_KEY, &serde_json::to_string(token)?)
            .await?;
        self.store.set(REFRESH_TOKEN_KEY, &token.refresh_token).await
    }

    /// 저장된 토큰/사용자 쌍을 읽습니다. 둘 중 하나라도 없으면 `None`입니다.
    async fn load_persisted(&self) -> AppResult<Option<(User, AuthToken)>> {
        let raw_token = self.store.get(AUTH_TOKEN_KEY).await?;
        let raw_user = self.store.get(USER_DATA_KEY).await?;

        match (raw_token, raw_user) {
            (Some(raw_token), Some(raw_user)) => {
                let token: AuthToken = serde_json::from_str(&raw_token)?;
                let user: User = serde_json::from_str(&raw_user)?;
                Ok(Some((user, token)))
            }
            _ => Ok(None),
        }
    }
}
