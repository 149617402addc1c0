//! # Application Context
//!
//! 핸들러와 미들웨어가 공유하는 서비스 인스턴스 묶음입니다.
//! 전역 싱글톤 대신 `main`에서 한 번 생성되어 `web::Data<AppContext>`로
//! 주입되므로, 테스트마다 독립된 세션과 제한기를 구성할 수 있습니다.
//!
//! ```text
//! AppConfig ──► AppContext::build()
//!                 ├─ build_store()               → Arc<dyn StoreAdapter>
//!                 ├─ build_credential_service()  → Arc<dyn CredentialService>
//!                 ├─ AuthManager                 (세션 상태 소유자)
//!                 ├─ RateLimiter (api)           (클라이언트 IP 기준)
//!                 └─ RateLimiter (login)         (정규화된 이메일 기준)
//! ```

use std::net::IpAddr;
use std::sync::Arc;

use log::info;

use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::services::auth::{AuthManager, build_credential_service};
use crate::services::rate_limit::RateLimiter;
use crate::storage::build_store;
use crate::utils::clock::{Clock, SystemClock};

/// 애플리케이션 컨텍스트
#[derive(Clone)]
pub struct AppContext {
    /// 세션 관리자
    pub auth: Arc<AuthManager>,
    /// API 요청 제한기 (미들웨어)
    pub api_limiter: Arc<RateLimiter>,
    /// 로그인 시도 제한기 (로그인 핸들러)
    pub login_limiter: Arc<RateLimiter>,
    pub clock: Arc<dyn Clock>,
    /// 전달 헤더를 신뢰할 프록시 주소
    pub trusted_proxies: Arc<Vec<IpAddr>>,
}

impl AppContext {
    pub fn new(
        auth: Arc<AuthManager>,
        api_limiter: Arc<RateLimiter>,
        login_limiter: Arc<RateLimiter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            auth,
            api_limiter,
            login_limiter,
            clock,
            trusted_proxies: Arc::new(Vec::new()),
        }
    }

    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = Arc::new(proxies);
        self
    }

    /// 설정으로부터 모든 서비스를 생성합니다. 시스템 시계를 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::StorageError` - 저장소 연결 실패
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub async fn build(config: &AppConfig) -> AppResult<Self> {
        Self::build_with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn build_with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let store = build_store(&config.storage).await?;
        let credentials = build_credential_service(&config.credentials, clock.clone())?;
        info!(
            "자격 증명 서비스 준비 완료: {}",
            config.credentials.backend.as_str()
        );

        let auth = AuthManager::new(store, credentials, clock.clone())
            .with_request_timeout(config.credentials.request_timeout);

        Ok(Self::new(
            Arc::new(auth),
            Arc::new(RateLimiter::new(config.api_rate_limit.clone(), clock.clone())),
            Arc::new(RateLimiter::new(config.login_rate_limit.clone(), clock.clone())),
            clock,
        )
        .with_trusted_proxies(config.server.trusted_proxies.clone()))
    }

    /// 두 제한기의 오래된 윈도우를 정리합니다.
    ///
    /// # Returns
    ///
    /// 제거된 윈도우 수 합계
    pub fn sweep_rate_limits(&self) -> usize {
        self.api_limiter.sweep_expired() + self.login_limiter.sweep_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RateLimitConfig, StoreBackend};
    use crate::utils::clock::ManualClock;
    use chrono::Duration;

    #[actix_web::test]
    async fn test_build_from_default_config() {
        let mut config = AppConfig::default();
        config.storage.backend = StoreBackend::Memory;
        config.login_rate_limit = RateLimitConfig::new(3, Duration::minutes(1));

        let context = AppContext::build(&config).await.unwrap();

        assert!(!context.auth.is_authenticated());
        assert_eq!(context.api_limiter.limit(), 100);
        assert_eq!(context.login_limiter.limit(), 3);
        assert!(context.trusted_proxies.is_empty());
    }

    #[actix_web::test]
    async fn test_build_carries_trusted_proxies() {
        let mut config = AppConfig::default();
        config.server.trusted_proxies = vec!["10.0.0.1".parse().unwrap()];

        let context = AppContext::build(&config).await.unwrap();
        assert_eq!(context.trusted_proxies.as_slice(), config.server.trusted_proxies.as_slice());
    }

    #[actix_web::test]
    async fn test_sweep_covers_both_limiters() {
        let mut config = AppConfig::default();
        config.storage.backend = StoreBackend::Memory;
        let clock = Arc::new(ManualClock::default());
        let context = AppContext::build_with_clock(&config, clock.clone()).await.unwrap();

        context.api_limiter.is_allowed("203.0.113.7");
        context.login_limiter.is_allowed("user@quiz.local");
        clock.advance(Duration::hours(1));

        assert_eq!(context.sweep_rate_limits(), 2);
    }
}
