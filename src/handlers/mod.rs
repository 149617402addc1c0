//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 `web::Data<AppContext>`로 주입된 서비스에 작업을 위임하고
//! 결과를 JSON 응답으로 변환합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Quiz UI, CLI)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   RateLimitMiddleware                          ← 클라이언트 IP별 제한
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AuthManager / RateLimiter                    ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   StoreAdapter / CredentialService             ← 외부 협력자
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인, 로그아웃, 토큰 갱신, 세션 상태
//! - **`session`**: 현재 사용자, 권한/역할 확인
//! - **`rate_limit`**: 호출자의 속도 제한 현황
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 상태 코드와 JSON 본문을 결정합니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! pub async fn current_user(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
//!     let user = context
//!         .auth
//!         .current_user()
//!         .ok_or_else(|| AppError::AuthenticationError("No active session".to_string()))?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
//! }
//! ```

#[cfg(test)]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.context.clone()))
                .configure(|cfg| crate::routes::configure_all_routes(cfg, &$ctx.context)),
        )
        .await
    };
}

pub mod auth;
pub mod rate_limit;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::Duration;

    use crate::config::RateLimitConfig;
    use crate::core::AppContext;
    use crate::services::auth::{AuthManager, MockCredentialService};
    use crate::services::rate_limit::RateLimiter;
    use crate::storage::MemoryStore;
    use crate::utils::clock::ManualClock;

    /// 메모리 저장소, 데모 계정, 수동 시계로 구성된 테스트 컨텍스트
    pub struct TestContext {
        pub context: AppContext,
        pub credentials: Arc<MockCredentialService>,
        pub clock: Arc<ManualClock>,
    }

    impl TestContext {
        pub fn new() -> Self {
            Self::with_api_limit(100)
        }

        pub fn with_api_limit(max_requests: u32) -> Self {
            let clock = Arc::new(ManualClock::default());
            let credentials = Arc::new(MockCredentialService::with_demo_accounts(clock.clone()));
            let auth = AuthManager::new(
                Arc::new(MemoryStore::new()),
                credentials.clone(),
                clock.clone(),
            );

            let context = AppContext::new(
                Arc::new(auth),
                Arc::new(RateLimiter::new(
                    RateLimitConfig::new(max_requests, Duration::minutes(15)),
                    clock.clone(),
                )),
                Arc::new(RateLimiter::new(
                    RateLimitConfig::new(3, Duration::minutes(15)),
                    clock.clone(),
                )),
                clock.clone(),
            );

            Self {
                context,
                credentials,
                clock,
            }
        }
    }
}
