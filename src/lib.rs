//! 퀴즈 세션 서비스
//!
//! 퀴즈 클라이언트의 인증 세션 생명주기와 요청 속도 제한을 담당하는
//! 로컬 세션 데몬입니다. 핵심 로직은 라이브러리로 제공되고,
//! 바이너리는 이를 actix-web HTTP 서버로 노출합니다.
//!
//! # Features
//!
//! - **세션 관리**: 로그인, 로그아웃, 토큰 갱신, 시작 시 세션 복원
//! - **권한 확인**: 역할/권한 조회 (관리자는 모든 권한)
//! - **속도 제한**: 식별자별 윈도우 카운트 (API 요청, 로그인 시도)
//! - **교체 가능한 저장소**: 메모리, JSON 파일, Redis
//! - **교체 가능한 인증 백엔드**: HTTP 인증 서버, 모의 계정
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API + RateLimitMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← AuthManager, RateLimiter
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Store / Creds   │ ← StoreAdapter, CredentialService
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use quiz_session_service::config::AppConfig;
//! use quiz_session_service::core::AppContext;
//!
//! let context = AppContext::build(&AppConfig::from_env()?).await?;
//! context.auth.check_auth_status().await;
//!
//! if context.login_limiter.is_allowed("user@quiz.local") {
//!     context.auth.login("user@quiz.local", "password123").await?;
//! }
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;
