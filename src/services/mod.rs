//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 명시적으로 생성된 인스턴스이며 [`crate::core::AppContext`]를 통해
//! 핸들러와 미들웨어에 주입됩니다.
//!
//! # Features
//!
//! - 세션 생명주기 관리 (로그인, 로그아웃, 토큰 갱신, 시작 시 복원)
//! - 교체 가능한 자격 증명 백엔드 (HTTP, 모의)
//! - 식별자별 요청 속도 제한
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::AuthManager, rate_limit::RateLimiter};
//!
//! let manager = AuthManager::new(store, credentials, clock.clone());
//! let limiter = RateLimiter::new(RateLimitConfig::default(), clock);
//! ```

pub mod auth;
pub mod rate_limit;
