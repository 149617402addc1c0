//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 속도 제한 미들웨어 (RateLimitMiddleware)
//! - 클라이언트 IP별 윈도우 카운트
//! - 한도 초과 시 `429` + `Retry-After`
//! - 모든 응답에 `X-RateLimit-*` 헤더 추가
//!
//! ### 2. 보안 헤더 (security_headers_middleware)
//! - `X-Frame-Options`, `X-Content-Type-Options` 등 정적 헤더
//! - 직렬화된 `Content-Security-Policy`
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::RateLimitMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1")
//!             .wrap(RateLimitMiddleware::new(context.api_limiter.clone()))
//!             .configure(configure_api_routes)
//!     )
//!     .service(health_check) // 제한 없음
//! ```

pub mod rate_limit_middleware;
mod rate_limit_inner;
pub mod security_headers;

pub use rate_limit_middleware::RateLimitMiddleware;
pub use security_headers::security_headers_middleware;
