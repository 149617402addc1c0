//! 요청 속도 제한 서비스
//!
//! 식별자별 윈도우 기반 허용 제어를 제공합니다. 로그인 시도와 API 호출이
//! 각자 독립된 [`RateLimiter`] 인스턴스를 사용합니다.

pub mod rate_limiter;

pub use rate_limiter::*;
