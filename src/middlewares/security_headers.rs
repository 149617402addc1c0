//! 보안 응답 헤더 미들웨어
//!
//! [`crate::config::security_config`]의 헤더 목록을 모든 응답에 기본값으로 추가합니다.
//! 핸들러가 같은 헤더를 직접 설정하면 핸들러 값이 우선합니다.

use actix_web::middleware::DefaultHeaders;

use crate::config::security_headers;

/// 보안 헤더와 CSP가 설정된 `DefaultHeaders` 미들웨어를 생성합니다.
///
/// ```rust,ignore
/// App::new().wrap(security_headers_middleware())
/// ```
pub fn security_headers_middleware() -> DefaultHeaders {
    security_headers()
        .into_iter()
        .fold(DefaultHeaders::new(), |headers, header| headers.add(header))
}
