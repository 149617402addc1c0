//! 보안 응답 헤더 및 CSP 설정
//!
//! 정적인 HTTP 보안 헤더 목록과 Content-Security-Policy 지시어 테이블,
//! 그리고 지시어 테이블을 헤더 값 문자열로 직렬화하는 함수를 제공합니다.
//!
//! ```rust,ignore
//! let csp = build_csp_header(CSP_DIRECTIVES);
//! // "default-src 'self'; script-src 'self'; ..."
//! ```

use once_cell::sync::Lazy;

/// CSP 지시어 이름과 값 목록
pub type CspDirective = (&'static str, &'static [&'static str]);

/// 기본 CSP 지시어 테이블
pub const CSP_DIRECTIVES: &[CspDirective] = &[
    ("default-src", &["'self'"]),
    ("script-src", &["'self'"]),
    ("style-src", &["'self'", "'unsafe-inline'"]),
    ("img-src", &["'self'", "data:", "https:"]),
    ("font-src", &["'self'", "data:"]),
    ("connect-src", &["'self'"]),
    ("frame-ancestors", &["'none'"]),
    ("base-uri", &["'self'"]),
    ("form-action", &["'self'"]),
    ("object-src", &["'none'"]),
    ("upgrade-insecure-requests", &[]),
];

/// CSP를 제외한 정적 보안 헤더
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("X-XSS-Protection", "1; mode=block"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    ("Permissions-Policy", "camera=(), microphone=(), geolocation=()"),
    ("Strict-Transport-Security", "max-age=31536000; includeSubDomains"),
];

/// `Content-Security-Policy` 헤더 이름
pub const CSP_HEADER_NAME: &str = "Content-Security-Policy";

/// 기본 테이블로 직렬화된 CSP 헤더 값
pub static CONTENT_SECURITY_POLICY: Lazy<String> = Lazy::new(|| build_csp_header(CSP_DIRECTIVES));

/// CSP 지시어 테이블을 헤더 값으로 직렬화합니다.
///
/// 각 지시어는 `이름 값1 값2` 형태가 되고 `"; "`로 연결됩니다.
/// 값이 없는 지시어는 이름만 기록됩니다.
pub fn build_csp_header(directives: &[CspDirective]) -> String {
    directives
        .iter()
        .map(|(name, values)| {
            if values.is_empty() {
                (*name).to_string()
            } else {
                format!("{} {}", name, values.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// CSP를 포함한 전체 보안 헤더 목록을 반환합니다.
pub fn security_headers() -> Vec<(&'static str, String)> {
    SECURITY_HEADERS
        .iter()
        .map(|(name, value)| (*name, (*value).to_string()))
        .chain(std::iter::once((CSP_HEADER_NAME, CONTENT_SECURITY_POLICY.clone())))
        .collect()
}
