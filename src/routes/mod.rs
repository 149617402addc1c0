//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 기능별로 그룹화하여 등록합니다.
//!
//! # Route Groups
//!
//! | 경로 | 속도 제한 | 핸들러 |
//! |------|-----------|--------|
//! | `GET /health` | 없음 | [`health_check`] |
//! | `/api/v1/auth/*` | API 제한 + 로그인 시도 제한 | [`handlers::auth`] |
//! | `/api/v1/session/*` | API 제한 | [`handlers::session`] |
//! | `GET /api/v1/rate-limit` | API 제한 | [`handlers::rate_limit`] |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(context.clone()))
//!     .configure(|cfg| configure_all_routes(cfg, &context));
//! ```

use actix_web::web;
use serde_json::json;

use crate::core::AppContext;
use crate::handlers;
use crate::middlewares::RateLimitMiddleware;

/// 모든 라우트를 설정합니다
///
/// `/api/v1` 스코프 전체에 API 속도 제한 미들웨어를 적용합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
/// * `context` - 미들웨어에 제한기를 넘겨줄 애플리케이션 컨텍스트
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, context: &AppContext) {
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .wrap(
                RateLimitMiddleware::new(context.api_limiter.clone())
                    .with_trusted_proxies(context.trusted_proxies.clone()),
            )
            .configure(configure_auth_routes)
            .configure(configure_session_routes)
            .service(handlers::rate_limit::rate_limit_status),
    );
}

/// 인증 관련 라우트를 설정합니다
///
/// # Available Routes
///
/// - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인
/// - `POST /api/v1/auth/logout` - 로그아웃
/// - `POST /api/v1/auth/refresh` - 토큰 갱신
/// - `GET /api/v1/auth/status` - 세션 상태
///
/// # Examples
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@quiz.local","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::logout)
            .service(handlers::auth::refresh)
            .service(handlers::auth::status),
    );
}

/// 세션 조회 라우트를 설정합니다
///
/// - `GET /api/v1/session/me`
/// - `GET /api/v1/session/permissions/{permission}`
/// - `GET /api/v1/session/roles/{role}`
fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/session")
            .service(handlers::session::current_user)
            .service(handlers::session::check_permission)
            .service(handlers::session::check_role),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "quiz_session_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
