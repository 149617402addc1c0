//! Authentication HTTP Handlers
//!
//! 세션 관리자의 상태 전이(로그인, 로그아웃, 갱신)를 HTTP로 노출합니다.
//! 응답에는 토큰 원문 대신 [`SessionView`] 요약만 포함됩니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인 (로그인 시도 제한 적용)
//! - `POST /api/v1/auth/logout` - 로그아웃 (항상 성공)
//! - `POST /api/v1/auth/refresh` - 저장된 리프레시 토큰으로 갱신
//! - `GET /api/v1/auth/status` - 현재 세션 상태
use actix_web::{HttpResponse, get, post, web};
use validator::Validate;

use crate::core::AppContext;
use crate::domain::dto::{ApiResponse, LoginRequest, RefreshOutcome, SessionView};
use crate::errors::AppError;
use crate::utils::string_utils::{mask_email, normalize_identifier};

fn session_view(context: &AppContext) -> SessionView {
    SessionView::from_state(&context.auth.get_state(), context.clock.now())
}

/// 로그인 핸들러
///
/// 로그인 시도 제한기를 정규화된 이메일 기준으로 먼저 확인한 뒤
/// 세션 관리자에 로그인을 위임합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
///
/// # Errors
///
/// * `400` - 이메일 형식 오류 또는 빈 비밀번호
/// * `401` - 자격 증명 거부
/// * `409` - 처리 중 로그아웃 발생
/// * `429` - 로그인 시도 한도 초과
#[post("/login")]
pub async fn login(
    context: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let identifier = normalize_identifier(&payload.email);
    if !context.login_limiter.is_allowed(&identifier) {
        log::warn!("로그인 시도 한도 초과 - {}", mask_email(&identifier));
        return Err(AppError::RateLimited {
            retry_after_secs: context.login_limiter.retry_after_secs(&identifier),
        });
    }

    context.auth.login(&identifier, &payload.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        session_view(&context),
        "Login successful",
    )))
}

/// 로그아웃 핸들러
///
/// 저장소 실패가 있어도 항상 `200`을 반환합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout")]
pub async fn logout(context: web::Data<AppContext>) -> HttpResponse {
    context.auth.logout().await;
    HttpResponse::Ok().json(ApiResponse::with_message(session_view(&context), "Logged out"))
}

/// 토큰 갱신 핸들러
///
/// 갱신에 실패하면 세션 관리자가 이미 로그아웃했으므로 `refreshed: false`만 반환합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(context: web::Data<AppContext>) -> HttpResponse {
    let refreshed = context.auth.refresh_token().await;
    HttpResponse::Ok().json(ApiResponse::success(RefreshOutcome { refreshed }))
}

/// # Endpoint
/// `GET /api/v1/auth/status`
#[get("/status")]
pub async fn status(context: web::Data<AppContext>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(session_view(&context)))
}
