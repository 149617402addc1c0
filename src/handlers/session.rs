//! Session HTTP Handlers
//!
//! 현재 세션의 사용자 정보와 권한/역할 확인을 제공합니다.
//!
//! # Endpoints
//!
//! - `GET /api/v1/session/me` - 현재 사용자 (로그아웃 상태면 401)
//! - `GET /api/v1/session/permissions/{permission}` - 권한 보유 여부
//! - `GET /api/v1/session/roles/{role}` - 역할 일치 여부
use actix_web::{HttpResponse, get, web};

use crate::core::AppContext;
use crate::domain::dto::{ApiResponse, GrantCheck};
use crate::errors::AppError;
use crate::utils::string_utils::validate_required_string;

/// 현재 로그인한 사용자 조회
///
/// # Endpoint
/// `GET /api/v1/session/me`
#[get("/me")]
pub async fn current_user(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let user = context
        .auth
        .current_user()
        .ok_or_else(|| AppError::AuthenticationError("No active session".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// 권한 확인. 관리자는 모든 권한을 가집니다.
///
/// # Endpoint
/// `GET /api/v1/session/permissions/{permission}`
#[get("/permissions/{permission}")]
pub async fn check_permission(
    context: web::Data<AppContext>,
    permission: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = validate_required_string(&permission, "permission")?;
    let granted = context.auth.has_permission(&name);

    Ok(HttpResponse::Ok().json(ApiResponse::success(GrantCheck { name, granted })))
}

/// 역할 확인 (정확히 일치해야 함)
///
/// # Endpoint
/// `GET /api/v1/session/roles/{role}`
#[get("/roles/{role}")]
pub async fn check_role(
    context: web::Data<AppContext>,
    role: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = validate_required_string(&role, "role")?;
    let granted = context.auth.has_role(&name);

    Ok(HttpResponse::Ok().json(ApiResponse::success(GrantCheck { name, granted })))
}
